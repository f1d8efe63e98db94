/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// TRIP FORM LIMITS
// =============================================================================

/// Maximum length of the free-text destination field
pub const MAX_DESTINATION_LENGTH: u64 = 2_000;

/// Maximum length of interests / activities / food preference fields
pub const MAX_PREFERENCE_LENGTH: u64 = 4_000;

/// Maximum length of an edited plan body
pub const MAX_PLAN_LENGTH: u64 = 100_000;

/// Longest trip accepted, in days
pub const MAX_TRIP_DAYS: i64 = 90;
