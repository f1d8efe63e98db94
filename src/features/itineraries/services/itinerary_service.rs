use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::pending_store::PendingStore;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::events::model::Event;
use crate::features::events::EventsService;
use crate::features::itineraries::dtos::{
    CreateAction, CreateItineraryDto, ItineraryResponseDto, PendingItineraryDto,
    UpdateItineraryDto,
};
use crate::features::itineraries::models::{Itinerary, ItineraryUpdate, PendingItinerary};
use crate::features::itineraries::repositories::ItineraryRepository;
use crate::features::planner::PlannerService;
use crate::shared::types::PaginationQuery;

pub const SIGN_IN_TO_SAVE_MESSAGE: &str = "Please sign in to save itineraries to your account.";
pub const NO_PREVIEW_MESSAGE: &str = "Generate a new itinerary to see a preview.";
pub const NO_PENDING_MESSAGE: &str =
    "We couldn't find a pending itinerary to save. Please generate a new one.";
const NOT_FOUND_MESSAGE: &str = "Itinerary not found";

/// Result of a create request
#[derive(Debug)]
pub enum CreateOutcome {
    Saved(ItineraryResponseDto),
    Previewed(PendingItineraryDto),
}

pub struct ItineraryService {
    repository: Arc<dyn ItineraryRepository>,
    planner: Arc<PlannerService>,
    events: Arc<EventsService>,
    pending: Arc<PendingStore>,
}

impl ItineraryService {
    pub fn new(
        repository: Arc<dyn ItineraryRepository>,
        planner: Arc<PlannerService>,
        events: Arc<EventsService>,
        pending: Arc<PendingStore>,
    ) -> Self {
        Self {
            repository,
            planner,
            events,
            pending,
        }
    }

    /// Generate a plan, then save it or keep it in the session
    ///
    /// A save without a signed-in user is refused before anything is generated.
    pub async fn create(
        &self,
        user: Option<&AuthenticatedUser>,
        session: Uuid,
        dto: CreateItineraryDto,
    ) -> Result<CreateOutcome> {
        let owner = match (dto.action, user) {
            (CreateAction::Save, None) => {
                return Err(AppError::Unauthorized(SIGN_IN_TO_SAVE_MESSAGE.to_string()))
            }
            (CreateAction::Save, Some(user)) => Some(user.user_id.clone()),
            (CreateAction::Preview, _) => None,
        };

        let trip = dto.trip();
        let generated = self.planner.generate(&trip).await?;
        let pending = PendingItinerary {
            trip,
            prompt: generated.prompt,
            generated_plan: generated.plan,
            generated_at: Utc::now(),
        };

        match owner {
            Some(user_id) => {
                let itinerary = self.repository.insert(pending.into_new(user_id)).await?;
                Ok(CreateOutcome::Saved(itinerary.into()))
            }
            None => {
                self.pending.put(session, pending.clone()).await;
                tracing::debug!("Stored pending itinerary for session {}", session);
                Ok(CreateOutcome::Previewed(pending.into()))
            }
        }
    }

    pub async fn preview(&self, session: Uuid) -> Result<PendingItineraryDto> {
        self.pending
            .get(session)
            .await
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(NO_PREVIEW_MESSAGE.to_string()))
    }

    /// Persist the session's pending itinerary for the user and clear it
    pub async fn save_pending(
        &self,
        user: &AuthenticatedUser,
        session: Uuid,
    ) -> Result<ItineraryResponseDto> {
        let pending = self
            .pending
            .get(session)
            .await
            .ok_or_else(|| AppError::NotFound(NO_PENDING_MESSAGE.to_string()))?;

        let itinerary = self
            .repository
            .insert(pending.into_new(user.user_id.clone()))
            .await?;
        self.pending.remove(session).await;

        Ok(itinerary.into())
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: Uuid) -> Result<ItineraryResponseDto> {
        self.find_owned(user, id).await.map(Into::into)
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        query: &PaginationQuery,
    ) -> Result<(Vec<ItineraryResponseDto>, i64)> {
        let (itineraries, total) = self
            .repository
            .list_for_user(&user.user_id, query.limit(), query.offset())
            .await?;

        Ok((itineraries.into_iter().map(Into::into).collect(), total))
    }

    /// Apply edits; with `regenerate_plan` the prompt and plan are replaced
    ///
    /// A failed regeneration leaves the stored record untouched.
    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        dto: UpdateItineraryDto,
    ) -> Result<ItineraryResponseDto> {
        let existing = self.find_owned(user, id).await?;
        let trip = dto.trip();

        let (prompt, generated_plan) = if dto.regenerate_plan {
            let generated = self.planner.generate(&trip).await?;
            (generated.prompt, generated.plan)
        } else {
            (existing.prompt, dto.generated_plan)
        };

        let updated = self
            .repository
            .update(
                id,
                &user.user_id,
                ItineraryUpdate {
                    trip,
                    prompt,
                    generated_plan,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        tracing::info!(
            "Itinerary updated: id={}, regenerated={}",
            id,
            dto.regenerate_plan
        );

        Ok(updated.into())
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<()> {
        if !self.repository.delete(id, &user.user_id).await? {
            return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
        }

        tracing::info!("Itinerary deleted: id={}", id);
        Ok(())
    }

    /// Events for a stored itinerary's destinations and dates
    pub async fn events(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Vec<Event>> {
        let itinerary = self.find_owned(user, id).await?;

        Ok(self
            .events
            .fetch_events(
                &itinerary.destination,
                itinerary.start_date,
                itinerary.end_date,
            )
            .await)
    }

    async fn find_owned(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Itinerary> {
        self.repository
            .find_for_user(id, &user.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
    }
}
