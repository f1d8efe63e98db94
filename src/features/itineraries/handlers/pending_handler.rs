use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::core::error::Result;
use crate::core::extractor::SessionId;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::itineraries::dtos::{ItineraryResponseDto, PendingItineraryDto};
use crate::features::itineraries::services::ItineraryService;
use crate::shared::types::ApiResponse;

/// The itinerary generated in this session and not saved yet
#[utoipa::path(
    get,
    path = "/api/itineraries/preview",
    params(
        ("x-session-id" = Option<String>, Header, description = "Session identifier returned by a previous response")
    ),
    responses(
        (status = 200, description = "Pending itinerary", body = ApiResponse<PendingItineraryDto>),
        (status = 404, description = "Nothing to preview")
    ),
    tag = "itineraries"
)]
pub async fn preview_itinerary(
    State(service): State<Arc<ItineraryService>>,
    session: SessionId,
) -> Result<impl IntoResponse> {
    let pending = service.preview(session.0).await?;
    Ok((
        session,
        Json(ApiResponse::success(Some(pending), None, None)),
    ))
}

/// Save this session's pending itinerary to the caller's account
#[utoipa::path(
    post,
    path = "/api/itineraries/pending/save",
    params(
        ("x-session-id" = String, Header, description = "Session holding the pending itinerary")
    ),
    responses(
        (status = 201, description = "Itinerary saved", body = ApiResponse<ItineraryResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No pending itinerary in this session")
    ),
    tag = "itineraries",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn save_pending_itinerary(
    user: AuthenticatedUser,
    State(service): State<Arc<ItineraryService>>,
    session: SessionId,
) -> Result<impl IntoResponse> {
    let itinerary = service.save_pending(&user, session.0).await?;
    Ok((
        StatusCode::CREATED,
        session,
        Json(ApiResponse::success(
            Some(itinerary),
            Some("Itinerary saved to your trips.".to_string()),
            None,
        )),
    ))
}
