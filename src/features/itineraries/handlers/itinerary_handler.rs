use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, MaybeUser, SessionId};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::itineraries::dtos::{
    CreateItineraryDto, ItineraryEventsDto, ItineraryResponseDto, PendingItineraryDto,
    UpdateItineraryDto,
};
use crate::features::itineraries::services::{CreateOutcome, ItineraryService};
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Generate an itinerary and either preview it or save it
///
/// `action = preview` (default) keeps the result in the caller's session and
/// works anonymously. `action = save` requires sign-in and persists it.
#[utoipa::path(
    post,
    path = "/api/itineraries",
    request_body = CreateItineraryDto,
    responses(
        (status = 201, description = "Itinerary generated and saved", body = ApiResponse<ItineraryResponseDto>),
        (status = 200, description = "Itinerary generated and held for preview", body = ApiResponse<PendingItineraryDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Sign-in required to save"),
        (status = 502, description = "Text generation failed"),
        (status = 503, description = "Text generation not configured")
    ),
    tag = "itineraries",
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn create_itinerary(
    State(service): State<Arc<ItineraryService>>,
    MaybeUser(user): MaybeUser,
    session: SessionId,
    AppJson(dto): AppJson<CreateItineraryDto>,
) -> Result<Response> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = match service.create(user.as_ref(), session.0, dto).await? {
        CreateOutcome::Saved(itinerary) => (
            StatusCode::CREATED,
            session,
            Json(ApiResponse::success(
                Some(itinerary),
                Some("Itinerary created successfully.".to_string()),
                None,
            )),
        )
            .into_response(),
        CreateOutcome::Previewed(pending) => (
            StatusCode::OK,
            session,
            Json(ApiResponse::success(Some(pending), None, None)),
        )
            .into_response(),
    };

    Ok(response)
}

/// List the caller's itineraries, newest first
#[utoipa::path(
    get,
    path = "/api/itineraries",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Itineraries retrieved successfully", body = ApiResponse<Vec<ItineraryResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "itineraries",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_itineraries(
    user: AuthenticatedUser,
    State(service): State<Arc<ItineraryService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ItineraryResponseDto>>>> {
    let (itineraries, total) = service.list(&user, &params).await?;
    Ok(Json(ApiResponse::success(
        Some(itineraries),
        None,
        Some(Meta { total }),
    )))
}

/// Get one of the caller's itineraries
#[utoipa::path(
    get,
    path = "/api/itineraries/{id}",
    params(
        ("id" = Uuid, Path, description = "Itinerary ID")
    ),
    responses(
        (status = 200, description = "Itinerary retrieved successfully", body = ApiResponse<ItineraryResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Itinerary not found")
    ),
    tag = "itineraries",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_itinerary(
    user: AuthenticatedUser,
    State(service): State<Arc<ItineraryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ItineraryResponseDto>>> {
    let itinerary = service.get(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(itinerary), None, None)))
}

/// Update an itinerary, optionally regenerating its plan
#[utoipa::path(
    put,
    path = "/api/itineraries/{id}",
    params(
        ("id" = Uuid, Path, description = "Itinerary ID")
    ),
    request_body = UpdateItineraryDto,
    responses(
        (status = 200, description = "Itinerary updated successfully", body = ApiResponse<ItineraryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Itinerary not found"),
        (status = 502, description = "Text generation failed"),
        (status = 503, description = "Text generation not configured")
    ),
    tag = "itineraries",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_itinerary(
    user: AuthenticatedUser,
    State(service): State<Arc<ItineraryService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateItineraryDto>,
) -> Result<Json<ApiResponse<ItineraryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let itinerary = service.update(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(itinerary),
        Some("Itinerary updated successfully.".to_string()),
        None,
    )))
}

/// Delete an itinerary
#[utoipa::path(
    delete,
    path = "/api/itineraries/{id}",
    params(
        ("id" = Uuid, Path, description = "Itinerary ID")
    ),
    responses(
        (status = 200, description = "Itinerary deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Itinerary not found")
    ),
    tag = "itineraries",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_itinerary(
    user: AuthenticatedUser,
    State(service): State<Arc<ItineraryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Itinerary deleted successfully.".to_string()),
        None,
    )))
}

/// Events during a saved itinerary, per destination
#[utoipa::path(
    get,
    path = "/api/itineraries/{id}/events",
    params(
        ("id" = Uuid, Path, description = "Itinerary ID")
    ),
    responses(
        (status = 200, description = "Events retrieved successfully", body = ApiResponse<ItineraryEventsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Itinerary not found")
    ),
    tag = "itineraries",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_itinerary_events(
    user: AuthenticatedUser,
    State(service): State<Arc<ItineraryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ItineraryEventsDto>>> {
    let events = service.events(&user, id).await?;
    Ok(Json(ApiResponse::success(
        Some(ItineraryEventsDto {
            itinerary_id: id,
            events,
        }),
        None,
        None,
    )))
}
