use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use super::dto::{EventSearchDto, EventSearchResponseDto};
use super::service::EventsService;
use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::shared::types::ApiResponse;

/// Split trip text into destination segments and look up events for each
#[utoipa::path(
    post,
    path = "/api/events/search",
    request_body = EventSearchDto,
    responses(
        (status = 200, description = "Segments and events", body = ApiResponse<EventSearchResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "events"
)]
pub async fn search_events(
    State(service): State<Arc<EventsService>>,
    AppJson(dto): AppJson<EventSearchDto>,
) -> Result<Json<ApiResponse<EventSearchResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let lookup = service
        .search(&dto.destination, dto.start_date, dto.end_date)
        .await;

    Ok(Json(ApiResponse::success(
        Some(EventSearchResponseDto {
            segments: lookup.segments,
            events: lookup.events,
        }),
        None,
        None,
    )))
}
