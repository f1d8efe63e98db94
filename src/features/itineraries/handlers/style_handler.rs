use axum::Json;

use crate::features::itineraries::dtos::TravelStyleDto;
use crate::features::itineraries::models::TravelStyle;
use crate::shared::types::ApiResponse;

/// Travel styles a trip can be generated with
#[utoipa::path(
    get,
    path = "/api/styles",
    responses(
        (status = 200, description = "Available travel styles", body = ApiResponse<Vec<TravelStyleDto>>)
    ),
    tag = "itineraries"
)]
pub async fn list_styles() -> Json<ApiResponse<Vec<TravelStyleDto>>> {
    let styles = TravelStyle::ALL.into_iter().map(Into::into).collect();
    Json(ApiResponse::success(Some(styles), None, None))
}
