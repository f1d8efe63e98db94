use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::destinations::DestinationSegment;
use crate::features::events::{dto as events_dto, handler as events_handler, model as events_model};
use crate::features::itineraries::{
    dtos as itineraries_dtos, handlers as itineraries_handlers, models as itineraries_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Itineraries
        itineraries_handlers::list_styles,
        itineraries_handlers::create_itinerary,
        itineraries_handlers::list_itineraries,
        itineraries_handlers::get_itinerary,
        itineraries_handlers::update_itinerary,
        itineraries_handlers::delete_itinerary,
        itineraries_handlers::get_itinerary_events,
        itineraries_handlers::preview_itinerary,
        itineraries_handlers::save_pending_itinerary,
        // Events (public)
        events_handler::search_events,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::dto::MeResponseDto,
            auth::model::AuthenticatedUser,
            ApiResponse<auth::dto::MeResponseDto>,
            // Itineraries
            itineraries_models::TravelStyle,
            itineraries_dtos::CreateAction,
            itineraries_dtos::CreateItineraryDto,
            itineraries_dtos::UpdateItineraryDto,
            itineraries_dtos::ItineraryResponseDto,
            itineraries_dtos::PendingItineraryDto,
            itineraries_dtos::ItineraryEventsDto,
            itineraries_dtos::TravelStyleDto,
            ApiResponse<itineraries_dtos::ItineraryResponseDto>,
            ApiResponse<Vec<itineraries_dtos::ItineraryResponseDto>>,
            ApiResponse<itineraries_dtos::PendingItineraryDto>,
            ApiResponse<itineraries_dtos::ItineraryEventsDto>,
            ApiResponse<Vec<itineraries_dtos::TravelStyleDto>>,
            // Events
            DestinationSegment,
            events_model::Event,
            events_dto::EventSearchDto,
            events_dto::EventSearchResponseDto,
            ApiResponse<events_dto::EventSearchResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authenticated principal"),
        (name = "itineraries", description = "Itinerary generation, previews and saved trips"),
        (name = "events", description = "Ticketed events along a trip (public)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Wanderplan API",
        version = "0.1.0",
        description = "API documentation for Wanderplan",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
