use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::itineraries::{handlers, services::ItineraryService};

/// Itinerary routes.
///
/// Authentication is resolved upstream by the auth middleware; handlers that
/// need a user take `AuthenticatedUser`, the rest work anonymously.
pub fn routes(service: Arc<ItineraryService>) -> Router {
    Router::new()
        .route("/api/styles", get(handlers::list_styles))
        .route(
            "/api/itineraries",
            get(handlers::list_itineraries).post(handlers::create_itinerary),
        )
        .route("/api/itineraries/preview", get(handlers::preview_itinerary))
        .route(
            "/api/itineraries/pending/save",
            post(handlers::save_pending_itinerary),
        )
        .route(
            "/api/itineraries/{id}",
            get(handlers::get_itinerary)
                .put(handlers::update_itinerary)
                .delete(handlers::delete_itinerary),
        )
        .route(
            "/api/itineraries/{id}/events",
            get(handlers::get_itinerary_events),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extractor::SESSION_HEADER;
    use crate::core::middleware::auth_middleware;
    use crate::features::auth::JwtValidator;
    use crate::features::destinations::DestinationService;
    use crate::features::events::EventsService;
    use crate::features::itineraries::repositories::InMemoryItineraryRepository;
    use crate::features::itineraries::services::PendingStore;
    use crate::features::planner::PlannerService;
    use crate::modules::openai::TextGenerator;
    use crate::shared::test_helpers::{issue_token, test_auth_config, StubGenerator};
    use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::time::Duration;

    struct Harness {
        server: TestServer,
        generator: Arc<StubGenerator>,
        repository: Arc<InMemoryItineraryRepository>,
    }

    fn harness_with(generator: Option<Arc<StubGenerator>>) -> Harness {
        let stub = generator
            .clone()
            .unwrap_or_else(|| Arc::new(StubGenerator::failing()));
        let repository = Arc::new(InMemoryItineraryRepository::default());
        let destinations = Arc::new(DestinationService::new(None, "gpt-4o-mini".to_string()));

        let service = Arc::new(ItineraryService::new(
            repository.clone(),
            Arc::new(PlannerService::new(
                generator.map(|g| g as Arc<dyn TextGenerator>),
                "gpt-4o-mini".to_string(),
            )),
            Arc::new(EventsService::new(None, destinations, 5)),
            Arc::new(PendingStore::new(Duration::from_secs(3600), 100)),
        ));

        let validator = Arc::new(JwtValidator::new(&test_auth_config()));
        let app = routes(service).layer(axum::middleware::from_fn_with_state(
            validator,
            auth_middleware,
        ));

        Harness {
            server: TestServer::new(app).unwrap(),
            generator: stub,
            repository,
        }
    }

    fn harness(reply: &str) -> Harness {
        harness_with(Some(Arc::new(StubGenerator::replying(reply))))
    }

    fn bearer(sub: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", issue_token(sub))).unwrap()
    }

    fn session_value(id: &str) -> HeaderValue {
        HeaderValue::from_str(id).unwrap()
    }

    fn trip_body(action: &str) -> Value {
        json!({
            "destination": "Chicago, IL, USA for 2 days\nToronto, Canada",
            "start_date": "2025-05-01",
            "end_date": "2025-05-04",
            "interests": "Architecture",
            "activities": "River cruise",
            "food_preferences": "Deep dish",
            "style": "city_shopping",
            "action": action
        })
    }

    async fn create_saved(h: &Harness, sub: &str) -> Value {
        let response = h
            .server
            .post("/api/itineraries")
            .add_header(AUTHORIZATION, bearer(sub))
            .json(&trip_body("save"))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["data"].clone()
    }

    #[tokio::test]
    async fn test_styles_are_listed_with_labels() {
        let h = harness("plan");
        let body: Value = h.server.get("/api/styles").await.json();

        let styles = body["data"].as_array().unwrap();
        assert_eq!(styles.len(), 4);
        assert_eq!(styles[0]["value"], "general");
        assert_eq!(styles[1]["label"], "Culture & History");
    }

    #[tokio::test]
    async fn test_end_before_start_is_rejected() {
        let h = harness("plan");
        let mut body = trip_body("preview");
        body["end_date"] = json!("2025-04-20");

        let response = h.server.post("/api/itineraries").json(&body).await;

        response.assert_status_bad_request();
        assert_eq!(h.generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_anonymous_save_is_refused_without_generating() {
        let h = harness("plan");

        let response = h
            .server
            .post("/api/itineraries")
            .json(&trip_body("save"))
            .await;

        response.assert_status_unauthorized();
        let body: Value = response.json();
        assert_eq!(
            body["message"],
            "Please sign in to save itineraries to your account."
        );
        assert_eq!(h.generator.calls(), 0);
        assert_eq!(h.repository.count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let h = harness("plan");

        let response = h
            .server
            .post("/api/itineraries")
            .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer nonsense"))
            .json(&trip_body("preview"))
            .await;

        response.assert_status_unauthorized();
        assert_eq!(h.generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_save_persists_submitted_fields_and_plan() {
        let h = harness("  Day 1: Millennium Park  ");

        let saved = create_saved(&h, "traveler-1").await;

        assert_eq!(
            saved["destination"],
            "Chicago, IL, USA for 2 days\nToronto, Canada"
        );
        assert_eq!(saved["start_date"], "2025-05-01");
        assert_eq!(saved["end_date"], "2025-05-04");
        assert_eq!(saved["interests"], "Architecture");
        assert_eq!(saved["activities"], "River cruise");
        assert_eq!(saved["food_preferences"], "Deep dish");
        assert_eq!(saved["style"], "city_shopping");
        assert_eq!(saved["style_label"], "City Life & Shopping");
        assert_eq!(saved["generated_plan"], "Day 1: Millennium Park");
        assert!(saved["prompt"]
            .as_str()
            .unwrap()
            .contains("Activities on the wish list: River cruise"));
        assert_eq!(h.repository.count().await, 1);
    }

    #[tokio::test]
    async fn test_preview_then_save_pending() {
        let h = harness("Day 1: Lakefront");

        let response = h
            .server
            .post("/api/itineraries")
            .json(&trip_body("preview"))
            .await;
        response.assert_status_ok();
        let session = response.header(SESSION_HEADER);
        let session = session.to_str().unwrap().to_string();
        assert_eq!(h.repository.count().await, 0);

        let preview = h
            .server
            .get("/api/itineraries/preview")
            .add_header(SESSION_HEADER, session_value(&session))
            .await;
        preview.assert_status_ok();
        let body: Value = preview.json();
        assert_eq!(body["data"]["generated_plan"], "Day 1: Lakefront");
        assert_eq!(body["data"]["style_label"], "City Life & Shopping");

        // Saving the pending itinerary needs a signed-in user
        h.server
            .post("/api/itineraries/pending/save")
            .add_header(SESSION_HEADER, session_value(&session))
            .await
            .assert_status_unauthorized();

        let saved = h
            .server
            .post("/api/itineraries/pending/save")
            .add_header(SESSION_HEADER, session_value(&session))
            .add_header(AUTHORIZATION, bearer("traveler-1"))
            .await;
        saved.assert_status(StatusCode::CREATED);
        let body: Value = saved.json();
        assert_eq!(body["data"]["generated_plan"], "Day 1: Lakefront");
        assert_eq!(h.repository.count().await, 1);
        assert_eq!(h.generator.calls(), 1);

        // The session no longer holds it
        let again = h
            .server
            .post("/api/itineraries/pending/save")
            .add_header(SESSION_HEADER, session_value(&session))
            .add_header(AUTHORIZATION, bearer("traveler-1"))
            .await;
        again.assert_status_not_found();
        let body: Value = again.json();
        assert_eq!(
            body["message"],
            "We couldn't find a pending itinerary to save. Please generate a new one."
        );
    }

    #[tokio::test]
    async fn test_preview_without_pending_is_not_found() {
        let h = harness("plan");

        let response = h.server.get("/api/itineraries/preview").await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["message"], "Generate a new itinerary to see a preview.");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_service_unavailable() {
        let h = harness_with(None);

        let response = h
            .server
            .post("/api/itineraries")
            .json(&trip_body("preview"))
            .await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = response.json();
        assert_eq!(body["message"], "OPENAI_API_KEY is not configured.");
    }

    #[tokio::test]
    async fn test_provider_failure_is_bad_gateway() {
        let h = harness_with(Some(Arc::new(StubGenerator::failing())));

        let response = h
            .server
            .post("/api/itineraries")
            .json(&trip_body("preview"))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_newest_first() {
        let h = harness("plan");
        let first = create_saved(&h, "traveler-1").await;
        let second = create_saved(&h, "traveler-1").await;
        create_saved(&h, "traveler-2").await;

        let response = h
            .server
            .get("/api/itineraries")
            .add_header(AUTHORIZATION, bearer("traveler-1"))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let items = body["data"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], second["id"]);
        assert_eq!(items[1]["id"], first["id"]);
        assert_eq!(body["meta"]["total"], 2);

        h.server
            .get("/api/itineraries")
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_update_without_regeneration_keeps_prompt() {
        let h = harness("Original plan");
        let saved = create_saved(&h, "traveler-1").await;
        let id = saved["id"].as_str().unwrap();

        let response = h
            .server
            .put(&format!("/api/itineraries/{}", id))
            .add_header(AUTHORIZATION, bearer("traveler-1"))
            .json(&json!({
                "destination": "Chicago, IL, USA",
                "start_date": "2025-05-01",
                "end_date": "2025-05-02",
                "style": "general",
                "generated_plan": "Hand-edited plan"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["generated_plan"], "Hand-edited plan");
        assert_eq!(body["data"]["prompt"], saved["prompt"]);
        assert_eq!(body["data"]["destination"], "Chicago, IL, USA");
        assert_eq!(body["data"]["end_date"], "2025-05-02");
        assert_eq!(h.generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_update_without_plan_is_rejected_and_keeps_stored_plan() {
        let h = harness("Real plan");
        let saved = create_saved(&h, "traveler-1").await;
        let path = format!("/api/itineraries/{}", saved["id"].as_str().unwrap());

        let response = h
            .server
            .put(&path)
            .add_header(AUTHORIZATION, bearer("traveler-1"))
            .json(&json!({
                "destination": "Rome",
                "start_date": "2025-05-01",
                "end_date": "2025-05-03"
            }))
            .await;

        response.assert_status_bad_request();

        let stored: Value = h
            .server
            .get(&path)
            .add_header(AUTHORIZATION, bearer("traveler-1"))
            .await
            .json();
        assert_eq!(stored["data"]["generated_plan"], "Real plan");
        assert_eq!(stored["data"]["destination"], saved["destination"]);
    }

    #[tokio::test]
    async fn test_update_with_regeneration_replaces_prompt_and_plan() {
        let h = harness("Fresh plan");
        let saved = create_saved(&h, "traveler-1").await;
        let id = saved["id"].as_str().unwrap();

        let response = h
            .server
            .put(&format!("/api/itineraries/{}", id))
            .add_header(AUTHORIZATION, bearer("traveler-1"))
            .json(&json!({
                "destination": "Montreal, QC, Canada",
                "start_date": "2025-05-01",
                "end_date": "2025-05-04",
                "style": "adventure",
                "generated_plan": "ignored",
                "regenerate_plan": true
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["generated_plan"], "Fresh plan");
        assert_ne!(body["data"]["prompt"], saved["prompt"]);
        assert!(body["data"]["prompt"]
            .as_str()
            .unwrap()
            .contains("Destination: Montreal, QC, Canada"));
        assert_eq!(h.generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_other_users_cannot_see_or_touch_itinerary() {
        let h = harness("plan");
        let saved = create_saved(&h, "owner").await;
        let path = format!("/api/itineraries/{}", saved["id"].as_str().unwrap());

        h.server
            .get(&path)
            .add_header(AUTHORIZATION, bearer("intruder"))
            .await
            .assert_status_not_found();
        h.server
            .delete(&path)
            .add_header(AUTHORIZATION, bearer("intruder"))
            .await
            .assert_status_not_found();
        h.server
            .get(&format!("{}/events", path))
            .add_header(AUTHORIZATION, bearer("intruder"))
            .await
            .assert_status_not_found();

        h.server
            .get(&path)
            .add_header(AUTHORIZATION, bearer("owner"))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_delete_removes_itinerary() {
        let h = harness("plan");
        let saved = create_saved(&h, "owner").await;
        let path = format!("/api/itineraries/{}", saved["id"].as_str().unwrap());

        h.server
            .delete(&path)
            .add_header(AUTHORIZATION, bearer("owner"))
            .await
            .assert_status_ok();

        h.server
            .get(&path)
            .add_header(AUTHORIZATION, bearer("owner"))
            .await
            .assert_status_not_found();
        assert_eq!(h.repository.count().await, 0);
    }

    #[tokio::test]
    async fn test_itinerary_events_without_key_are_empty() {
        let h = harness("plan");
        let saved = create_saved(&h, "owner").await;

        let response = h
            .server
            .get(&format!(
                "/api/itineraries/{}/events",
                saved["id"].as_str().unwrap()
            ))
            .add_header(AUTHORIZATION, bearer("owner"))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["itinerary_id"], saved["id"]);
        assert_eq!(body["data"]["events"], json!([]));
    }
}
