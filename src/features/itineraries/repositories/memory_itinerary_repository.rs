use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ItineraryRepository;
use crate::core::error::Result;
use crate::features::itineraries::models::{Itinerary, ItineraryUpdate, NewItinerary};

/// Vec-backed repository for route and service tests
#[derive(Default)]
pub struct InMemoryItineraryRepository {
    // Insertion order, oldest first
    rows: RwLock<Vec<Itinerary>>,
}

impl InMemoryItineraryRepository {
    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl ItineraryRepository for InMemoryItineraryRepository {
    async fn insert(&self, new: NewItinerary) -> Result<Itinerary> {
        let now = Utc::now();
        let itinerary = Itinerary {
            id: Uuid::now_v7(),
            user_id: new.user_id,
            destination: new.trip.destination,
            start_date: new.trip.start_date,
            end_date: new.trip.end_date,
            interests: new.trip.interests,
            activities: new.trip.activities,
            food_preferences: new.trip.food_preferences,
            style: new.trip.style,
            prompt: new.prompt,
            generated_plan: new.generated_plan,
            created_at: now,
            updated_at: now,
        };

        self.rows.write().await.push(itinerary.clone());
        Ok(itinerary)
    }

    async fn find_for_user(&self, id: Uuid, user_id: &str) -> Result<Option<Itinerary>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|i| i.id == id && i.user_id == user_id)
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Itinerary>, i64)> {
        let rows = self.rows.read().await;
        let owned: Vec<&Itinerary> = rows.iter().rev().filter(|i| i.user_id == user_id).collect();
        let total = owned.len() as i64;
        let page = owned
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: &str,
        update: ItineraryUpdate,
    ) -> Result<Option<Itinerary>> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows
            .iter_mut()
            .find(|i| i.id == id && i.user_id == user_id)
        else {
            return Ok(None);
        };

        row.destination = update.trip.destination;
        row.start_date = update.trip.start_date;
        row.end_date = update.trip.end_date;
        row.interests = update.trip.interests;
        row.activities = update.trip.activities;
        row.food_preferences = update.trip.food_preferences;
        row.style = update.trip.style;
        row.prompt = update.prompt;
        row.generated_plan = update.generated_plan;
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid, user_id: &str) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|i| !(i.id == id && i.user_id == user_id));
        Ok(rows.len() < before)
    }
}
