use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::ItineraryRepository;
use crate::core::error::{AppError, Result};
use crate::features::itineraries::models::{Itinerary, ItineraryUpdate, NewItinerary};

const ITINERARY_COLUMNS: &str = r#"
    id, user_id, destination, start_date, end_date, interests, activities,
    food_preferences, style, prompt, generated_plan, created_at, updated_at
"#;

pub struct PgItineraryRepository {
    pool: PgPool,
}

impl PgItineraryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItineraryRepository for PgItineraryRepository {
    async fn insert(&self, new: NewItinerary) -> Result<Itinerary> {
        let sql = format!(
            r#"
            INSERT INTO itineraries (
                id, user_id, destination, start_date, end_date, interests,
                activities, food_preferences, style, prompt, generated_plan
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            ITINERARY_COLUMNS
        );

        let itinerary = sqlx::query_as::<_, Itinerary>(&sql)
            .bind(Uuid::now_v7())
            .bind(&new.user_id)
            .bind(&new.trip.destination)
            .bind(new.trip.start_date)
            .bind(new.trip.end_date)
            .bind(&new.trip.interests)
            .bind(&new.trip.activities)
            .bind(&new.trip.food_preferences)
            .bind(new.trip.style)
            .bind(&new.prompt)
            .bind(&new.generated_plan)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create itinerary: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!(
            "Itinerary created: id={}, user_id={}",
            itinerary.id,
            itinerary.user_id
        );

        Ok(itinerary)
    }

    async fn find_for_user(&self, id: Uuid, user_id: &str) -> Result<Option<Itinerary>> {
        let sql = format!(
            "SELECT {} FROM itineraries WHERE id = $1 AND user_id = $2",
            ITINERARY_COLUMNS
        );

        let itinerary = sqlx::query_as::<_, Itinerary>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(itinerary)
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Itinerary>, i64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM itineraries WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        let sql = format!(
            r#"
            SELECT {}
            FROM itineraries
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
            ITINERARY_COLUMNS
        );

        let itineraries = sqlx::query_as::<_, Itinerary>(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((itineraries, total))
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: &str,
        update: ItineraryUpdate,
    ) -> Result<Option<Itinerary>> {
        let sql = format!(
            r#"
            UPDATE itineraries
            SET destination = $3,
                start_date = $4,
                end_date = $5,
                interests = $6,
                activities = $7,
                food_preferences = $8,
                style = $9,
                prompt = $10,
                generated_plan = $11,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            ITINERARY_COLUMNS
        );

        let itinerary = sqlx::query_as::<_, Itinerary>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(&update.trip.destination)
            .bind(update.trip.start_date)
            .bind(update.trip.end_date)
            .bind(&update.trip.interests)
            .bind(&update.trip.activities)
            .bind(&update.trip.food_preferences)
            .bind(update.trip.style)
            .bind(&update.prompt)
            .bind(&update.generated_plan)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update itinerary {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(itinerary)
    }

    async fn delete(&self, id: Uuid, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM itineraries WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
