//! SurrealDB implementation of [`SliderRepository`].

use chrono::{DateTime, Utc};
use pulse_core::error::PulseResult;
use pulse_core::models::slider::{CreateSlider, Slider};
use pulse_core::repository::SliderRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error;

#[derive(Debug, SurrealValue)]
struct SliderRow {
    title: String,
    image: String,
    link: String,
    position: i64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct SliderRowWithId {
    record_id: String,
    title: String,
    image: String,
    link: String,
    position: i64,
    created_at: DateTime<Utc>,
}

/// SurrealDB implementation of the Slider repository.
#[derive(Clone)]
pub struct SurrealSliderRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSliderRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SliderRepository for SurrealSliderRepository<C> {
    async fn create(&self, input: CreateSlider) -> PulseResult<Slider> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('slider', $id) SET \
                 title = $title, \
                 image = $image, \
                 link = $link, \
                 position = $position",
            )
            .bind(("id", id_str.clone()))
            .bind(("title", input.title))
            .bind(("image", input.image))
            .bind(("link", input.link))
            .bind(("position", input.position))
            .await
            .map_err(error::storage)?;

        let mut result = result
            .check()
            .map_err(error::storage)?;

        let rows: Vec<SliderRow> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("slider", id_str))?;

        Ok(Slider {
            id,
            title: row.title,
            image: row.image,
            link: row.link,
            position: row.position,
            created_at: row.created_at,
        })
    }

    async fn list(&self) -> PulseResult<Vec<Slider>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM slider \
                 ORDER BY position ASC",
            )
            .await
            .map_err(error::storage)?;

        let rows: Vec<SliderRowWithId> = result.take(0).map_err(error::storage)?;

        rows.into_iter()
            .map(|row| {
                let id = Uuid::parse_str(&row.record_id)
                    .map_err(|e| error::corrupt(format!("invalid record id: {e}")))?;
                Ok(Slider {
                    id,
                    title: row.title,
                    image: row.image,
                    link: row.link,
                    position: row.position,
                    created_at: row.created_at,
                })
            })
            .collect()
    }
}
