//! Slider domain model — homepage carousel content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slider {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub link: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlider {
    pub title: String,
    pub image: String,
    pub link: String,
    pub position: i64,
}
