// src/models/review.rs

use crate::store::{Entity, timestamp::calendar_date};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewPeriod {
    #[serde(deserialize_with = "calendar_date")]
    pub start: NaiveDate,
    #[serde(deserialize_with = "calendar_date")]
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompetencyRating {
    pub competency: String,
    /// 1 (poor) to 5 (outstanding)
    pub score: u8,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Draft,
    Submitted,
    Acknowledged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PerformanceReview {
    #[serde(default)]
    pub id: String,
    pub employee_id: String,
    pub reviewer_id: String,
    pub period: ReviewPeriod,
    #[serde(default)]
    pub ratings: Vec<CompetencyRating>,
    pub overall_rating: Option<Decimal>,
    pub comments: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub status: ReviewStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for PerformanceReview {
    const COLLECTION: &'static str = "performance_reviews";
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub employee_id: String,
    pub reviewer_id: String,
    pub period: ReviewPeriod,
    #[serde(default)]
    pub ratings: Vec<CompetencyRating>,
    pub comments: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    pub ratings: Option<Vec<CompetencyRating>>,
    pub comments: Option<String>,
    pub goals: Option<Vec<String>>,
    pub status: Option<ReviewStatus>,
}
