// src/handlers/review.rs

use super::{check_list_params, ensure_employee, require_text};
use crate::{
    errors::{AppError, AppResult},
    models::{
        CompetencyRating, CreateReviewRequest, ListParams, PerformanceReview, ReviewPeriod,
        ReviewStatus, UpdateReviewRequest,
    },
    services::review::{MAX_SCORE, MIN_SCORE, out_of_range, overall_rating},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;

fn validate_ratings(ratings: &[CompetencyRating]) -> AppResult<()> {
    if let Some(bad) = out_of_range(ratings) {
        return Err(AppError::Validation(format!(
            "score for '{}' must be between {} and {}, got {}",
            bad.competency, MIN_SCORE, MAX_SCORE, bad.score
        )));
    }
    Ok(())
}

fn validate_period(period: &ReviewPeriod) -> AppResult<()> {
    if period.end < period.start {
        return Err(AppError::Validation(
            "period.end cannot be before period.start".to_string(),
        ));
    }
    Ok(())
}

/// Start a performance review
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = PerformanceReview),
        (status = 400, description = "Invalid period or scores"),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Performance Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    Json(body): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<PerformanceReview>)> {
    require_text("reviewer_id", Some(&body.reviewer_id))?;
    validate_period(&body.period)?;
    validate_ratings(&body.ratings)?;
    ensure_employee(&state, &body.employee_id).await?;

    let now = Utc::now();
    let review = state
        .repo::<PerformanceReview>()
        .create(&PerformanceReview {
            id: String::new(),
            employee_id: body.employee_id,
            reviewer_id: body.reviewer_id,
            period: body.period,
            overall_rating: overall_rating(&body.ratings),
            ratings: body.ratings,
            comments: body.comments,
            goals: body.goals,
            status: ReviewStatus::Draft,
            created_at: Some(now),
            updated_at: Some(now),
        })
        .await?;

    info!(
        "Created review {} for employee {}",
        review.id, review.employee_id
    );
    Ok((StatusCode::CREATED, Json(review)))
}

/// List performance reviews, optionally for one employee
#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    params(ListParams),
    responses(
        (status = 200, description = "Reviews", body = Vec<PerformanceReview>),
        (status = 400, description = "Invalid sort field"),
    ),
    tag = "Performance Reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<PerformanceReview>>> {
    check_list_params(&params)?;
    Ok(Json(
        state
            .repo::<PerformanceReview>()
            .list(&params.to_query())
            .await?,
    ))
}

/// Get a single performance review
#[utoipa::path(
    get,
    path = "/api/v1/reviews/{review_id}",
    params(("review_id" = String, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review", body = PerformanceReview),
        (status = 404, description = "Review not found"),
    ),
    tag = "Performance Reviews"
)]
pub async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> AppResult<Json<PerformanceReview>> {
    let review = state
        .repo::<PerformanceReview>()
        .get(&review_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review {} not found", review_id)))?;
    Ok(Json(review))
}

/// Update ratings, comments, goals or status; the overall rating follows the scores
#[utoipa::path(
    patch,
    path = "/api/v1/reviews/{review_id}",
    request_body = UpdateReviewRequest,
    params(("review_id" = String, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review updated", body = PerformanceReview),
        (status = 400, description = "Score out of range"),
        (status = 404, description = "Review not found"),
    ),
    tag = "Performance Reviews"
)]
pub async fn update_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    Json(body): Json<UpdateReviewRequest>,
) -> AppResult<Json<PerformanceReview>> {
    let repo = state.repo::<PerformanceReview>();
    let mut review = repo
        .get(&review_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review {} not found", review_id)))?;

    if let Some(ratings) = body.ratings {
        validate_ratings(&ratings)?;
        review.overall_rating = overall_rating(&ratings);
        review.ratings = ratings;
    }
    if body.comments.is_some() {
        review.comments = body.comments;
    }
    if let Some(goals) = body.goals {
        review.goals = goals;
    }
    if let Some(status) = body.status {
        review.status = status;
    }
    review.updated_at = Some(Utc::now());

    Ok(Json(repo.update(&review_id, &review).await?))
}

/// Delete a performance review
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{review_id}",
    params(("review_id" = String, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 404, description = "Review not found"),
    ),
    tag = "Performance Reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.repo::<PerformanceReview>().delete(&review_id).await? {
        return Err(AppError::NotFound(format!("Review {} not found", review_id)));
    }
    Ok(Json(serde_json::json!({ "message": "Review deleted successfully" })))
}
