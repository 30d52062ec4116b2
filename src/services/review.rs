// src/services/review.rs

use crate::models::CompetencyRating;
use rust_decimal::Decimal;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Mean competency score to two decimal places, `None` when nothing was rated.
pub fn overall_rating(ratings: &[CompetencyRating]) -> Option<Decimal> {
    if ratings.is_empty() {
        return None;
    }
    let total: Decimal = ratings.iter().map(|r| Decimal::from(r.score)).sum();
    Some((total / Decimal::from(ratings.len())).round_dp(2))
}

/// First rating whose score falls outside the 1–5 scale.
pub fn out_of_range(ratings: &[CompetencyRating]) -> Option<&CompetencyRating> {
    ratings
        .iter()
        .find(|r| !(MIN_SCORE..=MAX_SCORE).contains(&r.score))
}
