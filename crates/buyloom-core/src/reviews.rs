//! Product reviews and their aggregates.
//!
//! Storage is the caller's business; everything here works on slices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const MAX_STARS: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_name: String,
    /// Whole stars, 1 through 5.
    pub rating: u8,
    pub comment: String,
    pub date: DateTime<Utc>,
    /// How many readers marked the review helpful.
    pub helpful: u32,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Please select a rating before submitting your review.")]
    RatingRequired,
    #[error("rating {0} is out of range; must be 1 to 5")]
    RatingOutOfRange(u8),
    #[error("Please enter your name before submitting your review.")]
    NameRequired,
    #[error("Please enter your review before submitting.")]
    CommentRequired,
}

/// A review as submitted, before it is assigned an id and date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub product_id: Uuid,
    pub user_name: String,
    /// `0` means no star was picked.
    pub rating: u8,
    pub comment: String,
    pub verified: bool,
}

impl NewReview {
    /// Validate the submission and stamp it with `id` and `date`.
    ///
    /// Checks run in order and stop at the first failure: rating, name,
    /// comment. Name and comment are stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReviewError`] the submission trips.
    pub fn into_review(self, id: Uuid, date: DateTime<Utc>) -> Result<Review, ReviewError> {
        match self.rating {
            0 => return Err(ReviewError::RatingRequired),
            r if r > MAX_STARS => return Err(ReviewError::RatingOutOfRange(r)),
            _ => {}
        }

        let user_name = self.user_name.trim();
        if user_name.is_empty() {
            return Err(ReviewError::NameRequired);
        }

        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(ReviewError::CommentRequired);
        }

        Ok(Review {
            id,
            product_id: self.product_id,
            user_name: user_name.to_string(),
            rating: self.rating,
            comment: comment.to_string(),
            date,
            helpful: 0,
            verified: self.verified,
        })
    }
}

/// Reviews for one product, newest first.
#[must_use]
pub fn reviews_for_product(reviews: &[Review], product_id: Uuid) -> Vec<&Review> {
    let mut matching: Vec<&Review> = reviews
        .iter()
        .filter(|r| r.product_id == product_id)
        .collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date));
    matching
}

/// Mean star rating rounded to one decimal place; `0.0` with no reviews.
#[must_use]
pub fn average_rating(reviews: &[&Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = f64::from(sum) / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Review counts per star.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatingDistribution {
    counts: [usize; MAX_STARS as usize],
}

impl RatingDistribution {
    /// Tally `reviews` by star. Ratings outside 1..=5 are not counted.
    #[must_use]
    pub fn from_reviews(reviews: &[&Review]) -> Self {
        let mut dist = Self::default();
        for review in reviews {
            if let Some(slot) = usize::from(review.rating)
                .checked_sub(1)
                .and_then(|i| dist.counts.get_mut(i))
            {
                *slot += 1;
            }
        }
        dist
    }

    /// Number of reviews with exactly `stars` stars.
    #[must_use]
    pub fn count(&self, stars: u8) -> usize {
        usize::from(stars)
            .checked_sub(1)
            .and_then(|i| self.counts.get(i))
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Share of reviews with `stars` stars, as a percentage of the total.
    #[must_use]
    pub fn percentage(&self, stars: u8) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = self.count(stars) as f64 / total as f64 * 100.0;
        pct
    }
}

/// Increment the helpful counter of the review with `review_id`.
///
/// Returns `false` if no such review exists.
pub fn mark_helpful(reviews: &mut [Review], review_id: Uuid) -> bool {
    match reviews.iter_mut().find(|r| r.id == review_id) {
        Some(review) => {
            review.helpful = review.helpful.saturating_add(1);
            true
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "reviews_test.rs"]
mod tests;
