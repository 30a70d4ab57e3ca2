//! Business rules for product fields.
//!
//! Every field is checked independently, so one record can collect several
//! errors. Within a single field only the first failing check is reported.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::error::RowError;
use crate::products::ProductDraft;

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 5.0;

/// Loose URL shape for images: scheme optional, a dotted domain ending in a
/// 2–6 character top-level segment, then an optional path.
static IMAGE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/0-9A-Za-z_ .-]*)*/?$")
        .expect("valid image url regex")
});

/// Affiliate links must carry an explicit scheme.
static AFFILIATE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+").expect("valid affiliate url regex"));

/// A single human-readable problem with a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Product name is required")]
    NameRequired,
    #[error("Product name must be at least 3 characters")]
    NameTooShort,
    #[error("Product name must be less than 100 characters")]
    NameTooLong,

    #[error("Description is required")]
    DescriptionRequired,
    #[error("Description must be at least 10 characters")]
    DescriptionTooShort,
    #[error("Description must be less than 1000 characters")]
    DescriptionTooLong,

    #[error("At least one image URL is required")]
    ImagesRequired,
    #[error("Invalid image URLs: {}", .0.join(", "))]
    InvalidImageUrls(Vec<String>),

    #[error("Affiliate URL is required")]
    AffiliateUrlRequired,
    #[error("Affiliate URL must start with http:// or https://")]
    AffiliateUrlScheme,

    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,

    #[error("Category is required")]
    CategoryRequired,

    /// The row could not be turned into a record at all.
    #[error("Row {row}: {source}")]
    Malformed {
        row: usize,
        #[source]
        source: RowError,
    },
}

impl Serialize for RecordError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Check a draft against every rule and return the failures in rule order:
/// name, description, images, affiliate URL, rating, category.
///
/// An empty result means the draft is valid.
#[must_use]
pub fn validate_product(draft: &ProductDraft) -> Vec<RecordError> {
    let mut errors = Vec::new();

    errors.extend(check_name(&draft.name));
    errors.extend(check_description(&draft.description));
    errors.extend(check_images(&draft.images));
    errors.extend(check_affiliate_url(&draft.affiliate_url));
    errors.extend(check_rating(draft.rating));
    if draft.category.trim().is_empty() {
        errors.push(RecordError::CategoryRequired);
    }

    errors
}

fn check_name(name: &str) -> Option<RecordError> {
    let name = name.trim();
    let len = name.chars().count();
    if name.is_empty() {
        Some(RecordError::NameRequired)
    } else if len < NAME_MIN_CHARS {
        Some(RecordError::NameTooShort)
    } else if len > NAME_MAX_CHARS {
        Some(RecordError::NameTooLong)
    } else {
        None
    }
}

fn check_description(description: &str) -> Option<RecordError> {
    let description = description.trim();
    let len = description.chars().count();
    if description.is_empty() {
        Some(RecordError::DescriptionRequired)
    } else if len < DESCRIPTION_MIN_CHARS {
        Some(RecordError::DescriptionTooShort)
    } else if len > DESCRIPTION_MAX_CHARS {
        Some(RecordError::DescriptionTooLong)
    } else {
        None
    }
}

fn check_images(images: &[String]) -> Option<RecordError> {
    let present: Vec<&str> = images
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .collect();
    if present.is_empty() {
        return Some(RecordError::ImagesRequired);
    }

    let invalid: Vec<String> = present
        .into_iter()
        .filter(|url| !is_image_url(url))
        .map(str::to_string)
        .collect();
    if invalid.is_empty() {
        None
    } else {
        Some(RecordError::InvalidImageUrls(invalid))
    }
}

fn check_affiliate_url(url: &str) -> Option<RecordError> {
    if url.is_empty() {
        Some(RecordError::AffiliateUrlRequired)
    } else if !AFFILIATE_URL_RE.is_match(url) {
        Some(RecordError::AffiliateUrlScheme)
    } else {
        None
    }
}

fn check_rating(rating: f64) -> Option<RecordError> {
    // NaN fails the inclusive range test as well.
    if (RATING_MIN..=RATING_MAX).contains(&rating) {
        None
    } else {
        Some(RecordError::RatingOutOfRange)
    }
}

/// Returns `true` if `url` has the loose shape accepted for product images.
#[must_use]
pub fn is_image_url(url: &str) -> bool {
    IMAGE_URL_RE.is_match(url)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
