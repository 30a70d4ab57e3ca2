use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The user-editable fields of a product, before it has a catalog identity.
///
/// Produced by the CSV importer and by product forms; turned into a
/// [`Product`] by the caller once it has been validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    /// Image URLs in display order. Bare domains (no scheme) are allowed.
    pub images: Vec<String>,
    /// Outbound affiliate link; always carries an `http(s)://` scheme once valid.
    pub affiliate_url: String,
    /// Star rating in `[1, 5]` once valid. `0.0` means the source was unparseable.
    pub rating: f64,
    pub tags: Vec<String>,
    pub category: String,
}

impl ProductDraft {
    /// Attach a catalog identity, producing a [`Product`].
    ///
    /// The importer never generates ids or timestamps; callers pass them in.
    #[must_use]
    pub fn into_product(self, id: Uuid, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            created_at,
            draft: self,
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub draft: ProductDraft,
}

impl Product {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.draft.name
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.draft.category
    }

    /// Returns `true` if the product carries `tag`, compared case-insensitively.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.draft.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Category value that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Catalog search criteria. Every criterion that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name or the description.
    pub query: Option<String>,
    /// Exact category; [`ALL_CATEGORIES`] matches everything.
    pub category: Option<String>,
    /// Tag the product must carry, compared case-insensitively.
    pub tag: Option<String>,
}

impl ProductFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_query(product) && self.matches_category(product) && self.matches_tag(product)
    }

    /// Products that pass the filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    fn matches_query(&self, product: &Product) -> bool {
        let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) else {
            return true;
        };
        let query = query.to_lowercase();
        product.draft.name.to_lowercase().contains(&query)
            || product.draft.description.to_lowercase().contains(&query)
    }

    fn matches_category(&self, product: &Product) -> bool {
        match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => product.category() == category,
        }
    }

    fn matches_tag(&self, product: &Product) -> bool {
        self.tag.as_deref().is_none_or(|tag| product.has_tag(tag))
    }
}
