use serde::{Deserialize, Serialize};

/// A recognized import column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Name,
    Description,
    Images,
    AffiliateUrl,
    Rating,
    Tags,
    Category,
}

/// Every column a header row must declare, in canonical order.
pub const REQUIRED_COLUMNS: [Column; 7] = [
    Column::Name,
    Column::Description,
    Column::Images,
    Column::AffiliateUrl,
    Column::Rating,
    Column::Tags,
    Column::Category,
];

impl Column {
    /// Resolve a header cell, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for columns the importer does not know about.
    #[must_use]
    pub fn from_header(cell: &str) -> Option<Self> {
        match cell.trim().to_lowercase().as_str() {
            "name" => Some(Column::Name),
            "description" => Some(Column::Description),
            "images" => Some(Column::Images),
            "affiliateurl" => Some(Column::AffiliateUrl),
            "rating" => Some(Column::Rating),
            "tags" => Some(Column::Tags),
            "category" => Some(Column::Category),
            _ => None,
        }
    }

    /// The canonical header spelling, as written by the sample template.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Description => "description",
            Column::Images => "images",
            Column::AffiliateUrl => "affiliateUrl",
            Column::Rating => "rating",
            Column::Tags => "tags",
            Column::Category => "category",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve each header cell to its column, keeping positions.
///
/// Unknown cells map to `None` so data cells at those positions are skipped.
#[must_use]
pub fn resolve_header(cells: &[String]) -> Vec<Option<Column>> {
    cells.iter().map(|cell| Column::from_header(cell)).collect()
}

/// Required columns absent from `header`, in canonical order.
#[must_use]
pub fn missing_columns(header: &[Option<Column>]) -> Vec<Column> {
    REQUIRED_COLUMNS
        .into_iter()
        .filter(|required| !header.contains(&Some(*required)))
        .collect()
}

/// The single fatal message naming every missing column.
#[must_use]
pub fn missing_columns_message(missing: &[Column]) -> String {
    let names: Vec<&str> = missing.iter().map(|c| c.as_str()).collect();
    format!("Missing required columns: {}", names.join(", "))
}
