pub mod app_config;
pub mod config;
pub mod csv_import;
pub mod error;
pub mod links;
pub mod products;
pub mod reviews;
pub mod validate;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use csv_import::{
    parse_csv, tokenize_line, Column, ParseResult, ParsedRecord, REQUIRED_COLUMNS,
    SAMPLE_CSV_CONTENT, SAMPLE_FILE_NAME,
};
pub use error::{ConfigError, RowError};
pub use links::{go_link, short_id, GoLinks, GoPath};
pub use products::{Product, ProductDraft, ProductFilter, ALL_CATEGORIES};
pub use reviews::{
    average_rating, mark_helpful, reviews_for_product, NewReview, RatingDistribution, Review,
    ReviewError,
};
pub use validate::{validate_product, RecordError};
