/// Suggested file name for the downloadable template.
pub const SAMPLE_FILE_NAME: &str = "buyloom-products-sample.csv";

/// A ready-to-edit import file with the canonical header and three products.
///
/// Multi-value cells are quoted so their inner commas survive tokenizing.
pub const SAMPLE_CSV_CONTENT: &str = r#"name,description,images,affiliateUrl,rating,tags,category
"Wireless Bluetooth Earbuds","High-quality wireless earbuds with noise cancellation and long battery life","https://example.com/image1.jpg,https://example.com/image2.jpg","https://amazon.com/example-earbuds",4.5,"Hot,New","Electronics"
"Yoga Mat Premium","Non-slip yoga mat perfect for all types of yoga and exercise","https://example.com/yoga-mat.jpg","https://amazon.com/example-yoga-mat",4.7,"Top","Health & Fitness"
"Coffee Maker Deluxe","Programmable coffee maker with built-in grinder and thermal carafe","https://example.com/coffee-maker1.jpg,https://example.com/coffee-maker2.jpg","https://amazon.com/example-coffee-maker",4.3,"New","Home & Garden"
"#;
