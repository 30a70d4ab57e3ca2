//! Affiliate go-links.
//!
//! Outbound affiliate URLs are never shown directly. Each URL gets a short id
//! derived from a 32-bit rolling hash of its UTF-16 code units, and the
//! storefront links to `/go/<short-id>?pid=<product-id>`. [`GoLinks`] maps
//! short ids back to the URL they were derived from.

use std::collections::HashMap;

use uuid::Uuid;

use crate::products::Product;

/// Path prefix of every go-link.
pub const GO_PREFIX: &str = "/go/";

/// Short ids are cut to at most this many characters.
pub const SHORT_ID_LEN: usize = 8;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Short id for `url`: `abs(hash)` in lower-case base 36, first
/// [`SHORT_ID_LEN`] characters. Empty for an empty URL.
///
/// The hash is `hash * 31 + unit` over the UTF-16 code units of `url`,
/// wrapping at 32 bits, so ids match those issued by the web storefront.
#[must_use]
pub fn short_id(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    let hash = url.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });

    let mut id = to_base36(hash.unsigned_abs());
    id.truncate(SHORT_ID_LEN);
    id
}

/// Go-link path for a product, or `None` when it has no affiliate URL.
#[must_use]
pub fn go_link(product_id: Uuid, affiliate_url: &str) -> Option<String> {
    if affiliate_url.is_empty() {
        return None;
    }
    Some(format!("{GO_PREFIX}{}?pid={product_id}", short_id(affiliate_url)))
}

fn to_base36(mut value: u32) -> String {
    let mut digits = Vec::new();
    loop {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().map(|&b| char::from(b)).collect()
}

/// The parts of a go-link path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoPath<'a> {
    pub short_id: &'a str,
    /// Raw `pid` query value, if present.
    pub product_id: Option<&'a str>,
}

impl<'a> GoPath<'a> {
    /// Split `/go/<short-id>?pid=<product-id>`. Returns `None` when the path
    /// does not start with [`GO_PREFIX`] or the short id is empty.
    #[must_use]
    pub fn parse(path: &'a str) -> Option<Self> {
        let rest = path.strip_prefix(GO_PREFIX)?;
        let (short_id, query) = rest.split_once('?').unwrap_or((rest, ""));
        let short_id = short_id.trim_end_matches('/');
        if short_id.is_empty() {
            return None;
        }

        let product_id = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find_map(|(key, value)| (key == "pid").then_some(value));

        Some(Self {
            short_id,
            product_id,
        })
    }
}

/// Short id → affiliate URL table. A later URL with a colliding id replaces
/// the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoLinks {
    links: HashMap<String, String>,
}

impl GoLinks {
    /// Register every catalog product that has an affiliate URL.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        let mut links = Self::default();
        for product in products {
            links.register(&product.draft.affiliate_url);
        }
        links
    }

    /// Store `url` under its short id and return the id. Empty URLs are not
    /// stored.
    pub fn register(&mut self, url: &str) -> Option<String> {
        if url.is_empty() {
            return None;
        }
        let id = short_id(url);
        self.links.insert(id.clone(), url.to_string());
        Some(id)
    }

    #[must_use]
    pub fn resolve(&self, short_id: &str) -> Option<&str> {
        self.links.get(short_id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::products::ProductDraft;

    #[test]
    fn short_id_matches_storefront_values() {
        assert_eq!(short_id("https://amazon.com/x"), "gfjcy7");
        assert_eq!(short_id("https://amazon.com/example-earbuds"), "laaoq4");
        assert_eq!(
            short_id("https://www.amazon.com/dp/B08N5WRWNW?tag=buyloom-20&linkCode=ogi"),
            "xhi74"
        );
    }

    #[test]
    fn short_id_hashes_utf16_code_units() {
        assert_eq!(short_id("é"), "6h");
        // One astral character is two code units (a surrogate pair).
        assert_eq!(short_id("😀"), "11zz7");
    }

    #[test]
    fn short_id_of_empty_url_is_empty() {
        assert_eq!(short_id(""), "");
    }

    #[test]
    fn short_id_is_stable_and_bounded() {
        let url = format!("https://example.com/{}", "a".repeat(500));
        assert_eq!(short_id(&url), short_id(&url));
        assert!(short_id(&url).len() <= SHORT_ID_LEN);
    }

    #[test]
    fn base36_covers_zero_and_the_largest_magnitude() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(i32::MIN.unsigned_abs()), "zik0zk");
    }

    #[test]
    fn go_link_has_short_id_and_product_id() {
        let pid = Uuid::nil();
        assert_eq!(
            go_link(pid, "https://amazon.com/x").as_deref(),
            Some("/go/gfjcy7?pid=00000000-0000-0000-0000-000000000000")
        );
        assert_eq!(go_link(pid, ""), None);
    }

    #[test]
    fn go_path_parses_its_own_links() {
        let pid = Uuid::new_v4();
        let link = go_link(pid, "https://amazon.com/x").unwrap();
        let path = GoPath::parse(&link).unwrap();
        assert_eq!(path.short_id, "gfjcy7");
        assert_eq!(path.product_id, Some(pid.to_string().as_str()));
    }

    #[test]
    fn go_path_edge_cases() {
        assert_eq!(
            GoPath::parse("/go/abc"),
            Some(GoPath {
                short_id: "abc",
                product_id: None
            })
        );
        assert_eq!(
            GoPath::parse("/go/abc?ref=x&pid=42").and_then(|p| p.product_id),
            Some("42")
        );
        assert_eq!(GoPath::parse("/go/"), None);
        assert_eq!(GoPath::parse("/go/?pid=1"), None);
        assert_eq!(GoPath::parse("/products/abc"), None);
    }

    #[test]
    fn go_links_resolve_registered_urls() {
        let draft = ProductDraft {
            affiliate_url: "https://amazon.com/x".to_string(),
            ..ProductDraft::default()
        };
        let no_link = ProductDraft::default();
        let products = vec![
            draft.into_product(Uuid::new_v4(), Utc::now()),
            no_link.into_product(Uuid::new_v4(), Utc::now()),
        ];

        let links = GoLinks::from_products(&products);
        assert_eq!(links.len(), 1);
        assert_eq!(links.resolve("gfjcy7"), Some("https://amazon.com/x"));
        assert_eq!(links.resolve("missing"), None);
    }

    #[test]
    fn register_skips_empty_urls() {
        let mut links = GoLinks::default();
        assert_eq!(links.register(""), None);
        assert!(links.is_empty());
        assert_eq!(links.register("https://amazon.com/x").as_deref(), Some("gfjcy7"));
    }
}
