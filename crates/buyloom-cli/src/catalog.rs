//! JSON-file catalog store.

use std::path::{Path, PathBuf};

use anyhow::Context;
use buyloom_core::{
    go_link, validate_product, AppConfig, GoLinks, GoPath, Product, ProductDraft, ProductFilter,
};
use uuid::Uuid;

/// The product catalog, kept as one JSON array on disk.
///
/// A missing file is an empty catalog. Writes replace the whole file.
#[derive(Debug, Clone)]
pub(crate) struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn load(&self) -> anyhow::Result<Vec<Product>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read catalog {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("catalog {} is not valid JSON", self.path.display()))
    }

    /// Append `products` and persist. Returns the new catalog size.
    pub(crate) fn append(&self, products: Vec<Product>) -> anyhow::Result<usize> {
        let mut all = self.load()?;
        all.extend(products);
        self.save(&all)?;
        Ok(all.len())
    }

    pub(crate) fn get(&self, id: Uuid) -> anyhow::Result<Option<Product>> {
        Ok(self.load()?.into_iter().find(|p| p.id == id))
    }

    /// Replace the entry with the same id. Returns `false` if there is none.
    pub(crate) fn update(&self, product: Product) -> anyhow::Result<bool> {
        let mut all = self.load()?;
        let Some(slot) = all.iter_mut().find(|p| p.id == product.id) else {
            return Ok(false);
        };
        *slot = product;
        self.save(&all)?;
        Ok(true)
    }

    /// Delete the entry with `id`, returning it if it existed.
    pub(crate) fn remove(&self, id: Uuid) -> anyhow::Result<Option<Product>> {
        let mut all = self.load()?;
        let Some(index) = all.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let removed = all.remove(index);
        self.save(&all)?;
        Ok(Some(removed))
    }

    fn save(&self, products: &[Product]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(products)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write catalog {}", self.path.display()))
    }
}

/// Field changes for `catalog update`. Unset fields are left alone.
#[derive(Debug, Default, clap::Args)]
pub(crate) struct ProductEdits {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub affiliate_url: Option<String>,

    #[arg(long)]
    pub rating: Option<f64>,

    #[arg(long)]
    pub category: Option<String>,

    /// Comma-separated; replaces the existing tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    /// Comma-separated; replaces the existing images
    #[arg(long, value_delimiter = ',')]
    pub images: Option<Vec<String>>,
}

impl ProductEdits {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.affiliate_url.is_none()
            && self.rating.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.images.is_none()
    }

    fn apply(self, draft: &mut ProductDraft) {
        let trimmed = |value: String| value.trim().to_string();
        let list = |items: Vec<String>| {
            items
                .into_iter()
                .map(trimmed)
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>()
        };

        if let Some(name) = self.name {
            draft.name = trimmed(name);
        }
        if let Some(description) = self.description {
            draft.description = trimmed(description);
        }
        if let Some(url) = self.affiliate_url {
            draft.affiliate_url = trimmed(url);
        }
        if let Some(rating) = self.rating {
            draft.rating = rating;
        }
        if let Some(category) = self.category {
            draft.category = trimmed(category);
        }
        if let Some(tags) = self.tags {
            draft.tags = list(tags);
        }
        if let Some(images) = self.images {
            draft.images = list(images);
        }
    }
}

/// Apply `edits` to the product with `id`, validate the result, and save it.
///
/// The stored entry is untouched when validation fails.
pub(crate) fn edit_product(
    catalog: &JsonCatalog,
    id: Uuid,
    edits: ProductEdits,
) -> anyhow::Result<Product> {
    if edits.is_empty() {
        anyhow::bail!("nothing to update; pass at least one field flag");
    }

    let mut product = catalog
        .get(id)?
        .with_context(|| format!("no product with id {id}"))?;
    edits.apply(&mut product.draft);

    let errors = validate_product(&product.draft);
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("product {id} not updated: {}", messages.join("; "));
    }

    catalog.update(product.clone())?;
    Ok(product)
}

/// Print matching catalog entries, one per line.
pub(crate) fn run_list(config: &AppConfig, filter: &ProductFilter) -> anyhow::Result<()> {
    let catalog = JsonCatalog::new(&config.catalog_path);
    let all = catalog.load()?;

    if all.is_empty() {
        println!("catalog {} is empty", catalog.path().display());
        return Ok(());
    }

    let products = filter.apply(&all);
    if products.is_empty() {
        println!("no products match");
        return Ok(());
    }

    for product in &products {
        println!(
            "{}  {:<40}  {:<20}  {:.1}",
            product.id,
            product.name(),
            product.category(),
            product.draft.rating
        );
    }
    println!("{} of {} products", products.len(), all.len());
    Ok(())
}

pub(crate) fn run_show(config: &AppConfig, id: Uuid) -> anyhow::Result<()> {
    let catalog = JsonCatalog::new(&config.catalog_path);
    let product = catalog
        .get(id)?
        .with_context(|| format!("no product with id {id}"))?;
    print!("{}", render_product(&product));
    Ok(())
}

pub(crate) fn run_update(config: &AppConfig, id: Uuid, edits: ProductEdits) -> anyhow::Result<()> {
    let catalog = JsonCatalog::new(&config.catalog_path);
    let product = edit_product(&catalog, id, edits)?;
    tracing::info!(%id, "catalog entry updated");
    print!("{}", render_product(&product));
    Ok(())
}

pub(crate) fn run_remove(config: &AppConfig, id: Uuid) -> anyhow::Result<()> {
    let catalog = JsonCatalog::new(&config.catalog_path);
    let removed = catalog
        .remove(id)?
        .with_context(|| format!("no product with id {id}"))?;
    tracing::info!(%id, name = removed.name(), "catalog entry removed");
    println!("removed {} ({})", removed.name(), removed.id);
    Ok(())
}

/// Print the affiliate URL a go-link path points at.
pub(crate) fn run_resolve(config: &AppConfig, path: &str) -> anyhow::Result<()> {
    let go = GoPath::parse(path).with_context(|| format!("{path} is not a /go/ link"))?;
    let products = JsonCatalog::new(&config.catalog_path).load()?;
    let url = GoLinks::from_products(&products)
        .resolve(go.short_id)
        .map(str::to_string)
        .with_context(|| format!("no affiliate link for {}", go.short_id))?;
    println!("{url}");
    Ok(())
}

fn render_product(product: &Product) -> String {
    use std::fmt::Write as _;

    let draft = &product.draft;
    let mut out = String::new();
    let _ = writeln!(out, "id:          {}", product.id);
    let _ = writeln!(out, "name:        {}", draft.name);
    let _ = writeln!(out, "category:    {}", draft.category);
    let _ = writeln!(out, "rating:      {:.1}", draft.rating);
    let _ = writeln!(out, "tags:        {}", draft.tags.join(", "));
    let _ = writeln!(out, "images:      {}", draft.images.join(", "));
    let _ = writeln!(out, "affiliate:   {}", draft.affiliate_url);
    if let Some(link) = go_link(product.id, &draft.affiliate_url) {
        let _ = writeln!(out, "go link:     {link}");
    }
    let _ = writeln!(out, "created:     {}", product.created_at.to_rfc3339());
    let _ = writeln!(out, "description: {}", draft.description);
    out
}
