use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

// Service pages compiled into the binary
const EMBEDDED_CATALOG: &str = include_str!("../content/services.toml");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate service slug: {0}")]
    DuplicateSlug(String),

    #[error("catalog has no services")]
    Empty,
}

// One block of a service page
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum Section {
    Paragraph { paragraph: String },
    List { heading: String, bullets: Vec<String> },
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ServiceEntry {
    pub slug: String,
    pub title: String,
    pub intro: String,
    pub hero_img: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    // may contain inline markup
    pub cta: String,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(rename = "service")]
    services: Vec<ServiceEntry>,
}

// Read-only service pages, in menu order
pub struct Catalog {
    services: Vec<ServiceEntry>,
    by_slug: HashMap<String, usize>,
}

impl Catalog {
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_toml(EMBEDDED_CATALOG)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        if file.services.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_slug = HashMap::with_capacity(file.services.len());
        for (idx, service) in file.services.iter().enumerate() {
            if by_slug.insert(service.slug.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateSlug(service.slug.clone()));
            }
        }

        Ok(Self {
            services: file.services,
            by_slug,
        })
    }

    pub fn get(&self, slug: &str) -> Option<&ServiceEntry> {
        self.by_slug.get(slug).map(|&idx| &self.services[idx])
    }

    pub fn services(&self) -> &[ServiceEntry] {
        &self.services
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_loads_in_order() {
        let catalog = Catalog::embedded().unwrap();
        let slugs: Vec<&str> = catalog.services().iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(
            slugs,
            ["tax-refund", "audit", "bookkeeping", "biz-loans", "open-files", "mortgage"]
        );
    }

    #[test]
    fn lookup_by_slug() {
        let catalog = Catalog::embedded().unwrap();
        let page = catalog.get("mortgage").unwrap();
        assert_eq!(page.hero_img, "yeaots-meshkanta.png");
        assert!(matches!(page.sections[0], Section::Paragraph { .. }));
        assert!(matches!(page.sections.last(), Some(Section::List { bullets, .. }) if !bullets.is_empty()));
        assert!(catalog.get("unknown").is_none());
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let toml = r#"
            [[service]]
            slug = "a"
            title = "A"
            intro = ""
            hero_img = "a.png"
            cta = ""

            [[service]]
            slug = "a"
            title = "A again"
            intro = ""
            hero_img = "a.png"
            cta = ""
        "#;
        assert!(matches!(Catalog::from_toml(toml), Err(CatalogError::DuplicateSlug(s)) if s == "a"));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(Catalog::from_toml("service = []"), Err(CatalogError::Empty)));
    }
}
