//! schema.org JSON-LD builders
//!
//! Each record is a plain typed struct; nested records are set with their
//! own setters rather than by key path. [`JsonLd`] renders any of them as a
//! JSON-LD document or an HTML `<script>` tag. Several documents can be
//! merged into one `@graph` with [`crate::parser::combine_json_ld`].

mod article;
mod breadcrumb;
mod faq;
mod organization;
mod product;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::parser::SCHEMA_ORG_CONTEXT;

pub use article::{Article, ArticleKind, Person, Publisher};
pub use breadcrumb::{BreadcrumbList, ListItem};
pub use faq::{Answer, FaqPage, Question};
pub use organization::{ContactPoint, Organization, PostalAddress};
pub use product::{AggregateRating, Availability, Brand, Offer, Product};

/// An image reference with optional pixel size
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "ImageObject")]
pub struct ImageObject {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ImageObject {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// A schema.org record that can be published as JSON-LD
pub trait JsonLd: Serialize {
    /// Names of required properties that are still empty
    fn missing_required(&self) -> Vec<&'static str>;

    fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// The record with `@context` set to schema.org
    fn to_json_ld(&self) -> Result<JsonValue> {
        let mut value = serde_json::to_value(self)?;
        if let JsonValue::Object(obj) = &mut value {
            obj.insert(
                "@context".to_string(),
                JsonValue::String(SCHEMA_ORG_CONTEXT.to_string()),
            );
        }
        Ok(value)
    }

    fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json_ld()?)?)
    }

    fn to_script_tag(&self) -> Result<String> {
        script_tag(&self.to_json_ld()?)
    }
}

/// Wrap a JSON-LD document in a `<script type="application/ld+json">` tag.
///
/// `</` is escaped so the payload cannot close the script element early.
pub fn script_tag(document: &JsonValue) -> Result<String> {
    let pretty = serde_json::to_string_pretty(document)?;
    Ok(format!(
        "<script type=\"application/ld+json\">\n{}\n</script>",
        pretty.replace("</", "<\\/")
    ))
}

pub(crate) fn non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{combine_json_ld, extract_json_ld_blocks, schema_types};

    #[test]
    fn script_tags_round_trip() {
        let faq = FaqPage::new().question("What is </script>?", "A closing tag.");
        let tag = faq.to_script_tag().unwrap();
        assert!(!tag.contains("</script>?"));

        let blocks = extract_json_ld_blocks(&format!("<html><head>{tag}</head></html>"));
        assert_eq!(blocks.len(), 1);
        let parsed: JsonValue = serde_json::from_str(&blocks[0]).unwrap();
        assert_eq!(parsed, faq.to_json_ld().unwrap());
        assert_eq!(parsed["mainEntity"][0]["name"], "What is </script>?");
    }

    #[test]
    fn documents_combine_into_a_graph() {
        let product = Product::new("Widget").brand("Acme");
        let crumbs = BreadcrumbList::new().item("Home", "https://example.com/");

        let graph = combine_json_ld(vec![product.to_json_ld().unwrap(), crumbs.to_json_ld().unwrap()])
            .unwrap();
        assert_eq!(graph["@context"], SCHEMA_ORG_CONTEXT);
        assert_eq!(graph["@graph"].as_array().unwrap().len(), 2);
        assert!(graph["@graph"][0].get("@context").is_none());

        let blocks = vec![graph.to_string()];
        assert_eq!(schema_types(&blocks), vec!["BreadcrumbList", "Product"]);
    }

    #[test]
    fn image_object_skips_unknown_size() {
        let image = serde_json::to_value(ImageObject::new("https://example.com/a.png")).unwrap();
        assert_eq!(
            image,
            serde_json::json!({"@type": "ImageObject", "url": "https://example.com/a.png"})
        );
    }
}
