//! HTML parsing helpers and JSON-LD block handling

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value as JsonValue;

/// Default JSON-LD context
pub const SCHEMA_ORG_CONTEXT: &str = "https://schema.org";

static SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("invalid script selector"));
static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("invalid body selector"));

/// Elements whose text is never rendered
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Parse an HTML document
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// `<script>` elements typed as JSON-LD, whatever their content
fn json_ld_scripts(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.select(&SCRIPT_SELECTOR).filter(|element| {
        // contains() also catches "application/ld+json; charset=utf-8"
        element
            .value()
            .attr("type")
            .is_some_and(|t| t.trim().to_ascii_lowercase().contains("ld+json"))
    })
}

/// Number of JSON-LD script tags, empty ones included
pub fn json_ld_script_count(document: &Html) -> usize {
    json_ld_scripts(document).count()
}

/// JSON-LD script blocks of a parsed document, trimmed, empty blocks skipped
pub fn json_ld_blocks(document: &Html) -> Vec<String> {
    json_ld_scripts(document)
        .filter_map(|element| {
            let text = element.text().collect::<String>().trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .collect()
}

/// Extract JSON-LD script blocks from HTML
pub fn extract_json_ld_blocks(html: &str) -> Vec<String> {
    json_ld_blocks(&parse_document(html))
}

/// Short `@type` names declared by the blocks, sorted and deduplicated.
///
/// Blocks that are not valid JSON are skipped.
pub fn schema_types(blocks: &[String]) -> Vec<String> {
    let mut types = Vec::new();
    for block in blocks {
        let Ok(parsed) = serde_json::from_str::<JsonValue>(block) else {
            continue;
        };
        collect_types(&parsed, &mut types);
    }
    types.sort();
    types.dedup();
    types
}

fn collect_types(value: &JsonValue, out: &mut Vec<String>) {
    match value {
        JsonValue::Array(items) => items.iter().for_each(|item| collect_types(item, out)),
        JsonValue::Object(obj) => {
            match obj.get("@type") {
                Some(JsonValue::String(s)) => out.push(shorten_iri(s).to_string()),
                Some(JsonValue::Array(arr)) => out.extend(
                    arr.iter()
                        .filter_map(JsonValue::as_str)
                        .map(|s| shorten_iri(s).to_string()),
                ),
                _ => {}
            }
            if let Some(graph) = obj.get("@graph") {
                collect_types(graph, out);
            }
        }
        _ => {}
    }
}

fn shorten_iri(iri: &str) -> &str {
    iri.rsplit(['/', '#']).next().unwrap_or(iri)
}

/// Combine several JSON-LD documents into one `@graph` document.
///
/// Uses the `@context` of the first document that has one, or schema.org.
/// A single object document is returned unchanged apart from a default
/// `@context` when it had none.
pub fn combine_json_ld(mut documents: Vec<JsonValue>) -> Result<JsonValue> {
    if documents.len() == 1
        && let Some(JsonValue::Object(obj)) = documents.first_mut()
    {
        obj.entry("@context")
            .or_insert_with(|| JsonValue::String(SCHEMA_ORG_CONTEXT.to_string()));
        return Ok(documents.remove(0));
    }

    let mut graph_items = Vec::new();
    let mut common_context = None;

    for document in documents {
        if common_context.is_none()
            && let Some(ctx) = document.get("@context")
        {
            common_context = Some(ctx.clone());
        }

        match document {
            JsonValue::Object(mut obj) => {
                obj.remove("@context");
                graph_items.push(JsonValue::Object(obj));
            }
            JsonValue::Array(arr) => {
                for item in arr {
                    match item {
                        JsonValue::Object(mut obj) => {
                            obj.remove("@context");
                            graph_items.push(JsonValue::Object(obj));
                        }
                        other => graph_items.push(other),
                    }
                }
            }
            other => {
                return Err(anyhow::anyhow!(
                    "Invalid JSON-LD: top level must be an object or array, got {:?}",
                    other
                ));
            }
        }
    }

    let context =
        common_context.unwrap_or_else(|| JsonValue::String(SCHEMA_ORG_CONTEXT.to_string()));

    Ok(serde_json::json!({
        "@context": context,
        "@graph": graph_items
    }))
}

/// Parse raw JSON-LD blocks and combine them with [`combine_json_ld`]
pub fn combine_json_ld_blocks(blocks: &[String]) -> Result<JsonValue> {
    let documents = blocks
        .iter()
        .map(|block| {
            serde_json::from_str(block)
                .with_context(|| format!("failed to parse JSON-LD block: {}", block))
        })
        .collect::<Result<Vec<JsonValue>>>()?;
    combine_json_ld(documents)
}

/// Rendered text of the document body, excluding script and style content
pub fn visible_text(document: &Html) -> String {
    let root = document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut text = String::new();
    for node in root.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| NON_CONTENT_TAGS.contains(&e.name()))
        });
        if !hidden {
            text.push_str(fragment);
        }
    }
    text
}

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_ld_empty_html() {
        let html = "<html><body>No JSON-LD here</body></html>";
        assert!(extract_json_ld_blocks(html).is_empty());
        assert_eq!(json_ld_script_count(&parse_document(html)), 0);
    }

    #[test]
    fn test_extract_json_ld_with_charset() {
        let html = r#"
            <script type="application/ld+json; charset=utf-8">
            {"@type": "Product", "name": "Test"}
            </script>
        "#;

        let blocks = extract_json_ld_blocks(html);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("Test"));
    }

    #[test]
    fn test_extract_json_ld_case_insensitive() {
        let html = r#"
            <script type="APPLICATION/LD+JSON">
            {"@type": "Product", "name": "Test"}
            </script>
        "#;

        assert_eq!(extract_json_ld_blocks(html).len(), 1);
    }

    #[test]
    fn test_extract_json_ld_empty_script() {
        let html = r#"
            <script type="application/ld+json"></script>
            <script type="application/ld+json">   </script>
        "#;

        assert!(extract_json_ld_blocks(html).is_empty());
        assert_eq!(json_ld_script_count(&parse_document(html)), 2);
    }

    #[test]
    fn test_schema_types() {
        let blocks = vec![
            r#"{"@type": "https://schema.org/Product"}"#.to_string(),
            r#"{"@type": ["Organization", "LocalBusiness"]}"#.to_string(),
            r#"{"@graph": [{"@type": "Offer"}, {"@type": "Product"}]}"#.to_string(),
            "not json".to_string(),
        ];

        assert_eq!(
            schema_types(&blocks),
            vec!["LocalBusiness", "Offer", "Organization", "Product"]
        );
    }

    #[test]
    fn test_combine_single_document_adds_context() {
        let combined =
            combine_json_ld(vec![serde_json::json!({"@type": "Product", "name": "Single"})])
                .unwrap();

        assert_eq!(combined["@context"], SCHEMA_ORG_CONTEXT);
        assert_eq!(combined["@type"], "Product");
        assert!(combined.get("@graph").is_none());
    }

    #[test]
    fn test_combine_multiple_blocks() {
        let blocks = vec![
            r#"{"@context": "https://schema.org", "@type": "Product", "name": "Product1"}"#
                .to_string(),
            r#"[{"@type": "Organization", "name": "Org1"}, {"@type": "FAQPage"}]"#.to_string(),
        ];

        let combined = combine_json_ld_blocks(&blocks).unwrap();
        let graph = combined["@graph"].as_array().unwrap();

        assert_eq!(combined["@context"], SCHEMA_ORG_CONTEXT);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph[0]["name"], "Product1");
        assert!(graph[0].get("@context").is_none());
    }

    #[test]
    fn test_combine_empty() {
        let combined = combine_json_ld(Vec::new()).unwrap();
        assert_eq!(combined["@context"], SCHEMA_ORG_CONTEXT);
        assert_eq!(combined["@graph"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_combine_invalid_json() {
        let blocks = vec![
            r#"{"@type": "Product""#.to_string(),
            r#"{"@type": "Organization", "name": "Valid"}"#.to_string(),
        ];
        assert!(combine_json_ld_blocks(&blocks).is_err());
    }

    #[test]
    fn test_combine_rejects_primitives() {
        let result = combine_json_ld(vec![serde_json::json!("text"), serde_json::json!({})]);
        assert!(result.is_err());
    }

    #[test]
    fn test_visible_text_skips_scripts_and_styles() {
        let html = r#"
            <html>
                <head><title>Ignored title</title></head>
                <body>
                    <h1>Main Content</h1>
                    <script>var hidden = "alert";</script>
                    <style>body { color: red; }</style>
                    <p>Safe content</p>
                </body>
            </html>
        "#;

        let text = visible_text(&parse_document(html));
        assert!(text.contains("Main Content"));
        assert!(text.contains("Safe content"));
        assert!(!text.contains("alert"));
        assert!(!text.contains("color"));
        assert!(!text.contains("Ignored title"));
        assert_eq!(word_count(&text), 4);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("سلام دنیا\n hello\tworld"), 4);
    }
}
