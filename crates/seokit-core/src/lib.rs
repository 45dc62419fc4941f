//! # seokit-core
//!
//! Core library for on-page SEO checks and Persian keyword scoring.
//!
//! This library provides:
//! - An on-page SEO checklist producing a 0-100 score
//! - Synthetic Domain Authority / Page Authority / backlink estimates
//! - Heuristic volume and difficulty scores for Persian keywords
//! - Page fetching through a relay server with a public-proxy fallback
//! - Typed schema.org JSON-LD builders
//!
//! ## Features
//!
//! - `default`: everything except the real HTTP client
//! - `network`: [`fetch::ReqwestTransport`], a reqwest-backed [`fetch::Transport`]
//!
//! ## Example
//!
//! ```
//! use seokit_core::{analyzer, keyword::KeywordScorer};
//!
//! let report = analyzer::analyze_html("<html><head><title>Hi</title></head></html>", "https://example.com");
//! assert!(report.score < 100);
//!
//! let metrics = KeywordScorer::offline().score_local("خرید گوشی").unwrap();
//! assert!(metrics.opportunity <= 100.0);
//! ```

pub mod analyzer;
pub mod authority;
pub mod checker;
pub mod error;
pub mod fetch;
pub mod keyword;
pub mod parser;
pub mod schema;
pub mod session;
pub mod types;
pub mod url_utils;

// Re-export commonly used types
pub use error::{Error, FetchError, Result};
pub use types::{
    AnalysisRequest, AuthorityMetrics, BacklinkSource, Finding, FindingCategory, KeywordMetrics,
    PageDocument, ScoreGrade, SeoReport,
};

pub use analyzer::{analyze, analyze_html};
pub use authority::{AuthorityEstimator, estimate_authority};
pub use checker::SeoChecker;
pub use fetch::{PageFetcher, Transport};
pub use keyword::{KeywordScorer, SeasonClock};
pub use parser::{combine_json_ld_blocks, extract_json_ld_blocks};
pub use schema::JsonLd;
pub use session::{GenerationCounter, History, HistoryEntry};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_ld_from_html() {
        let html = r#"
            <html>
                <head>
                    <script type="application/ld+json">
                    {"@context": "https://schema.org", "@type": "Product", "name": "Test Product"}
                    </script>
                </head>
                <body>Some content</body>
            </html>
        "#;

        let blocks = extract_json_ld_blocks(html);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("Test Product"));
    }

    #[test]
    fn test_combine_json_ld_blocks() {
        let blocks = vec![
            r#"{"@context": "https://schema.org", "@type": "Product", "name": "Product 1"}"#
                .to_string(),
            r#"{"@type": "Organization", "name": "Company"}"#.to_string(),
        ];

        let combined = combine_json_ld_blocks(&blocks).unwrap();

        assert_eq!(combined["@context"], "https://schema.org");
        assert!(combined["@graph"].is_array());
        assert_eq!(combined["@graph"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_report_from_page_with_structured_data() {
        let html = r#"
            <html>
                <head>
                    <title>Structured data test page for seokit</title>
                    <script type="application/ld+json">{"@type": "Organization", "name": "Co"}</script>
                </head>
                <body><h1>Hello</h1></body>
            </html>
        "#;

        let report = analyze_html(html, "https://example.com");
        let structured = report
            .findings
            .iter()
            .find(|f| f.title == "Structured Data")
            .unwrap();
        assert_eq!(structured.category, FindingCategory::Success);
        assert!(structured.message.contains("Organization"));
    }

    #[test]
    fn test_history_of_mixed_entries() {
        let mut history = History::new();
        let metrics = KeywordScorer::offline().score_local("سئو").unwrap();
        history.push(HistoryEntry::Keyword {
            input: "سئو".into(),
            metrics,
        });
        history.push(HistoryEntry::Page {
            input: "example.com".into(),
            report: analyze_html("<html></html>", "https://example.com"),
        });

        let inputs: Vec<_> = history.iter().map(HistoryEntry::input).collect();
        assert_eq!(inputs, vec!["example.com", "سئو"]);
    }
}
