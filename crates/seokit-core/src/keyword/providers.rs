//! Third-party keyword-data APIs
//!
//! All of them are best-effort: any failure means "no data".

use serde_json::Value as JsonValue;
use url::form_urlencoded::byte_serialize;

/// Volume and difficulty as reported by a provider, before clamping
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeywordApiData {
    pub search_volume: Option<f64>,
    pub difficulty: Option<f64>,
}

impl KeywordApiData {
    pub fn is_empty(&self) -> bool {
        self.search_volume.is_none() && self.difficulty.is_none()
    }
}

pub trait KeywordSource: Send + Sync {
    /// Name shown in `data_source`
    fn name(&self) -> &str;

    fn request_url(&self, keyword: &str) -> String;

    fn extract(&self, data: &JsonValue) -> KeywordApiData;
}

fn encode(keyword: &str) -> String {
    byte_serialize(keyword.as_bytes()).collect()
}

/// Zero and missing values both mean "unknown"
fn positive(value: Option<&JsonValue>) -> Option<f64> {
    value.and_then(JsonValue::as_f64).filter(|v| *v > 0.0)
}

/// Google results count from SerpApi, one point per million results
pub struct SerpApi;

impl KeywordSource for SerpApi {
    fn name(&self) -> &str {
        "SerpAPI"
    }

    fn request_url(&self, keyword: &str) -> String {
        format!(
            "https://api.serpapi.com/search?q={}&engine=google&gl=ir&hl=fa&api_key=demo",
            encode(keyword)
        )
    }

    fn extract(&self, data: &JsonValue) -> KeywordApiData {
        let total = data
            .pointer("/search_information/total_results")
            .and_then(JsonValue::as_f64);
        KeywordApiData {
            search_volume: total.map(|t| t / 1_000_000.0),
            difficulty: None,
        }
    }
}

pub struct KeywordToolsIo;

impl KeywordSource for KeywordToolsIo {
    fn name(&self) -> &str {
        "KeywordTools"
    }

    fn request_url(&self, keyword: &str) -> String {
        format!(
            "https://api.keywordtoolsio.com/v1/get_keyword_data?keyword={}&country=ir&language=fa",
            encode(keyword)
        )
    }

    fn extract(&self, data: &JsonValue) -> KeywordApiData {
        let Some(data) = data.get("data") else {
            return KeywordApiData::default();
        };
        KeywordApiData {
            search_volume: positive(data.get("search_volume")),
            difficulty: positive(data.get("difficulty")),
        }
    }
}

pub struct Ubersuggest;

impl KeywordSource for Ubersuggest {
    fn name(&self) -> &str {
        "Ubersuggest"
    }

    fn request_url(&self, keyword: &str) -> String {
        format!(
            "https://app.ubersuggest.com/api/v1/keyword/search?keyword={}&lang=fa_IR",
            encode(keyword)
        )
    }

    fn extract(&self, data: &JsonValue) -> KeywordApiData {
        KeywordApiData {
            search_volume: positive(data.get("search_volume")),
            difficulty: positive(data.get("difficulty")),
        }
    }
}
