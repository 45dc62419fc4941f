//! Persian keyword scoring
//!
//! Volume and difficulty come from lexical heuristics over the normalized
//! keyword. When a [`Transport`] is configured, keyword-data APIs are asked
//! first and their values take precedence.

mod difficulty;
mod lexicon;
mod providers;
mod season;
mod volume;

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::fetch::{Transport, get_json};
use crate::types::{KeywordMetrics, LOCAL_DATA_SOURCE};

pub use difficulty::estimate_difficulty;
pub use providers::{KeywordApiData, KeywordSource, KeywordToolsIo, SerpApi, Ubersuggest};
pub use season::{SEASONAL_WINDOWS, SeasonClock, SeasonalWindow, seasonal_multiplier};
pub use volume::{estimate_search_volume, user_demand};

/// Map Arabic letter variants to their Persian forms and trim.
pub fn normalize_persian(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| match c {
            '\u{064A}' | '\u{0649}' => '\u{06CC}',
            '\u{0643}' => '\u{06A9}',
            '\u{0629}' => '\u{0647}',
            other => other,
        })
        .collect()
}

pub(crate) fn is_persian_char(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// Whether any character falls in the Arabic block
pub fn is_persian(text: &str) -> bool {
    text.chars().any(is_persian_char)
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn default_sources() -> Vec<Arc<dyn KeywordSource>> {
    vec![Arc::new(SerpApi), Arc::new(KeywordToolsIo), Arc::new(Ubersuggest)]
}

/// Scores keywords, optionally consulting keyword-data APIs
#[derive(Clone)]
pub struct KeywordScorer {
    transport: Option<Arc<dyn Transport>>,
    sources: Vec<Arc<dyn KeywordSource>>,
    clock: SeasonClock,
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::offline()
    }
}

impl KeywordScorer {
    /// Local heuristics only
    pub fn offline() -> Self {
        Self {
            transport: None,
            sources: Vec::new(),
            clock: SeasonClock::default(),
        }
    }

    /// Query the default providers through `transport`
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport: Some(transport),
            sources: default_sources(),
            clock: SeasonClock::default(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<Arc<dyn KeywordSource>>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_clock(mut self, clock: SeasonClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock(&self) -> SeasonClock {
        self.clock
    }

    /// Score with the heuristics alone
    pub fn score_local(&self, text: &str) -> Result<KeywordMetrics> {
        let keyword = normalize_keyword(text)?;
        Ok(self.build(keyword, KeywordApiData::default(), Vec::new()))
    }

    /// Score, letting provider values override the heuristics
    pub async fn score_keyword(&self, text: &str) -> Result<KeywordMetrics> {
        let keyword = normalize_keyword(text)?;
        let (api, contributors) = self.query_sources(&keyword).await;
        Ok(self.build(keyword, api, contributors))
    }

    async fn query_sources(&self, keyword: &str) -> (KeywordApiData, Vec<String>) {
        let mut merged = KeywordApiData::default();
        let mut contributors = Vec::new();
        let Some(transport) = &self.transport else {
            return (merged, contributors);
        };

        for source in &self.sources {
            let data = match get_json(transport.as_ref(), &source.request_url(keyword)).await {
                Ok(data) => data,
                Err(err) => {
                    tracing::debug!(provider = source.name(), error = %err, "keyword provider unavailable");
                    continue;
                }
            };

            let found = source.extract(&data);
            if found.is_empty() {
                continue;
            }
            // later providers override earlier ones
            merged.search_volume = found.search_volume.or(merged.search_volume);
            merged.difficulty = found.difficulty.or(merged.difficulty);
            contributors.push(source.name().to_string());
        }

        (merged, contributors)
    }

    fn build(&self, keyword: String, api: KeywordApiData, contributors: Vec<String>) -> KeywordMetrics {
        let search_volume = match api.search_volume {
            Some(v) => v.clamp(volume::MIN_VOLUME, volume::MAX_VOLUME).round() as u8,
            None => estimate_search_volume(&keyword, self.clock.today()),
        };
        let difficulty = match api.difficulty {
            Some(d) => d
                .clamp(
                    f64::from(difficulty::MIN_DIFFICULTY),
                    f64::from(difficulty::MAX_DIFFICULTY),
                )
                .round() as u8,
            None => estimate_difficulty(&keyword),
        };
        let data_source = if contributors.is_empty() {
            LOCAL_DATA_SOURCE.to_string()
        } else {
            contributors.join(", ")
        };

        tracing::debug!(keyword = %keyword, search_volume, difficulty, data_source = %data_source, "scored keyword");
        KeywordMetrics::new(
            keyword.clone(),
            is_persian(&keyword),
            search_volume,
            difficulty,
            data_source,
        )
    }
}

fn normalize_keyword(text: &str) -> Result<String> {
    let keyword = normalize_persian(text);
    if keyword.is_empty() {
        return Err(Error::EmptyKeyword);
    }
    Ok(keyword)
}
