//! Synthetic Domain Authority, Page Authority and backlink figures
//!
//! None of these are real link-graph data. Authority comes from features
//! of the domain name; backlinks come from a free ranking API when one
//! answers, otherwise from an estimate with a little injected noise.

use std::sync::Arc;

use rand::Rng;
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::fetch::{Transport, get_json};
use crate::types::{AuthorityMetrics, BacklinkSource};
use crate::url_utils::{domain_of, parse_http_url};

const BASE_AUTHORITY: i32 = 22;

/// Words that make a domain look generic
const COMMON_DOMAIN_WORDS: &[&str] = &["the", "my", "web", "site", "blog", "news"];

fn tld_bonus(tld: &str) -> i32 {
    match tld {
        "com" => 15,
        "org" => 12,
        "net" => 10,
        "edu" => 20,
        "gov" => 22,
        "ir" => 5,
        _ => 0,
    }
}

fn raw_domain_authority(domain: &str) -> i32 {
    let tld = domain.rsplit('.').next().unwrap_or_default();
    let mut score = BASE_AUTHORITY + tld_bonus(tld);

    score += match domain.chars().count() {
        0..=5 => 12,
        6..=9 => 6,
        10..=19 => 2,
        _ => -2,
    };

    if !COMMON_DOMAIN_WORDS.iter().any(|word| domain.contains(word)) {
        score += 3;
    }
    score
}

/// Domain Authority in [5, 100]
pub fn estimate_domain_authority(domain: &str) -> u8 {
    raw_domain_authority(domain).clamp(5, 100) as u8
}

/// Page Authority in [5, 100], about two thirds of the domain's
pub fn estimate_page_authority(domain: &str) -> u8 {
    let page = (f64::from(raw_domain_authority(domain)) * 0.65).round() as i32;
    page.clamp(5, 100) as u8
}

/// `round(da^1.5 * 10 + r)` with `r` drawn from [0, 50)
pub fn estimate_backlinks<R: Rng>(domain_authority: u8, rng: &mut R) -> u64 {
    let noise: f64 = rng.random_range(0.0..50.0);
    (f64::from(domain_authority).powf(1.5) * 10.0 + noise).round() as u64
}

/// Authority figures with no network access
pub fn estimate_local<R: Rng>(domain: &str, rng: &mut R) -> AuthorityMetrics {
    let domain_authority = estimate_domain_authority(domain);
    AuthorityMetrics {
        domain: domain.to_string(),
        domain_authority,
        page_authority: estimate_page_authority(domain),
        backlinks: estimate_backlinks(domain_authority, rng),
        backlinks_source: BacklinkSource::Estimated,
    }
}

/// A free API reporting something backlink-like for a domain
pub trait RankingSource: Send + Sync {
    fn name(&self) -> &str;

    fn request_url(&self, domain: &str) -> String;

    /// Positive backlink figure, if the response carries one
    fn extract(&self, data: &JsonValue, domain: &str) -> Option<u64>;
}

pub struct BuiltWith;

impl RankingSource for BuiltWith {
    fn name(&self) -> &str {
        "BuiltWith"
    }

    fn request_url(&self, domain: &str) -> String {
        format!("https://data.builtwith.com/api/v1/domain/{domain}")
    }

    fn extract(&self, data: &JsonValue, _domain: &str) -> Option<u64> {
        data.get("backlinks")
            .and_then(JsonValue::as_f64)
            .filter(|v| *v > 0.0)
            .map(|v| v.round() as u64)
    }
}

/// Open PageRank; the integer rank (0-10) is scaled by 100
pub struct OpenPageRank;

impl RankingSource for OpenPageRank {
    fn name(&self) -> &str {
        "OpenPageRank"
    }

    fn request_url(&self, domain: &str) -> String {
        format!("https://openpagerank.com/api/v1.0/pagerank?domains[]={domain}")
    }

    fn extract(&self, data: &JsonValue, domain: &str) -> Option<u64> {
        let entry = match data.get("response")? {
            JsonValue::Object(map) => map.get(domain)?,
            // the live API answers with a list of per-domain entries
            JsonValue::Array(entries) => entries
                .iter()
                .find(|e| e.get("domain").and_then(JsonValue::as_str) == Some(domain))?,
            _ => return None,
        };
        let rank = match entry.get("page_rank_integer")? {
            JsonValue::String(s) => s.parse::<f64>().ok()?,
            other => other.as_f64()?,
        };
        let backlinks = (rank * 100.0).round();
        (backlinks > 0.0).then_some(backlinks as u64)
    }
}

pub fn default_ranking_sources() -> Vec<Arc<dyn RankingSource>> {
    vec![Arc::new(BuiltWith), Arc::new(OpenPageRank)]
}

/// Estimates authority, asking ranking APIs for backlinks first
#[derive(Clone)]
pub struct AuthorityEstimator {
    transport: Option<Arc<dyn Transport>>,
    sources: Vec<Arc<dyn RankingSource>>,
}

impl AuthorityEstimator {
    pub fn offline() -> Self {
        Self {
            transport: None,
            sources: Vec::new(),
        }
    }

    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport: Some(transport),
            sources: default_ranking_sources(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<Arc<dyn RankingSource>>) -> Self {
        self.sources = sources;
        self
    }

    /// Authority figures for the domain of `url`
    pub async fn estimate<R: Rng + Send>(
        &self,
        url: &str,
        rng: &mut R,
    ) -> Result<AuthorityMetrics> {
        let parsed = parse_http_url(url)?;
        let domain = domain_of(&parsed).ok_or_else(|| Error::InvalidUrl(url.to_string()))?;

        let provided = self.provider_backlinks(&domain).await;
        let mut metrics = estimate_local(&domain, rng);
        if let Some((name, backlinks)) = provided {
            metrics.backlinks = backlinks;
            metrics.backlinks_source = BacklinkSource::Provider(name);
        }

        tracing::debug!(
            domain = %metrics.domain,
            da = metrics.domain_authority,
            pa = metrics.page_authority,
            backlinks = metrics.backlinks,
            "estimated authority"
        );
        Ok(metrics)
    }

    async fn provider_backlinks(&self, domain: &str) -> Option<(String, u64)> {
        let transport = self.transport.as_ref()?;
        for source in &self.sources {
            match get_json(transport.as_ref(), &source.request_url(domain)).await {
                Ok(data) => {
                    if let Some(backlinks) = source.extract(&data, domain) {
                        return Some((source.name().to_string(), backlinks));
                    }
                }
                Err(err) => {
                    tracing::debug!(provider = source.name(), error = %err, "ranking provider unavailable");
                }
            }
        }
        None
    }
}

/// Convenience wrapper around [`AuthorityEstimator::estimate`]
pub async fn estimate_authority<R: Rng + Send>(
    url: &str,
    transport: Option<Arc<dyn Transport>>,
    rng: &mut R,
) -> Result<AuthorityMetrics> {
    let estimator = match transport {
        Some(transport) => AuthorityEstimator::new(transport),
        None => AuthorityEstimator::offline(),
    };
    estimator.estimate(url, rng).await
}
