//! Page check pipeline: fetch, analyze, then merge authority figures

use rand::Rng;

use crate::analyzer;
use crate::authority::AuthorityEstimator;
use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::types::{AnalysisRequest, SeoReport};
use crate::url_utils::{normalize_input_url, parse_http_url};

#[derive(Clone)]
pub struct SeoChecker {
    fetcher: PageFetcher,
    authority: AuthorityEstimator,
}

impl SeoChecker {
    pub fn new(fetcher: PageFetcher, authority: AuthorityEstimator) -> Self {
        Self { fetcher, authority }
    }

    /// Fetch and analyze the page named by the user's input
    pub async fn check<R: Rng + Send>(
        &self,
        request: &AnalysisRequest,
        rng: &mut R,
    ) -> Result<SeoReport> {
        let url = normalize_input_url(&request.raw_input);
        parse_http_url(&url)?;

        let html = self.fetcher.fetch(&url).await?;
        self.report_for(&html, &url, rng).await
    }

    /// Analyze HTML that is already at hand
    pub async fn report_for<R: Rng + Send>(
        &self,
        html: &str,
        url: &str,
        rng: &mut R,
    ) -> Result<SeoReport> {
        // the parsed document is not Send, keep it out of the awaits
        let report = analyzer::analyze_html(html, url);

        match self.authority.estimate(url, rng).await {
            Ok(metrics) => Ok(report.with_authority(&metrics)),
            Err(err) => {
                tracing::warn!(url, error = %err, "authority estimate failed");
                Ok(report)
            }
        }
    }
}
