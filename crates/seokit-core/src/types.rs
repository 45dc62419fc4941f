//! Common types used across seokit

use serde::Serialize;

/// A URL or keyword as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub raw_input: String,
}

impl AnalysisRequest {
    pub fn new(raw_input: impl Into<String>) -> Self {
        Self {
            raw_input: raw_input.into(),
        }
    }
}

/// A fetched page, as returned by the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    pub html: String,
    pub final_url: String,
    pub status_code: u16,
}

/// Outcome class of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingCategory {
    Issue,
    Warning,
    Success,
}

/// One observation made by the page analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub category: FindingCategory,
    pub title: String,
    pub message: String,
}

impl Finding {
    pub fn issue(title: &str, message: impl Into<String>) -> Self {
        Self::new(FindingCategory::Issue, title, message)
    }

    pub fn warning(title: &str, message: impl Into<String>) -> Self {
        Self::new(FindingCategory::Warning, title, message)
    }

    pub fn success(title: &str, message: impl Into<String>) -> Self {
        Self::new(FindingCategory::Success, title, message)
    }

    fn new(category: FindingCategory, title: &str, message: impl Into<String>) -> Self {
        Self {
            category,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// Points deducted per issue
pub const ISSUE_PENALTY: u32 = 15;
/// Points deducted per warning
pub const WARNING_PENALTY: u32 = 5;

/// `max(0, 100 - 15 * issues - 5 * warnings)`
pub fn compute_score(issues: usize, warnings: usize) -> u8 {
    let deduction = (issues as u32)
        .saturating_mul(ISSUE_PENALTY)
        .saturating_add((warnings as u32).saturating_mul(WARNING_PENALTY));
    100u32.saturating_sub(deduction) as u8
}

/// Result of analyzing one page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoReport {
    pub url: String,
    pub timestamp_local: String,
    pub findings: Vec<Finding>,
    pub score: u8,
    pub domain_authority: Option<u8>,
    pub page_authority: Option<u8>,
    pub backlinks: Option<u64>,
}

impl SeoReport {
    /// Build a report from an ordered list of findings; the score is derived.
    pub fn from_findings(url: String, timestamp_local: String, findings: Vec<Finding>) -> Self {
        let mut report = Self {
            url,
            timestamp_local,
            findings,
            score: 0,
            domain_authority: None,
            page_authority: None,
            backlinks: None,
        };
        report.score = compute_score(report.issue_count(), report.warning_count());
        report
    }

    pub fn issue_count(&self) -> usize {
        self.count(FindingCategory::Issue)
    }

    pub fn warning_count(&self) -> usize {
        self.count(FindingCategory::Warning)
    }

    pub fn success_count(&self) -> usize {
        self.count(FindingCategory::Success)
    }

    pub fn findings_in(&self, category: FindingCategory) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.category == category)
    }

    /// Merge authority figures into the report
    pub fn with_authority(mut self, authority: &AuthorityMetrics) -> Self {
        self.domain_authority = Some(authority.domain_authority);
        self.page_authority = Some(authority.page_authority);
        self.backlinks = Some(authority.backlinks);
        self
    }

    pub fn grade(&self) -> ScoreGrade {
        ScoreGrade::from_score(self.score)
    }

    fn count(&self, category: FindingCategory) -> usize {
        self.findings.iter().filter(|f| f.category == category).count()
    }
}

/// Coarse rating of an SEO score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreGrade {
    Excellent,
    Good,
    Average,
    Poor,
}

impl ScoreGrade {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Average,
            _ => Self::Poor,
        }
    }

    pub fn label_fa(self) -> &'static str {
        match self {
            Self::Excellent => "عالی 🎯",
            Self::Good => "خوب ✓",
            Self::Average => "متوسط ⚠",
            Self::Poor => "ضعیف 🔴",
        }
    }

    pub fn label_en(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Poor => "Poor",
        }
    }
}

/// Where the backlink figure came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "provider")]
pub enum BacklinkSource {
    Provider(String),
    Estimated,
}

/// Synthetic authority figures for a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityMetrics {
    pub domain: String,
    pub domain_authority: u8,
    pub page_authority: u8,
    pub backlinks: u64,
    pub backlinks_source: BacklinkSource,
}

/// Name reported when no third-party provider contributed
pub const LOCAL_DATA_SOURCE: &str = "Local Algorithm";

/// Scores for one keyword
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMetrics {
    pub normalized_keyword: String,
    pub is_persian: bool,
    pub search_volume: u8,
    pub difficulty: u8,
    pub opportunity: f64,
    pub data_source: String,
}

impl KeywordMetrics {
    /// Build metrics; `opportunity` is derived from volume and difficulty.
    pub fn new(
        normalized_keyword: String,
        is_persian: bool,
        search_volume: u8,
        difficulty: u8,
        data_source: String,
    ) -> Self {
        Self {
            normalized_keyword,
            is_persian,
            search_volume,
            difficulty,
            opportunity: opportunity(search_volume, difficulty),
            data_source,
        }
    }

    pub fn difficulty_level(&self) -> DifficultyLevel {
        DifficultyLevel::from_score(self.difficulty)
    }

    pub fn volume_level(&self) -> VolumeLevel {
        VolumeLevel::from_score(self.search_volume)
    }
}

/// `min(100, (volume / (difficulty / 100 + 1)) * 50)`
pub fn opportunity(search_volume: u8, difficulty: u8) -> f64 {
    let volume = f64::from(search_volume);
    let difficulty = f64::from(difficulty);
    ((volume / (difficulty / 100.0 + 1.0)) * 50.0).min(100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DifficultyLevel {
    VeryEasy,
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl DifficultyLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=20 => Self::VeryEasy,
            21..=40 => Self::Easy,
            41..=60 => Self::Medium,
            61..=80 => Self::Hard,
            _ => Self::VeryHard,
        }
    }

    pub fn label_fa(self) -> &'static str {
        match self {
            Self::VeryEasy => "بسیار آسان",
            Self::Easy => "آسان",
            Self::Medium => "متوسط",
            Self::Hard => "سخت",
            Self::VeryHard => "بسیار سخت",
        }
    }

    pub fn label_en(self) -> &'static str {
        match self {
            Self::VeryEasy => "Very Easy",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::VeryHard => "Very Hard",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::VeryEasy => "🎯",
            Self::Easy => "✓",
            Self::Medium => "⚠",
            Self::Hard => "⚡",
            Self::VeryHard => "🔥",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VolumeLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl VolumeLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=15 => Self::VeryLow,
            16..=35 => Self::Low,
            36..=55 => Self::Medium,
            56..=75 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    pub fn label_fa(self) -> &'static str {
        match self {
            Self::VeryLow => "بسیار کم",
            Self::Low => "کم",
            Self::Medium => "متوسط",
            Self::High => "زیاد",
            Self::VeryHigh => "بسیار زیاد",
        }
    }

    pub fn label_en(self) -> &'static str {
        match self {
            Self::VeryLow => "Low",
            Self::Low => "Low-Medium",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}
