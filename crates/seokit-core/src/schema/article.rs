use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::{ImageObject, JsonLd, non_empty};

/// The article family of schema.org types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ArticleKind {
    #[default]
    Article,
    BlogPosting,
    NewsArticle,
    TechArticle,
    ScholarlyArticle,
    Report,
}

impl ArticleKind {
    pub const ALL: [Self; 6] = [
        Self::Article,
        Self::BlogPosting,
        Self::NewsArticle,
        Self::TechArticle,
        Self::ScholarlyArticle,
        Self::Report,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Article => "Article",
            Self::BlogPosting => "BlogPosting",
            Self::NewsArticle => "NewsArticle",
            Self::TechArticle => "TechArticle",
            Self::ScholarlyArticle => "ScholarlyArticle",
            Self::Report => "Report",
        }
    }
}

impl fmt::Display for ArticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleKind {
    type Err = String;

    /// Case-insensitive; dashes and underscores are ignored (`blog-posting`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown article type '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "Person")]
pub struct Person {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// The organization publishing an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "Organization")]
pub struct Publisher {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<ImageObject>,
}

impl Publisher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logo: None,
        }
    }

    pub fn logo(mut self, url: impl Into<String>) -> Self {
        self.logo = Some(ImageObject::new(url));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "@type")]
    pub kind: ArticleKind,
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub image: Vec<ImageObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Publisher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_body: Option<String>,
}

impl Article {
    pub fn new(kind: ArticleKind, headline: impl Into<String>) -> Self {
        Self {
            kind,
            headline: headline.into(),
            description: None,
            image: Vec::new(),
            date_published: None,
            date_modified: None,
            author: None,
            publisher: None,
            article_body: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn image(mut self, image: ImageObject) -> Self {
        self.image.push(image);
        self
    }

    /// Drop the image at `index`; out-of-range indices are ignored
    pub fn remove_image(&mut self, index: usize) {
        if index < self.image.len() {
            self.image.remove(index);
        }
    }

    pub fn published(mut self, at: DateTime<FixedOffset>) -> Self {
        self.date_published = Some(at);
        self
    }

    pub fn modified(mut self, at: DateTime<FixedOffset>) -> Self {
        self.date_modified = Some(at);
        self
    }

    pub fn author(mut self, author: Person) -> Self {
        self.author = Some(author);
        self
    }

    pub fn publisher(mut self, publisher: Publisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.article_body = Some(body.into());
        self
    }
}

impl JsonLd for Article {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !non_empty(&self.headline) {
            missing.push("headline");
        }
        if !self.author.as_ref().is_some_and(|a| non_empty(&a.name)) {
            missing.push("author.name");
        }
        if self.date_published.is_none() {
            missing.push("datePublished");
        }
        missing
    }
}
