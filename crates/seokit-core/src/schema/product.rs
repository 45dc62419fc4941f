use serde::Serialize;

use super::{JsonLd, non_empty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Availability {
    #[default]
    #[serde(rename = "https://schema.org/InStock")]
    InStock,
    #[serde(rename = "https://schema.org/OutOfStock")]
    OutOfStock,
    #[serde(rename = "https://schema.org/PreOrder")]
    PreOrder,
    #[serde(rename = "https://schema.org/Discontinued")]
    Discontinued,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "Brand")]
pub struct Brand {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "Offer", rename_all = "camelCase")]
pub struct Offer {
    /// Decimal string, kept as typed (`"29.90"`)
    pub price: String,
    pub price_currency: String,
    pub availability: Availability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Offer {
    pub fn new(price: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            price_currency: currency.into(),
            availability: Availability::default(),
            url: None,
        }
    }

    pub fn availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "AggregateRating", rename_all = "camelCase")]
pub struct AggregateRating {
    pub rating_value: f64,
    pub review_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename = "Product", rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offers: Option<Offer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_rating: Option<AggregateRating>,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            image: None,
            brand: None,
            offers: None,
            aggregate_rating: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn brand(mut self, name: impl Into<String>) -> Self {
        self.brand = Some(Brand { name: name.into() });
        self
    }

    pub fn offer(mut self, offer: Offer) -> Self {
        self.offers = Some(offer);
        self
    }

    /// Ratings are clamped to the usual 1-5 scale
    pub fn rating(mut self, value: f64, review_count: u32) -> Self {
        self.aggregate_rating = Some(AggregateRating {
            rating_value: value.clamp(1.0, 5.0),
            review_count,
        });
        self
    }
}

impl JsonLd for Product {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !non_empty(&self.name) {
            missing.push("name");
        }
        if let Some(offer) = &self.offers
            && !non_empty(&offer.price)
        {
            missing.push("offers.price");
        }
        missing
    }
}
