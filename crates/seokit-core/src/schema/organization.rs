use serde::Serialize;

use super::{JsonLd, non_empty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "ContactPoint", rename_all = "camelCase")]
pub struct ContactPoint {
    pub telephone: String,
    pub contact_type: String,
}

impl ContactPoint {
    pub fn customer_service(telephone: impl Into<String>) -> Self {
        Self {
            telephone: telephone.into(),
            contact_type: "Customer Service".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "PostalAddress", rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "Organization", rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_point: Option<ContactPoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
}

impl Organization {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            logo: None,
            description: None,
            contact_point: None,
            same_as: Vec::new(),
            address: None,
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn logo(mut self, url: impl Into<String>) -> Self {
        self.logo = Some(url.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn contact_point(mut self, contact: ContactPoint) -> Self {
        self.contact_point = Some(contact);
        self
    }

    /// Add a social profile; duplicates are ignored
    pub fn same_as(mut self, profile: impl Into<String>) -> Self {
        let profile = profile.into();
        if !self.same_as.contains(&profile) {
            self.same_as.push(profile);
        }
        self
    }

    pub fn address(mut self, address: PostalAddress) -> Self {
        self.address = Some(address);
        self
    }
}

impl JsonLd for Organization {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !non_empty(&self.name) {
            missing.push("name");
        }
        if !self.url.as_deref().is_some_and(non_empty) {
            missing.push("url");
        }
        missing
    }
}
