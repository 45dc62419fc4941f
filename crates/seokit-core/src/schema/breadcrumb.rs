use serde::Serialize;

use super::{JsonLd, non_empty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "ListItem")]
pub struct ListItem {
    pub position: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

/// Breadcrumb trail; positions are always 1..=n in list order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "BreadcrumbList", rename_all = "camelCase")]
pub struct BreadcrumbList {
    item_list_element: Vec<ListItem>,
}

impl BreadcrumbList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.push(name, Some(url.into()));
        self
    }

    /// Append a crumb; the last crumb usually has no URL
    pub fn push(&mut self, name: impl Into<String>, url: Option<String>) {
        self.item_list_element.push(ListItem {
            position: 0,
            name: name.into(),
            item: url,
        });
        self.renumber();
    }

    pub fn insert(&mut self, index: usize, name: impl Into<String>, url: Option<String>) {
        let index = index.min(self.item_list_element.len());
        self.item_list_element.insert(
            index,
            ListItem {
                position: 0,
                name: name.into(),
                item: url,
            },
        );
        self.renumber();
    }

    pub fn remove(&mut self, index: usize) -> Option<ListItem> {
        if index >= self.item_list_element.len() {
            return None;
        }
        let removed = self.item_list_element.remove(index);
        self.renumber();
        Some(removed)
    }

    pub fn items(&self) -> &[ListItem] {
        &self.item_list_element
    }

    fn renumber(&mut self) {
        for (i, item) in self.item_list_element.iter_mut().enumerate() {
            item.position = i as u32 + 1;
        }
    }
}

impl JsonLd for BreadcrumbList {
    fn missing_required(&self) -> Vec<&'static str> {
        if self.item_list_element.is_empty() {
            return vec!["itemListElement"];
        }
        if self.item_list_element.iter().any(|i| !non_empty(&i.name)) {
            return vec!["itemListElement.name"];
        }
        Vec::new()
    }
}
