use crate::error::{Result, SearchError};
use catalog_vector_store::ItemId;
use serde::{Deserialize, Serialize};

/// Listing API response. Only the fields the catalog needs are modelled;
/// everything else in the payload is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub meta: Option<ListingMeta>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingMeta {
    #[serde(default, rename = "listItems")]
    pub list_items: Option<Vec<ListingItem>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingItem {
    #[serde(default)]
    pub title: Option<String>,
}

/// Ordered item titles. An item's position is its [`ItemId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    titles: Vec<String>,
}

impl Catalog {
    #[must_use]
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }

    /// Extract titles from a listing response.
    ///
    /// Fails when `meta.listItems` is absent; items without a title are skipped.
    pub fn from_listing(response: ListingResponse) -> Result<Self> {
        let items = response
            .meta
            .ok_or_else(|| SearchError::CatalogError("response has no `meta` object".into()))?
            .list_items
            .ok_or_else(|| SearchError::CatalogError("response has no `meta.listItems`".into()))?;

        let total = items.len();
        let titles: Vec<String> = items.into_iter().filter_map(|item| item.title).collect();
        if titles.len() < total {
            log::warn!(
                "Skipped {} listing items without a title",
                total - titles.len()
            );
        }
        log::info!("Extracted {} titles from listing", titles.len());
        Ok(Self { titles })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let response: ListingResponse = serde_json::from_str(json)?;
        Self::from_listing(response)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let response: ListingResponse = serde_json::from_slice(bytes)?;
        Self::from_listing(response)
    }

    #[must_use]
    pub fn title(&self, id: ItemId) -> Option<&str> {
        self.titles.get(id.index()).map(String::as_str)
    }

    #[must_use]
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
