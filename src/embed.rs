//! Embedding surface: the `data-*` attributes on the including tag and the
//! host page the widget mounts into.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub const ATTR_CAMPAIGN: &str = "data-campaign";
pub const ATTR_OFFER: &str = "data-offer";
pub const ATTR_STYLE: &str = "data-style";
pub const ATTR_CONTAINER: &str = "data-container";

pub const DEFAULT_STYLE: &str = "button";
pub const DEFAULT_CONTAINER_ID: &str = "hissaback-widget";

/// Widget configuration read once from the embedding tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub campaign_id: String,
    pub offer_id: String,
    pub style: String,
    pub container_id: String,
}

impl WidgetConfig {
    /// Build from an attribute lookup. Missing identifiers become empty
    /// strings, which never match a backend record.
    pub fn from_attributes<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| get(name).filter(|v| !v.is_empty());

        Self {
            campaign_id: get(ATTR_CAMPAIGN).unwrap_or_default(),
            offer_id: get(ATTR_OFFER).unwrap_or_default(),
            style: non_empty(ATTR_STYLE).unwrap_or_else(|| DEFAULT_STYLE.to_string()),
            container_id: non_empty(ATTR_CONTAINER)
                .unwrap_or_else(|| DEFAULT_CONTAINER_ID.to_string()),
        }
    }

    pub fn from_map(attributes: &HashMap<String, String>) -> Self {
        Self::from_attributes(|name| attributes.get(name).cloned())
    }
}

/// Snapshot of a host page: the embedding tag's attributes plus every element
/// id present in the document.
///
/// Only owned data is kept so the snapshot can cross await points.
#[derive(Debug, Clone, Default)]
pub struct HostPage {
    embed_attributes: Option<HashMap<String, String>>,
    element_ids: HashSet<String>,
}

impl HostPage {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        let embed_attributes = Selector::parse("script").ok().and_then(|selector| {
            let scripts: Vec<_> = document.select(&selector).collect();
            // The tag carrying the campaign wins; otherwise the last script
            // on the page is assumed to be ours.
            scripts
                .iter()
                .rev()
                .find(|s| s.value().attr(ATTR_CAMPAIGN).is_some())
                .or_else(|| scripts.last())
                .map(|script| {
                    script
                        .value()
                        .attrs()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect::<HashMap<_, _>>()
                })
        });

        let element_ids: HashSet<String> = Selector::parse("[id]")
            .ok()
            .map(|selector| {
                document
                    .select(&selector)
                    .filter_map(|el| el.value().id().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        debug!(
            "📄 Host page parsed: embed tag found = {}, {} element ids",
            embed_attributes.is_some(),
            element_ids.len()
        );

        Self {
            embed_attributes,
            element_ids,
        }
    }

    /// Config from the embedding tag, if the page has one.
    pub fn widget_config(&self) -> Option<WidgetConfig> {
        self.embed_attributes.as_ref().map(WidgetConfig::from_map)
    }

    pub fn has_element(&self, id: &str) -> bool {
        self.element_ids.contains(id)
    }
}
