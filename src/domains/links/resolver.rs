use super::models::ResolvedLink;
use crate::embed::WidgetConfig;
use shared::{AppError, CreateLinkRequest, HissabackApi, Result, SmartLink};
use std::sync::Arc;
use tracing::{debug, info};

/// Finds the configured offer and campaign and reuses or creates the smart
/// link for the pair.
pub struct LinkResolver {
    api: Arc<dyn HissabackApi>,
}

impl LinkResolver {
    pub fn new(api: Arc<dyn HissabackApi>) -> Self {
        Self { api }
    }

    pub async fn resolve(&self, config: &WidgetConfig) -> Result<ResolvedLink> {
        let (offers, campaigns) =
            futures::try_join!(self.api.list_offers(), self.api.list_campaigns())?;
        debug!(
            "📦 Catalogue fetched: {} offers, {} campaigns",
            offers.len(),
            campaigns.len()
        );

        let offer = offers
            .into_iter()
            .find(|o| o.offer_id == config.offer_id)
            .ok_or_else(|| AppError::not_found(format!("offer {}", config.offer_id)))?;

        let campaign = campaigns
            .into_iter()
            .find(|c| c.campaign_id == config.campaign_id)
            .ok_or_else(|| AppError::not_found(format!("campaign {}", config.campaign_id)))?;

        let existing = self
            .api
            .list_links()
            .await?
            .into_iter()
            .find(|l| l.matches(&config.campaign_id, &offer.offer_id));

        let (link, created) = match existing {
            Some(link) => {
                debug!("🔗 Reusing smart link {}", link.link_id);
                (link, false)
            }
            None => {
                let request = CreateLinkRequest {
                    campaign_id: config.campaign_id.clone(),
                    offer_id: offer.offer_id.clone(),
                };
                let link = self.api.create_link(&request).await?;
                info!(
                    "🔗 Smart link {} created for campaign {} + offer {}",
                    link.link_id, request.campaign_id, request.offer_id
                );
                (link, true)
            }
        };

        Ok(ResolvedLink {
            offer,
            campaign,
            link,
            created,
        })
    }
}

/// Resolve only the smart link for `config`.
pub async fn resolve_link(api: Arc<dyn HissabackApi>, config: &WidgetConfig) -> Result<SmartLink> {
    Ok(LinkResolver::new(api).resolve(config).await?.link)
}
