//! Result of resolving the configured campaign/offer pair

use serde::Serialize;
use shared::{Campaign, Offer, SmartLink};

/// Text shown in place of the widget when setup fails for any reason.
pub const SETUP_ERROR_MESSAGE: &str = "Error loading cashback offer.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLink {
    pub offer: Offer,
    pub campaign: Campaign,
    pub link: SmartLink,
    /// `true` when the link did not exist and was created by this resolution.
    pub created: bool,
}

impl ResolvedLink {
    pub fn cashback_amount(&self) -> i64 {
        cashback_amount(self.offer.base_commission_pct, self.campaign.share_pct)
    }

    /// Call-to-action label, e.g. `Get ₹10 cashback on Acme`.
    pub fn button_label(&self) -> String {
        format!("Get ₹{} cashback on {}", self.cashback_amount(), self.offer.brand)
    }

    pub fn modal_title(&self) -> String {
        format!("Claim your cashback on {}", self.offer.brand)
    }
}

/// The creator's share of the offer commission, rounded half up.
pub fn cashback_amount(base_commission_pct: f64, share_pct: f64) -> i64 {
    (base_commission_pct * (share_pct / 100.0) + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(base: f64, share: f64, brand: &str) -> ResolvedLink {
        ResolvedLink {
            offer: Offer {
                offer_id: "O1".into(),
                brand: brand.into(),
                base_commission_pct: base,
                category: None,
                cool_off_days: None,
                status: None,
            },
            campaign: Campaign {
                campaign_id: "C1".into(),
                share_pct: share,
                name: None,
                tenant_id: None,
            },
            link: SmartLink {
                link_id: "lnk_1".into(),
                campaign_id: "C1".into(),
                offer_id: "O1".into(),
                slug: None,
                smart_link: None,
            },
            created: false,
        }
    }

    #[test]
    fn label_uses_share_of_commission() {
        let link = resolved(50.0, 20.0, "Acme");
        assert_eq!(link.cashback_amount(), 10);
        assert_eq!(link.button_label(), "Get ₹10 cashback on Acme");
        assert_eq!(link.modal_title(), "Claim your cashback on Acme");
    }

    #[test]
    fn amounts_round_half_up() {
        assert_eq!(cashback_amount(12.5, 20.0), 3); // 2.5
        assert_eq!(cashback_amount(7.0, 30.0), 2); // 2.1
        assert_eq!(cashback_amount(8.0, 30.0), 2); // 2.4
        assert_eq!(cashback_amount(9.0, 50.0), 5); // 4.5
        assert_eq!(cashback_amount(0.0, 80.0), 0);
    }
}
