//! Wire models for the Hissaback backend endpoints the widget consumes

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ============================================================================
// CATALOGUE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub offer_id: String,
    pub brand: String,
    pub base_commission_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cool_off_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub campaign_id: String,
    pub share_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignList {
    pub campaigns: Vec<Campaign>,
}

// ============================================================================
// SMART LINKS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartLink {
    pub link_id: String,
    pub campaign_id: String,
    pub offer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Shareable `/go/{slug}` URL with tracking macros.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smart_link: Option<String>,
}

impl SmartLink {
    pub fn matches(&self, campaign_id: &str, offer_id: &str) -> bool {
        self.campaign_id == campaign_id && self.offer_id == offer_id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkList {
    pub links: Vec<SmartLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLinkRequest {
    pub campaign_id: String,
    pub offer_id: String,
}

// ============================================================================
// END-USER OTP
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRequest {
    pub phone: String,
    pub link_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRequested {
    pub request_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerifyRequest {
    pub request_id: String,
    pub code: String,
    pub link_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerification {
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub merchant_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Some backends answer 200 with a `detail` instead of an error status.
    #[serde(default)]
    pub detail: Option<String>,
}

/// Verification handle kept between "send" and "verify".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpSession {
    pub request_id: String,
    pub phone: String,
}

// ============================================================================
// EVENTS & REWARDS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickEvent {
    pub link_id: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickRecord {
    pub click_id: String,
    pub link_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payout {
    pub payout_id: String,
    pub user_id: String,
    pub amount: f64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub voucher_code: Option<String>,
    #[serde(default)]
    pub ledger_ids: Vec<String>,
    #[serde(default)]
    pub ts_paid: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPayouts {
    pub payouts: Vec<Payout>,
    #[serde(default)]
    pub count: usize,
}

impl UserPayouts {
    pub fn total_amount(&self) -> f64 {
        self.payouts.iter().map(|p| p.amount).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_tolerates_extra_backend_fields() {
        let json = r#"{
            "offer_id": "O1",
            "trackier_campaign_id": "tc_1",
            "advertiser_id": "adv_1",
            "brand": "Acme",
            "category": "Fashion",
            "base_commission_pct": 50,
            "cool_off_days": 30,
            "status": "active",
            "exposed_via_api": true
        }"#;
        let offer: Offer = serde_json::from_str(json).unwrap();
        assert_eq!(offer.brand, "Acme");
        assert_eq!(offer.base_commission_pct, 50.0);
        assert_eq!(offer.cool_off_days, Some(30));
    }

    #[test]
    fn payouts_parse_python_timestamps() {
        let json = r#"{"payouts":[{"payout_id":"payout_1","user_id":"9876543210","amount":12.5,
            "method":"amazon_gv","voucher_code":"AGC-1A2B3C4D","ledger_ids":["l1"],
            "ts_paid":"2025-07-01T10:15:30.123456"}],"count":1}"#;
        let payouts: UserPayouts = serde_json::from_str(json).unwrap();
        assert_eq!(payouts.count, 1);
        assert!(payouts.payouts[0].ts_paid.is_some());
        assert_eq!(payouts.total_amount(), 12.5);
    }

    #[test]
    fn link_matching_requires_both_ids() {
        let link = SmartLink {
            link_id: "lnk_1".into(),
            campaign_id: "C1".into(),
            offer_id: "O1".into(),
            slug: None,
            smart_link: None,
        };
        assert!(link.matches("C1", "O1"));
        assert!(!link.matches("C1", "O2"));
        assert!(!link.matches("C2", "O1"));
    }
}
