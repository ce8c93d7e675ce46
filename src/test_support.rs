//! In-memory backend for unit tests

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::*;

#[derive(Clone)]
pub enum Reply<T> {
    Ok(T),
    Rejected(u16, Option<String>),
    Down,
}

impl<T: Clone> Reply<T> {
    fn into_result(self) -> Result<T> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::Rejected(status, detail) => Err(AppError::backend(status, detail)),
            Reply::Down => Err(AppError::service_unavailable("fake")),
        }
    }
}

pub struct FakeApi {
    offers: Vec<Offer>,
    campaigns: Vec<Campaign>,
    links: Mutex<Vec<SmartLink>>,
    otp_reply: Mutex<Reply<OtpRequested>>,
    verify_reply: Mutex<Reply<OtpVerification>>,
    calls: Mutex<Vec<String>>,
    clicks: Mutex<Vec<ClickEvent>>,
}

impl FakeApi {
    /// Acme (O1, 50%) and Globex (O2, 30%) offers, campaign C1 sharing 20%.
    pub fn catalogue() -> Self {
        Self {
            offers: vec![offer("O1", "Acme", 50.0), offer("O2", "Globex", 30.0)],
            campaigns: vec![Campaign {
                campaign_id: "C1".into(),
                share_pct: 20.0,
                name: Some("Summer".into()),
                tenant_id: Some("tenant_1".into()),
            }],
            links: Mutex::new(Vec::new()),
            otp_reply: Mutex::new(Reply::Ok(OtpRequested {
                request_id: "req_1".into(),
                message: Some("OTP sent successfully".into()),
            })),
            verify_reply: Mutex::new(Reply::Ok(OtpVerification {
                verified: true,
                merchant_url: Some("https://merchant.example/landing?click_id=abc".into()),
                message: None,
                detail: None,
            })),
            calls: Mutex::new(Vec::new()),
            clicks: Mutex::new(Vec::new()),
        }
    }

    pub fn with_link(self, link_id: &str, campaign_id: &str, offer_id: &str) -> Self {
        self.links.lock().push(SmartLink {
            link_id: link_id.into(),
            campaign_id: campaign_id.into(),
            offer_id: offer_id.into(),
            slug: None,
            smart_link: None,
        });
        self
    }

    pub fn set_otp_reply(&self, reply: Reply<OtpRequested>) {
        *self.otp_reply.lock() = reply;
    }

    pub fn set_verify_reply(&self, reply: Reply<OtpVerification>) {
        *self.verify_reply.lock() = reply;
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn clicks(&self) -> Vec<ClickEvent> {
        self.clicks.lock().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().push(call.to_string());
    }
}

fn offer(id: &str, brand: &str, pct: f64) -> Offer {
    Offer {
        offer_id: id.into(),
        brand: brand.into(),
        base_commission_pct: pct,
        category: None,
        cool_off_days: None,
        status: None,
    }
}

#[async_trait]
impl HissabackApi for FakeApi {
    async fn list_offers(&self) -> Result<Vec<Offer>> {
        self.record("list_offers");
        Ok(self.offers.clone())
    }

    async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        self.record("list_campaigns");
        Ok(self.campaigns.clone())
    }

    async fn list_links(&self) -> Result<Vec<SmartLink>> {
        self.record("list_links");
        Ok(self.links.lock().clone())
    }

    async fn create_link(&self, request: &CreateLinkRequest) -> Result<SmartLink> {
        self.record("create_link");
        let mut links = self.links.lock();
        let link = SmartLink {
            link_id: format!("lnk_{}", links.len() + 100),
            campaign_id: request.campaign_id.clone(),
            offer_id: request.offer_id.clone(),
            slug: None,
            smart_link: None,
        };
        links.push(link.clone());
        Ok(link)
    }

    async fn request_otp(&self, _request: &OtpRequest) -> Result<OtpRequested> {
        self.record("request_otp");
        self.otp_reply.lock().clone().into_result()
    }

    async fn verify_otp(&self, _request: &OtpVerifyRequest) -> Result<OtpVerification> {
        self.record("verify_otp");
        self.verify_reply.lock().clone().into_result()
    }

    async fn track_click(&self, event: &ClickEvent) -> Result<ClickRecord> {
        self.record("track_click");
        self.clicks.lock().push(event.clone());
        Ok(ClickRecord {
            click_id: "click_1".into(),
            link_id: event.link_id.clone(),
            user_id: event.user_id.clone(),
            timestamp: None,
        })
    }

    async fn user_payouts(&self, _user_id: &str) -> Result<UserPayouts> {
        self.record("user_payouts");
        Ok(UserPayouts::default())
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.record("health");
        Ok(HealthStatus {
            status: "healthy".into(),
            timestamp: None,
        })
    }
}
