//! Phone/OTP claim state machine for one mounted widget.
//!
//! `Idle -> AwaitingPhone -> AwaitingOtp -> Verified -> Redirecting`. A failed
//! send or verify leaves the flow where it was so the user can retry; closing
//! the modal drops back to `Idle` without telling the backend.

use super::validation::{is_valid_otp, is_valid_phone};
use shared::{ClickEvent, HissabackApi, OtpRequest, OtpSession, OtpVerifyRequest, SmartLink};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const SEND_OTP_FALLBACK: &str = "Failed to send OTP";
pub const VERIFY_OTP_FALLBACK: &str = "Invalid OTP";
pub const SUCCESS_MESSAGE: &str = "Success! Redirecting...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimState {
    Idle,
    AwaitingPhone,
    AwaitingOtp(OtpSession),
    Verified { merchant_url: String },
    Redirecting { merchant_url: String },
}

impl ClaimState {
    pub fn name(&self) -> &'static str {
        match self {
            ClaimState::Idle => "idle",
            ClaimState::AwaitingPhone => "awaiting_phone",
            ClaimState::AwaitingOtp(_) => "awaiting_otp",
            ClaimState::Verified { .. } => "verified",
            ClaimState::Redirecting { .. } => "redirecting",
        }
    }
}

/// Errors surfaced to the end user. `Display` is the alert text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimError {
    #[error("Enter valid phone")]
    InvalidPhone,

    #[error("Enter 6-digit OTP")]
    InvalidOtp,

    #[error("{}", .detail.as_deref().unwrap_or(SEND_OTP_FALLBACK))]
    OtpRequestFailed { detail: Option<String> },

    #[error("{}", .detail.as_deref().unwrap_or(VERIFY_OTP_FALLBACK))]
    VerificationFailed { detail: Option<String> },

    #[error("Claim flow is {actual}, expected {expected}")]
    WrongState {
        expected: &'static str,
        actual: &'static str,
    },
}

impl ClaimError {
    pub fn alert_message(&self) -> String {
        self.to_string()
    }

    /// A control fired outside its step. Not meant for the end user.
    pub fn is_out_of_step(&self) -> bool {
        matches!(self, ClaimError::WrongState { .. })
    }
}

/// Where to send the user and how long to wait first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub merchant_url: String,
    pub delay: Duration,
}

pub struct ClaimFlow {
    api: Arc<dyn HissabackApi>,
    link: SmartLink,
    state: ClaimState,
    flow_id: Uuid,
}

impl ClaimFlow {
    pub fn new(api: Arc<dyn HissabackApi>, link: SmartLink) -> Self {
        Self {
            api,
            link,
            state: ClaimState::Idle,
            flow_id: Uuid::new_v4(),
        }
    }

    pub fn state(&self) -> &ClaimState {
        &self.state
    }

    pub fn link(&self) -> &SmartLink {
        &self.link
    }

    pub fn flow_id(&self) -> Uuid {
        self.flow_id
    }

    /// Primary button clicked. Re-opening an already open flow is a no-op.
    pub fn open(&mut self) -> Result<(), ClaimError> {
        match self.state {
            ClaimState::Idle => {
                self.state = ClaimState::AwaitingPhone;
                info!("🪟 [{}] Claim modal opened for link {}", self.flow_id, self.link.link_id);
                Ok(())
            }
            ClaimState::AwaitingPhone | ClaimState::AwaitingOtp(_) => Ok(()),
            _ => Err(self.wrong_state("idle")),
        }
    }

    /// Modal closed. Any pending OTP session is dropped.
    pub fn cancel(&mut self) {
        match self.state {
            ClaimState::AwaitingPhone | ClaimState::AwaitingOtp(_) => {
                info!("🚪 [{}] Claim abandoned in state {}", self.flow_id, self.state.name());
                self.state = ClaimState::Idle;
            }
            _ => {}
        }
    }

    /// Step check, then phone check. Nothing is sent.
    pub fn prepare_otp_request(&self, phone: &str) -> Result<OtpRequest, ClaimError> {
        if !matches!(self.state, ClaimState::AwaitingPhone) {
            return Err(self.wrong_state("awaiting_phone"));
        }
        if !is_valid_phone(phone) {
            return Err(ClaimError::InvalidPhone);
        }

        Ok(OtpRequest {
            phone: phone.to_string(),
            link_id: self.link.link_id.clone(),
        })
    }

    /// `AwaitingPhone -> AwaitingOtp`
    pub async fn send_otp(&mut self, phone: &str) -> Result<&OtpSession, ClaimError> {
        let request = self.prepare_otp_request(phone)?;
        self.submit_otp_request(request).await
    }

    /// Sends a request built by [`ClaimFlow::prepare_otp_request`].
    pub async fn submit_otp_request(&mut self, request: OtpRequest) -> Result<&OtpSession, ClaimError> {
        if !matches!(self.state, ClaimState::AwaitingPhone) {
            return Err(self.wrong_state("awaiting_phone"));
        }

        match self.api.request_otp(&request).await {
            Ok(reply) => {
                info!("📨 [{}] OTP requested, request_id={}", self.flow_id, reply.request_id);
                self.state = ClaimState::AwaitingOtp(OtpSession {
                    request_id: reply.request_id,
                    phone: request.phone,
                });
                match &self.state {
                    ClaimState::AwaitingOtp(session) => Ok(session),
                    _ => Err(self.wrong_state("awaiting_otp")),
                }
            }
            Err(e) => {
                warn!("❌ [{}] OTP request failed: {} ({})", self.flow_id, e, e.error_code());
                Err(ClaimError::OtpRequestFailed {
                    detail: e.detail().map(str::to_string),
                })
            }
        }
    }

    /// Step check, then code check. Nothing is sent.
    pub fn prepare_verification(&self, code: &str) -> Result<OtpVerifyRequest, ClaimError> {
        let session = match &self.state {
            ClaimState::AwaitingOtp(session) => session,
            _ => return Err(self.wrong_state("awaiting_otp")),
        };
        if !is_valid_otp(code) {
            return Err(ClaimError::InvalidOtp);
        }

        Ok(OtpVerifyRequest {
            request_id: session.request_id.clone(),
            code: code.to_string(),
            link_id: self.link.link_id.clone(),
        })
    }

    /// `AwaitingOtp -> Verified`. On success the click is recorded before
    /// the merchant URL is returned.
    pub async fn verify_otp(&mut self, code: &str) -> Result<String, ClaimError> {
        let request = self.prepare_verification(code)?;
        self.submit_verification(request).await
    }

    /// Sends a request built by [`ClaimFlow::prepare_verification`].
    pub async fn submit_verification(&mut self, request: OtpVerifyRequest) -> Result<String, ClaimError> {
        let session = match &self.state {
            ClaimState::AwaitingOtp(session) => session.clone(),
            _ => return Err(self.wrong_state("awaiting_otp")),
        };

        let verification = match self.api.verify_otp(&request).await {
            Ok(v) => v,
            Err(e) => {
                warn!("❌ [{}] OTP verification failed: {} ({})", self.flow_id, e, e.error_code());
                return Err(ClaimError::VerificationFailed {
                    detail: e.detail().map(str::to_string),
                });
            }
        };

        if !verification.verified {
            warn!("❌ [{}] Backend did not verify request {}", self.flow_id, session.request_id);
            return Err(ClaimError::VerificationFailed {
                detail: verification.detail,
            });
        }

        let merchant_url = match verification.merchant_url {
            Some(raw) => match url::Url::parse(&raw) {
                Ok(_) => raw,
                Err(e) => {
                    error!("🚫 [{}] Unusable merchant_url from backend: {}", self.flow_id, e);
                    return Err(ClaimError::VerificationFailed { detail: None });
                }
            },
            None => {
                error!("🚫 [{}] Verified response without merchant_url", self.flow_id);
                return Err(ClaimError::VerificationFailed { detail: None });
            }
        };

        self.track_click(&session.phone).await;

        info!("✅ [{}] OTP verified, merchant URL resolved", self.flow_id);
        self.state = ClaimState::Verified {
            merchant_url: merchant_url.clone(),
        };
        Ok(merchant_url)
    }

    /// `Verified -> Redirecting`
    pub fn begin_redirect(&mut self, delay: Duration) -> Result<Redirect, ClaimError> {
        let merchant_url = match &self.state {
            ClaimState::Verified { merchant_url } => merchant_url.clone(),
            _ => return Err(self.wrong_state("verified")),
        };

        info!("➡️ [{}] Redirecting in {:?}", self.flow_id, delay);
        self.state = ClaimState::Redirecting {
            merchant_url: merchant_url.clone(),
        };
        Ok(Redirect {
            merchant_url,
            delay,
        })
    }

    /// The outcome does not affect the claim.
    async fn track_click(&self, phone: &str) {
        let event = ClickEvent {
            link_id: self.link.link_id.clone(),
            user_id: Some(phone.to_string()),
        };
        match self.api.track_click(&event).await {
            Ok(record) => info!("📊 [{}] Click tracked: {}", self.flow_id, record.click_id),
            Err(e) => warn!("⚠️ [{}] Click tracking failed: {}", self.flow_id, e),
        }
    }

    fn wrong_state(&self, expected: &'static str) -> ClaimError {
        ClaimError::WrongState {
            expected,
            actual: self.state.name(),
        }
    }
}
