use super::{Control, WidgetHost};
use crate::domains::claim::flow::SUCCESS_MESSAGE;
use crate::domains::claim::{ClaimError, ClaimFlow, ClaimState};
use crate::domains::links::{LinkResolver, ResolvedLink, SETUP_ERROR_MESSAGE};
use crate::embed::WidgetConfig;
use shared::{HissabackApi, WidgetSettings};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

pub enum MountOutcome {
    /// Container missing: nothing rendered, no requests made.
    NoContainer,
    /// Setup failed; the container shows the generic error text.
    Failed,
    Mounted(MountedWidget),
}

impl MountOutcome {
    pub fn into_mounted(self) -> Option<MountedWidget> {
        match self {
            MountOutcome::Mounted(widget) => Some(widget),
            _ => None,
        }
    }
}

/// Resolve the link for `config` and render the call-to-action.
pub async fn mount(
    config: WidgetConfig,
    api: Arc<dyn HissabackApi>,
    host: Arc<dyn WidgetHost>,
    settings: &WidgetSettings,
) -> MountOutcome {
    if !host.has_container(&config.container_id) {
        info!("🙈 Container '{}' not found, widget not rendered", config.container_id);
        return MountOutcome::NoContainer;
    }

    let resolved = match LinkResolver::new(api.clone()).resolve(&config).await {
        Ok(resolved) => resolved,
        Err(e) => {
            error!(
                "❌ Widget setup failed for campaign '{}' / offer '{}': {} ({})",
                config.campaign_id,
                config.offer_id,
                e,
                e.error_code()
            );
            host.render_error(&config.container_id, SETUP_ERROR_MESSAGE);
            return MountOutcome::Failed;
        }
    };

    host.render_button(&config.container_id, &config.style, &resolved.button_label());
    host.render_modal(&resolved.modal_title());

    let flow = ClaimFlow::new(api, resolved.link.clone());
    info!(
        "🚀 Widget mounted in '{}' for link {} (flow {})",
        config.container_id,
        resolved.link.link_id,
        flow.flow_id()
    );

    MountOutcome::Mounted(MountedWidget {
        config,
        resolved,
        flow,
        host,
        redirect_delay: settings.redirect_delay(),
    })
}

/// A rendered widget and the claim flow behind it. Event handlers take
/// `&mut self`, so one control's request can't overlap another's.
pub struct MountedWidget {
    config: WidgetConfig,
    resolved: ResolvedLink,
    flow: ClaimFlow,
    host: Arc<dyn WidgetHost>,
    redirect_delay: Duration,
}

impl MountedWidget {
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn resolved(&self) -> &ResolvedLink {
        &self.resolved
    }

    pub fn state(&self) -> &ClaimState {
        self.flow.state()
    }

    pub fn click_button(&mut self) {
        match self.flow.open() {
            Ok(()) => self.host.set_modal_visible(true),
            Err(e) => info!("🔒 Button click ignored: {}", e),
        }
    }

    pub fn close_modal(&mut self) {
        self.flow.cancel();
        self.host.set_modal_visible(false);
        // Reopening starts again from the phone step.
        if matches!(self.flow.state(), ClaimState::Idle) {
            self.host.render_modal(&self.resolved.modal_title());
        }
    }

    /// "Send OTP" pressed. Ignored outside the phone step.
    pub async fn submit_phone(&mut self, phone: &str) -> Result<(), ClaimError> {
        let request = self
            .flow
            .prepare_otp_request(phone)
            .map_err(|e| self.report(e))?;

        self.host.set_control_enabled(Control::SendOtp, false);
        let result = self.flow.submit_otp_request(request).await.map(|_| ());
        self.host.set_control_enabled(Control::SendOtp, true);

        match result {
            Ok(()) => {
                self.host.show_otp_step();
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// "Verify OTP" pressed. Returns the merchant URL navigated to.
    pub async fn submit_otp(&mut self, code: &str) -> Result<String, ClaimError> {
        let request = self
            .flow
            .prepare_verification(code)
            .map_err(|e| self.report(e))?;

        self.host.set_control_enabled(Control::VerifyOtp, false);
        let result = self.flow.submit_verification(request).await;
        self.host.set_control_enabled(Control::VerifyOtp, true);

        if let Err(e) = result {
            return Err(self.report(e));
        }

        self.host.show_success(SUCCESS_MESSAGE);
        let redirect = self.flow.begin_redirect(self.redirect_delay)?;
        tokio::time::sleep(redirect.delay).await;
        self.host.navigate(&redirect.merchant_url);

        Ok(redirect.merchant_url)
    }

    /// Alerts the user, except for controls fired outside their step.
    fn report(&self, error: ClaimError) -> ClaimError {
        if error.is_out_of_step() {
            info!("🔒 Control ignored: {}", error);
        } else {
            self.host.alert(&error.alert_message());
        }
        error
    }
}
