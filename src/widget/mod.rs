//! Rendering surface and driver for a mounted widget

pub mod mount;
pub mod recording;

pub use mount::{mount, MountOutcome, MountedWidget};
pub use recording::{HostEvent, RecordingHost};

/// Controls that get disabled while their own request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    SendOtp,
    VerifyOtp,
}

/// What the widget needs from the page it is mounted into.
///
/// Implementations own all presentation; the widget only decides what to
/// show and when.
pub trait WidgetHost: Send + Sync {
    fn has_container(&self, container_id: &str) -> bool;

    /// Replace the container's content with plain text.
    fn render_error(&self, container_id: &str, message: &str);

    fn render_button(&self, container_id: &str, style: &str, label: &str);

    /// Build a fresh, hidden modal asking for the phone number.
    fn render_modal(&self, title: &str);

    fn set_modal_visible(&self, visible: bool);

    /// Swap the phone step for the OTP step and lock the phone input.
    fn show_otp_step(&self);

    fn set_control_enabled(&self, control: Control, enabled: bool);

    /// Blocking notice to the user.
    fn alert(&self, message: &str);

    fn show_success(&self, message: &str);

    fn navigate(&self, url: &str);
}
