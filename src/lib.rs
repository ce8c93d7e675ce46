//! Hissaback cashback widget.
//!
//! Reads the embedding tag's configuration, resolves (or creates) the smart
//! link for the configured campaign/offer pair, and drives the phone/OTP claim
//! flow that ends in a tracked redirect to the merchant. Presentation is left
//! to a [`widget::WidgetHost`] implementation.

pub mod domains;
pub mod embed;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use domains::claim::{ClaimError, ClaimFlow, ClaimState};
pub use domains::links::{resolve_link, LinkResolver, ResolvedLink, SETUP_ERROR_MESSAGE};
pub use embed::{HostPage, WidgetConfig};
pub use widget::{mount, MountOutcome, MountedWidget, WidgetHost};
