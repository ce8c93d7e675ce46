//! Shared library for the Hissaback widget
//!
//! This library contains functionality common to the widget crates:
//! - Backend wire models
//! - Error handling
//! - Environment configuration
//! - HTTP client for the Hissaback backend

pub mod config;
pub mod error;
pub mod models;
pub mod service_client;

// Re-export commonly used types
pub use config::{Config, WidgetSettings};
pub use error::{AppError, Result};
pub use models::*;
pub use service_client::{HissabackApi, HissabackClient, ServiceClient};
