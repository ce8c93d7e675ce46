pub mod flow;
pub mod validation;

pub use flow::{ClaimError, ClaimFlow, ClaimState, Redirect};
