pub mod claim;
pub mod links;

// Re-export domain modules for easier access
pub use claim as claim_flow;
pub use links as link_resolver;
