pub mod connectivity;
pub mod fallback;
pub mod health;
pub mod metrics;
