//! Custom extractors for Axum handlers.

pub mod body;

pub use body::JsonOrForm;
