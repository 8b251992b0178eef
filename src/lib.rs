pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod keywords;
pub mod pdf;
pub mod store;

pub use error::{Error, Result};
