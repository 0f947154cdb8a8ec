pub mod api;
pub mod error;
pub mod models;

pub use api::{ApiClient, Gateway};
pub use error::Error;
