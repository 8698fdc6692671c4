pub mod auth;
pub mod error;
pub mod helpers;
pub mod market;
pub mod portfolio;
pub mod search;

pub use error::{FolioError, Result};
