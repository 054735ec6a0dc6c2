pub mod album;
pub mod error;
pub mod mapping;
pub mod song;

pub use error::{ServiceError, ServiceResult};
