pub mod json;
pub mod resource;

pub use crate::utils::error::Result;
