pub mod analysis;
pub mod cors;
pub mod error;
pub mod health;
pub mod info;
pub mod openapi;
