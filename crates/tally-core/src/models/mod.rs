//! Data models.

pub mod batch;
pub mod config;
pub mod invoice;
