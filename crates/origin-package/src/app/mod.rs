//! Application layer orchestrating domain logic and infrastructure.

pub mod opener;
pub mod report;
pub mod request;
