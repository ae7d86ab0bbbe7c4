//! Infrastructure adapters for attributes, package locations, launching, config, and logging.

pub mod attributes;
pub mod config;
pub mod launcher;
pub mod locations;
pub mod logging;
