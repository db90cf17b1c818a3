//! Data model and the pure filtering / ranking / classification pipeline.

pub mod classify;
pub mod compare;
pub mod config;
pub mod format;
pub mod platform;
pub mod ranking;
pub mod table;
pub mod timing;
