//! Source composition for configuration loading.

pub mod merge_policy;
pub mod service;
