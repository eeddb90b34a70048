//! Config composition: source ordering and defaults.

mod merge_policy;
pub mod service;

pub use service::MergeService;
