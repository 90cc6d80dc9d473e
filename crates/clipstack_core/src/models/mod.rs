//! Data models for backend records and list rows.

pub mod clip;


pub use clip::{Clip, ClipMetadata, Pastebook, PastebookSummary};
