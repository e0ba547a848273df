//! Docrank Core Library
//!
//! Priority scoring, TF-IDF similarity and recommendation for a tracked set
//! of markdown documents.

pub mod cache;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod logging;
pub mod metrics;
pub mod priority;
pub mod ranking;
pub mod recommend;
pub mod similarity;
pub mod store;
pub mod text;

pub use engine::Engine;
