//! Rule-based scoring of a cricket cover drive from per-frame body landmarks.
//!
//! Per-frame geometry lives in [`metrics`], the whole-shot reduction in
//! [`evaluate`]. Everything else feeds landmarks in or carries results out.

pub mod config;
pub mod cues;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod metrics;
pub mod point;
pub mod pose;
pub mod provider;

pub use config::Config;
pub use error::Error;
pub use evaluate::{evaluate_shot, Category, CategoryScore, ShotEvaluation};
pub use metrics::{Extractor, FrameMetrics};
