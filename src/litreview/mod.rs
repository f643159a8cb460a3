// src/litreview/mod.rs

pub mod client_wrapper;
pub mod clients;
pub mod config;
pub mod conversation;
pub mod error;
pub mod event;
pub mod extraction;
pub mod feedback;
pub mod papers;
pub mod precheck;
pub mod prompts;
pub mod reference;
pub mod scoring;
pub mod session;
pub mod termination;
pub mod workflow;

// litreview::litreview::ReviewConfig instead of litreview::litreview::config::ReviewConfig
pub use config::ReviewConfig;
pub use error::ReviewError;
