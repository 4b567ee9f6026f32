#![forbid(unsafe_code)]
//! scantree: a directory tree visualizer with scan metrics, export and an interactive explorer.

pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod explore;
pub mod export;
pub mod logging;
pub mod metrics;
pub mod progress;
pub mod render;
pub mod terminal;
pub mod tree;
