//! Nucleus: command-line front-end and interactive session for the Nucleus
//! language.
//!
//! The crate classifies an invocation into an [`cli::Action`], validates
//! source paths, and drives an external execution engine through the narrow
//! [`engine::Engine`] boundary, either once or from a read-evaluate session.
//!
//! # Quick start
//!
//! ```no_run
//! use nucleus::engine::ProcessEngine;
//! use nucleus::session::{Session, StreamChannel};
//!
//! # async fn example() {
//! let engine = ProcessEngine::new("nucleus-vm", Vec::new(), "--eval");
//! let channel = StreamChannel::stdio("nucleus", true);
//! let summary = Session::new(&engine).run(channel).await.unwrap();
//! println!("{} lines evaluated", summary.evaluated);
//! # }
//! ```

pub mod app;
pub mod build_info;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod paths;
pub mod session;
#[cfg(test)]
pub mod testsupport;
pub mod ui;
