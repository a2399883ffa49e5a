#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for trustrank
//!
//! This library holds all functionality of the trustrank tool, which scores open-source
//! packages on how trustworthy their repositories look and ranks them against each other.
//!
//! # Module Organization
//!
//! - [`facts`]: Repository facts and the snapshot they are loaded from
//! - [`analysis`]: Static analysis used by the correctness metric
//! - [`metrics`]: Per-repository metrics and cohort normalization
//! - [`scoring`]: Aggregation, ranking, and run orchestration
//! - [`reports`]: Report generation in multiple formats
//! - [`commands`]: Command-line interface

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod analysis;
#[cfg(not(any(debug_assertions, test)))]
mod analysis;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod facts;
#[cfg(not(any(debug_assertions, test)))]
mod facts;

#[cfg(any(debug_assertions, test))]
pub mod metrics;
#[cfg(not(any(debug_assertions, test)))]
mod metrics;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

#[cfg(any(debug_assertions, test))]
pub mod scoring;
#[cfg(not(any(debug_assertions, test)))]
mod scoring;

pub use crate::commands::{Host, run};
