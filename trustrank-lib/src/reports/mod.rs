//! Report generation for scored repositories
//!
//! Every generator takes a slice of [`ScoredRepository`](crate::scoring::ScoredRepository)
//! values (owned or borrowed) together with the [`MetricSet`](crate::metrics::MetricSet)
//! that produced them, and writes to any `core::fmt::Write`. Generators emit rows in the
//! order they are given; callers pass ranked repositories for the human-facing reports
//! and input order for score records.
//!
//! - **Table**: the space-separated `URL <metric names...>` report
//! - **Records**: one JSON [`ScoreRecord`] per line, weighted with the fixed record weights
//! - **CSV**: `url,score,<metric names...>` rows
//! - **Console**: ranked blocks with optional ANSI colors

mod common;
mod console;
mod csv;
mod records;
mod table;

pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use records::{ScoreRecord, generate as generate_records};
pub use table::generate as generate_table;
