//! Story Insights command-line driver
//!
//! Stands in for the hosted data-access layer (rows come from JSON exports
//! on disk) and for the dashboards (reports are printed as JSON or text).

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod input;
pub mod render;
pub mod settings;

pub use commands::{run_check, run_keywords, run_report, CheckOutcome, NamedReport};
pub use settings::{load_config, parse_now, ConfigOverrides};
