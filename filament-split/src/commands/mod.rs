//! CLI command implementations

pub mod split;

pub use split::{SplitCommand, SplitSummary};
