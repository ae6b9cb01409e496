//! filament-split library
//!
//! Generates a Filament resource with `php artisan make:filament-resource`
//! and splits it into a form schema, a table schema and field-group classes.

#![forbid(unsafe_code)]

pub mod artisan;
pub mod commands;
pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;

pub use artisan::{CommandRunner, GeneratorFlags, GeneratorInvocation, ProcessRunner, RunStatus};
pub use commands::{SplitCommand, SplitSummary};
pub use config::Settings;
pub use error::{ScanError, SplitError};
pub use scaffold::{FieldGroups, Modularizer, ResourceName, SchemaMethod, TemplateHelpers};
