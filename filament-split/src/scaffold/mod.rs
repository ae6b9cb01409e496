//! Resource modularizer implementation
//!
//! Splits a generated Filament resource into a form schema, a table schema
//! and per-group field classes, then rewires the resource to delegate to
//! them.

pub mod extractor;
pub mod generator;
pub mod helpers;
pub mod names;
pub mod rewriter;
pub mod scanner;
pub mod templates;

pub use extractor::{ExtractedBlock, SchemaMethod};
pub use generator::{write_files, FileKind, GeneratedFile, Modularizer, Plan, WriteReport};
pub use helpers::TemplateHelpers;
pub use names::{FieldGroups, ResourceName};
pub use scanner::MethodSpan;
