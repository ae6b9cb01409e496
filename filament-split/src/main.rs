//! filament-split CLI tool

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use filament_split_lib::{observability, GeneratorFlags, SplitCommand};
use std::path::PathBuf;

#[derive(Parser)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "filament-split")]
#[command(version)]
#[command(
    about = "Generate a Filament resource and split it into form, table and field-group files",
    long_about = None
)]
struct Cli {
    /// Resource name (e.g. `Employee`)
    name: String,

    /// Comma-separated field groups (default: PersonalFields,SalaryFields,LeaveFields)
    #[arg(long)]
    fields: Option<String>,

    #[command(flatten)]
    flags: GeneratorFlags,

    /// Laravel project root
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Split an existing resource without running the generator
    #[arg(long)]
    skip_generator: bool,

    /// Fail instead of using default bodies when `form` or `table` is missing
    #[arg(long)]
    strict: bool,

    /// Show what would be written without touching any file
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose)?;

    let cmd = SplitCommand {
        name: cli.name,
        fields: cli.fields,
        flags: cli.flags,
        project_root: cli.project_root,
        skip_generator: cli.skip_generator,
        strict: cli.strict,
        dry_run: cli.dry_run,
    };
    cmd.execute()
}
