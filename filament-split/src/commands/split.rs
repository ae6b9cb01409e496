//! Split command
//!
//! Runs the Filament resource generator, then splits the generated resource
//! into a form schema, a table schema and one class per field group:
//!
//! ```bash
//! filament-split Employee --fields "PersonalFields, SalaryFields" --model --migration
//! ```

use crate::artisan::{CommandRunner, GeneratorFlags, GeneratorInvocation, ProcessRunner};
use crate::config::Settings;
use crate::scaffold::{
    write_files, FieldGroups, FileKind, Modularizer, Plan, ResourceName, SchemaMethod, WriteReport,
};
use anyhow::{Context, Result};
use console::{style, Emoji};
use similar::{ChangeTag, TextDiff};
use std::path::{Path, PathBuf};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "x ");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "! ");
static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Generate and split one Filament resource
#[derive(Debug, Clone)]
pub struct SplitCommand {
    /// Resource name as typed by the user
    pub name: String,
    /// Comma-separated field groups; configured groups when absent
    pub fields: Option<String>,
    /// Options forwarded to the generator
    pub flags: GeneratorFlags,
    /// Laravel project root
    pub project_root: PathBuf,
    /// Split an existing resource without running the generator
    pub skip_generator: bool,
    /// Fail when `form` or `table` is missing
    pub strict: bool,
    /// Print the plan without writing anything
    pub dry_run: bool,
}

/// What a split run did
#[derive(Debug, Default)]
pub struct SplitSummary {
    /// Files created or modified on disk
    pub written: Vec<PathBuf>,
    /// Files that would be written (dry run only)
    pub planned: Vec<PathBuf>,
    /// Methods that got fallback bodies
    pub fallbacks: Vec<SchemaMethod>,
}

impl SplitCommand {
    /// Execute the command with real subprocesses
    ///
    /// # Errors
    ///
    /// Returns an error if the generator fails, the resource file is missing
    /// or malformed, or any file cannot be written.
    pub fn execute(&self) -> Result<()> {
        self.execute_with(&ProcessRunner).map(|_| ())
    }

    /// Execute the command with the given generator runner
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub fn execute_with(&self, runner: &dyn CommandRunner) -> Result<SplitSummary> {
        let project_root = self
            .project_root
            .canonicalize()
            .with_context(|| format!("Project directory not found: {}", self.project_root.display()))?;

        let mut settings = Settings::load(&project_root).context("Failed to load configuration")?;
        if self.strict {
            settings.strict_extraction = true;
        }

        let resource = ResourceName::parse(&self.name, &settings.resource_suffix)?;
        let groups = match &self.fields {
            Some(list) => FieldGroups::parse(list)?,
            None => FieldGroups::from_names(&settings.field_groups)?,
        };

        println!(
            "\n{} {} {}",
            style("Splitting resource").cyan().bold(),
            style(resource.class()).green().bold(),
            style("...").cyan().bold()
        );

        let invocation =
            GeneratorInvocation::new(&settings, resource.model(), self.flags, &project_root);
        let modularizer = Modularizer::new(resource, groups, &settings, &project_root)
            .context("Failed to create modularizer")?;

        if self.skip_generator {
            tracing::info!("generator skipped");
        } else if self.dry_run {
            println!("  Would run: {}", style(invocation.display()).yellow());
            if !modularizer.resource_path().is_file() {
                println!(
                    "  {} is not generated yet; nothing more to preview.",
                    style(modularizer.resource_path().display()).dim()
                );
                return Ok(SplitSummary::default());
            }
        } else {
            println!(
                "\n{} {}",
                style("1.").cyan(),
                style(format!("Running {}", invocation.display())).bold()
            );
            invocation
                .run(runner)
                .context("Generator failed; no files were split")?;
        }

        println!(
            "\n{} {}",
            style("2.").cyan(),
            style(format!("Splitting {}", modularizer.resource_path().display())).bold()
        );
        let plan = modularizer.plan().context("Failed to split resource")?;
        report_fallbacks(&plan);

        if self.dry_run {
            print_plan(&plan, &project_root);
            return Ok(SplitSummary {
                planned: plan.files.iter().map(|f| f.path.clone()).collect(),
                fallbacks: plan.fallbacks,
                ..SplitSummary::default()
            });
        }

        let report = write_files(&plan.files);
        print_report(&plan, &report, &project_root);

        if !report.is_success() {
            anyhow::bail!(
                "{} of {} files could not be written",
                report.failed.len() + report.skipped.len(),
                plan.files.len()
            );
        }

        print_next_steps(&modularizer, &plan);

        Ok(SplitSummary {
            written: report.written,
            fallbacks: plan.fallbacks,
            ..SplitSummary::default()
        })
    }
}

fn print_report(plan: &Plan, report: &WriteReport, project_root: &Path) {
    println!(
        "\n{} {} of {} files:",
        style("Wrote").green().bold(),
        report.written.len(),
        plan.files.len()
    );
    for file in plan.files.iter().filter(|f| report.written.contains(&f.path)) {
        println!(
            "  {CHECK}{} ({})",
            style(relative(&file.path, project_root).display()).dim(),
            style(&file.description).dim()
        );
    }
    for (path, err) in &report.failed {
        println!(
            "  {CROSS}{} {}",
            relative(path, project_root).display(),
            style(err).red()
        );
    }
    for path in &report.skipped {
        println!(
            "  {WARN}{} {}",
            relative(path, project_root).display(),
            style("(left unchanged)").yellow()
        );
    }
}

fn print_next_steps(modularizer: &Modularizer, plan: &Plan) {
    println!(
        "\n{SPARKLE}Resource {} is split!",
        style(modularizer.resource_path().display()).green().bold()
    );
    println!("\n{}", style("Next steps:").cyan().bold());
    println!("  1. Replace the placeholder inputs in each field group");
    if !plan.fallbacks.is_empty() {
        println!("  2. Fill in the default schema bodies flagged above");
    }
}

fn report_fallbacks(plan: &Plan) {
    for method in &plan.fallbacks {
        println!(
            "  {WARN}{} {}",
            style(format!("No `{}` method found;", method.method_name())).yellow(),
            style(format!("{} uses a default body", method.schema_class())).yellow()
        );
    }
}

fn print_plan(plan: &Plan, project_root: &Path) {
    println!("\n{}", style("Dry run, nothing written. Planned files:").bold());
    for file in &plan.files {
        let verb = match file.kind {
            FileKind::Created => style("create").green(),
            FileKind::Modified => style("modify").yellow(),
        };
        println!("  {verb} {}", relative(&file.path, project_root).display());
    }

    if let Some(resource) = plan.modified_resource() {
        println!("\n{}", style(relative(&resource.path, project_root).display()).bold());
        let diff = TextDiff::from_lines(&plan.original, &resource.content);
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Delete => print!("{}", style(format!("-{change}")).red()),
                ChangeTag::Insert => print!("{}", style(format!("+{change}")).green()),
                ChangeTag::Equal => {}
            }
        }
    }
}

fn relative<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
