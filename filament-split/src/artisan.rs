//! Generator invocation
//!
//! Builds the `php artisan make:filament-resource` command line and runs it
//! as a blocking subprocess. The working directory is handed to the
//! subprocess directly; the process-wide current directory is never changed.

use crate::config::Settings;
use crate::error::{Result, SplitError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Boolean options forwarded verbatim to the generator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct GeneratorFlags {
    /// Create the Eloquent model if it does not exist
    #[arg(long)]
    pub model: bool,
    /// Create a migration for the model
    #[arg(long)]
    pub migration: bool,
    /// Create a model factory
    #[arg(long)]
    pub factory: bool,
    /// Generate form fields and table columns from the database columns
    #[arg(long)]
    pub generate: bool,
    /// Generate a simple (modal) resource
    #[arg(long)]
    pub simple: bool,
    /// Generate a view page
    #[arg(long)]
    pub view: bool,
    /// Add soft-delete handling
    #[arg(long)]
    pub soft_deletes: bool,
    /// Overwrite files that already exist
    #[arg(long)]
    pub force: bool,
}

impl GeneratorFlags {
    /// Command-line options for the enabled flags, in a fixed order
    #[must_use]
    pub fn to_args(self) -> Vec<&'static str> {
        [
            (self.model, "--model"),
            (self.migration, "--migration"),
            (self.factory, "--factory"),
            (self.generate, "--generate"),
            (self.simple, "--simple"),
            (self.view, "--view"),
            (self.soft_deletes, "--soft-deletes"),
            (self.force, "--force"),
        ]
        .into_iter()
        .filter_map(|(enabled, arg)| enabled.then_some(arg))
        .collect()
    }
}

/// A fully specified generator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInvocation {
    /// Program to execute
    pub program: String,
    /// Arguments after the program
    pub args: Vec<String>,
    /// Directory the program runs in
    pub working_dir: PathBuf,
}

impl GeneratorInvocation {
    /// Build the invocation for `model` in `project_root`
    #[must_use]
    pub fn new(settings: &Settings, model: &str, flags: GeneratorFlags, project_root: &Path) -> Self {
        let mut args = vec![
            settings.artisan.clone(),
            settings.generator_command.clone(),
            model.to_string(),
        ];
        args.extend(flags.to_args().into_iter().map(String::from));

        Self {
            program: settings.php_binary.clone(),
            args,
            working_dir: project_root.to_path_buf(),
        }
    }

    /// Command line as shown to the user
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the generator and require a zero exit status
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::GeneratorSpawn`] if the process cannot start and
    /// [`SplitError::GeneratorFailed`] if it exits unsuccessfully.
    pub fn run(&self, runner: &dyn CommandRunner) -> Result<()> {
        tracing::info!(command = %self.display(), dir = %self.working_dir.display(), "running generator");

        let status = runner.run(self).map_err(|source| SplitError::GeneratorSpawn {
            command: self.display(),
            source,
        })?;

        if status.success {
            Ok(())
        } else {
            Err(SplitError::GeneratorFailed {
                command: self.display(),
                code: status.code,
            })
        }
    }
}

/// Exit status of a finished subprocess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// Whether the process exited with status zero
    pub success: bool,
    /// Exit code, absent when terminated by a signal
    pub code: Option<i32>,
}

/// Executes generator invocations
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run `invocation` to completion
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or waited on.
    fn run(&self, invocation: &GeneratorInvocation) -> std::io::Result<RunStatus>;
}

/// Runs invocations as real subprocesses with inherited stdio
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &GeneratorInvocation) -> std::io::Result<RunStatus> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .status()?;

        Ok(RunStatus {
            success: status.success(),
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(flags: GeneratorFlags) -> GeneratorInvocation {
        GeneratorInvocation::new(&Settings::default(), "Employee", flags, Path::new("/srv/app"))
    }

    #[test]
    fn test_no_flags() {
        let inv = invocation(GeneratorFlags::default());
        assert_eq!(inv.program, "php");
        assert_eq!(inv.args, vec!["artisan", "make:filament-resource", "Employee"]);
        assert_eq!(inv.working_dir, PathBuf::from("/srv/app"));
        assert_eq!(inv.display(), "php artisan make:filament-resource Employee");
    }

    #[test]
    fn test_all_flags_forwarded() {
        let flags = GeneratorFlags {
            model: true,
            migration: true,
            factory: true,
            generate: true,
            simple: true,
            view: true,
            soft_deletes: true,
            force: true,
        };
        assert_eq!(
            flags.to_args(),
            vec![
                "--model",
                "--migration",
                "--factory",
                "--generate",
                "--simple",
                "--view",
                "--soft-deletes",
                "--force"
            ]
        );
    }

    #[test]
    fn test_some_flags_forwarded() {
        let flags = GeneratorFlags {
            soft_deletes: true,
            view: true,
            ..GeneratorFlags::default()
        };
        let inv = invocation(flags);
        assert_eq!(
            inv.display(),
            "php artisan make:filament-resource Employee --view --soft-deletes"
        );
    }

    #[test]
    fn test_run_success() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|inv| inv.working_dir == Path::new("/srv/app"))
            .times(1)
            .returning(|_| Ok(RunStatus { success: true, code: Some(0) }));

        assert!(invocation(GeneratorFlags::default()).run(&runner).is_ok());
    }

    #[test]
    fn test_run_non_zero_exit() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(RunStatus { success: false, code: Some(1) }));

        let err = invocation(GeneratorFlags::default()).run(&runner).unwrap_err();
        assert!(matches!(err, SplitError::GeneratorFailed { code: Some(1), .. }));
    }

    #[test]
    fn test_run_spawn_failure() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|_| {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "php: not found"))
        });

        let err = invocation(GeneratorFlags::default()).run(&runner).unwrap_err();
        assert!(matches!(err, SplitError::GeneratorSpawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_reports_exit_status() {
        let temp_dir = tempfile::tempdir().unwrap();
        let inv = GeneratorInvocation {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "test -d . && exit 3".to_string()],
            working_dir: temp_dir.path().to_path_buf(),
        };
        let status = ProcessRunner.run(&inv).unwrap();
        assert_eq!(status, RunStatus { success: false, code: Some(3) });
    }
}
