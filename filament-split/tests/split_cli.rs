//! Integration tests for the filament-split binary
//!
//! The artisan generator is replaced with `true`/`false` through the project
//! configuration file, and the resource it would have generated is written
//! up front.

#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const RESOURCE: &str = "<?php

namespace App\\Filament\\Resources;

use App\\Filament\\Resources\\EmployeeResource\\Pages;
use App\\Models\\Employee;
use Filament\\Forms;
use Filament\\Forms\\Form;
use Filament\\Resources\\Resource;
use Filament\\Tables;
use Filament\\Tables\\Table;

class EmployeeResource extends Resource
{
    protected static ?string $model = Employee::class;

    protected static ?string $navigationIcon = 'heroicon-o-rectangle-stack';

    public static function form(Form $form): Form
    {
        return $form
            ->schema([
                Forms\\Components\\TextInput::make('name')
                    ->required()
                    ->maxLength(255),
            ]);
    }

    public static function table(Table $table): Table
    {
        return $table
            ->columns([
                Tables\\Columns\\TextColumn::make('name')
                    ->searchable(),
            ])
            ->actions([
                Tables\\Actions\\EditAction::make(),
            ]);
    }

    public static function getPages(): array
    {
        return [
            'index' => Pages\\ListEmployees::route('/'),
        ];
    }
}
";

/// Helper to create a Laravel-shaped project using `generator` as PHP
fn project(generator: &str, resource: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("filament-split.toml"),
        format!("php_binary = \"{generator}\"\n"),
    )
    .unwrap();
    if let Some(source) = resource {
        fs::create_dir_all(resources(dir.path())).unwrap();
        fs::write(resources(dir.path()).join("EmployeeResource.php"), source).unwrap();
    }
    dir
}

fn resources(root: &Path) -> PathBuf {
    root.join("app/Filament/Resources")
}

fn split(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_filament-split"))
        .arg("--project-root")
        .arg(root)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

#[test]
fn test_split_with_trimmed_field_groups() {
    let project = project("true", Some(RESOURCE));
    let output = split(project.path(), &["Employee", "--fields", " A, B ", "--model"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let dir = resources(project.path()).join("EmployeeResource");
    assert!(dir.join("Fields/A.php").is_file());
    assert!(dir.join("Fields/B.php").is_file());
    assert!(!dir.join("Fields/ A.php").exists());

    let form = read(&dir.join("FormSchema.php"));
    assert!(form.contains("...A::make(),\n            ...B::make(),"));
    assert!(form.contains("use App\\Filament\\Resources\\EmployeeResource\\Fields\\A;"));

    let table = read(&dir.join("TableSchema.php"));
    assert!(table.contains("->searchable(),"));
    assert!(table.contains("Tables\\Actions\\EditAction::make(),"));

    let resource = read(&resources(project.path()).join("EmployeeResource.php"));
    assert_eq!(resource.matches("return FormSchema::make($form);").count(), 1);
    assert_eq!(resource.matches("return TableSchema::make($table);").count(), 1);
    assert!(!resource.contains("->searchable()"));
    assert!(resource.contains("Pages\\ListEmployees::route('/')"));
}

#[test]
fn test_missing_table_gets_default_body() {
    let source = RESOURCE.replace(
        "    public static function table(Table $table): Table\n",
        "    public static function listing(Table $table): Table\n",
    );
    let project = project("true", Some(&source));
    let output = split(project.path(), &["Employee"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let dir = resources(project.path()).join("EmployeeResource");
    for group in ["PersonalFields", "SalaryFields", "LeaveFields"] {
        assert!(dir.join(format!("Fields/{group}.php")).is_file());
    }

    let table = read(&dir.join("TableSchema.php"));
    assert!(table.contains("->bulkActions(["));
    assert!(!table.contains("->searchable()"));

    let resource = read(&resources(project.path()).join("EmployeeResource.php"));
    assert!(resource.contains("return FormSchema::make($form);"));
    assert!(!resource.contains("TableSchema::make"));
    assert!(resource.contains("function listing(Table $table): Table"));
}

#[test]
fn test_strict_mode_fails_on_missing_method() {
    let source = RESOURCE.replace("function table(", "function listing(");
    let project = project("true", Some(&source));
    let output = split(project.path(), &["Employee", "--strict"]);
    assert!(!output.status.success());
    assert!(!resources(project.path()).join("EmployeeResource").exists());
    assert_eq!(read(&resources(project.path()).join("EmployeeResource.php")), source);
}

#[test]
fn test_generator_failure_leaves_no_files() {
    let project = project("false", None);
    let output = split(project.path(), &["Employee"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("exit status 1"));
    assert!(!resources(project.path()).exists());
}

#[test]
fn test_generator_output_missing() {
    let project = project("true", None);
    let output = split(project.path(), &["Employee"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("resource file not found"));
}

#[test]
fn test_dry_run_touches_nothing() {
    let project = project("false", Some(RESOURCE));
    let output = split(project.path(), &["Employee", "--dry-run"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Would run: false artisan make:filament-resource Employee"));
    assert!(stdout.contains("+        return FormSchema::make($form);"));
    assert!(!resources(project.path()).join("EmployeeResource").exists());
    assert_eq!(read(&resources(project.path()).join("EmployeeResource.php")), RESOURCE);
}

#[test]
fn test_invalid_name_rejected() {
    let project = project("true", Some(RESOURCE));
    let output = split(project.path(), &["not a name"]);
    assert!(!output.status.success());
    assert!(!resources(project.path()).join("EmployeeResource").exists());
}
