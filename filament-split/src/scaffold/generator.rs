//! Resource modularizer
//!
//! Coordinates extraction, template rendering and the in-place rewrite for
//! one resource. Planning is separate from writing: [`Modularizer::plan`]
//! produces every file in memory and [`write_files`] puts them on disk.

use super::extractor::{extract, ExtractedBlock, SchemaMethod};
use super::helpers::TemplateHelpers;
use super::names::{FieldGroups, ResourceName};
use super::rewriter::{imported_names, rewrite, top_level_uses};
use super::templates::{
    FieldGroupContext, FormSchemaContext, TableSchemaContext, TemplateRenderer, FIELD_GROUP,
    FORM_SCHEMA, TABLE_SCHEMA,
};
use crate::config::Settings;
use crate::error::{Result, SplitError};
use std::fs;
use std::path::{Path, PathBuf};

/// Imports every form schema needs
const FORM_IMPORTS: &[&str] = &["use Filament\\Forms;", "use Filament\\Forms\\Form;"];

/// Imports every table schema needs
const TABLE_IMPORTS: &[&str] = &["use Filament\\Tables;", "use Filament\\Tables\\Table;"];

/// Splits one generated resource into schema and field-group files
pub struct Modularizer {
    /// Resource being split
    resource: ResourceName,
    /// Field groups, in assembly order
    groups: FieldGroups,
    /// Absolute directory holding resources
    resources_root: PathBuf,
    /// Namespace matching `resources_root`
    resources_namespace: String,
    /// Source file extension
    extension: String,
    /// Fail instead of falling back when a method is missing
    strict: bool,
    /// Template renderer
    templates: TemplateRenderer,
}

impl Modularizer {
    /// Create a modularizer for `resource` inside `project_root`
    ///
    /// # Errors
    ///
    /// Returns an error if template initialization fails.
    pub fn new(
        resource: ResourceName,
        groups: FieldGroups,
        settings: &Settings,
        project_root: &Path,
    ) -> Result<Self> {
        Ok(Self {
            resource,
            groups,
            resources_root: settings.resources_root(project_root),
            resources_namespace: settings.resources_namespace.clone(),
            extension: settings.extension.clone(),
            strict: settings.strict_extraction,
            templates: TemplateRenderer::new()?,
        })
    }

    /// Path of the generated resource file, e.g. `.../EmployeeResource.php`
    #[must_use]
    pub fn resource_path(&self) -> PathBuf {
        self.resources_root
            .join(format!("{}.{}", self.resource.class(), self.extension))
    }

    /// Directory the split files go into, e.g. `.../EmployeeResource/`
    #[must_use]
    pub fn resource_dir(&self) -> PathBuf {
        self.resources_root.join(self.resource.class())
    }

    /// Namespace of the schema classes
    #[must_use]
    pub fn schema_namespace(&self) -> String {
        TemplateHelpers::php_namespace(&[&self.resources_namespace, self.resource.class()])
    }

    /// `use` statements added to the resource file
    ///
    /// Only methods that were located, and so now delegate, get an import.
    #[must_use]
    pub fn schema_imports(&self, blocks: &[ExtractedBlock]) -> Vec<String> {
        let namespace = self.schema_namespace();
        blocks
            .iter()
            .filter(|block| !block.is_fallback())
            .map(|block| format!("use {namespace}\\{};", block.method.schema_class()))
            .collect()
    }

    /// Read the resource file and plan every output file
    ///
    /// # Errors
    ///
    /// Returns an error if the resource file does not exist or cannot be
    /// read, or if planning fails (see [`Self::plan_source`]).
    pub fn plan(&self) -> Result<Plan> {
        let path = self.resource_path();
        if !path.is_file() {
            return Err(SplitError::ResourceNotFound(path));
        }

        let source = fs::read_to_string(&path).map_err(|e| SplitError::io(&path, e))?;
        self.plan_source(&source)
    }

    /// Plan every output file from resource source text
    ///
    /// # Errors
    ///
    /// Returns an error if a method is ambiguous or malformed, if a method
    /// is missing while strict extraction is enabled, or if rendering fails.
    pub fn plan_source(&self, source: &str) -> Result<Plan> {
        let path = self.resource_path();
        let blocks = SchemaMethod::ALL
            .iter()
            .map(|&method| self.extract_block(source, method, &path))
            .collect::<Result<Vec<_>>>()?;
        let [form, table] = [&blocks[0], &blocks[1]];

        let source_uses: Vec<String> = top_level_uses(source)
            .into_iter()
            .map(|statement| statement.text)
            .collect();
        self.check_group_names(&merge_imports(FORM_IMPORTS, &source_uses))?;

        let mut files = vec![
            self.form_schema_file(form, &source_uses)?,
            self.table_schema_file(table, &source_uses)?,
        ];
        for group in self.groups.iter() {
            files.push(self.field_group_file(group)?);
        }

        files.push(GeneratedFile {
            path,
            content: rewrite(source, &blocks, &self.schema_imports(&blocks)),
            description: format!("{} delegating to its schema classes", self.resource),
            kind: FileKind::Modified,
        });

        let fallbacks = blocks
            .iter()
            .filter(|block| block.is_fallback())
            .map(|block| block.method)
            .collect();

        Ok(Plan {
            files,
            fallbacks,
            original: source.to_string(),
        })
    }

    fn extract_block(&self, source: &str, method: SchemaMethod, path: &Path) -> Result<ExtractedBlock> {
        let block = extract(source, method).map_err(|source| SplitError::Scan {
            path: path.to_path_buf(),
            source,
        })?;

        if block.is_fallback() && self.strict {
            return Err(SplitError::MethodNotFound {
                method: method.method_name().to_string(),
                path: path.to_path_buf(),
            });
        }

        Ok(block)
    }

    /// Reject groups whose class name is already taken in the form schema
    fn check_group_names(&self, form_imports: &[String]) -> Result<()> {
        let taken: Vec<String> = form_imports
            .iter()
            .flat_map(|statement| imported_names(statement.as_str()))
            .collect();

        for group in self.groups.iter() {
            if let Some(name) = taken.iter().find(|name| name.eq_ignore_ascii_case(group)) {
                return Err(SplitError::FieldGroupConflict {
                    group: group.to_string(),
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }

    fn form_schema_file(&self, block: &ExtractedBlock, source_uses: &[String]) -> Result<GeneratedFile> {
        let namespace = self.schema_namespace();
        let imports = merge_imports(FORM_IMPORTS, source_uses);
        let content = self.templates.render(
            FORM_SCHEMA,
            &FormSchemaContext {
                php_namespace: &namespace,
                imports: &imports,
                groups: self.groups.names(),
                original_body: &block.body,
            },
        )?;

        Ok(GeneratedFile {
            path: self.schema_path(SchemaMethod::Form),
            content,
            description: format!("Form schema assembling {} field groups", self.groups.len()),
            kind: FileKind::Created,
        })
    }

    fn table_schema_file(&self, block: &ExtractedBlock, source_uses: &[String]) -> Result<GeneratedFile> {
        let namespace = self.schema_namespace();
        let imports = merge_imports(TABLE_IMPORTS, source_uses);
        let content = self.templates.render(
            TABLE_SCHEMA,
            &TableSchemaContext {
                php_namespace: &namespace,
                imports: &imports,
                body: &block.body,
            },
        )?;

        let description = if block.is_fallback() {
            "Table schema (default columns, fill in manually)".to_string()
        } else {
            "Table schema".to_string()
        };

        Ok(GeneratedFile {
            path: self.schema_path(SchemaMethod::Table),
            content,
            description,
            kind: FileKind::Created,
        })
    }

    fn field_group_file(&self, group: &str) -> Result<GeneratedFile> {
        let namespace = TemplateHelpers::php_namespace(&[&self.schema_namespace(), "Fields"]);
        let title = TemplateHelpers::to_section_title(group);
        let field = TemplateHelpers::to_placeholder_field(group);
        let content = self.templates.render(
            FIELD_GROUP,
            &FieldGroupContext {
                php_namespace: &namespace,
                group,
                title: &title,
                field: &field,
            },
        )?;

        Ok(GeneratedFile {
            path: self
                .resource_dir()
                .join("Fields")
                .join(format!("{group}.{}", self.extension)),
            content,
            description: format!("Field group '{title}'"),
            kind: FileKind::Created,
        })
    }

    fn schema_path(&self, method: SchemaMethod) -> PathBuf {
        self.resource_dir()
            .join(format!("{}.{}", method.schema_class(), self.extension))
    }
}

/// Base imports followed by source imports not already listed
fn merge_imports(base: &[&str], source_uses: &[String]) -> Vec<String> {
    let mut imports: Vec<String> = base.iter().map(ToString::to_string).collect();
    for statement in source_uses {
        if !imports.contains(statement) {
            imports.push(statement.clone());
        }
    }
    imports
}

/// Whether a file is created or rewritten in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// New file
    Created,
    /// Existing file rewritten in place
    Modified,
}

/// Represents a generated file
#[derive(Debug)]
pub struct GeneratedFile {
    /// Absolute path
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
    /// Created or modified
    pub kind: FileKind,
}

/// Every planned output for one resource
#[derive(Debug)]
pub struct Plan {
    /// Created files first, the modified resource file last
    pub files: Vec<GeneratedFile>,
    /// Methods that were missing and got fallback bodies
    pub fallbacks: Vec<SchemaMethod>,
    /// Resource source before the rewrite
    pub original: String,
}

impl Plan {
    /// The rewritten resource file
    #[must_use]
    pub fn modified_resource(&self) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.kind == FileKind::Modified)
    }
}

/// Outcome of writing a plan
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Files written successfully
    pub written: Vec<PathBuf>,
    /// Files that could not be written
    pub failed: Vec<(PathBuf, SplitError)>,
    /// Files not attempted because a prerequisite failed
    pub skipped: Vec<PathBuf>,
}

impl WriteReport {
    /// Whether every file was written
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// Write planned files, each independently of the others
///
/// Created files are attempted first. The resource file is only rewritten
/// once every created file is on disk, so it never delegates to a class
/// that does not exist.
#[must_use]
pub fn write_files(files: &[GeneratedFile]) -> WriteReport {
    let mut report = WriteReport::default();

    for file in files.iter().filter(|f| f.kind == FileKind::Created) {
        record(&mut report, file, write_file(file));
    }

    for file in files.iter().filter(|f| f.kind == FileKind::Modified) {
        if report.failed.is_empty() {
            record(&mut report, file, write_file(file));
        } else {
            tracing::warn!(path = %file.path.display(), "not rewriting resource after earlier failures");
            report.skipped.push(file.path.clone());
        }
    }

    report
}

fn record(report: &mut WriteReport, file: &GeneratedFile, result: Result<()>) {
    match result {
        Ok(()) => {
            tracing::debug!(path = %file.path.display(), "wrote file");
            report.written.push(file.path.clone());
        }
        Err(err) => {
            tracing::error!(path = %file.path.display(), error = %err, "failed to write file");
            report.failed.push((file.path.clone(), err));
        }
    }
}

fn write_file(file: &GeneratedFile) -> Result<()> {
    if let Some(parent) = file.path.parent() {
        fs::create_dir_all(parent).map_err(|e| SplitError::io(parent, e))?;
    }
    fs::write(&file.path, &file.content).map_err(|e| SplitError::io(&file.path, e))
}
