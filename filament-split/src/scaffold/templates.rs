//! Embedded templates for the split resource files
//!
//! Rendering is a pure function of a template and an explicit context value;
//! nothing here touches the filesystem.

use crate::error::{Result, SplitError};
use minijinja::Environment;
use serde::Serialize;

/// Template name of the form-schema class
pub const FORM_SCHEMA: &str = "form_schema";
/// Template name of the table-schema class
pub const TABLE_SCHEMA: &str = "table_schema";
/// Template name of a field-group class
pub const FIELD_GROUP: &str = "field_group";

/// Form-schema class assembling every field group
pub const FORM_SCHEMA_TEMPLATE: &str = r"<?php

namespace {{ php_namespace }};

{% for statement in imports %}
{{ statement }}
{% endfor %}
{% for group in groups %}
use {{ php_namespace }}\Fields\{{ group }};
{% endfor %}

class FormSchema
{
    public static function make(Form $form): Form
    {
        return $form->schema(static::schema());
    }

    public static function schema(): array
    {
        return [
{% for group in groups %}
            ...{{ group }}::make(),
{% endfor %}
        ];
    }

    /**
     * Form definition as generated, before it was split into field groups.
     */
    public static function original(Form $form): Form
    {
{{- original_body }}}
}
";

/// Table-schema class wrapping the table body verbatim
pub const TABLE_SCHEMA_TEMPLATE: &str = r"<?php

namespace {{ php_namespace }};

{% for statement in imports %}
{{ statement }}
{% endfor %}

class TableSchema
{
    public static function make(Table $table): Table
    {
{{- body }}}
}
";

/// Field-group class with one example section
pub const FIELD_GROUP_TEMPLATE: &str = r"<?php

namespace {{ php_namespace }};

use Filament\Forms;

class {{ group }}
{
    public static function make(): array
    {
        return [
            Forms\Components\Section::make('{{ title }}')
                ->schema([
                    Forms\Components\TextInput::make('{{ field }}')
                        ->maxLength(255),
                ]),
        ];
    }
}
";

/// Values substituted into [`FORM_SCHEMA_TEMPLATE`]
#[derive(Debug, Clone, Serialize)]
pub struct FormSchemaContext<'a> {
    /// Namespace of the schema classes, e.g. `App\Filament\Resources\EmployeeResource`
    pub php_namespace: &'a str,
    /// Complete `use` statements
    pub imports: &'a [String],
    /// Field group class names, in assembly order
    pub groups: &'a [String],
    /// Extracted or fallback `form` body
    pub original_body: &'a str,
}

/// Values substituted into [`TABLE_SCHEMA_TEMPLATE`]
#[derive(Debug, Clone, Serialize)]
pub struct TableSchemaContext<'a> {
    /// Namespace of the schema classes
    pub php_namespace: &'a str,
    /// Complete `use` statements
    pub imports: &'a [String],
    /// Extracted or fallback `table` body
    pub body: &'a str,
}

/// Values substituted into [`FIELD_GROUP_TEMPLATE`]
#[derive(Debug, Clone, Serialize)]
pub struct FieldGroupContext<'a> {
    /// Namespace of the field group classes
    pub php_namespace: &'a str,
    /// Class name of the group
    pub group: &'a str,
    /// Section heading
    pub title: &'a str,
    /// Key of the placeholder input
    pub field: &'a str,
}

/// Renders the embedded templates
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Create a renderer with all templates registered
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded template fails to parse.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        for (name, source) in [
            (FORM_SCHEMA, FORM_SCHEMA_TEMPLATE),
            (TABLE_SCHEMA, TABLE_SCHEMA_TEMPLATE),
            (FIELD_GROUP, FIELD_GROUP_TEMPLATE),
        ] {
            env.add_template(name, source)
                .map_err(|source| SplitError::Template {
                    name: name.to_string(),
                    source,
                })?;
        }

        Ok(Self { env })
    }

    /// Render template `name` with `context`
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unknown or rendering fails.
    pub fn render<S: Serialize>(&self, name: &str, context: &S) -> Result<String> {
        let wrap = |source: minijinja::Error| SplitError::Template {
            name: name.to_string(),
            source,
        };
        self.env.get_template(name).map_err(wrap)?.render(context).map_err(wrap)
    }
}
