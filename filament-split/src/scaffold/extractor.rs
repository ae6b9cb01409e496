//! Extraction of the `form` and `table` method bodies
//!
//! Each body is located once with the scanner. The resulting span is kept on
//! the [`ExtractedBlock`] so the rewriter replaces exactly the text that was
//! read.

use super::scanner::{find_method, MethodSpan};
use crate::error::ScanError;

/// Body used when the resource has no `form` method
pub const FORM_FALLBACK_BODY: &str = "
        return $form
            ->schema([
                //
            ]);
    ";

/// Body used when the resource has no `table` method
pub const TABLE_FALLBACK_BODY: &str = "
        return $table
            ->columns([
                //
            ])
            ->filters([
                //
            ])
            ->actions([
                Tables\\Actions\\EditAction::make(),
            ])
            ->bulkActions([
                Tables\\Actions\\BulkActionGroup::make([
                    Tables\\Actions\\DeleteBulkAction::make(),
                ]),
            ]);
    ";

/// One of the two resource methods that get split out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaMethod {
    /// `form(Form $form): Form`
    Form,
    /// `table(Table $table): Table`
    Table,
}

impl SchemaMethod {
    /// Both methods, in the order they are processed
    pub const ALL: [Self; 2] = [Self::Form, Self::Table];

    /// PHP method name
    #[must_use]
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::Form => "form",
            Self::Table => "table",
        }
    }

    /// Class the body is moved into
    #[must_use]
    pub const fn schema_class(self) -> &'static str {
        match self {
            Self::Form => "FormSchema",
            Self::Table => "TableSchema",
        }
    }

    /// Name of the method parameter, including the `$`
    #[must_use]
    pub const fn parameter(self) -> &'static str {
        match self {
            Self::Form => "$form",
            Self::Table => "$table",
        }
    }

    /// Body substituted when the method is absent
    #[must_use]
    pub const fn fallback_body(self) -> &'static str {
        match self {
            Self::Form => FORM_FALLBACK_BODY,
            Self::Table => TABLE_FALLBACK_BODY,
        }
    }

    /// Body that forwards to the schema class
    ///
    /// `indent` is the indentation of the method declaration; the statement
    /// is nested one level deeper.
    #[must_use]
    pub fn delegating_body(self, indent: &str) -> String {
        format!(
            "\n{indent}    return {}::make({});\n{indent}",
            self.schema_class(),
            self.parameter()
        )
    }
}

/// Body text of a resource method, with the span it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock {
    /// Which method this is
    pub method: SchemaMethod,
    /// Text between the method braces, or the fallback body
    pub body: String,
    /// Source location, absent when the fallback was used
    pub span: Option<MethodSpan>,
}

impl ExtractedBlock {
    /// Block carrying the fallback body for `method`
    #[must_use]
    pub fn fallback(method: SchemaMethod) -> Self {
        Self {
            method,
            body: method.fallback_body().to_string(),
            span: None,
        }
    }

    /// Whether the method was missing and the fallback body is used
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.span.is_none()
    }
}

/// Extract the body of `method` from resource source
///
/// A missing method yields the fallback block.
///
/// # Errors
///
/// Returns the scanner error when the method is declared more than once or
/// its body is malformed.
pub fn extract(source: &str, method: SchemaMethod) -> Result<ExtractedBlock, ScanError> {
    let Some(span) = find_method(source, method.method_name())? else {
        tracing::warn!(
            method = method.method_name(),
            "method not found, using fallback body"
        );
        return Ok(ExtractedBlock::fallback(method));
    };

    Ok(ExtractedBlock {
        method,
        body: span.body(source).to_string(),
        span: Some(span),
    })
}
