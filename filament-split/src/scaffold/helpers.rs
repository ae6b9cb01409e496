//! Naming helpers for code generation
//!
//! Turns resource and field group identifiers into the labels, keys and
//! namespaces the PHP templates need.

use inflector::Inflector;

/// Words PHP does not accept as a class name, compared case-insensitively
const PHP_RESERVED_WORDS: &[&str] = &[
    "abstract", "and", "array", "as", "bool", "break", "callable", "case", "catch", "class",
    "clone", "const", "continue", "declare", "default", "do", "echo", "else", "elseif", "empty",
    "enddeclare", "endfor", "endforeach", "endif", "endswitch", "endwhile", "eval", "exit",
    "extends", "false", "final", "finally", "float", "fn", "for", "foreach", "function", "global",
    "goto", "if", "implements", "include", "include_once", "instanceof", "insteadof", "int",
    "interface", "isset", "iterable", "list", "match", "mixed", "namespace", "never", "new",
    "null", "object", "or", "parent", "print", "private", "protected", "public", "readonly",
    "require", "require_once", "return", "self", "static", "string", "switch", "throw", "trait",
    "true", "try", "unset", "use", "var", "void", "while", "xor", "yield",
];

/// Template helpers for naming conventions
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Check that `input` is a PHP class-name identifier
    ///
    /// # Examples
    ///
    /// ```
    /// # use filament_split_lib::TemplateHelpers;
    /// assert!(TemplateHelpers::is_identifier("PersonalFields"));
    /// assert!(TemplateHelpers::is_identifier("_Internal2"));
    /// assert!(!TemplateHelpers::is_identifier("2Fields"));
    /// assert!(!TemplateHelpers::is_identifier("Salary Fields"));
    /// ```
    #[must_use]
    pub fn is_identifier(input: &str) -> bool {
        let mut chars = input.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Check whether `input` is reserved in PHP and unusable as a class name
    ///
    /// # Examples
    ///
    /// ```
    /// # use filament_split_lib::TemplateHelpers;
    /// assert!(TemplateHelpers::is_reserved_word("List"));
    /// assert!(TemplateHelpers::is_reserved_word("static"));
    /// assert!(!TemplateHelpers::is_reserved_word("Listing"));
    /// ```
    #[must_use]
    pub fn is_reserved_word(input: &str) -> bool {
        PHP_RESERVED_WORDS
            .iter()
            .any(|word| word.eq_ignore_ascii_case(input))
    }

    /// Upper-case the first character, leaving the rest untouched
    ///
    /// # Examples
    ///
    /// ```
    /// # use filament_split_lib::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::capitalize("employee"), "Employee");
    /// assert_eq!(TemplateHelpers::capitalize("HRManager"), "HRManager");
    /// ```
    #[must_use]
    pub fn capitalize(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Convert string to `snake_case`
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_snake_case()
    }

    /// Human-readable section title for a field group
    ///
    /// A trailing `Fields` word is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use filament_split_lib::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_section_title("PersonalFields"), "Personal");
    /// assert_eq!(TemplateHelpers::to_section_title("EmergencyContact"), "Emergency Contact");
    /// ```
    #[must_use]
    pub fn to_section_title(group: &str) -> String {
        let title = group.to_title_case();
        match title.strip_suffix(" Fields") {
            Some(stripped) if !stripped.is_empty() => stripped.to_string(),
            _ => title,
        }
    }

    /// Key of the placeholder input rendered into a field group
    ///
    /// # Examples
    ///
    /// ```
    /// # use filament_split_lib::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_placeholder_field("PersonalFields"), "personal_example");
    /// ```
    #[must_use]
    pub fn to_placeholder_field(group: &str) -> String {
        format!("{}_example", Self::to_snake_case(&Self::to_section_title(group)))
    }

    /// Join namespace segments with PHP separators
    ///
    /// # Examples
    ///
    /// ```
    /// # use filament_split_lib::TemplateHelpers;
    /// assert_eq!(
    ///     TemplateHelpers::php_namespace(&["App\\Filament\\Resources", "EmployeeResource"]),
    ///     "App\\Filament\\Resources\\EmployeeResource"
    /// );
    /// ```
    #[must_use]
    pub fn php_namespace(segments: &[&str]) -> String {
        segments
            .iter()
            .map(|s| s.trim_matches('\\'))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\\")
    }
}
