//! Resource and field group identifiers

use super::helpers::TemplateHelpers;
use crate::error::{Result, SplitError};
use std::fmt;

/// Class names every form schema imports or declares
const SCHEMA_CLASS_NAMES: &[&str] = &["Form", "Forms", "FormSchema", "TableSchema"];

/// Class name of a Filament resource, e.g. `EmployeeResource`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceName {
    class: String,
    model: String,
}

impl ResourceName {
    /// Derive a resource name from user input
    ///
    /// The input is trimmed and capitalized, and `suffix` is appended unless
    /// the input already ends with it. `employee` becomes `EmployeeResource`
    /// with model name `Employee`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not an identifier, consists of the
    /// suffix alone, or yields a class name PHP reserves.
    pub fn parse(input: &str, suffix: &str) -> Result<Self> {
        let trimmed = input.trim();
        if !TemplateHelpers::is_identifier(trimmed) {
            return Err(SplitError::InvalidResourceName(input.to_string()));
        }

        let capitalized = TemplateHelpers::capitalize(trimmed);
        let model = if suffix.is_empty() {
            capitalized
        } else {
            capitalized
                .strip_suffix(suffix)
                .unwrap_or(&capitalized)
                .to_string()
        };
        let class = format!("{model}{suffix}");

        if model.is_empty() || TemplateHelpers::is_reserved_word(&class) {
            return Err(SplitError::InvalidResourceName(input.to_string()));
        }

        Ok(Self { class, model })
    }

    /// Resource class name, used for file and directory names
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Model name handed to the generator
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.class)
    }
}

/// Ordered, non-empty list of field group class names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroups(Vec<String>);

impl FieldGroups {
    /// Parse a comma-separated list such as `"A, B"`
    ///
    /// Entries are trimmed and empty entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if no entries remain, an entry is not an identifier,
    /// is a PHP reserved word, collides with a schema class name, or repeats.
    /// Names are compared case-insensitively, as PHP compares class names.
    pub fn parse(list: &str) -> Result<Self> {
        Self::from_names(list.split(','))
    }

    /// Build from individual names, applying the same rules as [`Self::parse`]
    ///
    /// # Errors
    ///
    /// See [`Self::parse`].
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut groups: Vec<String> = Vec::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if !TemplateHelpers::is_identifier(name) {
                return Err(SplitError::InvalidFieldGroup(name.to_string()));
            }
            if TemplateHelpers::is_reserved_word(name) {
                return Err(SplitError::ReservedFieldGroup(name.to_string()));
            }
            if let Some(taken) = SCHEMA_CLASS_NAMES
                .iter()
                .find(|taken| taken.eq_ignore_ascii_case(name))
            {
                return Err(SplitError::FieldGroupConflict {
                    group: name.to_string(),
                    name: (*taken).to_string(),
                });
            }
            if groups.iter().any(|g| g.eq_ignore_ascii_case(name)) {
                return Err(SplitError::DuplicateFieldGroup(name.to_string()));
            }
            groups.push(name.to_string());
        }

        if groups.is_empty() {
            return Err(SplitError::NoFieldGroups);
        }

        Ok(Self(groups))
    }

    /// Group names in declaration order
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Number of groups
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no groups
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the group names
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_name_appends_suffix() {
        let name = ResourceName::parse("Employee", "Resource").unwrap();
        assert_eq!(name.class(), "EmployeeResource");
        assert_eq!(name.model(), "Employee");
        assert_eq!(name.to_string(), "EmployeeResource");
    }

    #[test]
    fn test_resource_name_keeps_existing_suffix() {
        let name = ResourceName::parse(" employeeResource ", "Resource").unwrap();
        assert_eq!(name.class(), "EmployeeResource");
        assert_eq!(name.model(), "Employee");
    }

    #[test]
    fn test_resource_name_without_suffix() {
        let name = ResourceName::parse("Employee", "").unwrap();
        assert_eq!(name.class(), "Employee");
        assert_eq!(name.model(), "Employee");
    }

    #[test]
    fn test_invalid_resource_names() {
        for input in ["", "  ", "9Lives", "Employee Record", "App\\Employee", "Resource"] {
            assert!(
                ResourceName::parse(input, "Resource").is_err(),
                "should reject {input:?}"
            );
        }
    }

    #[test]
    fn test_field_groups_trimmed() {
        let groups = FieldGroups::parse(" A, B ").unwrap();
        assert_eq!(groups.names(), ["A", "B"]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_field_groups_skip_empty_entries() {
        let groups = FieldGroups::parse("PersonalFields,,SalaryFields,").unwrap();
        assert_eq!(groups.names(), ["PersonalFields", "SalaryFields"]);
    }

    #[test]
    fn test_field_groups_preserve_order() {
        let groups = FieldGroups::from_names(["LeaveFields", "PersonalFields"]).unwrap();
        assert_eq!(groups.iter().collect::<Vec<_>>(), vec!["LeaveFields", "PersonalFields"]);
    }

    #[test]
    fn test_field_groups_errors() {
        assert!(matches!(FieldGroups::parse(" , "), Err(SplitError::NoFieldGroups)));
        assert!(matches!(
            FieldGroups::parse("A, A"),
            Err(SplitError::DuplicateFieldGroup(name)) if name == "A"
        ));
        assert!(matches!(
            FieldGroups::parse("Salary Fields"),
            Err(SplitError::InvalidFieldGroup(_))
        ));
    }

    #[test]
    fn test_field_group_duplicates_ignore_case() {
        assert!(matches!(
            FieldGroups::parse("Personal, personal"),
            Err(SplitError::DuplicateFieldGroup(name)) if name == "personal"
        ));
        assert!(matches!(
            FieldGroups::from_names(["SalaryFields", "SALARYFIELDS"]),
            Err(SplitError::DuplicateFieldGroup(_))
        ));
    }

    #[test]
    fn test_field_groups_reject_schema_class_names() {
        for (input, taken) in [
            ("Form", "Form"),
            ("forms", "Forms"),
            ("FormSchema", "FormSchema"),
            ("Personal, TableSchema", "TableSchema"),
        ] {
            match FieldGroups::parse(input) {
                Err(SplitError::FieldGroupConflict { name, .. }) => assert_eq!(name, taken),
                other => panic!("expected conflict for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_field_groups_reject_reserved_words() {
        for input in ["List", "Array", "Static", "Personal, class"] {
            assert!(
                matches!(FieldGroups::parse(input), Err(SplitError::ReservedFieldGroup(_))),
                "should reject {input:?}"
            );
        }
    }

    #[test]
    fn test_reserved_resource_name_without_suffix() {
        assert!(ResourceName::parse("list", "").is_err());
        assert!(ResourceName::parse("list", "Resource").is_ok());
    }
}
