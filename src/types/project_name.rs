// ABOUTME: Compose project name validation.
// ABOUTME: Ensures names are usable as compose project namespaces.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectNameError {
    #[error("project name cannot be empty")]
    Empty,

    #[error("project name must start with a lowercase letter or digit")]
    InvalidStart,

    #[error("invalid character in project name: '{0}'")]
    InvalidChar(char),
}

/// A validated compose project name.
///
/// Doubles as the project's directory name and its compose namespace
/// (`docker compose -p <name>`), so it follows the compose project-name
/// rules: lowercase alphanumeric, hyphens, and underscores, starting with
/// an alphanumeric character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(value: &str) -> Result<Self, ProjectNameError> {
        if value.is_empty() {
            return Err(ProjectNameError::Empty);
        }

        let first = value.chars().next().expect("checked non-empty");
        if !first.is_ascii_lowercase() && !first.is_ascii_digit() {
            return Err(ProjectNameError::InvalidStart);
        }

        for c in value.chars() {
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' && c != '_' {
                return Err(ProjectNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_project_names() {
        for name in ["webapp", "api-gateway", "worker_2", "0prefix"] {
            assert!(ProjectName::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_empty_name() {
        assert!(matches!(ProjectName::new(""), Err(ProjectNameError::Empty)));
    }

    #[test]
    fn rejects_leading_separator() {
        assert!(matches!(
            ProjectName::new("-app"),
            Err(ProjectNameError::InvalidStart)
        ));
        assert!(matches!(
            ProjectName::new("_app"),
            Err(ProjectNameError::InvalidStart)
        ));
    }

    #[test]
    fn rejects_uppercase_and_punctuation() {
        assert!(matches!(
            ProjectName::new("Webapp"),
            Err(ProjectNameError::InvalidStart)
        ));
        assert!(matches!(
            ProjectName::new("web.app"),
            Err(ProjectNameError::InvalidChar('.'))
        ));
        assert!(matches!(
            ProjectName::new("web app"),
            Err(ProjectNameError::InvalidChar(' '))
        ));
    }
}
