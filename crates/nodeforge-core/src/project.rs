//! Project configuration record and name normalization

use crate::error::ScaffoldError;
use crate::templates::{Server, Tooling};
use std::collections::BTreeSet;

/// Name used when prompts are skipped and no name was given
pub const DEFAULT_PROJECT_NAME: &str = "my-app";

/// npm rejects package names longer than this
const MAX_NAME_LEN: usize = 214;

/// Everything needed to generate a project, resolved once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    name: String,
    server: Option<Server>,
    tooling: BTreeSet<Tooling>,
    skip_prompts: bool,
}

impl ProjectConfig {
    /// Build a config, normalizing and validating the project name
    pub fn new(
        name: &str,
        server: Option<Server>,
        tooling: impl IntoIterator<Item = Tooling>,
        skip_prompts: bool,
    ) -> Result<Self, ScaffoldError> {
        Ok(Self {
            name: validate_project_name(name)?,
            server,
            tooling: tooling.into_iter().collect(),
            skip_prompts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn server(&self) -> Option<Server> {
        self.server
    }

    /// Selected tooling, iterated in registry order
    pub fn tooling(&self) -> impl Iterator<Item = Tooling> + '_ {
        self.tooling.iter().copied()
    }

    pub fn has_tooling(&self, tooling: Tooling) -> bool {
        self.tooling.contains(&tooling)
    }

    pub fn skip_prompts(&self) -> bool {
        self.skip_prompts
    }
}

/// Map an arbitrary string to a lowercase, hyphen-separated package name.
///
/// ASCII letters and digits are kept (lowercased). Any run of other characters
/// collapses into a single `-`, and separators never lead or trail.
pub fn normalize_project_name(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for ch in raw.trim().chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !normalized.is_empty() {
                normalized.push('-');
            }
            pending_separator = false;
            normalized.push(ch);
        } else {
            pending_separator = true;
        }
    }

    normalized
}

/// Normalize a name and reject results npm would not accept
pub fn validate_project_name(raw: &str) -> Result<String, ScaffoldError> {
    let normalized = normalize_project_name(raw);

    if normalized.is_empty() {
        return Err(ScaffoldError::InvalidName {
            name: raw.to_string(),
            reason: "must contain at least one letter or digit",
        });
    }
    if normalized.len() > MAX_NAME_LEN {
        return Err(ScaffoldError::InvalidName {
            name: raw.to_string(),
            reason: "must be at most 214 characters",
        });
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mixed_case_and_whitespace() {
        assert_eq!(normalize_project_name("My App"), "my-app");
        assert_eq!(normalize_project_name("  Hello   World  "), "hello-world");
        assert_eq!(normalize_project_name("CamelCaseName"), "camelcasename");
    }

    #[test]
    fn test_normalize_disallowed_characters() {
        assert_eq!(normalize_project_name("hello_world!!"), "hello-world");
        assert_eq!(normalize_project_name("@scope/pkg.name"), "scope-pkg-name");
        assert_eq!(normalize_project_name("--leading--trailing--"), "leading-trailing");
        assert_eq!(normalize_project_name("café v2"), "caf-v2");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            "my-app",
            "My App",
            "  spaced\tout\nname ",
            "a__b..c--d",
            "Über Project 2024!",
            "x",
        ] {
            let once = normalize_project_name(raw);
            assert_eq!(normalize_project_name(&once), once, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_validate_rejects_empty_names() {
        assert!(matches!(
            validate_project_name("!!!"),
            Err(ScaffoldError::InvalidName { .. })
        ));
        assert!(validate_project_name("   ").is_err());
    }

    #[test]
    fn test_validate_rejects_overlong_names() {
        let long = "a".repeat(MAX_NAME_LEN + 1);
        assert!(validate_project_name(&long).is_err());
        assert!(validate_project_name(&"a".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_config_orders_tooling_by_registry() {
        let config =
            ProjectConfig::new("Demo", None, [Tooling::Test, Tooling::Lint], true).unwrap();
        assert_eq!(config.name(), "demo");
        assert_eq!(
            config.tooling().collect::<Vec<_>>(),
            vec![Tooling::Lint, Tooling::Test]
        );
        assert!(config.skip_prompts());
    }

    #[test]
    fn test_config_deduplicates_tooling() {
        let config =
            ProjectConfig::new("demo", Some(Server::Hono), [Tooling::Lint, Tooling::Lint], false)
                .unwrap();
        assert_eq!(config.tooling().count(), 1);
        assert_eq!(config.server(), Some(Server::Hono));
    }
}
