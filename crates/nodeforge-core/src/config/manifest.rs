//! `package.json` scripts composition and mutation

use crate::error::ScaffoldError;
use crate::project::ProjectConfig;
use crate::templates::Tooling;
use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const PACKAGE_JSON: &str = "package.json";

const DEFAULT_VERSION: &str = "0.1.0";

/// Script name to command, built additively from the selected features
pub fn compose_scripts(config: &ProjectConfig) -> BTreeMap<&'static str, &'static str> {
    let mut scripts = BTreeMap::from([("build", "tsc"), ("start", "node dist/index.js")]);

    if config.server().is_some() {
        scripts.insert("dev", "tsx watch src/index.ts");
    }
    if config.has_tooling(Tooling::Lint) {
        scripts.insert("lint", "eslint .");
        scripts.insert("lint:fix", "eslint . --fix");
        scripts.insert("format", "prettier --write .");
    }
    if config.has_tooling(Tooling::Test) {
        scripts.insert("test", "vitest");
        scripts.insert("test:run", "vitest run");
    }

    scripts
}

/// Apply the project's settings to a manifest, starting from whatever the
/// package manager's init wrote (or an empty object)
pub fn apply_manifest(existing: Option<Value>, config: &ProjectConfig) -> Value {
    let mut manifest = match existing {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    manifest.insert("name".to_string(), json!(config.name()));
    manifest
        .entry("version")
        .or_insert_with(|| json!(DEFAULT_VERSION));
    manifest.insert("type".to_string(), json!("module"));
    manifest.insert("main".to_string(), json!("dist/index.js"));
    // bun init points `module` at a root index.ts we don't generate
    manifest.remove("module");

    let scripts: Map<String, Value> = compose_scripts(config)
        .into_iter()
        .map(|(name, command)| (name.to_string(), json!(command)))
        .collect();
    manifest.insert("scripts".to_string(), Value::Object(scripts));

    Value::Object(manifest)
}

/// Read `package.json` in `project_dir` (if any), apply settings, and write it back
pub async fn update_manifest(project_dir: &Path, config: &ProjectConfig) -> Result<PathBuf> {
    let path = project_dir.join(PACKAGE_JSON);

    let existing = if fs::try_exists(&path).await.unwrap_or(false) {
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value: Value =
            serde_json::from_str(&content).map_err(|source| ScaffoldError::InvalidManifest {
                path: path.clone(),
                source,
            })?;
        Some(value)
    } else {
        None
    };

    write_manifest_file(&path, &apply_manifest(existing, config)).await?;
    Ok(path)
}

/// Write a fresh `package.json` in `project_dir`, ignoring any file already there
pub async fn generate_manifest(project_dir: &Path, config: &ProjectConfig) -> Result<PathBuf> {
    let path = project_dir.join(PACKAGE_JSON);
    write_manifest_file(&path, &apply_manifest(None, config)).await?;
    Ok(path)
}

async fn write_manifest_file(path: &Path, manifest: &Value) -> Result<()> {
    let mut content =
        serde_json::to_string_pretty(manifest).context("Failed to serialize package.json")?;
    content.push('\n');

    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::Server;
    use std::collections::BTreeSet;

    fn script_keys(server: Option<Server>, tooling: &[Tooling]) -> BTreeSet<&'static str> {
        let config = ProjectConfig::new("demo", server, tooling.iter().copied(), true).unwrap();
        compose_scripts(&config).into_keys().collect()
    }

    fn set(keys: &[&'static str]) -> BTreeSet<&'static str> {
        keys.iter().copied().collect()
    }

    #[test]
    fn test_base_scripts_only() {
        assert_eq!(script_keys(None, &[]), set(&["start", "build"]));
    }

    #[test]
    fn test_server_adds_dev() {
        for server in Server::ALL {
            assert_eq!(script_keys(Some(server), &[]), set(&["start", "build", "dev"]));
        }
    }

    #[test]
    fn test_lint_adds_lint_scripts() {
        assert_eq!(
            script_keys(None, &[Tooling::Lint]),
            set(&["start", "build", "lint", "lint:fix", "format"])
        );
    }

    #[test]
    fn test_test_tooling_adds_test_scripts() {
        assert_eq!(
            script_keys(None, &[Tooling::Test]),
            set(&["start", "build", "test", "test:run"])
        );
    }

    #[test]
    fn test_combinations_are_additive() {
        let all = script_keys(Some(Server::Fastify), &[Tooling::Lint, Tooling::Test]);
        assert_eq!(
            all,
            set(&["start", "build", "dev", "lint", "lint:fix", "format", "test", "test:run"])
        );
        assert_eq!(all.len(), 8);

        let lint_and_test = script_keys(None, &[Tooling::Lint, Tooling::Test]);
        let expected: BTreeSet<_> = script_keys(None, &[Tooling::Lint])
            .union(&script_keys(None, &[Tooling::Test]))
            .copied()
            .collect();
        assert_eq!(lint_and_test, expected);
    }

    #[test]
    fn test_script_commands() {
        let config =
            ProjectConfig::new("demo", Some(Server::Hono), [Tooling::Lint, Tooling::Test], true)
                .unwrap();
        let scripts = compose_scripts(&config);
        assert_eq!(scripts["build"], "tsc");
        assert_eq!(scripts["start"], "node dist/index.js");
        assert_eq!(scripts["dev"], "tsx watch src/index.ts");
        assert_eq!(scripts["lint:fix"], "eslint . --fix");
        assert_eq!(scripts["format"], "prettier --write .");
        assert_eq!(scripts["test:run"], "vitest run");
    }

    #[test]
    fn test_apply_manifest_from_scratch() {
        let config = ProjectConfig::new("My App", None, [], true).unwrap();
        let manifest = apply_manifest(None, &config);

        assert_eq!(manifest["name"], "my-app");
        assert_eq!(manifest["version"], "0.1.0");
        assert_eq!(manifest["type"], "module");
        assert_eq!(manifest["main"], "dist/index.js");
        assert_eq!(
            manifest["scripts"],
            json!({ "build": "tsc", "start": "node dist/index.js" })
        );
    }

    #[test]
    fn test_apply_manifest_replaces_init_output() {
        let existing = json!({
            "name": "tmp",
            "version": "1.0.0",
            "module": "index.ts",
            "license": "ISC",
            "scripts": { "test": "echo \"Error: no test specified\" && exit 1" }
        });
        let config = ProjectConfig::new("demo", None, [], true).unwrap();
        let manifest = apply_manifest(Some(existing), &config);

        assert_eq!(manifest["name"], "demo");
        assert_eq!(manifest["version"], "1.0.0");
        assert_eq!(manifest["license"], "ISC");
        assert!(manifest.get("module").is_none());
        assert!(manifest["scripts"].get("test").is_none());
    }

    #[tokio::test]
    async fn test_update_manifest_writes_file() {
        let temp = tempfile::tempdir().unwrap();
        let config = ProjectConfig::new("demo", None, [Tooling::Test], true).unwrap();

        let path = update_manifest(temp.path(), &config).await.unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.ends_with("}\n"));
        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["scripts"]["test"], "vitest");
    }

    #[tokio::test]
    async fn test_update_manifest_rejects_invalid_json() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(PACKAGE_JSON), "{ not json").unwrap();
        let config = ProjectConfig::new("demo", None, [], true).unwrap();

        let err = update_manifest(temp.path(), &config).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::InvalidManifest { .. })
        ));
    }

    #[tokio::test]
    async fn test_generate_manifest_ignores_existing_file() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join(PACKAGE_JSON),
            r#"{"version":"1.0.0","devDependencies":{"@types/bun":"latest"}}"#,
        )
        .unwrap();
        let config = ProjectConfig::new("demo", None, [], true).unwrap();

        let path = generate_manifest(temp.path(), &config).await.unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value, apply_manifest(None, &config));
        assert_eq!(value["version"], "0.1.0");
        assert!(value.get("devDependencies").is_none());
    }
}
