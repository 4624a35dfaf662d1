//! Feature registry, template text, and generated file sets
//!
//! This module provides:
//! - Static feature descriptors for servers and tooling bundles
//! - Entry-point and config file templates
//! - The flat dependency list for a project configuration
//! - Writing the generated file set to disk

pub mod files;
pub mod sources;

use crate::project::ProjectConfig;
use clap::ValueEnum;
use std::fmt;

pub use files::{generated_files, write_files, GeneratedFile};

/// Dependencies every generated project gets
pub const BASE_DEPENDENCIES: &[&str] = &["typescript", "tsx", "@types/node"];

/// A selectable feature: server framework or tooling bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureDescriptor {
    /// Human-readable name shown in prompts
    pub label: &'static str,
    /// Identifier used on the command line
    pub key: &'static str,
    pub description: &'static str,
    /// Packages added when this feature is selected
    pub dependencies: &'static [&'static str],
    /// Entry-point source, for features that replace it
    pub template: Option<&'static str>,
}

/// Web server frameworks (at most one per project)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Server {
    Express,
    Fastify,
    Hono,
}

const EXPRESS: FeatureDescriptor = FeatureDescriptor {
    label: "Express",
    key: "express",
    description: "Minimal and flexible web framework",
    dependencies: &["express", "@types/express"],
    template: Some(sources::EXPRESS_ENTRY),
};

const FASTIFY: FeatureDescriptor = FeatureDescriptor {
    label: "Fastify",
    key: "fastify",
    description: "Fast, low-overhead web framework",
    dependencies: &["fastify"],
    template: Some(sources::FASTIFY_ENTRY),
};

const HONO: FeatureDescriptor = FeatureDescriptor {
    label: "Hono",
    key: "hono",
    description: "Small web framework built on Web Standards",
    dependencies: &["hono", "@hono/node-server"],
    template: Some(sources::HONO_ENTRY),
};

impl Server {
    pub const ALL: [Server; 3] = [Server::Express, Server::Fastify, Server::Hono];

    pub fn descriptor(&self) -> &'static FeatureDescriptor {
        match self {
            Server::Express => &EXPRESS,
            Server::Fastify => &FASTIFY,
            Server::Hono => &HONO,
        }
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor().label)
    }
}

/// Developer tooling bundles, declared in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Tooling {
    Lint,
    Test,
}

const LINT: FeatureDescriptor = FeatureDescriptor {
    label: "ESLint + Prettier",
    key: "lint",
    description: "Linting and formatting",
    dependencies: &[
        "eslint",
        "@eslint/js",
        "typescript-eslint",
        "prettier",
        "eslint-config-prettier",
    ],
    template: None,
};

const TEST: FeatureDescriptor = FeatureDescriptor {
    label: "Vitest",
    key: "test",
    description: "Unit testing",
    dependencies: &["vitest"],
    template: None,
};

impl Tooling {
    pub const ALL: [Tooling; 2] = [Tooling::Lint, Tooling::Test];

    pub fn descriptor(&self) -> &'static FeatureDescriptor {
        match self {
            Tooling::Lint => &LINT,
            Tooling::Test => &TEST,
        }
    }
}

impl fmt::Display for Tooling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor().label)
    }
}

/// Entry-point source for the selected server, or the plain default
pub fn entry_point(server: Option<Server>) -> &'static str {
    server
        .and_then(|s| s.descriptor().template)
        .unwrap_or(sources::DEFAULT_ENTRY)
}

/// Base dependencies, then the server's, then each tooling bundle's in registry order
pub fn dependencies(config: &ProjectConfig) -> Vec<&'static str> {
    let mut deps: Vec<&'static str> = BASE_DEPENDENCIES.to_vec();

    if let Some(server) = config.server() {
        deps.extend_from_slice(server.descriptor().dependencies);
    }
    for tooling in config.tooling() {
        deps.extend_from_slice(tooling.descriptor().dependencies);
    }

    deps
}
