//! Shared fixtures for csvdrive tests: CSV tables, scene descriptions and run configs,
//! all resolved through `fixtures/manifest.json` at the workspace root.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    tables: HashMap<String, String>,
    scenes: HashMap<String, SceneEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SceneEntry {
    Path(String),
    WithRun { path: String, run: String },
}

impl SceneEntry {
    fn as_path(&self) -> &str {
        match self {
            SceneEntry::Path(path) => path,
            SceneEntry::WithRun { path, .. } => path,
        }
    }

    fn run(&self) -> Option<&str> {
        match self {
            SceneEntry::Path(_) => None,
            SceneEntry::WithRun { run, .. } => Some(run),
        }
    }
}

/// Fixture directory; scenes use it as their project directory so `//tables/...`
/// paths in run configs resolve.
pub fn root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod tables {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.tables.keys().cloned().collect()
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.tables, "table", name)?;
        Ok(resolve_path(rel))
    }

    /// Path as a run config spells it: relative to the fixture root with `//`.
    pub fn project_path(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.tables, "table", name)?;
        Ok(format!("//{rel}"))
    }

    pub fn text(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.tables, "table", name)?;
        read_to_string(rel)
    }
}

pub mod scenes {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.scenes.keys().cloned().collect()
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.scenes, "scene", name)?;
        super::load_json(entry.as_path())
    }

    /// Run config paired with the scene, if the manifest lists one.
    pub fn run<T: DeserializeOwned>(name: &str) -> Result<Option<T>> {
        let entry = lookup(&MANIFEST.scenes, "scene", name)?;
        match entry.run() {
            Some(run) => super::load_json(run).map(Some),
            None => Ok(None),
        }
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.scenes, "scene", name)?;
        Ok(resolve_path(entry.as_path()))
    }
}
