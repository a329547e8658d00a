//! Shared fixtures for integration tests.
//!
//! Reflection trees are written as JSON literals in the extractor's on-disk shape, so
//! tests exercise the same parsing path as a real run. Two builders are provided:
//!
//! - [`build_engine`] parses fixtures in memory and builds synchronously
//! - [`TempWorkspace`] writes them to a temporary directory for `DocsEngine::create`

use docgraph::manifest::{LoadedPackage, Manifest, parse_package};
use docgraph::{DocsEngine, EngineOptions};
use rstest::fixture;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PROJECT: u32 = 0x1;
pub const FUNCTION: u32 = 0x40;
pub const CLASS: u32 = 0x80;
pub const INTERFACE: u32 = 0x100;
pub const CONSTRUCTOR: u32 = 0x200;
pub const PROPERTY: u32 = 0x400;
pub const METHOD: u32 = 0x800;
pub const CALL_SIGNATURE: u32 = 0x1000;
pub const CONSTRUCTOR_SIGNATURE: u32 = 0x4000;
pub const REFERENCE: u32 = 0x40_0000;

/// A temporary directory holding a run summary and reflection files.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes `content` at `relative`, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn write_json(&self, relative: &str, value: &Value) -> PathBuf {
        let content = serde_json::to_string_pretty(value).expect("Failed to serialize fixture");
        self.write_file(relative, &content)
    }

    /// Writes a run summary plus one reflection file per `(name, tree)` pair.
    ///
    /// A tree given as `Value::String` is written verbatim.
    pub fn write_run(&self, packages: &[(&str, Value)]) {
        let names: Vec<&str> = packages.iter().map(|(name, _)| *name).collect();
        self.write_json("manifest.json", &manifest(&names));
        for (name, tree) in packages {
            let relative = format!("packages/{name}.json");
            match tree {
                Value::String(raw) => self.write_file(&relative, raw),
                other => self.write_json(&relative, other),
            };
        }
    }
}

/// Run summary listing `names` in order, each at `packages/<name>.json`.
#[allow(dead_code)]
pub fn manifest(names: &[&str]) -> Value {
    let packages: Vec<Value> = names
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "version": "1.0.0",
                "outputPath": format!("packages/{name}.json"),
                "entryPoints": ["src/index.ts"],
            })
        })
        .collect();
    json!({
        "generator": { "name": "typedoc", "version": "0.25.0" },
        "packages": packages,
    })
}

fn source(file: &str, line: u32, url: Option<&str>) -> Value {
    match url {
        Some(url) => json!({ "fileName": file, "line": line, "character": 0, "url": url }),
        None => json!({ "fileName": file, "line": line, "character": 0 }),
    }
}

fn summary(text: &str) -> Value {
    json!({ "summary": [{ "kind": "text", "text": text }] })
}

/// The `core` package: a class with a method, its options interface, a factory, a
/// function whose return type names a symbol no package declares, and `Shared`.
#[allow(dead_code)]
pub fn core_package() -> Value {
    json!({
        "id": 0, "name": "core", "kind": PROJECT,
        "children": [
            {
                "id": 1, "name": "Foo", "kind": CLASS,
                "comment": summary("The central client."),
                "sources": [source("src/index.ts", 3, Some("https://git.example.com/core/src/index.ts#L3"))],
                "children": [
                    {
                        "id": 2, "name": "constructor", "kind": CONSTRUCTOR,
                        "signatures": [{
                            "id": 3, "name": "Foo", "kind": CONSTRUCTOR_SIGNATURE,
                            "parameters": [{ "name": "options", "type": { "type": "reference", "name": "FooOptions", "target": 6 } }],
                            "type": { "type": "reference", "name": "Foo", "target": 1 }
                        }]
                    },
                    {
                        "id": 4, "name": "send", "kind": METHOD,
                        "signatures": [{
                            "id": 5, "name": "send", "kind": CALL_SIGNATURE,
                            "comment": summary("Send one message."),
                            "parameters": [{ "name": "message", "type": { "type": "intrinsic", "name": "string" } }],
                            "type": { "type": "intrinsic", "name": "void" },
                            "sources": [source("src/index.ts", 12, Some("https://git.example.com/core/src/index.ts#L12"))]
                        }]
                    }
                ]
            },
            {
                "id": 6, "name": "FooOptions", "kind": INTERFACE,
                "comment": summary("Options for Foo."),
                "sources": [source("src/options.ts", 1, None)],
                "children": [
                    {
                        "id": 7, "name": "timeout", "kind": PROPERTY,
                        "flags": { "isOptional": true },
                        "type": { "type": "intrinsic", "name": "number" }
                    }
                ]
            },
            {
                "id": 8, "name": "createFoo", "kind": FUNCTION,
                "signatures": [{
                    "id": 9, "name": "createFoo", "kind": CALL_SIGNATURE,
                    "parameters": [{ "name": "options", "type": { "type": "reference", "name": "FooOptions", "target": 6 } }],
                    "type": { "type": "reference", "name": "Foo", "target": 1 }
                }]
            },
            {
                "id": 10, "name": "useBar", "kind": FUNCTION,
                "comment": summary("Uses a bar."),
                "signatures": [{
                    "id": 11, "name": "useBar", "kind": CALL_SIGNATURE,
                    "type": { "type": "reference", "name": "Bar" }
                }]
            },
            {
                "id": 12, "name": "Shared", "kind": CLASS,
                "sources": [source("src/shared.ts", 1, None)]
            }
        ]
    })
}

/// The `plugins` package: re-exports core's `Foo`, extends it, and declares its own
/// `Shared`.
#[allow(dead_code)]
pub fn plugins_package() -> Value {
    json!({
        "id": 0, "name": "plugins", "kind": PROJECT,
        "children": [
            {
                "id": 1, "name": "Foo", "kind": REFERENCE,
                "target": { "sourceFileName": "packages/core/src/index.ts", "qualifiedName": "Foo" },
                "sources": [source("src/index.ts", 1, None)]
            },
            {
                "id": 2, "name": "FooPlugin", "kind": CLASS,
                "sources": [source("src/index.ts", 5, None)],
                "extendedTypes": [{
                    "type": "reference", "name": "Foo", "package": "core",
                    "target": { "sourceFileName": "packages/core/src/index.ts", "qualifiedName": "Foo" }
                }],
                "children": [
                    {
                        "id": 3, "name": "send", "kind": METHOD,
                        "inheritedFrom": { "type": "reference", "name": "Foo.send", "package": "core", "qualifiedName": "Foo.send" },
                        "signatures": [{
                            "id": 4, "name": "send", "kind": CALL_SIGNATURE,
                            "parameters": [{ "name": "message", "type": { "type": "intrinsic", "name": "string" } }],
                            "type": { "type": "intrinsic", "name": "void" }
                        }]
                    }
                ]
            },
            {
                "id": 5, "name": "Shared", "kind": CLASS,
                "sources": [source("src/index.ts", 20, None)]
            }
        ]
    })
}

/// A package declaring one class `name`, optionally with a source URL.
#[allow(dead_code)]
pub fn single_class_package(package: &str, name: &str, url: Option<&str>) -> Value {
    json!({
        "id": 0, "name": package, "kind": PROJECT,
        "children": [{
            "id": 1, "name": name, "kind": CLASS,
            "sources": [source("src/index.ts", 1, url)]
        }]
    })
}

/// Builds an engine from in-memory `(name, tree)` pairs, listed in manifest order.
///
/// A tree given as `Value::String` is used as raw file content, so malformed packages
/// can be expressed.
#[allow(dead_code)]
pub fn build_engine(packages: &[(&str, Value)], options: &EngineOptions) -> DocsEngine {
    let names: Vec<&str> = packages.iter().map(|(name, _)| *name).collect();
    let manifest: Manifest = serde_json::from_value(manifest(&names)).expect("Fixture manifest must parse");

    let loaded: Vec<LoadedPackage> = manifest
        .packages
        .iter()
        .cloned()
        .zip(packages)
        .map(|(entry, (_, tree))| {
            let content = match tree {
                Value::String(raw) => raw.clone(),
                other => other.to_string(),
            };
            let result = parse_package(&entry, &content);
            (entry, result)
        })
        .collect();

    DocsEngine::from_sources(manifest, loaded, options)
}

/// `core` then `plugins`, with default options.
#[fixture]
pub fn monorepo() -> DocsEngine {
    build_engine(
        &[("core", core_package()), ("plugins", plugins_package())],
        &EngineOptions::default(),
    )
}
