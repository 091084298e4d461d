//! Layer-boundary check for the user service crate.
//!
//! `backend/src` is split into three layers, each a top-level directory:
//!
//! | layer      | may not reach      | may not use crates                         |
//! |------------|--------------------|--------------------------------------------|
//! | `domain`   | inbound, outbound  | actix, diesel, embedded postgres, utoipa   |
//! | `inbound`  | outbound           | diesel, embedded postgres                  |
//! | `outbound` | inbound            | actix, utoipa                              |
//!
//! Files outside the three layer directories (`main.rs`, `server/`, `doc.rs`
//! and friends) wire the layers together and are not checked.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::{self, Visit};
use thiserror::Error;

/// Library name of the checked crate, as seen in `use user_service::...`.
const CRATE_NAME: &str = "user_service";

const LAYERS: [&str; 3] = ["domain", "inbound", "outbound"];

const WEB_CRATES: [&str; 4] = ["actix_http", "actix_web", "utoipa", "utoipa_swagger_ui"];
const STORAGE_CRATES: [&str; 4] = [
    "diesel",
    "diesel_async",
    "diesel_migrations",
    "pg_embedded_setup_unpriv",
];

/// What one layer is not allowed to depend on.
struct LayerRule {
    layer: &'static str,
    denied_layers: &'static [&'static str],
    denied_crates: &'static [&'static [&'static str]],
}

static RULES: [LayerRule; 3] = [
    LayerRule {
        layer: "domain",
        denied_layers: &["inbound", "outbound"],
        denied_crates: &[&WEB_CRATES, &STORAGE_CRATES],
    },
    LayerRule {
        layer: "inbound",
        denied_layers: &["outbound"],
        denied_crates: &[&STORAGE_CRATES],
    },
    LayerRule {
        layer: "outbound",
        denied_layers: &["inbound"],
        denied_crates: &[&WEB_CRATES],
    },
];

impl LayerRule {
    fn for_file(file: &Path) -> Option<&'static Self> {
        let top = file.components().next()?.as_os_str().to_str()?;
        RULES.iter().find(|rule| rule.layer == top)
    }

    fn denies(&self, target: &Target) -> bool {
        match target {
            Target::Layer(layer) => self.denied_layers.contains(&layer.as_str()),
            Target::Crate(name) => self
                .denied_crates
                .iter()
                .any(|group| group.contains(&name.as_str())),
        }
    }
}

/// Something a source file depends on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Target {
    /// One of the crate's own layers.
    Layer(String),
    /// An external crate, by its root path segment.
    Crate(String),
}

impl Target {
    /// Resolve a path such as `crate::outbound::memory` or `diesel::prelude`.
    ///
    /// Paths into non-layer modules of this crate, and single-segment paths
    /// that name local items, resolve to nothing.
    fn resolve(segments: &[String]) -> Option<Self> {
        let (first, rest) = segments.split_first()?;
        match first.as_str() {
            "crate" | "self" | "super" | CRATE_NAME => rest
                .iter()
                .find(|segment| !matches!(segment.as_str(), "self" | "super"))
                .filter(|segment| LAYERS.contains(&segment.as_str()))
                .map(|segment| Self::Layer(segment.clone())),
            layer if LAYERS.contains(&layer) => Some(Self::Layer(layer.to_owned())),
            _ if rest.is_empty() => None,
            name => Some(Self::Crate(name.to_owned())),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layer(layer) => write!(f, "the {layer} layer"),
            Self::Crate(name) => write!(f, "crate `{name}`"),
        }
    }
}

/// A forbidden dependency found in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Layer the file belongs to.
    pub layer: &'static str,
    /// The dependency it must not have.
    pub target: Target,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} code depends on {}",
            self.file.display(),
            self.layer,
            self.target
        )
    }
}

/// Why a check did not pass.
#[derive(Debug, Error)]
pub enum ArchitectureLintError {
    #[error("failed to read sources: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse {}: {message}", file.display())]
    Parse { file: PathBuf, message: String },
    #[error("layer boundary violations:\n{}", list(.0))]
    Violations(Vec<Violation>),
}

fn list(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("- {violation}\n"))
        .collect()
}

/// A Rust source file, with its path relative to `backend/src`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    pub file: PathBuf,
    pub contents: String,
}

/// Check every layer file under `backend_dir/src`.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = backend_dir.join("src");
    let mut sources = Vec::new();
    for layer in LAYERS {
        let dir = src_dir.join(layer);
        if dir.is_dir() {
            read_sources(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Check in-memory sources. Files outside the layer directories are skipped.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let Some(rule) = LayerRule::for_file(&source.file) else {
            continue;
        };
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;

        let mut targets = TargetCollector::default();
        targets.visit_file(&parsed);
        violations.extend(
            targets
                .found
                .into_iter()
                .filter(|target| rule.denies(target))
                .map(|target| Violation {
                    file: source.file.clone(),
                    layer: rule.layer,
                    target,
                }),
        );
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// Collects the distinct targets named by paths and `use` trees.
#[derive(Default)]
struct TargetCollector {
    found: BTreeSet<Target>,
}

impl TargetCollector {
    fn record(&mut self, segments: &[String]) {
        if let Some(target) = Target::resolve(segments) {
            self.found.insert(target);
        }
    }

    fn walk_use(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.walk_use(&path.tree, prefix);
                prefix.pop();
            }
            syn::UseTree::Name(syn::UseName { ident })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                prefix.push(ident.to_string());
                self.record(prefix);
                prefix.pop();
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.record(prefix);
                prefix.pop();
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.walk_use(item, prefix);
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for TargetCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        self.record(&segments);
        visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.walk_use(&node.tree, &mut Vec::new());
    }
}

fn read_sources(
    src_dir: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            read_sources(src_dir, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let file = path
                .strip_prefix(src_dir)
                .map_err(|err| ArchitectureLintError::Parse {
                    file: path.clone(),
                    message: err.to_string(),
                })?
                .to_path_buf();
            sources.push(LintSource {
                contents: fs::read_to_string(&path)?,
                file,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
