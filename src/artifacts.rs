//! Build artifact checks
//!
//! The bootloader relies on three files produced at build time:
//!
//! | File | Requirement |
//! |------|-------------|
//! | `index.html` | `<html manifest="...">` so the cache takes over |
//! | `appshell.html` | same document without the manifest attribute |
//! | `manifest.appcache` | `CACHE MANIFEST` header, `NETWORK:` / `*` fallback |
//!
//! If the shadow document carried a manifest attribute, fetching it would be
//! served from the very cache it is meant to bypass.

use crate::dom::{parse_document, Node};
use crate::error::{AppshellError, AppshellResult};
use std::path::Path;
use tokio::fs;

pub const ENTRY_DOCUMENT: &str = "index.html";
pub const MANIFEST: &str = "manifest.appcache";
const MANIFEST_HEADER: &str = "CACHE MANIFEST";

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub check: &'static str,
    pub problem: Option<String>,
}

impl Finding {
    fn ok(check: &'static str) -> Self {
        Self {
            check,
            problem: None,
        }
    }

    fn failed(check: &'static str, problem: impl Into<String>) -> Self {
        Self {
            check,
            problem: Some(problem.into()),
        }
    }

    pub fn passed(&self) -> bool {
        self.problem.is_none()
    }
}

/// All findings for one build output directory
#[derive(Debug, Clone, Default)]
pub struct ArtifactReport {
    pub findings: Vec<Finding>,
}

impl ArtifactReport {
    pub fn passed(&self) -> bool {
        self.findings.iter().all(Finding::passed)
    }

    /// Turn the first failure into an error
    pub fn into_result(self) -> AppshellResult<()> {
        match self.findings.into_iter().find_map(|finding| finding.problem) {
            Some(problem) => Err(AppshellError::ArtifactMismatch(problem)),
            None => Ok(()),
        }
    }
}

/// Check the contents of the three artifacts
pub fn check_artifacts(current: &str, shadow: &str, manifest: &str) -> ArtifactReport {
    let current_doc = parse_document(current);
    let shadow_doc = parse_document(shadow);
    let mut findings = Vec::new();

    let manifest_attr = current_doc.document_element().get_attribute("manifest");
    findings.push(match &manifest_attr {
        Some(_) => Finding::ok("entry document references the manifest"),
        None => Finding::failed(
            "entry document references the manifest",
            "index.html has no manifest attribute on <html>",
        ),
    });

    findings.push(match shadow_doc.document_element().get_attribute("manifest") {
        None => Finding::ok("shadow document bypasses the cache"),
        Some(value) => Finding::failed(
            "shadow document bypasses the cache",
            format!("shadow document carries manifest=\"{}\"", value),
        ),
    });

    let same_content = same_tree(current_doc.head(), shadow_doc.head())
        && same_tree(current_doc.body(), shadow_doc.body());
    findings.push(if same_content {
        Finding::ok("shadow document matches entry document")
    } else {
        Finding::failed(
            "shadow document matches entry document",
            "head or body differs between index.html and the shadow document",
        )
    });

    findings.push(check_manifest(manifest));
    ArtifactReport { findings }
}

fn check_manifest(manifest: &str) -> Finding {
    const CHECK: &str = "manifest has header and network fallback";
    let lines: Vec<&str> = manifest
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.first() != Some(&MANIFEST_HEADER) {
        return Finding::failed(CHECK, format!("manifest does not start with {}", MANIFEST_HEADER));
    }
    if !lines.ends_with(&["NETWORK:", "*"]) {
        return Finding::failed(CHECK, "manifest does not end with the NETWORK: * fallback");
    }
    Finding::ok(CHECK)
}

fn same_tree(a: &Node, b: &Node) -> bool {
    a.outer_html() == b.outer_html()
}

/// Read and check the artifacts in a build output directory
pub async fn check_dist(dist: &Path, shadow_document: &str) -> AppshellResult<ArtifactReport> {
    let read = |name: &str| {
        let path = dist.join(name);
        async move {
            if !path.exists() {
                return Err(AppshellError::PathNotFound(path));
            }
            fs::read_to_string(&path)
                .await
                .map_err(|e| AppshellError::io(format!("reading {}", path.display()), e))
        }
    };

    let current = read(ENTRY_DOCUMENT).await?;
    let shadow = read(shadow_document).await?;
    let manifest = read(MANIFEST).await?;
    Ok(check_artifacts(&current, &shadow, &manifest))
}
