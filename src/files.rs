use crate::error::{Result, StoryforgeError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One generated file: relative path plus full textual content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Wire shape of the code and test stage answers:
/// `{ "files": [ { "path": ..., "content": ... }, ... ] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct FileManifest {
    pub files: Vec<GeneratedFile>,
}

/// Ordered path-to-content mapping produced by the code or test stage.
///
/// Paths are unique within a set; re-inserting a path replaces its content
/// but keeps the original position, so persisted order always matches the
/// order the stage first produced each file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileSet {
    files: Vec<GeneratedFile>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file. Paths are trimmed of surrounding whitespace.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let path = path.into().trim().to_string();
        let content = content.into();
        if let Some(existing) = self.files.iter_mut().find(|f| f.path == path) {
            existing.content = content;
        } else {
            self.files.push(GeneratedFile { path, content });
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.content.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Relative paths in insertion order.
    pub fn paths(&self) -> Vec<String> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files whose path appears in `paths`, original order preserved.
    pub fn subset(&self, paths: &[&str]) -> FileSet {
        FileSet {
            files: self
                .files
                .iter()
                .filter(|f| paths.contains(&f.path.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Pretty-printed `{ path: content }` object for prompt embedding.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut map = serde_json::Map::new();
        for file in &self.files {
            map.insert(
                file.path.clone(),
                serde_json::Value::String(file.content.clone()),
            );
        }
        Ok(serde_json::to_string_pretty(&serde_json::Value::Object(
            map,
        ))?)
    }

    /// Persist every file under `root`, creating intermediate directories
    /// and overwriting existing files with exact content.
    ///
    /// The whole set is path-validated before anything is written, so one
    /// escaping entry cannot leave a half-written set behind. Returns the
    /// written relative paths in insertion order.
    pub fn write_all(&self, root: &Path) -> Result<Vec<String>> {
        for file in &self.files {
            validate_relative_path(&file.path)?;
        }

        let mut written = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let absolute = root.join(&file.path);
            if let Some(parent) = absolute.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&absolute, &file.content)?;
            written.push(file.path.clone());
        }
        Ok(written)
    }
}

impl From<FileManifest> for FileSet {
    fn from(manifest: FileManifest) -> Self {
        let mut set = FileSet::new();
        for file in manifest.files {
            set.insert(file.path, file.content);
        }
        set
    }
}

/// Reject any path that could resolve outside the project root: absolute
/// paths, drive prefixes, home-directory shorthand, parent components, and
/// NUL/control characters.
pub fn validate_relative_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(StoryforgeError::UnsafePath("(empty path)".to_string()));
    }
    let reject = || StoryforgeError::UnsafePath(path.to_string());
    if path.chars().any(|c| c.is_control()) {
        return Err(reject());
    }
    if path.starts_with('/') || path.starts_with('\\') || path.starts_with('~') {
        return Err(reject());
    }
    if path.chars().nth(1) == Some(':') {
        return Err(reject());
    }
    if path.split(['/', '\\']).any(|component| component == "..") {
        return Err(reject());
    }
    Ok(())
}
