//! Shared test fixtures for the scheme, registry and apply test modules.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::scheme::{Scheme, BASE16_SLOTS};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
///
/// Std-only so unit tests can use it without extra dependencies.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "pin-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }

    /// Read a child path back as UTF-8 text.
    pub fn read_text(&self, relative: &str) -> String {
        fs::read_to_string(self.child(relative)).expect("failed to read fixture file")
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// A complete base16 scheme with every slot set to `fill`.
pub fn flat_scheme(name: &str, fill: &str) -> Scheme {
    let mut scheme = Scheme {
        system: "base16".into(),
        name: name.into(),
        author: "fixture".into(),
        variant: "dark".into(),
        ..Scheme::default()
    };
    for slot in BASE16_SLOTS {
        scheme.palette.insert(slot.to_string(), fill.to_string());
    }
    scheme
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
        assert_eq!(fixture.read_text("nested/file.txt"), "hello");
    }

    #[test]
    fn temp_dir_is_removed_on_drop() {
        let path = {
            let fixture = TestTempDir::new("drop");
            fixture.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn flat_scheme_is_complete() {
        let scheme = flat_scheme("Flat", "#000");
        assert_eq!(scheme.missing_slot(), None);
    }
}
