//! Sandbox shared by the end-to-end suites: a throwaway home and data dir
//! plus helpers to seed schemes and read files back.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use pin::apply::Applier;
use pin::catalog::Catalog;
use pin::config::Config;
use pin::scheme::{Scheme, BASE16_SLOTS};

static SANDBOX_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct Sandbox {
    root: PathBuf,
    pub config: Config,
}

impl Sandbox {
    pub fn new(prefix: &str) -> Self {
        let suffix = SANDBOX_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let root = std::env::temp_dir().join(format!(
            "pin-it-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&root).expect("create sandbox");
        let config = Config::with_dirs(root.join("home"), root.join("data"));
        Self { root, config }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn write(&self, relative: &str, text: &str) -> PathBuf {
        let path = self.path(relative);
        write_file(&path, text);
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read sandbox file")
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.config.clone())
    }

    pub fn applier(&self) -> Applier {
        Applier::new(self.config.clone())
    }

    /// Seed a custom base16 scheme: `base00` as given, every other slot grey.
    pub fn custom_scheme(&self, name: &str, base00: &str) -> PathBuf {
        let mut scheme = Scheme {
            system: "base16".into(),
            name: name.into(),
            author: "sandbox".into(),
            variant: "dark".into(),
            ..Scheme::default()
        };
        for slot in BASE16_SLOTS {
            scheme.palette.insert(slot.to_string(), "#808080".to_string());
        }
        scheme.palette.insert("base00".into(), base00.into());
        let path = self
            .config
            .paths
            .custom_schemes
            .join(format!("{name}.yaml"));
        write_file(&path, &scheme.to_yaml().expect("scheme yaml"));
        path
    }

    /// Overwrite the body of an app's template.
    pub fn write_template(&self, app: &str, name: &str, body: &str) -> PathBuf {
        let path = self
            .config
            .paths
            .app_templates(app)
            .join(format!("{name}.mustache"));
        write_file(&path, body);
        path
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn write_file(path: &Path, text: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, text).expect("write sandbox file");
}
