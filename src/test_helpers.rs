//! Shared test utilities: a throwaway source tree plus its output directory.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = SiteFixture::new();
//! site.page("docs/index.html", "Docs", "<h1>Docs</h1>");
//! convert_tree(&site.config(), WalkMode::Write).unwrap();
//! assert!(site.read_output("docs/index.vue").contains("Docs"));
//! ```

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::config::ConvertConfig;

/// A temp directory holding `site/` (source) and `out/` (destination).
///
/// `out/` is not created up front so tests can check what the walker creates.
pub struct SiteFixture {
    tmp: TempDir,
}

impl SiteFixture {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("site")).unwrap();
        Self { tmp }
    }

    pub fn source(&self) -> PathBuf {
        self.tmp.path().join("site")
    }

    pub fn destination(&self) -> PathBuf {
        self.tmp.path().join("out")
    }

    /// Default config pointed at this fixture.
    pub fn config(&self) -> ConvertConfig {
        ConvertConfig {
            source: self.source(),
            destination: self.destination(),
            ..ConvertConfig::default()
        }
    }

    /// Write an arbitrary file under `site/`, creating parent directories.
    pub fn file(&self, rel: &str, contents: &str) {
        let path = self.source().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// Write a minimal HTML page with the given title and body markup.
    pub fn page(&self, rel: &str, title: &str, body: &str) {
        self.file(
            rel,
            &format!(
                "<!DOCTYPE html>\n<html><head><title>{title}</title></head>\n<body>{body}</body></html>\n"
            ),
        );
    }

    pub fn read_output(&self, rel: &str) -> String {
        fs::read_to_string(self.destination().join(rel)).unwrap()
    }

    pub fn output_exists(&self, rel: &str) -> bool {
        self.destination().join(rel).exists()
    }
}
