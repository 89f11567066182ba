//! Source tree walking and component file writing.
//!
//! Walks the configured source directory, converts every page with the
//! configured source extension, and writes the result into the mirrored
//! location under the destination directory:
//!
//! ```text
//! site/                        pages/
//! ├── index.html          →    ├── index.vue
//! ├── style.css                │
//! └── docs/                    └── docs/
//!     ├── index.html      →        ├── index.vue
//!     └── api/                     └── api/
//!         └── guide.html  →            └── guide.vue
//! ```
//!
//! Files with other extensions are skipped. Symbolic links are followed, so
//! a linked page converts like a regular one. Destination directories are
//! created only when a page is written into them, so source directories
//! without pages leave no trace.
//!
//! The first error aborts the walk.

use crate::config::ConvertConfig;
use crate::convert::{self, ConvertError};
use crate::paths;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Failed to convert {path}: {source}")]
    Convert {
        path: PathBuf,
        source: ConvertError,
    },
    #[error("Path is not under the source root: {0}")]
    OutsideRoot(PathBuf),
    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> WalkError + '_ {
    move |source| WalkError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Whether converted pages are written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    Write,
    /// Convert in memory only
    DryRun,
}

/// One converted page.
#[derive(Debug, Clone)]
pub struct ConvertedPage {
    /// `/`-separated path under the source root
    pub source: String,
    /// `/`-separated path under the destination root
    pub destination: String,
    pub title: String,
    /// Anchors rewritten on this page
    pub links: usize,
}

/// Summary of a conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConvertReport {
    /// Pages in walk order (sorted by file name within each directory)
    pub pages: Vec<ConvertedPage>,
    /// Files skipped for their extension
    pub skipped: usize,
}

impl ConvertReport {
    pub fn total_links(&self) -> usize {
        self.pages.iter().map(|p| p.links).sum()
    }
}

/// Express `path` relative to `root` as a `/`-separated string.
pub fn relative_path(root: &Path, path: &Path) -> Result<String, WalkError> {
    let rel = path
        .strip_prefix(root)
        .map_err(|_| WalkError::OutsideRoot(path.to_path_buf()))?;
    let mut segments = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(segment) => segments.push(
                segment
                    .to_str()
                    .ok_or_else(|| WalkError::NonUtf8Path(path.to_path_buf()))?,
            ),
            Component::CurDir => {}
            _ => return Err(WalkError::OutsideRoot(path.to_path_buf())),
        }
    }
    Ok(segments.join("/"))
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Convert every page under `config.source`.
pub fn convert_tree(config: &ConvertConfig, mode: WalkMode) -> Result<ConvertReport, WalkError> {
    let target_ext = format!(".{}", config.target_extension);
    let mut report = ConvertReport::default();

    for entry in WalkDir::new(&config.source)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !has_extension(path, &config.source_extension) {
            tracing::debug!(path = %path.display(), "skipping");
            report.skipped += 1;
            continue;
        }

        let rel_path = relative_path(&config.source, path)?;
        let contents = fs::read_to_string(path).map_err(io_error(path))?;
        let page = convert::convert_page(&rel_path, &contents, config).map_err(|source| {
            WalkError::Convert {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let rel_destination = paths::extension_swap(&rel_path, &target_ext);
        if mode == WalkMode::Write {
            let destination = config.destination.join(&rel_destination);
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).map_err(io_error(parent))?;
            }
            fs::write(&destination, &page.text).map_err(io_error(&destination))?;
            tracing::info!(path = %destination.display(), "wrote component");
        }

        report.pages.push(ConvertedPage {
            source: rel_path,
            destination: rel_destination,
            title: page.title,
            links: page.links,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn relative_path_uses_slashes() {
        let root = Path::new("site");
        let path = Path::new("site").join("docs").join("api").join("index.html");
        assert_eq!(relative_path(root, &path).unwrap(), "docs/api/index.html");
    }

    #[test]
    fn relative_path_outside_root_is_error() {
        let result = relative_path(Path::new("site"), Path::new("other/index.html"));
        assert!(matches!(result, Err(WalkError::OutsideRoot(_))));
    }

    #[cfg(unix)]
    #[test]
    fn relative_path_rejects_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("site").join(OsStr::from_bytes(b"bad\xff.html"));
        assert!(matches!(
            relative_path(Path::new("site"), &path),
            Err(WalkError::NonUtf8Path(_))
        ));
    }

    #[test]
    fn has_extension_ignores_case() {
        assert!(has_extension(Path::new("a/INDEX.HTML"), "html"));
        assert!(!has_extension(Path::new("a/index.htm"), "html"));
        assert!(!has_extension(Path::new("a/html"), "html"));
    }

    #[test]
    fn converts_and_mirrors_tree() {
        let site = SiteFixture::new();
        site.page("index.html", "Home | Site", r#"<h1>Home</h1><a href="docs/index.html">Docs</a>"#);
        site.page("docs/index.html", "Docs", r#"<h1>Docs</h1><a href="api/guide.html">Guide</a>"#);
        site.page("docs/api/guide.html", "Guide", r#"<h1>Guide</h1><a href="../index.html">Up</a>"#);
        site.file("style.css", "body {}");

        let report = convert_tree(&site.config(), WalkMode::Write).unwrap();

        let destinations: Vec<_> = report.pages.iter().map(|p| p.destination.as_str()).collect();
        assert_eq!(
            destinations,
            ["docs/api/guide.vue", "docs/index.vue", "index.vue"]
        );
        assert_eq!(report.skipped, 1);
        assert_eq!(report.total_links(), 3);

        let guide = site.read_output("docs/api/guide.vue");
        assert!(guide.contains(r#"<nuxt-link to="/docs">Up</nuxt-link>"#));
        let index = site.read_output("index.vue");
        assert!(index.contains(r#"<nuxt-link to="/docs">Docs</nuxt-link>"#));
        assert!(!site.output_exists("style.css"));
        assert!(!site.output_exists("style.vue"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let site = SiteFixture::new();
        site.page("index.html", "Home", "<h1>Home</h1>");

        let report = convert_tree(&site.config(), WalkMode::DryRun).unwrap();
        assert_eq!(report.pages.len(), 1);
        assert!(!site.output_exists(""));
    }

    #[test]
    fn conversion_error_aborts_with_path() {
        let site = SiteFixture::new();
        site.file("broken.html", "<html><body><p>no title</p></body></html>");

        let result = convert_tree(&site.config(), WalkMode::Write);
        match result {
            Err(WalkError::Convert { path, source }) => {
                assert!(path.ends_with("broken.html"));
                assert!(matches!(source, ConvertError::MissingTitle));
            }
            other => panic!("expected conversion error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_pages_are_converted() {
        use std::os::unix::fs::symlink;

        let site = SiteFixture::new();
        site.page("shared/intro.html", "Intro", "<h1>Intro</h1><p>hello</p>");
        symlink(
            site.source().join("shared/intro.html"),
            site.source().join("intro.html"),
        )
        .unwrap();
        symlink(site.source().join("shared"), site.source().join("linked")).unwrap();

        let report = convert_tree(&site.config(), WalkMode::Write).unwrap();

        let sources: Vec<_> = report.pages.iter().map(|p| p.source.as_str()).collect();
        assert_eq!(sources, ["intro.html", "linked/intro.html", "shared/intro.html"]);
        assert_eq!(report.skipped, 0);
        assert!(site.read_output("intro.vue").contains("<p>hello</p>"));
        assert!(site.output_exists("linked/intro.vue"));
    }

    #[test]
    fn missing_source_is_error() {
        let site = SiteFixture::new();
        let mut config = site.config();
        config.source = config.source.join("does-not-exist");
        assert!(matches!(
            convert_tree(&config, WalkMode::Write),
            Err(WalkError::Walk(_))
        ));
    }
}
