//! Path and breadcrumb derivation.
//!
//! Everything here is a pure function over `/`-separated relative paths;
//! the walker converts OS paths before calling in, so results are identical
//! on every platform.
//!
//! ## Normalization
//!
//! Pages and link targets are compared in *normalized* form: extension
//! stripped, and a trailing `index` segment collapsed into its directory.
//!
//! ```text
//! docs/index.html   → docs
//! docs/guide.html   → docs/guide
//! index.html        → (empty: the site root)
//! ```
//!
//! ## Breadcrumbs
//!
//! ```text
//! docs/api/index.html → Home (/) › docs (/docs/) › api (/docs/api/, current)
//! ```

use crate::types::Breadcrumb;

/// Target path of the root breadcrumb.
pub const ROOT: &str = "/";

/// The file stem that stands for its containing directory.
const INDEX_STEM: &str = "index";

/// Split a path into (directory, last segment). The directory is empty for
/// single-segment paths.
fn split_last(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(pos) => (&path[..pos], &path[pos + 1..]),
        None => ("", path),
    }
}

/// Replace the final extension of `path` with `new_ext`.
///
/// `new_ext` includes its leading dot (`".vue"`); pass `""` to strip the
/// extension. A leading dot on the file name (`.hidden`) is part of the
/// name, not an extension. Paths without an extension get `new_ext`
/// appended. A last segment of `.` or `..` is a directory reference and is
/// returned unchanged.
///
/// ```
/// use nuxtify::paths::extension_swap;
/// assert_eq!(extension_swap("docs/guide.html", ".vue"), "docs/guide.vue");
/// assert_eq!(extension_swap("docs/guide.html", ""), "docs/guide");
/// ```
pub fn extension_swap(path: &str, new_ext: &str) -> String {
    let (dir, name) = split_last(path);
    if matches!(name, "." | "..") {
        return path.to_string();
    }
    let stem = match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    };
    if path.contains('/') {
        format!("{dir}/{stem}{new_ext}")
    } else {
        format!("{stem}{new_ext}")
    }
}

/// Collapse trailing `index` segments into their parent directory.
///
/// `docs/index` becomes `docs`; a root-level `index` becomes the empty path.
/// Any other path is returned unchanged.
pub fn collapse_index(path: &str) -> String {
    let mut path = path;
    loop {
        let (dir, name) = split_last(path);
        if name != INDEX_STEM {
            return path.to_string();
        }
        path = dir;
    }
}

/// Strip the extension, then collapse `index`.
pub fn normalize(path: &str) -> String {
    collapse_index(&extension_swap(path, ""))
}

/// Directory part of a relative path (empty at the root).
pub fn parent_dir(path: &str) -> &str {
    split_last(path).0
}

/// Join `base` and `rel`, resolving `.` and `..` segments.
///
/// `..` above the root is clamped at the root. Empty segments from doubled
/// or trailing slashes are dropped.
pub fn join_segments(base: &str, rel: &str) -> Vec<String> {
    let mut stack: Vec<String> = Vec::new();
    for segment in base.split('/').chain(rel.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            s => stack.push(s.to_string()),
        }
    }
    stack
}

/// Split an href into its path and a `?query` / `#fragment` suffix.
fn split_suffix(href: &str) -> (&str, &str) {
    match href.find(['?', '#']) {
        Some(pos) => (&href[..pos], &href[pos..]),
        None => (href, ""),
    }
}

/// True for hrefs that point outside the converted tree: a URI scheme
/// (`https:`, `mailto:`), protocol-relative (`//cdn`), or a pure fragment.
pub fn is_external(href: &str) -> bool {
    if href.starts_with("//") || href.starts_with('#') {
        return true;
    }
    // RFC 3986: scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
    match href.find(':') {
        Some(colon) => {
            let scheme = &href[..colon];
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Resolve a link found on `page_path` to a root-absolute route.
///
/// The href path is normalized and joined with the page's directory; an href
/// starting with `/` is resolved from the root instead. A query or fragment
/// suffix is carried through unchanged.
///
/// ```
/// use nuxtify::paths::resolve_link;
/// assert_eq!(resolve_link("docs/api/index.html", "../guide.html"), "/docs/guide");
/// assert_eq!(resolve_link("index.html", "page.html#top"), "/page#top");
/// ```
pub fn resolve_link(page_path: &str, href: &str) -> String {
    let (path, suffix) = split_suffix(href);
    let base = if path.starts_with('/') {
        ""
    } else {
        parent_dir(page_path)
    };
    let target = if path.is_empty() {
        // `?x` or an empty href points back at the page itself
        normalize(page_path)
    } else {
        join_segments(base, &normalize(path)).join("/")
    };
    let mut route = String::from(ROOT);
    route.push_str(&join_segments("", &target).join("/"));
    route.push_str(suffix);
    route
}

/// Build the breadcrumb trail for the page at `rel_path`.
///
/// The trail starts at the root entry and adds one entry per segment of the
/// normalized path. The last entry is always marked current.
pub fn breadcrumbs(rel_path: &str, root_label: &str) -> Vec<Breadcrumb> {
    let mut trail = vec![Breadcrumb {
        text: root_label.to_string(),
        to: ROOT.to_string(),
        disabled: false,
        nuxt: false,
    }];
    let mut to = String::from(ROOT);
    for segment in normalize(rel_path).split('/').filter(|s| !s.is_empty()) {
        to.push_str(segment);
        to.push('/');
        trail.push(Breadcrumb {
            text: segment.to_string(),
            to: to.clone(),
            disabled: false,
            nuxt: true,
        });
    }
    if let Some(last) = trail.last_mut() {
        last.disabled = true;
    }
    trail
}
