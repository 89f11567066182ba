//! # nuxtify
//!
//! Converts a tree of statically generated HTML documentation into Nuxt page
//! components. Each `.html` file becomes a `.vue` single-file component at the
//! mirrored path, with internal links rewritten into router links and a
//! breadcrumb trail derived from the page's location.
//!
//! # Pipeline
//!
//! ```text
//! site/**/*.html ──walk──▶ convert(path, html) ──▶ pages/**/*.vue
//!                              │
//!                              ├─ paths::resolve_link     (every <a>)
//!                              └─ paths::breadcrumbs      (page location)
//! ```
//!
//! Every page is converted independently: no state is carried from one file
//! to the next, and the first error aborts the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`walk`] | Walks the source tree, converts pages, writes components |
//! | [`convert`] | Single-page transform: title, links, body, template assembly |
//! | [`paths`] | Pure path functions: extension swap, index collapsing, breadcrumbs |
//! | [`config`] | `nuxtify.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Shared types (`Breadcrumb`) |
//! | [`output`] | CLI output formatting for conversion reports |
//!
//! # Design Decisions
//!
//! ## Private Documents
//!
//! Each page is parsed with `scraper` into a tree owned by the conversion
//! call. Anchors are swapped for marker text nodes, the body is serialized
//! with html5ever, and the markers are expanded into rendered links, so a
//! conversion is a pure function of `(path, html, config)`.
//!
//! ## Index Collapsing
//!
//! `docs/index.html` and links to it both normalize to `docs`, so a route to
//! a directory and a route to its index page are the same route.
//!
//! ## External Links
//!
//! Hrefs with a scheme, `//host` hrefs, and pure fragments are left alone by
//! default. The `links.external = "rewrite"` setting resolves them like any
//! relative href instead.

pub mod config;
pub mod convert;
pub mod output;
pub mod paths;
pub mod types;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_helpers;
