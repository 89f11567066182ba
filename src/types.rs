//! Shared types used by the deriver, the converter, and CLI output.
//!
//! [`Breadcrumb`] is serialized verbatim into component scripts (variant B),
//! so its field names follow the shape the breadcrumb UI component expects.

use serde::{Deserialize, Serialize};

/// One entry of a page's breadcrumb trail.
///
/// Trails are ordered from the site root to the current page. The last entry
/// is always `disabled` (the current page, not navigable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Display text: the root label, or the raw path segment
    pub text: String,
    /// Root-absolute target path with trailing slash (`/`, `/docs/`)
    pub to: String,
    /// True for the current page
    pub disabled: bool,
    /// Route through the client-side router (every entry except the root)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nuxt: bool,
}

impl Breadcrumb {
    pub fn is_current(&self) -> bool {
        self.disabled
    }
}
