//! Converter configuration.
//!
//! Handles loading, validating, and merging `nuxtify.toml`. Every value has a
//! stock default; a config file only lists the keys it overrides, and CLI
//! flags override the file.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source = "site"              # Directory of generated HTML pages
//! destination = "pages"        # Directory receiving component files
//! source_extension = "html"    # Files with this extension are converted
//! target_extension = "vue"     # Extension of written files
//! variant = "manual"           # "manual" or "component" (see below)
//!
//! [breadcrumbs]
//! root_label = "Home"          # Text of the first breadcrumb
//! component = "v-breadcrumbs"  # Breadcrumb component (component variant)
//!
//! [links]
//! element = "nuxt-link"        # "nuxt-link" or "a"
//! external = "keep"            # "keep" or "rewrite"
//!
//! [body]
//! leading_element = "drop"     # "drop", "drop-if-heading", or "keep"
//!
//! [script]
//! class_name = "Page"
//! decorator_module = "nuxt-property-decorator"
//! ```
//!
//! ## Variants
//!
//! - `manual`: breadcrumbs rendered as plain markup, page `<style>` blocks
//!   carried into the component.
//! - `component`: breadcrumbs rendered by a UI component bound to a data
//!   field; no styles carried over.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "nuxtify.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Output shape of generated component files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Hand-rendered breadcrumb markup plus carried-over page styles
    #[default]
    Manual,
    /// Breadcrumb UI component bound to a precomputed data field
    Component,
}

/// Element used for rewritten internal links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkElement {
    /// `<nuxt-link to="...">`
    #[default]
    NuxtLink,
    /// `<a href="...">`
    A,
}

/// Policy for hrefs that leave the converted tree (`https:`, `mailto:`,
/// `//host`, `#fragment`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExternalLinks {
    /// Emit them unchanged as plain anchors.
    #[default]
    Keep,
    /// Resolve them like any relative href.
    Rewrite,
}

/// Which leading `<body>` child is dropped from the template.
///
/// Generated documentation usually opens the body with a title block that
/// the component re-derives from `<title>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadingElement {
    /// Always drop the first child element.
    #[default]
    Drop,
    /// Drop the first child element only if it is a heading.
    DropIfHeading,
    /// Keep every child element.
    Keep,
}

/// Converter configuration loaded from `nuxtify.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Root of the HTML tree to convert.
    pub source: PathBuf,
    /// Root of the component tree to write.
    pub destination: PathBuf,
    /// Extension (without dot) of files to convert.
    pub source_extension: String,
    /// Extension (without dot) of written files.
    pub target_extension: String,
    /// Output shape.
    pub variant: Variant,
    /// Breadcrumb trail settings.
    pub breadcrumbs: BreadcrumbsConfig,
    /// Link rewriting settings.
    pub links: LinksConfig,
    /// Body restructuring settings.
    pub body: BodyConfig,
    /// Script block settings.
    pub script: ScriptConfig,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("site"),
            destination: PathBuf::from("pages"),
            source_extension: "html".to_string(),
            target_extension: "vue".to_string(),
            variant: Variant::default(),
            breadcrumbs: BreadcrumbsConfig::default(),
            links: LinksConfig::default(),
            body: BodyConfig::default(),
            script: ScriptConfig::default(),
        }
    }
}

impl ConvertConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, ext) in [
            ("source_extension", &self.source_extension),
            ("target_extension", &self.target_extension),
        ] {
            if ext.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if ext.contains(['.', '/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a bare extension like \"html\", got {ext:?}"
                )));
            }
        }
        if self.source_extension.eq_ignore_ascii_case(&self.target_extension) {
            return Err(ConfigError::Validation(
                "source_extension and target_extension must differ".into(),
            ));
        }
        if self.breadcrumbs.root_label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "breadcrumbs.root_label must not be empty".into(),
            ));
        }
        if !is_tag_name(&self.breadcrumbs.component) {
            return Err(ConfigError::Validation(format!(
                "breadcrumbs.component must be a tag name like \"v-breadcrumbs\", got {:?}",
                self.breadcrumbs.component
            )));
        }
        if !is_identifier(&self.script.class_name) {
            return Err(ConfigError::Validation(format!(
                "script.class_name must be an identifier, got {:?}",
                self.script.class_name
            )));
        }
        if self.script.decorator_module.trim().is_empty() {
            return Err(ConfigError::Validation(
                "script.decorator_module must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Element or component tag: `v-breadcrumbs`, `VBreadcrumbs`, `ui.crumbs`.
fn is_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Breadcrumb trail settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreadcrumbsConfig {
    /// Text of the root entry.
    pub root_label: String,
    /// Component tag used by the `component` variant.
    pub component: String,
}

impl Default for BreadcrumbsConfig {
    fn default() -> Self {
        Self {
            root_label: "Home".to_string(),
            component: "v-breadcrumbs".to_string(),
        }
    }
}

/// Link rewriting settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    pub element: LinkElement,
    pub external: ExternalLinks,
}

/// Body restructuring settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BodyConfig {
    pub leading_element: LeadingElement,
}

/// Script block settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptConfig {
    /// Name of the exported page class.
    pub class_name: String,
    /// Module providing `Component` and `Vue`.
    pub decorator_module: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            class_name: "Page".to_string(),
            decorator_module: "nuxt-property-decorator".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ConvertConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ConvertConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ConvertConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file, falling back to stock defaults when the
/// file does not exist.
pub fn load_config(path: &Path) -> Result<ConvertConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `nuxtify.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# nuxtify configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Command-line flags (--source, --output, --variant) override this file.
# Unknown keys will cause an error.

# Directory of generated HTML pages to convert.
source = "site"

# Directory receiving the component files. The source tree is mirrored;
# directories are created only when a page is written into them.
destination = "pages"

# Files with this extension are converted, everything else is skipped.
source_extension = "html"

# Extension of the written component files.
target_extension = "vue"

# Output shape:
#   "manual"    - breadcrumbs rendered as markup, page <style> blocks kept
#   "component" - breadcrumbs rendered by a component bound to a data field
variant = "manual"

# ---------------------------------------------------------------------------
# Breadcrumbs
# ---------------------------------------------------------------------------
[breadcrumbs]
# Text of the first breadcrumb, pointing at "/".
root_label = "Home"
# Component used by the "component" variant.
component = "v-breadcrumbs"

# ---------------------------------------------------------------------------
# Links
# ---------------------------------------------------------------------------
[links]
# Element for rewritten internal links: "nuxt-link" or "a".
element = "nuxt-link"
# Links with a scheme (https:, mailto:), //host links, and #fragments:
#   "keep"    - leave them untouched
#   "rewrite" - resolve them like relative links
external = "keep"

# ---------------------------------------------------------------------------
# Body
# ---------------------------------------------------------------------------
[body]
# The first element of <body> is usually a title block that duplicates
# <title>:
#   "drop"            - always drop it
#   "drop-if-heading" - drop it only if it is h1-h6, header, or hgroup
#   "keep"            - keep everything
leading_element = "drop"

# ---------------------------------------------------------------------------
# Script
# ---------------------------------------------------------------------------
[script]
class_name = "Page"
decorator_module = "nuxt-property-decorator"
"##
}
