//! Single-page conversion: HTML document → component file.
//!
//! Takes the relative path and raw HTML of one generated page and produces the
//! text of a single-file component. The document is parsed once with
//! [scraper](https://docs.rs/scraper); the parsed tree is private to the call.
//! Each anchor is swapped for a marker text node, the kept body elements are
//! serialized with html5ever, and the markers are then expanded into the
//! rendered links in a single pass.
//!
//! ## Transform
//!
//! 1. `<title>` text becomes the page title (`|` → `-`).
//! 2. Every `<a>` is read into an [`Anchor`]. Internal hrefs are resolved
//!    against the page's directory into root-absolute routes; external ones
//!    follow the `links.external` policy.
//! 3. `<body>` child elements, minus the leading title block, become the
//!    template content.
//! 4. Template, script, and (manual variant) style sections are assembled.
//!
//! ## Output Shape
//!
//! ```text
//! <template>
//! <div>
//! <div>                                 ← manual variant: breadcrumb markup
//! <nuxt-link to="/">Home</nuxt-link> /
//! <span>guide</span>
//! </div>
//! ...body content...
//! </div>
//! </template>
//! <script lang="ts">
//! import { Component, Vue } from "nuxt-property-decorator"
//! @Component
//! export default class Page extends Vue {
//!   head() { ... }                      ← returns the page title
//! }
//! </script>
//! <style>                               ← manual variant only
//! ...page <style> contents...
//! </style>
//! ```
//!
//! The component variant swaps the breadcrumb markup for a single
//! `<v-breadcrumbs :items="breadcrumbs">` bound to a class field holding the
//! trail as JSON, and carries no styles.

use crate::config::{ConvertConfig, ExternalLinks, LeadingElement, LinkElement, Variant};
use crate::paths;
use crate::types::Breadcrumb;
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use maud::{Markup, html};
use scraper::node::Text;
use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;
use std::io;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("page has no <title> element")]
    MissingTitle,
    #[error("link {text:?} has no href attribute")]
    MissingHref { text: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] io::Error),
}

/// An `<a>` element as read from the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: Option<String>,
    /// Visible text; nested markup is flattened.
    pub text: String,
}

impl Anchor {
    fn from_element(element: ElementRef<'_>) -> Self {
        Self {
            href: element.value().attr("href").map(str::to_string),
            text: element.text().collect(),
        }
    }

    /// The href, or [`ConvertError::MissingHref`].
    pub fn href(&self) -> Result<&str, ConvertError> {
        self.href.as_deref().ok_or_else(|| ConvertError::MissingHref {
            text: self.text.clone(),
        })
    }
}

/// Where a rewritten link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Root-absolute route inside the converted site
    Route(String),
    /// Href left untouched
    External(String),
}

/// Planned replacement of one source anchor.
struct Rewrite {
    text: String,
    target: LinkTarget,
}

/// Extracted page content, without rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    pub title: String,
    pub anchors: Vec<Anchor>,
    pub styles: Vec<String>,
}

/// Result of converting one page.
#[derive(Debug, Clone)]
pub struct PageComponent {
    pub title: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Number of anchors rewritten (internal and external)
    pub links: usize,
    /// Full text of the component file
    pub text: String,
}

/// Leading elements that `drop-if-heading` treats as a title block.
const HEADING_ELEMENTS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup"];

/// Delimits the index of a rewritten anchor in serialized output. A
/// private-use code point, so it never needs escaping.
const LINK_MARK: char = '\u{E000}';

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static STYLE: LazyLock<Selector> = LazyLock::new(|| selector("style"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static BODY: LazyLock<Selector> = LazyLock::new(|| selector("body"));
// The parser drops one newline right after these start tags.
static PREFORMATTED: LazyLock<Selector> = LazyLock::new(|| selector("pre, textarea, listing"));

fn page_title(document: &Html) -> Result<String, ConvertError> {
    let title = document
        .select(&TITLE)
        .next()
        .ok_or(ConvertError::MissingTitle)?;
    Ok(title.text().collect::<String>().replace('|', "-"))
}

fn page_styles(document: &Html) -> Vec<String> {
    document
        .select(&STYLE)
        .map(|style| style.text().collect())
        .collect()
}

/// Read title, anchors, and styles from a page without converting it.
pub fn inspect(html: &str) -> Result<PageSummary, ConvertError> {
    let document = Html::parse_document(html);
    Ok(PageSummary {
        title: page_title(&document)?,
        anchors: document
            .select(&ANCHOR)
            .map(Anchor::from_element)
            .collect(),
        styles: page_styles(&document),
    })
}

/// Decide where an href found on `page_path` should point.
pub fn plan_link(page_path: &str, href: &str, policy: ExternalLinks) -> LinkTarget {
    if policy == ExternalLinks::Keep && paths::is_external(href) {
        LinkTarget::External(href.to_string())
    } else {
        LinkTarget::Route(paths::resolve_link(page_path, href))
    }
}

fn link_marker(index: usize) -> String {
    format!("{LINK_MARK}{index}{LINK_MARK}")
}

/// Swap every anchor for a marker text node, returning the planned rewrites
/// in marker order.
fn replace_anchors(
    document: &mut Html,
    page_path: &str,
    policy: ExternalLinks,
) -> Result<Vec<Rewrite>, ConvertError> {
    let anchors: Vec<_> = document
        .select(&ANCHOR)
        .map(|element| (element.id(), Anchor::from_element(element)))
        .collect();

    let mut rewrites = Vec::with_capacity(anchors.len());
    for (id, anchor) in anchors {
        let target = plan_link(page_path, anchor.href()?, policy);
        if let Some(mut node) = document.tree.get_mut(id) {
            while let Some(mut child) = node.first_child() {
                child.detach();
            }
            *node.value() = Node::Text(Text {
                text: link_marker(rewrites.len()).into(),
            });
        }
        rewrites.push(Rewrite {
            text: anchor.text,
            target,
        });
    }
    Ok(rewrites)
}

/// Double the leading newline of `pre`, `textarea` and `listing` content so
/// that it survives the next parse of the serialized output.
fn restore_leading_newlines(document: &mut Html) {
    let texts: Vec<_> = document
        .select(&PREFORMATTED)
        .filter_map(|element| element.first_child())
        .filter(|child| matches!(child.value(), Node::Text(text) if text.starts_with('\n')))
        .map(|child| child.id())
        .collect();

    for id in texts {
        if let Some(mut node) = document.tree.get_mut(id) {
            if let Node::Text(text) = node.value() {
                text.text = format!("\n{}", &*text.text).into();
            }
        }
    }
}

/// Serialize an element and its subtree.
///
/// Scripting is enabled to match how the page was parsed, so `<noscript>`
/// content is written back as raw text.
fn outer_html(element: ElementRef<'_>) -> Result<String, ConvertError> {
    let opts = SerializeOpts {
        scripting_enabled: true,
        traversal_scope: TraversalScope::IncludeNode,
        create_missing_parent: false,
    };
    let mut buf = Vec::new();
    serialize(&mut buf, &element, opts)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Replace link markers in `html` with the rendered links they index.
fn expand_links(html: &str, links: &[String]) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find(LINK_MARK) {
        out.push_str(&rest[..start]);
        let after = &rest[start + LINK_MARK.len_utf8()..];
        let link = after.find(LINK_MARK).and_then(|end| {
            let index: usize = after[..end].parse().ok()?;
            Some((end, links.get(index)?))
        });
        match link {
            Some((end, markup)) => {
                out.push_str(markup);
                rest = &after[end + LINK_MARK.len_utf8()..];
            }
            None => {
                out.push(LINK_MARK);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_link(text: &str, target: &LinkTarget, element: LinkElement) -> Markup {
    match (target, element) {
        (LinkTarget::Route(to), LinkElement::NuxtLink) => html! { nuxt-link to=(to) { (text) } },
        (LinkTarget::Route(href), LinkElement::A) | (LinkTarget::External(href), _) => {
            html! { a href=(href) { (text) } }
        }
    }
}

/// `<body>` child elements that make up the template content.
fn content_elements<'a>(
    document: &'a Html,
    rule: LeadingElement,
    page_path: &str,
) -> Vec<ElementRef<'a>> {
    let Some(body) = document.select(&BODY).next() else {
        return Vec::new();
    };
    let children: Vec<ElementRef<'a>> = body.children().filter_map(ElementRef::wrap).collect();
    let Some(first) = children.first() else {
        return children;
    };
    let drop_first = match rule {
        LeadingElement::Drop => true,
        LeadingElement::Keep => false,
        LeadingElement::DropIfHeading => {
            let name = first.value().name();
            let is_heading = HEADING_ELEMENTS.contains(&name);
            if !is_heading {
                tracing::warn!(
                    page = page_path,
                    element = name,
                    "leading element is not a heading, keeping it"
                );
            }
            is_heading
        }
    };
    let skip = usize::from(drop_first);
    children.into_iter().skip(skip).collect()
}

/// Serialize a value as JSON safe to embed in a `<script>` block.
fn script_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, ConvertError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json.replace("</", "<\\/"))
}

fn breadcrumb_markup(trail: &[Breadcrumb], link_element: LinkElement) -> String {
    let mut s = String::from("<div>\n");
    for crumb in trail {
        if crumb.is_current() {
            s.push_str(&html! { span { (crumb.text) } }.into_string());
            s.push('\n');
        } else {
            let target = LinkTarget::Route(crumb.to.clone());
            s.push_str(&render_link(&crumb.text, &target, link_element).into_string());
            s.push_str(" /\n");
        }
    }
    s.push_str("</div>\n");
    s
}

fn script_block(
    config: &ConvertConfig,
    title: &str,
    trail: Option<&[Breadcrumb]>,
) -> Result<String, ConvertError> {
    let mut s = String::from("<script lang=\"ts\">\n");
    s.push_str(&format!(
        "import {{ Component, Vue }} from {}\n",
        script_json(&config.script.decorator_module, false)?
    ));
    s.push_str("@Component\n");
    s.push_str(&format!(
        "export default class {} extends Vue {{\n",
        config.script.class_name
    ));
    if let Some(trail) = trail {
        let json = script_json(trail, true)?;
        s.push_str(&format!("  breadcrumbs = {}\n\n", json.replace('\n', "\n  ")));
    }
    s.push_str("  head() {\n    return {\n");
    s.push_str(&format!("      title: {},\n", script_json(title, false)?));
    s.push_str("    }\n  }\n}\n</script>\n");
    Ok(s)
}

/// Convert one page, returning the component text with its metadata.
///
/// `rel_path` is the page's `/`-separated path under the source root; it
/// anchors link resolution and the breadcrumb trail.
pub fn convert_page(
    rel_path: &str,
    html: &str,
    config: &ConvertConfig,
) -> Result<PageComponent, ConvertError> {
    let mut document = Html::parse_document(html);
    let title = page_title(&document)?;
    let styles = page_styles(&document);
    let trail = paths::breadcrumbs(rel_path, &config.breadcrumbs.root_label);

    let content: Vec<_> = content_elements(&document, config.body.leading_element, rel_path)
        .into_iter()
        .map(|element| element.id())
        .collect();
    let rewrites = replace_anchors(&mut document, rel_path, config.links.external)?;
    restore_leading_newlines(&mut document);

    let mut body = String::new();
    for id in content {
        let Some(node) = document.tree.get(id) else {
            continue;
        };
        match ElementRef::wrap(node) {
            Some(element) => body.push_str(&outer_html(element)?),
            // an anchor that was itself a body child is now its marker
            None => {
                if let Node::Text(marker) = node.value() {
                    body.push_str(marker);
                }
            }
        }
        body.push('\n');
    }
    let links: Vec<String> = rewrites
        .iter()
        .map(|rewrite| {
            render_link(&rewrite.text, &rewrite.target, config.links.element).into_string()
        })
        .collect();
    let content = expand_links(&body, &links);

    let mut text = String::from("<template>\n<div>\n");
    match config.variant {
        Variant::Manual => text.push_str(&breadcrumb_markup(&trail, config.links.element)),
        Variant::Component => text.push_str(&format!(
            "<{tag} :items=\"breadcrumbs\"></{tag}>\n",
            tag = config.breadcrumbs.component
        )),
    }
    text.push_str(&content);
    text.push_str("</div>\n</template>\n");

    match config.variant {
        Variant::Manual => {
            text.push_str(&script_block(config, &title, None)?);
            text.push_str("<style>\n");
            for style in styles {
                text.push_str(&style);
                text.push('\n');
            }
            text.push_str("</style>\n");
        }
        Variant::Component => text.push_str(&script_block(config, &title, Some(&trail))?),
    }

    tracing::debug!(page = rel_path, links = rewrites.len(), "converted page");
    Ok(PageComponent {
        title,
        breadcrumbs: trail,
        links: rewrites.len(),
        text,
    })
}

/// Convert one page to component file text.
pub fn convert(rel_path: &str, html: &str, config: &ConvertConfig) -> Result<String, ConvertError> {
    convert_page(rel_path, html, config).map(|page| page.text)
}
