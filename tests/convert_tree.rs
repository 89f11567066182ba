//! End-to-end conversion of small documentation trees.
//!
//! Each test builds a source tree in a temp directory, runs the walker, and
//! inspects the written component files.

use nuxtify::config::{ConvertConfig, Variant};
use nuxtify::walk::{WalkMode, convert_tree};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn html_page(title: &str, body: &str) -> String {
    format!("<html><head><title>{title}</title></head><body>{body}</body></html>")
}

fn setup() -> (TempDir, ConvertConfig) {
    let tmp = TempDir::new().unwrap();
    let config = ConvertConfig {
        source: tmp.path().join("site"),
        destination: tmp.path().join("pages"),
        ..ConvertConfig::default()
    };
    fs::create_dir_all(&config.source).unwrap();
    (tmp, config)
}

#[test]
fn root_index_scenario() {
    let (_tmp, config) = setup();
    write(
        &config.source,
        "index.html",
        &html_page("Home | Site", r#"<h1>Home</h1><p><a href="page.html">Page</a></p>"#),
    );

    convert_tree(&config, WalkMode::Write).unwrap();

    let vue = fs::read_to_string(config.destination.join("index.vue")).unwrap();
    assert!(vue.contains("<span>Home</span>"));
    assert!(!vue.contains(r#"<nuxt-link to="/">Home</nuxt-link>"#));
    assert!(vue.contains(r#"title: "Home - Site","#));
    assert!(vue.contains(r#"<nuxt-link to="/page">Page</nuxt-link>"#));
}

#[test]
fn nested_index_scenario() {
    let (_tmp, config) = setup();
    write(
        &config.source,
        "docs/api/index.html",
        &html_page("API", r#"<h1>API</h1><a href="../guide.html">Guide</a>"#),
    );

    convert_tree(&config, WalkMode::Write).unwrap();

    let vue = fs::read_to_string(config.destination.join("docs/api/index.vue")).unwrap();
    assert!(vue.contains(r#"<nuxt-link to="/docs/guide">Guide</nuxt-link>"#));
    assert!(vue.contains(r#"<nuxt-link to="/docs/">docs</nuxt-link> /"#));
    assert!(vue.contains("<span>api</span>"));
}

#[test]
fn non_html_only_directory_produces_nothing() {
    let (_tmp, config) = setup();
    write(&config.source, "assets/logo.png", "png");
    write(&config.source, "assets/site.css", "body {}");

    let report = convert_tree(&config, WalkMode::Write).unwrap();

    assert!(report.pages.is_empty());
    assert_eq!(report.skipped, 2);
    assert!(!config.destination.exists());
}

#[test]
fn empty_directories_are_not_mirrored() {
    let (_tmp, config) = setup();
    fs::create_dir_all(config.source.join("empty/deeper")).unwrap();
    write(&config.source, "assets/logo.png", "png");
    write(&config.source, "docs/guide.html", &html_page("Guide", "<h1>Guide</h1>"));

    convert_tree(&config, WalkMode::Write).unwrap();

    assert!(config.destination.join("docs/guide.vue").is_file());
    assert!(!config.destination.join("empty").exists());
    assert!(!config.destination.join("assets").exists());
}

#[test]
fn component_variant_writes_breadcrumb_data() {
    let (_tmp, mut config) = setup();
    config.variant = Variant::Component;
    config.breadcrumbs.root_label = "VDex".to_string();
    write(
        &config.source,
        "species/pikachu.html",
        &html_page("Pikachu | VDex", "<h1>Pikachu</h1><p>Electric</p>"),
    );

    convert_tree(&config, WalkMode::Write).unwrap();

    let vue = fs::read_to_string(config.destination.join("species/pikachu.vue")).unwrap();
    assert!(vue.contains(r#"<v-breadcrumbs :items="breadcrumbs"></v-breadcrumbs>"#));
    assert!(vue.contains(r#""text": "VDex","#));
    assert!(vue.contains(r#""to": "/species/pikachu/","#));
    assert!(vue.contains("<p>Electric</p>"));
    assert!(!vue.contains("<style>"));
}

#[test]
fn custom_extensions() {
    let (_tmp, mut config) = setup();
    config.source_extension = "htm".to_string();
    config.target_extension = "page_vue".to_string();
    write(&config.source, "a.htm", &html_page("A", "<h1>A</h1>"));
    write(&config.source, "b.html", &html_page("B", "<h1>B</h1>"));

    let report = convert_tree(&config, WalkMode::Write).unwrap();

    assert_eq!(report.pages.len(), 1);
    assert!(config.destination.join("a.page_vue").is_file());
    assert!(!config.destination.join("b.page_vue").exists());
}

#[test]
fn first_error_aborts_run() {
    let (_tmp, config) = setup();
    write(&config.source, "a.html", &html_page("A", "<h1>A</h1>"));
    write(&config.source, "b.html", "<html><body><h1>no title</h1></body></html>");
    write(&config.source, "c.html", &html_page("C", "<h1>C</h1>"));

    let err = convert_tree(&config, WalkMode::Write).unwrap_err();

    assert!(err.to_string().contains("b.html"));
    assert!(config.destination.join("a.vue").is_file());
    assert!(!config.destination.join("c.vue").exists());
}
