use std::fs;
use std::path::Path;

use filetime::{set_file_mtime, FileTime};
use folio_core::ThemeName;
use folio_writer::{hash_store, run, RenderOptions, WriteResult};
use tempfile::TempDir;

const PROJECT_YAML: &str = "\
id: 0
name: shapes
kind: project
comment: Geometry helpers.
children:
  - id: 1
    name: geo
    kind: module
    children:
      - id: 2
        name: Circle
        kind: class
        children:
          - id: 3
            name: radius
            kind: property
  - id: 4
    name: VERSION
    kind: variable
";

fn setup(theme: ThemeName) -> (TempDir, RenderOptions) {
    let dir = TempDir::new().expect("tempdir");
    let project = dir.path().join("project.yaml");
    fs::write(&project, PROJECT_YAML).expect("write project");
    let options = RenderOptions {
        project,
        out: dir.path().join("docs"),
        theme,
        templates: None,
        name: None,
        dry_run: false,
    };
    (dir, options)
}

fn relative(out: &Path, writes: &[WriteResult]) -> Vec<String> {
    writes
        .iter()
        .map(|w| {
            w.path()
                .strip_prefix(out)
                .expect("inside out dir")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn default_theme_writes_pages_and_assets() {
    let (_dir, options) = setup(ThemeName::Default);
    let summary = run(&options).expect("render");

    assert_eq!(summary.pages, 3);
    assert_eq!(
        relative(&options.out, &summary.writes),
        [
            "index.html",
            "modules/geo.html",
            "classes/geo.Circle.html",
            "assets/style.css",
            "assets/search.js",
        ]
    );
    assert!(summary.writes.iter().all(|w| matches!(w, WriteResult::Written { .. })));
    assert!(hash_store::store_path(&options.out).exists());
}

#[test]
fn rerun_leaves_unchanged_files_untouched() {
    let (_dir, options) = setup(ThemeName::Minimal);
    run(&options).expect("first render");

    let index = options.out.join("index.html");
    let old = FileTime::from_unix_time(1_000_000_000, 0);
    set_file_mtime(&index, old).expect("set mtime");

    let summary = run(&options).expect("second render");
    assert_eq!(summary.writes, [WriteResult::Unchanged { path: index.clone() }]);
    let mtime = FileTime::from_last_modification_time(&fs::metadata(&index).unwrap());
    assert_eq!(mtime, old, "unchanged page was rewritten");
}

#[test]
fn switching_to_minimal_removes_multi_page_output() {
    let (_dir, mut options) = setup(ThemeName::Default);
    run(&options).expect("default render");
    assert!(options.out.join("classes/geo.Circle.html").exists());

    options.theme = ThemeName::Minimal;
    let summary = run(&options).expect("minimal render");

    assert!(matches!(summary.writes[0], WriteResult::Written { .. }));
    let removed = summary
        .writes
        .iter()
        .filter(|w| matches!(w, WriteResult::Removed { .. }))
        .count();
    assert_eq!(removed, 4);
    assert!(!options.out.join("classes/geo.Circle.html").exists());
    assert!(!options.out.join("assets/style.css").exists());

    let html = fs::read_to_string(options.out.join("index.html")).unwrap();
    assert!(html.contains(r#"id="geo.Circle.radius""#), "{html}");
}

#[test]
fn dry_run_reports_without_writing() {
    let (_dir, mut options) = setup(ThemeName::Minimal);
    options.dry_run = true;
    let summary = run(&options).expect("dry run");
    assert_eq!(
        summary.writes,
        [WriteResult::WouldWrite { path: options.out.join("index.html") }]
    );
    assert!(!options.out.exists());
}
