//! Tera template set: embedded defaults plus optional user overrides.
//!
//! | Name prefix   | Used by                          |
//! |---------------|----------------------------------|
//! | `shared/`     | macros shared by every theme     |
//! | `default/`    | base slots of the default theme  |
//! | `minimal/`    | slot overrides of minimal theme  |
//!
//! A user template directory may contain `.tera` files with the same
//! relative names; they replace the embedded ones.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("shared/macros.html.tera", include_str!("templates/shared/macros.html.tera")),
    ("default/layout.html.tera", include_str!("templates/default/layout.html.tera")),
    ("default/header.html.tera", include_str!("templates/default/header.html.tera")),
    ("default/footer.html.tera", include_str!("templates/default/footer.html.tera")),
    (
        "default/navigation.html.tera",
        include_str!("templates/default/navigation.html.tera"),
    ),
    ("default/toc.html.tera", include_str!("templates/default/toc.html.tera")),
    ("default/index.html.tera", include_str!("templates/default/index.html.tera")),
    (
        "default/reflection.html.tera",
        include_str!("templates/default/reflection.html.tera"),
    ),
    ("default/members.html.tera", include_str!("templates/default/members.html.tera")),
    ("default/member.html.tera", include_str!("templates/default/member.html.tera")),
    ("default/comment.html.tera", include_str!("templates/default/comment.html.tera")),
    ("minimal/layout.html.tera", include_str!("templates/minimal/layout.html.tera")),
    ("minimal/header.html.tera", include_str!("templates/minimal/header.html.tera")),
    ("minimal/index.html.tera", include_str!("templates/minimal/index.html.tera")),
    ("minimal/member.html.tera", include_str!("templates/minimal/member.html.tera")),
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        tracing::debug!(template = %name, "user template override");
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert(
            normalize_template_name(Path::new(name)),
            (*content).to_string(),
        );
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    tera.autoescape_on(vec![".html.tera"]);
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine shared by every slot of a render context.
///
/// Templates ending in `.html.tera` are autoescaped; pre-rendered fragments
/// are passed in with `| safe`.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Embedded templates plus any overrides found in `user_template_dir`.
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    pub fn embedded() -> Result<Self, RenderError> {
        Self::new(None)
    }

    pub fn render(&self, name: &str, ctx: &tera::Context) -> Result<String, RenderError> {
        Ok(self.tera.render(name, ctx)?)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn embedded_templates_compile() {
        let engine = TemplateEngine::embedded().expect("embedded templates must parse");
        for (name, _) in TPLS {
            assert!(engine.has_template(name), "missing {name}");
        }
    }

    #[test]
    fn user_override_replaces_embedded() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("default")).unwrap();
        std::fs::write(
            dir.path().join("default").join("footer.html.tera"),
            "<footer>custom {{ project }}</footer>",
        )
        .unwrap();

        let engine = TemplateEngine::new(Some(dir.path())).unwrap();
        let mut ctx = tera::Context::new();
        ctx.insert("project", "lib");
        let out = engine.render("default/footer.html.tera", &ctx).unwrap();
        assert_eq!(out, "<footer>custom lib</footer>");
    }

    #[test]
    fn non_tera_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "{{ broken").unwrap();
        assert!(TemplateEngine::new(Some(dir.path())).is_ok());
    }

    #[test]
    fn html_templates_are_escaped() {
        let engine = TemplateEngine::embedded().unwrap();
        let mut ctx = tera::Context::new();
        ctx.insert("paragraphs", &vec!["a < b".to_string()]);
        let out = engine.render("default/comment.html.tera", &ctx).unwrap();
        assert!(out.contains("a &lt; b"), "got: {out}");
    }
}
