//! Load -> render -> write, the single entrypoint used by `folio render`.

use std::path::PathBuf;
use std::rc::Rc;

use folio_core::loader::load_project;
use folio_core::{FolioConfig, ThemeName};
use folio_renderer::{theme_for, Renderer, TemplateEngine};

use crate::error::WriteError;
use crate::writer::{write_output, WriteResult};

/// Everything a render run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub project: PathBuf,
    pub out: PathBuf,
    pub theme: ThemeName,
    pub templates: Option<PathBuf>,
    /// Replaces the project name in titles and headers.
    pub name: Option<String>,
    pub dry_run: bool,
}

impl RenderOptions {
    /// Options for `project` taken from a loaded config file.
    pub fn from_config(project: impl Into<PathBuf>, config: &FolioConfig) -> Self {
        Self {
            project: project.into(),
            out: config.out.clone(),
            theme: config.theme,
            templates: config.templates.clone(),
            name: config.name.clone(),
            dry_run: false,
        }
    }
}

/// Outcome of a render run.
#[derive(Debug)]
pub struct RenderSummary {
    pub project_name: String,
    pub theme: ThemeName,
    pub pages: usize,
    pub writes: Vec<WriteResult>,
}

pub fn run(options: &RenderOptions) -> Result<RenderSummary, WriteError> {
    let mut project = load_project(&options.project)?;
    if let Some(name) = &options.name {
        project.name = name.clone();
    }
    tracing::debug!(
        project = %project.name,
        reflections = project.descendants().count(),
        "project loaded"
    );

    let engine = Rc::new(TemplateEngine::new(options.templates.as_deref())?);
    let mut renderer = Renderer::with_theme(theme_for(options.theme, engine));
    let output = renderer.render(&mut project)?;
    let pages = output
        .files
        .iter()
        .filter(|f| f.path.extension().is_some_and(|ext| ext == "html"))
        .count();

    let writes = write_output(&options.out, &output.files, options.dry_run)?;
    tracing::info!(
        theme = %options.theme,
        pages,
        files = output.files.len(),
        out = %options.out.display(),
        "render complete"
    );

    Ok(RenderSummary {
        project_name: project.name,
        theme: options.theme,
        pages,
        writes,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const PROJECT: &str = r#"{
        "id": 0, "name": "shapes", "kind": "project",
        "children": [
            { "id": 1, "name": "Circle", "kind": "class",
              "children": [ { "id": 2, "name": "radius", "kind": "property" } ] }
        ]
    }"#;

    fn options(dir: &TempDir, theme: ThemeName) -> RenderOptions {
        let project = dir.path().join("project.json");
        fs::write(&project, PROJECT).unwrap();
        RenderOptions {
            project,
            out: dir.path().join("docs"),
            theme,
            templates: None,
            name: None,
            dry_run: false,
        }
    }

    #[test]
    fn minimal_theme_writes_single_page() {
        let dir = TempDir::new().unwrap();
        let summary = run(&options(&dir, ThemeName::Minimal)).unwrap();
        assert_eq!(summary.pages, 1);
        assert_eq!(summary.writes.len(), 1);
        assert!(dir.path().join("docs/index.html").exists());
        assert!(!dir.path().join("docs/assets").exists());
    }

    #[test]
    fn name_override_reaches_the_page() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(&dir, ThemeName::Minimal);
        opts.name = Some("Shapes Kit".to_string());
        let summary = run(&opts).unwrap();
        assert_eq!(summary.project_name, "Shapes Kit");
        let html = fs::read_to_string(dir.path().join("docs/index.html")).unwrap();
        assert!(html.contains("<title>Shapes Kit</title>"));
    }

    #[test]
    fn missing_project_is_a_model_error() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(&dir, ThemeName::Minimal);
        opts.project = dir.path().join("nope.json");
        assert!(matches!(run(&opts), Err(WriteError::Model(_))));
    }

    #[test]
    fn from_config_copies_settings() {
        let config = FolioConfig {
            theme: ThemeName::Default,
            out: PathBuf::from("site"),
            templates: Some(PathBuf::from("tpl")),
            name: Some("n".to_string()),
        };
        let opts = RenderOptions::from_config("p.json", &config);
        assert_eq!(opts.theme, ThemeName::Default);
        assert_eq!(opts.out, PathBuf::from("site"));
        assert_eq!(opts.templates.as_deref(), Some(std::path::Path::new("tpl")));
        assert!(!opts.dry_run);
    }
}
