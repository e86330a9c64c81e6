//! `folio render`: render a project model and write the output directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use folio_core::config::{discover_config, load_config_at};
use folio_core::FolioConfig;
use folio_writer::{pipeline, RenderOptions, RenderSummary, WriteResult};

use crate::ThemeArg;

/// Arguments for `folio render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Project model file (`.json`, `.yaml` or `.yml`).
    pub project: PathBuf,

    /// Output directory (default: `out` from folio.yaml, else `docs`).
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Theme to render with: minimal or default.
    #[arg(long)]
    pub theme: Option<ThemeArg>,

    /// Directory of `.tera` files overriding the embedded templates.
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Config file (default: folio.yaml next to the project file).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Title to use instead of the project name.
    #[arg(long)]
    pub name: Option<String>,

    /// Show what would be written without writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let options = self.options()?;
        let summary = pipeline::run(&options)
            .with_context(|| format!("render failed for '{}'", options.project.display()))?;
        print_results(&summary, options.dry_run);
        Ok(())
    }

    /// Merge config-file values with CLI flags; flags win.
    fn options(&self) -> Result<RenderOptions> {
        let (config, config_dir) = self.load_config()?;
        let mut options = RenderOptions::from_config(&self.project, &config);
        options.out = resolve(&config_dir, options.out);
        options.templates = options.templates.map(|t| resolve(&config_dir, t));

        if let Some(out) = &self.out {
            options.out = out.clone();
        }
        if let Some(theme) = self.theme {
            options.theme = theme.into();
        }
        if let Some(templates) = &self.templates {
            options.templates = Some(templates.clone());
        }
        if let Some(name) = &self.name {
            options.name = Some(name.clone());
        }
        options.dry_run = self.dry_run;
        Ok(options)
    }

    fn load_config(&self) -> Result<(FolioConfig, PathBuf)> {
        match &self.config {
            Some(path) => {
                let config = load_config_at(path)
                    .with_context(|| format!("failed to load config '{}'", path.display()))?;
                Ok((config, parent_dir(path)))
            }
            None => {
                let dir = parent_dir(&self.project);
                let config = discover_config(&dir).context("failed to load folio.yaml")?;
                Ok((config, dir))
            }
        }
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Config paths are relative to the config file.
fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

fn print_results(summary: &RenderSummary, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let count = |pred: fn(&WriteResult) -> bool| summary.writes.iter().filter(|w| pred(w)).count();
    let written = count(|w| {
        matches!(w, WriteResult::Written { .. } | WriteResult::WouldWrite { .. })
    });
    let unchanged = count(|w| matches!(w, WriteResult::Unchanged { .. }));
    let removed = count(|w| {
        matches!(w, WriteResult::Removed { .. } | WriteResult::WouldRemove { .. })
    });

    if written == 0 && removed == 0 {
        println!(
            "{prefix}{} '{}': nothing to do ({} unchanged)",
            "✓".green(),
            summary.project_name,
            unchanged
        );
        return;
    }

    println!(
        "{prefix}{} '{}' rendered with {} theme ({} pages; {} written, {} unchanged, {} removed)",
        "✓".green(),
        summary.project_name,
        summary.theme,
        summary.pages,
        written,
        unchanged,
        removed
    );

    for w in &summary.writes {
        match w {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
            WriteResult::Unchanged { path } => {
                println!("  ·  {}", path.display().to_string().dimmed());
            }
            WriteResult::Removed { path } => println!("  ✗  {}", path.display()),
            WriteResult::WouldRemove { path } => println!("  -  {}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ThemeName;

    fn args(project: &str) -> RenderArgs {
        RenderArgs {
            project: PathBuf::from(project),
            out: None,
            theme: None,
            templates: None,
            config: None,
            name: None,
            dry_run: false,
        }
    }

    #[test]
    fn config_paths_resolve_against_config_dir() {
        assert_eq!(resolve(Path::new("site"), PathBuf::from("docs")), PathBuf::from("site/docs"));
        assert_eq!(resolve(Path::new(""), PathBuf::from("docs")), PathBuf::from("docs"));
    }

    #[test]
    fn flags_override_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let project = dir.path().join("project.json");
        let mut args = args(project.to_str().unwrap());
        args.theme = Some(ThemeArg(ThemeName::Default));
        args.out = Some(PathBuf::from("elsewhere"));
        args.dry_run = true;

        let options = args.options().unwrap();
        assert_eq!(options.theme, ThemeName::Default);
        assert_eq!(options.out, PathBuf::from("elsewhere"));
        assert!(options.dry_run);
    }

    #[test]
    fn discovered_config_applies() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("folio.yaml"), "theme: default\nout: site\n").unwrap();
        let project = dir.path().join("project.json");

        let options = args(project.to_str().unwrap()).options().unwrap();
        assert_eq!(options.theme, ThemeName::Default);
        assert_eq!(options.out, dir.path().join("site"));
    }
}
