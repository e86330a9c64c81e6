//! `folio toc`: print the single-page table of contents of a project.

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use folio_core::loader::load_project;
use folio_renderer::{build_toc, MinimalTheme, NavigationItem, TemplateEngine, Theme};

/// Arguments for `folio toc`.
#[derive(Args, Debug)]
pub struct TocArgs {
    /// Project model file (`.json`, `.yaml` or `.yml`).
    pub project: PathBuf,

    /// Print the navigation tree as JSON.
    #[arg(long)]
    pub json: bool,
}

impl TocArgs {
    pub fn run(self) -> Result<()> {
        let mut project = load_project(&self.project)
            .with_context(|| format!("failed to load '{}'", self.project.display()))?;

        // Anchor urls are assigned the same way `folio render --theme minimal` does.
        let engine = Rc::new(TemplateEngine::embedded().context("failed to load templates")?);
        MinimalTheme::new(engine).get_urls(&mut project);

        let mut toc = NavigationItem::for_reflection(&project);
        toc.is_expanded = true;
        build_toc(&project, &mut toc);

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&toc).context("failed to serialize toc JSON")?
            );
        } else {
            println!("{}", toc.title.bold());
            print_tree(&toc.children, 1);
        }
        Ok(())
    }
}

fn print_tree(items: &[NavigationItem], depth: usize) {
    for item in items {
        let kind = item.kind.map(|k| k.to_string()).unwrap_or_default();
        let url = item.url.as_deref().unwrap_or_default();
        println!(
            "{}{} {} {}",
            "  ".repeat(depth),
            item.title,
            format!("[{kind}]").bright_black(),
            url.dimmed()
        );
        print_tree(&item.children, depth + 1);
    }
}
