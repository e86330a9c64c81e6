//! Renderer: drives a theme over a project and collects the output files.
//!
//! ```text
//! set_theme ──► theme.attach(pipeline)
//! render    ──► theme.get_urls(project)
//!               for each mapping:
//!                   pipeline.begin_page   (components, then Begin listeners)
//!                   theme.render(page)
//!                   pipeline.end_page     (End listeners)
//!               components.finish        (assets, search index)
//! ```

use std::path::{Path, PathBuf};

use folio_core::Reflection;

use crate::components::{ComponentName, ComponentRegistry, RendererComponent};
use crate::error::RenderError;
use crate::events::{ListenerId, PageEvent, PageListener, PageListeners, PageModel, PagePhase};
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A rendered file, `path` relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: String,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderOutput {
    pub files: Vec<OutputFile>,
}

impl RenderOutput {
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&OutputFile> {
        let path = path.as_ref();
        self.files.iter().find(|f| f.path == path)
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.files.iter().map(|f| f.path.as_path()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Components and listeners a theme can hook into.
#[derive(Default)]
pub struct Pipeline {
    components: ComponentRegistry,
    listeners: PageListeners,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.components
    }

    pub fn remove_component(&mut self, name: ComponentName) -> bool {
        self.components.remove(name)
    }

    pub fn take_component(&mut self, name: ComponentName) -> Option<Box<dyn RendererComponent>> {
        self.components.take(name)
    }

    pub fn add_component(&mut self, component: Box<dyn RendererComponent>) {
        self.components.add(component);
    }

    pub fn on(&mut self, phase: PagePhase, listener: PageListener) -> ListenerId {
        self.listeners.on(phase, listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.listeners.off(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn begin_page(&mut self, page: &mut PageEvent<'_>) {
        self.components.begin_page(page);
        self.listeners.emit(PagePhase::Begin, page);
    }

    pub fn end_page(&mut self, page: &mut PageEvent<'_>) {
        self.listeners.emit(PagePhase::End, page);
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct Renderer {
    pipeline: Pipeline,
    theme: Option<Box<dyn Theme>>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: Box<dyn Theme>) -> Self {
        let mut renderer = Self::new();
        renderer.set_theme(theme);
        renderer
    }

    /// Install `theme`, detaching the previous one first.
    pub fn set_theme(&mut self, mut theme: Box<dyn Theme>) {
        if let Some(mut old) = self.theme.take() {
            old.detach(&mut self.pipeline);
        }
        theme.attach(&mut self.pipeline);
        self.theme = Some(theme);
    }

    pub fn theme(&self) -> Option<&dyn Theme> {
        self.theme.as_deref()
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    /// Render every page of `project`. The theme assigns urls and anchors on
    /// the tree before any page is rendered.
    pub fn render(&mut self, project: &mut Reflection) -> Result<RenderOutput, RenderError> {
        let Renderer { pipeline, theme } = self;
        let theme = theme.as_deref().ok_or(RenderError::NoTheme)?;

        let urls = theme.get_urls(project);
        let project: &Reflection = project;
        tracing::debug!(theme = %theme.name(), pages = urls.len(), "url mappings built");

        let mut output = RenderOutput::default();
        for mapping in urls {
            let model = project
                .find(mapping.model)
                .ok_or(RenderError::MissingModel { id: mapping.model })?;
            let mut page = PageEvent::new(
                mapping.url,
                project,
                PageModel::Reflection(model),
                mapping.template,
            );
            pipeline.begin_page(&mut page);
            page.contents = Some(theme.render(&page)?);
            pipeline.end_page(&mut page);

            tracing::debug!(url = %page.url, template = %page.template, "rendered page");
            let contents = page.contents.take().unwrap_or_default();
            output.files.push(OutputFile::new(page.url, contents));
        }
        output.files.extend(pipeline.components.finish(project)?);
        Ok(output)
    }
}
