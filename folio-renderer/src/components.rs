//! Pluggable renderer components.
//!
//! Components hook into page begin and may contribute extra output files once
//! every page is rendered. The renderer starts with all four built-ins
//! registered; themes remove the ones they have no use for.
//!
//! | Name               | Effect                                           |
//! |--------------------|--------------------------------------------------|
//! | `assets`           | writes `assets/style.css`                        |
//! | `javascript-index` | writes `assets/search.js` (client search data)   |
//! | `navigation`       | sets `page.navigation` to the site navigation    |
//! | `toc`              | sets `page.toc` to the page's anchored members   |

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use folio_core::Reflection;

use crate::error::RenderError;
use crate::events::PageEvent;
use crate::navigation::{build_navigation, NavigationItem};
use crate::renderer::OutputFile;

const STYLE_CSS: &str = include_str!("templates/assets/style.css");

// ---------------------------------------------------------------------------
// ComponentName
// ---------------------------------------------------------------------------

/// Names of the built-in components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentName {
    Assets,
    JavascriptIndex,
    Navigation,
    Toc,
}

impl ComponentName {
    /// All built-in components in registration order.
    pub fn all() -> &'static [ComponentName] {
        &[
            ComponentName::Assets,
            ComponentName::JavascriptIndex,
            ComponentName::Navigation,
            ComponentName::Toc,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentName::Assets => "assets",
            ComponentName::JavascriptIndex => "javascript-index",
            ComponentName::Navigation => "navigation",
            ComponentName::Toc => "toc",
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RendererComponent
// ---------------------------------------------------------------------------

pub trait RendererComponent {
    fn name(&self) -> ComponentName;

    /// Runs before theme listeners on every page begin.
    fn on_begin_page(&mut self, _page: &mut PageEvent<'_>) {}

    /// Extra files to emit after all pages are rendered.
    fn finish(&mut self, _project: &Reflection) -> Result<Vec<OutputFile>, RenderError> {
        Ok(Vec::new())
    }
}

/// Copies the stylesheet referenced by the default layout.
pub struct AssetsComponent;

impl RendererComponent for AssetsComponent {
    fn name(&self) -> ComponentName {
        ComponentName::Assets
    }

    fn finish(&mut self, _project: &Reflection) -> Result<Vec<OutputFile>, RenderError> {
        Ok(vec![OutputFile::new("assets/style.css", STYLE_CSS)])
    }
}

#[derive(Serialize)]
struct SearchRow<'a> {
    id: u32,
    kind: String,
    name: &'a str,
    url: Option<&'a str>,
    parent: Option<&'a str>,
}

/// Emits `assets/search.js` with one row per reflection that has a url.
pub struct JavascriptIndexComponent;

impl JavascriptIndexComponent {
    fn collect<'a>(model: &'a Reflection, parent: Option<&'a str>, rows: &mut Vec<SearchRow<'a>>) {
        for child in &model.children {
            if let Some(url) = child.url.as_deref() {
                rows.push(SearchRow {
                    id: child.id.0,
                    kind: child.kind.to_string(),
                    name: &child.name,
                    url: Some(url),
                    parent,
                });
            }
            Self::collect(child, Some(&child.name), rows);
        }
    }
}

impl RendererComponent for JavascriptIndexComponent {
    fn name(&self) -> ComponentName {
        ComponentName::JavascriptIndex
    }

    fn finish(&mut self, project: &Reflection) -> Result<Vec<OutputFile>, RenderError> {
        let mut rows = Vec::new();
        Self::collect(project, None, &mut rows);
        let json = serde_json::to_string(&rows)?;
        Ok(vec![OutputFile::new(
            "assets/search.js",
            format!("window.searchData = {json};\n"),
        )])
    }
}

/// Attaches the site navigation to every page.
pub struct NavigationComponent;

impl RendererComponent for NavigationComponent {
    fn name(&self) -> ComponentName {
        ComponentName::Navigation
    }

    fn on_begin_page(&mut self, page: &mut PageEvent<'_>) {
        page.navigation = Some(build_navigation(page.project));
    }
}

/// Attaches the members that live on the page itself (no document of their
/// own) as the page's table of contents.
pub struct TocComponent;

impl TocComponent {
    fn append_anchored(model: &Reflection, parent: &mut NavigationItem) {
        for child in model.children.iter().filter(|c| !c.has_own_document) {
            let item = NavigationItem::create(child, parent, false);
            Self::append_anchored(child, item);
        }
    }
}

impl RendererComponent for TocComponent {
    fn name(&self) -> ComponentName {
        ComponentName::Toc
    }

    fn on_begin_page(&mut self, page: &mut PageEvent<'_>) {
        let Some(model) = page.model.as_reflection() else {
            return;
        };
        let mut toc = NavigationItem::root();
        Self::append_anchored(model, &mut toc);
        page.toc = Some(toc);
    }
}

// ---------------------------------------------------------------------------
// ComponentRegistry
// ---------------------------------------------------------------------------

/// Ordered set of named components.
pub struct ComponentRegistry {
    components: Vec<Box<dyn RendererComponent>>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl ComponentRegistry {
    pub fn empty() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Registry holding the four built-in components.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.add(Box::new(AssetsComponent));
        registry.add(Box::new(JavascriptIndexComponent));
        registry.add(Box::new(NavigationComponent));
        registry.add(Box::new(TocComponent));
        registry
    }

    /// Add a component, replacing any existing one with the same name.
    pub fn add(&mut self, component: Box<dyn RendererComponent>) {
        self.remove(component.name());
        self.components.push(component);
    }

    /// Remove a component by name. Returns whether one was removed.
    pub fn remove(&mut self, name: ComponentName) -> bool {
        self.take(name).is_some()
    }

    /// Remove a component by name and hand it back.
    pub fn take(&mut self, name: ComponentName) -> Option<Box<dyn RendererComponent>> {
        let index = self.components.iter().position(|c| c.name() == name)?;
        tracing::debug!(component = %name, "removed renderer component");
        Some(self.components.remove(index))
    }

    pub fn contains(&self, name: ComponentName) -> bool {
        self.components.iter().any(|c| c.name() == name)
    }

    pub fn names(&self) -> Vec<ComponentName> {
        self.components.iter().map(|c| c.name()).collect()
    }

    pub fn begin_page(&mut self, page: &mut PageEvent<'_>) {
        for component in self.components.iter_mut() {
            component.on_begin_page(page);
        }
    }

    pub fn finish(&mut self, project: &Reflection) -> Result<Vec<OutputFile>, RenderError> {
        let mut files = Vec::new();
        for component in self.components.iter_mut() {
            files.extend(component.finish(project)?);
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PageModel;
    use crate::url_mapping::Template;
    use folio_core::ReflectionKind;

    #[test]
    fn builtins_registered_in_order() {
        let registry = ComponentRegistry::with_builtins();
        assert_eq!(registry.names(), ComponentName::all());
    }

    #[test]
    fn remove_reports_presence() {
        let mut registry = ComponentRegistry::with_builtins();
        assert!(registry.remove(ComponentName::Toc));
        assert!(!registry.remove(ComponentName::Toc));
        assert!(!registry.contains(ComponentName::Toc));
        assert_eq!(registry.names().len(), 3);
    }

    #[test]
    fn take_hands_back_the_component() {
        let mut registry = ComponentRegistry::with_builtins();
        let assets = registry.take(ComponentName::Assets).expect("assets registered");
        assert_eq!(assets.name(), ComponentName::Assets);
        assert!(registry.take(ComponentName::Assets).is_none());

        registry.add(assets);
        assert!(registry.contains(ComponentName::Assets));
    }

    #[test]
    fn search_index_lists_reflections_with_urls() {
        let mut project = Reflection::new(0, "p", ReflectionKind::Project).with_children(vec![
            Reflection::new(1, "Foo", ReflectionKind::Class),
            Reflection::new(2, "bar", ReflectionKind::Function),
        ]);
        project.children[0].url = Some("classes/Foo.html".to_string());

        let files = JavascriptIndexComponent.finish(&project).expect("finish");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("assets/search.js"));
        assert!(files[0].contents.starts_with("window.searchData = "));
        assert!(files[0].contents.contains("classes/Foo.html"));
        assert!(!files[0].contents.contains("\"bar\""));
    }

    #[test]
    fn toc_component_skips_document_owners() {
        let mut project = Reflection::new(0, "p", ReflectionKind::Project).with_children(vec![
            Reflection::new(1, "Foo", ReflectionKind::Class),
            Reflection::new(2, "bar", ReflectionKind::Function),
        ]);
        project.children[0].has_own_document = true;

        let mut page = PageEvent::new(
            "index.html",
            &project,
            PageModel::Reflection(&project),
            Template::Index,
        );
        TocComponent.on_begin_page(&mut page);
        let toc = page.toc.expect("toc set");
        assert_eq!(toc.children.len(), 1);
        assert_eq!(toc.children[0].title, "bar");
    }
}
