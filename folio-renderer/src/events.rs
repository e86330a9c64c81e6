//! Page lifecycle events and listener registration.
//!
//! The renderer emits [`PagePhase::Begin`] before a page's template runs and
//! [`PagePhase::End`] after its contents are set. Listeners are plain
//! callbacks keyed by phase, invoked synchronously in registration order.

use folio_core::Reflection;

use crate::navigation::NavigationItem;
use crate::url_mapping::Template;

/// Lifecycle phase of a page render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagePhase {
    Begin,
    End,
}

/// What a page renders.
#[derive(Debug, Clone)]
pub enum PageModel<'a> {
    Reflection(&'a Reflection),
    /// Any other record a pipeline may push through, e.g. a generated
    /// listing. Themes do not build navigation for these.
    Record(serde_json::Value),
}

impl<'a> PageModel<'a> {
    pub fn as_reflection(&self) -> Option<&'a Reflection> {
        match self {
            PageModel::Reflection(r) => Some(r),
            PageModel::Record(_) => None,
        }
    }
}

/// In-flight state of a single output page.
#[derive(Debug, Clone)]
pub struct PageEvent<'a> {
    /// Output url, relative to the output directory.
    pub url: String,
    pub project: &'a Reflection,
    pub model: PageModel<'a>,
    pub template: Template,
    /// Table of contents of this page.
    pub toc: Option<NavigationItem>,
    /// Site-wide navigation.
    pub navigation: Option<NavigationItem>,
    /// Rendered markup, set between begin and end.
    pub contents: Option<String>,
}

impl<'a> PageEvent<'a> {
    pub fn new(
        url: impl Into<String>,
        project: &'a Reflection,
        model: PageModel<'a>,
        template: Template,
    ) -> Self {
        Self {
            url: url.into(),
            project,
            model,
            template,
            toc: None,
            navigation: None,
            contents: None,
        }
    }

    /// Number of `../` segments from this page back to the output root.
    pub fn depth(&self) -> usize {
        self.url.matches('/').count()
    }

    /// Rewrite a root-relative url so it resolves from this page.
    pub fn relative_url(&self, url: &str) -> String {
        format!("{}{url}", "../".repeat(self.depth()))
    }
}

/// Page listener callback.
pub type PageListener = Box<dyn FnMut(&mut PageEvent<'_>)>;

/// Handle returned by [`PageListeners::on`]; pass it to
/// [`PageListeners::off`] to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener registry owned by the renderer pipeline.
#[derive(Default)]
pub struct PageListeners {
    next_id: u64,
    entries: Vec<(ListenerId, PagePhase, PageListener)>,
}

impl PageListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, phase: PagePhase, listener: PageListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, phase, listener));
        id
    }

    /// Remove a listener. Returns `false` if the id was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, phase: PagePhase, page: &mut PageEvent<'_>) {
        for (_, entry_phase, listener) in self.entries.iter_mut() {
            if *entry_phase == phase {
                listener(page);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
