//! Single-page theme.
//!
//! The whole project renders into `index.html`. Every other reflection gets
//! an anchor on that page, and the page's table of contents mirrors the full
//! reflection tree.

use std::cell::OnceCell;
use std::rc::Rc;

use folio_core::{Reflection, ThemeName};

use crate::components::{ComponentName, RendererComponent};
use crate::context::RenderContext;
use crate::events::{ListenerId, PageEvent, PagePhase};
use crate::navigation::{build_toc, NavigationItem};
use crate::renderer::Pipeline;
use crate::templates::TemplateEngine;
use crate::url_mapping::{Template, UrlMapping};

use super::default::{AnchorScope, DefaultTheme, INDEX_URL};
use super::{minimal_context, Theme};

pub struct MinimalTheme {
    base: DefaultTheme,
    context: OnceCell<Rc<RenderContext>>,
    begin_listener: Option<ListenerId>,
    /// Components taken out of the pipeline on attach, restored on detach.
    taken: Vec<Box<dyn RendererComponent>>,
}

impl MinimalTheme {
    pub fn new(engine: Rc<TemplateEngine>) -> Self {
        Self {
            base: DefaultTheme::new(engine),
            context: OnceCell::new(),
            begin_listener: None,
            taken: Vec::new(),
        }
    }

    /// Page-begin listener: replace the page toc with the tree of the page
    /// model. Pages whose model is not a reflection are left untouched.
    pub fn on_renderer_begin_page(page: &mut PageEvent<'_>) {
        let Some(model) = page.model.as_reflection() else {
            return;
        };
        let mut toc = NavigationItem::root();
        build_toc(model, &mut toc);
        page.toc = Some(toc);
    }

    pub fn is_attached(&self) -> bool {
        self.begin_listener.is_some()
    }
}

impl Theme for MinimalTheme {
    fn name(&self) -> ThemeName {
        ThemeName::Minimal
    }

    fn attach(&mut self, pipeline: &mut Pipeline) {
        self.detach(pipeline);
        self.taken = ComponentName::all()
            .iter()
            .filter_map(|name| pipeline.take_component(*name))
            .collect();
        let id = pipeline.on(PagePhase::Begin, Box::new(Self::on_renderer_begin_page));
        self.begin_listener = Some(id);
        tracing::debug!(theme = %self.name(), "theme attached");
    }

    fn detach(&mut self, pipeline: &mut Pipeline) {
        if let Some(id) = self.begin_listener.take() {
            pipeline.off(id);
        }
        for component in self.taken.drain(..) {
            pipeline.add_component(component);
        }
    }

    fn get_urls(&self, project: &mut Reflection) -> Vec<UrlMapping> {
        let urls = vec![UrlMapping::new(INDEX_URL, project.id, Template::Index)];
        project.url = Some(INDEX_URL.to_string());
        project.anchor = None;
        project.has_own_document = true;

        let mut scope = AnchorScope::new(project);
        for child in project.children.iter_mut() {
            DefaultTheme::apply_anchor_url(child, &mut scope);
        }
        urls
    }

    fn render_context(&self) -> Rc<RenderContext> {
        let context = self.context.get_or_init(|| {
            let base = self.base.render_context();
            Rc::new(RenderContext::compose(&base, minimal_context::overrides()))
        });
        Rc::clone(context)
    }
}
