//! Render context: the named template slots a theme renders pages with.
//!
//! A [`RenderContext`] is a fixed record of slot functions. Every slot is
//! called with the context it was invoked on as its first argument, so a
//! slot that needs another slot always reaches the composed context, never a
//! base-only view:
//!
//! ```text
//! ctx.member(r)  ==>  (ctx.slots.member)(ctx, r)
//!                            └─ may call ctx.members(..) -> ctx.member(..)
//! ```
//!
//! [`RenderContext::compose`] derives a context from a base by replacing the
//! slots named in a [`SlotOverrides`]; every other slot is shared by
//! reference with the base.

use std::rc::Rc;

use folio_core::Reflection;

use crate::error::RenderError;
use crate::events::PageEvent;
use crate::templates::TemplateEngine;
use crate::url_mapping::Template;

/// Slot rendering a whole page body or page-level partial.
pub type PageSlot = Rc<dyn Fn(&RenderContext, &PageEvent<'_>) -> Result<String, RenderError>>;

/// Slot wrapping a page template in the surrounding document.
pub type LayoutSlot =
    Rc<dyn Fn(&RenderContext, Template, &PageEvent<'_>) -> Result<String, RenderError>>;

/// Slot rendering a fragment for one reflection.
pub type ReflectionSlot = Rc<dyn Fn(&RenderContext, &Reflection) -> Result<String, RenderError>>;

/// The complete slot table. Every field is required, so a context can never
/// have an undefined slot.
#[derive(Clone)]
pub struct Slots {
    pub index_template: PageSlot,
    pub reflection_template: PageSlot,
    pub default_layout: LayoutSlot,
    pub header: PageSlot,
    pub footer: PageSlot,
    pub navigation: PageSlot,
    pub toc: PageSlot,
    pub members: ReflectionSlot,
    pub member: ReflectionSlot,
    pub comment: ReflectionSlot,
}

/// Replacement slots for [`RenderContext::compose`]. `None` inherits.
#[derive(Clone, Default)]
pub struct SlotOverrides {
    pub index_template: Option<PageSlot>,
    pub reflection_template: Option<PageSlot>,
    pub default_layout: Option<LayoutSlot>,
    pub header: Option<PageSlot>,
    pub footer: Option<PageSlot>,
    pub navigation: Option<PageSlot>,
    pub toc: Option<PageSlot>,
    pub members: Option<ReflectionSlot>,
    pub member: Option<ReflectionSlot>,
    pub comment: Option<ReflectionSlot>,
}

impl SlotOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index_template<F>(mut self, f: F) -> Self
    where
        F: Fn(&RenderContext, &PageEvent<'_>) -> Result<String, RenderError> + 'static,
    {
        self.index_template = Some(Rc::new(f));
        self
    }

    pub fn reflection_template<F>(mut self, f: F) -> Self
    where
        F: Fn(&RenderContext, &PageEvent<'_>) -> Result<String, RenderError> + 'static,
    {
        self.reflection_template = Some(Rc::new(f));
        self
    }

    pub fn default_layout<F>(mut self, f: F) -> Self
    where
        F: Fn(&RenderContext, Template, &PageEvent<'_>) -> Result<String, RenderError> + 'static,
    {
        self.default_layout = Some(Rc::new(f));
        self
    }

    pub fn header<F>(mut self, f: F) -> Self
    where
        F: Fn(&RenderContext, &PageEvent<'_>) -> Result<String, RenderError> + 'static,
    {
        self.header = Some(Rc::new(f));
        self
    }

    pub fn footer<F>(mut self, f: F) -> Self
    where
        F: Fn(&RenderContext, &PageEvent<'_>) -> Result<String, RenderError> + 'static,
    {
        self.footer = Some(Rc::new(f));
        self
    }

    pub fn navigation<F>(mut self, f: F) -> Self
    where
        F: Fn(&RenderContext, &PageEvent<'_>) -> Result<String, RenderError> + 'static,
    {
        self.navigation = Some(Rc::new(f));
        self
    }

    pub fn toc<F>(mut self, f: F) -> Self
    where
        F: Fn(&RenderContext, &PageEvent<'_>) -> Result<String, RenderError> + 'static,
    {
        self.toc = Some(Rc::new(f));
        self
    }

    pub fn members<F>(mut self, f: F) -> Self
    where
        F: Fn(&RenderContext, &Reflection) -> Result<String, RenderError> + 'static,
    {
        self.members = Some(Rc::new(f));
        self
    }

    pub fn member<F>(mut self, f: F) -> Self
    where
        F: Fn(&RenderContext, &Reflection) -> Result<String, RenderError> + 'static,
    {
        self.member = Some(Rc::new(f));
        self
    }

    pub fn comment<F>(mut self, f: F) -> Self
    where
        F: Fn(&RenderContext, &Reflection) -> Result<String, RenderError> + 'static,
    {
        self.comment = Some(Rc::new(f));
        self
    }
}

/// Named template functions plus the template engine they render with.
#[derive(Clone)]
pub struct RenderContext {
    engine: Rc<TemplateEngine>,
    slots: Slots,
}

impl RenderContext {
    pub fn new(engine: Rc<TemplateEngine>, slots: Slots) -> Self {
        Self { engine, slots }
    }

    /// Derive a context from `base`, replacing the slots set in `overrides`.
    pub fn compose(base: &RenderContext, overrides: SlotOverrides) -> Self {
        let inherited = base.slots.clone();
        let slots = Slots {
            index_template: overrides.index_template.unwrap_or(inherited.index_template),
            reflection_template: overrides
                .reflection_template
                .unwrap_or(inherited.reflection_template),
            default_layout: overrides.default_layout.unwrap_or(inherited.default_layout),
            header: overrides.header.unwrap_or(inherited.header),
            footer: overrides.footer.unwrap_or(inherited.footer),
            navigation: overrides.navigation.unwrap_or(inherited.navigation),
            toc: overrides.toc.unwrap_or(inherited.toc),
            members: overrides.members.unwrap_or(inherited.members),
            member: overrides.member.unwrap_or(inherited.member),
            comment: overrides.comment.unwrap_or(inherited.comment),
        };
        Self {
            engine: Rc::clone(&base.engine),
            slots,
        }
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    /// Render a named Tera template with `ctx`.
    pub fn render(&self, name: &str, ctx: &tera::Context) -> Result<String, RenderError> {
        self.engine.render(name, ctx)
    }

    // -- slot dispatch ------------------------------------------------------

    pub fn index_template(&self, page: &PageEvent<'_>) -> Result<String, RenderError> {
        (self.slots.index_template)(self, page)
    }

    pub fn reflection_template(&self, page: &PageEvent<'_>) -> Result<String, RenderError> {
        (self.slots.reflection_template)(self, page)
    }

    /// Resolve a [`Template`] reference to its page slot.
    pub fn template(
        &self,
        template: Template,
        page: &PageEvent<'_>,
    ) -> Result<String, RenderError> {
        match template {
            Template::Index => self.index_template(page),
            Template::Reflection => self.reflection_template(page),
        }
    }

    pub fn default_layout(
        &self,
        template: Template,
        page: &PageEvent<'_>,
    ) -> Result<String, RenderError> {
        (self.slots.default_layout)(self, template, page)
    }

    pub fn header(&self, page: &PageEvent<'_>) -> Result<String, RenderError> {
        (self.slots.header)(self, page)
    }

    pub fn footer(&self, page: &PageEvent<'_>) -> Result<String, RenderError> {
        (self.slots.footer)(self, page)
    }

    pub fn navigation(&self, page: &PageEvent<'_>) -> Result<String, RenderError> {
        (self.slots.navigation)(self, page)
    }

    pub fn toc(&self, page: &PageEvent<'_>) -> Result<String, RenderError> {
        (self.slots.toc)(self, page)
    }

    pub fn members(&self, reflection: &Reflection) -> Result<String, RenderError> {
        (self.slots.members)(self, reflection)
    }

    pub fn member(&self, reflection: &Reflection) -> Result<String, RenderError> {
        (self.slots.member)(self, reflection)
    }

    pub fn comment(&self, reflection: &Reflection) -> Result<String, RenderError> {
        (self.slots.comment)(self, reflection)
    }
}
