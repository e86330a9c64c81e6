//! Slot overrides of the minimal theme.
//!
//! Only the page shell and the member section change. Footer, toc, members
//! and comment come from the default theme and call back into the composed
//! context, so nested members render with [`member`] below.

use folio_core::Reflection;

use crate::context::{RenderContext, SlotOverrides};
use crate::error::RenderError;
use crate::events::PageEvent;
use crate::url_mapping::Template;

use super::page_title;

pub fn overrides() -> SlotOverrides {
    SlotOverrides::new()
        .index_template(index_template)
        .default_layout(default_layout)
        .header(header)
        .member(member)
}

fn index_template(ctx: &RenderContext, page: &PageEvent<'_>) -> Result<String, RenderError> {
    let model = page.model.as_reflection().unwrap_or(page.project);
    let mut c = tera::Context::new();
    c.insert("comment", &ctx.comment(model)?);
    c.insert("members", &ctx.members(model)?);
    ctx.render("minimal/index.html.tera", &c)
}

fn default_layout(
    ctx: &RenderContext,
    template: Template,
    page: &PageEvent<'_>,
) -> Result<String, RenderError> {
    let body = ctx.template(template, page)?;
    let mut c = tera::Context::new();
    c.insert("title", &page_title(page));
    c.insert("header", &ctx.header(page)?);
    c.insert("toc", &ctx.toc(page)?);
    c.insert("body", &body);
    c.insert("footer", &ctx.footer(page)?);
    ctx.render("minimal/layout.html.tera", &c)
}

fn header(ctx: &RenderContext, page: &PageEvent<'_>) -> Result<String, RenderError> {
    let count = page.project.descendants().count();
    let mut c = tera::Context::new();
    c.insert("project", &page.project.name);
    c.insert("member_count", &count);
    ctx.render("minimal/header.html.tera", &c)
}

fn member(ctx: &RenderContext, reflection: &Reflection) -> Result<String, RenderError> {
    let mut c = tera::Context::new();
    c.insert("name", &reflection.name);
    c.insert("kind", &reflection.kind.to_string());
    c.insert("css_class", &reflection.kind.css_class());
    c.insert("anchor", &reflection.anchor);
    c.insert("comment", &ctx.comment(reflection)?);
    c.insert("children", &ctx.members(reflection)?);
    ctx.render("minimal/member.html.tera", &c)
}
