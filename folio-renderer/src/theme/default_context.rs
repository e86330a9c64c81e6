//! Base slots of the default theme.
//!
//! Each slot renders one `default/*.html.tera` template. Nested fragments are
//! produced by calling back into the context the slot was invoked on, so a
//! derived context that replaces e.g. `member` is picked up by the inherited
//! `members` and page templates.

use std::rc::Rc;

use serde::Serialize;

use folio_core::Reflection;

use crate::context::{RenderContext, Slots};
use crate::error::RenderError;
use crate::events::PageEvent;
use crate::navigation::NavigationItem;
use crate::url_mapping::Template;

use super::page_title;

/// The default theme's slot table.
pub fn slots() -> Slots {
    Slots {
        index_template: Rc::new(index_template),
        reflection_template: Rc::new(reflection_template),
        default_layout: Rc::new(default_layout),
        header: Rc::new(header),
        footer: Rc::new(footer),
        navigation: Rc::new(navigation),
        toc: Rc::new(toc),
        members: Rc::new(members),
        member: Rc::new(member),
        comment: Rc::new(comment),
    }
}

fn default_layout(
    ctx: &RenderContext,
    template: Template,
    page: &PageEvent<'_>,
) -> Result<String, RenderError> {
    let body = ctx.template(template, page)?;
    let mut c = tera::Context::new();
    c.insert("title", &page_title(page));
    c.insert("root", &page.relative_url(""));
    c.insert("header", &ctx.header(page)?);
    c.insert("navigation", &ctx.navigation(page)?);
    c.insert("toc", &ctx.toc(page)?);
    c.insert("body", &body);
    c.insert("footer", &ctx.footer(page)?);
    ctx.render("default/layout.html.tera", &c)
}

fn index_template(ctx: &RenderContext, page: &PageEvent<'_>) -> Result<String, RenderError> {
    let model = page.model.as_reflection().unwrap_or(page.project);
    let mut c = tera::Context::new();
    c.insert("name", &model.name);
    c.insert("comment", &ctx.comment(model)?);
    c.insert("members", &ctx.members(model)?);
    ctx.render("default/index.html.tera", &c)
}

fn reflection_template(ctx: &RenderContext, page: &PageEvent<'_>) -> Result<String, RenderError> {
    let Some(model) = page.model.as_reflection() else {
        return Ok(String::new());
    };
    let mut c = tera::Context::new();
    c.insert("name", &model.name);
    c.insert("kind", &model.kind.to_string());
    c.insert("css_class", &model.kind.css_class());
    c.insert("comment", &ctx.comment(model)?);
    c.insert("members", &ctx.members(model)?);
    ctx.render("default/reflection.html.tera", &c)
}

fn header(ctx: &RenderContext, page: &PageEvent<'_>) -> Result<String, RenderError> {
    let heading = page
        .model
        .as_reflection()
        .filter(|m| !m.is_project())
        .map(|m| format!("{} {}", m.kind, m.name));
    let mut c = tera::Context::new();
    c.insert("project", &page.project.name);
    c.insert("page_title", &heading);
    ctx.render("default/header.html.tera", &c)
}

fn footer(ctx: &RenderContext, _page: &PageEvent<'_>) -> Result<String, RenderError> {
    ctx.render("default/footer.html.tera", &tera::Context::new())
}

fn render_tree(
    ctx: &RenderContext,
    name: &str,
    tree: Option<&NavigationItem>,
) -> Result<String, RenderError> {
    let items = tree.map(|t| t.children.as_slice()).unwrap_or_default();
    let mut c = tera::Context::new();
    c.insert("items", items);
    ctx.render(name, &c)
}

fn navigation(ctx: &RenderContext, page: &PageEvent<'_>) -> Result<String, RenderError> {
    render_tree(ctx, "default/navigation.html.tera", page.navigation.as_ref())
}

fn toc(ctx: &RenderContext, page: &PageEvent<'_>) -> Result<String, RenderError> {
    render_tree(ctx, "default/toc.html.tera", page.toc.as_ref())
}

#[derive(Serialize)]
struct MemberLink<'a> {
    name: &'a str,
    url: &'a str,
    css_class: String,
}

/// Links for children with their own page, `member` sections for the rest.
fn members(ctx: &RenderContext, reflection: &Reflection) -> Result<String, RenderError> {
    if reflection.children.is_empty() {
        return Ok(String::new());
    }
    let mut links = Vec::new();
    let mut sections = Vec::new();
    for child in &reflection.children {
        match child.url.as_deref() {
            Some(url) if child.has_own_document => links.push(MemberLink {
                name: &child.name,
                url,
                css_class: child.kind.css_class(),
            }),
            _ => sections.push(ctx.member(child)?),
        }
    }
    let mut c = tera::Context::new();
    c.insert("links", &links);
    c.insert("sections", &sections);
    ctx.render("default/members.html.tera", &c)
}

fn member(ctx: &RenderContext, reflection: &Reflection) -> Result<String, RenderError> {
    let mut c = tera::Context::new();
    c.insert("name", &reflection.name);
    c.insert("kind", &reflection.kind.to_string());
    c.insert("css_class", &reflection.kind.css_class());
    c.insert("anchor", &reflection.anchor);
    c.insert("comment", &ctx.comment(reflection)?);
    ctx.render("default/member.html.tera", &c)
}

/// Comment text split into paragraphs on blank lines.
fn comment_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty())
        .collect()
}

fn comment(ctx: &RenderContext, reflection: &Reflection) -> Result<String, RenderError> {
    let Some(text) = reflection.comment.as_deref() else {
        return Ok(String::new());
    };
    let mut c = tera::Context::new();
    c.insert("paragraphs", &comment_paragraphs(text));
    ctx.render("default/comment.html.tera", &c)
}
