//! Default (multi-page) theme.
//!
//! # Url layout
//!
//! | Reflection kind        | Output                          |
//! |------------------------|---------------------------------|
//! | project                | `index.html`                    |
//! | module / namespace     | `modules/<path>.html`           |
//! | enum                   | `enums/<path>.html`             |
//! | class                  | `classes/<path>.html`           |
//! | interface              | `interfaces/<path>.html`        |
//! | anything else          | `<page url>#<anchor>`           |
//!
//! `<path>` is the dotted chain of aliases from the project down to the
//! reflection. An alias is the reflection name with non-word characters
//! replaced by `_`.

use std::cell::OnceCell;
use std::collections::HashMap;
use std::rc::Rc;

use folio_core::{Reflection, ThemeName};

use crate::context::RenderContext;
use crate::templates::TemplateEngine;
use crate::url_mapping::{Template, UrlMapping};

use super::{default_context, Theme};

/// The index page every theme writes the project to.
pub const INDEX_URL: &str = "index.html";

// ---------------------------------------------------------------------------
// Anchors
// ---------------------------------------------------------------------------

/// A reflection name reduced to word characters.
pub fn alias(reflection: &Reflection) -> String {
    let alias: String = reflection
        .name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if alias.is_empty() {
        format!("reflection-{}", reflection.id)
    } else {
        alias
    }
}

fn is_external(url: Option<&str>) -> bool {
    url.is_some_and(|u| {
        ["http://", "https://", "ftp://", "ftps://"]
            .iter()
            .any(|scheme| u.starts_with(scheme))
    })
}

/// The page anchors are assigned on: its url plus the anchors already taken.
#[derive(Debug, Clone)]
pub struct AnchorScope {
    url: String,
    taken: HashMap<String, usize>,
}

impl AnchorScope {
    /// Scope for anchors on `container`'s page. Any fragment of the
    /// container's url is dropped.
    pub fn new(container: &Reflection) -> Self {
        let url = container.url.as_deref().unwrap_or_default();
        let page = url.split('#').next().unwrap_or_default();
        Self {
            url: page.to_string(),
            taken: HashMap::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Reserve `anchor`, suffixing `-1`, `-2`, ... on repeats.
    fn claim(&mut self, anchor: String) -> String {
        claim(&mut self.taken, anchor)
    }
}

/// Reserve `name` in `taken`, suffixing `-1`, `-2`, ... on repeats.
fn claim(taken: &mut HashMap<String, usize>, name: String) -> String {
    match taken.get_mut(&name) {
        None => {
            taken.insert(name.clone(), 1);
            name
        }
        Some(count) => {
            let suffixed = format!("{name}-{count}");
            *count += 1;
            claim(taken, suffixed)
        }
    }
}

// ---------------------------------------------------------------------------
// DefaultTheme
// ---------------------------------------------------------------------------

pub struct DefaultTheme {
    engine: Rc<TemplateEngine>,
    context: OnceCell<Rc<RenderContext>>,
}

impl DefaultTheme {
    pub fn new(engine: Rc<TemplateEngine>) -> Self {
        Self {
            engine,
            context: OnceCell::new(),
        }
    }

    pub fn engine(&self) -> Rc<TemplateEngine> {
        Rc::clone(&self.engine)
    }

    /// A fresh, uncached context holding the base slots.
    pub fn base_context(&self) -> RenderContext {
        RenderContext::new(self.engine(), default_context::slots())
    }

    /// Give `reflection` and its whole subtree anchor urls on `scope`'s page.
    ///
    /// External urls (`http(s)://`, `ftp(s)://`) are kept, but still get the
    /// anchor claimed on the page. Nothing in the subtree keeps its own
    /// document.
    pub fn apply_anchor_url(reflection: &mut Reflection, scope: &mut AnchorScope) {
        Self::apply_anchor_with_prefix(reflection, scope, None);
    }

    fn apply_anchor_with_prefix(
        reflection: &mut Reflection,
        scope: &mut AnchorScope,
        prefix: Option<&str>,
    ) {
        let own = alias(reflection);
        let wanted = match prefix {
            Some(prefix) => format!("{prefix}.{own}"),
            None => own,
        };
        let anchor = scope.claim(wanted);
        if !is_external(reflection.url.as_deref()) {
            reflection.url = Some(format!("{}#{anchor}", scope.url));
        }
        reflection.anchor = Some(anchor.clone());
        reflection.has_own_document = false;
        for child in reflection.children.iter_mut() {
            Self::apply_anchor_with_prefix(child, scope, Some(&anchor));
        }
    }

    /// Walk `container`'s children: document owners get a page (and recurse
    /// with their own scope), everything else is anchored on `scope`.
    ///
    /// `pages` holds every page path handed out so far; names that collapse
    /// to the same alias path get a `-N` suffix.
    fn build_urls(
        container: &mut Reflection,
        path: &mut Vec<String>,
        scope: &mut AnchorScope,
        pages: &mut HashMap<String, usize>,
        urls: &mut Vec<UrlMapping>,
    ) {
        for child in container.children.iter_mut() {
            let Some(directory) = child.kind.directory() else {
                Self::apply_anchor_url(child, scope);
                continue;
            };
            path.push(alias(child));
            if !is_external(child.url.as_deref()) {
                let page = claim(pages, format!("{directory}/{}", path.join(".")));
                let url = format!("{page}.html");
                urls.push(UrlMapping::new(url.clone(), child.id, Template::Reflection));
                child.url = Some(url);
                child.has_own_document = true;
            }
            child.anchor = None;
            let mut own_scope = AnchorScope::new(child);
            Self::build_urls(child, path, &mut own_scope, pages, urls);
            path.pop();
        }
    }
}

impl Theme for DefaultTheme {
    fn name(&self) -> ThemeName {
        ThemeName::Default
    }

    fn get_urls(&self, project: &mut Reflection) -> Vec<UrlMapping> {
        let mut urls = vec![UrlMapping::new(INDEX_URL, project.id, Template::Index)];
        project.url = Some(INDEX_URL.to_string());
        project.anchor = None;
        project.has_own_document = true;

        let mut scope = AnchorScope::new(project);
        Self::build_urls(project, &mut Vec::new(), &mut scope, &mut HashMap::new(), &mut urls);
        urls
    }

    fn render_context(&self) -> Rc<RenderContext> {
        Rc::clone(self.context.get_or_init(|| Rc::new(self.base_context())))
    }
}
