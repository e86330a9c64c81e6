//! Themes: url layout plus the render context pages are rendered with.
//!
//! | Theme     | Output                                               |
//! |-----------|------------------------------------------------------|
//! | `default` | one page per module/enum/class/interface + assets    |
//! | `minimal` | a single `index.html`, everything else anchored in it |

mod default;
mod default_context;
mod minimal;
mod minimal_context;

use std::rc::Rc;

use folio_core::{Reflection, ThemeName};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::events::PageEvent;
use crate::renderer::Pipeline;
use crate::templates::TemplateEngine;
use crate::url_mapping::UrlMapping;

pub use default::{alias, AnchorScope, DefaultTheme, INDEX_URL};
pub use minimal::MinimalTheme;

/// A documentation theme.
///
/// The renderer calls [`Theme::attach`] once when the theme is installed,
/// [`Theme::get_urls`] once per render, then [`Theme::render`] for every
/// mapping after the page-begin listeners have run.
pub trait Theme {
    fn name(&self) -> ThemeName;

    /// Hook into the renderer pipeline. Default: no-op.
    fn attach(&mut self, _pipeline: &mut Pipeline) {}

    /// Undo whatever [`Theme::attach`] registered. Default: no-op.
    fn detach(&mut self, _pipeline: &mut Pipeline) {}

    /// Assign urls to the project tree and list the pages to write.
    fn get_urls(&self, project: &mut Reflection) -> Vec<UrlMapping>;

    /// The context pages are rendered with. Repeated calls return the same
    /// instance.
    fn render_context(&self) -> Rc<RenderContext>;

    /// Render a full page document.
    fn render(&self, page: &PageEvent<'_>) -> Result<String, RenderError> {
        self.render_context().default_layout(page.template, page)
    }
}

/// Build the theme registered under `name`.
pub fn theme_for(name: ThemeName, engine: Rc<TemplateEngine>) -> Box<dyn Theme> {
    match name {
        ThemeName::Default => Box::new(DefaultTheme::new(engine)),
        ThemeName::Minimal => Box::new(MinimalTheme::new(engine)),
    }
}

/// `<model> | <project>` for member pages, the project name otherwise.
pub(crate) fn page_title(page: &PageEvent<'_>) -> String {
    match page.model.as_reflection() {
        Some(model) if !model.is_project() => format!("{} | {}", model.name, page.project.name),
        _ => page.project.name.clone(),
    }
}
