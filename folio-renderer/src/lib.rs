//! # folio-renderer
//!
//! Themes, render contexts and the page pipeline that turn a folio project
//! tree into HTML files.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::rc::Rc;
//!
//! use folio_core::{Reflection, ThemeName};
//! use folio_renderer::{theme_for, Renderer, TemplateEngine};
//!
//! fn render(mut project: Reflection) -> Result<(), folio_renderer::RenderError> {
//!     let engine = Rc::new(TemplateEngine::embedded()?);
//!     let mut renderer = Renderer::with_theme(theme_for(ThemeName::Minimal, engine));
//!     for file in renderer.render(&mut project)?.files {
//!         println!("{}: {} bytes", file.path.display(), file.contents.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod components;
pub mod context;
pub mod error;
pub mod events;
pub mod navigation;
pub mod renderer;
pub mod templates;
pub mod theme;
pub mod url_mapping;

pub use components::{ComponentName, ComponentRegistry, RendererComponent};
pub use context::{RenderContext, SlotOverrides, Slots};
pub use error::RenderError;
pub use events::{ListenerId, PageEvent, PageListener, PageModel, PagePhase};
pub use navigation::{build_navigation, build_toc, NavigationItem};
pub use renderer::{OutputFile, Pipeline, RenderOutput, Renderer};
pub use templates::TemplateEngine;
pub use theme::{theme_for, AnchorScope, DefaultTheme, MinimalTheme, Theme};
pub use url_mapping::{Template, UrlMapping};
