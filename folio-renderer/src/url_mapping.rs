//! Url mappings: which output file renders which model with which template.

use std::fmt;

use folio_core::ReflectionId;

/// Reference to a page-level template slot of the render context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// The project landing page.
    Index,
    /// A page for a single document-owning reflection.
    Reflection,
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Index => write!(f, "index"),
            Template::Reflection => write!(f, "reflection"),
        }
    }
}

/// A single output page: `url` is relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub url: String,
    pub model: ReflectionId,
    pub template: Template,
}

impl UrlMapping {
    pub fn new(url: impl Into<String>, model: ReflectionId, template: Template) -> Self {
        Self {
            url: url.into(),
            model,
            template,
        }
    }
}
