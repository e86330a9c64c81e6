//! Domain types for the documentation model.
//!
//! A project is a tree of [`Reflection`] nodes. Children are owned values, so
//! the tree is acyclic by construction. The only fields a theme mutates are
//! `url`, `anchor` and `has_own_document`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed identifier for a reflection, unique within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReflectionId(pub u32);

impl fmt::Display for ReflectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for ReflectionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The kind of documented entity a reflection represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReflectionKind {
    Project,
    Module,
    Namespace,
    Enum,
    EnumMember,
    Variable,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    Accessor,
    TypeAlias,
}

impl ReflectionKind {
    /// Output directory for kinds that get their own file under a multi-page
    /// theme. `None` for anchored kinds.
    pub fn directory(self) -> Option<&'static str> {
        match self {
            ReflectionKind::Module | ReflectionKind::Namespace => Some("modules"),
            ReflectionKind::Enum => Some("enums"),
            ReflectionKind::Class => Some("classes"),
            ReflectionKind::Interface => Some("interfaces"),
            _ => None,
        }
    }

    /// CSS class used by the templates, e.g. `tsd-kind-enum-member`.
    pub fn css_class(self) -> String {
        format!("tsd-kind-{self}")
    }
}

impl fmt::Display for ReflectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReflectionKind::Project => "project",
            ReflectionKind::Module => "module",
            ReflectionKind::Namespace => "namespace",
            ReflectionKind::Enum => "enum",
            ReflectionKind::EnumMember => "enum-member",
            ReflectionKind::Variable => "variable",
            ReflectionKind::Function => "function",
            ReflectionKind::Class => "class",
            ReflectionKind::Interface => "interface",
            ReflectionKind::Constructor => "constructor",
            ReflectionKind::Property => "property",
            ReflectionKind::Method => "method",
            ReflectionKind::Accessor => "accessor",
            ReflectionKind::TypeAlias => "type-alias",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Reflection
// ---------------------------------------------------------------------------

/// A node in the documentation model tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    pub id: ReflectionId,
    pub name: String,
    pub kind: ReflectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Ordered children. A missing `children` key deserializes to empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Reflection>,
    /// Output url, assigned during url mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Fragment identifier when the reflection lives on a shared page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(default)]
    pub has_own_document: bool,
}

impl Reflection {
    pub fn new(id: impl Into<ReflectionId>, name: impl Into<String>, kind: ReflectionKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            comment: None,
            children: Vec::new(),
            url: None,
            anchor: None,
            has_own_document: false,
        }
    }

    /// Builder-style helper used heavily by tests and fixtures.
    pub fn with_children(mut self, children: Vec<Reflection>) -> Self {
        self.children = children;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn is_project(&self) -> bool {
        self.kind == ReflectionKind::Project
    }

    /// Find a reflection by id anywhere in this subtree (including `self`).
    pub fn find(&self, id: ReflectionId) -> Option<&Reflection> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Pre-order iterator over every descendant, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Iterator returned by [`Reflection::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Reflection>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Reflection;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
