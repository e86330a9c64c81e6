//! Navigation trees.
//!
//! Two trees are derived from a project:
//!
//! - the table of contents of a page ([`build_toc`]): one item per reflection
//!   below the page model, same shape and order, every item expanded;
//! - the site navigation ([`build_navigation`]): only reflections that own a
//!   document, used by multi-page themes.

use serde::{Deserialize, Serialize};

use folio_core::{Reflection, ReflectionId, ReflectionKind};

/// A node in a navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationItem {
    pub title: String,
    pub url: Option<String>,
    /// The reflection this item was built from. `None` for synthetic roots.
    pub reflection: Option<ReflectionId>,
    pub kind: Option<ReflectionKind>,
    pub is_expanded: bool,
    // Always serialized: the templates test `item.children` directly.
    #[serde(default)]
    pub children: Vec<NavigationItem>,
}

impl NavigationItem {
    /// An empty, untitled root item.
    pub fn root() -> Self {
        Self::default()
    }

    /// An item mirroring `reflection`, without children.
    pub fn for_reflection(reflection: &Reflection) -> Self {
        Self {
            title: reflection.name.clone(),
            url: reflection.url.clone(),
            reflection: Some(reflection.id),
            kind: Some(reflection.kind),
            is_expanded: false,
            children: Vec::new(),
        }
    }

    /// Create an item for `reflection`, append it to `parent` and return it.
    pub fn create<'p>(
        reflection: &Reflection,
        parent: &'p mut NavigationItem,
        is_expanded: bool,
    ) -> &'p mut NavigationItem {
        let mut item = Self::for_reflection(reflection);
        item.is_expanded = is_expanded;
        let index = parent.children.len();
        parent.children.push(item);
        &mut parent.children[index]
    }

    /// Number of items below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Append one expanded item per descendant of `model` under `parent`,
/// pre-order, keeping child order at every level.
pub fn build_toc(model: &Reflection, parent: &mut NavigationItem) {
    for child in &model.children {
        let item = NavigationItem::create(child, parent, true);
        build_toc(child, item);
    }
}

/// Site navigation: a root item whose subtree holds every document-owning
/// reflection of `project`, nested the way the model nests them.
pub fn build_navigation(project: &Reflection) -> NavigationItem {
    let mut root = NavigationItem::for_reflection(project);
    root.is_expanded = true;
    append_documents(project, &mut root);
    root
}

fn append_documents(model: &Reflection, parent: &mut NavigationItem) {
    for child in &model.children {
        if child.has_own_document {
            let item = NavigationItem::create(child, parent, false);
            append_documents(child, item);
        } else {
            // Anchored reflections may still contain documents further down.
            append_documents(child, parent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(id: u32, name: &str, kind: ReflectionKind) -> Reflection {
        Reflection::new(id, name, kind)
    }

    fn project() -> Reflection {
        r(0, "project", ReflectionKind::Project).with_children(vec![
            r(1, "A", ReflectionKind::Namespace)
                .with_children(vec![r(2, "A1", ReflectionKind::Function)]),
            r(3, "B", ReflectionKind::Variable),
        ])
    }

    #[test]
    fn toc_mirrors_two_level_tree() {
        let project = project();
        let mut root = NavigationItem::root();
        build_toc(&project, &mut root);

        assert_eq!(root.children.len(), 2);
        let a = &root.children[0];
        let b = &root.children[1];
        assert_eq!(a.title, "A");
        assert_eq!(b.title, "B");
        assert_eq!(a.children.len(), 1);
        assert_eq!(a.children[0].title, "A1");
        assert_eq!(a.children[0].reflection, Some(ReflectionId(2)));
        assert!(b.children.is_empty());
        assert!(a.is_expanded && b.is_expanded && a.children[0].is_expanded);
    }

    #[test]
    fn toc_of_leaf_is_empty() {
        let leaf = r(5, "leaf", ReflectionKind::Property);
        let mut root = NavigationItem::root();
        build_toc(&leaf, &mut root);
        assert!(root.is_empty());
        assert_eq!(root.descendant_count(), 0);
    }

    #[test]
    fn toc_appends_after_existing_children() {
        let project = project();
        let mut root = NavigationItem::root();
        root.children.push(NavigationItem {
            title: "existing".to_string(),
            ..NavigationItem::default()
        });
        build_toc(&project, &mut root);
        let titles: Vec<_> = root.children.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["existing", "A", "B"]);
    }

    #[test]
    fn deep_chain_keeps_depth() {
        let mut node = r(100, "leaf", ReflectionKind::Property);
        for id in (1..100).rev() {
            node = r(id, &format!("n{id}"), ReflectionKind::Namespace).with_children(vec![node]);
        }
        let project = r(0, "p", ReflectionKind::Project).with_children(vec![node]);

        let mut root = NavigationItem::root();
        build_toc(&project, &mut root);
        assert_eq!(root.descendant_count(), 100);

        let mut depth = 0;
        let mut cursor = &root;
        while let Some(next) = cursor.children.first() {
            depth += 1;
            cursor = next;
        }
        assert_eq!(depth, 100);
        assert_eq!(cursor.title, "leaf");
    }

    #[test]
    fn navigation_keeps_only_documents() {
        let mut project = project();
        project.children[0].has_own_document = true;
        project.children[0].url = Some("modules/A.html".to_string());

        let nav = build_navigation(&project);
        assert_eq!(nav.children.len(), 1);
        assert_eq!(nav.children[0].url.as_deref(), Some("modules/A.html"));
        assert!(nav.children[0].children.is_empty());
    }
}
