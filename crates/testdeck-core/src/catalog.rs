//! Test catalog types: the package/class tree and per-class method trees
//!
//! The catalog is static reference data owned by the server. It is fetched
//! wholesale and only replaced by an explicit catalog refresh.

use serde::Deserialize;

// ─────────────────────────────────────────────────────────────────────────────
// Package / class tree (sidebar)
// ─────────────────────────────────────────────────────────────────────────────

/// Kind of a node in the catalog tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CatalogNodeKind {
    Package,
    Class,
}

/// A package or class in the sidebar tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogNode {
    /// Package segment or simple class name
    pub name: String,

    #[serde(rename = "type")]
    pub kind: CatalogNodeKind,

    /// Fully qualified class name (classes only)
    #[serde(default)]
    pub class_name: Option<String>,

    /// JUnit unique id (classes only)
    #[serde(default)]
    pub unique_id: Option<String>,

    #[serde(default)]
    pub children: Vec<CatalogNode>,
}

impl CatalogNode {
    pub fn package(name: impl Into<String>, children: Vec<CatalogNode>) -> Self {
        Self {
            name: name.into(),
            kind: CatalogNodeKind::Package,
            class_name: None,
            unique_id: None,
            children,
        }
    }

    /// Build a class node from its fully qualified name.
    pub fn class(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let simple = full_name
            .rsplit('.')
            .next()
            .unwrap_or(full_name.as_str())
            .to_string();
        Self {
            name: simple,
            kind: CatalogNodeKind::Class,
            unique_id: Some(format!("[engine:junit-jupiter]/[class:{}]", full_name)),
            class_name: Some(full_name),
            children: Vec::new(),
        }
    }

    pub fn is_class(&self) -> bool {
        self.kind == CatalogNodeKind::Class
    }

    /// Number of class nodes in this subtree (including self).
    pub fn class_count(&self) -> usize {
        usize::from(self.is_class()) + self.children.iter().map(|c| c.class_count()).sum::<usize>()
    }
}

/// Prune a catalog forest to the nodes matching a search keyword.
///
/// A node stays visible when its own name contains the keyword
/// (case-insensitive) or when any descendant stays visible. Children that do
/// not match are pruned even under a matching parent. An empty keyword keeps
/// everything.
pub fn filter_catalog(nodes: &[CatalogNode], keyword: &str) -> Vec<CatalogNode> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return nodes.to_vec();
    }
    nodes
        .iter()
        .filter_map(|node| filter_node(node, &keyword))
        .collect()
}

fn filter_node(node: &CatalogNode, keyword: &str) -> Option<CatalogNode> {
    let children: Vec<CatalogNode> = node
        .children
        .iter()
        .filter_map(|child| filter_node(child, keyword))
        .collect();

    let self_match = node.name.to_lowercase().contains(keyword);
    if self_match || !children.is_empty() {
        Some(CatalogNode {
            children,
            ..node.clone()
        })
    } else {
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Class detail (method tree)
// ─────────────────────────────────────────────────────────────────────────────

/// A test class with its method tree, as shown in the Test Info view
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDetail {
    pub class_name: String,
    pub full_class_name: String,
    #[serde(default)]
    pub methods: Vec<MethodNode>,
}

impl ClassDetail {
    /// Total number of test methods, nested classes included.
    pub fn method_count(&self) -> usize {
        self.methods.iter().map(MethodNode::method_count).sum()
    }
}

/// A single test method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestMethod {
    pub unique_id: String,
    pub display_name: String,
    pub method_name: String,
}

/// A nested test class grouping its own methods (and further nested classes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedClassGroup {
    pub display_name: String,
    pub unique_id: Option<String>,
    pub children: Vec<MethodNode>,
}

/// Node of a class's method tree: either a leaf method or a nested class.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawMethodNode")]
pub enum MethodNode {
    Method(TestMethod),
    NestedClass(NestedClassGroup),
}

impl MethodNode {
    pub fn display_name(&self) -> &str {
        match self {
            MethodNode::Method(m) => &m.display_name,
            MethodNode::NestedClass(g) => &g.display_name,
        }
    }

    fn method_count(&self) -> usize {
        match self {
            MethodNode::Method(_) => 1,
            MethodNode::NestedClass(g) => g.children.iter().map(MethodNode::method_count).sum(),
        }
    }
}

/// Wire shape: a single object with optional fields for both variants.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMethodNode {
    #[serde(default)]
    unique_id: Option<String>,
    display_name: String,
    #[serde(default)]
    method_name: Option<String>,
    #[serde(default, alias = "isNestedClass")]
    nested_class: bool,
    #[serde(default)]
    children: Option<Vec<MethodNode>>,
}

impl TryFrom<RawMethodNode> for MethodNode {
    type Error = String;

    fn try_from(raw: RawMethodNode) -> std::result::Result<Self, Self::Error> {
        if raw.nested_class {
            return Ok(MethodNode::NestedClass(NestedClassGroup {
                display_name: raw.display_name,
                unique_id: raw.unique_id,
                children: raw.children.unwrap_or_default(),
            }));
        }

        let unique_id = raw
            .unique_id
            .ok_or_else(|| format!("method '{}' has no uniqueId", raw.display_name))?;
        let method_name = raw
            .method_name
            .unwrap_or_else(|| raw.display_name.trim_end_matches("()").to_string());

        Ok(MethodNode::Method(TestMethod {
            unique_id,
            display_name: raw.display_name,
            method_name,
        }))
    }
}
