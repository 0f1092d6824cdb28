//! In-memory translation unit
//!
//! A flat arena of declaration nodes. Node 0 is always the translation unit
//! root. The tree (de)serializes as JSON so the CLI can load trees dumped by an
//! external parser, and tests build trees directly with [`SyntaxTreeBuilder`].

use serde::{Deserialize, Serialize};

use super::{
    AccessLevel, BaseSpecifier, CodeCompletion, CompletionRequest, CompletionString, Cursor,
    CursorKind, NodeId, TranslationUnit,
};
use crate::error::{CacheError, Result};

/// One declaration node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    pub kind: CursorKind,
    #[serde(default)]
    pub spelling: String,
    #[serde(default)]
    pub access: AccessLevel,
    #[serde(default)]
    pub children: Vec<NodeId>,
    #[serde(default)]
    pub completion: Option<CompletionString>,
    #[serde(default)]
    pub bases: Vec<BaseSpecifier>,
    #[serde(default = "default_true")]
    pub is_definition: bool,
}

fn default_true() -> bool {
    true
}

impl NodeData {
    fn new(kind: CursorKind, spelling: &str) -> Self {
        Self {
            kind,
            spelling: spelling.to_string(),
            access: AccessLevel::Public,
            children: Vec::new(),
            completion: None,
            bases: Vec::new(),
            is_definition: true,
        }
    }
}

/// A parsed translation unit held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// Parse a tree from its JSON form. The first node must be the translation unit.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tree: SyntaxTree = serde_json::from_str(json)?;
        match tree.nodes.first() {
            Some(node) if node.kind == CursorKind::TranslationUnit => Ok(tree),
            _ => Err(CacheError::InvalidRoot(NodeId(0))),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index())
    }
}

impl TranslationUnit for SyntaxTree {
    fn cursor(&self, node: NodeId) -> Option<Cursor> {
        self.node(node).map(|data| Cursor { node, kind: data.kind })
    }

    fn spelling(&self, node: NodeId) -> String {
        self.node(node).map(|data| data.spelling.clone()).unwrap_or_default()
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|data| data.children.clone()).unwrap_or_default()
    }

    fn access(&self, node: NodeId) -> AccessLevel {
        self.node(node).map(|data| data.access).unwrap_or_default()
    }

    fn is_definition(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|data| data.is_definition)
    }

    fn completion_string(&self, node: NodeId) -> Option<CompletionString> {
        self.node(node).and_then(|data| data.completion.clone())
    }

    fn base_classes(&self, node: NodeId) -> Vec<BaseSpecifier> {
        self.node(node).map(|data| data.bases.clone()).unwrap_or_default()
    }

    fn code_complete(&self, request: &CompletionRequest<'_>) -> Result<Vec<CodeCompletion>> {
        Err(CacheError::Backend(format!(
            "no live completion backend for in-memory tree ({}:{}:{})",
            request.filename, request.row, request.col
        )))
    }
}

/// Incremental construction of a [`SyntaxTree`].
///
/// ```
/// use completion_cache::syntax::SyntaxTreeBuilder;
///
/// let mut builder = SyntaxTreeBuilder::new();
/// let ns = builder.namespace(builder.root(), "ns");
/// builder.function(ns, "f", &["int"], None);
/// let tree = builder.finish();
/// assert_eq!(tree.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SyntaxTreeBuilder {
    nodes: Vec<NodeData>,
}

impl Default for SyntaxTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxTreeBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(CursorKind::TranslationUnit, "")],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Add a node of any kind under `parent`. No completion string is attached.
    pub fn declare(&mut self, parent: NodeId, kind: CursorKind, spelling: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData::new(kind, spelling));
        if let Some(parent) = self.nodes.get_mut(parent.index()) {
            parent.children.push(id);
        }
        id
    }

    pub fn namespace(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.declare(parent, CursorKind::Namespace, name)
    }

    pub fn class(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = self.declare(parent, CursorKind::ClassDecl, name);
        self.set_completion(id, CompletionString::typed_name(name, None))
    }

    pub fn structure(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = self.declare(parent, CursorKind::StructDecl, name);
        self.set_completion(id, CompletionString::typed_name(name, None))
    }

    pub fn enumeration(&mut self, parent: NodeId, name: &str, constants: &[&str]) -> NodeId {
        let id = self.declare(parent, CursorKind::EnumDecl, name);
        for constant in constants {
            let c = self.declare(id, CursorKind::EnumConstantDecl, constant);
            self.set_completion(c, CompletionString::typed_name(constant, Some(name)));
        }
        id
    }

    pub fn function(&mut self, parent: NodeId, name: &str, params: &[&str], result: Option<&str>) -> NodeId {
        let id = self.declare(parent, CursorKind::FunctionDecl, name);
        self.set_completion(id, CompletionString::callable(name, params, result))
    }

    pub fn method(
        &mut self,
        class: NodeId,
        name: &str,
        params: &[&str],
        result: Option<&str>,
        access: AccessLevel,
        is_static: bool,
    ) -> NodeId {
        let id = self.declare(class, CursorKind::CxxMethod { is_static }, name);
        self.set_completion(id, CompletionString::callable(name, params, result));
        self.set_access(id, access)
    }

    pub fn constructor(&mut self, class: NodeId, name: &str, params: &[&str]) -> NodeId {
        let id = self.declare(class, CursorKind::Constructor, name);
        self.set_completion(id, CompletionString::callable(name, params, None))
    }

    pub fn field(&mut self, class: NodeId, name: &str, ty: &str, access: AccessLevel) -> NodeId {
        let id = self.declare(class, CursorKind::FieldDecl, name);
        self.set_completion(id, CompletionString::typed_name(name, Some(ty)));
        self.set_access(id, access)
    }

    pub fn variable(&mut self, parent: NodeId, name: &str, ty: &str) -> NodeId {
        let id = self.declare(parent, CursorKind::VarDecl, name);
        self.set_completion(id, CompletionString::typed_name(name, Some(ty)))
    }

    pub fn typedef(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = self.declare(parent, CursorKind::TypedefDecl, name);
        self.set_completion(id, CompletionString::typed_name(name, None))
    }

    /// Record `base` as a base class of `derived`.
    pub fn inherit(&mut self, derived: NodeId, base: NodeId, access: AccessLevel) -> &mut Self {
        if let Some(node) = self.nodes.get_mut(derived.index()) {
            node.bases.push(BaseSpecifier { class: base, access });
        }
        self
    }

    pub fn set_access(&mut self, node: NodeId, access: AccessLevel) -> NodeId {
        if let Some(data) = self.nodes.get_mut(node.index()) {
            data.access = access;
        }
        node
    }

    pub fn set_completion(&mut self, node: NodeId, completion: CompletionString) -> NodeId {
        if let Some(data) = self.nodes.get_mut(node.index()) {
            data.completion = Some(completion);
        }
        node
    }

    /// Mark a node as a forward declaration.
    pub fn forward_declaration(&mut self, node: NodeId) -> NodeId {
        if let Some(data) = self.nodes.get_mut(node.index()) {
            data.is_definition = false;
        }
        node
    }

    pub fn finish(self) -> SyntaxTree {
        SyntaxTree { nodes: self.nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_links_children() {
        let mut builder = SyntaxTreeBuilder::new();
        let ns = builder.namespace(builder.root(), "ns");
        let f = builder.function(ns, "f", &["int"], None);
        let tree = builder.finish();

        assert_eq!(tree.children(tree.root()), vec![ns]);
        assert_eq!(tree.children(ns), vec![f]);
        assert_eq!(tree.spelling(f), "f");
        assert_eq!(tree.cursor(f).map(|c| c.kind), Some(CursorKind::FunctionDecl));
    }

    #[test]
    fn test_invalid_node_yields_defaults() {
        let tree = SyntaxTreeBuilder::new().finish();
        let missing = NodeId(42);

        assert!(tree.cursor(missing).is_none());
        assert!(tree.children(missing).is_empty());
        assert_eq!(tree.spelling(missing), "");
        assert!(!tree.is_definition(missing));
    }

    #[test]
    fn test_json_round_trip_keeps_structure() {
        let mut builder = SyntaxTreeBuilder::new();
        let c = builder.class(builder.root(), "Widget");
        builder.field(c, "width", "int", AccessLevel::Private);
        let tree = builder.finish();

        let json = serde_json::to_string(&tree).unwrap();
        let parsed = SyntaxTree::from_json_str(&json).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_json_requires_translation_unit_root() {
        let json = r#"{"nodes":[{"kind":"namespace","spelling":"ns"}]}"#;
        assert!(matches!(
            SyntaxTree::from_json_str(json),
            Err(CacheError::InvalidRoot(_))
        ));
    }

    #[test]
    fn test_static_tree_has_no_live_completion() {
        let tree = SyntaxTreeBuilder::new().finish();
        let request = CompletionRequest { filename: "a.cpp", row: 1, col: 1, unsaved: &[] };
        assert!(matches!(tree.code_complete(&request), Err(CacheError::Backend(_))));
    }
}
