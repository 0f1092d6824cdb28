//! Syntax model shared with the parsing collaborator
//!
//! The completion cache never parses source itself. Everything it knows about
//! declarations comes through the [`TranslationUnit`] trait: node kinds, names,
//! access specifiers, completion strings, base classes, and the position-based
//! live completion query that honours unsaved editor buffers.
//!
//! Node references are opaque [`NodeId`] handles. They identify a declaration
//! for tree operations (scope lookup, `find_type` results) but never take part
//! in entry equality.
//!
//! [`tree::SyntaxTree`] is an in-memory implementation used by the CLI (trees
//! serialized as JSON) and by the test suite.

pub mod tree;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use tree::{SyntaxTree, SyntaxTreeBuilder};

/// Opaque handle to one node of a translation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declaration kind of a node, modelled on libclang's cursor kinds.
///
/// Methods carry their own static-ness so that entry construction can derive
/// `is_static` with a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorKind {
    TranslationUnit,
    Namespace,
    /// `extern "C" { ... }` and similar transparent containers
    LinkageSpec,
    ClassDecl,
    StructDecl,
    UnionDecl,
    ClassTemplate,
    EnumDecl,
    EnumConstantDecl,
    FunctionDecl,
    FunctionTemplate,
    CxxMethod { is_static: bool },
    Constructor,
    Destructor,
    ConversionFunction,
    FieldDecl,
    VarDecl,
    TypedefDecl,
    TypeAliasDecl,
    #[serde(rename = "objc_interface_decl")]
    ObjCInterfaceDecl,
    #[serde(rename = "objc_class_method_decl")]
    ObjCClassMethodDecl,
    #[serde(rename = "objc_instance_method_decl")]
    ObjCInstanceMethodDecl,
    #[serde(rename = "objc_ivar_decl")]
    ObjCIvarDecl,
    #[serde(rename = "objc_property_decl")]
    ObjCPropertyDecl,
    MacroDefinition,
    ParmDecl,
    BaseSpecifier,
    TemplateTypeParameter,
    TypeRef,
    Unexposed,
}

impl CursorKind {
    /// True for kinds that produce a completion entry.
    pub fn is_declaration(self) -> bool {
        !matches!(
            self,
            CursorKind::TranslationUnit
                | CursorKind::LinkageSpec
                | CursorKind::ParmDecl
                | CursorKind::BaseSpecifier
                | CursorKind::TemplateTypeParameter
                | CursorKind::TypeRef
                | CursorKind::Unexposed
        )
    }

    /// Classes, structs, unions, class templates and Objective-C interfaces.
    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            CursorKind::ClassDecl
                | CursorKind::StructDecl
                | CursorKind::UnionDecl
                | CursorKind::ClassTemplate
                | CursorKind::ObjCInterfaceDecl
        )
    }

    /// Kinds a type lookup should land on: classes, enums, typedefs and namespaces.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            CursorKind::EnumDecl | CursorKind::TypedefDecl | CursorKind::TypeAliasDecl | CursorKind::Namespace
        ) || self.is_class_like()
    }

    /// Kinds that own a member bucket and may appear in a qualified path.
    pub fn is_scope(self) -> bool {
        matches!(self, CursorKind::TranslationUnit | CursorKind::Namespace) || self.is_class_like()
    }

    /// Kinds reachable through a member access (`.`, `->`) on an object.
    pub fn is_member(self) -> bool {
        matches!(
            self,
            CursorKind::CxxMethod { .. }
                | CursorKind::FieldDecl
                | CursorKind::ConversionFunction
                | CursorKind::ObjCInstanceMethodDecl
                | CursorKind::ObjCClassMethodDecl
                | CursorKind::ObjCIvarDecl
                | CursorKind::ObjCPropertyDecl
        )
    }

    /// Constructors and destructors belong to their own class only.
    pub fn is_inheritable(self) -> bool {
        !matches!(self, CursorKind::Constructor | CursorKind::Destructor)
    }

    /// Suffix shown after the tab in a display label when no result type exists.
    pub fn label(self) -> Option<&'static str> {
        match self {
            CursorKind::Namespace => Some("namespace"),
            CursorKind::ClassDecl | CursorKind::ClassTemplate | CursorKind::ObjCInterfaceDecl => {
                Some("class")
            }
            CursorKind::StructDecl => Some("struct"),
            CursorKind::UnionDecl => Some("union"),
            CursorKind::EnumDecl => Some("enum"),
            CursorKind::TypedefDecl | CursorKind::TypeAliasDecl => Some("typedef"),
            CursorKind::Constructor => Some("constructor"),
            CursorKind::MacroDefinition => Some("macro"),
            _ => None,
        }
    }
}

/// A node reference together with its declaration kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub node: NodeId,
    pub kind: CursorKind,
}

/// C++ access specifier. Ordered from least to most restrictive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    #[default]
    Public,
    Protected,
    Private,
}

impl AccessLevel {
    /// Effective access of a member seen through an inheritance edge.
    pub fn restrict(self, inheritance: AccessLevel) -> AccessLevel {
        self.max(inheritance)
    }
}

/// One piece of a completion string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Chunk {
    /// The text the user types to select the completion (the name).
    TypedText(String),
    /// Literal text, including punctuation such as `(` or `, `.
    Text(String),
    /// A parameter the user is expected to fill in.
    Placeholder(String),
    /// The parameter at the caret inside an argument list.
    CurrentParameter(String),
    /// Shown in the label, never inserted.
    Informative(String),
    ResultType(String),
    /// Default arguments and other optional trailing pieces.
    Optional(CompletionString),
}

/// Chunked completion text for one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionString {
    pub chunks: Vec<Chunk>,
}

impl CompletionString {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    /// Completion string for a callable: `name(p1, p2)` with an optional result type.
    pub fn callable(name: &str, params: &[&str], result: Option<&str>) -> Self {
        let mut chunks = vec![Chunk::TypedText(name.to_string()), Chunk::Text("(".to_string())];
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                chunks.push(Chunk::Text(", ".to_string()));
            }
            chunks.push(Chunk::Placeholder(param.to_string()));
        }
        chunks.push(Chunk::Text(")".to_string()));
        if let Some(result) = result {
            chunks.push(Chunk::ResultType(result.to_string()));
        }
        Self { chunks }
    }

    /// Completion string for a name with an optional type shown after it.
    pub fn typed_name(name: &str, result: Option<&str>) -> Self {
        let mut chunks = vec![Chunk::TypedText(name.to_string())];
        if let Some(result) = result {
            chunks.push(Chunk::ResultType(result.to_string()));
        }
        Self { chunks }
    }
}

/// One base-class edge of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseSpecifier {
    /// The resolved base class declaration.
    pub class: NodeId,
    #[serde(default)]
    pub access: AccessLevel,
}

/// Unsaved editor contents for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsavedFile {
    pub filename: String,
    pub contents: String,
}

impl UnsavedFile {
    pub fn new(filename: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }

    /// Byte length of the overlay contents.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// A live completion request at a 1-based buffer position.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub filename: &'a str,
    pub row: u32,
    pub col: u32,
    pub unsaved: &'a [UnsavedFile],
}

/// Availability reported by the collaborator for a live candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    Available,
    Deprecated,
    NotAvailable,
    NotAccessible,
}

impl Availability {
    pub fn is_usable(self) -> bool {
        matches!(self, Availability::Available | Availability::Deprecated)
    }
}

/// A raw candidate produced by the collaborator's live completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeCompletion {
    pub kind: CursorKind,
    /// Declaration the candidate refers to, when the collaborator knows it.
    #[serde(default)]
    pub node: Option<NodeId>,
    pub string: CompletionString,
    #[serde(default)]
    pub access: AccessLevel,
    #[serde(default)]
    pub availability: Availability,
}

/// The tree-parsing collaborator.
///
/// Implementations answer metadata questions about nodes of one parsed
/// translation unit and run position-based live completion. Invalid node
/// handles must yield `None` / empty collections rather than panicking.
pub trait TranslationUnit: Send + Sync {
    /// Kind of the node, or `None` when the handle is not a node of this unit.
    fn cursor(&self, node: NodeId) -> Option<Cursor>;

    /// Bare name of the node; empty for anonymous declarations.
    fn spelling(&self, node: NodeId) -> String;

    /// Direct children in source order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn access(&self, node: NodeId) -> AccessLevel;

    /// False for forward declarations.
    fn is_definition(&self, node: NodeId) -> bool {
        let _ = node;
        true
    }

    fn completion_string(&self, node: NodeId) -> Option<CompletionString>;

    /// Resolved base classes of a class-like node, in declaration order.
    fn base_classes(&self, node: NodeId) -> Vec<BaseSpecifier>;

    /// Live completion at a buffer position, honouring unsaved overlays.
    fn code_complete(&self, request: &CompletionRequest<'_>) -> Result<Vec<CodeCompletion>>;
}
