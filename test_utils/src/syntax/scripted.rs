//! A translation unit with scripted live completion.
//!
//! Declaration metadata comes from a wrapped [`SyntaxTree`]; `code_complete`
//! answers from a fixed candidate list (or fails with a fixed message) and
//! records every request it receives.

use std::sync::Mutex;

use completion_cache::error::{CacheError, Result};
use completion_cache::syntax::{
    AccessLevel, Availability, BaseSpecifier, CodeCompletion, CompletionRequest, CompletionString, Cursor,
    CursorKind, NodeId, SyntaxTree, TranslationUnit,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub filename: String,
    pub row: u32,
    pub col: u32,
    /// Filenames of the unsaved overlays, in order.
    pub overlays: Vec<String>,
}

pub struct ScriptedUnit {
    tree: SyntaxTree,
    script: std::result::Result<Vec<CodeCompletion>, String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedUnit {
    pub fn new(tree: SyntaxTree, candidates: Vec<CodeCompletion>) -> Self {
        Self {
            tree,
            script: Ok(candidates),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A unit whose live completion always fails.
    pub fn failing(tree: SyntaxTree, message: &str) -> Self {
        Self {
            tree,
            script: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl TranslationUnit for ScriptedUnit {
    fn cursor(&self, node: NodeId) -> Option<Cursor> {
        self.tree.cursor(node)
    }

    fn spelling(&self, node: NodeId) -> String {
        self.tree.spelling(node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.children(node)
    }

    fn access(&self, node: NodeId) -> AccessLevel {
        self.tree.access(node)
    }

    fn is_definition(&self, node: NodeId) -> bool {
        self.tree.is_definition(node)
    }

    fn completion_string(&self, node: NodeId) -> Option<CompletionString> {
        self.tree.completion_string(node)
    }

    fn base_classes(&self, node: NodeId) -> Vec<BaseSpecifier> {
        self.tree.base_classes(node)
    }

    fn code_complete(&self, request: &CompletionRequest<'_>) -> Result<Vec<CodeCompletion>> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                filename: request.filename.to_string(),
                row: request.row,
                col: request.col,
                overlays: request.unsaved.iter().map(|file| file.filename.clone()).collect(),
            });
        self.script.clone().map_err(CacheError::Backend)
    }
}

pub fn method(name: &str, params: &[&str], result: Option<&str>, access: AccessLevel) -> CodeCompletion {
    CodeCompletion {
        kind: CursorKind::CxxMethod { is_static: false },
        node: None,
        string: CompletionString::callable(name, params, result),
        access,
        availability: Availability::Available,
    }
}

pub fn field(name: &str, ty: &str, access: AccessLevel) -> CodeCompletion {
    CodeCompletion {
        kind: CursorKind::FieldDecl,
        node: None,
        string: CompletionString::typed_name(name, Some(ty)),
        access,
        availability: Availability::Available,
    }
}

pub fn function(name: &str, params: &[&str], result: Option<&str>) -> CodeCompletion {
    CodeCompletion {
        kind: CursorKind::FunctionDecl,
        node: None,
        string: CompletionString::callable(name, params, result),
        access: AccessLevel::Public,
        availability: Availability::Available,
    }
}

pub fn macro_definition(name: &str) -> CodeCompletion {
    CodeCompletion {
        kind: CursorKind::MacroDefinition,
        node: None,
        string: CompletionString::typed_name(name, None),
        access: AccessLevel::Public,
        availability: Availability::Available,
    }
}
