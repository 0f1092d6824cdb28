//! Conversion of entries to LSP completion items.

use lsp_types::{CompletionItem, CompletionItemKind, CompletionItemLabelDetails, InsertTextFormat};

use crate::cache::Entry;
use crate::syntax::CursorKind;

/// Convert an entry to an LSP `CompletionItem`.
///
/// The display label is split at its tab: the signature becomes the label and
/// the result type (or kind label) becomes the detail. `sort_order` keeps the
/// cache's ordering in clients that sort by `sort_text`.
pub fn to_completion_item(entry: &Entry, sort_order: usize) -> CompletionItem {
    let (label, detail) = match entry.display().split_once('\t') {
        Some((label, detail)) => (label, Some(detail.to_string())),
        None => (entry.display(), None),
    };

    let insert_format = if entry.insert().contains("${") {
        InsertTextFormat::SNIPPET
    } else {
        InsertTextFormat::PLAIN_TEXT
    };

    let mut item = CompletionItem {
        label: label.to_string(),
        kind: entry.kind().and_then(item_kind),
        detail,
        insert_text: Some(entry.insert().to_string()),
        insert_text_format: Some(insert_format),
        filter_text: Some(entry.name().to_string()),
        ..Default::default()
    };

    if entry.is_base_class() {
        item.label_details = Some(CompletionItemLabelDetails {
            detail: None,
            description: Some("inherited".to_string()),
        });
    }

    item.sort_text = Some(format!("{:04}", sort_order));
    item
}

fn item_kind(kind: CursorKind) -> Option<CompletionItemKind> {
    let item = match kind {
        CursorKind::Namespace => CompletionItemKind::MODULE,
        CursorKind::ClassDecl | CursorKind::ClassTemplate | CursorKind::UnionDecl => CompletionItemKind::CLASS,
        CursorKind::StructDecl => CompletionItemKind::STRUCT,
        CursorKind::ObjCInterfaceDecl => CompletionItemKind::INTERFACE,
        CursorKind::EnumDecl => CompletionItemKind::ENUM,
        CursorKind::EnumConstantDecl => CompletionItemKind::ENUM_MEMBER,
        CursorKind::FunctionDecl | CursorKind::FunctionTemplate => CompletionItemKind::FUNCTION,
        CursorKind::CxxMethod { .. }
        | CursorKind::ConversionFunction
        | CursorKind::Destructor
        | CursorKind::ObjCClassMethodDecl
        | CursorKind::ObjCInstanceMethodDecl => CompletionItemKind::METHOD,
        CursorKind::Constructor => CompletionItemKind::CONSTRUCTOR,
        CursorKind::FieldDecl | CursorKind::ObjCIvarDecl => CompletionItemKind::FIELD,
        CursorKind::ObjCPropertyDecl => CompletionItemKind::PROPERTY,
        CursorKind::VarDecl => CompletionItemKind::VARIABLE,
        CursorKind::TypedefDecl | CursorKind::TypeAliasDecl => CompletionItemKind::TYPE_PARAMETER,
        CursorKind::MacroDefinition => CompletionItemKind::CONSTANT,
        _ => return None,
    };
    Some(item)
}
