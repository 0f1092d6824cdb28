//! Random declaration trees for property-based testing.
//!
//! [`DeclTree`] describes a translation unit as nested declarations and builds
//! it into a [`SyntaxTree`]. Identifiers are drawn from a deliberately small
//! alphabet so that names, prefixes and re-opened namespaces collide often.
//!
//! Generation takes a depth parameter so nested namespaces and classes stay
//! shallow. Classes may derive from classes built before them; a base is
//! picked by index into the classes seen so far, so inheritance is acyclic.

use quickcheck::{Arbitrary, Gen};

use completion_cache::syntax::{AccessLevel, NodeId, SyntaxTree, SyntaxTreeBuilder};

/// Maximum nesting of namespaces and classes.
const MAX_DEPTH: usize = 3;

#[derive(Clone, Debug)]
pub enum Decl {
    Namespace { name: String, members: Vec<Decl> },
    Class {
        name: String,
        members: Vec<Member>,
        bases: Vec<(usize, AccessLevel)>,
    },
    Enum { name: String, constants: Vec<String> },
    Function { name: String, params: Vec<String>, result: Option<String> },
    Variable { name: String, ty: String },
}

#[derive(Clone, Debug)]
pub enum Member {
    Method {
        name: String,
        params: Vec<String>,
        result: Option<String>,
        access: AccessLevel,
        is_static: bool,
    },
    Field { name: String, ty: String, access: AccessLevel },
}

#[derive(Clone, Debug)]
pub struct DeclTree {
    pub decls: Vec<Decl>,
}

impl DeclTree {
    pub fn build(&self) -> SyntaxTree {
        let mut builder = SyntaxTreeBuilder::new();
        let root = builder.root();
        let mut classes = Vec::new();
        for decl in &self.decls {
            add_decl(&mut builder, root, decl, &mut classes);
        }
        builder.finish()
    }
}

fn add_decl(b: &mut SyntaxTreeBuilder, parent: NodeId, decl: &Decl, classes: &mut Vec<NodeId>) {
    match decl {
        Decl::Namespace { name, members } => {
            let ns = b.namespace(parent, name);
            for member in members {
                add_decl(b, ns, member, classes);
            }
        }
        Decl::Class { name, members, bases } => {
            let class = b.class(parent, name);
            for member in members {
                add_member(b, class, member);
            }
            if !classes.is_empty() {
                for (pick, access) in bases {
                    b.inherit(class, classes[pick % classes.len()], *access);
                }
            }
            classes.push(class);
        }
        Decl::Enum { name, constants } => {
            let constants: Vec<&str> = constants.iter().map(String::as_str).collect();
            b.enumeration(parent, name, &constants);
        }
        Decl::Function { name, params, result } => {
            let params: Vec<&str> = params.iter().map(String::as_str).collect();
            b.function(parent, name, &params, result.as_deref());
        }
        Decl::Variable { name, ty } => {
            b.variable(parent, name, ty);
        }
    }
}

fn add_member(b: &mut SyntaxTreeBuilder, class: NodeId, member: &Member) {
    match member {
        Member::Method {
            name,
            params,
            result,
            access,
            is_static,
        } => {
            let params: Vec<&str> = params.iter().map(String::as_str).collect();
            b.method(class, name, &params, result.as_deref(), *access, *is_static);
        }
        Member::Field { name, ty, access } => {
            b.field(class, name, ty, *access);
        }
    }
}

fn gen_range(g: &mut Gen, min: u32, max: u32) -> u32 {
    min + (u32::arbitrary(g) % (max - min + 1))
}

fn gen_ident(g: &mut Gen) -> String {
    const STARTERS: &[char] = &['a', 'b', 'f', 'g', 'x', 'S', '_'];
    const CONTINUERS: &[char] = &['a', 'b', 'x', 'y', '0', '1', '_'];
    let mut name = String::new();
    name.push(*g.choose(STARTERS).unwrap_or(&'a'));
    for _ in 0..gen_range(g, 0, 3) {
        name.push(*g.choose(CONTINUERS).unwrap_or(&'a'));
    }
    name
}

fn gen_type(g: &mut Gen) -> String {
    const TYPES: &[&str] = &["int", "double", "char*", "std::string", "bool", "size_t"];
    g.choose(TYPES).unwrap_or(&"int").to_string()
}

fn gen_access(g: &mut Gen) -> AccessLevel {
    *g.choose(&[AccessLevel::Public, AccessLevel::Protected, AccessLevel::Private])
        .unwrap_or(&AccessLevel::Public)
}

fn gen_params(g: &mut Gen) -> Vec<String> {
    (0..gen_range(g, 0, 3)).map(|_| gen_type(g)).collect()
}

fn gen_result(g: &mut Gen) -> Option<String> {
    bool::arbitrary(g).then(|| gen_type(g))
}

fn gen_member(g: &mut Gen) -> Member {
    if bool::arbitrary(g) {
        Member::Method {
            name: gen_ident(g),
            params: gen_params(g),
            result: gen_result(g),
            access: gen_access(g),
            is_static: bool::arbitrary(g),
        }
    } else {
        Member::Field {
            name: gen_ident(g),
            ty: gen_type(g),
            access: gen_access(g),
        }
    }
}

fn gen_decl(g: &mut Gen, depth: usize) -> Decl {
    const NESTED: &[&str] = &["namespace", "class", "enum", "function", "variable"];
    const LEAVES: &[&str] = &["enum", "function", "variable"];
    let choices = if depth == 0 { LEAVES } else { NESTED };

    match *g.choose(choices).unwrap_or(&"function") {
        "namespace" => Decl::Namespace {
            name: gen_ident(g),
            members: (0..gen_range(g, 0, 4)).map(|_| gen_decl(g, depth - 1)).collect(),
        },
        "class" => Decl::Class {
            name: gen_ident(g),
            members: (0..gen_range(g, 0, 5)).map(|_| gen_member(g)).collect(),
            bases: (0..gen_range(g, 0, 2))
                .map(|_| (usize::arbitrary(g), gen_access(g)))
                .collect(),
        },
        "enum" => Decl::Enum {
            name: gen_ident(g),
            constants: (0..gen_range(g, 0, 3)).map(|_| gen_ident(g)).collect(),
        },
        "variable" => Decl::Variable {
            name: gen_ident(g),
            ty: gen_type(g),
        },
        _ => Decl::Function {
            name: gen_ident(g),
            params: gen_params(g),
            result: gen_result(g),
        },
    }
}

impl Arbitrary for DeclTree {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = g.size().min(MAX_DEPTH);
        let count = gen_range(g, 0, 8);
        DeclTree {
            decls: (0..count).map(|_| gen_decl(g, depth)).collect(),
        }
    }
}

/// Short label text for entry equality properties.
#[derive(Clone, Debug)]
pub struct LabelText(pub String);

impl Arbitrary for LabelText {
    fn arbitrary(g: &mut Gen) -> Self {
        const PIECES: &[&str] = &["", "f", "(", "int", ")", "\t", "${1:x}", "g"];
        let text = (0..gen_range(g, 0, 3))
            .map(|_| *g.choose(PIECES).unwrap_or(&""))
            .collect();
        LabelText(text)
    }
}
