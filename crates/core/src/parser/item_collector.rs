use std::collections::HashMap;

use tree_sitter::{Node, Tree};

use crate::{
    error::{Error, Result},
    parser::utils::{node_to_position, node_text},
    types::{FileId, ItemKind, MethodSig, Param, Receiver, Span},
};

/// A trait declaration as written, with types already bound through the
/// file's `use` aliases
#[derive(Debug, Clone)]
pub struct TraitDecl {
    pub name: String,
    /// Normalized supertrait paths, generic arguments stripped
    pub supertraits: Vec<String>,
    pub methods: Vec<MethodSig>,
    pub span: Span,
}

/// Everything the resolver needs from one file of the unit
#[derive(Debug, Default)]
pub struct FileItems {
    /// Local name -> canonical path, from top-level `use` declarations
    pub aliases: HashMap<String, String>,
    pub traits: Vec<TraitDecl>,
    /// Non-trait top-level names, kept to distinguish lookup error kinds
    pub others: Vec<(String, ItemKind)>,
}

/// Collect the top-level items of one parsed file.
///
/// Only direct children of the source file are inspected; names nested in
/// modules are not part of the unit's top-level table. Function and method
/// bodies are never descended into.
pub fn collect_items(tree: &Tree, source: &str, file: FileId) -> Result<FileItems> {
    let root = tree.root_node();
    let mut items = FileItems::default();

    // Aliases first so every item sees the file's full import set,
    // regardless of declaration order.
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.kind() == "use_declaration" {
            collect_use(&child, source, &mut items.aliases)?;
        }
    }

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "trait_item" => {
                let decl = collect_trait(&child, source, file, &items.aliases)?;
                items.traits.push(decl);
            }
            "struct_item" => items.others.push((item_name(&child, source)?, ItemKind::Struct)),
            "enum_item" => items.others.push((item_name(&child, source)?, ItemKind::Enum)),
            "union_item" => items.others.push((item_name(&child, source)?, ItemKind::Union)),
            "function_item" => {
                items.others.push((item_name(&child, source)?, ItemKind::Function))
            }
            "type_item" => items.others.push((item_name(&child, source)?, ItemKind::TypeAlias)),
            "const_item" => items.others.push((item_name(&child, source)?, ItemKind::Const)),
            "static_item" => items.others.push((item_name(&child, source)?, ItemKind::Static)),
            "mod_item" => items.others.push((item_name(&child, source)?, ItemKind::Module)),
            "macro_definition" => {
                items.others.push((item_name(&child, source)?, ItemKind::Macro))
            }
            _ => {}
        }
    }

    Ok(items)
}

fn item_name(node: &Node, source: &str) -> Result<String> {
    let name_node = node.child_by_field_name("name").ok_or_else(|| {
        Error::Semantic(format!("{} without a name", node.kind().replace('_', " ")))
    })?;
    Ok(node_text(&name_node, source)?.to_string())
}

fn collect_use(node: &Node, source: &str, aliases: &mut HashMap<String, String>) -> Result<()> {
    if let Some(argument) = node.child_by_field_name("argument") {
        collect_use_tree(&argument, source, "", aliases)?;
    }
    Ok(())
}

fn collect_use_tree(
    node: &Node,
    source: &str,
    prefix: &str,
    aliases: &mut HashMap<String, String>,
) -> Result<()> {
    let join = |tail: &str| {
        if prefix.is_empty() {
            tail.to_string()
        } else {
            format!("{prefix}::{tail}")
        }
    };
    match node.kind() {
        "identifier" | "crate" | "super" | "self" => {
            let text = node_text(node, source)?;
            let full = join(text);
            let local = if text == "self" {
                prefix.rsplit("::").next().unwrap_or(prefix).to_string()
            } else {
                text.to_string()
            };
            let full = if text == "self" { prefix.to_string() } else { full };
            if !local.is_empty() {
                aliases.insert(local, full);
            }
        }
        "scoped_identifier" => {
            let text = node_text(node, source)?;
            let name = node
                .child_by_field_name("name")
                .map(|n| node_text(&n, source).map(str::to_string))
                .transpose()?
                .unwrap_or_default();
            if !name.is_empty() {
                aliases.insert(name, join(text));
            }
        }
        "use_as_clause" => {
            let path = node
                .child_by_field_name("path")
                .map(|n| node_text(&n, source).map(str::to_string))
                .transpose()?
                .unwrap_or_default();
            let alias = node
                .child_by_field_name("alias")
                .map(|n| node_text(&n, source).map(str::to_string))
                .transpose()?
                .unwrap_or_default();
            if !alias.is_empty() && !path.is_empty() {
                aliases.insert(alias, join(&path));
            }
        }
        "scoped_use_list" => {
            let path = node
                .child_by_field_name("path")
                .map(|n| node_text(&n, source).map(str::to_string))
                .transpose()?
                .unwrap_or_default();
            let nested = join(&path);
            if let Some(list) = node.child_by_field_name("list") {
                let mut cursor = list.walk();
                for entry in list.named_children(&mut cursor) {
                    collect_use_tree(&entry, source, &nested, aliases)?;
                }
            }
        }
        "use_list" => {
            let mut cursor = node.walk();
            for entry in node.named_children(&mut cursor) {
                collect_use_tree(&entry, source, prefix, aliases)?;
            }
        }
        // `use foo::*;` brings in nothing nameable here
        "use_wildcard" => {}
        _ => {}
    }
    Ok(())
}

fn collect_trait(
    node: &Node,
    source: &str,
    file: FileId,
    aliases: &HashMap<String, String>,
) -> Result<TraitDecl> {
    let name = item_name(node, source)?;

    let mut supertraits = Vec::new();
    if let Some(bounds) = node.child_by_field_name("bounds") {
        let mut cursor = bounds.walk();
        for bound in bounds.named_children(&mut cursor) {
            if bound.kind() == "lifetime" {
                continue;
            }
            let text = node_text(&bound, source)?;
            let path = text.split('<').next().unwrap_or(text).trim();
            if path.is_empty() {
                continue;
            }
            supertraits.push(normalize_type(path, aliases));
        }
    }

    let mut methods = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            // Provided methods (function_item) contribute their signature;
            // the body itself is never analyzed.
            if matches!(member.kind(), "function_signature_item" | "function_item") {
                methods.push(collect_method(&member, source, aliases)?);
            }
        }
    }

    Ok(TraitDecl {
        name,
        supertraits,
        methods,
        span: Span {
            file,
            start: node_to_position(node, true),
            end: node_to_position(node, false),
        },
    })
}

fn collect_method(
    node: &Node,
    source: &str,
    aliases: &HashMap<String, String>,
) -> Result<MethodSig> {
    let name = item_name(node, source)?;

    let mut receiver = None;
    let mut params = Vec::new();
    if let Some(parameters) = node.child_by_field_name("parameters") {
        let mut cursor = parameters.walk();
        for parameter in parameters.named_children(&mut cursor) {
            match parameter.kind() {
                "self_parameter" => {
                    let text = node_text(&parameter, source)?;
                    receiver = Some(parse_receiver(text));
                }
                "parameter" => {
                    let pattern = parameter
                        .child_by_field_name("pattern")
                        .map(|n| node_text(&n, source).map(str::to_string))
                        .transpose()?
                        .unwrap_or_else(|| "_".to_string());
                    let ty = parameter
                        .child_by_field_name("type")
                        .map(|n| node_text(&n, source).map(str::to_string))
                        .transpose()?
                        .unwrap_or_default();
                    params.push(Param {
                        name: pattern,
                        ty: normalize_type(&ty, aliases),
                    });
                }
                _ => {}
            }
        }
    }

    let ret = node
        .child_by_field_name("return_type")
        .map(|n| node_text(&n, source).map(str::to_string))
        .transpose()?
        .filter(|ty| ty != "()")
        .map(|ty| normalize_type(&ty, aliases));

    Ok(MethodSig {
        name,
        receiver,
        params,
        ret,
    })
}

fn parse_receiver(text: &str) -> Receiver {
    if !text.contains('&') {
        return Receiver::Owned;
    }
    if text.contains("mut self") {
        Receiver::RefMut
    } else {
        Receiver::Ref
    }
}

/// Rewrite every leading path segment of `ty` through the alias map, binding
/// locally imported names to their canonical paths.
pub fn normalize_type(ty: &str, aliases: &HashMap<String, String>) -> String {
    let mut out = String::new();
    let mut chars = ty.chars().peekable();
    let mut prev: Option<char> = None;
    while let Some(c) = chars.next() {
        if c == '_' || c.is_alphabetic() {
            let mut ident = String::new();
            ident.push(c);
            while let Some(&next) = chars.peek() {
                if next == '_' || next.is_alphanumeric() {
                    ident.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            let qualified = out.ends_with("::");
            let lifetime = prev == Some('\'');
            match aliases.get(&ident) {
                Some(full) if !qualified && !lifetime => out.push_str(full),
                _ => out.push_str(&ident),
            }
            prev = ident.chars().last();
        } else {
            out.push(c);
            prev = Some(c);
        }
    }
    out
}
