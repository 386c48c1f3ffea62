use crate::types::{MethodSig, Param, Receiver};

/// A trait known from outside the unit: its declared methods plus the
/// paths of its own supertraits (resolved recursively through the importer)
#[derive(Debug, Clone)]
pub struct ExternalTrait {
    pub path: String,
    pub methods: Vec<MethodSig>,
    pub supertraits: Vec<String>,
}

/// Source of trait metadata for paths that do not resolve inside the unit.
///
/// Injected by the caller so resolution stays hermetic; nothing in the
/// crate consults process-global state.
pub trait TraitImporter {
    fn lookup(&self, path: &str) -> Option<ExternalTrait>;
}

/// Built-in metadata for commonly embedded standard-library traits.
///
/// Read-only and self-contained: prelude names (`Clone`, `Iterator`, ...)
/// and their `std::` paths both resolve, and marker traits resolve to
/// empty method sets.
#[derive(Default)]
pub struct StdImporter;

impl TraitImporter for StdImporter {
    fn lookup(&self, path: &str) -> Option<ExternalTrait> {
        let canonical = canonical_std_path(path)?;
        let (methods, supertraits) = std_trait_shape(canonical)?;
        Some(ExternalTrait {
            path: canonical.to_string(),
            methods,
            supertraits: supertraits.iter().map(|s| s.to_string()).collect(),
        })
    }
}

fn canonical_std_path(path: &str) -> Option<&'static str> {
    Some(match path {
        "Clone" | "std::clone::Clone" | "core::clone::Clone" => "std::clone::Clone",
        "Default" | "std::default::Default" | "core::default::Default" => "std::default::Default",
        "Iterator" | "std::iter::Iterator" | "core::iter::Iterator" => "std::iter::Iterator",
        "Drop" | "std::ops::Drop" | "core::ops::Drop" => "std::ops::Drop",
        "PartialEq" | "std::cmp::PartialEq" | "core::cmp::PartialEq" => "std::cmp::PartialEq",
        "Eq" | "std::cmp::Eq" | "core::cmp::Eq" => "std::cmp::Eq",
        "Send" | "std::marker::Send" | "core::marker::Send" => "std::marker::Send",
        "Sync" | "std::marker::Sync" | "core::marker::Sync" => "std::marker::Sync",
        "Sized" | "std::marker::Sized" | "core::marker::Sized" => "std::marker::Sized",
        "Unpin" | "std::marker::Unpin" | "core::marker::Unpin" => "std::marker::Unpin",
        "std::fmt::Debug" | "core::fmt::Debug" | "Debug" => "std::fmt::Debug",
        "std::fmt::Display" | "core::fmt::Display" | "Display" => "std::fmt::Display",
        "std::io::Read" | "Read" => "std::io::Read",
        "std::io::Write" | "Write" => "std::io::Write",
        "std::error::Error" | "Error" => "std::error::Error",
        _ => return None,
    })
}

fn std_trait_shape(canonical: &str) -> Option<(Vec<MethodSig>, &'static [&'static str])> {
    let method = |name: &str, receiver, params: &[(&str, &str)], ret: Option<&str>| MethodSig {
        name: name.to_string(),
        receiver,
        params: params
            .iter()
            .map(|(name, ty)| Param {
                name: name.to_string(),
                ty: ty.to_string(),
            })
            .collect(),
        ret: ret.map(str::to_string),
    };

    let shape = match canonical {
        "std::clone::Clone" => (
            vec![method("clone", Some(Receiver::Ref), &[], Some("Self"))],
            &[][..],
        ),
        "std::default::Default" => (vec![method("default", None, &[], Some("Self"))], &[][..]),
        "std::iter::Iterator" => (
            vec![method(
                "next",
                Some(Receiver::RefMut),
                &[],
                Some("Option<Self::Item>"),
            )],
            &[][..],
        ),
        "std::ops::Drop" => (vec![method("drop", Some(Receiver::RefMut), &[], None)], &[][..]),
        "std::cmp::PartialEq" => (
            vec![method(
                "eq",
                Some(Receiver::Ref),
                &[("other", "&Self")],
                Some("bool"),
            )],
            &[][..],
        ),
        "std::cmp::Eq" => (vec![], &["std::cmp::PartialEq"][..]),
        "std::fmt::Debug" | "std::fmt::Display" => (
            vec![method(
                "fmt",
                Some(Receiver::Ref),
                &[("f", "&mut std::fmt::Formatter<'_>")],
                Some("std::fmt::Result"),
            )],
            &[][..],
        ),
        "std::io::Read" => (
            vec![method(
                "read",
                Some(Receiver::RefMut),
                &[("buf", "&mut [u8]")],
                Some("std::io::Result<usize>"),
            )],
            &[][..],
        ),
        "std::io::Write" => (
            vec![
                method(
                    "write",
                    Some(Receiver::RefMut),
                    &[("buf", "&[u8]")],
                    Some("std::io::Result<usize>"),
                ),
                method("flush", Some(Receiver::RefMut), &[], Some("std::io::Result<()>")),
            ],
            &[][..],
        ),
        "std::error::Error" => (
            vec![method(
                "source",
                Some(Receiver::Ref),
                &[],
                Some("Option<&(dyn std::error::Error + 'static)>"),
            )],
            &["std::fmt::Debug", "std::fmt::Display"][..],
        ),
        // Marker traits carry no methods
        "std::marker::Send" | "std::marker::Sync" | "std::marker::Sized"
        | "std::marker::Unpin" => (vec![], &[][..]),
        _ => return None,
    };
    Some(shape)
}
