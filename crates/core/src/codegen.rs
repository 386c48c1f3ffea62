use std::fmt::Write;

use crate::types::{MethodSig, TraitInterface};

/// Render a mock skeleton for a resolved trait.
///
/// The emitted source declares a `Mock<Name>` struct and an impl covering
/// the trait's complete flattened method set, each method panicking until
/// stubbed by the caller. Pure string building; nothing is written to disk
/// here.
pub fn mock_source(iface: &TraitInterface) -> String {
    let mock_name = format!("Mock{}", iface.name);
    let mut out = String::new();

    let _ = writeln!(out, "/// Generated mock for `{}`.", iface.name);
    let _ = writeln!(out, "#[derive(Debug, Default)]");
    let _ = writeln!(out, "pub struct {mock_name};");
    let _ = writeln!(out);
    let _ = writeln!(out, "impl {} for {mock_name} {{", iface.name);
    for (i, method) in iface.methods.iter().enumerate() {
        if i > 0 {
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "    {} {{", signature(method));
        let _ = writeln!(
            out,
            "        unimplemented!(\"{mock_name}::{} is not stubbed\")",
            method.name
        );
        let _ = writeln!(out, "    }}");
    }
    let _ = writeln!(out, "}}");
    out
}

fn signature(method: &MethodSig) -> String {
    let mut sig = format!("fn {}(", method.name);
    let mut first = true;
    if let Some(receiver) = &method.receiver {
        sig.push_str(&receiver.to_string());
        first = false;
    }
    for param in &method.params {
        if !first {
            sig.push_str(", ");
        }
        let _ = write!(sig, "{}: {}", param.name, param.ty);
        first = false;
    }
    sig.push(')');
    if let Some(ret) = &method.ret {
        let _ = write!(sig, " -> {ret}");
    }
    sig
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileId, Param, Receiver};
    use std::path::PathBuf;

    fn iface() -> TraitInterface {
        TraitInterface {
            name: "Greeter".to_string(),
            source_file: PathBuf::from("/tmp/a.rs"),
            file: FileId(0),
            methods: vec![
                MethodSig {
                    name: "greet".to_string(),
                    receiver: Some(Receiver::Ref),
                    params: vec![Param {
                        name: "whom".to_string(),
                        ty: "&str".to_string(),
                    }],
                    ret: Some("String".to_string()),
                },
                MethodSig {
                    name: "reset".to_string(),
                    receiver: Some(Receiver::RefMut),
                    params: vec![],
                    ret: None,
                },
            ],
        }
    }

    #[test]
    fn test_mock_covers_every_method() {
        let source = mock_source(&iface());
        assert!(source.contains("pub struct MockGreeter;"));
        assert!(source.contains("impl Greeter for MockGreeter {"));
        assert!(source.contains("fn greet(&self, whom: &str) -> String {"));
        assert!(source.contains("fn reset(&mut self) {"));
        assert!(source.contains("MockGreeter::greet is not stubbed"));
    }

    #[test]
    fn test_mock_for_empty_trait() {
        let mut iface = iface();
        iface.methods.clear();
        let source = mock_source(&iface);
        assert!(source.contains("impl Greeter for MockGreeter {\n}"));
    }
}
