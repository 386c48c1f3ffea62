use std::fmt;

use serde::{Deserialize, Serialize};

/// How a trait method takes `self`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Receiver {
    /// `&self`
    Ref,
    /// `&mut self`
    RefMut,
    /// `self`
    Owned,
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Receiver::Ref => write!(f, "&self"),
            Receiver::RefMut => write!(f, "&mut self"),
            Receiver::Owned => write!(f, "self"),
        }
    }
}

/// A named, typed parameter of a trait method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    /// Type text after alias normalization
    pub ty: String,
}

/// A fully resolved trait-method signature.
///
/// Parameter and return types are stored after binding through the unit's
/// `use` aliases, so two signatures spelled differently in different files
/// compare equal once they resolve to the same types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSig {
    pub name: String,
    /// `None` for associated functions without a receiver
    pub receiver: Option<Receiver>,
    pub params: Vec<Param>,
    /// `None` for methods returning `()`
    pub ret: Option<String>,
}

impl fmt::Display for MethodSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}(", self.name)?;
        let mut first = true;
        if let Some(receiver) = &self.receiver {
            write!(f, "{receiver}")?;
            first = false;
        }
        for param in &self.params {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", param.name, param.ty)?;
            first = false;
        }
        write!(f, ")")?;
        if let Some(ret) = &self.ret {
            write!(f, " -> {ret}")?;
        }
        Ok(())
    }
}
