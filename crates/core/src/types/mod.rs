pub mod interface;
pub mod method;
pub mod position;

// Re-export commonly used types
pub use interface::{FileId, ItemKind, TraitInterface};
pub use method::{MethodSig, Param, Receiver};
pub use position::{Position, Span};
