//! Declaration transforms
//!
//! Each transform takes one lowered form of a type and produces the next
//! (see `ir`). Transforms never print; the printer in `crate::emitter`
//! walks the final `ClassDecl`.
//!
//! | Transform | Input | Output |
//! |-----------|-------|--------|
//! | `modifier_map` | `TypeDeclaration` | `MappedType` |
//! | `property_desugar` | `MappedType` | `DesugaredType` |
//! | `inheritance` | `DesugaredType` | `ClassDecl` |

pub mod inheritance;
pub mod ir;
pub mod modifier_map;
pub mod property_desugar;

pub use inheritance::{AncestorIndex, InheritanceResolver};
pub use modifier_map::ModifierMapper;
pub use property_desugar::PropertyDesugarer;
