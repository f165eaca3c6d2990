//! Language-neutral member model for classport.
//!
//! A `TypeDeclaration` is produced by an upstream front end (or deserialized
//! from JSON) and handed to the translation pipeline in `classport-emitter`.
//!
//! ```json
//! {
//!   "name": "Account",
//!   "baseTypes": ["Entity"],
//!   "capabilities": ["IAuditable"],
//!   "members": [
//!     { "kind": "property", "name": "Balance", "visibility": "public",
//!       "type": "int", "setter": { "visibility": "protected" }, "default": "0" }
//!   ]
//! }
//! ```

pub mod model;
pub use model::{
    Accessor, Body, Constructor, Field, Member, MemberKind, Method, Mutability, Parameter,
    Property, Signature, SpecialModifier, TypeDeclaration, Visibility,
};
