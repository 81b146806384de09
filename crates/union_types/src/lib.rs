//! Runtime union-type assertions with call-site diagnostics.
//!
//! Dynamic-language runtimes routinely need "this argument must be one of
//! int, float, string" checks that the host language cannot express
//! statically. This crate classifies runtime [`Value`]s into canonical type
//! tags, validates them against declared unions (including classname
//! pseudo-types resolved through a [`TypeContext`] registry), and — given an
//! explicit [`CallStack`] — locates a named parameter in the immediate
//! caller's frame, resolves its actual or default value, and raises a
//! [`UnionTypeError`] whose message pins the exact offending source line.
//!
//! Nothing is captured implicitly: the integrating runtime supplies the call
//! frames and registers class hierarchies and callable signatures up front,
//! so the frame-0/frame-1 arithmetic is stable by construction.

mod assert;
mod context;
mod error;
mod stack;
pub mod trace;
mod value;

pub use assert::{
    CLASSNAME_PATTERN, IsOptions, UNION_TYPES, assert, assert_func_arg, assert_types,
    full_union_types, is, is_with,
};
pub use context::{ClassDef, FuncSignature, ParameterInfo, TypeContext};
pub use error::UnionTypeError;
pub use stack::{CallKind, CallStack, StackFrame};
pub use value::{ArrayKey, Value};
