//! AST-native polynomial functions.
//!
//! Expand and Collect, plus the factor helpers they share.

mod collect;
mod expand;
mod helpers;

pub use collect::*;
pub use expand::*;
pub use helpers::*;
