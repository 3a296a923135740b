//! Abstract syntax tree for Tiger programs.
//!
//! The tree is a rooted, acyclic structure of three disjoint node
//! families (`Expr`, `LValue`, `Declaration`) plus the `Type` family
//! used inside type declarations. Every node carries a [`NodeId`],
//! assigned once by whichever code builds the tree (the parser in
//! production, [`Builder`] in tests), which the symbol table and type
//! finder use as a stable identity instead of address comparisons.
//!
//! No source position is attached to any node here: the semantic core
//! never needs source coordinates to do its work. The parser keeps its
//! own position bookkeeping for `ParseError` only.
mod builder;
mod node;

pub use builder::Builder;
pub use node::{
    BinaryOp, Declaration, Expr, FieldAssignment, FunctionDeclaration, LValue, NodeId, Type,
    TypeDeclaration, TypeField, VariableDeclaration,
};
