//! Semantic core for the Tiger language.
//!
//! Provides the AST model, a scope-aware symbol resolver, a memoized
//! type inference engine, and a pluggable semantic-check framework.
//! Consumed by an out-of-scope Java transpiler through [`javaexport`].
pub mod ast;
pub mod checker;
pub mod diagnostics;
pub mod javaexport;
pub mod lexer;
pub mod parser;
pub mod symbols;
pub mod types;

use ast::Expr;
use checker::Checker;
use diagnostics::Diagnostics;
use symbols::{ScopedSymbolTable, SymbolTable};
use types::TypeFinder;

/// Runs the full pipeline — symbol resolution, type inference wiring,
/// and the built-in rule set — over one parsed AST, returning every
/// diagnostic in emission order.
pub fn check(root: &Expr) -> Vec<String> {
    let symbols = ScopedSymbolTable::build(root);
    let diagnostics = Diagnostics::new();
    let types = TypeFinder::new(&symbols, diagnostics.clone());
    let checker = Checker::new();
    checker.check(root, &symbols, &types, &diagnostics);
    diagnostics.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::Builder;

    #[test]
    fn empty_let_produces_no_diagnostics() {
        let b = Builder::new();
        let root = b.let_expr(vec![], vec![]);
        assert_eq!(check(&root), Vec::<String>::new());
    }
}
