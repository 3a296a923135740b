//! Scope-aware symbol resolution.
//!
//! Exposed as a trait so test code can wrap the concrete table in a
//! call-counting decorator to observe memoization without reaching
//! into private state.
mod scope;
mod table;

pub use table::{ScopedSymbolTable, StorageLocation, Unaliased};

use crate::ast::Expr;

/// Answers "which declaration does name N resolve to at AST node E?"
/// for three name categories (type, variable-or-parameter, function),
/// plus the combined storage-location accessor and the
/// alias-unwrapping helper.
pub trait SymbolTable<'ast> {
    fn lookup_function(
        &self,
        expr: &Expr,
        name: &str,
    ) -> Option<&'ast crate::ast::FunctionDeclaration>;

    fn lookup_storage(&self, expr: &Expr, name: &str) -> Option<StorageLocation<'ast>>;

    fn lookup_variable(
        &self,
        expr: &Expr,
        name: &str,
    ) -> Option<&'ast crate::ast::VariableDeclaration> {
        match self.lookup_storage(expr, name) {
            Some(StorageLocation::Variable(v)) => Some(v),
            _ => None,
        }
    }

    fn lookup_type(&self, expr: &Expr, name: &str) -> Option<&'ast crate::ast::TypeDeclaration>;

    fn lookup_unaliased_type(&self, expr: &Expr, name: &str) -> Option<Unaliased<'ast>>;
}
