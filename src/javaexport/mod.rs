//! The narrow contract an out-of-scope Java transpiler would consume.
//!
//! `Export` is a thin façade over the four queries such a backend
//! needs to stay pure, repeatable, and crash-free on a malformed but
//! parseable AST. It adds no behaviour of its own beyond forwarding.
use crate::ast::{Expr, FunctionDeclaration};
use crate::symbols::{StorageLocation, SymbolTable, Unaliased};
use crate::types::{TypeFinder, INT, STRING};

pub struct Export<'facade, 'sym, 'ast> {
    symbols: &'facade dyn SymbolTable<'ast>,
    types: &'facade TypeFinder<'sym, 'ast>,
}

impl<'facade, 'sym, 'ast> Export<'facade, 'sym, 'ast> {
    pub fn new(symbols: &'facade dyn SymbolTable<'ast>, types: &'facade TypeFinder<'sym, 'ast>) -> Self {
        Self { symbols, types }
    }

    pub fn type_of(&self, expr: &'ast Expr) -> String {
        self.types.type_of(expr)
    }

    pub fn lookup_storage(&self, expr: &Expr, name: &str) -> Option<StorageLocation<'ast>> {
        self.symbols.lookup_storage(expr, name)
    }

    pub fn lookup_function(&self, expr: &Expr, name: &str) -> Option<&'ast FunctionDeclaration> {
        self.symbols.lookup_function(expr, name)
    }

    pub fn lookup_unaliased_type(&self, expr: &Expr, name: &str) -> Option<Unaliased<'ast>> {
        self.symbols.lookup_unaliased_type(expr, name)
    }
}

/// Maps a Tiger type-id to the Java type name a real backend would
/// emit. The only piece of actual "emission" logic this crate carries.
pub fn java_type_name(type_id: &str) -> String {
    match type_id {
        INT => "int".to_string(),
        STRING => "String".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_primitives_and_passes_through_user_types() {
        assert_eq!(java_type_name("int"), "int");
        assert_eq!(java_type_name("string"), "String");
        assert_eq!(java_type_name("Bulk"), "Bulk");
    }
}
