use crate::ast::Expr;
use crate::diagnostics::Diagnostics;
use crate::symbols::SymbolTable;
use crate::types::{TypeFinder, INT, NOTYPE};

use super::Rule;

/// Requires an `int`-typed condition on `if`/`if-else`/`while`.
pub struct ConditionalRule;

impl<'ast> Rule<'ast> for ConditionalRule {
    fn check(
        &self,
        expr: &'ast Expr,
        _symbols: &dyn SymbolTable<'ast>,
        types: &TypeFinder<'_, 'ast>,
        diagnostics: &Diagnostics,
    ) {
        let condition = match expr {
            Expr::IfThen { condition, .. }
            | Expr::IfThenElse { condition, .. }
            | Expr::While { condition, .. } => condition,
            _ => return,
        };

        let condition_type = types.type_of(condition);
        if condition_type != INT && condition_type != NOTYPE {
            diagnostics.push(format!("Conditions must be int, but got {condition_type}"));
        }
    }
}
