use crate::ast::Expr;
use crate::diagnostics::Diagnostics;
use crate::symbols::{SymbolTable, Unaliased};
use crate::types::{TypeFinder, NOTYPE};

use super::Rule;

/// `Nil` is legal only where the other side demands a known record
/// type.
pub struct NilContextRule;

impl<'ast> Rule<'ast> for NilContextRule {
    fn check(
        &self,
        expr: &'ast Expr,
        symbols: &dyn SymbolTable<'ast>,
        types: &TypeFinder<'_, 'ast>,
        diagnostics: &Diagnostics,
    ) {
        match expr {
            Expr::Binary { left, right, .. } => {
                let other = if matches!(left.as_ref(), Expr::Nil { .. }) {
                    Some(right.as_ref())
                } else if matches!(right.as_ref(), Expr::Nil { .. }) {
                    Some(left.as_ref())
                } else {
                    None
                };
                if let Some(other) = other {
                    require_record_type(types.type_of(other), expr, symbols, diagnostics);
                }
            }
            Expr::Assignment {
                lvalue, expr: value, ..
            } if matches!(value.as_ref(), Expr::Nil { .. }) => {
                let lvalue_type = types.lvalue_type(expr, lvalue);
                require_record_type(lvalue_type, expr, symbols, diagnostics);
            }
            _ => {}
        }
    }
}

fn require_record_type<'ast>(
    type_id: String,
    site: &'ast Expr,
    symbols: &dyn SymbolTable<'ast>,
    diagnostics: &Diagnostics,
) {
    if type_id == NOTYPE {
        return;
    }
    if !matches!(
        symbols.lookup_unaliased_type(site, &type_id),
        Some(Unaliased::Record(_))
    ) {
        diagnostics.push(format!("Type {type_id} is not a record type"));
    }
}
