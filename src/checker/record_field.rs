use crate::ast::Expr;
use crate::diagnostics::Diagnostics;
use crate::symbols::{SymbolTable, Unaliased};
use crate::types::TypeFinder;

use super::Rule;

/// Validates every `RecordLiteral` against its declared record type.
pub struct RecordFieldRule;

impl<'ast> Rule<'ast> for RecordFieldRule {
    fn check(
        &self,
        expr: &'ast Expr,
        symbols: &dyn SymbolTable<'ast>,
        types: &TypeFinder<'_, 'ast>,
        diagnostics: &Diagnostics,
    ) {
        let Expr::RecordLiteral {
            type_id, fields, ..
        } = expr
        else {
            return;
        };

        if symbols.lookup_type(expr, type_id).is_none() {
            diagnostics.push(format!("Unknown record type {type_id}"));
            return;
        }

        let decl_fields = match symbols.lookup_unaliased_type(expr, type_id) {
            Some(Unaliased::Record(decl_fields)) => decl_fields,
            _ => {
                diagnostics.push(format!("Type {type_id} is not a record"));
                return;
            }
        };

        if fields.len() != decl_fields.len() {
            diagnostics.push(format!(
                "Type {type_id} has {} fields and literal has {}",
                decl_fields.len(),
                fields.len()
            ));
            return;
        }

        for (i, (value, decl_field)) in fields.iter().zip(decl_fields.iter()).enumerate() {
            if value.id != decl_field.id {
                diagnostics.push(format!(
                    "Different names {} and {} for field #{} of record {type_id}",
                    value.id,
                    decl_field.id,
                    i + 1
                ));
                continue;
            }
            let actual_type = types.type_of(&value.expr);
            if actual_type != decl_field.type_id {
                diagnostics.push(format!(
                    "Different types {actual_type} and {} for field #{} of record {type_id}",
                    decl_field.type_id,
                    i + 1
                ));
            }
        }
    }
}
