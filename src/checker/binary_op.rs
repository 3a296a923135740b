use crate::ast::Expr;
use crate::diagnostics::Diagnostics;
use crate::symbols::SymbolTable;
use crate::types::{TypeFinder, INT, NOTYPE, STRING};

use super::Rule;

/// Checks operand types against each binary operator's requirements.
pub struct BinaryOpRule;

impl<'ast> Rule<'ast> for BinaryOpRule {
    fn check(
        &self,
        expr: &'ast Expr,
        _symbols: &dyn SymbolTable<'ast>,
        types: &TypeFinder<'_, 'ast>,
        diagnostics: &Diagnostics,
    ) {
        let Expr::Binary {
            left, op, right, ..
        } = expr
        else {
            return;
        };

        let left_type = types.type_of(left);
        let right_type = types.type_of(right);

        if op.is_logical() {
            if left_type != INT && left_type != NOTYPE {
                diagnostics.push(format!(
                    "Operand type for {op} must be int, but got {left_type}"
                ));
            }
            if right_type != INT && right_type != NOTYPE {
                diagnostics.push(format!(
                    "Operand type for {op} must be int, but got {right_type}"
                ));
            }
            return;
        }

        if op.is_ordering_comparison() {
            let left_primitive = left_type == INT || left_type == STRING;
            let right_primitive = right_type == INT || right_type == STRING;
            if !left_primitive && left_type != NOTYPE {
                diagnostics.push(format!(
                    "Operand type of {op} must be int or string, but got {left_type}"
                ));
            }
            if !right_primitive && right_type != NOTYPE {
                diagnostics.push(format!(
                    "Operand type of {op} must be int or string, but got {right_type}"
                ));
            }
            // Runs unconditionally alongside the primitiveness checks
            // above, not only when both operands are primitive: a
            // record compared against an int must report both its bad
            // operand type and the type mismatch.
            if left_type != NOTYPE && right_type != NOTYPE && left_type != right_type {
                diagnostics.push(format!(
                    "Types of {op} should match, but got {left_type} and {right_type}"
                ));
            }
        }
    }
}
