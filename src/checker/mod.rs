//! Rule-driven semantic checker.
//!
//! Each rule gets its own full pre-order traversal, run in
//! registration order, rather than one traversal applying every rule
//! per node.
mod binary_op;
mod conditional;
mod nil_context;
mod record_field;

pub use binary_op::BinaryOpRule;
pub use conditional::ConditionalRule;
pub use nil_context::NilContextRule;
pub use record_field::RecordFieldRule;

use crate::ast::{Declaration, Expr, LValue};
use crate::diagnostics::Diagnostics;
use crate::symbols::SymbolTable;
use crate::types::TypeFinder;

/// A stateless, single-operation check applied to one node at a time.
/// Implementations must not mutate the AST or the symbol table.
pub trait Rule<'ast> {
    fn check(
        &self,
        expr: &'ast Expr,
        symbols: &dyn SymbolTable<'ast>,
        types: &TypeFinder<'_, 'ast>,
        diagnostics: &Diagnostics,
    );
}

/// Owns the built-in rule set and drives one traversal per rule.
pub struct Checker<'ast> {
    rules: Vec<Box<dyn Rule<'ast>>>,
}

impl<'ast> Checker<'ast> {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(RecordFieldRule),
                Box::new(BinaryOpRule),
                Box::new(ConditionalRule),
                Box::new(NilContextRule),
            ],
        }
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule<'ast>>>) -> Self {
        Self { rules }
    }

    pub fn check(
        &self,
        root: &'ast Expr,
        symbols: &dyn SymbolTable<'ast>,
        types: &TypeFinder<'_, 'ast>,
        diagnostics: &Diagnostics,
    ) {
        for rule in &self.rules {
            visit(root, rule.as_ref(), symbols, types, diagnostics);
        }
    }
}

impl<'ast> Default for Checker<'ast> {
    fn default() -> Self {
        Self::new()
    }
}

fn visit<'ast>(
    expr: &'ast Expr,
    rule: &dyn Rule<'ast>,
    symbols: &dyn SymbolTable<'ast>,
    types: &TypeFinder<'_, 'ast>,
    diagnostics: &Diagnostics,
) {
    rule.check(expr, symbols, types, diagnostics);
    for child in children(expr) {
        visit(child, rule, symbols, types, diagnostics);
    }
}

fn children(expr: &Expr) -> Vec<&Expr> {
    match expr {
        Expr::StringConstant { .. }
        | Expr::IntegerConstant { .. }
        | Expr::Nil { .. }
        | Expr::Break { .. } => vec![],
        Expr::LValueRef { lvalue, .. } => lvalue_children(lvalue),
        Expr::Negated { expr, .. } => vec![expr],
        Expr::Binary { left, right, .. } => vec![left, right],
        Expr::Assignment { lvalue, expr, .. } => {
            let mut c = lvalue_children(lvalue);
            c.push(expr);
            c
        }
        Expr::FunctionCall { args, .. } => args.iter().collect(),
        Expr::Parenthesized { exprs, .. } => exprs.iter().collect(),
        Expr::RecordLiteral { fields, .. } => fields.iter().map(|f| &f.expr).collect(),
        Expr::ArrayLiteral { size, value, .. } => vec![size, value],
        Expr::IfThen {
            condition,
            then_branch,
            ..
        } => vec![condition, then_branch],
        Expr::IfThenElse {
            condition,
            then_branch,
            else_branch,
            ..
        } => vec![condition, then_branch, else_branch],
        Expr::While { condition, body, .. } => vec![condition, body],
        Expr::For { start, end, body, .. } => vec![start, end, body],
        Expr::Let {
            declarations, body, ..
        } => {
            let mut c: Vec<&Expr> = declarations
                .iter()
                .filter_map(|decl| match decl {
                    Declaration::Type(_) => None,
                    Declaration::Variable(v) => Some(&v.expr),
                    Declaration::Function(f) => Some(&f.body),
                })
                .collect();
            c.extend(body.iter());
            c
        }
    }
}

fn lvalue_children(lvalue: &LValue) -> Vec<&Expr> {
    match lvalue {
        LValue::Identifier { .. } => vec![],
        LValue::RecordField { lvalue, .. } => lvalue_children(lvalue),
        LValue::ArrayElement { lvalue, index, .. } => {
            let mut c = lvalue_children(lvalue);
            c.push(index);
            c
        }
    }
}
