//! Type inference over expressions and l-values.
//!
//! Caches results in an interior-mutable `RefCell`-backed map owned by
//! one pass instance.
use std::cell::RefCell;
use std::collections::HashMap;

use crate::ast::{Expr, LValue, NodeId};
use crate::diagnostics::Diagnostics;
use crate::symbols::{StorageLocation, SymbolTable, Unaliased};

/// Reserved type-id for Tiger's built-in integer type.
pub const INT: &str = "int";

/// Reserved type-id for Tiger's built-in string type.
pub const STRING: &str = "string";

/// Sentinel meaning "value-less or impossible to infer". Never equal to
/// any real type-id.
pub const NOTYPE: &str = "NOTYPE";

/// Assigns a type-id to any expression or l-value, memoizing by node
/// identity. Constructed once per check run; the cache dies with it.
pub struct TypeFinder<'sym, 'ast> {
    symbols: &'sym dyn SymbolTable<'ast>,
    diagnostics: Diagnostics,
    cache: RefCell<HashMap<NodeId, String>>,
}

impl<'sym, 'ast> TypeFinder<'sym, 'ast> {
    pub fn new(symbols: &'sym dyn SymbolTable<'ast>, diagnostics: Diagnostics) -> Self {
        Self {
            symbols,
            diagnostics,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn type_of(&self, expr: &'ast Expr) -> String {
        if let Some(cached) = self.cache.borrow().get(&expr.id()) {
            return cached.clone();
        }
        let result = self.compute_expr_type(expr);
        self.cache.borrow_mut().insert(expr.id(), result.clone());
        result
    }

    pub fn lvalue_type(&self, parent: &'ast Expr, lvalue: &'ast LValue) -> String {
        if let Some(cached) = self.cache.borrow().get(&lvalue.id()) {
            return cached.clone();
        }
        let result = self.compute_lvalue_type(parent, lvalue);
        self.cache.borrow_mut().insert(lvalue.id(), result.clone());
        result
    }

    fn compute_expr_type(&self, expr: &'ast Expr) -> String {
        match expr {
            Expr::StringConstant { .. } => STRING.to_string(),
            Expr::IntegerConstant { .. } | Expr::Negated { .. } => INT.to_string(),
            Expr::Nil { .. }
            | Expr::Assignment { .. }
            | Expr::IfThen { .. }
            | Expr::While { .. }
            | Expr::For { .. }
            | Expr::Break { .. } => NOTYPE.to_string(),
            Expr::RecordLiteral { type_id, .. } | Expr::ArrayLiteral { type_id, .. } => {
                type_id.clone()
            }
            // The type of a binary expression is the type of its left
            // operand, not a computed result type; mismatches between
            // operand types are caught separately by the binary-op rule.
            Expr::Binary { left, .. } => self.type_of(left),
            Expr::IfThenElse { then_branch, .. } => self.type_of(then_branch),
            Expr::Parenthesized { exprs, .. } => match exprs.last() {
                Some(last) => self.type_of(last),
                None => NOTYPE.to_string(),
            },
            Expr::Let { body, .. } => match body.last() {
                Some(last) => self.type_of(last),
                None => NOTYPE.to_string(),
            },
            Expr::FunctionCall { name, .. } => self.function_call_type(expr, name),
            Expr::LValueRef { lvalue, .. } => self.lvalue_type(expr, lvalue),
        }
    }

    fn function_call_type(&self, site: &'ast Expr, name: &str) -> String {
        match self.symbols.lookup_function(site, name) {
            Some(decl) => match &decl.type_id {
                Some(declared) => declared.clone(),
                None => self.type_of(&decl.body),
            },
            None => {
                self.diagnostics.push(format!("Function not found: {name}"));
                NOTYPE.to_string()
            }
        }
    }

    fn compute_lvalue_type(&self, parent: &'ast Expr, lvalue: &'ast LValue) -> String {
        match lvalue {
            LValue::Identifier { name, .. } => match self.symbols.lookup_storage(parent, name) {
                Some(StorageLocation::Variable(var_decl)) => match &var_decl.type_id {
                    Some(declared) => declared.clone(),
                    None => self.type_of(&var_decl.expr),
                },
                Some(StorageLocation::Parameter(param)) => param.type_id.clone(),
                None => {
                    self.diagnostics.push(format!("Variable not found: {name}"));
                    NOTYPE.to_string()
                }
            },
            LValue::RecordField {
                lvalue: inner,
                field,
                ..
            } => {
                let record_type = self.lvalue_type(parent, inner);
                match self.symbols.lookup_unaliased_type(parent, &record_type) {
                    Some(Unaliased::Record(fields)) => {
                        match fields.iter().find(|f| f.id == *field) {
                            Some(f) => f.type_id.clone(),
                            None => {
                                self.diagnostics.push(format!(
                                    "Unknown field {field} of record {record_type}"
                                ));
                                NOTYPE.to_string()
                            }
                        }
                    }
                    _ => {
                        self.diagnostics
                            .push(format!("Type {record_type} is not a record"));
                        NOTYPE.to_string()
                    }
                }
            }
            LValue::ArrayElement { lvalue: inner, .. } => {
                let array_type = self.lvalue_type(parent, inner);
                match self.symbols.lookup_unaliased_type(parent, &array_type) {
                    Some(Unaliased::Array(elem)) => elem.to_string(),
                    _ => {
                        self.diagnostics
                            .push(format!("Type {array_type} is not an array"));
                        NOTYPE.to_string()
                    }
                }
            }
        }
    }
}
