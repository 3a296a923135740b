//! Concrete symbol table, built once from an AST root.
use std::collections::{HashMap, HashSet};

use crate::ast::{Declaration, Expr, FunctionDeclaration, LValue, Type, TypeDeclaration, TypeField, VariableDeclaration};
use crate::types::{INT, STRING};

use super::scope::{Scope, ScopeId};
use super::SymbolTable;

/// The two things a bare identifier l-value can resolve to.
#[derive(Debug, Clone, Copy)]
pub enum StorageLocation<'ast> {
    Variable(&'ast VariableDeclaration),
    Parameter(&'ast TypeField),
}

/// Result of following a chain of `TypeAlias` declarations to their
/// structural or primitive end.
#[derive(Debug, Clone, Copy)]
pub enum Unaliased<'ast> {
    Record(&'ast [TypeField]),
    Array(&'ast str),
    Primitive(&'static str),
}

/// Scope-chain symbol table over one AST, built in a single pre-pass
/// and read-only afterwards.
pub struct ScopedSymbolTable<'ast> {
    scopes: Vec<Scope<'ast>>,
    scope_of: HashMap<crate::ast::NodeId, ScopeId>,
}

impl<'ast> ScopedSymbolTable<'ast> {
    pub fn build(root: &'ast Expr) -> Self {
        let mut builder = TableBuilder {
            scopes: vec![Scope::default()],
            scope_of: HashMap::new(),
        };
        builder.visit_expr(root, 0);
        Self {
            scopes: builder.scopes,
            scope_of: builder.scope_of,
        }
    }

    fn scope_of(&self, expr: &Expr) -> Option<ScopeId> {
        self.scope_of.get(&expr.id()).copied()
    }
}

impl<'ast> SymbolTable<'ast> for ScopedSymbolTable<'ast> {
    fn lookup_function(&self, expr: &Expr, name: &str) -> Option<&'ast FunctionDeclaration> {
        let mut scope = self.scope_of(expr)?;
        loop {
            if let Some(found) = self.scopes[scope].functions.get(name) {
                return Some(found);
            }
            scope = self.scopes[scope].parent?;
        }
    }

    fn lookup_storage(&self, expr: &Expr, name: &str) -> Option<StorageLocation<'ast>> {
        let mut scope = self.scope_of(expr)?;
        loop {
            if let Some(found) = self.scopes[scope].storage.get(name) {
                return Some(*found);
            }
            scope = self.scopes[scope].parent?;
        }
    }

    fn lookup_type(&self, expr: &Expr, name: &str) -> Option<&'ast TypeDeclaration> {
        let mut scope = self.scope_of(expr)?;
        loop {
            if let Some(found) = self.scopes[scope].types.get(name) {
                return Some(found);
            }
            scope = self.scopes[scope].parent?;
        }
    }

    fn lookup_unaliased_type(&self, expr: &Expr, name: &str) -> Option<Unaliased<'ast>> {
        let mut current = name.to_owned();
        let mut visited = HashSet::new();
        loop {
            if current == INT {
                return Some(Unaliased::Primitive(INT));
            }
            if current == STRING {
                return Some(Unaliased::Primitive(STRING));
            }
            if !visited.insert(current.clone()) {
                return None;
            }
            let decl = self.lookup_type(expr, &current)?;
            match &decl.value {
                Type::TypeAlias(alias) => current = alias.clone(),
                Type::RecordType(fields) => return Some(Unaliased::Record(fields)),
                Type::ArrayType(elem) => return Some(Unaliased::Array(elem)),
            }
        }
    }
}

/// One-shot visitor that assigns every expression to its innermost
/// enclosing scope and populates scopes as it pushes/pops them.
struct TableBuilder<'ast> {
    scopes: Vec<Scope<'ast>>,
    scope_of: HashMap<crate::ast::NodeId, ScopeId>,
}

impl<'ast> TableBuilder<'ast> {
    fn visit_expr(&mut self, expr: &'ast Expr, current: ScopeId) {
        self.scope_of.insert(expr.id(), current);
        match expr {
            Expr::StringConstant { .. }
            | Expr::IntegerConstant { .. }
            | Expr::Nil { .. }
            | Expr::Break { .. } => {}
            Expr::LValueRef { lvalue, .. } => self.visit_lvalue(lvalue, current),
            Expr::Negated { expr, .. } => self.visit_expr(expr, current),
            Expr::Binary { left, right, .. } => {
                self.visit_expr(left, current);
                self.visit_expr(right, current);
            }
            Expr::Assignment { lvalue, expr, .. } => {
                self.visit_lvalue(lvalue, current);
                self.visit_expr(expr, current);
            }
            Expr::FunctionCall { args, .. } => {
                for arg in args {
                    self.visit_expr(arg, current);
                }
            }
            Expr::Parenthesized { exprs, .. } => {
                for e in exprs {
                    self.visit_expr(e, current);
                }
            }
            Expr::RecordLiteral { fields, .. } => {
                for field in fields {
                    self.visit_expr(&field.expr, current);
                }
            }
            Expr::ArrayLiteral { size, value, .. } => {
                self.visit_expr(size, current);
                self.visit_expr(value, current);
            }
            Expr::IfThen {
                condition,
                then_branch,
                ..
            } => {
                self.visit_expr(condition, current);
                self.visit_expr(then_branch, current);
            }
            Expr::IfThenElse {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.visit_expr(condition, current);
                self.visit_expr(then_branch, current);
                self.visit_expr(else_branch, current);
            }
            Expr::While { condition, body, .. } => {
                self.visit_expr(condition, current);
                self.visit_expr(body, current);
            }
            Expr::For { start, end, body, .. } => {
                // Nothing else creates a scope: the loop variable is
                // deliberately left unbound here.
                self.visit_expr(start, current);
                self.visit_expr(end, current);
                self.visit_expr(body, current);
            }
            Expr::Let {
                declarations, body, ..
            } => self.visit_let(declarations, body, current),
        }
    }

    fn visit_lvalue(&mut self, lvalue: &'ast LValue, current: ScopeId) {
        match lvalue {
            LValue::Identifier { .. } => {}
            LValue::RecordField { lvalue, .. } => self.visit_lvalue(lvalue, current),
            LValue::ArrayElement { lvalue, index, .. } => {
                self.visit_lvalue(lvalue, current);
                self.visit_expr(index, current);
            }
        }
    }

    /// Populates a `Let`'s scope in two passes: types and functions are
    /// pre-bound into the `Let`'s own scope so mutual recursion among
    /// them works. Variables are bound one at a time: each one gets its
    /// own child scope, created only *after* its initializing
    /// expression has been visited against the chain built from the
    /// declarations before it. Binding a variable directly into the
    /// shared `let_scope` map would make it visible to lookups
    /// performed later during checking regardless of build order —
    /// since lookups run only after the whole table is built, insertion
    /// order alone cannot block self-reference; a fresh scope per
    /// variable is what actually does.
    fn visit_let(&mut self, declarations: &'ast [Declaration], body: &'ast [Expr], current: ScopeId) {
        self.scopes.push(Scope::with_parent(current));
        let let_scope = self.scopes.len() - 1;

        for decl in declarations {
            match decl {
                Declaration::Type(type_decl) => {
                    self.scopes[let_scope]
                        .types
                        .insert(type_decl.name.clone(), type_decl);
                }
                Declaration::Function(fn_decl) => {
                    self.scopes[let_scope]
                        .functions
                        .insert(fn_decl.name.clone(), fn_decl);
                }
                Declaration::Variable(_) => {}
            }
        }

        let mut current_scope = let_scope;
        for decl in declarations {
            match decl {
                Declaration::Type(_) => {}
                Declaration::Function(fn_decl) => {
                    self.scopes.push(Scope::with_parent(current_scope));
                    let fn_scope = self.scopes.len() - 1;
                    for param in &fn_decl.params {
                        self.scopes[fn_scope]
                            .storage
                            .insert(param.id.clone(), StorageLocation::Parameter(param));
                    }
                    self.visit_expr(&fn_decl.body, fn_scope);
                }
                Declaration::Variable(var_decl) => {
                    self.visit_expr(&var_decl.expr, current_scope);
                    self.scopes.push(Scope::with_parent(current_scope));
                    let var_scope = self.scopes.len() - 1;
                    self.scopes[var_scope]
                        .storage
                        .insert(var_decl.name.clone(), StorageLocation::Variable(var_decl));
                    current_scope = var_scope;
                }
            }
        }

        for e in body {
            self.visit_expr(e, current_scope);
        }
    }
}
