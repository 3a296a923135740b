//! Convenience constructors for AST nodes.
//!
//! The parser uses this to assign fresh [`NodeId`]s while turning pest
//! pairs into `ast::Expr` values; tests use it to hand-build trees
//! without going through source text at all.
use std::cell::Cell;

use super::node::{
    BinaryOp, Declaration, Expr, FieldAssignment, FunctionDeclaration, LValue, NodeId, Type,
    TypeDeclaration, TypeField, VariableDeclaration,
};

/// Monotonic id generator shared by one parse (or one hand-built test tree).
#[derive(Default)]
pub struct Builder {
    next_id: Cell<NodeId>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh(&self) -> NodeId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    pub fn string_constant(&self, value: impl Into<String>) -> Expr {
        Expr::StringConstant {
            id: self.fresh(),
            value: value.into(),
        }
    }

    pub fn integer_constant(&self, value: i64) -> Expr {
        Expr::IntegerConstant {
            id: self.fresh(),
            value,
        }
    }

    pub fn nil(&self) -> Expr {
        Expr::Nil { id: self.fresh() }
    }

    pub fn brk(&self) -> Expr {
        Expr::Break { id: self.fresh() }
    }

    pub fn identifier(&self, name: impl Into<String>) -> LValue {
        LValue::Identifier {
            id: self.fresh(),
            name: name.into(),
        }
    }

    pub fn record_field(&self, lvalue: LValue, field: impl Into<String>) -> LValue {
        LValue::RecordField {
            id: self.fresh(),
            lvalue: Box::new(lvalue),
            field: field.into(),
        }
    }

    pub fn array_element(&self, lvalue: LValue, index: Expr) -> LValue {
        LValue::ArrayElement {
            id: self.fresh(),
            lvalue: Box::new(lvalue),
            index: Box::new(index),
        }
    }

    pub fn lvalue_ref(&self, lvalue: LValue) -> Expr {
        Expr::LValueRef {
            id: self.fresh(),
            lvalue,
        }
    }

    pub fn negated(&self, expr: Expr) -> Expr {
        Expr::Negated {
            id: self.fresh(),
            expr: Box::new(expr),
        }
    }

    pub fn binary(&self, left: Expr, op: BinaryOp, right: Expr) -> Expr {
        Expr::Binary {
            id: self.fresh(),
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn assignment(&self, lvalue: LValue, expr: Expr) -> Expr {
        Expr::Assignment {
            id: self.fresh(),
            lvalue,
            expr: Box::new(expr),
        }
    }

    pub fn function_call(&self, name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::FunctionCall {
            id: self.fresh(),
            name: name.into(),
            args,
        }
    }

    pub fn parenthesized(&self, exprs: Vec<Expr>) -> Expr {
        Expr::Parenthesized {
            id: self.fresh(),
            exprs,
        }
    }

    pub fn field_assignment(&self, id: impl Into<String>, expr: Expr) -> FieldAssignment {
        FieldAssignment {
            id: id.into(),
            expr,
        }
    }

    pub fn record_literal(&self, type_id: impl Into<String>, fields: Vec<FieldAssignment>) -> Expr {
        Expr::RecordLiteral {
            id: self.fresh(),
            type_id: type_id.into(),
            fields,
        }
    }

    pub fn array_literal(&self, type_id: impl Into<String>, size: Expr, value: Expr) -> Expr {
        Expr::ArrayLiteral {
            id: self.fresh(),
            type_id: type_id.into(),
            size: Box::new(size),
            value: Box::new(value),
        }
    }

    pub fn if_then(&self, condition: Expr, then_branch: Expr) -> Expr {
        Expr::IfThen {
            id: self.fresh(),
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
        }
    }

    pub fn if_then_else(&self, condition: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
        Expr::IfThenElse {
            id: self.fresh(),
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn while_loop(&self, condition: Expr, body: Expr) -> Expr {
        Expr::While {
            id: self.fresh(),
            condition: Box::new(condition),
            body: Box::new(body),
        }
    }

    pub fn for_loop(&self, var: impl Into<String>, start: Expr, end: Expr, body: Expr) -> Expr {
        Expr::For {
            id: self.fresh(),
            var: var.into(),
            start: Box::new(start),
            end: Box::new(end),
            body: Box::new(body),
        }
    }

    pub fn let_expr(&self, declarations: Vec<Declaration>, body: Vec<Expr>) -> Expr {
        Expr::Let {
            id: self.fresh(),
            declarations,
            body,
        }
    }

    pub fn type_field(&self, id: impl Into<String>, type_id: impl Into<String>) -> TypeField {
        TypeField {
            id: id.into(),
            type_id: type_id.into(),
        }
    }

    pub fn type_declaration(&self, name: impl Into<String>, value: Type) -> Declaration {
        Declaration::Type(TypeDeclaration {
            id: self.fresh(),
            name: name.into(),
            value,
        })
    }

    pub fn variable_declaration(
        &self,
        name: impl Into<String>,
        type_id: Option<String>,
        expr: Expr,
    ) -> Declaration {
        Declaration::Variable(VariableDeclaration {
            id: self.fresh(),
            name: name.into(),
            type_id,
            expr,
        })
    }

    pub fn function_declaration(
        &self,
        name: impl Into<String>,
        params: Vec<TypeField>,
        type_id: Option<String>,
        body: Expr,
    ) -> Declaration {
        Declaration::Function(FunctionDeclaration {
            id: self.fresh(),
            name: name.into(),
            params,
            type_id,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_unique_and_increasing() {
        let b = Builder::new();
        let a = b.integer_constant(1);
        let c = b.integer_constant(2);
        assert!(a.id() < c.id());
    }
}
