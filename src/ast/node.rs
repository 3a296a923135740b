//! Node types for the three AST families plus `Type`.
//!
//! Each family is a closed Rust enum, one variant per shape, so a
//! visitor is just a pattern match rather than a double-dispatch
//! "Accept" method.

/// Stable identity for an AST node, assigned once at construction time.
/// Used instead of address comparisons so the symbol table and type
/// finder can key their maps on an owned value.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Divide,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,
    And,
    Or,
}

impl BinaryOp {
    /// Canonical display string, used verbatim in diagnostics and Java output.
    pub fn display(&self) -> &'static str {
        match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Times => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Equal => "=",
            BinaryOp::NotEqual => "<>",
            BinaryOp::LessThan => "<",
            BinaryOp::GreaterThan => ">",
            BinaryOp::LessOrEqual => "<=",
            BinaryOp::GreaterOrEqual => ">=",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
        }
    }

    /// Comparison operators that may apply to either `int` or `string`
    /// operands.
    pub fn is_ordering_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::LessThan
                | BinaryOp::GreaterThan
                | BinaryOp::LessOrEqual
                | BinaryOp::GreaterOrEqual
        )
    }

    /// Lazy logical operators, which require `int` operands.
    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

/// A syntactic form denoting a storage location.
#[derive(Debug, Clone, PartialEq)]
pub enum LValue {
    Identifier {
        id: NodeId,
        name: String,
    },
    RecordField {
        id: NodeId,
        lvalue: Box<LValue>,
        field: String,
    },
    ArrayElement {
        id: NodeId,
        lvalue: Box<LValue>,
        index: Box<Expr>,
    },
}

impl LValue {
    pub fn id(&self) -> NodeId {
        match self {
            LValue::Identifier { id, .. }
            | LValue::RecordField { id, .. }
            | LValue::ArrayElement { id, .. } => *id,
        }
    }
}

/// A Tiger expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    StringConstant {
        id: NodeId,
        value: String,
    },
    IntegerConstant {
        id: NodeId,
        value: i64,
    },
    Nil {
        id: NodeId,
    },
    Break {
        id: NodeId,
    },
    LValueRef {
        id: NodeId,
        lvalue: LValue,
    },
    Negated {
        id: NodeId,
        expr: Box<Expr>,
    },
    Binary {
        id: NodeId,
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Assignment {
        id: NodeId,
        lvalue: LValue,
        expr: Box<Expr>,
    },
    FunctionCall {
        id: NodeId,
        name: String,
        args: Vec<Expr>,
    },
    Parenthesized {
        id: NodeId,
        exprs: Vec<Expr>,
    },
    RecordLiteral {
        id: NodeId,
        type_id: String,
        fields: Vec<FieldAssignment>,
    },
    ArrayLiteral {
        id: NodeId,
        type_id: String,
        size: Box<Expr>,
        value: Box<Expr>,
    },
    IfThen {
        id: NodeId,
        condition: Box<Expr>,
        then_branch: Box<Expr>,
    },
    IfThenElse {
        id: NodeId,
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    While {
        id: NodeId,
        condition: Box<Expr>,
        body: Box<Expr>,
    },
    For {
        id: NodeId,
        var: String,
        start: Box<Expr>,
        end: Box<Expr>,
        body: Box<Expr>,
    },
    Let {
        id: NodeId,
        declarations: Vec<Declaration>,
        body: Vec<Expr>,
    },
}

impl Expr {
    pub fn id(&self) -> NodeId {
        match self {
            Expr::StringConstant { id, .. }
            | Expr::IntegerConstant { id, .. }
            | Expr::Nil { id }
            | Expr::Break { id }
            | Expr::LValueRef { id, .. }
            | Expr::Negated { id, .. }
            | Expr::Binary { id, .. }
            | Expr::Assignment { id, .. }
            | Expr::FunctionCall { id, .. }
            | Expr::Parenthesized { id, .. }
            | Expr::RecordLiteral { id, .. }
            | Expr::ArrayLiteral { id, .. }
            | Expr::IfThen { id, .. }
            | Expr::IfThenElse { id, .. }
            | Expr::While { id, .. }
            | Expr::For { id, .. }
            | Expr::Let { id, .. } => *id,
        }
    }
}

/// One `id = expr` pair inside a record literal.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAssignment {
    pub id: String,
    pub expr: Expr,
}

/// One `id: type_id` pair, used for both record fields and function
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeField {
    pub id: String,
    pub type_id: String,
}

/// A type shape named by a `TypeDeclaration`.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    TypeAlias(String),
    RecordType(Vec<TypeField>),
    ArrayType(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub id: NodeId,
    pub name: String,
    pub value: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub id: NodeId,
    pub name: String,
    pub type_id: Option<String>,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub id: NodeId,
    pub name: String,
    pub params: Vec<TypeField>,
    pub type_id: Option<String>,
    pub body: Expr,
}

/// One member of a `Let`'s declaration sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Type(TypeDeclaration),
    Variable(VariableDeclaration),
    Function(FunctionDeclaration),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Type(d) => &d.name,
            Declaration::Variable(d) => &d.name,
            Declaration::Function(d) => &d.name,
        }
    }
}
