//! Turns Tiger source text into an [`ast::Expr`](crate::ast::Expr),
//! using [`crate::lexer::TigerParser`] for the grammar and
//! [`crate::ast::Builder`] for node identity. The semantic core trusts
//! this collaborator to have already handled syntactic concerns.
mod error;

pub use error::ParseError;

use log::debug;
use pest::iterators::Pair;
use pest::Parser;

use crate::ast::{BinaryOp, Builder, Declaration, Expr, LValue, Type, TypeField};
use crate::lexer::{Rule, TigerParser};

pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let mut program_pairs =
        TigerParser::parse(Rule::program, source).map_err(|err| ParseError::new(err.to_string()))?;
    let program = program_pairs.next().expect("program rule matched");
    let expr_pair = program
        .into_inner()
        .find(|p| p.as_rule() == Rule::expr)
        .expect("program always contains an expr");

    let builder = Builder::new();
    let root = build_expr(&builder, expr_pair);
    debug!("parsed Tiger source into an AST");
    Ok(root)
}

fn build_expr(builder: &Builder, pair: Pair<Rule>) -> Expr {
    debug_assert_eq!(pair.as_rule(), Rule::expr);
    let assignment_pair = pair.into_inner().next().expect("expr wraps assignment_expr");
    build_assignment(builder, assignment_pair)
}

fn build_assignment(builder: &Builder, pair: Pair<Rule>) -> Expr {
    let mut inner: Vec<Pair<Rule>> = pair.into_inner().collect();
    if inner.len() == 2 {
        let or_pair = inner.pop().unwrap();
        let lvalue_pair = inner.pop().unwrap();
        let lvalue = build_lvalue(builder, lvalue_pair);
        let value = build_or(builder, or_pair);
        builder.assignment(lvalue, value)
    } else {
        build_or(builder, inner.pop().expect("assignment_expr has an or_expr"))
    }
}

fn build_left_assoc(
    builder: &Builder,
    pair: Pair<Rule>,
    build_operand: impl Fn(&Builder, Pair<Rule>) -> Expr,
    op_from_str: impl Fn(&str) -> BinaryOp,
) -> Expr {
    let mut inner = pair.into_inner();
    let first = inner.next().expect("at least one operand");
    let mut result = build_operand(builder, first);
    while let Some(op_pair) = inner.next() {
        let operand_pair = inner.next().expect("operand must follow operator");
        let op = op_from_str(op_pair.as_str());
        let rhs = build_operand(builder, operand_pair);
        result = builder.binary(result, op, rhs);
    }
    result
}

fn build_or(builder: &Builder, pair: Pair<Rule>) -> Expr {
    build_left_assoc(builder, pair, build_and, |s| match s {
        "|" => BinaryOp::Or,
        other => unreachable!("unexpected or-level operator: {other}"),
    })
}

fn build_and(builder: &Builder, pair: Pair<Rule>) -> Expr {
    build_left_assoc(builder, pair, build_compare, |s| match s {
        "&" => BinaryOp::And,
        other => unreachable!("unexpected and-level operator: {other}"),
    })
}

fn build_compare(builder: &Builder, pair: Pair<Rule>) -> Expr {
    build_left_assoc(builder, pair, build_additive, |s| match s {
        "<=" => BinaryOp::LessOrEqual,
        ">=" => BinaryOp::GreaterOrEqual,
        "<>" => BinaryOp::NotEqual,
        "=" => BinaryOp::Equal,
        "<" => BinaryOp::LessThan,
        ">" => BinaryOp::GreaterThan,
        other => unreachable!("unexpected comparison operator: {other}"),
    })
}

fn build_additive(builder: &Builder, pair: Pair<Rule>) -> Expr {
    build_left_assoc(builder, pair, build_multiplicative, |s| match s {
        "+" => BinaryOp::Plus,
        "-" => BinaryOp::Minus,
        other => unreachable!("unexpected additive operator: {other}"),
    })
}

fn build_multiplicative(builder: &Builder, pair: Pair<Rule>) -> Expr {
    build_left_assoc(builder, pair, build_unary, |s| match s {
        "*" => BinaryOp::Times,
        "/" => BinaryOp::Divide,
        other => unreachable!("unexpected multiplicative operator: {other}"),
    })
}

fn build_unary(builder: &Builder, pair: Pair<Rule>) -> Expr {
    let inner = pair.into_inner().next().expect("unary_expr has one child");
    match inner.as_rule() {
        Rule::unary_expr => builder.negated(build_unary(builder, inner)),
        Rule::primary_expr => build_primary(builder, inner),
        other => unreachable!("unexpected child of unary_expr: {other:?}"),
    }
}

fn build_primary(builder: &Builder, pair: Pair<Rule>) -> Expr {
    let inner = pair.into_inner().next().expect("primary_expr has one child");
    match inner.as_rule() {
        Rule::nil_lit => builder.nil(),
        Rule::break_lit => builder.brk(),
        Rule::int_lit => builder.integer_constant(
            inner
                .as_str()
                .parse()
                .expect("the grammar only admits ASCII digits here"),
        ),
        Rule::string_lit => builder.string_constant(string_literal_value(inner.as_str())),
        Rule::if_then_else => build_if_then_else(builder, inner),
        Rule::if_then => build_if_then(builder, inner),
        Rule::while_loop => build_while(builder, inner),
        Rule::for_loop => build_for(builder, inner),
        Rule::let_expr => build_let(builder, inner),
        Rule::paren_seq => build_paren_seq(builder, inner),
        Rule::record_literal => build_record_literal(builder, inner),
        Rule::array_literal => build_array_literal(builder, inner),
        Rule::function_call => build_function_call(builder, inner),
        Rule::lvalue => builder.lvalue_ref(build_lvalue(builder, inner)),
        other => unreachable!("unexpected primary expression: {other:?}"),
    }
}

fn string_literal_value(raw: &str) -> String {
    let without_quotes = &raw[1..raw.len() - 1];
    unescape::unescape(without_quotes).unwrap_or_else(|| without_quotes.to_string())
}

fn build_lvalue(builder: &Builder, pair: Pair<Rule>) -> LValue {
    let mut inner = pair.into_inner();
    let name = inner.next().expect("lvalue starts with an identifier").as_str();
    let mut result = builder.identifier(name);
    for suffix in inner {
        match suffix.as_rule() {
            Rule::field_suffix => {
                let field = suffix
                    .into_inner()
                    .next()
                    .expect("field suffix names a field")
                    .as_str();
                result = builder.record_field(result, field);
            }
            Rule::index_suffix => {
                let index_pair = suffix
                    .into_inner()
                    .next()
                    .expect("index suffix has an expression");
                let index = build_expr(builder, index_pair);
                result = builder.array_element(result, index);
            }
            other => unreachable!("unexpected lvalue suffix: {other:?}"),
        }
    }
    result
}

fn build_record_literal(builder: &Builder, pair: Pair<Rule>) -> Expr {
    let mut inner = pair.into_inner();
    let type_id = inner.next().expect("record literal names a type").as_str();
    let list_pair = inner.next().expect("record literal has a field list");
    let fields = list_pair
        .into_inner()
        .map(|field_pair| {
            let mut field_inner = field_pair.into_inner();
            let id = field_inner
                .next()
                .expect("field assignment names a field")
                .as_str();
            let expr_pair = field_inner.next().expect("field assignment has a value");
            let expr = build_expr(builder, expr_pair);
            builder.field_assignment(id, expr)
        })
        .collect();
    builder.record_literal(type_id, fields)
}

fn build_array_literal(builder: &Builder, pair: Pair<Rule>) -> Expr {
    let mut inner = pair.into_inner();
    let type_id = inner.next().expect("array literal names a type").as_str();
    let size = build_expr(builder, inner.next().expect("array literal has a size"));
    let value = build_expr(builder, inner.next().expect("array literal has a value"));
    builder.array_literal(type_id, size, value)
}

fn build_function_call(builder: &Builder, pair: Pair<Rule>) -> Expr {
    let mut inner = pair.into_inner();
    let name = inner.next().expect("function call names a function").as_str();
    let args_pair = inner.next().expect("function call has an argument list");
    let args = args_pair
        .into_inner()
        .map(|p| build_expr(builder, p))
        .collect();
    builder.function_call(name, args)
}

fn build_paren_seq(builder: &Builder, pair: Pair<Rule>) -> Expr {
    let seq_pair = pair.into_inner().next().expect("paren_seq wraps an expr_seq");
    let exprs = seq_pair
        .into_inner()
        .map(|p| build_expr(builder, p))
        .collect();
    builder.parenthesized(exprs)
}

fn build_if_then_else(builder: &Builder, pair: Pair<Rule>) -> Expr {
    let mut inner = pair.into_inner();
    let condition = build_expr(builder, inner.next().expect("if-then-else has a condition"));
    let then_branch = build_expr(builder, inner.next().expect("if-then-else has a then branch"));
    let else_branch = build_expr(builder, inner.next().expect("if-then-else has an else branch"));
    builder.if_then_else(condition, then_branch, else_branch)
}

fn build_if_then(builder: &Builder, pair: Pair<Rule>) -> Expr {
    let mut inner = pair.into_inner();
    let condition = build_expr(builder, inner.next().expect("if-then has a condition"));
    let then_branch = build_expr(builder, inner.next().expect("if-then has a then branch"));
    builder.if_then(condition, then_branch)
}

fn build_while(builder: &Builder, pair: Pair<Rule>) -> Expr {
    let mut inner = pair.into_inner();
    let condition = build_expr(builder, inner.next().expect("while loop has a condition"));
    let body = build_expr(builder, inner.next().expect("while loop has a body"));
    builder.while_loop(condition, body)
}

fn build_for(builder: &Builder, pair: Pair<Rule>) -> Expr {
    let mut inner = pair.into_inner();
    let var = inner.next().expect("for loop names its variable").as_str();
    let start = build_expr(builder, inner.next().expect("for loop has a start bound"));
    let end = build_expr(builder, inner.next().expect("for loop has an end bound"));
    let body = build_expr(builder, inner.next().expect("for loop has a body"));
    builder.for_loop(var, start, end, body)
}

fn build_let(builder: &Builder, pair: Pair<Rule>) -> Expr {
    let mut all: Vec<Pair<Rule>> = pair.into_inner().collect();
    let body_pair = all.pop().expect("let expr has a body sequence");
    let declarations = all
        .into_iter()
        .map(|p| build_declaration(builder, p))
        .collect();
    let body = body_pair
        .into_inner()
        .map(|p| build_expr(builder, p))
        .collect();
    builder.let_expr(declarations, body)
}

fn build_declaration(builder: &Builder, pair: Pair<Rule>) -> Declaration {
    let inner = pair.into_inner().next().expect("declaration has one alternative");
    match inner.as_rule() {
        Rule::type_decl => build_type_decl(builder, inner),
        Rule::fn_decl => build_fn_decl(builder, inner),
        Rule::var_decl => build_var_decl(builder, inner),
        other => unreachable!("unexpected declaration: {other:?}"),
    }
}

fn build_type_decl(builder: &Builder, pair: Pair<Rule>) -> Declaration {
    let mut inner = pair.into_inner();
    let name = inner.next().expect("type decl names a type").as_str();
    let value = build_type_value(inner.next().expect("type decl has a value"));
    builder.type_declaration(name, value)
}

fn build_type_value(pair: Pair<Rule>) -> Type {
    let inner = pair.into_inner().next().expect("type_value has one alternative");
    match inner.as_rule() {
        Rule::record_type => {
            let fields = build_type_field_list(
                inner
                    .into_inner()
                    .next()
                    .expect("record type has a field list"),
            );
            Type::RecordType(fields)
        }
        Rule::array_type => {
            let elem = inner
                .into_inner()
                .next()
                .expect("array type names an element type")
                .as_str();
            Type::ArrayType(elem.to_owned())
        }
        Rule::ident => Type::TypeAlias(inner.as_str().to_owned()),
        other => unreachable!("unexpected type value: {other:?}"),
    }
}

fn build_type_field_list(pair: Pair<Rule>) -> Vec<TypeField> {
    pair.into_inner()
        .map(|field_pair| {
            let mut inner = field_pair.into_inner();
            let id = inner
                .next()
                .expect("type field names itself")
                .as_str()
                .to_owned();
            let type_id = inner
                .next()
                .expect("type field names its type")
                .as_str()
                .to_owned();
            TypeField { id, type_id }
        })
        .collect()
}

fn build_var_decl(builder: &Builder, pair: Pair<Rule>) -> Declaration {
    let mut all: Vec<Pair<Rule>> = pair.into_inner().collect();
    let expr_pair = all.pop().expect("var decl has an initializer");
    let name = all.remove(0).as_str();
    let type_id = all.pop().map(|p| p.as_str().to_owned());
    let expr = build_expr(builder, expr_pair);
    builder.variable_declaration(name, type_id, expr)
}

fn build_fn_decl(builder: &Builder, pair: Pair<Rule>) -> Declaration {
    let mut all: Vec<Pair<Rule>> = pair.into_inner().collect();
    let body_pair = all.pop().expect("function decl has a body");
    let name = all.remove(0).as_str();
    let params_pair = all.remove(0);
    let return_type = all.pop().map(|p| p.as_str().to_owned());
    let params = build_type_field_list(params_pair);
    let body = build_expr(builder, body_pair);
    builder.function_declaration(name, params, return_type, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_record_literal() {
        let root = parse(
            "let type Bulk = {height:int, weight:int} in Bulk {height=6, weight=200} end",
        )
        .expect("valid Tiger source parses");
        assert!(matches!(root, Expr::Let { .. }));
    }

    #[test]
    fn parses_arithmetic_with_expected_precedence() {
        let root = parse("1 + 2 * 3").expect("valid Tiger source parses");
        let Expr::Binary { op, left, .. } = root else {
            panic!("expected a top-level binary expression");
        };
        assert_eq!(op, BinaryOp::Plus);
        assert!(matches!(*left, Expr::IntegerConstant { value: 1, .. }));
    }

    #[test]
    fn rejects_malformed_source() {
        assert!(parse("let type = in end").is_err());
    }
}
