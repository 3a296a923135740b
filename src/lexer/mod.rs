//! Pest-generated parser for Tiger source text.
//!
//! A `#[derive(Parser)]` struct naming a grammar file living next to
//! it, producing a `pest::iterators::Pairs` that `parser::parse` turns
//! into `ast::Expr`.
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "lexer/tiger.pest"]
pub struct TigerParser;
