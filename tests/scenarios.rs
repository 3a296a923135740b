//! End-to-end scenarios and cross-cutting invariants for the Tiger
//! semantic core.
use std::cell::Cell;

use pretty_assertions::assert_eq;

use tiger_check::ast::{Builder, Expr, FunctionDeclaration, TypeDeclaration};
use tiger_check::diagnostics::Diagnostics;
use tiger_check::parser::parse;
use tiger_check::symbols::{ScopedSymbolTable, StorageLocation, SymbolTable, Unaliased};
use tiger_check::types::{TypeFinder, NOTYPE};

fn check_source(source: &str) -> Vec<String> {
    let root = parse(source).expect("scenario source parses");
    tiger_check::check(&root)
}

#[test]
fn scenario_1_matching_record_literal_has_no_diagnostics() {
    let diagnostics = check_source(
        "let type Bulk = {height:int, weight:int} in Bulk {height=6, weight=200} end",
    );
    assert_eq!(diagnostics, Vec::<String>::new());
}

#[test]
fn scenario_2_field_count_mismatch() {
    let diagnostics =
        check_source("let type Bulk = {height:int, weight:int} in Bulk {height=6} end");
    assert_eq!(
        diagnostics,
        vec!["Type Bulk has 2 fields and literal has 1".to_string()]
    );
}

#[test]
fn scenario_3_field_name_mismatch_both_positions_flagged() {
    let diagnostics = check_source(
        "let type Bulk = {height:int, weight:int} in Bulk {weight=200, height=6} end",
    );
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.starts_with("Different names")));
}

#[test]
fn scenario_4_field_type_mismatch() {
    let diagnostics = check_source(
        r#"let type Bulk = {height:int, weight:int} in Bulk {height="6 feet", weight=200} end"#,
    );
    assert_eq!(
        diagnostics,
        vec!["Different types string and int for field #1 of record Bulk".to_string()]
    );
}

#[test]
fn scenario_5_ordering_comparison_type_mismatch() {
    let diagnostics = check_source(r#"666 < "Hello""#);
    assert_eq!(
        diagnostics,
        vec!["Types of < should match, but got int and string".to_string()]
    );
}

#[test]
fn scenario_5b_non_primitive_ordering_comparison_reports_both_diagnostics() {
    let diagnostics = check_source(
        "let type Bulk = {height:int} in Bulk {height=6} < 3 end",
    );
    assert_eq!(
        diagnostics,
        vec![
            "Operand type of < must be int or string, but got Bulk".to_string(),
            "Types of < should match, but got Bulk and int".to_string(),
        ]
    );
}

#[test]
fn scenario_6_logical_operator_rejects_both_bad_operands() {
    let diagnostics = check_source(r#""foo" & "bar""#);
    assert_eq!(
        diagnostics,
        vec![
            "Operand type for & must be int, but got string".to_string(),
            "Operand type for & must be int, but got string".to_string(),
        ]
    );
}

#[test]
fn scenario_7_non_int_condition() {
    let diagnostics = check_source(r#"if "Hello" then 7 else 8"#);
    assert_eq!(
        diagnostics,
        vec!["Conditions must be int, but got string".to_string()]
    );
}

#[test]
fn scenario_8_nil_compared_against_non_record() {
    let diagnostics = check_source("let var i := 0 in i = nil end");
    assert_eq!(
        diagnostics,
        vec!["Type int is not a record type".to_string()]
    );
}

#[test]
fn type_of_is_deterministic_across_repeated_calls() {
    let root = parse("1 + 2").expect("valid Tiger source parses");
    let symbols = ScopedSymbolTable::build(&root);
    let types = TypeFinder::new(&symbols, Diagnostics::new());
    assert_eq!(types.type_of(&root), types.type_of(&root));
}

#[test]
fn running_the_checker_twice_is_idempotent() {
    let root = parse(
        "let type Bulk = {height:int, weight:int} in Bulk {height=6} end",
    )
    .expect("scenario source parses");
    let first = tiger_check::check(&root);
    let second = tiger_check::check(&root);
    assert_eq!(first, second);
}

#[test]
fn nil_at_an_rvalue_position_is_always_notype() {
    let b = Builder::new();
    let nil = b.nil();
    let symbols = ScopedSymbolTable::build(&nil);
    let types = TypeFinder::new(&symbols, Diagnostics::new());
    assert_eq!(types.type_of(&nil), NOTYPE);
}

#[test]
fn lookup_unaliased_type_terminates_on_a_cycle() {
    let b = Builder::new();
    let decl_a = b.type_declaration("a", tiger_check::ast::Type::TypeAlias("b".to_string()));
    let decl_b = b.type_declaration("b", tiger_check::ast::Type::TypeAlias("a".to_string()));
    let body = b.integer_constant(0);
    let root = b.let_expr(vec![decl_a, decl_b], vec![body]);

    let symbols = ScopedSymbolTable::build(&root);
    let Expr::Let { body, .. } = &root else {
        unreachable!("root is always the let_expr built above");
    };
    assert!(symbols
        .lookup_unaliased_type(&body[0], "a")
        .is_none());
}

#[test]
fn checking_does_not_mutate_the_ast() {
    let root = parse(r#""foo" & "bar""#).expect("scenario source parses");
    let before = root.clone();
    let _ = tiger_check::check(&root);
    assert_eq!(root, before);
}

/// Counts lookups against a wrapped table, observing the type finder's
/// memoization without touching its private cache.
struct CountingSymbolTable<'ast> {
    inner: ScopedSymbolTable<'ast>,
    lookups: Cell<usize>,
}

impl<'ast> CountingSymbolTable<'ast> {
    fn new(inner: ScopedSymbolTable<'ast>) -> Self {
        Self {
            inner,
            lookups: Cell::new(0),
        }
    }

    fn lookup_count(&self) -> usize {
        self.lookups.get()
    }
}

impl<'ast> SymbolTable<'ast> for CountingSymbolTable<'ast> {
    fn lookup_function(&self, expr: &Expr, name: &str) -> Option<&'ast FunctionDeclaration> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.lookup_function(expr, name)
    }

    fn lookup_storage(&self, expr: &Expr, name: &str) -> Option<StorageLocation<'ast>> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.lookup_storage(expr, name)
    }

    fn lookup_type(&self, expr: &Expr, name: &str) -> Option<&'ast TypeDeclaration> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.lookup_type(expr, name)
    }

    fn lookup_unaliased_type(&self, expr: &Expr, name: &str) -> Option<Unaliased<'ast>> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.lookup_unaliased_type(expr, name)
    }
}

#[test]
fn a_second_full_traversal_performs_no_new_lookups() {
    let root = parse(
        "let var i := 0 in if i then i else i end",
    )
    .expect("scenario source parses");

    let symbols = CountingSymbolTable::new(ScopedSymbolTable::build(&root));
    let diagnostics = Diagnostics::new();
    let types = TypeFinder::new(&symbols, diagnostics.clone());
    let checker = tiger_check::checker::Checker::new();

    checker.check(&root, &symbols, &types, &diagnostics);
    let after_first_run = symbols.lookup_count();

    checker.check(&root, &symbols, &types, &diagnostics);
    assert_eq!(symbols.lookup_count(), after_first_run);
}

#[test]
fn unknown_variable_reports_a_diagnostic_and_types_as_notype() {
    let diagnostics = check_source("missing + 1");
    assert!(diagnostics
        .iter()
        .any(|d| d == "Variable not found: missing"));
}

#[test]
fn unknown_record_type_is_reported() {
    let diagnostics = check_source("Ghost {x=1}");
    assert_eq!(
        diagnostics,
        vec!["Unknown record type Ghost".to_string()]
    );
}

#[test]
fn mutual_recursion_between_functions_resolves() {
    let diagnostics = check_source(
        "let function isEven(n: int): int = if n = 0 then 1 else isOdd(n - 1) \
         function isOdd(n: int): int = if n = 0 then 0 else isEven(n - 1) \
         in isEven(10) end",
    );
    assert_eq!(diagnostics, Vec::<String>::new());
}

#[test]
fn variable_cannot_see_itself_in_its_own_initializer() {
    let diagnostics = check_source("let var x := x + 1 in x end");
    assert!(diagnostics
        .iter()
        .any(|d| d == "Variable not found: x"));
}
