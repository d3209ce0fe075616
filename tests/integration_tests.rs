//! Integration tests for the semantic core.
//!
//! These tests drive the public API the way a front end would: source text
//! is tokenized, spans are evaluated against a scope, and assignments and
//! returns are validated into a shared diagnostics sink.

use std::rc::Rc;

use semcore::{
    config::Settings,
    constant::constant::ConstValue,
    errors::errors::Diagnostics,
    lexer::{
        lexer::tokenize,
        parts::parts,
        tokens::{Token, TokenKind},
    },
    type_checker::{
        assign::AssignChecker,
        eval::{Evaluate, ExprEvaluator, Scope},
        ret::RetChecker,
        value::TypedValue,
    },
    types::{
        compat::compatible,
        decls::{FuncDecl, GenericParam, Param, RetType, StructDecl},
        types::{ArraySize, TypeDescriptor},
    },
    Position,
};

fn ty(spelling: &str) -> TypeDescriptor {
    TypeDescriptor::from_spelling(spelling).unwrap()
}

fn tokens(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("main.jn".to_string())).unwrap()
}

#[test]
fn test_constant_declarations() {
    let settings = Settings::default();
    let mut scope = Scope::new();
    let mut diagnostics = Diagnostics::new();

    // const WIDTH: u16 = 640 / 2
    let value = ExprEvaluator::new(&scope, &settings).eval(&tokens("640 / 2"), &mut diagnostics);
    let target = ty("u16");
    AssignChecker::new(&target, &value, Position::null()).check(&mut diagnostics);
    scope.declare_const("WIDTH", target, value.constant.clone().unwrap());

    // const AREA: i64 = WIDTH * WIDTH
    let value =
        ExprEvaluator::new(&scope, &settings).eval(&tokens("WIDTH * WIDTH"), &mut diagnostics);
    assert_eq!(value.constant, Some(ConstValue::U64(102400)));
    assert_eq!(value.ty, ty("u32"));
    AssignChecker::new(&ty("i64"), &value, Position::null()).check(&mut diagnostics);

    // const SMALL: u8 = WIDTH
    let small = ExprEvaluator::new(&scope, &settings).eval(&tokens("WIDTH"), &mut diagnostics);
    AssignChecker::new(&ty("u8"), &small, Position::null()).check(&mut diagnostics);

    assert_eq!(diagnostics.keys(), vec!["overflow_limits"]);
}

#[test]
fn test_many_problems_in_one_pass() {
    let settings = Settings::default();
    let mut scope = Scope::new();
    scope.declare("name", ty("str"));
    scope.declare("ptr", ty("*i32"));
    let evaluator = ExprEvaluator::new(&scope, &settings);
    let mut diagnostics = Diagnostics::new();

    let statements = r#"name - "x"; 1 / 0; ptr * ptr; missing; 1 && 2; name + 1"#;
    let all = tokens(statements);
    for statement in parts(&all, TokenKind::Semicolon, true, &mut diagnostics) {
        evaluator.eval(statement, &mut diagnostics);
    }

    assert_eq!(
        diagnostics.keys(),
        vec![
            "operator_notfor_str",
            "divide_by_zero",
            "operator_notfor_pointer",
            "id_noexist",
            "logical_not_bool",
            "incompatible_datatype",
        ]
    );
    let errors = diagnostics.errors();
    assert_eq!(errors[3].args(), vec!["missing"]);
    assert_eq!(*errors[3].get_position().1, "main.jn");
    assert_eq!(errors[5].args(), vec!["i8", "str"]);
}

#[test]
fn test_function_body_returns() {
    let settings = Settings::default();
    let mut scope = Scope::new();
    scope.declare("count", ty("int"));
    scope.declare("err", ty("str"));

    let func = FuncDecl::new(
        "parse",
        vec![Param::new("text", ty("str"))],
        RetType::named(ty("(int,str)"), &["count", "err"]),
    );
    let evaluator = ExprEvaluator::new(&scope, &settings);
    let checker = RetChecker::new(&evaluator, &func, &settings);
    let ret = Token::synthetic(TokenKind::Return, "return");
    let mut diagnostics = Diagnostics::new();

    let explicit = checker.check(&ret, &tokens(r#"count + 1, "ok""#), &mut diagnostics);
    assert_eq!(explicit.len(), 2);
    assert_eq!(explicit[0].ty, ty("i64"));

    let implicit = checker.check(&ret, &tokens(""), &mut diagnostics);
    let names: Vec<&str> = implicit.iter().map(|value| value.text.as_str()).collect();
    assert_eq!(names, vec!["count", "err"]);

    checker.check(&ret, &tokens("count"), &mut diagnostics);
    checker.check(&ret, &tokens(r#"count, "a", "b""#), &mut diagnostics);
    assert_eq!(
        diagnostics.keys(),
        vec!["missing_multi_return", "overflow_return"]
    );
}

#[test]
fn test_call_through_scope() {
    let settings = Settings::default();
    let max = FuncDecl::new(
        "max",
        vec![Param::new("a", ty("f64")), Param::new("b", ty("f64"))],
        RetType::new(ty("f64")),
    );
    let mut scope = Scope::new();
    scope.declare_value(
        "max",
        TypedValue::lvalue(TypeDescriptor::function(Rc::new(max)), "max"),
    );
    let evaluator = ExprEvaluator::new(&scope, &settings);
    let mut diagnostics = Diagnostics::new();

    let value = evaluator.eval(&tokens("max(1.5, 2.5) * 2.0"), &mut diagnostics);
    assert!(diagnostics.is_empty());
    assert_eq!(value.ty, ty("f64"));
    assert!(value.constant.is_none());
    assert_eq!(value.text, "max(1.5, 2.5) * 2.0");

    evaluator.eval(&tokens("max(1.5)"), &mut diagnostics);
    let error = &diagnostics.errors()[0];
    assert_eq!(error.key(), "missing_argument");
    assert_eq!(error.args(), vec!["2", "1"]);
    assert_eq!(error.get_position().0, 3);
}

#[test]
fn test_deferred_array_and_generic_struct() {
    let settings = Settings::default();
    let mut scope = Scope::new();
    scope.declare_const("N", ty("i32"), ConstValue::I64(4));
    let evaluator = ExprEvaluator::new(&scope, &settings);
    let mut diagnostics = Diagnostics::new();

    let mut buffer = TypeDescriptor::array_of(ty("u8"), ArraySize::Deferred(tokens("N * 2")));
    buffer.resolve_size(&evaluator, &mut diagnostics);
    assert!(diagnostics.is_empty());
    assert!(compatible(&buffer, &ty("[8]u8"), false));
    assert!(!compatible(&buffer, &ty("[4]u8"), false));

    let mut decl = StructDecl::new("Box", "main.jn");
    decl.generics.push(GenericParam::new("T"));
    let template = TypeDescriptor::structure(Rc::new(decl), vec![TypeDescriptor::generic("T")]);
    let params = vec![GenericParam::new("T")];

    let boxed = template.instantiate(&params, &[buffer.clone()]);
    assert_eq!(boxed.spelling(), "Box[[8]u8]");
    assert!(boxed.is_fully_resolved());
    assert_eq!(boxed.restore_origin(), template);

    let other = template.instantiate(&params, &[ty("str")]);
    assert!(!compatible(&boxed, &other, false));
}

#[test]
fn test_settings_document() {
    let settings = Settings::load(br#"{"fold_constants": false, "ignore_identifier": "__"}"#)
        .unwrap();
    let scope = Scope::new();
    let evaluator = ExprEvaluator::new(&scope, &settings);
    let mut diagnostics = Diagnostics::new();

    let value = evaluator.eval(&tokens("1 + 2"), &mut diagnostics);
    assert!(value.constant.is_none());
    assert_eq!(value.ty, ty("i8"));

    let value = evaluator.eval(&tokens("1 / 0"), &mut diagnostics);
    assert!(value.constant.is_none());
    assert_eq!(diagnostics.keys(), vec!["divide_by_zero"]);

    assert!(Settings::load(br#"{"fold_constants": 1}"#).is_err());
}
