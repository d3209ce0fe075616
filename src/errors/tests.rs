//! Unit tests for diagnostic keys and the diagnostics sink.

use crate::errors::errors::{Diagnostics, Error, ErrorImpl};
use crate::Position;
use std::rc::Rc;

fn pos(n: u32) -> Position {
    Position(n, Rc::new("test.jn".to_string()))
}

#[test]
fn test_error_position() {
    let error = Error::new(ErrorImpl::OverflowLimits, pos(42));
    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.key(), "overflow_limits");
}

#[test]
fn test_operator_notfor_key_carries_category() {
    let error = Error::new(
        ErrorImpl::OperatorNotFor {
            operator: "*".to_string(),
            category: "pointer",
        },
        pos(0),
    );

    assert_eq!(error.key(), "operator_notfor_pointer");
    assert_eq!(error.args(), vec!["*".to_string()]);
}

#[test]
fn test_incompatible_datatype_args_order() {
    let error = Error::new(
        ErrorImpl::IncompatibleDatatype {
            left: "i32".to_string(),
            right: "str".to_string(),
        },
        pos(3),
    );

    assert_eq!(error.key(), "incompatible_datatype");
    assert_eq!(error.args(), vec!["str".to_string(), "i32".to_string()]);
}

#[test]
fn test_unit_keys_have_no_args() {
    for (kind, key) in [
        (ErrorImpl::DivideByZero, "divide_by_zero"),
        (ErrorImpl::LogicalNotBool, "logical_not_bool"),
        (ErrorImpl::BitshiftMustUnsigned, "bitshift_must_unsigned"),
        (ErrorImpl::MissingExpr, "missing_expr"),
        (ErrorImpl::OverflowReturn, "overflow_return"),
        (ErrorImpl::MissingMultiReturn, "missing_multi_return"),
        (ErrorImpl::RequireReturnValue, "require_return_value"),
        (ErrorImpl::VoidFunctionReturnValue, "void_function_return_value"),
    ] {
        let error = Error::new(kind, pos(0));
        assert_eq!(error.key(), key);
        assert!(error.args().is_empty());
    }
}

#[test]
fn test_diagnostics_accumulate() {
    let mut diagnostics = Diagnostics::new();
    assert!(diagnostics.is_empty());

    diagnostics.push(ErrorImpl::DivideByZero, pos(1));
    diagnostics.push(ErrorImpl::OverflowLimits, pos(2));
    diagnostics.push(ErrorImpl::DivideByZero, pos(5));

    assert_eq!(diagnostics.len(), 3);
    assert!(diagnostics.has("divide_by_zero"));
    assert!(!diagnostics.has("missing_expr"));
    assert_eq!(diagnostics.count("divide_by_zero"), 2);
    assert_eq!(
        diagnostics.keys(),
        vec!["divide_by_zero", "overflow_limits", "divide_by_zero"]
    );

    let errors = diagnostics.into_errors();
    assert_eq!(errors[2].get_position().0, 5);
}

#[test]
fn test_display_comes_from_impl() {
    let kind = ErrorImpl::MissingArgument {
        expected: 2,
        received: 1,
    };
    assert_eq!(kind.to_string(), "missing arguments: expected 2, received 1");
}
