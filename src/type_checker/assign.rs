use crate::{
    constant::constant::{check_float_bits, scientific, ConstValue},
    errors::errors::{Diagnostics, ErrorImpl},
    types::{compat::compatible, numeric::NumericKind, types::TypeDescriptor},
    Position,
};

use super::value::TypedValue;

/// Checks that a value may be stored into a target type.
pub struct AssignChecker<'a> {
    pub target: &'a TypeDescriptor,
    pub value: &'a TypedValue,
    pub ignore_any: bool,
    pub position: Position,
    /// Set when evaluating the value already reported a problem.
    pub eval_failed: bool,
}

impl<'a> AssignChecker<'a> {
    pub fn new(target: &'a TypeDescriptor, value: &'a TypedValue, position: Position) -> Self {
        AssignChecker {
            target,
            value,
            ignore_any: false,
            position,
            eval_failed: false,
        }
    }

    pub fn check(&self, diagnostics: &mut Diagnostics) {
        if self.eval_failed || self.value.text.is_empty() {
            return;
        }

        let value_ty = &self.value.ty;
        if self.target.is_pure() && self.value.is_const_expr() && value_ty.is_pure() {
            if let (Some(kind), Some(constant)) =
                (self.target.numeric_kind(), self.value.constant.as_ref())
            {
                if kind.is_float() && constant.is_numeric() {
                    if !float_assignable(kind, constant) {
                        diagnostics.push(ErrorImpl::OverflowLimits, self.position.clone());
                    }
                    return;
                }
                if kind.is_integer() && value_ty.is_integer() {
                    if !integer_assignable(kind, constant) {
                        diagnostics.push(ErrorImpl::OverflowLimits, self.position.clone());
                    }
                    return;
                }
            }
        }

        if !compatible(self.target, value_ty, self.ignore_any) {
            diagnostics.push(
                ErrorImpl::IncompatibleType {
                    expected: self.target.spelling(),
                    received: value_ty.spelling(),
                },
                self.position.clone(),
            );
        }
    }
}

fn float_assignable(kind: NumericKind, constant: &ConstValue) -> bool {
    check_float_bits(&scientific(constant.to_f64()), kind.bits())
}

fn integer_assignable(kind: NumericKind, constant: &ConstValue) -> bool {
    if kind.is_signed_integer() {
        signed_assignable(kind, constant)
    } else {
        unsigned_assignable(kind, constant)
    }
}

fn signed_assignable(kind: NumericKind, constant: &ConstValue) -> bool {
    let max = kind.max_unsigned();
    match constant {
        ConstValue::I64(n) => *n >= kind.min_signed() && *n as i128 <= max as i128,
        ConstValue::U64(n) => *n <= max,
        _ => false,
    }
}

fn unsigned_assignable(kind: NumericKind, constant: &ConstValue) -> bool {
    let max = kind.max_unsigned();
    match constant {
        ConstValue::I64(n) => *n >= 0 && (*n as u64) <= max,
        ConstValue::U64(n) => *n <= max,
        _ => false,
    }
}
