use std::cmp::Ordering;

use crate::{
    config::Settings,
    constant::constant::ConstValue,
    errors::errors::{Diagnostics, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    types::{
        compat::compatible,
        numeric::NumericKind,
        types::{TypeDescriptor, TypeExtra},
    },
};

use super::value::TypedValue;

const COMPARISON_OPERATORS: [TokenKind; 6] = [
    TokenKind::Equals,
    TokenKind::NotEquals,
    TokenKind::Less,
    TokenKind::Greater,
    TokenKind::LessEquals,
    TokenKind::GreaterEquals,
];

const BINARY_OPERATORS: [TokenKind; 18] = [
    TokenKind::Plus,
    TokenKind::Dash,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Percent,
    TokenKind::ShiftLeft,
    TokenKind::ShiftRight,
    TokenKind::Amper,
    TokenKind::Pipe,
    TokenKind::Caret,
    TokenKind::Equals,
    TokenKind::NotEquals,
    TokenKind::Less,
    TokenKind::Greater,
    TokenKind::LessEquals,
    TokenKind::GreaterEquals,
    TokenKind::And,
    TokenKind::Or,
];

/// Which handler an operand pair goes to. Variants are listed in dispatch
/// precedence; the first one either operand belongs to wins.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Dispatch {
    Function,
    Array,
    Slice,
    Pointer,
    Enum,
    Struct,
    Trait,
    Map,
    Nil,
    Any,
    Bool,
    Str,
    Float,
    Unsigned,
    Signed,
    Unsupported,
}

impl Dispatch {
    fn of(left: &TypeDescriptor, right: &TypeDescriptor) -> Dispatch {
        let either = |predicate: fn(&TypeDescriptor) -> bool| predicate(left) || predicate(right);

        if either(TypeDescriptor::is_func) {
            Dispatch::Function
        } else if either(TypeDescriptor::is_array) {
            Dispatch::Array
        } else if either(TypeDescriptor::is_slice) {
            Dispatch::Slice
        } else if either(TypeDescriptor::is_pointer) {
            Dispatch::Pointer
        } else if either(TypeDescriptor::is_enum) {
            Dispatch::Enum
        } else if either(TypeDescriptor::is_struct) {
            Dispatch::Struct
        } else if either(TypeDescriptor::is_trait) {
            Dispatch::Trait
        } else if either(TypeDescriptor::is_map) {
            Dispatch::Map
        } else if either(TypeDescriptor::is_nil) {
            Dispatch::Nil
        } else if either(TypeDescriptor::is_any) {
            Dispatch::Any
        } else if either(TypeDescriptor::is_bool) {
            Dispatch::Bool
        } else if either(TypeDescriptor::is_str) {
            Dispatch::Str
        } else if either(TypeDescriptor::is_float) {
            Dispatch::Float
        } else if either(TypeDescriptor::is_unsigned_integer) {
            Dispatch::Unsigned
        } else if either(TypeDescriptor::is_signed_integer) {
            Dispatch::Signed
        } else {
            Dispatch::Unsupported
        }
    }
}

/// What a handler decided before folding is finalized.
struct Outcome {
    ty: TypeDescriptor,
    constant: Option<ConstValue>,
    /// Re-derive the numeric kind from the folded value.
    rederive: bool,
}

impl Outcome {
    fn typed(ty: TypeDescriptor, constant: Option<ConstValue>) -> Self {
        Outcome {
            ty,
            constant,
            rederive: true,
        }
    }

    fn boolean(value: Option<bool>) -> Self {
        Outcome::typed(TypeDescriptor::boolean(), value.map(ConstValue::Bool))
    }

    fn fixed(ty: TypeDescriptor, constant: Option<ConstValue>) -> Self {
        Outcome {
            ty,
            constant,
            rederive: false,
        }
    }
}

/// Resolves binary operations: result type, operator legality and
/// constant folding.
pub struct Solver<'a> {
    settings: &'a Settings,
}

impl<'a> Solver<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Solver { settings }
    }

    pub fn resolve(
        &self,
        left: &TypedValue,
        op: &Token,
        right: &TypedValue,
        diagnostics: &mut Diagnostics,
    ) -> TypedValue {
        if !op.is_one_of_many(&BINARY_OPERATORS) {
            diagnostics.push(
                ErrorImpl::InvalidOperator {
                    operator: op.value.clone(),
                },
                op.position(),
            );
            return TypedValue::void();
        }

        let outcome = match op.kind {
            TokenKind::And | TokenKind::Or => Some(self.logical(left, op, right, diagnostics)),
            _ => self.dispatch(left, op, right, diagnostics),
        };

        let result = match outcome {
            Some(outcome) => self.finish(left, op, right, outcome),
            None => TypedValue::void(),
        };
        tracing::trace!(
            left = %left.ty,
            operator = %op.value,
            right = %right.ty,
            result = %result.ty,
            "resolved binary operation"
        );
        result
    }

    fn finish(
        &self,
        left: &TypedValue,
        op: &Token,
        right: &TypedValue,
        outcome: Outcome,
    ) -> TypedValue {
        let Outcome {
            mut ty,
            mut constant,
            rederive,
        } = outcome;

        if !self.settings.fold_constants {
            constant = None;
        }
        if let Some(value) = &constant {
            if rederive && ty.is_numeric() {
                if let Some(kind) = value.narrowest_kind() {
                    ty = TypeDescriptor::numeric(kind);
                }
            }
            tracing::trace!(value = %value, ty = %ty, "folded constant");
        }

        let text = match &constant {
            Some(value) => value.to_string(),
            None => format!("{} {} {}", left.text, op.value, right.text),
        };
        TypedValue {
            constant,
            ..TypedValue::new(ty, &text)
        }
    }

    fn dispatch(
        &self,
        left: &TypedValue,
        op: &Token,
        right: &TypedValue,
        diagnostics: &mut Diagnostics,
    ) -> Option<Outcome> {
        match Dispatch::of(&left.ty, &right.ty) {
            Dispatch::Function => self.function(left, op, right, diagnostics),
            Dispatch::Array => self.equality_only(left, op, right, "array", diagnostics),
            Dispatch::Slice => self.equality_only(left, op, right, "slice", diagnostics),
            Dispatch::Pointer => self.pointer(left, op, right, diagnostics),
            Dispatch::Enum => match (unwrap_enum(left), unwrap_enum(right)) {
                (None, None) => {
                    incompatible(left, op, right, diagnostics);
                    None
                }
                (l, r) => {
                    let left = l.unwrap_or_else(|| left.clone());
                    let right = r.unwrap_or_else(|| right.clone());
                    self.dispatch(&left, op, &right, diagnostics)
                }
            },
            Dispatch::Struct => self.equality_only(left, op, right, "struct", diagnostics),
            Dispatch::Trait => self.equality_only(left, op, right, "trait", diagnostics),
            Dispatch::Map => self.equality_only(left, op, right, "map", diagnostics),
            Dispatch::Nil => self.nil(left, op, right, diagnostics),
            Dispatch::Any => self.any(op, diagnostics),
            Dispatch::Bool => self.boolean(left, op, right, diagnostics),
            Dispatch::Str => self.string(left, op, right, diagnostics),
            Dispatch::Float => self.numeric(left, op, right, "float", diagnostics),
            Dispatch::Unsigned => self.numeric(left, op, right, "uint", diagnostics),
            Dispatch::Signed => self.numeric(left, op, right, "int", diagnostics),
            Dispatch::Unsupported => {
                incompatible(left, op, right, diagnostics);
                None
            }
        }
    }

    fn logical(
        &self,
        left: &TypedValue,
        op: &Token,
        right: &TypedValue,
        diagnostics: &mut Diagnostics,
    ) -> Outcome {
        if !left.ty.is_bool() || !right.ty.is_bool() {
            diagnostics.push(ErrorImpl::LogicalNotBool, op.position());
            return Outcome::boolean(None);
        }
        let folded = match constants(left, right) {
            Some((ConstValue::Bool(l), ConstValue::Bool(r))) => match op.kind {
                TokenKind::And => Some(*l && *r),
                _ => Some(*l || *r),
            },
            _ => None,
        };
        Outcome::boolean(folded)
    }

    fn function(
        &self,
        left: &TypedValue,
        op: &Token,
        right: &TypedValue,
        diagnostics: &mut Diagnostics,
    ) -> Option<Outcome> {
        if !left.ty.is_nil() && !right.ty.is_nil() {
            incompatible(left, op, right, diagnostics);
            return None;
        }
        match op.kind {
            TokenKind::Equals | TokenKind::NotEquals => Some(Outcome::boolean(None)),
            _ => not_for(op, "func", diagnostics),
        }
    }

    /// Categories that only support `==` and `!=` between compatible values.
    fn equality_only(
        &self,
        left: &TypedValue,
        op: &Token,
        right: &TypedValue,
        category: &'static str,
        diagnostics: &mut Diagnostics,
    ) -> Option<Outcome> {
        if !compatible(&left.ty, &right.ty, true) {
            incompatible(left, op, right, diagnostics);
            return None;
        }
        match op.kind {
            TokenKind::Equals | TokenKind::NotEquals => Some(Outcome::boolean(None)),
            _ => not_for(op, category, diagnostics),
        }
    }

    fn pointer(
        &self,
        left: &TypedValue,
        op: &Token,
        right: &TypedValue,
        diagnostics: &mut Diagnostics,
    ) -> Option<Outcome> {
        if !compatible(&left.ty, &right.ty, true) {
            incompatible(left, op, right, diagnostics);
            return None;
        }
        let pointer = if left.ty.is_pointer() { left } else { right };
        match op.kind {
            TokenKind::Plus | TokenKind::Dash => Some(Outcome::typed(pointer.ty.clone(), None)),
            kind if COMPARISON_OPERATORS.contains(&kind) => Some(Outcome::boolean(None)),
            _ => not_for(op, "pointer", diagnostics),
        }
    }

    fn nil(
        &self,
        left: &TypedValue,
        op: &Token,
        right: &TypedValue,
        diagnostics: &mut Diagnostics,
    ) -> Option<Outcome> {
        if !compatible(&left.ty, &right.ty, false) {
            incompatible(left, op, right, diagnostics);
            return None;
        }
        match op.kind {
            TokenKind::Equals | TokenKind::NotEquals => Some(Outcome::boolean(None)),
            _ => not_for(op, "nil", diagnostics),
        }
    }

    fn any(&self, op: &Token, diagnostics: &mut Diagnostics) -> Option<Outcome> {
        match op.kind {
            TokenKind::Equals | TokenKind::NotEquals => Some(Outcome::boolean(None)),
            _ => not_for(op, "any", diagnostics),
        }
    }

    fn boolean(
        &self,
        left: &TypedValue,
        op: &Token,
        right: &TypedValue,
        diagnostics: &mut Diagnostics,
    ) -> Option<Outcome> {
        if !compatible(&left.ty, &right.ty, true) {
            incompatible(left, op, right, diagnostics);
            return None;
        }
        match op.kind {
            TokenKind::Equals | TokenKind::NotEquals => Some(Outcome::boolean(
                constants(left, right).and_then(|(l, r)| compare(op.kind, l, r)),
            )),
            _ => not_for(op, "bool", diagnostics),
        }
    }

    fn string(
        &self,
        left: &TypedValue,
        op: &Token,
        right: &TypedValue,
        diagnostics: &mut Diagnostics,
    ) -> Option<Outcome> {
        if !left.ty.is_str() || !right.ty.is_str() {
            incompatible(left, op, right, diagnostics);
            return None;
        }
        let consts = constants(left, right);
        match op.kind {
            TokenKind::Plus => {
                let joined = match consts {
                    Some((ConstValue::Str(l), ConstValue::Str(r))) => {
                        Some(ConstValue::Str(format!("{}{}", l, r)))
                    }
                    _ => None,
                };
                Some(Outcome::typed(TypeDescriptor::string(), joined))
            }
            TokenKind::Equals | TokenKind::NotEquals => Some(Outcome::boolean(
                consts.and_then(|(l, r)| compare(op.kind, l, r)),
            )),
            _ => not_for(op, "str", diagnostics),
        }
    }

    /// Shared handler of the float, unsigned and signed categories. The
    /// result of arithmetic takes the higher-ranked operand type.
    fn numeric(
        &self,
        left: &TypedValue,
        op: &Token,
        right: &TypedValue,
        category: &'static str,
        diagnostics: &mut Diagnostics,
    ) -> Option<Outcome> {
        let (Some(left_kind), Some(right_kind)) = (left.ty.numeric_kind(), right.ty.numeric_kind())
        else {
            incompatible(left, op, right, diagnostics);
            return None;
        };
        let integer = category != "float";
        let (kind, promoted) = if right_kind.greater_than(&left_kind) {
            (right_kind, right.ty.clone())
        } else {
            (left_kind, left.ty.clone())
        };
        let consts = constants(left, right);

        match op.kind {
            kind_op if COMPARISON_OPERATORS.contains(&kind_op) => Some(Outcome::boolean(
                consts.and_then(|(l, r)| compare(op.kind, l, r)),
            )),
            TokenKind::Plus | TokenKind::Dash | TokenKind::Star => {
                let exact = consts.map(|(l, r)| arithmetic(op.kind, l, r));
                let negative = exact.as_ref().is_some_and(|x| x.to_f64() < 0.0);
                if kind.is_unsigned_integer() && negative {
                    diagnostics.push(ErrorImpl::OverflowLimits, op.position());
                }
                let folded = exact.map(|x| x.cast(kind));
                Some(Outcome::typed(promoted, folded))
            }
            TokenKind::Slash => Some(self.divide(op, right, consts, kind, promoted, diagnostics)),
            TokenKind::Percent if integer => {
                Some(self.divide(op, right, consts, kind, promoted, diagnostics))
            }
            TokenKind::Amper | TokenKind::Pipe | TokenKind::Caret if integer => {
                let folded = consts.map(|(l, r)| bitwise(op.kind, l, r).cast(kind));
                Some(Outcome::typed(promoted, folded))
            }
            TokenKind::ShiftLeft | TokenKind::ShiftRight if integer => {
                Some(self.shift(op, right, consts, diagnostics))
            }
            _ => not_for(op, category, diagnostics),
        }
    }

    /// `/` and `%`. A constant zero divisor is reported and folds to zero
    /// of the promoted kind.
    fn divide(
        &self,
        op: &Token,
        right: &TypedValue,
        consts: Option<(&ConstValue, &ConstValue)>,
        kind: NumericKind,
        promoted: TypeDescriptor,
        diagnostics: &mut Diagnostics,
    ) -> Outcome {
        let zero_divisor = right.is_const_expr()
            && right.constant.as_ref().is_some_and(ConstValue::is_zero);
        if zero_divisor {
            diagnostics.push(ErrorImpl::DivideByZero, op.position());
            let zero = consts.map(|_| ConstValue::zero_of(kind));
            return Outcome::fixed(promoted, zero);
        }

        let folded = consts.map(|(l, r)| match op.kind {
            TokenKind::Slash => ConstValue::F64(l.to_f64() / r.to_f64()).cast(kind),
            _ => remainder(l, r).cast(kind),
        });
        Outcome::typed(promoted, folded)
    }

    fn shift(
        &self,
        op: &Token,
        right: &TypedValue,
        consts: Option<(&ConstValue, &ConstValue)>,
        diagnostics: &mut Diagnostics,
    ) -> Outcome {
        let unsized_result = TypeDescriptor::numeric(NumericKind::U64);
        if !ok_for_shifting(right) {
            diagnostics.push(ErrorImpl::BitshiftMustUnsigned, op.position());
            return Outcome::fixed(unsized_result, None);
        }
        let Some(amount) = right.constant.as_ref().filter(|_| right.is_const_expr()) else {
            return Outcome::fixed(unsized_result, None);
        };

        let amount = amount.to_u64();
        let kind = shift_bucket(amount);
        let folded = consts.map(|(l, _)| shifted(op.kind, l, amount).cast(kind));
        Outcome::fixed(TypeDescriptor::numeric(kind), folded)
    }
}

/// Both constants, when both operands are const-expr.
fn constants<'v>(
    left: &'v TypedValue,
    right: &'v TypedValue,
) -> Option<(&'v ConstValue, &'v ConstValue)> {
    if !left.is_const_expr() || !right.is_const_expr() {
        return None;
    }
    left.constant.as_ref().zip(right.constant.as_ref())
}

/// The value retyped as its enum's storage type.
fn unwrap_enum(value: &TypedValue) -> Option<TypedValue> {
    match &value.ty.extra {
        TypeExtra::Enum(decl) if value.ty.is_enum() => Some(TypedValue {
            ty: decl.storage.clone(),
            ..value.clone()
        }),
        _ => None,
    }
}

fn incompatible(left: &TypedValue, op: &Token, right: &TypedValue, diagnostics: &mut Diagnostics) {
    diagnostics.push(
        ErrorImpl::IncompatibleDatatype {
            left: left.ty.spelling(),
            right: right.ty.spelling(),
        },
        op.position(),
    );
}

fn not_for(op: &Token, category: &'static str, diagnostics: &mut Diagnostics) -> Option<Outcome> {
    diagnostics.push(
        ErrorImpl::OperatorNotFor {
            operator: op.value.clone(),
            category,
        },
        op.position(),
    );
    None
}

fn ok_for_shifting(value: &TypedValue) -> bool {
    if !value.ty.is_pure() || !value.ty.is_integer() {
        return false;
    }
    if !value.is_const_expr() {
        return true;
    }
    match value.constant {
        Some(ConstValue::I64(n)) => n >= 0,
        Some(ConstValue::U64(_)) => true,
        _ => false,
    }
}

/// Result kind of a shift, chosen by the shift amount.
pub fn shift_bucket(amount: u64) -> NumericKind {
    match amount {
        0..=6 => NumericKind::I8,
        7 => NumericKind::U8,
        8..=14 => NumericKind::I16,
        15 => NumericKind::U16,
        16..=30 => NumericKind::I32,
        31 => NumericKind::U32,
        32..=62 => NumericKind::I64,
        63 => NumericKind::U64,
        64..=127 => NumericKind::F32,
        _ => NumericKind::F64,
    }
}

fn compare(op: TokenKind, left: &ConstValue, right: &ConstValue) -> Option<bool> {
    let ordering = match (left, right) {
        (ConstValue::Bool(l), ConstValue::Bool(r)) => l.partial_cmp(r),
        (ConstValue::Str(l), ConstValue::Str(r)) => l.partial_cmp(r),
        (ConstValue::Bool(_) | ConstValue::Str(_), _)
        | (_, ConstValue::Bool(_) | ConstValue::Str(_)) => None,
        (ConstValue::F64(_), _) | (_, ConstValue::F64(_)) => {
            left.to_f64().partial_cmp(&right.to_f64())
        }
        _ => wide(left).partial_cmp(&wide(right)),
    }?;

    match op {
        TokenKind::Equals => Some(ordering == Ordering::Equal),
        TokenKind::NotEquals => Some(ordering != Ordering::Equal),
        TokenKind::Less => Some(ordering == Ordering::Less),
        TokenKind::Greater => Some(ordering == Ordering::Greater),
        TokenKind::LessEquals => Some(ordering != Ordering::Greater),
        TokenKind::GreaterEquals => Some(ordering != Ordering::Less),
        _ => None,
    }
}

/// Integer constant widened so signed and unsigned values order correctly.
fn wide(value: &ConstValue) -> i128 {
    match value {
        ConstValue::U64(n) => *n as i128,
        other => other.to_i64() as i128,
    }
}

fn arithmetic(op: TokenKind, left: &ConstValue, right: &ConstValue) -> ConstValue {
    let (l, r) = (left.to_f64(), right.to_f64());
    ConstValue::F64(match op {
        TokenKind::Plus => l + r,
        TokenKind::Dash => l - r,
        _ => l * r,
    })
}

fn remainder(left: &ConstValue, right: &ConstValue) -> ConstValue {
    match left {
        ConstValue::U64(l) => ConstValue::U64(l % right.to_u64()),
        _ => ConstValue::I64(left.to_i64().wrapping_rem(right.to_i64())),
    }
}

fn bitwise(op: TokenKind, left: &ConstValue, right: &ConstValue) -> ConstValue {
    match left {
        ConstValue::U64(l) => {
            let r = right.to_u64();
            ConstValue::U64(match op {
                TokenKind::Amper => l & r,
                TokenKind::Pipe => l | r,
                _ => l ^ r,
            })
        }
        _ => {
            let (l, r) = (left.to_i64(), right.to_i64());
            ConstValue::I64(match op {
                TokenKind::Amper => l & r,
                TokenKind::Pipe => l | r,
                _ => l ^ r,
            })
        }
    }
}

/// Shifts by 64 or more clear every bit, except that an arithmetic right
/// shift of a negative value leaves all of them set.
fn shifted(op: TokenKind, left: &ConstValue, amount: u64) -> ConstValue {
    let shift_left = op == TokenKind::ShiftLeft;
    match left {
        ConstValue::U64(l) => ConstValue::U64(match amount {
            64.. => 0,
            n if shift_left => l << n,
            n => l >> n,
        }),
        _ => {
            let l = left.to_i64();
            ConstValue::I64(match amount {
                64.. if !shift_left && l < 0 => -1,
                64.. => 0,
                n if shift_left => l << n,
                n => l >> n,
            })
        }
    }
}
