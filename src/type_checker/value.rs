use crate::{constant::constant::ConstValue, types::types::TypeDescriptor};

/// An expression's resolved type plus its compile-time value, if known.
///
/// Values are never mutated in place; every operation produces a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    pub ty: TypeDescriptor,
    pub constant: Option<ConstValue>,
    pub is_lvalue: bool,
    /// Source text of the expression. Empty for placeholders.
    pub text: String,
    /// Element values of a tuple expression, in order.
    pub components: Vec<TypedValue>,
}

impl TypedValue {
    pub fn new(ty: TypeDescriptor, text: &str) -> Self {
        TypedValue {
            ty,
            constant: None,
            is_lvalue: false,
            text: text.to_string(),
            components: vec![],
        }
    }

    pub fn constant(ty: TypeDescriptor, value: ConstValue) -> Self {
        TypedValue {
            ty,
            text: value.to_string(),
            constant: Some(value),
            is_lvalue: false,
            components: vec![],
        }
    }

    pub fn lvalue(ty: TypeDescriptor, text: &str) -> Self {
        TypedValue {
            is_lvalue: true,
            ..Self::new(ty, text)
        }
    }

    /// A tuple built from the values of its elements.
    pub fn tuple(items: Vec<TypedValue>, text: &str) -> Self {
        let components = items.iter().map(|item| item.ty.clone()).collect();
        TypedValue {
            components: items,
            ..Self::new(TypeDescriptor::tuple_of(components), text)
        }
    }

    /// Best-effort result of a failed resolution.
    pub fn void() -> Self {
        Self::new(TypeDescriptor::void(), "")
    }

    /// Known value on a pure type; the only gate for folding and for
    /// constant range checks.
    pub fn is_const_expr(&self) -> bool {
        self.constant.is_some() && self.ty.is_pure()
    }
}
