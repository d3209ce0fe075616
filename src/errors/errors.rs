use thiserror::Error;

use crate::Position;

/// A diagnostic pinned to the token that triggered it.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Catalog key consumed by the external message catalog.
    pub fn key(&self) -> String {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "unrecognised_token".to_string(),
            ErrorImpl::InvalidSyntax { .. } => "invalid_syntax".to_string(),
            ErrorImpl::IdNotExist { .. } => "id_noexist".to_string(),
            ErrorImpl::InvalidOperator { .. } => "invalid_operator".to_string(),
            ErrorImpl::LogicalNotBool => "logical_not_bool".to_string(),
            ErrorImpl::IncompatibleDatatype { .. } => "incompatible_datatype".to_string(),
            ErrorImpl::IncompatibleType { .. } => "incompatible_type".to_string(),
            ErrorImpl::OperatorNotFor { category, .. } => format!("operator_notfor_{}", category),
            ErrorImpl::InvalidTypeUnaryOperator { .. } => "invalid_type_unary_operator".to_string(),
            ErrorImpl::DivideByZero => "divide_by_zero".to_string(),
            ErrorImpl::BitshiftMustUnsigned => "bitshift_must_unsigned".to_string(),
            ErrorImpl::OverflowLimits => "overflow_limits".to_string(),
            ErrorImpl::InvalidArraySize => "invalid_array_size".to_string(),
            ErrorImpl::MissingExpr => "missing_expr".to_string(),
            ErrorImpl::MissingArgument { .. } => "missing_argument".to_string(),
            ErrorImpl::ArgumentOverflow { .. } => "argument_overflow".to_string(),
            ErrorImpl::RequireReturnValue => "require_return_value".to_string(),
            ErrorImpl::VoidFunctionReturnValue => "void_function_return_value".to_string(),
            ErrorImpl::OverflowReturn => "overflow_return".to_string(),
            ErrorImpl::MissingMultiReturn => "missing_multi_return".to_string(),
        }
    }

    /// Format arguments for the catalog entry, in catalog order.
    pub fn args(&self) -> Vec<String> {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { token } => vec![token.clone()],
            ErrorImpl::InvalidSyntax { token } => vec![token.clone()],
            ErrorImpl::IdNotExist { identifier } => vec![identifier.clone()],
            ErrorImpl::InvalidOperator { operator } => vec![operator.clone()],
            ErrorImpl::IncompatibleDatatype { left, right } => vec![right.clone(), left.clone()],
            ErrorImpl::IncompatibleType { expected, received } => {
                vec![expected.clone(), received.clone()]
            }
            ErrorImpl::OperatorNotFor { operator, .. } => vec![operator.clone()],
            ErrorImpl::InvalidTypeUnaryOperator { operator } => vec![operator.clone()],
            ErrorImpl::MissingArgument { expected, received }
            | ErrorImpl::ArgumentOverflow { expected, received } => {
                vec![expected.to_string(), received.to_string()]
            }
            ErrorImpl::LogicalNotBool
            | ErrorImpl::DivideByZero
            | ErrorImpl::BitshiftMustUnsigned
            | ErrorImpl::OverflowLimits
            | ErrorImpl::InvalidArraySize
            | ErrorImpl::MissingExpr
            | ErrorImpl::RequireReturnValue
            | ErrorImpl::VoidFunctionReturnValue
            | ErrorImpl::OverflowReturn
            | ErrorImpl::MissingMultiReturn => vec![],
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("invalid syntax near {token:?}")]
    InvalidSyntax { token: String },
    #[error("identifier {identifier:?} does not exist")]
    IdNotExist { identifier: String },
    #[error("invalid operator {operator:?}")]
    InvalidOperator { operator: String },
    #[error("logical operands must be booleans")]
    LogicalNotBool,
    #[error("{left} and {right} are not compatible")]
    IncompatibleDatatype { left: String, right: String },
    #[error("expected {expected}, received {received}")]
    IncompatibleType { expected: String, received: String },
    #[error("operator {operator:?} is not defined for {category}")]
    OperatorNotFor {
        operator: String,
        category: &'static str,
    },
    #[error("invalid operand type for unary {operator:?}")]
    InvalidTypeUnaryOperator { operator: String },
    #[error("division by constant zero")]
    DivideByZero,
    #[error("shift amount must be unsigned")]
    BitshiftMustUnsigned,
    #[error("constant overflows the target type")]
    OverflowLimits,
    #[error("array size must be a non-negative integer constant")]
    InvalidArraySize,
    #[error("missing expression")]
    MissingExpr,
    #[error("missing arguments: expected {expected}, received {received}")]
    MissingArgument { expected: usize, received: usize },
    #[error("too many arguments: expected {expected}, received {received}")]
    ArgumentOverflow { expected: usize, received: usize },
    #[error("non-void function must return a value")]
    RequireReturnValue,
    #[error("void function cannot return a value")]
    VoidFunctionReturnValue,
    #[error("too many return values")]
    OverflowReturn,
    #[error("missing return values")]
    MissingMultiReturn,
}

/// Caller-owned sink that validators push into instead of aborting.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: vec![] }
    }

    pub fn push(&mut self, error_impl: ErrorImpl, position: Position) {
        tracing::debug!(error = %error_impl, position = position.0, "diagnostic");
        self.errors.push(Error::new(error_impl, position));
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any diagnostic carries `key`.
    pub fn has(&self, key: &str) -> bool {
        self.errors.iter().any(|error| error.key() == key)
    }

    pub fn count(&self, key: &str) -> usize {
        self.errors.iter().filter(|error| error.key() == key).count()
    }

    pub fn keys(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.key()).collect()
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}
