use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    config::Settings,
    constant::constant::{bitsize_float, ConstValue},
    errors::errors::{Diagnostics, ErrorImpl},
    lexer::{
        parts::without_eof,
        tokens::{Token, TokenKind},
    },
    types::{numeric::NumericKind, types::TypeDescriptor},
    Position,
};

use super::{assign::AssignChecker, solver::Solver, value::TypedValue};

/// Turns a flat token span into a typed value.
pub trait Evaluate {
    fn eval(&self, tokens: &[Token], diagnostics: &mut Diagnostics) -> TypedValue;
}

/// Names visible to an expression.
#[derive(Debug, Default, Clone)]
pub struct Scope {
    variables: HashMap<String, TypedValue>,
}

impl Scope {
    pub fn new() -> Self {
        Scope {
            variables: HashMap::new(),
        }
    }

    /// A mutable variable of type `ty`.
    pub fn declare(&mut self, name: &str, ty: TypeDescriptor) {
        self.variables
            .insert(name.to_string(), TypedValue::lvalue(ty, name));
    }

    /// A named constant; reading it yields a const-expr value.
    pub fn declare_const(&mut self, name: &str, ty: TypeDescriptor, value: ConstValue) {
        let mut constant = TypedValue::constant(ty, value);
        constant.text = name.to_string();
        self.variables.insert(name.to_string(), constant);
    }

    pub fn declare_value(&mut self, name: &str, value: TypedValue) {
        self.variables.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.variables.get(name)
    }
}

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    LogicalOr,
    LogicalAnd,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
}

/// Read position over the span being evaluated.
pub struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Cursor<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> TokenKind {
        self.current().map_or(TokenKind::EOF, |token| token.kind)
    }

    fn position(&self) -> Position {
        match self.current().or(self.tokens.last()) {
            Some(token) => token.position(),
            None => Position::null(),
        }
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.current();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn skip_rest(&mut self) {
        self.pos = self.tokens.len();
    }
}

pub type NUDHandler = fn(&ExprEvaluator<'_>, &mut Cursor<'_>, &mut Diagnostics) -> TypedValue;
pub type LEDHandler =
    fn(&ExprEvaluator<'_>, &mut Cursor<'_>, TypedValue, BindingPower, &mut Diagnostics) -> TypedValue;

struct Lookups {
    nud: HashMap<TokenKind, NUDHandler>,
    led: HashMap<TokenKind, LEDHandler>,
    bp: HashMap<TokenKind, BindingPower>,
}

impl Lookups {
    fn led(&mut self, kind: TokenKind, bp: BindingPower, handler: LEDHandler) {
        self.bp.insert(kind, bp);
        self.led.insert(kind, handler);
    }

    fn nud(&mut self, kind: TokenKind, handler: NUDHandler) {
        self.nud.insert(kind, handler);
    }
}

lazy_static! {
    static ref LOOKUPS: Lookups = {
        let mut lookups = Lookups {
            nud: HashMap::new(),
            led: HashMap::new(),
            bp: HashMap::new(),
        };

        // Logical
        lookups.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary);
        lookups.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary);

        // Relational
        for kind in [
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
        ] {
            lookups.led(kind, BindingPower::Relational, parse_binary);
        }

        // Additive and multiplicative
        for kind in [TokenKind::Plus, TokenKind::Dash, TokenKind::Pipe, TokenKind::Caret] {
            lookups.led(kind, BindingPower::Additive, parse_binary);
        }
        for kind in [
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Amper,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
        ] {
            lookups.led(kind, BindingPower::Multiplicative, parse_binary);
        }

        lookups.led(TokenKind::OpenParen, BindingPower::Call, parse_call);

        // Literals and symbols
        lookups.nud(TokenKind::Number, parse_number);
        lookups.nud(TokenKind::String, parse_literal);
        lookups.nud(TokenKind::True, parse_literal);
        lookups.nud(TokenKind::False, parse_literal);
        lookups.nud(TokenKind::Nil, parse_literal);
        lookups.nud(TokenKind::Identifier, parse_identifier);
        lookups.nud(TokenKind::OpenParen, parse_grouping);
        lookups.nud(TokenKind::Dash, parse_prefix);
        lookups.nud(TokenKind::Not, parse_prefix);

        lookups
    };
}

/// Expression evaluator over a scope of known names.
pub struct ExprEvaluator<'a> {
    scope: &'a Scope,
    settings: &'a Settings,
}

impl<'a> ExprEvaluator<'a> {
    pub fn new(scope: &'a Scope, settings: &'a Settings) -> Self {
        ExprEvaluator { scope, settings }
    }

    fn parse_expr(
        &self,
        cursor: &mut Cursor<'_>,
        bp: BindingPower,
        diagnostics: &mut Diagnostics,
    ) -> TypedValue {
        let Some(nud) = LOOKUPS.nud.get(&cursor.current_kind()) else {
            invalid_syntax(cursor, diagnostics);
            return TypedValue::void();
        };
        let mut left = nud(self, cursor, diagnostics);

        while let Some(next_bp) = LOOKUPS.bp.get(&cursor.current_kind()).copied() {
            if next_bp <= bp {
                break;
            }
            let Some(led) = LOOKUPS.led.get(&cursor.current_kind()) else {
                break;
            };
            left = led(self, cursor, left, next_bp, diagnostics);
        }
        left
    }
}

impl Evaluate for ExprEvaluator<'_> {
    fn eval(&self, tokens: &[Token], diagnostics: &mut Diagnostics) -> TypedValue {
        let tokens = without_eof(tokens);
        let mut cursor = Cursor::new(tokens);
        if cursor.at_end() {
            diagnostics.push(ErrorImpl::MissingExpr, cursor.position());
            return TypedValue::void();
        }

        let value = self.parse_expr(&mut cursor, BindingPower::Default, diagnostics);
        if !cursor.at_end() {
            invalid_syntax(&mut cursor, diagnostics);
            return TypedValue::void();
        }
        value
    }
}

/// Reports the current token and gives up on the rest of the span.
fn invalid_syntax(cursor: &mut Cursor<'_>, diagnostics: &mut Diagnostics) {
    let token = cursor
        .current()
        .map_or_else(|| "<eof>".to_string(), |token| token.value.clone());
    diagnostics.push(ErrorImpl::InvalidSyntax { token }, cursor.position());
    cursor.skip_rest();
}

fn is_failed(value: &TypedValue) -> bool {
    value.ty.is_void() && value.text.is_empty()
}

/// Integer literals take the narrowest kind that holds them; float
/// literals take `f32` when the value survives a round trip through it.
fn parse_number(
    _evaluator: &ExprEvaluator<'_>,
    cursor: &mut Cursor<'_>,
    diagnostics: &mut Diagnostics,
) -> TypedValue {
    let Some(token) = cursor.advance() else {
        return TypedValue::void();
    };
    let literal = token.value.as_str();

    let constant = if let Some(hex) = literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16).ok().map(integer_constant)
    } else if literal.contains(&['.', 'e', 'E'][..]) {
        literal.parse::<f64>().ok().map(ConstValue::F64)
    } else {
        match literal.parse::<u64>() {
            Ok(n) => Some(integer_constant(n)),
            Err(_) => literal.parse::<f64>().ok().map(ConstValue::F64),
        }
    };

    let Some(constant) = constant else {
        diagnostics.push(
            ErrorImpl::InvalidSyntax {
                token: literal.to_string(),
            },
            token.position(),
        );
        return TypedValue::void();
    };
    let kind = match &constant {
        ConstValue::F64(x) => NumericKind::float_from_bits(bitsize_float(*x)),
        other => other.narrowest_kind().unwrap_or(NumericKind::I64),
    };

    let mut value = TypedValue::constant(TypeDescriptor::numeric(kind), constant);
    value.text = literal.to_string();
    value
}

fn integer_constant(n: u64) -> ConstValue {
    match i64::try_from(n) {
        Ok(signed) => ConstValue::I64(signed),
        Err(_) => ConstValue::U64(n),
    }
}

fn parse_literal(
    _evaluator: &ExprEvaluator<'_>,
    cursor: &mut Cursor<'_>,
    _diagnostics: &mut Diagnostics,
) -> TypedValue {
    let Some(token) = cursor.advance() else {
        return TypedValue::void();
    };
    match token.kind {
        TokenKind::String => {
            TypedValue::constant(TypeDescriptor::string(), ConstValue::Str(token.value.clone()))
        }
        TokenKind::True => TypedValue::constant(TypeDescriptor::boolean(), ConstValue::Bool(true)),
        TokenKind::False => {
            TypedValue::constant(TypeDescriptor::boolean(), ConstValue::Bool(false))
        }
        _ => TypedValue::new(TypeDescriptor::nil(), "nil"),
    }
}

fn parse_identifier(
    evaluator: &ExprEvaluator<'_>,
    cursor: &mut Cursor<'_>,
    diagnostics: &mut Diagnostics,
) -> TypedValue {
    let Some(token) = cursor.advance() else {
        return TypedValue::void();
    };
    match evaluator.scope.get(&token.value) {
        Some(value) => value.clone(),
        None => {
            diagnostics.push(
                ErrorImpl::IdNotExist {
                    identifier: token.value.clone(),
                },
                token.position(),
            );
            TypedValue::void()
        }
    }
}

/// `(x)` groups, `(a, b)` builds a tuple.
fn parse_grouping(
    evaluator: &ExprEvaluator<'_>,
    cursor: &mut Cursor<'_>,
    diagnostics: &mut Diagnostics,
) -> TypedValue {
    cursor.advance();
    let mut items = vec![evaluator.parse_expr(cursor, BindingPower::Default, diagnostics)];
    while cursor.current_kind() == TokenKind::Comma {
        cursor.advance();
        items.push(evaluator.parse_expr(cursor, BindingPower::Default, diagnostics));
    }
    if cursor.current_kind() != TokenKind::CloseParen {
        if !cursor.at_end() || !items.iter().any(is_failed) {
            invalid_syntax(cursor, diagnostics);
        }
        return TypedValue::void();
    }
    cursor.advance();

    if items.iter().any(is_failed) {
        return TypedValue::void();
    }
    if items.len() == 1 {
        let mut value = items.remove(0);
        value.text = format!("({})", value.text);
        return value;
    }

    let text = items
        .iter()
        .map(|item| item.text.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    TypedValue::tuple(items, &format!("({})", text))
}

fn parse_prefix(
    evaluator: &ExprEvaluator<'_>,
    cursor: &mut Cursor<'_>,
    diagnostics: &mut Diagnostics,
) -> TypedValue {
    let Some(operator) = cursor.advance() else {
        return TypedValue::void();
    };
    let operand = evaluator.parse_expr(cursor, BindingPower::Unary, diagnostics);
    if is_failed(&operand) {
        return operand;
    }
    let text = format!("{}{}", operator.value, operand.text);
    let folding = evaluator.settings.fold_constants && operand.is_const_expr();

    let folded = match operator.kind {
        TokenKind::Dash if operand.ty.is_numeric() => {
            let negated = operand.constant.as_ref().filter(|_| folding).map(negate);
            Some(negated)
        }
        TokenKind::Not if operand.ty.is_bool() => Some(match &operand.constant {
            Some(ConstValue::Bool(b)) if folding => Some(ConstValue::Bool(!b)),
            _ => None,
        }),
        _ => None,
    };

    let Some(constant) = folded else {
        diagnostics.push(
            ErrorImpl::InvalidTypeUnaryOperator {
                operator: operator.value.clone(),
            },
            operator.position(),
        );
        return TypedValue::void();
    };

    let ty = match &constant {
        Some(value) if operand.ty.is_numeric() => value
            .narrowest_kind()
            .map(TypeDescriptor::numeric)
            .unwrap_or_else(|| operand.ty.clone()),
        _ => operand.ty.clone(),
    };
    TypedValue {
        constant,
        ..TypedValue::new(ty, &text)
    }
}

/// Negation that leaves the integer variants when the result does not
/// fit in `i64`.
fn negate(constant: &ConstValue) -> ConstValue {
    match constant {
        ConstValue::F64(x) => ConstValue::F64(-x),
        ConstValue::U64(n) => match i64::try_from(-(*n as i128)) {
            Ok(negated) => ConstValue::I64(negated),
            Err(_) => ConstValue::F64(-(*n as f64)),
        },
        other => match other.to_i64().checked_neg() {
            Some(negated) => ConstValue::I64(negated),
            None => ConstValue::F64(-other.to_f64()),
        },
    }
}

fn parse_binary(
    evaluator: &ExprEvaluator<'_>,
    cursor: &mut Cursor<'_>,
    left: TypedValue,
    bp: BindingPower,
    diagnostics: &mut Diagnostics,
) -> TypedValue {
    let Some(operator) = cursor.advance() else {
        return TypedValue::void();
    };
    let right = evaluator.parse_expr(cursor, bp, diagnostics);
    if is_failed(&left) || is_failed(&right) {
        return TypedValue::void();
    }
    Solver::new(evaluator.settings).resolve(&left, operator, &right, diagnostics)
}

/// Calls a function-typed value. Arguments are checked against the
/// declared parameters like assignments.
fn parse_call(
    evaluator: &ExprEvaluator<'_>,
    cursor: &mut Cursor<'_>,
    callee: TypedValue,
    _bp: BindingPower,
    diagnostics: &mut Diagnostics,
) -> TypedValue {
    let Some(open) = cursor.advance() else {
        return TypedValue::void();
    };

    let mut args = vec![];
    while cursor.current_kind() != TokenKind::CloseParen {
        let position = cursor.position();
        let before = diagnostics.len();
        let arg = evaluator.parse_expr(cursor, BindingPower::Default, diagnostics);
        args.push((arg, position, diagnostics.len() > before));

        match cursor.current_kind() {
            TokenKind::Comma => {
                cursor.advance();
            }
            TokenKind::CloseParen => {}
            _ => {
                if !cursor.at_end() || diagnostics.len() == before {
                    invalid_syntax(cursor, diagnostics);
                }
                return TypedValue::void();
            }
        }
    }
    cursor.advance();

    if is_failed(&callee) {
        return TypedValue::void();
    }
    let Some(decl) = callee.ty.func_decl().filter(|_| callee.ty.is_func()) else {
        diagnostics.push(
            ErrorImpl::InvalidSyntax {
                token: open.value.clone(),
            },
            open.position(),
        );
        return TypedValue::void();
    };

    let (expected, received) = (decl.params.len(), args.len());
    if received < expected {
        diagnostics.push(
            ErrorImpl::MissingArgument { expected, received },
            open.position(),
        );
    } else if received > expected {
        diagnostics.push(
            ErrorImpl::ArgumentOverflow { expected, received },
            open.position(),
        );
    }
    for (param, (arg, position, eval_failed)) in decl.params.iter().zip(&args) {
        let mut checker = AssignChecker::new(&param.ty, arg, position.clone());
        checker.eval_failed = *eval_failed;
        checker.check(diagnostics);
    }

    let text = format!(
        "{}({})",
        callee.text,
        args.iter()
            .map(|(arg, _, _)| arg.text.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    TypedValue::new(decl.ret.ty.clone(), &text)
}
