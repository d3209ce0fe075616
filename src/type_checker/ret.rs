use crate::{
    config::Settings,
    errors::errors::{Diagnostics, ErrorImpl},
    lexer::{
        parts::{parts, without_eof},
        tokens::{Token, TokenKind},
    },
    types::{decls::FuncDecl, types::TypeDescriptor},
    Position,
};

use super::{assign::AssignChecker, eval::Evaluate, value::TypedValue};

/// A returned expression and whether evaluating it reported anything.
struct Returned {
    value: TypedValue,
    eval_failed: bool,
}

/// Validates return statements of one function.
pub struct RetChecker<'a> {
    evaluator: &'a dyn Evaluate,
    func: &'a FuncDecl,
    settings: &'a Settings,
}

impl<'a> RetChecker<'a> {
    pub fn new(evaluator: &'a dyn Evaluate, func: &'a FuncDecl, settings: &'a Settings) -> Self {
        RetChecker {
            evaluator,
            func,
            settings,
        }
    }

    /// Checks `return <tokens>` and returns the values handed to the
    /// caller, including those read back from named results.
    pub fn check(
        &self,
        ret: &Token,
        tokens: &[Token],
        diagnostics: &mut Diagnostics,
    ) -> Vec<TypedValue> {
        let tokens = without_eof(tokens);
        let ret_ty = &self.func.ret.ty;
        let position = ret.position();

        if tokens.is_empty() {
            if self.func.ret.any_var(&self.settings.ignore_identifier) {
                return self.read_back(diagnostics);
            }
            if !ret_ty.is_void() {
                diagnostics.push(ErrorImpl::RequireReturnValue, position);
            }
            return vec![];
        }

        if ret_ty.is_void() {
            diagnostics.push(ErrorImpl::VoidFunctionReturnValue, position.clone());
        }
        let returned = self.eval_parts(tokens, diagnostics);
        if !ret_ty.is_void() {
            match ret_ty.tuple_components() {
                Some(types) => self.multi(types, &returned, &position, diagnostics),
                None => self.single(ret_ty, &returned, &position, diagnostics),
            }
        }
        returned.into_iter().map(|returned| returned.value).collect()
    }

    fn eval_parts(&self, tokens: &[Token], diagnostics: &mut Diagnostics) -> Vec<Returned> {
        parts(tokens, TokenKind::Comma, true, diagnostics)
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(|part| {
                let before = diagnostics.len();
                let value = self.evaluator.eval(part, diagnostics);
                Returned {
                    value,
                    eval_failed: diagnostics.len() > before,
                }
            })
            .collect()
    }

    fn single(
        &self,
        ret_ty: &TypeDescriptor,
        returned: &[Returned],
        position: &Position,
        diagnostics: &mut Diagnostics,
    ) {
        if returned.len() > 1 {
            diagnostics.push(ErrorImpl::OverflowReturn, position.clone());
        }
        if let Some(first) = returned.first() {
            assign(ret_ty, &first.value, first.eval_failed, position, diagnostics);
        }
    }

    fn multi(
        &self,
        types: &[TypeDescriptor],
        returned: &[Returned],
        position: &Position,
        diagnostics: &mut Diagnostics,
    ) {
        if let [only] = returned {
            self.tuple_as_multi(types, only, position, diagnostics);
            return;
        }
        if returned.len() > types.len() {
            diagnostics.push(ErrorImpl::OverflowReturn, position.clone());
        }
        for (ty, returned) in types.iter().zip(returned) {
            assign(ty, &returned.value, returned.eval_failed, position, diagnostics);
        }
    }

    /// A single tuple-typed expression returned from a multi-value function.
    fn tuple_as_multi(
        &self,
        types: &[TypeDescriptor],
        returned: &Returned,
        position: &Position,
        diagnostics: &mut Diagnostics,
    ) {
        if returned.eval_failed {
            return;
        }
        let value_ty = &returned.value.ty;
        let Some(components) = value_ty.tuple_components().filter(|_| value_ty.is_tuple()) else {
            diagnostics.push(ErrorImpl::MissingMultiReturn, position.clone());
            return;
        };
        if components.len() < types.len() {
            diagnostics.push(ErrorImpl::MissingMultiReturn, position.clone());
            return;
        }
        if components.len() > types.len() {
            diagnostics.push(ErrorImpl::OverflowReturn, position.clone());
            return;
        }
        let items = &returned.value.components;
        for (i, (ty, component)) in types.iter().zip(components).enumerate() {
            // Tuples that are not literals carry only their component types.
            let value = match items.get(i) {
                Some(item) => item.clone(),
                None => TypedValue::new(component.clone(), &returned.value.text),
            };
            assign(ty, &value, false, position, diagnostics);
        }
    }

    /// Implicit return of named results. A single-valued function reads
    /// its first bound name; a multi-valued one reads every bound name in
    /// declaration order.
    fn read_back(&self, diagnostics: &mut Diagnostics) -> Vec<TypedValue> {
        let ignore = &self.settings.ignore_identifier;
        let names = self
            .func
            .ret
            .identifiers
            .iter()
            .filter(|name| *name != ignore);
        let names: Vec<&String> = if self.func.ret.ty.is_tuple() {
            names.collect()
        } else {
            names.take(1).collect()
        };
        tracing::debug!(function = %self.func.name, count = names.len(), "reading back named results");

        names
            .into_iter()
            .map(|name| {
                let token = Token::synthetic(TokenKind::Identifier, name);
                self.evaluator.eval(&[token], diagnostics)
            })
            .collect()
    }
}

fn assign(
    target: &TypeDescriptor,
    value: &TypedValue,
    eval_failed: bool,
    position: &Position,
    diagnostics: &mut Diagnostics,
) {
    let mut checker = AssignChecker::new(target, value, position.clone());
    checker.eval_failed = eval_failed;
    checker.check(diagnostics);
}
