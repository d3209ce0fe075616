use std::{fmt::Display, rc::Rc};

use crate::{
    constant::constant::ConstValue,
    errors::errors::{Diagnostics, ErrorImpl},
    lexer::tokens::{tokens_text, Token},
    type_checker::eval::Evaluate,
    Position,
};

use super::{
    decls::{EnumDecl, FuncDecl, StructDecl, TraitDecl},
    numeric::NumericKind,
};

/// Closed set of type categories. Pointer depth is not a category; it is
/// tracked on the descriptor itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Category {
    Numeric(NumericKind),
    Bool,
    Str,
    Nil,
    Any,
    Slice,
    Array,
    Map,
    Struct,
    Trait,
    Enum,
    Func,
    Tuple,
    Generic,
    Void,
}

impl Category {
    pub fn numeric(&self) -> Option<NumericKind> {
        match self {
            Category::Numeric(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Element count of an array type.
#[derive(Debug, Clone, PartialEq)]
pub enum ArraySize {
    Fixed(usize),
    /// Size expression that has not been evaluated yet.
    Deferred(Vec<Token>),
    /// `[...]T`, counted from the initializer.
    Auto,
}

impl ArraySize {
    pub fn fixed(&self) -> Option<usize> {
        match self {
            ArraySize::Fixed(n) => Some(*n),
            _ => None,
        }
    }

    fn text(&self) -> String {
        match self {
            ArraySize::Fixed(n) => n.to_string(),
            ArraySize::Deferred(tokens) => tokens_text(tokens),
            ArraySize::Auto => "...".to_string(),
        }
    }
}

/// Category-dependent payload of a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExtra {
    None,
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    Struct {
        decl: Rc<StructDecl>,
        generics: Vec<TypeDescriptor>,
    },
    Trait(Rc<TraitDecl>),
    Enum(Rc<EnumDecl>),
    Func(Rc<FuncDecl>),
    Tuple(Vec<TypeDescriptor>),
}

/// One type occurrence.
///
/// `element` is set for slices and arrays only and is exclusively owned, so
/// cloning a descriptor never aliases the element of another one. `size` is
/// set for arrays only.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub category: Category,
    /// Canonical name without pointer markers.
    pub name: String,
    pub pointers: usize,
    pub element: Option<Box<TypeDescriptor>>,
    pub extra: TypeExtra,
    pub size: Option<ArraySize>,
    /// Form of this descriptor before generic substitution.
    pub origin: Option<Box<TypeDescriptor>>,
    pub is_generic: bool,
}

impl TypeDescriptor {
    fn bare(category: Category, name: String) -> Self {
        TypeDescriptor {
            category,
            name,
            pointers: 0,
            element: None,
            extra: TypeExtra::None,
            size: None,
            origin: None,
            is_generic: false,
        }
    }

    pub fn numeric(kind: NumericKind) -> Self {
        Self::bare(Category::Numeric(kind), kind.name().to_string())
    }

    pub fn boolean() -> Self {
        Self::bare(Category::Bool, "bool".to_string())
    }

    pub fn string() -> Self {
        Self::bare(Category::Str, "str".to_string())
    }

    pub fn nil() -> Self {
        Self::bare(Category::Nil, "nil".to_string())
    }

    pub fn any() -> Self {
        Self::bare(Category::Any, "any".to_string())
    }

    pub fn void() -> Self {
        Self::bare(Category::Void, "void".to_string())
    }

    pub fn generic(name: &str) -> Self {
        let mut ty = Self::bare(Category::Generic, name.to_string());
        ty.is_generic = true;
        ty
    }

    pub fn slice_of(element: TypeDescriptor) -> Self {
        let mut ty = Self::bare(Category::Slice, String::new());
        ty.element = Some(Box::new(element));
        ty.rename();
        ty
    }

    pub fn array_of(element: TypeDescriptor, size: ArraySize) -> Self {
        let mut ty = Self::bare(Category::Array, String::new());
        ty.element = Some(Box::new(element));
        ty.size = Some(size);
        ty.rename();
        ty
    }

    pub fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        let mut ty = Self::bare(Category::Map, String::new());
        ty.extra = TypeExtra::Map {
            key: Box::new(key),
            value: Box::new(value),
        };
        ty.rename();
        ty
    }

    pub fn tuple_of(components: Vec<TypeDescriptor>) -> Self {
        let mut ty = Self::bare(Category::Tuple, String::new());
        ty.extra = TypeExtra::Tuple(components);
        ty.rename();
        ty
    }

    pub fn structure(decl: Rc<StructDecl>, generics: Vec<TypeDescriptor>) -> Self {
        let mut ty = Self::bare(Category::Struct, String::new());
        ty.extra = TypeExtra::Struct { decl, generics };
        ty.rename();
        ty
    }

    pub fn trait_of(decl: Rc<TraitDecl>) -> Self {
        let name = decl.name.clone();
        let mut ty = Self::bare(Category::Trait, name);
        ty.extra = TypeExtra::Trait(decl);
        ty
    }

    pub fn enumeration(decl: Rc<EnumDecl>) -> Self {
        let name = decl.name.clone();
        let mut ty = Self::bare(Category::Enum, name);
        ty.extra = TypeExtra::Enum(decl);
        ty
    }

    pub fn function(decl: Rc<FuncDecl>) -> Self {
        let mut ty = Self::bare(Category::Func, String::new());
        ty.extra = TypeExtra::Func(decl);
        ty.rename();
        ty
    }

    /// One more level of indirection.
    pub fn pointer_to(mut self) -> Self {
        self.pointers += 1;
        self
    }

    /// Builds a descriptor for a builtin spelling such as `**[]i32`,
    /// `[4]u8`, `[...]str` or `[str:f64]`.
    pub fn from_spelling(spelling: &str) -> Option<TypeDescriptor> {
        let rest = spelling.trim_start_matches('*');
        let pointers = spelling.len() - rest.len();
        let mut ty = Self::from_unwrapped(rest.trim())?;
        ty.pointers += pointers;
        Some(ty)
    }

    fn from_unwrapped(spelling: &str) -> Option<TypeDescriptor> {
        if let Some(element) = spelling.strip_prefix("[]") {
            return Some(Self::slice_of(Self::from_spelling(element)?));
        }
        if let Some(inner) = spelling.strip_prefix('[') {
            let close = matching_close(inner, '[', ']')?;
            let (head, tail) = (&inner[..close], &inner[close + 1..]);
            if let Some(colon) = top_level_find(head, ':') {
                if !tail.is_empty() {
                    return None;
                }
                let key = Self::from_spelling(&head[..colon])?;
                let value = Self::from_spelling(&head[colon + 1..])?;
                return Some(Self::map_of(key, value));
            }
            let size = match head.trim() {
                "..." => ArraySize::Auto,
                count => ArraySize::Fixed(count.parse().ok()?),
            };
            return Some(Self::array_of(Self::from_spelling(tail)?, size));
        }
        if let Some(inner) = spelling.strip_prefix('(') {
            let close = matching_close(inner, '(', ')')?;
            if close + 1 != inner.len() {
                return None;
            }
            let components = split_top_level(&inner[..close], ',')
                .into_iter()
                .map(Self::from_spelling)
                .collect::<Option<Vec<_>>>()?;
            return Some(Self::tuple_of(components));
        }

        match spelling {
            "bool" => Some(Self::boolean()),
            "str" => Some(Self::string()),
            "any" => Some(Self::any()),
            "nil" => Some(Self::nil()),
            "void" => Some(Self::void()),
            name => NumericKind::from_name(name).map(Self::numeric),
        }
    }

    /// Full spelling including pointer markers.
    pub fn spelling(&self) -> String {
        format!("{}{}", "*".repeat(self.pointers), self.name)
    }

    /// Recomputes `name` of a composite type from its parts.
    pub(crate) fn rename(&mut self) {
        self.name = match (&self.category, &self.extra) {
            (Category::Slice, _) => format!("[]{}", self.element_spelling()),
            (Category::Array, _) => format!(
                "[{}]{}",
                self.size.as_ref().map(ArraySize::text).unwrap_or_default(),
                self.element_spelling()
            ),
            (Category::Map, TypeExtra::Map { key, value }) => {
                format!("[{}:{}]", key.spelling(), value.spelling())
            }
            (Category::Tuple, TypeExtra::Tuple(components)) => {
                format!("({})", join_spellings(components))
            }
            (Category::Struct, TypeExtra::Struct { decl, generics }) => {
                if generics.is_empty() {
                    decl.name.clone()
                } else {
                    format!("{}[{}]", decl.name, join_spellings(generics))
                }
            }
            (Category::Func, TypeExtra::Func(decl)) => {
                let params = decl
                    .params
                    .iter()
                    .map(|param| param.ty.spelling())
                    .collect::<Vec<_>>()
                    .join(",");
                let ret = &decl.ret.ty;
                if ret.category == Category::Void {
                    format!("({})", params)
                } else {
                    format!("({}){}", params, ret.spelling())
                }
            }
            _ => return,
        };
    }

    fn element_spelling(&self) -> String {
        self.element
            .as_ref()
            .map(|element| element.spelling())
            .unwrap_or_default()
    }

    pub fn tuple_components(&self) -> Option<&[TypeDescriptor]> {
        match &self.extra {
            TypeExtra::Tuple(components) if self.category == Category::Tuple => {
                Some(components)
            }
            _ => None,
        }
    }

    pub fn func_decl(&self) -> Option<&Rc<FuncDecl>> {
        match &self.extra {
            TypeExtra::Func(decl) => Some(decl),
            _ => None,
        }
    }

    /// Evaluates a deferred array size to a fixed count.
    ///
    /// Non-constant or negative sizes are reported as `invalid_array_size`
    /// and leave the size untouched.
    pub fn resolve_size(
        &mut self,
        evaluator: &dyn Evaluate,
        diagnostics: &mut Diagnostics,
    ) {
        let tokens = match &self.size {
            Some(ArraySize::Deferred(tokens)) => tokens.clone(),
            _ => return,
        };
        let position = tokens
            .first()
            .map(Token::position)
            .unwrap_or_else(Position::null);

        let value = evaluator.eval(&tokens, diagnostics);
        let count = match (&value.constant, value.ty.category) {
            (Some(ConstValue::I64(n)), Category::Numeric(kind)) if kind.is_integer() && *n >= 0 => {
                Some(*n as usize)
            }
            (Some(ConstValue::U64(n)), Category::Numeric(kind)) if kind.is_integer() => {
                Some(*n as usize)
            }
            _ => None,
        };
        match count {
            Some(count) if value.is_const_expr() => {
                self.size = Some(ArraySize::Fixed(count));
                self.rename();
            }
            _ => diagnostics.push(ErrorImpl::InvalidArraySize, position),
        }
    }

    /// Fixes an auto-sized array from the length of its initializer.
    pub fn infer_auto_size(&mut self, count: usize) {
        if self.size == Some(ArraySize::Auto) {
            self.size = Some(ArraySize::Fixed(count));
            self.rename();
        }
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spelling())
    }
}

fn join_spellings(types: &[TypeDescriptor]) -> String {
    types
        .iter()
        .map(TypeDescriptor::spelling)
        .collect::<Vec<_>>()
        .join(",")
}

/// Byte index in `s` of the brace closing an already-consumed `open`.
fn matching_close(s: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }
    None
}

fn top_level_find(s: &str, needle: char) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            _ if c == needle && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_top_level(s: &str, separator: char) -> Vec<&str> {
    let mut parts = vec![];
    let mut rest = s;
    while let Some(i) = top_level_find(rest, separator) {
        parts.push(&rest[..i]);
        rest = &rest[i + 1..];
    }
    parts.push(rest);
    parts
}
