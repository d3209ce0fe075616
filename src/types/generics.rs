use std::rc::Rc;

use super::{
    decls::{FuncDecl, GenericParam, Param, RetType},
    types::{Category, TypeDescriptor, TypeExtra},
};

impl TypeDescriptor {
    /// Whether a generic placeholder occurs anywhere in this type.
    pub fn has_generics(&self) -> bool {
        if self.category == Category::Generic {
            return true;
        }
        if self
            .element
            .as_ref()
            .is_some_and(|element| element.has_generics())
        {
            return true;
        }
        match &self.extra {
            TypeExtra::Map { key, value } => key.has_generics() || value.has_generics(),
            TypeExtra::Struct { generics, .. } => generics.iter().any(Self::has_generics),
            TypeExtra::Tuple(components) => components.iter().any(Self::has_generics),
            TypeExtra::Func(decl) => {
                decl.params.iter().any(|param| param.ty.has_generics())
                    || decl.ret.ty.has_generics()
            }
            TypeExtra::None | TypeExtra::Trait(_) | TypeExtra::Enum(_) => false,
        }
    }

    /// Ready for the emitter: no placeholder left.
    pub fn is_fully_resolved(&self) -> bool {
        !self.has_generics()
    }

    pub fn is_generic_of(&self, params: &[GenericParam]) -> bool {
        self.category == Category::Generic && params.iter().any(|param| param.name == self.name)
    }

    /// Deep copy with every placeholder named in `params` replaced by the
    /// argument at the same index.
    ///
    /// Substitution always starts from the template, so a type that was
    /// instantiated before can be specialized again with other arguments.
    /// The template is kept as `origin` whenever something was substituted.
    pub fn instantiate(&self, params: &[GenericParam], args: &[TypeDescriptor]) -> TypeDescriptor {
        let template = self.restore_origin();
        let mut ty = template.substitute(params, args);
        if template.has_generics() && ty != template {
            tracing::debug!(template = %template, instance = %ty, "instantiated generic type");
            ty.origin = Some(Box::new(template));
        }
        ty
    }

    /// Structural copy of the pre-substitution form, or of `self` when
    /// there is none.
    pub fn restore_origin(&self) -> TypeDescriptor {
        match &self.origin {
            Some(origin) => origin.as_ref().clone(),
            None => self.clone(),
        }
    }

    fn substitute(&self, params: &[GenericParam], args: &[TypeDescriptor]) -> TypeDescriptor {
        if self.category == Category::Generic {
            let arg = params
                .iter()
                .position(|param| param.name == self.name)
                .and_then(|i| args.get(i));
            return match arg {
                Some(arg) => {
                    let mut ty = arg.clone();
                    ty.pointers += self.pointers;
                    ty.origin = Some(Box::new(self.clone()));
                    ty
                }
                None => self.clone(),
            };
        }

        let mut ty = self.clone();
        if let Some(element) = &self.element {
            ty.element = Some(Box::new(element.substitute(params, args)));
        }
        ty.extra = match &self.extra {
            TypeExtra::Map { key, value } => TypeExtra::Map {
                key: Box::new(key.substitute(params, args)),
                value: Box::new(value.substitute(params, args)),
            },
            TypeExtra::Struct { decl, generics } => TypeExtra::Struct {
                decl: Rc::clone(decl),
                generics: generics
                    .iter()
                    .map(|generic| generic.substitute(params, args))
                    .collect(),
            },
            TypeExtra::Tuple(components) => TypeExtra::Tuple(
                components
                    .iter()
                    .map(|component| component.substitute(params, args))
                    .collect(),
            ),
            TypeExtra::Func(decl) => TypeExtra::Func(Rc::new(FuncDecl {
                name: decl.name.clone(),
                params: decl
                    .params
                    .iter()
                    .map(|param| Param::new(&param.name, param.ty.substitute(params, args)))
                    .collect(),
                ret: RetType {
                    ty: decl.ret.ty.substitute(params, args),
                    identifiers: decl.ret.identifiers.clone(),
                },
            })),
            other => other.clone(),
        };
        ty.rename();
        ty
    }
}
