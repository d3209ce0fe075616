//! Declaration models handed over by the parser.
//!
//! Descriptors for structs, traits, enums and functions refer to these
//! through `Rc`, so identity is shared while every descriptor stays an
//! independent value.

use std::rc::Rc;

use super::types::TypeDescriptor;

/// A generic parameter name, e.g. `T` in `struct Box[T]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericParam {
    pub name: String,
}

impl GenericParam {
    pub fn new(name: &str) -> Self {
        GenericParam {
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeDescriptor,
}

impl Param {
    pub fn new(name: &str, ty: TypeDescriptor) -> Self {
        Param {
            name: name.to_string(),
            ty,
        }
    }
}

/// Declared return type plus the optional names of return variables.
///
/// `identifiers` is either empty (unnamed returns) or holds one name per
/// returned component; the ignore placeholder marks a component that has
/// no variable.
#[derive(Debug, Clone, PartialEq)]
pub struct RetType {
    pub ty: TypeDescriptor,
    pub identifiers: Vec<String>,
}

impl RetType {
    pub fn new(ty: TypeDescriptor) -> Self {
        RetType {
            ty,
            identifiers: vec![],
        }
    }

    pub fn named(ty: TypeDescriptor, identifiers: &[&str]) -> Self {
        RetType {
            ty,
            identifiers: identifiers.iter().map(|id| id.to_string()).collect(),
        }
    }

    /// Whether any return variable is bound to a real name.
    pub fn any_var(&self, ignore: &str) -> bool {
        self.identifiers.iter().any(|id| id != ignore)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub ret: RetType,
}

impl FuncDecl {
    pub fn new(name: &str, params: Vec<Param>, ret: RetType) -> Self {
        FuncDecl {
            name: name.to_string(),
            params,
            ret,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraitDecl {
    pub name: String,
    /// Source unit the trait was declared in.
    pub file: String,
    pub funcs: Vec<FuncDecl>,
}

impl TraitDecl {
    pub fn new(name: &str, file: &str, funcs: Vec<FuncDecl>) -> Self {
        TraitDecl {
            name: name.to_string(),
            file: file.to_string(),
            funcs,
        }
    }

    pub fn same_decl(&self, other: &TraitDecl) -> bool {
        self.name == other.name && self.file == other.file
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub file: String,
    pub generics: Vec<GenericParam>,
    pub fields: Vec<Param>,
    pub traits: Vec<Rc<TraitDecl>>,
}

impl StructDecl {
    pub fn new(name: &str, file: &str) -> Self {
        StructDecl {
            name: name.to_string(),
            file: file.to_string(),
            generics: vec![],
            fields: vec![],
            traits: vec![],
        }
    }

    /// Identity is the declared name within its source unit.
    pub fn same_decl(&self, other: &StructDecl) -> bool {
        self.name == other.name && self.file == other.file
    }

    pub fn has_trait(&self, tr: &TraitDecl) -> bool {
        self.traits.iter().any(|own| own.same_decl(tr))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub file: String,
    /// Underlying storage type of the enum's items.
    pub storage: TypeDescriptor,
    pub items: Vec<String>,
}

impl EnumDecl {
    pub fn new(name: &str, file: &str, storage: TypeDescriptor, items: &[&str]) -> Self {
        EnumDecl {
            name: name.to_string(),
            file: file.to_string(),
            storage,
            items: items.iter().map(|item| item.to_string()).collect(),
        }
    }
}
