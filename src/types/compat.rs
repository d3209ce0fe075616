use super::{
    numeric::NumericKind,
    types::{Category, TypeDescriptor, TypeExtra},
};

/// Classifiers derived from the category and the name's structural markers.
impl TypeDescriptor {
    pub fn is_pointer(&self) -> bool {
        self.pointers > 0
    }

    pub fn is_slice(&self) -> bool {
        !self.is_pointer() && self.category == Category::Slice && self.name.starts_with("[]")
    }

    pub fn is_array(&self) -> bool {
        !self.is_pointer()
            && self.category == Category::Array
            && self.name.starts_with('[')
            && !self.name.starts_with("[]")
    }

    pub fn is_map(&self) -> bool {
        !self.is_pointer()
            && self.category == Category::Map
            && self.name.starts_with('[')
            && self.name.ends_with(']')
    }

    pub fn is_func(&self) -> bool {
        !self.is_pointer() && self.category == Category::Func && self.name.starts_with('(')
    }

    pub fn is_struct(&self) -> bool {
        !self.is_pointer() && self.category == Category::Struct
    }

    pub fn is_trait(&self) -> bool {
        !self.is_pointer() && self.category == Category::Trait
    }

    pub fn is_enum(&self) -> bool {
        !self.is_pointer() && self.category == Category::Enum
    }

    pub fn is_tuple(&self) -> bool {
        !self.is_pointer() && self.category == Category::Tuple
    }

    /// No pointer, container or function wrapping. Only pure types take
    /// part in compile-time range checks.
    pub fn is_pure(&self) -> bool {
        !self.is_pointer()
            && !matches!(
                self.category,
                Category::Slice | Category::Array | Category::Map | Category::Func
            )
    }

    /// Categories whose values may be `nil`.
    pub fn is_nil_compatible(&self) -> bool {
        self.is_nil()
            || self.is_func()
            || self.is_pointer()
            || self.is_slice()
            || self.is_trait()
            || self.is_map()
    }

    /// Numeric kind of a non-pointer numeric type.
    pub fn numeric_kind(&self) -> Option<NumericKind> {
        if self.is_pointer() {
            return None;
        }
        self.category.numeric()
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric_kind().is_some()
    }

    pub fn is_float(&self) -> bool {
        self.numeric_kind().is_some_and(|kind| kind.is_float())
    }

    pub fn is_signed_integer(&self) -> bool {
        self.numeric_kind().is_some_and(|kind| kind.is_signed_integer())
    }

    pub fn is_unsigned_integer(&self) -> bool {
        self.numeric_kind().is_some_and(|kind| kind.is_unsigned_integer())
    }

    pub fn is_integer(&self) -> bool {
        self.numeric_kind().is_some_and(|kind| kind.is_integer())
    }

    pub fn is_bool(&self) -> bool {
        !self.is_pointer() && self.category == Category::Bool
    }

    pub fn is_str(&self) -> bool {
        !self.is_pointer() && self.category == Category::Str
    }

    pub fn is_nil(&self) -> bool {
        !self.is_pointer() && self.category == Category::Nil
    }

    pub fn is_any(&self) -> bool {
        !self.is_pointer() && self.category == Category::Any
    }

    pub fn is_void(&self) -> bool {
        !self.is_pointer() && self.category == Category::Void
    }
}

/// Same category and same full spelling.
pub fn types_equal(t1: &TypeDescriptor, t2: &TypeDescriptor) -> bool {
    t1.category == t2.category && t1.spelling() == t2.spelling()
}

/// Whether a value of one type may meet a value of the other.
///
/// Branches are tried in a fixed order and the first applicable one
/// decides, so a pointer mismatch is judged as a pointer mismatch before
/// the generic nil rule could accept it.
pub fn compatible(t1: &TypeDescriptor, t2: &TypeDescriptor, ignore_any: bool) -> bool {
    if t1.is_pointer() || t2.is_pointer() {
        let (ptr, other) = if t2.is_pointer() { (t2, t1) } else { (t1, t2) };
        return other.is_nil() || ptr.spelling() == other.spelling();
    }
    if t1.is_slice() || t2.is_slice() {
        let (slice, other) = if t2.is_slice() { (t2, t1) } else { (t1, t2) };
        return other.is_nil() || slice.spelling() == other.spelling();
    }
    if t1.is_array() || t2.is_array() {
        let (array, other) = if t2.is_array() { (t2, t1) } else { (t1, t2) };
        return array_compatible(array, other);
    }
    if t1.is_map() || t2.is_map() {
        let (map, other) = if t2.is_map() { (t2, t1) } else { (t1, t2) };
        return other.is_nil() || map.spelling() == other.spelling();
    }
    if t1.is_trait() || t2.is_trait() {
        let (tr, other) = if t2.is_trait() { (t2, t1) } else { (t1, t2) };
        return trait_compatible(tr, other);
    }
    if t1.is_nil_compatible() {
        return t2.is_nil();
    }
    if t2.is_nil_compatible() {
        return t1.is_nil();
    }
    if t1.is_enum() || t2.is_enum() {
        return t1.category == t2.category && t1.name == t2.name;
    }
    if t1.is_struct() || t2.is_struct() {
        return struct_compatible(t1, t2);
    }
    primitive_compatible(t1, t2, ignore_any)
}

fn array_compatible(array: &TypeDescriptor, other: &TypeDescriptor) -> bool {
    if !other.is_array() {
        return false;
    }
    let count = |ty: &TypeDescriptor| ty.size.as_ref().and_then(|size| size.fixed());
    count(array) == count(other)
}

fn trait_compatible(tr: &TypeDescriptor, other: &TypeDescriptor) -> bool {
    let TypeExtra::Trait(decl) = &tr.extra else {
        return false;
    };
    match &other.extra {
        TypeExtra::Trait(other_decl) if other.is_trait() => decl.same_decl(other_decl),
        TypeExtra::Struct { decl: st, .. } if other.is_struct() => st.has_trait(decl),
        _ => false,
    }
}

fn struct_compatible(t1: &TypeDescriptor, t2: &TypeDescriptor) -> bool {
    let (
        TypeExtra::Struct {
            decl: d1,
            generics: g1,
        },
        TypeExtra::Struct {
            decl: d2,
            generics: g2,
        },
    ) = (&t1.extra, &t2.extra)
    else {
        return false;
    };
    if !t1.is_struct() || !t2.is_struct() || !d1.same_decl(d2) {
        return false;
    }
    if d1.generics.is_empty() {
        return true;
    }
    g1.len() == g2.len() && g1.iter().zip(g2).all(|(a, b)| types_equal(a, b))
}

fn primitive_compatible(t1: &TypeDescriptor, t2: &TypeDescriptor, ignore_any: bool) -> bool {
    if t1.is_any() || t2.is_any() {
        return ignore_any || (t1.is_any() && t2.is_any());
    }
    match (&t1.category, &t2.category) {
        (Category::Numeric(k1), Category::Numeric(k2)) => k1 == k2,
        (Category::Bool, Category::Bool)
        | (Category::Str, Category::Str)
        | (Category::Void, Category::Void) => true,
        (Category::Generic, Category::Generic) => t1.name == t2.name,
        (Category::Tuple, Category::Tuple) => {
            match (t1.tuple_components(), t2.tuple_components()) {
                (Some(c1), Some(c2)) => {
                    c1.len() == c2.len()
                        && c1.iter().zip(c2).all(|(a, b)| compatible(a, b, ignore_any))
                }
                _ => false,
            }
        }
        _ => false,
    }
}
