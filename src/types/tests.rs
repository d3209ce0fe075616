//! Unit tests for type descriptors.
//!
//! - Building descriptors from spellings
//! - Predicates
//! - Compatibility ordering
//! - Generic instantiation and origin restoration

use std::rc::Rc;

use super::{
    compat::{compatible, types_equal},
    decls::{FuncDecl, GenericParam, Param, RetType, StructDecl, TraitDecl, EnumDecl},
    numeric::NumericKind,
    types::{ArraySize, Category, TypeDescriptor},
};

fn ty(spelling: &str) -> TypeDescriptor {
    TypeDescriptor::from_spelling(spelling).unwrap()
}

fn shape_trait() -> Rc<TraitDecl> {
    Rc::new(TraitDecl::new("Shape", "shapes.jn", vec![]))
}

fn square(traits: Vec<Rc<TraitDecl>>) -> Rc<StructDecl> {
    let mut decl = StructDecl::new("Square", "shapes.jn");
    decl.traits = traits;
    Rc::new(decl)
}

#[test]
fn test_from_spelling_primitives_and_aliases() {
    assert_eq!(ty("i32").category, Category::Numeric(NumericKind::I32));
    assert_eq!(ty("byte").category, Category::Numeric(NumericKind::U8));
    assert_eq!(ty("rune").category, Category::Numeric(NumericKind::I32));
    assert_eq!(ty("int").category, Category::Numeric(NumericKind::I64));
    assert_eq!(ty("uint").category, Category::Numeric(NumericKind::U64));
    assert_eq!(ty("bool").category, Category::Bool);
    assert_eq!(ty("str").category, Category::Str);
    assert!(TypeDescriptor::from_spelling("Widget").is_none());
}

#[test]
fn test_from_spelling_pointer_depth() {
    let t = ty("**i32");
    assert_eq!(t.pointers, 2);
    assert_eq!(t.name, "i32");
    assert_eq!(t.spelling(), "**i32");
    assert!(t.is_pointer());
    assert!(t.element.is_none());
}

#[test]
fn test_from_spelling_containers() {
    let slice = ty("[]*u8");
    assert!(slice.is_slice());
    assert_eq!(slice.element.as_ref().unwrap().spelling(), "*u8");

    let array = ty("[4]f64");
    assert!(array.is_array());
    assert_eq!(array.size, Some(ArraySize::Fixed(4)));
    assert_eq!(array.to_string(), "[4]f64");

    let auto = ty("[...]str");
    assert_eq!(auto.size, Some(ArraySize::Auto));

    let map = ty("[str:[]i32]");
    assert!(map.is_map());
    assert!(map.element.is_none());
    assert_eq!(map.to_string(), "[str:[]i32]");

    let tuple = ty("(i32,str)");
    assert!(tuple.is_tuple());
    assert_eq!(tuple.tuple_components().unwrap().len(), 2);
}

#[test]
fn test_pointer_to_slice_is_not_slice() {
    let t = ty("*[]i32");
    assert!(t.is_pointer());
    assert!(!t.is_slice());
    assert!(!t.is_pure());
}

#[test]
fn test_purity() {
    assert!(ty("i32").is_pure());
    assert!(ty("str").is_pure());
    assert!(!ty("[]i32").is_pure());
    assert!(!ty("[2]i32").is_pure());
    assert!(!ty("[str:i32]").is_pure());
    assert!(!ty("*i32").is_pure());

    let func = TypeDescriptor::function(Rc::new(FuncDecl::new(
        "f",
        vec![],
        RetType::new(TypeDescriptor::void()),
    )));
    assert!(func.is_func());
    assert!(!func.is_pure());
    assert_eq!(func.name, "()");
}

#[test]
fn test_nil_compatible_categories() {
    assert!(ty("nil").is_nil_compatible());
    assert!(ty("*i32").is_nil_compatible());
    assert!(ty("[]i32").is_nil_compatible());
    assert!(ty("[str:i32]").is_nil_compatible());
    assert!(TypeDescriptor::trait_of(shape_trait()).is_nil_compatible());
    assert!(!ty("i32").is_nil_compatible());
    assert!(!ty("[2]i32").is_nil_compatible());
}

#[test]
fn test_pointer_compatibility() {
    for spelling in ["*i32", "**str", "*[]u8"] {
        assert!(compatible(&ty(spelling), &ty("nil"), false));
        assert!(compatible(&ty("nil"), &ty(spelling), false));
    }
    assert!(compatible(&ty("*i32"), &ty("*i32"), false));
    assert!(!compatible(&ty("*i32"), &ty("*i64"), false));
    assert!(!compatible(&ty("*i32"), &ty("**i32"), false));
    assert!(!compatible(&ty("*i32"), &ty("i32"), false));
}

#[test]
fn test_slice_map_array_compatibility() {
    assert!(compatible(&ty("[]i32"), &ty("nil"), false));
    assert!(!compatible(&ty("[]i32"), &ty("[]u32"), false));
    assert!(compatible(&ty("[str:i32]"), &ty("[str:i32]"), false));
    assert!(!compatible(&ty("[str:i32]"), &ty("[str:i64]"), false));
    assert!(compatible(&ty("[3]i32"), &ty("[3]i32"), false));
    assert!(!compatible(&ty("[3]i32"), &ty("[4]i32"), false));
    assert!(!compatible(&ty("[3]i32"), &ty("nil"), false));
}

#[test]
fn test_trait_compatibility() {
    let shape = shape_trait();
    let tr = TypeDescriptor::trait_of(Rc::clone(&shape));
    let conforming = TypeDescriptor::structure(square(vec![Rc::clone(&shape)]), vec![]);
    let plain = TypeDescriptor::structure(square(vec![]), vec![]);

    assert!(compatible(&tr, &tr.clone(), false));
    assert!(compatible(&tr, &conforming, false));
    assert!(compatible(&conforming, &tr, false));
    assert!(!compatible(&tr, &plain, false));
    assert!(!compatible(&tr, &ty("nil"), false));
}

#[test]
fn test_struct_identity() {
    let a = TypeDescriptor::structure(square(vec![]), vec![]);
    let b = TypeDescriptor::structure(square(vec![]), vec![]);
    let other_file = TypeDescriptor::structure(Rc::new(StructDecl::new("Square", "other.jn")), vec![]);

    assert!(compatible(&a, &b, false));
    assert!(!compatible(&a, &other_file, false));
    assert!(!compatible(&a, &ty("i32"), false));
}

#[test]
fn test_generic_struct_arguments() {
    let mut decl = StructDecl::new("Box", "box.jn");
    decl.generics = vec![GenericParam::new("T")];
    let decl = Rc::new(decl);

    let of_i32 = TypeDescriptor::structure(Rc::clone(&decl), vec![ty("i32")]);
    let of_i32_again = TypeDescriptor::structure(Rc::clone(&decl), vec![ty("i32")]);
    let of_str = TypeDescriptor::structure(Rc::clone(&decl), vec![ty("str")]);

    assert_eq!(of_i32.name, "Box[i32]");
    assert!(compatible(&of_i32, &of_i32_again, false));
    assert!(!compatible(&of_i32, &of_str, false));
}

#[test]
fn test_enum_compatibility() {
    let color = Rc::new(EnumDecl::new("Color", "c.jn", ty("u8"), &["Red", "Green"]));
    let size = Rc::new(EnumDecl::new("Size", "c.jn", ty("u8"), &["Small"]));
    let c = TypeDescriptor::enumeration(Rc::clone(&color));

    assert!(compatible(&c, &TypeDescriptor::enumeration(color), false));
    assert!(!compatible(&c, &TypeDescriptor::enumeration(size), false));
    assert!(!compatible(&c, &ty("u8"), false));
}

#[test]
fn test_primitive_table_and_any() {
    assert!(compatible(&ty("i32"), &ty("i32"), false));
    assert!(!compatible(&ty("i32"), &ty("i64"), false));
    assert!(!compatible(&ty("str"), &ty("bool"), false));
    assert!(compatible(&ty("any"), &ty("any"), false));
    assert!(!compatible(&ty("any"), &ty("i32"), false));
    assert!(compatible(&ty("any"), &ty("i32"), true));
    assert!(compatible(&ty("str"), &ty("any"), true));
    assert!(compatible(&ty("(i32,str)"), &ty("(i32,str)"), false));
    assert!(!compatible(&ty("(i32,str)"), &ty("(i32,i32)"), false));
}

#[test]
fn test_types_equal() {
    assert!(types_equal(&ty("*i32"), &ty("*i32")));
    assert!(!types_equal(&ty("*i32"), &ty("i32")));
}

#[test]
fn test_copies_are_not_aliased() {
    let original = ty("[]i32");
    let mut copy = original.clone();
    copy.element = Some(Box::new(ty("str")));
    copy.rename();

    assert_eq!(original.to_string(), "[]i32");
    assert_eq!(copy.to_string(), "[]str");
}

#[test]
fn test_instantiate_substitutes_through_structure() {
    let params = vec![GenericParam::new("T"), GenericParam::new("K")];
    let args = vec![ty("i32"), ty("str")];

    let template = TypeDescriptor::map_of(
        TypeDescriptor::generic("K"),
        TypeDescriptor::slice_of(TypeDescriptor::generic("T").pointer_to()),
    );
    assert!(template.has_generics());
    assert!(!template.is_fully_resolved());

    let instance = template.instantiate(&params, &args);
    assert_eq!(instance.to_string(), "[str:[]*i32]");
    assert!(instance.is_fully_resolved());
    assert!(instance.is_map());
}

#[test]
fn test_instantiate_restores_origin() {
    let params = vec![GenericParam::new("T")];
    let template = TypeDescriptor::tuple_of(vec![
        TypeDescriptor::generic("T"),
        TypeDescriptor::array_of(TypeDescriptor::generic("T"), ArraySize::Fixed(2)),
    ]);

    let instance = template.instantiate(&params, &[ty("f64")]);
    assert_eq!(instance.to_string(), "(f64,[2]f64)");
    assert_eq!(instance.restore_origin(), template);

    // Re-specializing goes back to the template first.
    let again = instance.instantiate(&params, &[ty("bool")]);
    assert_eq!(again.to_string(), "(bool,[2]bool)");
    assert_eq!(again.restore_origin(), template);
}

#[test]
fn test_instantiate_function_signature() {
    let params = vec![GenericParam::new("T")];
    let decl = FuncDecl::new(
        "first",
        vec![Param::new("items", TypeDescriptor::slice_of(TypeDescriptor::generic("T")))],
        RetType::new(TypeDescriptor::generic("T")),
    );
    let template = TypeDescriptor::function(Rc::new(decl));
    assert_eq!(template.name, "([]T)T");

    let instance = template.instantiate(&params, &[ty("u16")]);
    assert_eq!(instance.name, "([]u16)u16");
    assert!(instance.is_fully_resolved());
    assert!(TypeDescriptor::generic("T").is_generic_of(&params));
    assert!(!TypeDescriptor::generic("U").is_generic_of(&params));
}

#[test]
fn test_restore_origin_without_origin_is_copy() {
    let t = ty("[]u8");
    assert_eq!(t.restore_origin(), t);
}

#[test]
fn test_infer_auto_size() {
    let mut t = ty("[...]i32");
    t.infer_auto_size(3);
    assert_eq!(t.size, Some(ArraySize::Fixed(3)));
    assert_eq!(t.to_string(), "[3]i32");
    assert!(compatible(&t, &ty("[3]i32"), false));
}
