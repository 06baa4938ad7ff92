//! Unit tests for type inference.
//!
//! - Variable lookup and standard literal types
//! - Logical, arithmetic and integral operators
//! - Index, member and pointer operators
//! - Initializers
//! - Registration rules of the type map

use super::{
    inference::{infer_type, is_numeric},
    registry::{standard_type, standard_type_for, TypeMap, TypeRegistry},
};
use crate::{
    ast::{
        ast::ExpressionNode,
        types::{PrimitiveType, TypeDescriptor, TypeKind, TypeRef},
    },
    errors::errors::RegistryError,
    parser::parser::parse_text,
};

fn tree(source: &str) -> ExpressionNode {
    parse_text(source).unwrap().remove(0)
}

fn primitive(primitive: PrimitiveType) -> TypeDescriptor {
    TypeDescriptor::primitive(primitive)
}

fn canonical_of(source: &str, registry: &TypeMap) -> Option<String> {
    infer_type(&tree(source), registry).map(|ty| ty.canonical())
}

fn registry() -> TypeMap {
    let mut map = TypeMap::new();
    let point = TypeDescriptor::record(
        "Point",
        vec![
            ("x".to_string(), TypeRef::named("int")),
            ("y".to_string(), TypeRef::named("double")),
        ],
    );
    map.register_type(point.clone(), false).unwrap();

    map.declare_variable("i", primitive(PrimitiveType::Int), false).unwrap();
    map.declare_variable("n", primitive(PrimitiveType::Long), false).unwrap();
    map.declare_variable("f", primitive(PrimitiveType::Float), false).unwrap();
    map.declare_variable("d", primitive(PrimitiveType::Double), false).unwrap();
    map.declare_variable("s", primitive(PrimitiveType::String), false).unwrap();
    map.declare_variable("b", primitive(PrimitiveType::Boolean), false).unwrap();
    map.declare_variable("p", point.clone(), false).unwrap();
    map.declare_variable("points", TypeDescriptor::array_of(TypeRef::named("Point")), false)
        .unwrap();
    map.declare_variable(
        "matrix",
        TypeDescriptor::array_of(TypeDescriptor::array_of(primitive(PrimitiveType::Double))),
        false,
    )
    .unwrap();
    map.declare_variable("ptr", TypeDescriptor::pointer_to(point), false)
        .unwrap();
    map
}

#[test]
fn test_infer_variables() {
    let registry = registry();

    assert_eq!(canonical_of("i", &registry).as_deref(), Some("int"));
    assert_eq!(canonical_of("p", &registry).as_deref(), Some("Point"));
    assert_eq!(canonical_of("unknown", &registry), None);
}

#[test]
fn test_infer_literals_only_on_demand() {
    assert_eq!(canonical_of("42", &registry()), None);

    let registry = registry().with_literal_typing(true);
    assert_eq!(canonical_of("42", &registry).as_deref(), Some("int"));
    assert_eq!(canonical_of("\"text\"", &registry).as_deref(), Some("string"));
    assert_eq!(canonical_of("i + 1.5", &registry).as_deref(), Some("double"));
}

#[test]
fn test_infer_logical_operators() {
    let registry = registry();

    assert_eq!(canonical_of("i and d", &registry).as_deref(), Some("boolean"));
    assert_eq!(canonical_of("s < i", &registry).as_deref(), Some("boolean"));
    assert_eq!(canonical_of("not x", &registry).as_deref(), Some("boolean"));
    assert_eq!(canonical_of("x && y || z", &registry).as_deref(), Some("boolean"));
}

#[test]
fn test_infer_addition() {
    let registry = registry();

    assert_eq!(canonical_of("i + i", &registry).as_deref(), Some("int"));
    assert_eq!(canonical_of("i + f", &registry).as_deref(), Some("float"));
    assert_eq!(canonical_of("f + d + i", &registry).as_deref(), Some("double"));
    assert_eq!(canonical_of("s + i", &registry).as_deref(), Some("string"));
    assert_eq!(canonical_of("i + n", &registry), None);
    assert_eq!(canonical_of("i + unknown", &registry), None);
}

#[test]
fn test_infer_numeric_operators() {
    let registry = registry();

    assert_eq!(canonical_of("i * i", &registry).as_deref(), Some("int"));
    assert_eq!(canonical_of("i / d", &registry).as_deref(), Some("double"));
    assert_eq!(canonical_of("-f", &registry).as_deref(), Some("float"));
    assert_eq!(canonical_of("s - i", &registry), None);
    assert_eq!(canonical_of("i - n", &registry), None);
}

#[test]
fn test_infer_integral_operators() {
    let registry = registry();

    assert_eq!(canonical_of("n mod n", &registry).as_deref(), Some("long"));
    assert_eq!(canonical_of("n % i", &registry).as_deref(), Some("int"));
    assert_eq!(canonical_of("d shl 2", &registry).as_deref(), Some("int"));
    assert_eq!(canonical_of("i & unknown", &registry).as_deref(), Some("int"));
}

#[test]
fn test_infer_index() {
    let registry = registry();

    assert_eq!(canonical_of("points[i]", &registry).as_deref(), Some("Point"));
    assert_eq!(canonical_of("matrix[0]", &registry).as_deref(), Some("array of double"));
    assert_eq!(canonical_of("matrix[0, 1]", &registry).as_deref(), Some("double"));
    assert_eq!(canonical_of("matrix[0][1]", &registry).as_deref(), Some("double"));
    assert_eq!(canonical_of("i[0]", &registry), None);
    assert_eq!(canonical_of("matrix[0, 1, 2]", &registry), None);
}

#[test]
fn test_infer_member_access() {
    let registry = registry();

    assert_eq!(canonical_of("p.x", &registry).as_deref(), Some("int"));
    assert_eq!(canonical_of("points[1].y", &registry).as_deref(), Some("double"));
    assert_eq!(canonical_of("p.z", &registry), None);
    assert_eq!(canonical_of("i.x", &registry), None);
}

#[test]
fn test_infer_pointer_operators() {
    let registry = registry();

    assert_eq!(canonical_of("*ptr", &registry).as_deref(), Some("Point"));
    assert_eq!(canonical_of("&i", &registry).as_deref(), Some("pointer to int"));
    assert_eq!(canonical_of("*i", &registry), None);

    let address = infer_type(&tree("&p"), &registry).unwrap();
    assert!(address.is_pointer());
    assert!(address.is_anonymous());
}

#[test]
fn test_infer_initializers() {
    let registry = registry();

    assert_eq!(canonical_of("{i, i * 2}", &registry).as_deref(), Some("array of int"));
    assert_eq!(canonical_of("{i, d}", &registry).as_deref(), Some("array of object"));
    assert_eq!(canonical_of("{x, i}", &registry).as_deref(), Some("array of int"));
    assert_eq!(canonical_of("{}", &registry).as_deref(), Some("array of object"));
    assert_eq!(canonical_of("Point{x: 1, y: 2}", &registry).as_deref(), Some("Point"));
    assert_eq!(canonical_of("f(x)", &registry), None);

    let array = infer_type(&tree("{1, 2, 3}"), &registry).unwrap();
    assert!(matches!(array.kind, TypeKind::Array { size: Some(3), .. }));
}

#[test]
fn test_is_numeric() {
    let registry = registry();

    assert!(is_numeric(&tree("i + i"), &registry, false));
    assert!(!is_numeric(&tree("i + 1"), &registry, false));
    assert!(!is_numeric(&tree("s"), &registry, true));
    assert!(!is_numeric(&tree("b"), &registry, true));
    assert!(is_numeric(&tree("unknown"), &registry, true));
    assert!(!is_numeric(&tree("unknown"), &registry, false));
    assert!(!is_numeric(&tree("i < 2"), &registry, true));
}

#[test]
fn test_standard_type_for_literals() {
    let name = |literal: &str| standard_type_for(literal).map(|ty| ty.canonical());

    assert_eq!(name("true").as_deref(), Some("boolean"));
    assert_eq!(name("FALSE").as_deref(), Some("boolean"));
    assert_eq!(name("'a'").as_deref(), Some("char"));
    assert_eq!(name("'\\n'").as_deref(), Some("char"));
    assert_eq!(name("'ab'").as_deref(), Some("string"));
    assert_eq!(name("\"ab\"").as_deref(), Some("string"));
    assert_eq!(name("0x1F").as_deref(), Some("int"));
    assert_eq!(name("0b101").as_deref(), Some("int"));
    assert_eq!(name("0XFF").as_deref(), Some("int"));
    assert_eq!(name("0B101").as_deref(), Some("int"));
    assert_eq!(name("017").as_deref(), Some("int"));
    assert_eq!(name("42").as_deref(), Some("int"));
    assert_eq!(name("4200000000").as_deref(), Some("long"));
    assert_eq!(name("1.5e3").as_deref(), Some("double"));
    assert_eq!(name("abc"), None);
    assert_eq!(name("inf"), None);
}

#[test]
fn test_type_map_registration_rules() {
    let mut map = TypeMap::new();

    assert_eq!(
        map.register_type(primitive(PrimitiveType::Int), true),
        Err(RegistryError::StandardType("int".to_string()))
    );

    let anonymous = TypeDescriptor::array_of(TypeRef::named("int"));
    assert_eq!(
        map.register_type(anonymous.clone(), false),
        Err(RegistryError::AnonymousType("array of int".to_string()))
    );
    assert_eq!(map.register_type(anonymous, true), Ok(None));
    assert!(map.named_type("array of int").is_some());

    let color = TypeDescriptor::enumeration("Color", vec!["red".to_string(), "green".to_string()]);
    assert_eq!(map.register_type(color.clone(), false), Ok(None));
    assert_eq!(
        map.register_type(color.clone(), false),
        Err(RegistryError::DuplicateType("Color".to_string()))
    );
    assert_eq!(map.register_type(color.clone(), true), Ok(Some(color)));
}

#[test]
fn test_type_map_variable_declarations() {
    let mut map = TypeMap::new();
    let rgb = TypeDescriptor::record("Rgb", vec![("r".to_string(), TypeRef::named("byte"))]);

    assert_eq!(map.declare_variable("c", rgb.clone(), false), Ok(None));
    assert!(map.is_declared("c"));
    assert_eq!(map.named_type("Rgb"), Some(rgb.clone()));
    assert_eq!(
        map.declare_variable("c", primitive(PrimitiveType::Int), false),
        Err(RegistryError::DuplicateVariable("c".to_string()))
    );

    let other = TypeDescriptor::record("Rgb", vec![]);
    assert_eq!(
        map.declare_variable("d", other, false),
        Err(RegistryError::DuplicateType("Rgb".to_string()))
    );
    assert_eq!(
        map.declare_variable("c", primitive(PrimitiveType::Int), true),
        Ok(Some(rgb))
    );
}

#[test]
fn test_standard_types_are_seeded() {
    let map = TypeMap::default();

    for primitive in PrimitiveType::ALL {
        assert_eq!(map.named_type(primitive.name()), standard_type(primitive.name()));
    }
    assert_eq!(map.type_names().count(), PrimitiveType::ALL.len());
}
