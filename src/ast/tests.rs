//! Unit tests for the AST module.

use super::{
    ast::{arity_of, is_unary_symbol, unary_key, written_symbol, ExpressionNode, NodeKind},
    types::{PrimitiveType, TypeDescriptor, TypeRef},
};
use crate::Position;

#[test]
fn test_unary_symbols() {
    assert_eq!(unary_key("-"), "-1");
    assert!(is_unary_symbol("-1"));
    assert!(is_unary_symbol("&1"));
    assert!(is_unary_symbol("not"));
    assert!(is_unary_symbol("NOT"));
    assert!(!is_unary_symbol("-"));
    assert!(!is_unary_symbol("/1"));

    assert_eq!(written_symbol("*1"), "*");
    assert_eq!(written_symbol("not"), "not");
}

#[test]
fn test_arity() {
    assert_eq!(arity_of("+"), Some(2));
    assert_eq!(arity_of("+1"), Some(1));
    assert_eq!(arity_of("!"), Some(1));
    assert_eq!(arity_of("."), Some(2));
    assert_eq!(arity_of("[]"), None);
}

#[test]
fn test_node_constructors() {
    let x = ExpressionNode::variable("x", Position(1));
    let sign = ExpressionNode::unary("-", x.clone(), Position(0));

    assert_eq!(sign.kind, NodeKind::Operator);
    assert_eq!(sign.text, "-1");
    assert!(sign.is_unary());
    assert_eq!(sign.operator_symbol(), "-");

    let negation = ExpressionNode::unary("not", x.clone(), Position(0));
    assert_eq!(negation.text, "not");
    assert!(negation.is_unary());

    let sum = ExpressionNode::binary("+", x.clone(), ExpressionNode::literal("1", Position(3)), Position(1));
    assert!(!sum.is_unary());
    assert_eq!(sum.operator_symbol(), "+");
    assert_eq!(sum.children.len(), 2);

    let index = ExpressionNode::index(x.clone(), vec![ExpressionNode::literal("0", Position(3))], Position(1));
    assert_eq!(index.text, "[]");
    assert_eq!(index.children.len(), 2);

    let record = ExpressionNode::record_initializer(
        "Point",
        vec![ExpressionNode::component("x", ExpressionNode::literal("1", Position(4)), Position(2))],
        Position(0),
    );
    assert_eq!(record.children[0].kind, NodeKind::Component);
    assert_eq!(record.children[0].children[0].kind, NodeKind::Literal);
}

#[test]
fn test_node_display() {
    let node = ExpressionNode::binary(
        "*",
        ExpressionNode::binary(
            "+",
            ExpressionNode::variable("a", Position(1)),
            ExpressionNode::variable("b", Position(3)),
            Position(1),
        ),
        ExpressionNode::variable("c", Position(6)),
        Position(1),
    );

    assert_eq!(node.to_string(), "(a + b) * c");
}

#[test]
fn test_type_canonical_forms() {
    let int = TypeDescriptor::primitive(PrimitiveType::Int);

    assert_eq!(int.canonical(), "int");
    assert_eq!(TypeDescriptor::array_of(int.clone()).canonical(), "array of int");
    assert_eq!(
        TypeDescriptor::array_of(TypeRef::named("int")).canonical(),
        "array of int"
    );
    assert_eq!(
        TypeDescriptor::pointer_to(TypeRef::named("Point")).canonical(),
        "pointer to Point"
    );
    assert_eq!(
        TypeDescriptor::record("Point", vec![]).canonical(),
        "Point"
    );
    assert!(TypeDescriptor::array_of(int.clone())
        .same_as(&TypeDescriptor::array_of(TypeRef::named("int"))));
    assert_eq!(TypeDescriptor::array_of(int.clone()).to_string(), "array of int");
    assert_eq!(
        TypeDescriptor::array_of(int).named("Vector").to_string(),
        "Vector"
    );
}

#[test]
fn test_type_predicates() {
    let double = TypeDescriptor::primitive(PrimitiveType::Double);

    assert!(double.is_numeric(false));
    assert!(double.is_floating());
    assert!(!TypeDescriptor::primitive(PrimitiveType::Char).is_numeric(true));
    assert!(TypeDescriptor::object().is_numeric(true));
    assert!(!TypeDescriptor::object().is_numeric(false));
    assert!(TypeDescriptor::primitive(PrimitiveType::String).is_string());
    assert_eq!(PrimitiveType::from_name("long"), Some(PrimitiveType::Long));
    assert_eq!(PrimitiveType::from_name("integer"), None);
}
