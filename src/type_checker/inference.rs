//! Best-effort static typing of expression trees.
//!
//! Inference never fails: whatever cannot be told from the registry is
//! `None`. Synthesized types (arrays of initializer elements, pointers)
//! are returned to the caller and not registered anywhere.

use log::debug;

use crate::ast::{
    ast::{ExpressionNode, NodeKind, INDEX_OPERATOR, MEMBER_OPERATOR},
    types::{PrimitiveType, TypeDescriptor, TypeKind},
};

use super::registry::TypeRegistry;

/// Operators whose result is always boolean.
pub const LOGICAL_OPERATORS: [&str; 14] = [
    "=", "==", "!=", "<>", "<", ">", "<=", ">=", "and", "or", "not", "!", "&&", "||",
];

/// Operators yielding integers unless all operands share a numeric type.
pub const INTEGRAL_OPERATORS: [&str; 12] = [
    "%", "div", "mod", "<<", ">>", ">>>", "shl", "shr", "|", "&", "^", "xor",
];

/// Operators that promote to floating point on mixed numeric operands.
pub const NUMERIC_OPERATORS: [&str; 5] = ["-", "*", "/", "+1", "-1"];

pub fn infer_type<R: TypeRegistry + ?Sized>(
    node: &ExpressionNode,
    registry: &R,
) -> Option<TypeDescriptor> {
    match node.kind {
        NodeKind::Literal => registry.literal_type(&node.text),
        NodeKind::Variable => registry.variable_type(&node.text),
        NodeKind::RecordInitializer => registry.named_type(&node.text),
        NodeKind::ArrayInitializer => Some(infer_array_initializer(node, registry)),
        NodeKind::Operator => infer_operator(node, registry),
        // No signature table for functions yet
        NodeKind::FunctionCall | NodeKind::Component => None,
    }
}

/// Whether `node` is numeric; `treat_unknown_as_true` decides if the type
/// cannot be told.
pub fn is_numeric<R: TypeRegistry + ?Sized>(
    node: &ExpressionNode,
    registry: &R,
    treat_unknown_as_true: bool,
) -> bool {
    match infer_type(node, registry) {
        Some(ty) => registry.is_numeric(&ty, treat_unknown_as_true),
        None => treat_unknown_as_true,
    }
}

fn infer_operator<R: TypeRegistry + ?Sized>(
    node: &ExpressionNode,
    registry: &R,
) -> Option<TypeDescriptor> {
    let symbol = node.text.to_ascii_lowercase();

    if LOGICAL_OPERATORS.contains(&symbol.as_str()) {
        return Some(standard(registry, PrimitiveType::Boolean));
    }

    match symbol.as_str() {
        INDEX_OPERATOR => infer_index(node, registry),
        MEMBER_OPERATOR => infer_member(node, registry),
        "*1" => {
            let pointer = infer_type(node.children.first()?, registry)?;
            registry.pointer_target(&pointer)
        }
        "&1" => {
            let target = infer_type(node.children.first()?, registry)?;
            Some(TypeDescriptor::pointer_to(target))
        }
        _ => infer_arithmetic(&symbol, node, registry),
    }
}

fn infer_arithmetic<R: TypeRegistry + ?Sized>(
    symbol: &str,
    node: &ExpressionNode,
    registry: &R,
) -> Option<TypeDescriptor> {
    let operand_types: Vec<Option<TypeDescriptor>> = node
        .children
        .iter()
        .map(|child| infer_type(child, registry))
        .collect();
    let known: Vec<&TypeDescriptor> = operand_types.iter().flatten().collect();

    let first = known.first().copied();
    let all_same = !operand_types.is_empty()
        && known.len() == operand_types.len()
        && first.is_some_and(|first| known.iter().all(|ty| ty.same_as(first)));
    let all_numeric = known.iter().all(|ty| registry.is_numeric(ty, true));

    let string_type = known.iter().find(|ty| ty.is_string()).copied();
    let float_type = known
        .iter()
        .find(|ty| ty.as_primitive() == Some(PrimitiveType::Double))
        .or_else(|| known.iter().find(|ty| ty.is_floating()))
        .copied();

    let result = match symbol {
        "+" if all_same => first,
        "+" => string_type.or(float_type),
        _ if INTEGRAL_OPERATORS.contains(&symbol) => {
            if all_same && all_numeric {
                first
            } else {
                return Some(standard(registry, PrimitiveType::Int));
            }
        }
        _ if NUMERIC_OPERATORS.contains(&symbol) && all_numeric => {
            if all_same {
                first
            } else {
                float_type
            }
        }
        _ => None,
    };

    debug!(
        "`{}` over {:?} gives {:?}",
        symbol,
        known.iter().map(|ty| ty.canonical()).collect::<Vec<_>>(),
        result.map(|ty| ty.canonical())
    );
    result.cloned()
}

/// `a[i, j]` descends one element level per index.
fn infer_index<R: TypeRegistry + ?Sized>(
    node: &ExpressionNode,
    registry: &R,
) -> Option<TypeDescriptor> {
    let (array, indices) = node.children.split_first()?;
    let mut ty = infer_type(array, registry)?;

    for _ in indices {
        if !registry.is_array(&ty) {
            return None;
        }
        ty = registry.element_type(&ty)?;
    }

    Some(ty)
}

fn infer_member<R: TypeRegistry + ?Sized>(
    node: &ExpressionNode,
    registry: &R,
) -> Option<TypeDescriptor> {
    let [record, component] = node.children.as_slice() else {
        return None;
    };
    let ty = infer_type(record, registry)?;

    if registry.is_record(&ty) {
        registry.component_type(&ty, &component.text)
    } else {
        None
    }
}

fn infer_array_initializer<R: TypeRegistry + ?Sized>(
    node: &ExpressionNode,
    registry: &R,
) -> TypeDescriptor {
    let element_types: Vec<TypeDescriptor> = node
        .children
        .iter()
        .filter_map(|child| infer_type(child, registry))
        .collect();

    let element = match element_types.split_first() {
        Some((first, rest)) if rest.iter().all(|ty| ty.same_as(first)) => first.clone(),
        _ => registry
            .named_type("object")
            .unwrap_or_else(TypeDescriptor::object),
    };

    TypeDescriptor {
        name: None,
        kind: TypeKind::Array {
            element: element.into(),
            size: Some(node.children.len()),
            offset: 0,
        },
    }
}

fn standard<R: TypeRegistry + ?Sized>(registry: &R, primitive: PrimitiveType) -> TypeDescriptor {
    registry
        .named_type(primitive.name())
        .unwrap_or_else(|| TypeDescriptor::primitive(primitive))
}
