//! Type descriptors consulted and produced by type inference.
//!
//! - Primitive types (integers, floating point, characters, strings, booleans)
//! - Structured types (arrays, records, pointers, enumerations)
//! - References to types that are only known by name
//!
//! Two descriptors describe the same type if their [canonical forms](TypeDescriptor::canonical)
//! agree.

use std::fmt::Display;

/// Represents the built-in primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Boolean,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
        PrimitiveType::Char,
        PrimitiveType::String,
        PrimitiveType::Boolean,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Char => "char",
            PrimitiveType::String => "string",
            PrimitiveType::Boolean => "boolean",
        }
    }

    pub fn from_name(name: &str) -> Option<PrimitiveType> {
        PrimitiveType::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integral() || self.is_floating()
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, PrimitiveType::Float | PrimitiveType::Double)
    }

    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Int | PrimitiveType::Long
        )
    }
}

/// A reference to a component, element or target type.
///
/// Declarations often mention a type only by name; such references are
/// resolved against a [`TypeRegistry`](crate::type_checker::registry::TypeRegistry).
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Named(String),
    Resolved(Box<TypeDescriptor>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn canonical(&self) -> String {
        match self {
            TypeRef::Named(name) => name.clone(),
            TypeRef::Resolved(ty) => ty.canonical(),
        }
    }
}

impl From<TypeDescriptor> for TypeRef {
    fn from(ty: TypeDescriptor) -> Self {
        TypeRef::Resolved(Box::new(ty))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Primitive(PrimitiveType),
    Array {
        element: TypeRef,
        /// Number of elements, `None` if unknown or flexible
        size: Option<usize>,
        /// Index of the first element
        offset: i64,
    },
    Record {
        components: Vec<(String, TypeRef)>,
    },
    Pointer {
        target: TypeRef,
    },
    Enum {
        items: Vec<String>,
    },
    /// The generic type every value conforms to
    Object,
    /// Placeholder for a type that could not be determined
    Unresolved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// `None` for anonymous (synthesized or inline) types
    pub name: Option<String>,
    pub kind: TypeKind,
}

impl TypeDescriptor {
    pub fn primitive(primitive: PrimitiveType) -> Self {
        TypeDescriptor {
            name: Some(primitive.name().to_string()),
            kind: TypeKind::Primitive(primitive),
        }
    }

    pub fn array_of(element: impl Into<TypeRef>) -> Self {
        TypeDescriptor {
            name: None,
            kind: TypeKind::Array {
                element: element.into(),
                size: None,
                offset: 0,
            },
        }
    }

    pub fn record(name: impl Into<String>, components: Vec<(String, TypeRef)>) -> Self {
        TypeDescriptor {
            name: Some(name.into()),
            kind: TypeKind::Record { components },
        }
    }

    pub fn pointer_to(target: impl Into<TypeRef>) -> Self {
        TypeDescriptor {
            name: None,
            kind: TypeKind::Pointer {
                target: target.into(),
            },
        }
    }

    pub fn enumeration(name: impl Into<String>, items: Vec<String>) -> Self {
        TypeDescriptor {
            name: Some(name.into()),
            kind: TypeKind::Enum { items },
        }
    }

    pub fn object() -> Self {
        TypeDescriptor {
            name: Some("object".to_string()),
            kind: TypeKind::Object,
        }
    }

    pub fn unresolved() -> Self {
        TypeDescriptor {
            name: None,
            kind: TypeKind::Unresolved,
        }
    }

    /// Gives an anonymous descriptor a name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    /// Structural form used to compare types: arrays and pointers are spelled
    /// out, records and enumerations are compared by name.
    pub fn canonical(&self) -> String {
        match &self.kind {
            TypeKind::Primitive(primitive) => primitive.name().to_string(),
            TypeKind::Array { element, .. } => format!("array of {}", element.canonical()),
            TypeKind::Pointer { target } => format!("pointer to {}", target.canonical()),
            TypeKind::Record { components } => match &self.name {
                Some(name) => name.clone(),
                None => {
                    let comps: Vec<String> = components
                        .iter()
                        .map(|(name, ty)| format!("{}: {}", name, ty.canonical()))
                        .collect();
                    format!("record{{{}}}", comps.join("; "))
                }
            },
            TypeKind::Enum { items } => match &self.name {
                Some(name) => name.clone(),
                None => format!("enum{{{}}}", items.join(", ")),
            },
            TypeKind::Object => "object".to_string(),
            TypeKind::Unresolved => "???".to_string(),
        }
    }

    pub fn same_as(&self, other: &TypeDescriptor) -> bool {
        self == other || self.canonical() == other.canonical()
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self.kind {
            TypeKind::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    /// Whether values of this type are numbers. `ambiguous` is returned for
    /// types whose numeric nature cannot be told.
    pub fn is_numeric(&self, ambiguous: bool) -> bool {
        match &self.kind {
            TypeKind::Primitive(primitive) => primitive.is_numeric(),
            TypeKind::Object | TypeKind::Unresolved => ambiguous,
            _ => false,
        }
    }

    pub fn is_floating(&self) -> bool {
        self.as_primitive().is_some_and(|p| p.is_floating())
    }

    pub fn is_string(&self) -> bool {
        self.as_primitive() == Some(PrimitiveType::String)
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array { .. })
    }

    pub fn is_record(&self) -> bool {
        matches!(self.kind, TypeKind::Record { .. })
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, TypeKind::Pointer { .. })
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.canonical()),
        }
    }
}
