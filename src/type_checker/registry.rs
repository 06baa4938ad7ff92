use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    ast::types::{PrimitiveType, TypeDescriptor, TypeKind, TypeRef},
    errors::errors::RegistryError,
};

lazy_static! {
    static ref BIN_PATTERN: Regex = Regex::new(r"^0[bB][01]+$").unwrap();
    static ref OCT_PATTERN: Regex = Regex::new(r"^0[0-7]+$").unwrap();
    static ref HEX_PATTERN: Regex = Regex::new(r"^0[xX][0-9A-Fa-f]+$").unwrap();

    /// The built-in types every [`TypeMap`] starts with.
    pub static ref STANDARD_TYPES: HashMap<&'static str, TypeDescriptor> = PrimitiveType::ALL
        .into_iter()
        .map(|primitive| (primitive.name(), TypeDescriptor::primitive(primitive)))
        .collect();
}

pub fn standard_type(name: &str) -> Option<TypeDescriptor> {
    STANDARD_TYPES.get(name).cloned()
}

/// Standard type of a literal as it appears in a token.
///
/// Single-quoted literals of one (possibly escaped) character are `char`,
/// other quoted literals `string`. Numbers are `int` if they fit, then
/// `long`, then `double`.
pub fn standard_type_for(literal: &str) -> Option<TypeDescriptor> {
    if literal.eq_ignore_ascii_case("true") || literal.eq_ignore_ascii_case("false") {
        return standard_type("boolean");
    }

    if literal.len() >= 2 && literal.starts_with('\'') && literal.ends_with('\'') {
        let inner = &literal[1..literal.len() - 1];
        let is_char = inner.chars().count() == 1
            || (inner.starts_with('\\') && inner.chars().count() == 2);
        return standard_type(if is_char { "char" } else { "string" });
    }

    if literal.len() >= 2 && literal.starts_with('"') && literal.ends_with('"') {
        return standard_type("string");
    }

    if BIN_PATTERN.is_match(literal) || OCT_PATTERN.is_match(literal) || HEX_PATTERN.is_match(literal)
    {
        return standard_type("int");
    }

    if !literal.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '+')) {
        return None;
    }

    if literal.parse::<i32>().is_ok() {
        standard_type("int")
    } else if literal.parse::<i64>().is_ok() {
        standard_type("long")
    } else if literal.parse::<f64>().is_ok() {
        standard_type("double")
    } else {
        None
    }
}

/// Resolves names to type descriptors for type inference.
///
/// Only the two lookups are required; the structural queries have default
/// implementations working on the descriptors themselves.
pub trait TypeRegistry {
    /// Declared type of the variable `name`.
    fn variable_type(&self, name: &str) -> Option<TypeDescriptor>;

    /// The type registered under `name`.
    fn named_type(&self, name: &str) -> Option<TypeDescriptor>;

    /// Type of a literal token; unknown unless a registry opts in.
    fn literal_type(&self, _literal: &str) -> Option<TypeDescriptor> {
        None
    }

    fn resolve(&self, reference: &TypeRef) -> Option<TypeDescriptor> {
        match reference {
            TypeRef::Named(name) => self
                .named_type(name)
                .or_else(|| standard_type(name)),
            TypeRef::Resolved(ty) => Some(ty.as_ref().clone()),
        }
    }

    /// Numeric-ness of `ty`, `ambiguous` where it cannot be told.
    fn is_numeric(&self, ty: &TypeDescriptor, ambiguous: bool) -> bool {
        ty.is_numeric(ambiguous)
    }

    fn is_array(&self, ty: &TypeDescriptor) -> bool {
        ty.is_array()
    }

    fn is_record(&self, ty: &TypeDescriptor) -> bool {
        ty.is_record()
    }

    fn element_type(&self, ty: &TypeDescriptor) -> Option<TypeDescriptor> {
        match &ty.kind {
            TypeKind::Array { element, .. } => self.resolve(element),
            _ => None,
        }
    }

    fn pointer_target(&self, ty: &TypeDescriptor) -> Option<TypeDescriptor> {
        match &ty.kind {
            TypeKind::Pointer { target } => self.resolve(target),
            _ => None,
        }
    }

    fn components<'t>(&self, ty: &'t TypeDescriptor) -> Option<&'t [(String, TypeRef)]> {
        match &ty.kind {
            TypeKind::Record { components } => Some(components),
            _ => None,
        }
    }

    fn component_type(&self, ty: &TypeDescriptor, name: &str) -> Option<TypeDescriptor> {
        self.components(ty)?
            .iter()
            .find(|(component, _)| component == name)
            .and_then(|(_, reference)| self.resolve(reference))
    }
}

/// A registry of named types and variable declarations.
///
/// Seeded with the standard types, which can never be redefined.
#[derive(Debug, Clone)]
pub struct TypeMap {
    types: HashMap<String, TypeDescriptor>,
    variables: HashMap<String, TypeDescriptor>,
    literal_typing: bool,
}

impl Default for TypeMap {
    fn default() -> Self {
        TypeMap::new()
    }
}

impl TypeMap {
    pub fn new() -> Self {
        TypeMap {
            types: STANDARD_TYPES
                .iter()
                .map(|(name, ty)| (name.to_string(), ty.clone()))
                .collect(),
            variables: HashMap::new(),
            literal_typing: false,
        }
    }

    /// Whether literals get their [standard type](standard_type_for).
    pub fn with_literal_typing(mut self, enabled: bool) -> Self {
        self.literal_typing = enabled;
        self
    }

    /// Registers `ty` under its name (anonymous types under their canonical
    /// form). Anonymous types and replacements need `force`.
    ///
    /// Returns the replaced entry, if any.
    pub fn register_type(
        &mut self,
        ty: TypeDescriptor,
        force: bool,
    ) -> Result<Option<TypeDescriptor>, RegistryError> {
        let key = match &ty.name {
            Some(name) => name.clone(),
            None if force => ty.canonical(),
            None => return Err(RegistryError::AnonymousType(ty.canonical())),
        };

        if STANDARD_TYPES.contains_key(key.as_str()) {
            return Err(RegistryError::StandardType(key));
        }
        if !force && self.types.contains_key(&key) {
            return Err(RegistryError::DuplicateType(key));
        }

        Ok(self.types.insert(key, ty))
    }

    /// Declares variable `name` of type `ty` and makes sure a named `ty` is
    /// registered, too. Redeclarations and declarations clashing with a
    /// different type of the same name need `force`.
    pub fn declare_variable(
        &mut self,
        name: &str,
        ty: TypeDescriptor,
        force: bool,
    ) -> Result<Option<TypeDescriptor>, RegistryError> {
        if !force {
            if self.variables.contains_key(name) {
                return Err(RegistryError::DuplicateVariable(name.to_string()));
            }
            if let Some(type_name) = &ty.name {
                if self.types.get(type_name).is_some_and(|known| known != &ty) {
                    return Err(RegistryError::DuplicateType(type_name.clone()));
                }
            }
        }

        if let Some(type_name) = &ty.name {
            if !self.types.contains_key(type_name) {
                self.types.insert(type_name.clone(), ty.clone());
            }
        }

        Ok(self.variables.insert(name.to_string(), ty))
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

impl TypeRegistry for TypeMap {
    fn variable_type(&self, name: &str) -> Option<TypeDescriptor> {
        self.variables.get(name).cloned()
    }

    fn named_type(&self, name: &str) -> Option<TypeDescriptor> {
        self.types.get(name).cloned()
    }

    fn literal_type(&self, literal: &str) -> Option<TypeDescriptor> {
        if self.literal_typing {
            standard_type_for(literal)
        } else {
            None
        }
    }
}
