//! Data structures describing declared types and their members.
//!
//! These are pure data types with no behavior logic.

use stachec_api::models::TypeRef;

/// Information about a type (class, interface, enum, etc.)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Fully qualified name, e.g., "java.util.List"
    pub fqn: String,
    /// Kind of type
    pub kind: TypeKind,
    /// Modifiers like public, abstract, final
    pub modifiers: Vec<String>,
    /// Generic type parameters, e.g., `<T, U extends Comparable<T>>`
    pub type_parameters: Vec<TypeParameter>,
}

/// Kind of type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

/// A generic type parameter declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    /// Parameter name, e.g., "T"
    pub name: String,
    /// Upper bounds, e.g., `Comparable<T>` for `T extends Comparable<T>`
    pub bounds: Vec<TypeRef>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: vec![],
        }
    }
}

/// Information about a member (field, method, constructor)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    /// Simple name, e.g., "get" or "size"
    pub name: String,
    /// Fully qualified name, e.g., "java.util.List#get"
    pub fqn: String,
    /// Kind of member
    pub kind: MemberKind,
    /// The type that declares this member (may differ from lookup type due to inheritance)
    pub declaring_type: String,
    /// Field type or method return type, in terms of the declaring type's parameters
    pub type_ref: TypeRef,
    /// Method parameters (None for fields)
    pub parameters: Option<Vec<ParameterInfo>>,
    /// Modifiers like public, static, final
    pub modifiers: Vec<String>,
    /// Exception types in the method's `throws` clause
    pub throws: Vec<TypeRef>,
}

impl MemberInfo {
    pub fn is_static(&self) -> bool {
        self.has_modifier("static")
    }

    pub fn is_private(&self) -> bool {
        self.has_modifier("private")
    }

    /// Number of declared parameters; zero for fields.
    pub fn arity(&self) -> usize {
        self.parameters.as_ref().map_or(0, |p| p.len())
    }

    fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }
}

/// Kind of member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
}

/// Information about a method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    /// Parameter name (may be synthetic like "arg0")
    pub name: String,
    /// Parameter type
    pub type_ref: TypeRef,
    /// True when this parameter is declared with `...` varargs syntax.
    pub is_varargs: bool,
}
