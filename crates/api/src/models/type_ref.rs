use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A type as seen by the template compiler.
///
/// Mirrors the shapes of the Java type system that templates can reach:
/// primitives, declared (possibly generic) types, arrays and wildcards.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(tag = "kind", content = "data")]
pub enum TypeRef {
    /// Primitive type name (e.g., "int", "boolean", "void")
    Raw(String),

    /// Declared type or type variable, by FQN (e.g., "java.lang.String", "T")
    Id(String),

    /// Generic instantiation (e.g., java.util.List<java.lang.String>)
    Generic {
        base: Box<TypeRef>,
        args: Vec<TypeRef>,
    },

    /// Array type (e.g., String[])
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },

    /// Wildcard type (e.g., ? extends Number)
    Wildcard {
        bound: Option<Box<TypeRef>>,
        is_upper_bound: bool, // true: extends, false: super
    },

    Unknown,
}

impl TypeRef {
    /// Helper to create a Raw type
    pub fn raw(s: impl Into<String>) -> Self {
        TypeRef::Raw(s.into())
    }

    /// Helper to create an Id type
    pub fn id(s: impl Into<String>) -> Self {
        TypeRef::Id(s.into())
    }

    /// Helper to create a generic instantiation of `base`
    pub fn generic(base: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Generic {
            base: Box::new(TypeRef::Id(base.into())),
            args,
        }
    }

    /// One-dimensional array of `element`. Arrays of arrays collapse into dimensions.
    pub fn array(element: TypeRef) -> Self {
        match element {
            TypeRef::Array {
                element,
                dimensions,
            } => TypeRef::Array {
                element,
                dimensions: dimensions + 1,
            },
            other => TypeRef::Array {
                element: Box::new(other),
                dimensions: 1,
            },
        }
    }

    /// `?`
    pub fn wildcard() -> Self {
        TypeRef::Wildcard {
            bound: None,
            is_upper_bound: true,
        }
    }

    /// `? extends bound`
    pub fn extends(bound: TypeRef) -> Self {
        TypeRef::Wildcard {
            bound: Some(Box::new(bound)),
            is_upper_bound: true,
        }
    }

    /// `? super bound`
    pub fn super_of(bound: TypeRef) -> Self {
        TypeRef::Wildcard {
            bound: Some(Box::new(bound)),
            is_upper_bound: false,
        }
    }

    /// FQN of the declared type behind this reference, if any.
    pub fn base_fqn(&self) -> Option<&str> {
        match self {
            TypeRef::Id(fqn) => Some(fqn),
            TypeRef::Generic { base, .. } => base.base_fqn(),
            _ => None,
        }
    }

    /// Type arguments of a generic instantiation; empty for everything else.
    pub fn type_args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Generic { args, .. } => args,
            _ => &[],
        }
    }

    /// Component type of an array, one dimension down.
    pub fn component_type(&self) -> Option<TypeRef> {
        match self {
            TypeRef::Array {
                element,
                dimensions,
            } if *dimensions > 1 => Some(TypeRef::Array {
                element: element.clone(),
                dimensions: dimensions - 1,
            }),
            TypeRef::Array { element, .. } => Some(element.as_ref().clone()),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Raw(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array { .. })
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, TypeRef::Wildcard { .. })
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::Unknown
    }
}

/// Renders the type as Java source text.
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Raw(name) | TypeRef::Id(name) => f.write_str(name),
            TypeRef::Generic { base, args } => {
                write!(f, "{}<", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
            TypeRef::Array {
                element,
                dimensions,
            } => {
                write!(f, "{}", element)?;
                for _ in 0..*dimensions {
                    f.write_str("[]")?;
                }
                Ok(())
            }
            TypeRef::Wildcard {
                bound: None, ..
            } => f.write_str("?"),
            TypeRef::Wildcard {
                bound: Some(bound),
                is_upper_bound: true,
            } => write!(f, "? extends {}", bound),
            TypeRef::Wildcard {
                bound: Some(bound),
                is_upper_bound: false,
            } => write!(f, "? super {}", bound),
            TypeRef::Unknown => f.write_str("<unknown>"),
        }
    }
}
