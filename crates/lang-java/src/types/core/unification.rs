//! Type substitution.
//!
//! Replaces a declaring type's parameters with the arguments of a concrete
//! parameterization.

use super::types::TypeParameter;
use stachec_api::models::TypeRef;
use std::collections::HashMap;

/// A map from type variables to concrete types.
#[derive(Debug, Default, Clone)]
pub struct Substitution {
    map: HashMap<String, TypeRef>,
}

impl Substitution {
    /// Create a new empty substitution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair declared parameters with type arguments, position by position.
    pub fn from_parameters(parameters: &[TypeParameter], args: &[TypeRef]) -> Self {
        let mut subst = Self::new();
        for (param, arg) in parameters.iter().zip(args) {
            subst.insert(param.name.clone(), arg.clone());
        }
        subst
    }

    /// Add a mapping.
    pub fn insert(&mut self, var: String, ty: TypeRef) {
        self.map.insert(var, ty);
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Apply this substitution to a type.
    pub fn apply(&self, ty: &TypeRef) -> TypeRef {
        match ty {
            TypeRef::Id(name) => {
                if let Some(sub) = self.map.get(name) {
                    sub.clone()
                } else {
                    ty.clone()
                }
            }
            TypeRef::Array {
                element,
                dimensions,
            } => match self.apply(element) {
                // T[] with T := String[] is String[][]
                TypeRef::Array {
                    element: inner,
                    dimensions: inner_dimensions,
                } => TypeRef::Array {
                    element: inner,
                    dimensions: dimensions + inner_dimensions,
                },
                substituted => TypeRef::Array {
                    element: Box::new(substituted),
                    dimensions: *dimensions,
                },
            },
            TypeRef::Generic { base, args } => TypeRef::Generic {
                base: base.clone(),
                args: args.iter().map(|arg| self.apply(arg)).collect(),
            },
            TypeRef::Wildcard {
                bound,
                is_upper_bound,
            } => TypeRef::Wildcard {
                bound: bound.as_ref().map(|b| Box::new(self.apply(b))),
                is_upper_bound: *is_upper_bound,
            },
            // Primitives and others remain unchanged
            _ => ty.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_nested_variables() {
        let subst = Substitution::from_parameters(
            &[TypeParameter::new("K"), TypeParameter::new("V")],
            &[TypeRef::id("java.lang.String"), TypeRef::id("Item")],
        );
        let ty = TypeRef::generic(
            "java.util.Map",
            vec![TypeRef::id("K"), TypeRef::extends(TypeRef::id("V"))],
        );
        assert_eq!(
            subst.apply(&ty),
            TypeRef::generic(
                "java.util.Map",
                vec![
                    TypeRef::id("java.lang.String"),
                    TypeRef::extends(TypeRef::id("Item"))
                ]
            )
        );
    }

    #[test]
    fn test_apply_merges_array_dimensions() {
        let mut subst = Substitution::new();
        subst.insert("T".into(), TypeRef::array(TypeRef::raw("int")));
        assert_eq!(
            subst.apply(&TypeRef::array(TypeRef::id("T"))).to_string(),
            "int[][]"
        );
    }

    #[test]
    fn test_base_is_never_substituted() {
        let mut subst = Substitution::new();
        subst.insert("java.util.List".into(), TypeRef::id("Wrong"));
        let ty = TypeRef::generic("java.util.List", vec![]);
        assert_eq!(subst.apply(&ty), ty);
    }
}
