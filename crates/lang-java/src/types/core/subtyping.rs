//! Subtyping rules implementation.
//!
//! Determines if one type is a subtype of another.
//! Supports:
//! - Identity
//! - Primitives (widening)
//! - Classes (extends) and interfaces (implements)
//! - Parameterized types with wildcard containment
//! - Arrays (covariant for reference components)

use super::type_system::{JAVA_LANG_OBJECT, JavaTypeSystem};
use stachec_api::models::TypeRef;

const ARRAY_SUPERINTERFACES: &[&str] = &["java.lang.Cloneable", "java.io.Serializable"];

/// Check if `sub` is a subtype of `super_type`.
pub fn is_subtype<T: JavaTypeSystem + ?Sized>(sub: &TypeRef, super_type: &TypeRef, ts: &T) -> bool {
    // 1. Reflexivity
    if ts.is_same_type(sub, super_type) {
        return true;
    }

    match (sub, super_type) {
        (TypeRef::Unknown, _) | (_, TypeRef::Unknown) => false,

        // A wildcard stands for its upper bound
        (TypeRef::Wildcard { .. }, _) => match ts.upper_bound(sub) {
            Some(bound) => is_subtype(&bound, super_type, ts),
            None => is_object(super_type),
        },

        // 2. java.lang.Object is supertype of all reference types the type system knows
        (_, TypeRef::Id(id)) if id == JAVA_LANG_OBJECT => is_known_reference(sub, ts),

        // Primitive widening
        (TypeRef::Raw(s1), TypeRef::Raw(s2)) => is_primitive_subtype(s1, s2),
        (TypeRef::Raw(_), _) | (_, TypeRef::Raw(_)) => false,

        // Arrays (Covariant for references)
        (TypeRef::Array { .. }, TypeRef::Array { .. }) => {
            match (sub.component_type(), super_type.component_type()) {
                (Some(c1), Some(c2)) if c1.is_primitive() || c2.is_primitive() => c1 == c2,
                (Some(c1), Some(c2)) => is_subtype(&c1, &c2, ts),
                _ => false,
            }
        }
        (TypeRef::Array { .. }, TypeRef::Id(id)) => ARRAY_SUPERINTERFACES.contains(&id.as_str()),

        // Class/Interface hierarchy against a raw supertype
        (TypeRef::Id(_) | TypeRef::Generic { .. }, TypeRef::Id(super_id)) => {
            sub.base_fqn()
                .is_some_and(|sub_id| is_class_subtype(sub_id, super_id, ts))
        }

        // Parameterized supertype: find the inherited parameterization and
        // check every argument for containment
        (TypeRef::Id(_) | TypeRef::Generic { .. }, TypeRef::Generic { args, .. }) => {
            let Some(super_id) = super_type.base_fqn() else {
                return false;
            };
            match ts.as_supertype(sub, super_id) {
                Some(TypeRef::Generic {
                    args: sub_args, ..
                }) => {
                    sub_args.len() == args.len()
                        && sub_args
                            .iter()
                            .zip(args.iter())
                            .all(|(a, b)| is_contained(a, b, ts))
                }
                // Raw subtype: only the all-wildcard parameterization accepts it
                Some(_) => args.iter().all(is_unbounded_wildcard),
                None => false,
            }
        }

        _ => false,
    }
}

/// Type argument containment (`T <= ? extends S` and friends).
fn is_contained<T: JavaTypeSystem + ?Sized>(arg: &TypeRef, bound: &TypeRef, ts: &T) -> bool {
    match bound {
        TypeRef::Wildcard { bound: None, .. } => true,
        TypeRef::Wildcard {
            bound: Some(upper),
            is_upper_bound: true,
        } => is_subtype(arg, upper, ts),
        TypeRef::Wildcard {
            bound: Some(lower),
            is_upper_bound: false,
        } => match arg {
            TypeRef::Wildcard {
                bound: Some(arg_lower),
                is_upper_bound: false,
            } => is_subtype(lower, arg_lower, ts),
            TypeRef::Wildcard { .. } => false,
            _ => is_subtype(lower, arg, ts),
        },
        _ => ts.is_same_type(arg, bound),
    }
}

fn is_unbounded_wildcard(ty: &TypeRef) -> bool {
    matches!(ty, TypeRef::Wildcard { bound: None, .. })
}

fn is_object(ty: &TypeRef) -> bool {
    matches!(ty, TypeRef::Id(id) if id == JAVA_LANG_OBJECT)
}

/// Arrays and declared types the type system can describe. Type variables
/// and names it has never heard of are not known references.
fn is_known_reference<T: JavaTypeSystem + ?Sized>(ty: &TypeRef, ts: &T) -> bool {
    match ty {
        TypeRef::Array { .. } => true,
        TypeRef::Id(_) | TypeRef::Generic { .. } => ty
            .base_fqn()
            .is_some_and(|fqn| fqn == JAVA_LANG_OBJECT || ts.get_type_info(fqn).is_some()),
        _ => false,
    }
}

fn is_primitive_subtype(sub: &str, sup: &str) -> bool {
    match sub {
        "byte" => matches!(sup, "short" | "int" | "long" | "float" | "double"),
        "short" => matches!(sup, "int" | "long" | "float" | "double"),
        "char" => matches!(sup, "int" | "long" | "float" | "double"),
        "int" => matches!(sup, "long" | "float" | "double"),
        "long" => matches!(sup, "float" | "double"),
        "float" => matches!(sup, "double"),
        _ => false,
    }
}

fn is_class_subtype<T: JavaTypeSystem + ?Sized>(sub_fqn: &str, super_fqn: &str, ts: &T) -> bool {
    if sub_fqn == super_fqn {
        return true;
    }

    // BFS search up the hierarchy
    ts.walk_ancestors(sub_fqn)
        .any(|ancestor| ancestor == super_fqn)
}
