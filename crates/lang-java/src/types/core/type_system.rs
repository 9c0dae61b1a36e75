//! Core trait definitions for the type system abstraction.
//!
//! These traits abstract away the host compiler, allowing the resolver to
//! work with an annotation-processing environment, stubs, or mock
//! implementations.

use super::types::{MemberInfo, TypeInfo};
use super::unification::Substitution;
use stachec_api::models::TypeRef;
use std::collections::{HashSet, VecDeque};

pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";

/// Supertype chains longer than this are treated as cyclic.
const MAX_HIERARCHY_DEPTH: usize = 64;

/// Provides type information by FQN.
pub trait TypeProvider: Send + Sync {
    /// Get type info for a fully qualified name.
    ///
    /// Returns `None` if the type is not found.
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo>;
}

/// Provides inheritance relationship information.
///
/// Supertypes are expressed in terms of the subtype's own type parameters,
/// e.g. `java.util.ArrayList` reports `java.util.List<E>`.
pub trait InheritanceProvider: Send + Sync {
    /// Get the direct superclass of a type.
    ///
    /// Returns `None` for `java.lang.Object` or interfaces.
    fn get_superclass(&self, fqn: &str) -> Option<TypeRef>;

    /// Get the interfaces directly implemented (or extended) by a type.
    fn get_interfaces(&self, fqn: &str) -> Vec<TypeRef>;

    /// Superclass first, then interfaces in declaration order.
    fn direct_supertypes(&self, fqn: &str) -> Vec<TypeRef> {
        let mut supertypes: Vec<TypeRef> = self.get_superclass(fqn).into_iter().collect();
        supertypes.extend(self.get_interfaces(fqn));
        supertypes
    }

    /// Walk all ancestor types (superclasses and interfaces) by FQN.
    ///
    /// The iterator yields types in BFS order, each at most once.
    fn walk_ancestors(&self, fqn: &str) -> Box<dyn Iterator<Item = String> + '_> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([fqn.to_string()]);
        let mut ancestors = Vec::new();

        while let Some(current) = queue.pop_front() {
            for supertype in self.direct_supertypes(&current) {
                if let Some(base) = supertype.base_fqn() {
                    if seen.insert(base.to_string()) {
                        ancestors.push(base.to_string());
                        queue.push_back(base.to_string());
                    }
                }
            }
        }

        Box::new(ancestors.into_iter())
    }
}

/// Provides member (field/method) lookup.
///
/// This is used to find members within a single type (not walking inheritance).
pub trait MemberProvider: Send + Sync {
    /// Find all members directly declared in the given type with the matching name.
    ///
    /// Does NOT search the inheritance hierarchy.
    fn get_members(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo>;

    /// Get all members directly declared in the given type.
    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo>;
}

/// The combined type system interface.
///
/// This is the oracle the template compiler queries: every answer about
/// types comes from here, derived from the three provider traits.
pub trait JavaTypeSystem: TypeProvider + InheritanceProvider + MemberProvider {
    /// Find a member in the type hierarchy.
    ///
    /// Searches the type itself first, then walks ancestors.
    fn find_member_in_hierarchy(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo> {
        // Check the type itself first
        let mut members = self.get_members(type_fqn, member_name);
        if !members.is_empty() {
            return members;
        }

        // Walk ancestors
        for ancestor in self.walk_ancestors(type_fqn) {
            members = self.get_members(&ancestor, member_name);
            if !members.is_empty() {
                return members;
            }
        }

        vec![]
    }

    /// Exact type identity. Wildcards are never the same type as anything.
    fn is_same_type(&self, first: &TypeRef, second: &TypeRef) -> bool {
        if contains_wildcard(first) || contains_wildcard(second) {
            return false;
        }
        !matches!(first, TypeRef::Unknown) && first == second
    }

    /// Check if sub is a subtype of super_type.
    ///
    /// Delegates to `subtyping::is_subtype` logic.
    fn is_subtype(&self, sub: &TypeRef, super_type: &TypeRef) -> bool {
        super::subtyping::is_subtype(sub, super_type, self)
    }

    /// `fqn<args...>`, or the plain declared type when there are no arguments.
    fn declared_type(&self, fqn: &str, args: Vec<TypeRef>) -> TypeRef {
        if args.is_empty() {
            TypeRef::id(fqn)
        } else {
            TypeRef::generic(fqn, args)
        }
    }

    /// The declared type with an unbounded wildcard for every type parameter,
    /// e.g. `java.util.List<?>`.
    fn generic_declared_type(&self, fqn: &str) -> TypeRef {
        let arity = self
            .get_type_info(fqn)
            .map_or(0, |info| info.type_parameters.len());
        self.declared_type(fqn, vec![TypeRef::wildcard(); arity])
    }

    fn array_of(&self, element: &TypeRef) -> TypeRef {
        TypeRef::array(element.clone())
    }

    /// Upper bound of a wildcard (`? extends B` gives `B`).
    ///
    /// `None` for unbounded and lower-bounded wildcards and for non-wildcards.
    fn upper_bound(&self, ty: &TypeRef) -> Option<TypeRef> {
        match ty {
            TypeRef::Wildcard {
                bound: Some(bound),
                is_upper_bound: true,
            } => Some(bound.as_ref().clone()),
            _ => None,
        }
    }

    /// Type erasure: drops type arguments, replaces wildcards and type
    /// variables by their bounds.
    fn erasure(&self, ty: &TypeRef) -> TypeRef {
        match ty {
            TypeRef::Generic { base, .. } => self.erasure(base),
            TypeRef::Array {
                element,
                dimensions,
            } => TypeRef::Array {
                element: Box::new(self.erasure(element)),
                dimensions: *dimensions,
            },
            TypeRef::Wildcard { .. } => match self.upper_bound(ty) {
                Some(bound) => self.erasure(&bound),
                None => TypeRef::id(JAVA_LANG_OBJECT),
            },
            _ => ty.clone(),
        }
    }

    /// The parameterization of `target_fqn` that `ty` inherits, with the
    /// type arguments of `ty` substituted along the way.
    ///
    /// `List<String>` viewed as `java.lang.Iterable` gives `Iterable<String>`.
    /// Raw uses of generic types yield the raw supertype.
    fn as_supertype(&self, ty: &TypeRef, target_fqn: &str) -> Option<TypeRef> {
        find_supertype(self, ty, target_fqn, 0)
    }

    /// Type of `member` when accessed on a value of type `containing`.
    fn as_member_of(&self, containing: &TypeRef, member: &MemberInfo) -> TypeRef {
        let Some(owner) = self.as_supertype(containing, &member.declaring_type) else {
            return member.type_ref.clone();
        };
        let parameters = self
            .get_type_info(&member.declaring_type)
            .map(|info| info.type_parameters)
            .unwrap_or_default();
        if parameters.is_empty() {
            return member.type_ref.clone();
        }

        match &owner {
            TypeRef::Generic { args, .. } => {
                Substitution::from_parameters(&parameters, args).apply(&member.type_ref)
            }
            // Raw access: members are seen through their erasure
            _ => {
                let bounds: Vec<TypeRef> = parameters
                    .iter()
                    .map(|p| {
                        p.bounds
                            .first()
                            .cloned()
                            .unwrap_or_else(|| TypeRef::id(JAVA_LANG_OBJECT))
                    })
                    .collect();
                let erased = Substitution::from_parameters(&parameters, &bounds);
                self.erasure(&erased.apply(&member.type_ref))
            }
        }
    }
}

// Blanket implementation: any type implementing all three traits gets JavaTypeSystem
impl<T: TypeProvider + InheritanceProvider + MemberProvider> JavaTypeSystem for T {}

fn find_supertype<T: JavaTypeSystem + ?Sized>(
    ts: &T,
    ty: &TypeRef,
    target_fqn: &str,
    depth: usize,
) -> Option<TypeRef> {
    if depth > MAX_HIERARCHY_DEPTH {
        return None;
    }
    let fqn = ty.base_fqn()?;
    if fqn == target_fqn {
        return Some(ty.clone());
    }

    let parameters = ts
        .get_type_info(fqn)
        .map(|info| info.type_parameters)
        .unwrap_or_default();
    let raw = !parameters.is_empty() && matches!(ty, TypeRef::Id(_));
    let subst = Substitution::from_parameters(&parameters, ty.type_args());

    for supertype in ts.direct_supertypes(fqn) {
        let supertype = subst.apply(&supertype);
        if let Some(found) = find_supertype(ts, &supertype, target_fqn, depth + 1) {
            return Some(if raw { ts.erasure(&found) } else { found });
        }
    }
    None
}

fn contains_wildcard(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Wildcard { .. } => true,
        TypeRef::Generic { args, .. } => args.iter().any(contains_wildcard),
        TypeRef::Array { element, .. } => contains_wildcard(element),
        _ => false,
    }
}
