use crate::types::core::type_system::{InheritanceProvider, MemberProvider, TypeProvider};
use crate::types::core::types::{MemberInfo, TypeInfo};
use stachec_api::models::TypeRef;

/// A no-op implementation of JavaTypeSystem.
/// Useful for testing or when no host type information is available:
/// everything but primitives resolves to nothing.
pub struct NoOpTypeSystem;

impl TypeProvider for NoOpTypeSystem {
    fn get_type_info(&self, _fqn: &str) -> Option<TypeInfo> {
        None
    }
}

impl InheritanceProvider for NoOpTypeSystem {
    fn get_superclass(&self, _fqn: &str) -> Option<TypeRef> {
        None
    }

    fn get_interfaces(&self, _fqn: &str) -> Vec<TypeRef> {
        vec![]
    }
}

impl MemberProvider for NoOpTypeSystem {
    fn get_members(&self, _type_fqn: &str, _member_name: &str) -> Vec<MemberInfo> {
        vec![]
    }

    fn get_all_members(&self, _type_fqn: &str) -> Vec<MemberInfo> {
        vec![]
    }
}
