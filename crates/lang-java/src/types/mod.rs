//! Static type knowledge for template compilation.
//!
//! # Architecture
//!
//! ```text
//! JavaTypeSystem (trait)   →  provides type/member lookup, subtyping
//!       │
//!       ▼
//! KnownTypes (registry)    →  ordered catalog of renderable kinds
//!       │
//!       ▼
//! JavaLanguageModel        →  classifies types, finds members
//! ```
//!
//! # Key Traits
//!
//! - [`TypeProvider`] - Resolves FQN to type information
//! - [`InheritanceProvider`] - Walks supertype hierarchy
//! - [`MemberProvider`] - Finds members in types
//! - [`JavaTypeSystem`] - Combines all three
//!
//! # Usage
//!
//! ```ignore
//! use stachec_java::types::{InMemoryTypeSystem, JavaLanguageModel};
//!
//! let ts = InMemoryTypeSystem::with_java_defaults();
//! let model = JavaLanguageModel::new(Arc::new(ts), CompilerConfig::default());
//! let kind = model.resolve_type(&TypeRef::id("java.lang.String"))?;
//! ```

pub mod adapters;
pub mod core;
pub mod known;
pub mod model;

pub use adapters::{InMemoryTypeSystem, NoOpTypeSystem};
pub use self::core::type_system::{
    InheritanceProvider, JAVA_LANG_OBJECT, JavaTypeSystem, MemberProvider, TypeProvider,
};
pub use self::core::types::{
    MemberInfo, MemberKind, ParameterInfo, TypeInfo, TypeKind, TypeParameter,
};
pub use known::{KnownType, KnownTypes, ObjectKind, ObjectType, ScalarKind, ScalarType};
pub use model::JavaLanguageModel;
