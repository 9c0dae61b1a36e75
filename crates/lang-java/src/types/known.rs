//! The fixed catalog of types the compiler knows how to render.
//!
//! Order matters: classification walks scalars and then objects in the
//! order they are declared here and stops at the first match.

use super::core::type_system::{JAVA_LANG_OBJECT, JavaTypeSystem};
use stachec_api::models::TypeRef;

pub const JAVA_LANG_STRING: &str = "java.lang.String";
pub const JAVA_LANG_ITERABLE: &str = "java.lang.Iterable";
pub const JAVA_UTIL_MAP: &str = "java.util.Map";
pub const JAVA_UTIL_OPTIONAL: &str = "java.util.Optional";
pub const JAVA_LANG_ERROR: &str = "java.lang.Error";
pub const JAVA_LANG_RUNTIME_EXCEPTION: &str = "java.lang.RuntimeException";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 8] = [
        ScalarKind::Boolean,
        ScalarKind::Char,
        ScalarKind::Byte,
        ScalarKind::Short,
        ScalarKind::Int,
        ScalarKind::Long,
        ScalarKind::Float,
        ScalarKind::Double,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            ScalarKind::Boolean => "boolean",
            ScalarKind::Char => "char",
            ScalarKind::Byte => "byte",
            ScalarKind::Short => "short",
            ScalarKind::Int => "int",
            ScalarKind::Long => "long",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
        }
    }

    pub fn boxed_fqn(self) -> &'static str {
        match self {
            ScalarKind::Boolean => "java.lang.Boolean",
            ScalarKind::Char => "java.lang.Character",
            ScalarKind::Byte => "java.lang.Byte",
            ScalarKind::Short => "java.lang.Short",
            ScalarKind::Int => "java.lang.Integer",
            ScalarKind::Long => "java.lang.Long",
            ScalarKind::Float => "java.lang.Float",
            ScalarKind::Double => "java.lang.Double",
        }
    }

    /// Everything but `boolean`; such values cannot open a section.
    pub fn is_numeric(self) -> bool {
        !matches!(self, ScalarKind::Boolean)
    }
}

/// A primitive type or a one-dimensional array of one, matched by exact
/// type identity. For arrays `kind` is the component kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarType {
    pub kind: ScalarKind,
    pub type_ref: TypeRef,
}

impl ScalarType {
    pub fn is_array(&self) -> bool {
        self.type_ref.is_array()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    String,
    Boxed(ScalarKind),
    Optional,
    Iterable,
    Map,
    /// `java.lang.Object`: any other reference type
    Declared,
    Renderable,
    Error,
    RuntimeException,
}

/// A reference type capability, matched by assignability to `fqn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectType {
    pub kind: ObjectKind,
    pub fqn: String,
}

impl ObjectType {
    fn new(kind: ObjectKind, fqn: impl Into<String>) -> Self {
        Self {
            kind,
            fqn: fqn.into(),
        }
    }
}

/// Result of classifying a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnownType {
    Renderable(ObjectType),
    Scalar(ScalarType),
    Object(ObjectType),
}

impl KnownType {
    pub fn is_renderable(&self) -> bool {
        matches!(self, KnownType::Renderable(_))
    }

    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            KnownType::Scalar(scalar) => Some(scalar.kind),
            _ => None,
        }
    }

    pub fn object_kind(&self) -> Option<ObjectKind> {
        match self {
            KnownType::Object(object) => Some(object.kind),
            _ => None,
        }
    }
}

/// The registry. Built once per compilation and never modified.
#[derive(Debug, Clone)]
pub struct KnownTypes {
    renderable: ObjectType,
    scalars: Vec<ScalarType>,
    objects: Vec<ObjectType>,
    error: ObjectType,
    runtime_exception: ObjectType,
}

impl KnownTypes {
    pub fn new<T: JavaTypeSystem + ?Sized>(renderable_interface: &str, ts: &T) -> Self {
        let primitives: Vec<ScalarType> = ScalarKind::ALL
            .iter()
            .map(|&kind| ScalarType {
                kind,
                type_ref: TypeRef::raw(kind.keyword()),
            })
            .collect();
        let arrays: Vec<ScalarType> = primitives
            .iter()
            .map(|primitive| ScalarType {
                kind: primitive.kind,
                type_ref: ts.array_of(&primitive.type_ref),
            })
            .collect();
        let scalars = primitives.into_iter().chain(arrays).collect();

        let mut objects = vec![ObjectType::new(ObjectKind::String, JAVA_LANG_STRING)];
        objects.extend(
            ScalarKind::ALL
                .iter()
                .map(|&kind| ObjectType::new(ObjectKind::Boxed(kind), kind.boxed_fqn())),
        );
        objects.extend([
            ObjectType::new(ObjectKind::Optional, JAVA_UTIL_OPTIONAL),
            ObjectType::new(ObjectKind::Iterable, JAVA_LANG_ITERABLE),
            ObjectType::new(ObjectKind::Map, JAVA_UTIL_MAP),
            ObjectType::new(ObjectKind::Declared, JAVA_LANG_OBJECT),
        ]);

        Self {
            renderable: ObjectType::new(ObjectKind::Renderable, renderable_interface),
            scalars,
            objects,
            error: ObjectType::new(ObjectKind::Error, JAVA_LANG_ERROR),
            runtime_exception: ObjectType::new(
                ObjectKind::RuntimeException,
                JAVA_LANG_RUNTIME_EXCEPTION,
            ),
        }
    }

    pub fn renderable(&self) -> &ObjectType {
        &self.renderable
    }

    /// Scalars in classification order: primitives, then their arrays.
    pub fn scalars(&self) -> &[ScalarType] {
        &self.scalars
    }

    /// Object capabilities in classification order; `Declared` is last.
    pub fn objects(&self) -> &[ObjectType] {
        &self.objects
    }

    pub fn error(&self) -> &ObjectType {
        &self.error
    }

    pub fn runtime_exception(&self) -> &ObjectType {
        &self.runtime_exception
    }

    pub fn object(&self, kind: ObjectKind) -> Option<&ObjectType> {
        match kind {
            ObjectKind::Renderable => Some(&self.renderable),
            ObjectKind::Error => Some(&self.error),
            ObjectKind::RuntimeException => Some(&self.runtime_exception),
            _ => self.objects.iter().find(|o| o.kind == kind),
        }
    }
}
