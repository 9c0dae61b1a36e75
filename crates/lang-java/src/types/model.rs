//! The language model: type system, registry and configuration in one place.
//!
//! Every question the context resolver asks about a type goes through
//! `JavaLanguageModel`. It is built once per compilation and shared
//! read-only by every template compiled in that run.

use super::core::type_system::{JAVA_LANG_OBJECT, JavaTypeSystem};
use super::core::types::{MemberInfo, MemberKind};
use super::known::{
    JAVA_LANG_ITERABLE, JAVA_UTIL_MAP, JAVA_UTIL_OPTIONAL, KnownType, KnownTypes, ObjectKind,
};
use crate::context::JavaExpression;
use crate::error::TypeError;
use stachec_api::models::TypeRef;
use stachec_core::CompilerConfig;
use std::sync::Arc;

pub struct JavaLanguageModel {
    ts: Arc<dyn JavaTypeSystem>,
    known: KnownTypes,
    config: CompilerConfig,
}

impl JavaLanguageModel {
    pub fn new(ts: Arc<dyn JavaTypeSystem>, config: CompilerConfig) -> Self {
        let known = KnownTypes::new(&config.renderable_interface, ts.as_ref());
        Self { ts, known, config }
    }

    pub fn type_system(&self) -> &dyn JavaTypeSystem {
        self.ts.as_ref()
    }

    pub fn known_types(&self) -> &KnownTypes {
        &self.known
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Scalars match by identity, objects by assignability.
    pub fn is_type(&self, ty: &TypeRef, known: &KnownType) -> bool {
        match known {
            KnownType::Scalar(scalar) => self.ts.is_same_type(ty, &scalar.type_ref),
            KnownType::Object(object) => self.ts.is_subtype(ty, &TypeRef::id(&object.fqn)),
            KnownType::Renderable(object) => self
                .ts
                .is_subtype(ty, &self.ts.generic_declared_type(&object.fqn)),
        }
    }

    /// Classify a type against the registry.
    ///
    /// `Ok(None)` means the type is unresolved: it is none of the known
    /// kinds, e.g. a type variable or a name the type system has never seen.
    pub fn resolve_type(&self, ty: &TypeRef) -> Result<Option<KnownType>, TypeError> {
        if ty.is_wildcard() {
            return match self.ts.upper_bound(ty) {
                Some(bound) => self.resolve_type(&bound),
                None => Err(TypeError::UnboundedWildcard(ty.to_string())),
            };
        }

        let renderable = KnownType::Renderable(self.known.renderable().clone());
        let resolved = if self.is_type(ty, &renderable) {
            Some(renderable)
        } else {
            self.known
                .scalars()
                .iter()
                .map(|scalar| KnownType::Scalar(scalar.clone()))
                .chain(
                    self.known
                        .objects()
                        .iter()
                        .map(|object| KnownType::Object(object.clone())),
                )
                .find(|known| self.is_type(ty, known))
        };

        tracing::trace!("resolved type {} as {:?}", ty, resolved);
        Ok(resolved)
    }

    /// Like `resolve_type`, but unresolved types are an error.
    pub fn require_type(&self, ty: &TypeRef) -> Result<KnownType, TypeError> {
        self.resolve_type(ty)?
            .ok_or_else(|| TypeError::Unresolved(ty.to_string()))
    }

    /// `Error`, `RuntimeException` and their subclasses.
    pub fn is_unchecked_exception(&self, ty: &TypeRef) -> bool {
        [self.known.error(), self.known.runtime_exception()]
            .iter()
            .any(|root| self.ts.is_subtype(ty, &TypeRef::id(&root.fqn)))
    }

    /// The template's data, named as configured.
    pub fn root_expression(&self, data_type: TypeRef) -> JavaExpression {
        JavaExpression::new(&self.config.data_name, data_type)
    }

    /// Strip wildcards down to their upper bound.
    pub fn effective_type(&self, ty: &TypeRef) -> Result<TypeRef, TypeError> {
        if !ty.is_wildcard() {
            return Ok(ty.clone());
        }
        match self.ts.upper_bound(ty) {
            Some(bound) => self.effective_type(&bound),
            None => Err(TypeError::UnboundedWildcard(ty.to_string())),
        }
    }

    /// Resolve `name` as a member of `value`.
    ///
    /// Objects expose accessors and fields, maps expose entries and arrays
    /// expose `length`. Scalars, renderables and unresolved types expose
    /// nothing.
    pub fn find_member(
        &self,
        value: &JavaExpression,
        name: &str,
    ) -> Result<Option<JavaExpression>, TypeError> {
        let ty = self.effective_type(value.type_ref())?;
        if ty.is_array() {
            return Ok((name == "length")
                .then(|| value.member(format!("{}.length", value), TypeRef::raw("int"), name)));
        }

        match self.resolve_type(&ty)? {
            Some(KnownType::Object(object)) if object.kind == ObjectKind::Map => {
                Ok(Some(self.find_map_entry(value, &ty, name)))
            }
            Some(KnownType::Object(_)) => Ok(self.find_accessor(value, &ty, name)),
            _ => Ok(None),
        }
    }

    /// `map.get("name")`, typed by the map's value type argument.
    pub fn find_map_entry(&self, value: &JavaExpression, ty: &TypeRef, name: &str) -> JavaExpression {
        let value_type = self.type_argument(ty, JAVA_UTIL_MAP, 1);
        value.member(
            format!("{}.get(\"{}\")", value, escape_java_string(name)),
            value_type,
            name,
        )
    }

    /// Element type seen when iterating a value of `ty`.
    pub fn iterable_element(&self, ty: &TypeRef) -> TypeRef {
        self.type_argument(ty, JAVA_LANG_ITERABLE, 0)
    }

    /// Type of `get()` on an `Optional` of `ty`.
    pub fn optional_element(&self, ty: &TypeRef) -> TypeRef {
        self.type_argument(ty, JAVA_UTIL_OPTIONAL, 0)
    }

    /// Type argument `index` of the `fqn` parameterization `ty` inherits.
    ///
    /// `? extends B` becomes `B`. Raw and missing arguments, `?` and
    /// `? super B` are read as `java.lang.Object`.
    fn type_argument(&self, ty: &TypeRef, fqn: &str, index: usize) -> TypeRef {
        let arg = match self.ts.as_supertype(ty, fqn) {
            Some(TypeRef::Generic { args, .. }) => args.get(index).cloned(),
            _ => None,
        };
        match arg {
            Some(arg) if arg.is_wildcard() => self
                .ts
                .upper_bound(&arg)
                .unwrap_or_else(|| TypeRef::id(JAVA_LANG_OBJECT)),
            Some(arg) => arg,
            None => TypeRef::id(JAVA_LANG_OBJECT),
        }
    }

    fn find_accessor(&self, value: &JavaExpression, ty: &TypeRef, name: &str) -> Option<JavaExpression> {
        let fqn = ty.base_fqn()?;
        let capitalized = capitalize(name);

        self.find_method(value, ty, fqn, &format!("get{}", capitalized), name, false)
            .or_else(|| self.find_method(value, ty, fqn, &format!("is{}", capitalized), name, true))
            .or_else(|| self.find_method(value, ty, fqn, name, name, false))
            .or_else(|| self.find_field(value, ty, fqn, name))
    }

    fn find_method(
        &self,
        value: &JavaExpression,
        ty: &TypeRef,
        fqn: &str,
        method: &str,
        name: &str,
        boolean_only: bool,
    ) -> Option<JavaExpression> {
        self.ts
            .find_member_in_hierarchy(fqn, method)
            .into_iter()
            .filter(|m| m.kind == MemberKind::Method && m.arity() == 0 && is_accessible(m))
            .filter(|m| self.throws_only_unchecked(m))
            .map(|m| self.ts.as_member_of(ty, &m))
            .find(|t| !is_void(t) && (!boolean_only || is_boolean(t)))
            .map(|t| value.member(format!("{}.{}()", value, method), t, name))
    }

    fn find_field(
        &self,
        value: &JavaExpression,
        ty: &TypeRef,
        fqn: &str,
        name: &str,
    ) -> Option<JavaExpression> {
        self.ts
            .find_member_in_hierarchy(fqn, name)
            .into_iter()
            .find(|m| m.kind == MemberKind::Field && is_accessible(m))
            .map(|m| {
                let field_type = self.ts.as_member_of(ty, &m);
                value.member(format!("{}.{}", value, name), field_type, name)
            })
    }

    fn throws_only_unchecked(&self, member: &MemberInfo) -> bool {
        match member.throws.iter().find(|t| !self.is_unchecked_exception(t)) {
            Some(checked) => {
                tracing::warn!(
                    "skipping {}: declares checked exception {}",
                    member.fqn,
                    checked
                );
                false
            }
            None => true,
        }
    }
}

fn is_accessible(member: &MemberInfo) -> bool {
    !member.is_static() && !member.is_private()
}

fn is_void(ty: &TypeRef) -> bool {
    matches!(ty, TypeRef::Raw(name) if name == "void")
}

fn is_boolean(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Raw(name) => name == "boolean",
        TypeRef::Id(fqn) => fqn == "java.lang.Boolean",
        _ => false,
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn escape_java_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}
