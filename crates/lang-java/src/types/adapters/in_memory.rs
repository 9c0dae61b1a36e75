use crate::types::core::type_system::{
    InheritanceProvider, JAVA_LANG_OBJECT, MemberProvider, TypeProvider,
};
use crate::types::core::types::{
    MemberInfo, MemberKind, ParameterInfo, TypeInfo, TypeKind, TypeParameter,
};
use stachec_api::models::TypeRef;
use stachec_core::DEFAULT_RENDERABLE_INTERFACE;
use std::collections::HashMap;

/// A type system held entirely in memory.
///
/// Built with a fluent API; used when the declarations a template can see
/// are known up front (stubs, tests, drivers that extract them elsewhere).
#[derive(Debug, Default, Clone)]
pub struct InMemoryTypeSystem {
    types: HashMap<String, TypeInfo>,
    inheritance: HashMap<String, (Option<TypeRef>, Vec<TypeRef>)>, // (superclass, interfaces)
    members: HashMap<String, Vec<MemberInfo>>,
}

impl InMemoryTypeSystem {
    /// Create a new empty type system.
    pub fn new() -> Self {
        Self::default()
    }

    /// The slice of the JDK templates commonly reach (`Object`, `String`,
    /// boxed primitives, collections, `Optional`, the exception roots) plus
    /// the default renderable interface.
    pub fn with_java_defaults() -> Self {
        let t = || TypeRef::id("T");
        let e = || TypeRef::id("E");
        let boolean = || TypeRef::raw("boolean");
        let int = || TypeRef::raw("int");

        let mut ts = Self::new()
            .add_class(JAVA_LANG_OBJECT, None)
            .with_renderable(DEFAULT_RENDERABLE_INTERFACE)
            .add_interface("java.lang.CharSequence")
            .add_interface("java.lang.Cloneable")
            .add_interface("java.io.Serializable")
            .add_class("java.lang.String", None)
            .implements("java.lang.String", TypeRef::id("java.lang.CharSequence"))
            .implements("java.lang.String", TypeRef::id("java.io.Serializable"))
            .add_method("java.lang.String", "length", int())
            .add_method("java.lang.String", "isEmpty", boolean())
            .add_class("java.lang.Number", None)
            .add_class("java.lang.Boolean", None)
            .add_class("java.lang.Character", None);

        for boxed in [
            "java.lang.Byte",
            "java.lang.Short",
            "java.lang.Integer",
            "java.lang.Long",
            "java.lang.Float",
            "java.lang.Double",
        ] {
            ts = ts.add_class(boxed, Some(TypeRef::id("java.lang.Number")));
        }

        ts.add_interface_with_type_params("java.lang.Iterable", vec!["T"])
            .add_interface_with_type_params("java.util.Collection", vec!["E"])
            .implements(
                "java.util.Collection",
                TypeRef::generic("java.lang.Iterable", vec![e()]),
            )
            .add_method("java.util.Collection", "size", int())
            .add_method("java.util.Collection", "isEmpty", boolean())
            .add_interface_with_type_params("java.util.List", vec!["E"])
            .implements(
                "java.util.List",
                TypeRef::generic("java.util.Collection", vec![e()]),
            )
            .add_class_with_type_params("java.util.ArrayList", None, vec!["E"])
            .implements(
                "java.util.ArrayList",
                TypeRef::generic("java.util.List", vec![e()]),
            )
            .add_interface_with_type_params("java.util.Map", vec!["K", "V"])
            .add_method("java.util.Map", "size", int())
            .add_method("java.util.Map", "isEmpty", boolean())
            .add_class_with_type_params("java.util.HashMap", None, vec!["K", "V"])
            .implements(
                "java.util.HashMap",
                TypeRef::generic("java.util.Map", vec![TypeRef::id("K"), TypeRef::id("V")]),
            )
            .add_class_with_type_params("java.util.Optional", None, vec!["T"])
            .add_method("java.util.Optional", "isPresent", boolean())
            .add_method("java.util.Optional", "get", t())
            .add_class("java.lang.Throwable", None)
            .add_method("java.lang.Throwable", "getMessage", TypeRef::id("java.lang.String"))
            .add_class("java.lang.Exception", Some(TypeRef::id("java.lang.Throwable")))
            .add_class(
                "java.lang.RuntimeException",
                Some(TypeRef::id("java.lang.Exception")),
            )
            .add_class("java.lang.Error", Some(TypeRef::id("java.lang.Throwable")))
            .add_class("java.io.IOException", Some(TypeRef::id("java.lang.Exception")))
    }

    /// Declare the generic renderable interface (`fqn<F>`).
    pub fn with_renderable(self, fqn: &str) -> Self {
        self.add_interface_with_type_params(fqn, vec!["F"])
    }

    /// Add a class. Classes without an explicit superclass extend `java.lang.Object`.
    pub fn add_class(self, fqn: &str, super_class: Option<TypeRef>) -> Self {
        self.add_class_with_type_params(fqn, super_class, vec![])
    }

    /// Add a class with generic type parameters.
    pub fn add_class_with_type_params(
        mut self,
        fqn: &str,
        super_class: Option<TypeRef>,
        type_parameters: Vec<&str>,
    ) -> Self {
        self.insert_type(fqn, TypeKind::Class, type_parameters);
        let super_class = super_class.or_else(|| {
            if fqn == JAVA_LANG_OBJECT {
                None
            } else {
                Some(TypeRef::id(JAVA_LANG_OBJECT))
            }
        });
        self.inheritance
            .insert(fqn.to_string(), (super_class, vec![]));
        self
    }

    /// Add an interface.
    pub fn add_interface(self, fqn: &str) -> Self {
        self.add_interface_with_type_params(fqn, vec![])
    }

    /// Add an interface with generic type parameters.
    pub fn add_interface_with_type_params(
        mut self,
        fqn: &str,
        type_parameters: Vec<&str>,
    ) -> Self {
        self.insert_type(fqn, TypeKind::Interface, type_parameters);
        self.inheritance.insert(fqn.to_string(), (None, vec![]));
        self
    }

    /// Add an interface implementation (or extension, for interfaces).
    pub fn implements(mut self, type_fqn: &str, interface: TypeRef) -> Self {
        if let Some((_super_class, interfaces)) = self.inheritance.get_mut(type_fqn) {
            interfaces.push(interface);
        } else {
            self.inheritance
                .insert(type_fqn.to_string(), (None, vec![interface]));
        }
        self
    }

    /// Add a public instance field.
    pub fn add_field(self, class_fqn: &str, name: &str, type_ref: TypeRef) -> Self {
        self.add_member(MemberInfo {
            name: name.to_string(),
            fqn: format!("{}#{}", class_fqn, name),
            kind: MemberKind::Field,
            declaring_type: class_fqn.to_string(),
            type_ref,
            parameters: None,
            modifiers: vec!["public".to_string()],
            throws: vec![],
        })
    }

    /// Add a public, parameterless instance method.
    pub fn add_method(self, class_fqn: &str, name: &str, return_type: TypeRef) -> Self {
        self.add_throwing_method(class_fqn, name, return_type, vec![])
    }

    /// Add a public, parameterless instance method with a `throws` clause.
    pub fn add_throwing_method(
        self,
        class_fqn: &str,
        name: &str,
        return_type: TypeRef,
        throws: Vec<TypeRef>,
    ) -> Self {
        self.add_member(MemberInfo {
            name: name.to_string(),
            fqn: format!("{}#{}", class_fqn, name),
            kind: MemberKind::Method,
            declaring_type: class_fqn.to_string(),
            type_ref: return_type,
            parameters: Some(vec![]),
            modifiers: vec!["public".to_string()],
            throws,
        })
    }

    /// Add a public instance method taking the given parameters.
    pub fn add_method_with_params(
        self,
        class_fqn: &str,
        name: &str,
        return_type: TypeRef,
        parameters: Vec<(&str, TypeRef)>,
    ) -> Self {
        self.add_member(MemberInfo {
            name: name.to_string(),
            fqn: format!("{}#{}", class_fqn, name),
            kind: MemberKind::Method,
            declaring_type: class_fqn.to_string(),
            type_ref: return_type,
            parameters: Some(
                parameters
                    .into_iter()
                    .map(|(name, type_ref)| ParameterInfo {
                        name: name.to_string(),
                        type_ref,
                        is_varargs: false,
                    })
                    .collect(),
            ),
            modifiers: vec!["public".to_string()],
            throws: vec![],
        })
    }

    /// Add an arbitrary member; it is filed under its declaring type.
    pub fn add_member(mut self, member: MemberInfo) -> Self {
        self.members
            .entry(member.declaring_type.clone())
            .or_default()
            .push(member);
        self
    }

    fn insert_type(&mut self, fqn: &str, kind: TypeKind, type_parameters: Vec<&str>) {
        self.types.insert(
            fqn.to_string(),
            TypeInfo {
                fqn: fqn.to_string(),
                kind,
                modifiers: vec!["public".to_string()],
                type_parameters: type_parameters
                    .into_iter()
                    .map(TypeParameter::new)
                    .collect(),
            },
        );
    }
}

impl TypeProvider for InMemoryTypeSystem {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.types.get(fqn).cloned()
    }
}

impl InheritanceProvider for InMemoryTypeSystem {
    fn get_superclass(&self, fqn: &str) -> Option<TypeRef> {
        self.inheritance.get(fqn).and_then(|(s, _)| s.clone())
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<TypeRef> {
        self.inheritance
            .get(fqn)
            .map(|(_, i)| i.clone())
            .unwrap_or_default()
    }
}

impl MemberProvider for InMemoryTypeSystem {
    fn get_members(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo> {
        self.members
            .get(type_fqn)
            .map(|members| {
                members
                    .iter()
                    .filter(|m| m.name == member_name)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo> {
        self.members.get(type_fqn).cloned().unwrap_or_default()
    }
}
