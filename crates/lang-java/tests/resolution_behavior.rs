mod common;

use common::*;
use stachec_api::models::TypeRef;
use stachec_core::CompilerConfig;
use stachec_java::context::{ContextVariant, SectionShape};
use stachec_java::error::ErrorKind;
use stachec_java::types::InMemoryTypeSystem;
use stachec_java::{
    ChildType, ContextError, JavaLanguageModel, JavaRenderingCodeGenerator,
    TemplateCompilerContext, TypeError,
};

fn page_root(model: &JavaLanguageModel) -> TemplateCompilerContext<'_> {
    TemplateCompilerContext::new(model, &JavaRenderingCodeGenerator, TypeRef::id(PAGE)).unwrap()
}

fn text<'a>(context: &'a TemplateCompilerContext<'_>) -> &'a str {
    context.current_expression().text()
}

#[test]
fn test_dot_section_is_identity() {
    let model = fixture_model();
    let root = page_root(&model);
    let user = root.get_child("user", ChildType::Section).unwrap();

    for scope in [&root, &user] {
        let dot = scope.get_child(".", ChildType::Section).unwrap();
        assert_eq!(dot.current_expression(), scope.current_expression());
        assert_eq!(dot.child_type(), ChildType::Section);
        assert_eq!(dot.current_enclosed_context_name(), Some("."));
    }
}

#[test]
fn test_dot_cannot_be_inverted_or_parent() {
    let model = fixture_model();
    let root = page_root(&model);
    let user = root.get_child("user", ChildType::Section).unwrap();

    for scope in [&root, &user] {
        assert!(matches!(
            scope.get_child(".", ChildType::Inverted),
            Err(ContextError::CurrentSectionInverted)
        ));
        assert!(matches!(
            scope.get_child(".", ChildType::Parent),
            Err(ContextError::CurrentSectionParent)
        ));
        assert!(matches!(
            scope.get_child(".", ChildType::Root),
            Err(ContextError::CurrentSectionParent)
        ));
    }
}

#[test]
fn test_parent_link_skips_lookup() {
    let model = fixture_model();
    let root = page_root(&model);
    let user = root.get_child("user", ChildType::Section).unwrap();

    let parent = user.get_child("layouts/base", ChildType::Parent).unwrap();
    assert_eq!(parent.current_expression(), user.current_expression());
    assert_eq!(parent.child_type(), ChildType::Parent);
    assert_eq!(parent.current_enclosed_context_name(), Some("layouts/base"));
}

#[test]
fn test_dotted_path_uses_leaf_semantics_only_for_last_name() {
    let model = fixture_model();
    let root = page_root(&model);

    // `items` is the leaf: it opens a loop, `user` is only null-checked
    let items = root.get_child("user.items", ChildType::Section).unwrap();
    let leaf = items.rendering_context();
    assert!(matches!(leaf.shape(), Ok(SectionShape::Iteration { .. })));
    assert!(!leaf.is_path_step());
    let step = leaf.enclosing().unwrap();
    assert!(step.is_path_step());
    assert_eq!(step.variant(), ContextVariant::Owned);
    assert_eq!(step.shape(), Ok(&SectionShape::Nullable));
    assert_eq!(step.current_expression().text(), "data.getUser()");

    // `items` is a step: it is null-checked, not iterated
    let size = root.get_child("user.items.size", ChildType::Section).unwrap();
    assert_eq!(text(&size), "data.getUser().getItems().size()");
    let step = size.rendering_context().enclosing().unwrap();
    assert_eq!(step.shape(), Ok(&SectionShape::Nullable));
    assert_eq!(step.current_expression().text(), "data.getUser().getItems()");
    assert_eq!(
        step.current_expression().type_ref(),
        &list_of(TypeRef::id(ITEM))
    );
}

#[test]
fn test_enclosed_relation_keeps_full_path() {
    let model = fixture_model();
    let root = page_root(&model);
    let city = root
        .get_child("user", ChildType::Section)
        .unwrap()
        .get_child("address.city", ChildType::EscapedVar)
        .unwrap();

    assert!(city.is_enclosed());
    assert_eq!(city.current_enclosed_context_name(), Some("address.city"));
    let user = city.parent_context().unwrap();
    assert_eq!(user.current_enclosed_context_name(), Some("user"));
    let top = user.parent_context().unwrap();
    assert!(!top.is_enclosed());
    assert_eq!(top.child_type(), ChildType::Root);
    assert!(top.parent_context().is_none());
    assert_eq!(top.current_enclosed_context_name(), None);
}

#[test]
fn test_missing_field_is_reported_by_name() {
    let model = fixture_model();
    let root = page_root(&model);

    let first = root.get_child("user.nickame", ChildType::EscapedVar).unwrap_err();
    let second = root.get_child("user.nickame", ChildType::EscapedVar).unwrap_err();

    match &first {
        ContextError::FieldNotFound { name, scope } => {
            assert_eq!(name, "nickame");
            assert_eq!(scope, USER);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(first.kind(), ErrorKind::Resolution);
}

#[test]
fn test_dotted_path_fails_at_first_missing_step() {
    let model = fixture_model();
    let root = page_root(&model);

    // Page has an address of its own; it must not leak into `user.address`
    assert_eq!(
        text(&root.get_child("address.city", ChildType::EscapedVar).unwrap()),
        "data.getAddress().getCity()"
    );

    let ts = fixture_type_system()
        .add_class("com.example.Guest", None)
        .add_method("com.example.Guest", "getName", string());
    let model = model_with(
        ts.add_method(PAGE, "getGuest", TypeRef::id("com.example.Guest")),
        CompilerConfig::default(),
    );
    let root = page_root(&model);
    let err = root
        .get_child("guest.address.city", ChildType::EscapedVar)
        .unwrap_err();
    assert!(matches!(
        err,
        ContextError::FieldNotFound { ref name, .. } if name == "address"
    ));
}

#[test]
fn test_first_name_resolves_through_enclosing_scopes() {
    let model = fixture_model();
    let root = page_root(&model);
    let user = root.get_child("user", ChildType::Section).unwrap();

    // User has no title; the page does
    let title = user.get_child("title", ChildType::EscapedVar).unwrap();
    assert_eq!(text(&title), "data.getTitle()");

    // Inner scopes shadow outer ones
    let items = root.get_child("items", ChildType::Section).unwrap();
    let title = items.get_child("title", ChildType::EscapedVar).unwrap();
    assert_eq!(text(&title), "element1.getTitle()");
}

#[test]
fn test_partial_context_is_never_enclosed() {
    let model = fixture_model();
    let deep = page_root(&model)
        .get_child("user", ChildType::Section)
        .unwrap()
        .get_child("items", ChildType::Section)
        .unwrap()
        .get_child("title", ChildType::EscapedVar)
        .unwrap();

    let partial = deep.create_for_partial();
    assert!(!partial.is_enclosed());
    assert!(partial.parent_context().is_none());
    assert_eq!(partial.child_type(), ChildType::Parent);
    assert_eq!(partial.current_expression(), deep.current_expression());
    assert_eq!(
        partial.unescaped_writer_expression(),
        deep.unescaped_writer_expression()
    );

    let nested = partial.create_for_partial();
    assert!(!nested.is_enclosed());
}

#[test]
fn test_inverted_path_inverts_every_step() {
    let model = fixture_model();
    let root = page_root(&model);
    let city = root
        .get_child("user.address.city", ChildType::Inverted)
        .unwrap();

    let mut variants = Vec::new();
    let mut scope = Some(city.rendering_context());
    while let Some(context) = scope {
        variants.push(context.variant());
        scope = context.enclosing();
    }
    assert_eq!(
        variants,
        vec![
            ContextVariant::Inverted,
            ContextVariant::Inverted,
            ContextVariant::Inverted,
            ContextVariant::Owned,
            ContextVariant::Root,
        ]
    );
    assert_eq!(text(&city), "data.getUser().getAddress().getCity()");
    assert_eq!(
        city.begin_section_rendering_code().unwrap(),
        "if (data.getUser() == null || data.getUser().getAddress() == null \
         || data.getUser().getAddress().getCity() == null) {\n"
    );
    assert_eq!(city.end_section_rendering_code(), "}\n");
}

#[test]
fn test_leading_steps_are_checked_differently_for_inverted_names() {
    let model = fixture_model();
    let root = page_root(&model);

    let present = root
        .get_child("user.address.city", ChildType::Section)
        .unwrap();
    let absent = root
        .get_child("user.address.city", ChildType::Inverted)
        .unwrap();

    let present_step = present.rendering_context().enclosing().unwrap();
    let absent_step = absent.rendering_context().enclosing().unwrap();
    assert_eq!(present_step.variant(), ContextVariant::Owned);
    assert_eq!(absent_step.variant(), ContextVariant::Inverted);
    assert_eq!(present_step.value(), absent_step.value());

    assert_eq!(
        present.begin_section_rendering_code().unwrap(),
        "if (data.getUser() != null) {\n\
         if (data.getUser().getAddress() != null) {\n\
         if (data.getUser().getAddress().getCity() != null) {\n"
    );
    assert_eq!(present.end_section_rendering_code(), "}\n}\n}\n");
    assert_ne!(
        present.begin_section_rendering_code().unwrap(),
        absent.begin_section_rendering_code().unwrap()
    );
}

#[test]
fn test_generic_members_are_substituted() {
    let model = fixture_model();
    let root = page_root(&model);
    let title = root
        .get_child("box.content.title", ChildType::EscapedVar)
        .unwrap();
    assert_eq!(text(&title), "data.getBox().getContent().getTitle()");
    assert_eq!(title.current_expression().type_ref(), &string());
    assert_eq!(
        title.current_expression().path().to_vec(),
        vec!["box", "content", "title"]
    );
}

#[test]
fn test_fields_maps_and_arrays() {
    let model = fixture_model();
    let root = page_root(&model);

    let email = root.get_child("user.email", ChildType::EscapedVar).unwrap();
    assert_eq!(text(&email), "data.getUser().email");

    let theme = root.get_child("settings.theme", ChildType::EscapedVar).unwrap();
    assert_eq!(text(&theme), "data.getSettings().get(\"theme\")");
    assert_eq!(
        theme.current_expression().type_ref(),
        &TypeRef::id("java.lang.Integer")
    );

    let length = root
        .get_child("user.scores.length", ChildType::EscapedVar)
        .unwrap();
    assert_eq!(text(&length), "data.getUser().getScores().length");
    assert_eq!(length.current_expression().type_ref(), &TypeRef::raw("int"));
}

#[test]
fn test_scalars_expose_no_members() {
    let model = fixture_model();
    let root = page_root(&model);
    assert!(matches!(
        root.get_child("user.age.value", ChildType::EscapedVar),
        Err(ContextError::FieldNotFound { ref name, ref scope }) if name == "value" && scope == "int"
    ));
    assert!(matches!(
        root.get_child("user.profile.name", ChildType::EscapedVar),
        Err(ContextError::FieldNotFound { .. })
    ));
}

#[test]
fn test_inaccessible_members_are_hidden() {
    let ts = fixture_type_system()
        .add_member(stachec_java::types::MemberInfo {
            name: "getInstance".to_string(),
            fqn: format!("{}#getInstance", USER),
            kind: stachec_java::types::MemberKind::Method,
            declaring_type: USER.to_string(),
            type_ref: TypeRef::id(USER),
            parameters: Some(vec![]),
            modifiers: vec!["public".to_string(), "static".to_string()],
            throws: vec![],
        })
        .add_method_with_params(USER, "getGreeting", string(), vec![("locale", string())])
        .add_method(USER, "getNothing", TypeRef::raw("void"));
    let model = model_with(ts, CompilerConfig::default());
    let root = page_root(&model);

    for path in [
        "user.password",
        "user.instance",
        "user.greeting",
        "user.nothing",
    ] {
        assert!(
            matches!(
                root.get_child(path, ChildType::EscapedVar),
                Err(ContextError::FieldNotFound { .. })
            ),
            "{path} should not resolve"
        );
    }
}

#[test]
fn test_accessor_precedence() {
    let owner = "com.example.Settings";
    let ts = fixture_type_system()
        .add_method(PAGE, "getPrefs", TypeRef::id(owner))
        .add_class(owner, None)
        .add_field(owner, "theme", string())
        .add_method(owner, "theme", string())
        .add_method(owner, "getTheme", string())
        .add_method(owner, "isDark", string())
        .add_field(owner, "dark", TypeRef::raw("boolean"))
        .add_method(owner, "isCompact", TypeRef::id("java.lang.Boolean"))
        .add_method(owner, "compact", TypeRef::raw("boolean"));
    let model = model_with(ts, CompilerConfig::default());
    let root = page_root(&model);

    let resolve = |path: &str| {
        text(&root.get_child(path, ChildType::EscapedVar).unwrap()).to_string()
    };
    assert_eq!(resolve("prefs.theme"), "data.getPrefs().getTheme()");
    // `isDark()` doesn't return a boolean, so the field wins
    assert_eq!(resolve("prefs.dark"), "data.getPrefs().dark");
    assert_eq!(resolve("prefs.compact"), "data.getPrefs().isCompact()");
}

#[test]
fn test_getters_throwing_checked_exceptions_are_skipped() {
    let report = "com.example.Report";
    let ts = fixture_type_system()
        .add_class(
            "com.example.ReportFailure",
            Some(TypeRef::id("java.lang.RuntimeException")),
        )
        .add_method(PAGE, "getReport", TypeRef::id(report))
        .add_class(report, None)
        .add_throwing_method(
            report,
            "getBody",
            string(),
            vec![TypeRef::id("java.io.IOException")],
        )
        .add_throwing_method(
            report,
            "getSummary",
            string(),
            vec![TypeRef::id("com.example.ReportFailure")],
        );
    let model = model_with(ts, CompilerConfig::default());
    let root = page_root(&model);

    assert!(matches!(
        root.get_child("report.body", ChildType::EscapedVar),
        Err(ContextError::FieldNotFound { ref name, .. }) if name == "body"
    ));
    let summary = root.get_child("report.summary", ChildType::EscapedVar).unwrap();
    assert_eq!(text(&summary), "data.getReport().getSummary()");
}

#[test]
fn test_outer_names_resolve_inside_unbounded_loop() {
    let model = fixture_model();
    let root = page_root(&model);
    let anything = root.get_child("anything", ChildType::Section).unwrap();
    assert_eq!(
        anything.begin_section_rendering_code().unwrap(),
        "for (java.lang.Object element1 : data.getAnything()) {\n"
    );
    assert_eq!(
        anything.current_expression().type_ref(),
        &TypeRef::id("java.lang.Object")
    );

    let title = anything.get_child("title", ChildType::EscapedVar).unwrap();
    assert_eq!(text(&title), "data.getTitle()");
    let dot = anything.get_child(".", ChildType::EscapedVar).unwrap();
    assert_eq!(text(&dot), "element1");
}

#[test]
fn test_unbounded_member_type_fails_lookup() {
    let ts = fixture_type_system().add_method(
        PAGE,
        "getMystery",
        TypeRef::generic(BOX, vec![TypeRef::wildcard()]),
    );
    let model = model_with(ts, CompilerConfig::default());
    let root = page_root(&model);

    let err = root
        .get_child("mystery.content.title", ChildType::EscapedVar)
        .unwrap_err();
    assert!(matches!(
        err,
        ContextError::InvalidField { ref name, source: TypeError::UnboundedWildcard(_) } if name == "title"
    ));
    assert_eq!(err.type_error().map(|e| e.kind()), Some(ErrorKind::Type));
}

#[test]
fn test_root_type_must_be_known() {
    let model = model_with(InMemoryTypeSystem::with_java_defaults(), CompilerConfig::default());
    let result = TemplateCompilerContext::new(&model, &JavaRenderingCodeGenerator, TypeRef::id("T"));
    assert!(matches!(
        result,
        Err(ContextError::RootContext(TypeError::Unresolved(_)))
    ));
}
