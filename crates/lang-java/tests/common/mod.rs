use stachec_api::models::TypeRef;
use stachec_core::CompilerConfig;
use stachec_java::types::{InMemoryTypeSystem, JavaLanguageModel, MemberInfo, MemberKind};
use std::sync::{Arc, Once};

pub const PAGE: &str = "com.example.Page";
pub const USER: &str = "com.example.User";
pub const ADDRESS: &str = "com.example.Address";
pub const ITEM: &str = "com.example.Item";
pub const PROFILE: &str = "com.example.Profile";
pub const BOX: &str = "com.example.Box";

#[allow(dead_code)]
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[allow(dead_code)]
pub fn string() -> TypeRef {
    TypeRef::id("java.lang.String")
}

#[allow(dead_code)]
pub fn list_of(arg: TypeRef) -> TypeRef {
    TypeRef::generic("java.util.List", vec![arg])
}

/// The domain every behavior test compiles against:
///
/// ```text
/// Page    { user: User, title: String, items: List<Item>, address: Address,
///           settings: Map<String, Integer>, groups: List<List<Item>>,
///           anything: List<?>, box: Box<Item>, matrix: int[][] }
/// User    { name, age: int, active: boolean, subscribed: Boolean,
///           address: Address, items: List<Item>, nickname: Optional<String>,
///           scores: int[], profile: Profile, email (field) }
/// Address { city: String }
/// Item    { title: String, price: double, onSale: boolean }
/// Profile implements Renderable<Html>
/// Box<T>  { content: T }
/// ```
#[allow(dead_code)]
pub fn fixture_type_system() -> InMemoryTypeSystem {
    InMemoryTypeSystem::with_java_defaults()
        .add_class(PAGE, None)
        .add_method(PAGE, "getUser", TypeRef::id(USER))
        .add_method(PAGE, "getTitle", string())
        .add_method(PAGE, "getItems", list_of(TypeRef::id(ITEM)))
        .add_method(PAGE, "getAddress", TypeRef::id(ADDRESS))
        .add_method(
            PAGE,
            "getSettings",
            TypeRef::generic(
                "java.util.Map",
                vec![string(), TypeRef::id("java.lang.Integer")],
            ),
        )
        .add_method(PAGE, "getGroups", list_of(list_of(TypeRef::id(ITEM))))
        .add_method(PAGE, "getAnything", list_of(TypeRef::wildcard()))
        .add_method(
            PAGE,
            "getBox",
            TypeRef::generic(BOX, vec![TypeRef::id(ITEM)]),
        )
        .add_method(
            PAGE,
            "getMatrix",
            TypeRef::array(TypeRef::array(TypeRef::raw("int"))),
        )
        .add_class(USER, None)
        .add_method(USER, "getName", string())
        .add_method(USER, "getAge", TypeRef::raw("int"))
        .add_method(USER, "isActive", TypeRef::raw("boolean"))
        .add_method(USER, "getSubscribed", TypeRef::id("java.lang.Boolean"))
        .add_method(USER, "getAddress", TypeRef::id(ADDRESS))
        .add_method(USER, "getItems", list_of(TypeRef::id(ITEM)))
        .add_method(
            USER,
            "getNickname",
            TypeRef::generic("java.util.Optional", vec![string()]),
        )
        .add_method(USER, "getScores", TypeRef::array(TypeRef::raw("int")))
        .add_method(USER, "getProfile", TypeRef::id(PROFILE))
        .add_field(USER, "email", string())
        .add_member(private_field(USER, "password", string()))
        .add_class(ADDRESS, None)
        .add_method(ADDRESS, "getCity", string())
        .add_class(ITEM, None)
        .add_method(ITEM, "getTitle", string())
        .add_method(ITEM, "getPrice", TypeRef::raw("double"))
        .add_method(ITEM, "isOnSale", TypeRef::raw("boolean"))
        .add_class(PROFILE, None)
        .implements(
            PROFILE,
            TypeRef::generic(
                "stachec.runtime.Renderable",
                vec![TypeRef::id("com.example.Html")],
            ),
        )
        .add_class_with_type_params(BOX, None, vec!["T"])
        .add_method(BOX, "getContent", TypeRef::id("T"))
}

#[allow(dead_code)]
pub fn private_field(class_fqn: &str, name: &str, type_ref: TypeRef) -> MemberInfo {
    MemberInfo {
        name: name.to_string(),
        fqn: format!("{}#{}", class_fqn, name),
        kind: MemberKind::Field,
        declaring_type: class_fqn.to_string(),
        type_ref,
        parameters: None,
        modifiers: vec!["private".to_string()],
        throws: vec![],
    }
}

#[allow(dead_code)]
pub fn model_with(ts: InMemoryTypeSystem, config: CompilerConfig) -> JavaLanguageModel {
    init_tracing();
    JavaLanguageModel::new(Arc::new(ts), config)
}

/// Fixture model with debug comments off, so generated code can be compared verbatim.
#[allow(dead_code)]
pub fn fixture_model() -> JavaLanguageModel {
    let config = CompilerConfig {
        debug_comments: false,
        ..CompilerConfig::default()
    };
    model_with(fixture_type_system(), config)
}
