//! Context resolution for statically compiled mustache templates.
//!
//! Given the Java type of a template's data, resolves every name a template
//! uses to a typed Java expression and produces the code that renders it.
//!
//! ```ignore
//! let ts = InMemoryTypeSystem::with_java_defaults();
//! let model = JavaLanguageModel::new(Arc::new(ts), CompilerConfig::default());
//! let root = TemplateCompilerContext::new(&model, &JavaRenderingCodeGenerator, data_type)?;
//! let name = root.get_child("user.name", ChildType::EscapedVar)?;
//! let code = name.rendering_code()?;
//! ```

pub mod context;
pub mod error;
pub mod types;

pub use context::{
    ChildType, JavaExpression, JavaRenderingCodeGenerator, RenderingCodeGenerator,
    RenderingContext, TemplateCompilerContext, VariableContext,
};
pub use error::{ContextError, ErrorKind, TypeError};
pub use types::{InMemoryTypeSystem, JavaLanguageModel, JavaTypeSystem, KnownType, KnownTypes};
