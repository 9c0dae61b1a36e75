//! Template context resolution.
//!
//! `TemplateCompilerContext` is the entry point: the template compiler asks
//! it for a child per named node and for the code that opens, renders and
//! closes that node.

pub mod compiler;
pub mod expression;
pub mod generator;
pub mod rendering;
pub mod variables;

pub use compiler::{ChildType, TemplateCompilerContext};
pub use expression::JavaExpression;
pub use generator::{JavaRenderingCodeGenerator, RenderingCodeGenerator};
pub use rendering::{ContextVariant, RenderingContext, SectionShape};
pub use variables::VariableContext;
