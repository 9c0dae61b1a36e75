//! The scope chain a template is compiled against.
//!
//! Every template node that names a value gets its own
//! `TemplateCompilerContext`, derived from the context of the node that
//! encloses it. Contexts are immutable; children hold their parent, parents
//! never hold children.

use super::expression::JavaExpression;
use super::generator::RenderingCodeGenerator;
use super::rendering::RenderingContext;
use super::variables::VariableContext;
use crate::error::{ContextError, Result};
use crate::types::JavaLanguageModel;
use stachec_api::models::TypeRef;
use std::fmt;
use std::sync::Arc;

/// How a template node refers to its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildType {
    Root,
    /// `{{name}}`
    EscapedVar,
    /// `{{{name}}}` or `{{& name}}`
    UnescapedVar,
    /// `{{#name}}`
    Section,
    /// `{{^name}}`
    Inverted,
    /// `{{> name}}` and `{{< name}}`
    Parent,
    /// An intermediate step of a dotted name
    Path,
}

impl ChildType {
    /// Link kind used for the leading steps of a dotted name.
    pub fn path_type(self) -> ChildType {
        match self {
            ChildType::Inverted => ChildType::Inverted,
            _ => ChildType::Path,
        }
    }

    pub fn is_var(self) -> bool {
        matches!(self, ChildType::EscapedVar | ChildType::UnescapedVar)
    }
}

/// Position of a name within a dotted path.
#[derive(Debug, Clone, Copy)]
enum Step {
    Leading(ChildType),
    Last(ChildType),
}

#[derive(Clone)]
pub struct TemplateCompilerContext<'a> {
    node: Arc<CompilerNode<'a>>,
}

struct CompilerNode<'a> {
    enclosed: Option<EnclosedRelation<'a>>,
    context: RenderingContext,
    model: &'a JavaLanguageModel,
    generator: &'a dyn RenderingCodeGenerator,
    variables: VariableContext,
    child_type: ChildType,
}

/// The name a context was resolved from, and the context it was resolved in.
struct EnclosedRelation<'a> {
    name: String,
    parent: TemplateCompilerContext<'a>,
}

impl<'a> TemplateCompilerContext<'a> {
    /// The root context of a template whose data has type `data_type`.
    pub fn new(
        model: &'a JavaLanguageModel,
        generator: &'a dyn RenderingCodeGenerator,
        data_type: TypeRef,
    ) -> Result<Self> {
        model
            .require_type(&data_type)
            .map_err(ContextError::RootContext)?;
        let context = RenderingContext::root(model.root_expression(data_type));
        Ok(Self::from_node(CompilerNode {
            enclosed: None,
            context,
            model,
            generator,
            variables: VariableContext::from_config(model.config()),
            child_type: ChildType::Root,
        }))
    }

    fn from_node(node: CompilerNode<'a>) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// Resolve `path` in this context.
    ///
    /// `.` names the current value. Dotted paths resolve their first name
    /// through the whole scope chain and every later name on the value
    /// before it. Leading names are null-checked, or inverted along with
    /// the last one.
    pub fn get_child(&self, path: &str, child_type: ChildType) -> Result<Self> {
        let context = if path == "." {
            self.current_scope(child_type)?
        } else if child_type == ChildType::Parent {
            self.node.context.owned()
        } else {
            self.resolve_path(path, child_type)?
        };

        tracing::debug!(
            "resolved '{}' as {:?}: {} ({})",
            path,
            child_type,
            context.current_expression(),
            context.current_expression().type_ref()
        );

        Ok(Self::from_node(CompilerNode {
            enclosed: Some(EnclosedRelation {
                name: path.to_string(),
                parent: self.clone(),
            }),
            context,
            model: self.node.model,
            generator: self.node.generator,
            variables: self.node.variables.clone(),
            child_type,
        }))
    }

    fn current_scope(&self, child_type: ChildType) -> Result<RenderingContext> {
        match child_type {
            ChildType::EscapedVar
            | ChildType::UnescapedVar
            | ChildType::Section
            | ChildType::Path => Ok(self.node.context.owned()),
            ChildType::Inverted => Err(ContextError::CurrentSectionInverted),
            ChildType::Parent | ChildType::Root => Err(ContextError::CurrentSectionParent),
        }
    }

    fn resolve_path(&self, path: &str, child_type: ChildType) -> Result<RenderingContext> {
        let names: Vec<&str> = path.split('.').collect();
        if names.is_empty() {
            return Err(ContextError::Internal(format!("empty path '{}'", path)));
        }

        let mut enclosing = self.node.context.owned();
        for (i, name) in names.iter().enumerate() {
            let step = if i + 1 < names.len() {
                Step::Leading(child_type.path_type())
            } else {
                Step::Last(child_type)
            };
            enclosing = self.resolve_step(name, step, &enclosing, i == 0)?;
        }
        Ok(enclosing)
    }

    fn resolve_step(
        &self,
        name: &str,
        step: Step,
        enclosing: &RenderingContext,
        first: bool,
    ) -> Result<RenderingContext> {
        let model = self.node.model;
        let lookup = if first {
            enclosing.lookup(model, name)
        } else {
            enclosing.lookup_member(model, name)
        };
        let found = lookup.map_err(|source| ContextError::InvalidField {
            name: name.to_string(),
            source,
        })?;

        let Some(value) = found else {
            return Err(ContextError::FieldNotFound {
                name: name.to_string(),
                scope: enclosing.current_expression().type_ref().to_string(),
            });
        };

        match step {
            Step::Leading(ChildType::Inverted) => {
                Ok(RenderingContext::inverted_step(model, value, enclosing))
            }
            Step::Leading(ChildType::Path) => Ok(RenderingContext::guard(model, value, enclosing)),
            Step::Last(ChildType::EscapedVar | ChildType::UnescapedVar | ChildType::Path) => {
                Ok(RenderingContext::plain(value, enclosing))
            }
            Step::Last(ChildType::Section) => Ok(RenderingContext::section(model, value, enclosing)),
            Step::Last(ChildType::Inverted) => {
                Ok(RenderingContext::inverted(model, value, enclosing))
            }
            Step::Leading(child_type) | Step::Last(child_type) => {
                Err(ContextError::IllegalChildType(child_type))
            }
        }
    }

    /// Code rendering the current value through the escaping writer.
    pub fn rendering_code(&self) -> Result<String> {
        self.wrap_section(&self.node.variables)
    }

    /// Code rendering the current value through the raw writer.
    pub fn unescaped_rendering_code(&self) -> Result<String> {
        self.wrap_section(&self.node.variables.unescaped())
    }

    fn wrap_section(&self, variables: &VariableContext) -> Result<String> {
        let begin = self.begin_section_rendering_code()?;
        let current = self.current_expression();
        let body = self
            .node
            .generator
            .generate_rendering_code(self.node.model, current, variables)
            .map_err(|source| ContextError::Render {
                expression: current.to_string(),
                source,
            })?;
        Ok(format!("{}{}{}", begin, body, self.end_section_rendering_code()))
    }

    pub fn begin_section_rendering_code(&self) -> Result<String> {
        let context = &self.node.context;
        let code = context
            .begin_section_rendering_code()
            .map_err(|source| ContextError::Section {
                expression: context.value().to_string(),
                source,
            })?;

        if self.node.model.config().debug_comments {
            Ok(format!(
                "/* RenderingContext: {} */\n/* Type: {} */\n{}",
                context.description(),
                context.current_expression().type_ref(),
                code
            ))
        } else {
            Ok(code)
        }
    }

    pub fn end_section_rendering_code(&self) -> String {
        self.node.context.end_section_rendering_code()
    }

    /// A context for a partial: same scope, but not enclosed by anything.
    pub fn create_for_partial(&self) -> Self {
        Self::from_node(CompilerNode {
            enclosed: None,
            context: self.node.context.clone(),
            model: self.node.model,
            generator: self.node.generator,
            variables: self.node.variables.clone(),
            child_type: ChildType::Parent,
        })
    }

    pub fn is_enclosed(&self) -> bool {
        self.node.enclosed.is_some()
    }

    /// The path this context was resolved from.
    pub fn current_enclosed_context_name(&self) -> Option<&str> {
        self.node.enclosed.as_ref().map(|e| e.name.as_str())
    }

    pub fn parent_context(&self) -> Option<&TemplateCompilerContext<'a>> {
        self.node.enclosed.as_ref().map(|e| &e.parent)
    }

    pub fn unescaped_writer_expression(&self) -> &str {
        self.node.variables.unescaped_writer()
    }

    pub fn child_type(&self) -> ChildType {
        self.node.child_type
    }

    pub fn rendering_context(&self) -> &RenderingContext {
        &self.node.context
    }

    pub fn current_expression(&self) -> &JavaExpression {
        self.node.context.current_expression()
    }
}

impl fmt::Debug for TemplateCompilerContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateCompilerContext")
            .field("child_type", &self.node.child_type)
            .field("enclosed", &self.current_enclosed_context_name())
            .field("context", &self.node.context)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_type() {
        assert_eq!(ChildType::Inverted.path_type(), ChildType::Inverted);
        for child_type in [
            ChildType::Root,
            ChildType::EscapedVar,
            ChildType::UnescapedVar,
            ChildType::Section,
            ChildType::Parent,
            ChildType::Path,
        ] {
            assert_eq!(child_type.path_type(), ChildType::Path);
        }
    }

    #[test]
    fn test_is_var() {
        assert!(ChildType::EscapedVar.is_var());
        assert!(ChildType::UnescapedVar.is_var());
        assert!(!ChildType::Section.is_var());
        assert!(!ChildType::Path.is_var());
    }
}
