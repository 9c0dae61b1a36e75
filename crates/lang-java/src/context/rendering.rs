//! Resolved lexical scopes.
//!
//! A `RenderingContext` is one entry of the scope stack a template is
//! compiled against. It knows the value it was entered with, the value
//! names resolve against (`current`), and the Java code that opens and
//! closes its block. Contexts are immutable and share their enclosing
//! scopes through `Arc`.

use super::expression::JavaExpression;
use crate::error::TypeError;
use crate::types::{JavaLanguageModel, KnownType, ObjectKind, ScalarKind};
use stachec_api::models::TypeRef;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextVariant {
    /// The template's data
    Root,
    /// A scope entered normally
    Owned,
    /// A scope entered through an inverted section
    Inverted,
}

impl fmt::Display for ContextVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContextVariant::Root => "Root",
            ContextVariant::Owned => "Owned",
            ContextVariant::Inverted => "Inverted",
        };
        f.write_str(name)
    }
}

/// How a value behaves when used to open a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionShape {
    /// Not a section: no block is opened
    Plain,
    /// `boolean`, or `java.lang.Boolean` when `nullable`
    Boolean { nullable: bool },
    /// Any `java.lang.Iterable`
    Iteration { element: TypeRef, variable: String },
    Array { element: TypeRef, variable: String },
    /// `java.util.Optional`; `element` is the type of `get()`
    Optional { element: TypeRef },
    /// Any other reference: present unless null
    Nullable,
}

impl SectionShape {
    fn label(&self) -> &'static str {
        match self {
            SectionShape::Plain => "plain",
            SectionShape::Boolean { .. } => "boolean",
            SectionShape::Iteration { .. } => "iteration",
            SectionShape::Array { .. } => "array",
            SectionShape::Optional { .. } => "optional",
            SectionShape::Nullable => "nullable",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderingContext(Arc<Frame>);

#[derive(Debug)]
struct Frame {
    variant: ContextVariant,
    value: JavaExpression,
    current: JavaExpression,
    shape: Result<SectionShape, TypeError>,
    enclosing: Option<RenderingContext>,
    depth: usize,
    /// A leading step of a dotted name. Its markers are emitted together
    /// with those of the scope resolved from it.
    path_step: bool,
}

impl RenderingContext {
    pub fn root(data: JavaExpression) -> Self {
        Self(Arc::new(Frame {
            variant: ContextVariant::Root,
            current: data.clone(),
            value: data,
            shape: Ok(SectionShape::Plain),
            enclosing: None,
            depth: 0,
            path_step: false,
        }))
    }

    /// A scope over the same current value, with no block of its own.
    ///
    /// It stands in for this scope rather than nesting inside it, so it
    /// keeps this scope's depth.
    pub fn owned(&self) -> Self {
        let current = self.current_expression().clone();
        Self(Arc::new(Frame {
            variant: ContextVariant::Owned,
            value: current.clone(),
            current,
            shape: Ok(SectionShape::Plain),
            enclosing: Some(self.clone()),
            depth: self.depth(),
            path_step: false,
        }))
    }

    /// A scope over a variable's `value`. It opens no block.
    pub fn plain(value: JavaExpression, enclosing: &RenderingContext) -> Self {
        Self::nested(ContextVariant::Owned, value, Ok(SectionShape::Plain), enclosing, false)
    }

    /// A leading step of a dotted name, entered only when it is not null.
    pub fn guard(model: &JavaLanguageModel, value: JavaExpression, enclosing: &RenderingContext) -> Self {
        let shape = model.effective_type(value.type_ref()).map(|ty| {
            if ty.is_primitive() {
                SectionShape::Plain
            } else {
                SectionShape::Nullable
            }
        });
        Self::nested(ContextVariant::Owned, value, shape, enclosing, true)
    }

    /// A section over `value`.
    ///
    /// A value that can't open a section still yields a context; the
    /// failure is reported when its markers are requested.
    pub fn section(model: &JavaLanguageModel, value: JavaExpression, enclosing: &RenderingContext) -> Self {
        let shape = section_shape(model, &value, enclosing.depth() + 1);
        Self::nested(ContextVariant::Owned, value, shape, enclosing, false)
    }

    /// An inverted section over `value`. Names keep resolving against `value`.
    pub fn inverted(model: &JavaLanguageModel, value: JavaExpression, enclosing: &RenderingContext) -> Self {
        let shape = section_shape(model, &value, enclosing.depth() + 1);
        Self::nested(ContextVariant::Inverted, value, shape, enclosing, false)
    }

    /// A leading step of an inverted dotted name. The block opens when this
    /// step or any later one is absent.
    pub fn inverted_step(
        model: &JavaLanguageModel,
        value: JavaExpression,
        enclosing: &RenderingContext,
    ) -> Self {
        let shape = section_shape(model, &value, enclosing.depth() + 1);
        Self::nested(ContextVariant::Inverted, value, shape, enclosing, true)
    }

    fn nested(
        variant: ContextVariant,
        value: JavaExpression,
        shape: Result<SectionShape, TypeError>,
        enclosing: &RenderingContext,
        path_step: bool,
    ) -> Self {
        let current = match (variant, &shape) {
            (ContextVariant::Owned, Ok(SectionShape::Iteration { element, variable }))
            | (ContextVariant::Owned, Ok(SectionShape::Array { element, variable })) => {
                value.derive(variable.clone(), element.clone())
            }
            (ContextVariant::Owned, Ok(SectionShape::Optional { element })) => {
                value.derive(format!("{}.get()", value), element.clone())
            }
            _ => value.clone(),
        };
        Self(Arc::new(Frame {
            variant,
            value,
            current,
            shape,
            enclosing: Some(enclosing.clone()),
            depth: enclosing.depth() + 1,
            path_step,
        }))
    }

    pub fn variant(&self) -> ContextVariant {
        self.0.variant
    }

    /// The expression this scope was entered with.
    pub fn value(&self) -> &JavaExpression {
        &self.0.value
    }

    /// The expression names resolve against, and what `.` renders.
    pub fn current_expression(&self) -> &JavaExpression {
        &self.0.current
    }

    pub fn shape(&self) -> Result<&SectionShape, &TypeError> {
        self.0.shape.as_ref()
    }

    pub fn enclosing(&self) -> Option<&RenderingContext> {
        self.0.enclosing.as_ref()
    }

    /// Number of scopes between this one and the root.
    pub fn depth(&self) -> usize {
        self.0.depth
    }

    pub fn is_path_step(&self) -> bool {
        self.0.path_step
    }

    /// The leading step of the dotted name this scope was resolved from.
    fn previous_step(&self) -> Option<&RenderingContext> {
        self.enclosing().filter(|enclosing| enclosing.is_path_step())
    }

    /// Resolve `name` on the current value only.
    pub fn lookup_member(
        &self,
        model: &JavaLanguageModel,
        name: &str,
    ) -> Result<Option<JavaExpression>, TypeError> {
        model.find_member(self.current_expression(), name)
    }

    /// Resolve `name` on the current value, then on each enclosing scope outward.
    pub fn lookup(
        &self,
        model: &JavaLanguageModel,
        name: &str,
    ) -> Result<Option<JavaExpression>, TypeError> {
        let mut scope = Some(self);
        while let Some(context) = scope {
            if let Some(found) = context.lookup_member(model, name)? {
                return Ok(Some(found));
            }
            scope = context.enclosing();
        }
        Ok(None)
    }

    /// Code opening this scope's block, preceded by the blocks of the
    /// leading steps of its dotted name.
    ///
    /// Owned steps nest one block per step. An inverted name opens a single
    /// block that is entered when any of its steps is absent.
    pub fn begin_section_rendering_code(&self) -> Result<String, TypeError> {
        if self.variant() == ContextVariant::Inverted {
            let conditions = self.absence_conditions()?;
            return Ok(format!("if ({}) {{\n", conditions.join(" || ")));
        }

        let mut code = match self.previous_step() {
            Some(step) => step.begin_section_rendering_code()?,
            None => String::new(),
        };
        code.push_str(&self.own_begin()?);
        Ok(code)
    }

    /// Closes everything `begin_section_rendering_code` opened. Empty when
    /// the opening code is an error.
    pub fn end_section_rendering_code(&self) -> String {
        if self.begin_section_rendering_code().is_err() {
            return String::new();
        }
        if self.variant() == ContextVariant::Inverted {
            return "}\n".to_string();
        }

        let mut code = self.own_end().to_string();
        if let Some(step) = self.previous_step() {
            code.push_str(&step.end_section_rendering_code());
        }
        code
    }

    fn own_begin(&self) -> Result<String, TypeError> {
        let shape = self.0.shape.as_ref().map_err(|e| e.clone())?;
        let v = self.value();
        let code = match (self.variant(), shape) {
            (ContextVariant::Root, _) | (_, SectionShape::Plain) => String::new(),
            (_, SectionShape::Boolean { nullable: false }) => format!("if ({}) {{\n", v),
            (_, SectionShape::Boolean { nullable: true }) => {
                format!("if ({} != null && {}) {{\n", v, v)
            }
            (_, SectionShape::Iteration { element, variable })
            | (_, SectionShape::Array { element, variable }) => {
                format!("for ({} {} : {}) {{\n", element, variable, v)
            }
            (_, SectionShape::Optional { .. }) => format!("if ({}.isPresent()) {{\n", v),
            (_, SectionShape::Nullable) => format!("if ({} != null) {{\n", v),
        };
        Ok(code)
    }

    fn own_end(&self) -> &'static str {
        match (self.variant(), &self.0.shape) {
            (ContextVariant::Root, _) | (_, Ok(SectionShape::Plain)) | (_, Err(_)) => "",
            _ => "}\n",
        }
    }

    /// Conditions under which an inverted scope and its inverted leading
    /// steps are absent, outermost first.
    fn absence_conditions(&self) -> Result<Vec<String>, TypeError> {
        let mut conditions = match self.previous_step() {
            Some(step) if step.variant() == ContextVariant::Inverted => step.absence_conditions()?,
            _ => Vec::new(),
        };
        conditions.push(self.absence_condition()?);
        Ok(conditions)
    }

    fn absence_condition(&self) -> Result<String, TypeError> {
        let shape = self.0.shape.as_ref().map_err(|e| e.clone())?;
        let v = self.value();
        let condition = match shape {
            SectionShape::Boolean { nullable: false } => format!("!({})", v),
            SectionShape::Boolean { nullable: true } => format!("{} == null || !{}", v, v),
            SectionShape::Iteration { .. } => format!("{} == null || !{}.iterator().hasNext()", v, v),
            SectionShape::Array { .. } => format!("{} == null || {}.length == 0", v, v),
            SectionShape::Optional { .. } => format!("!{}.isPresent()", v),
            SectionShape::Nullable => format!("{} == null", v),
            SectionShape::Plain => return Err(TypeError::NotSection(v.type_ref().to_string())),
        };
        Ok(condition)
    }

    /// Short human-readable name of the scope, e.g. `Owned iteration`.
    pub fn description(&self) -> String {
        let shape = match &self.0.shape {
            Ok(shape) => shape.label(),
            Err(_) => "invalid",
        };
        format!("{} {}", self.variant(), shape)
    }
}

fn section_shape(
    model: &JavaLanguageModel,
    value: &JavaExpression,
    depth: usize,
) -> Result<SectionShape, TypeError> {
    let ty = model.effective_type(value.type_ref())?;
    let variable = format!("element{}", depth);

    if let Some(element) = ty.component_type() {
        return Ok(SectionShape::Array { element, variable });
    }

    let shape = match model.require_type(&ty)? {
        KnownType::Scalar(scalar) if !scalar.kind.is_numeric() => {
            SectionShape::Boolean { nullable: false }
        }
        KnownType::Scalar(_) => return Err(TypeError::NotSection(ty.to_string())),
        KnownType::Object(object) => match object.kind {
            ObjectKind::Boxed(ScalarKind::Boolean) => SectionShape::Boolean { nullable: true },
            ObjectKind::Iterable => SectionShape::Iteration {
                element: model.iterable_element(&ty),
                variable,
            },
            ObjectKind::Optional => SectionShape::Optional {
                element: model.optional_element(&ty),
            },
            _ => SectionShape::Nullable,
        },
        KnownType::Renderable(_) => SectionShape::Nullable,
    };
    Ok(shape)
}
