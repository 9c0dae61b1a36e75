use super::expression::JavaExpression;
use super::variables::VariableContext;
use crate::error::TypeError;
use crate::types::{JavaLanguageModel, KnownType, ObjectKind};

/// Turns a resolved value into the statement that writes it out.
pub trait RenderingCodeGenerator: Send + Sync {
    fn generate_rendering_code(
        &self,
        model: &JavaLanguageModel,
        expression: &JavaExpression,
        variables: &VariableContext,
    ) -> Result<String, TypeError>;
}

/// Renders through `String.valueOf` or the value's own `render` method.
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaRenderingCodeGenerator;

impl RenderingCodeGenerator for JavaRenderingCodeGenerator {
    fn generate_rendering_code(
        &self,
        model: &JavaLanguageModel,
        expression: &JavaExpression,
        variables: &VariableContext,
    ) -> Result<String, TypeError> {
        let writer = variables.writer();
        match model.require_type(expression.type_ref())? {
            KnownType::Renderable(_) => Ok(format!("{}.render({});\n", expression, writer)),
            KnownType::Scalar(scalar) if scalar.is_array() => {
                Err(TypeError::NotRenderable(expression.type_ref().to_string()))
            }
            KnownType::Scalar(_) => Ok(format!("{}.append(String.valueOf({}));\n", writer, expression)),
            KnownType::Object(object) => match object.kind {
                ObjectKind::String => Ok(format!("{}.append({});\n", writer, expression)),
                ObjectKind::Boxed(_) => {
                    Ok(format!("{}.append(String.valueOf({}));\n", writer, expression))
                }
                _ => Err(TypeError::NotRenderable(expression.type_ref().to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InMemoryTypeSystem;
    use stachec_api::models::TypeRef;
    use stachec_core::CompilerConfig;
    use std::sync::Arc;

    fn generate(ty: TypeRef) -> Result<String, TypeError> {
        let ts = InMemoryTypeSystem::with_java_defaults().add_class("com.example.Item", None);
        let model = JavaLanguageModel::new(Arc::new(ts), CompilerConfig::default());
        let variables = VariableContext::from_config(model.config());
        JavaRenderingCodeGenerator.generate_rendering_code(
            &model,
            &JavaExpression::new("v", ty),
            &variables,
        )
    }

    #[test]
    fn test_text_values() {
        assert_eq!(
            generate(TypeRef::id("java.lang.String")).unwrap(),
            "writer.append(v);\n"
        );
        assert_eq!(
            generate(TypeRef::raw("int")).unwrap(),
            "writer.append(String.valueOf(v));\n"
        );
        assert_eq!(
            generate(TypeRef::id("java.lang.Long")).unwrap(),
            "writer.append(String.valueOf(v));\n"
        );
    }

    #[test]
    fn test_renderable_renders_itself() {
        let ty = TypeRef::generic("stachec.runtime.Renderable", vec![TypeRef::id("com.example.Html")]);
        assert_eq!(generate(ty).unwrap(), "v.render(writer);\n");
    }

    #[test]
    fn test_plain_objects_are_not_text() {
        assert!(matches!(
            generate(TypeRef::id("com.example.Item")),
            Err(TypeError::NotRenderable(_))
        ));
        assert!(matches!(
            generate(TypeRef::array(TypeRef::raw("int"))),
            Err(TypeError::NotRenderable(_))
        ));
        assert!(matches!(
            generate(TypeRef::id("T")),
            Err(TypeError::Unresolved(_))
        ));
    }
}
