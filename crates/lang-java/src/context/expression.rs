use stachec_api::models::TypeRef;
use std::fmt;

/// A piece of Java source that evaluates to a value of a known type.
///
/// `path` lists the template names that led here, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaExpression {
    text: String,
    type_ref: TypeRef,
    path: Vec<String>,
}

impl JavaExpression {
    pub fn new(text: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            text: text.into(),
            type_ref,
            path: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// A step further down: `text` reached from `self` through `name`.
    pub fn member(&self, text: impl Into<String>, type_ref: TypeRef, name: &str) -> Self {
        let mut path = self.path.clone();
        path.push(name.to_string());
        Self {
            text: text.into(),
            type_ref,
            path,
        }
    }

    /// Another accessor for the same template path, e.g. a loop variable
    /// standing in for the iterated collection's elements.
    pub fn derive(&self, text: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            text: text.into(),
            type_ref,
            path: self.path.clone(),
        }
    }
}

impl fmt::Display for JavaExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
