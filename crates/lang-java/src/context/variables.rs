use stachec_core::{CompilerConfig, TemplateFormat};

/// Names of the writers generated code appends to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableContext {
    writer: String,
    unescaped_writer: String,
}

impl VariableContext {
    pub fn new(writer: impl Into<String>, unescaped_writer: impl Into<String>) -> Self {
        Self {
            writer: writer.into(),
            unescaped_writer: unescaped_writer.into(),
        }
    }

    /// Text templates never escape, so both outputs share the raw writer.
    pub fn from_config(config: &CompilerConfig) -> Self {
        match config.format {
            TemplateFormat::Html => Self::new(&config.writer, &config.unescaped_writer),
            TemplateFormat::Text => Self::new(&config.unescaped_writer, &config.unescaped_writer),
        }
    }

    /// The writer escaped output goes to.
    pub fn writer(&self) -> &str {
        &self.writer
    }

    pub fn unescaped_writer(&self) -> &str {
        &self.unescaped_writer
    }

    /// A context whose escaped output goes straight to the raw writer.
    pub fn unescaped(&self) -> Self {
        Self::new(&self.unescaped_writer, &self.unescaped_writer)
    }
}
