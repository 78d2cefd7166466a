//! OpenAI function-calling generator

use crate::emitter::CodeEmitter;
use crate::ToolGenerator;
use api2gen_common::{GenerationConfig, Result, ToolFamily, ToolFunction};
use api2gen_parser::{BuildOutput, FunctionSpecBuilder, OpenApiDocument};

/// Emits OpenAI tool specs and a Python client calling the API
pub struct OpenAiGenerator {
    config: GenerationConfig,
    emitter: CodeEmitter,
}

impl OpenAiGenerator {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let emitter = CodeEmitter::new(config.token_placeholder.clone())?;
        Ok(Self { config, emitter })
    }

    /// Configured base URL, else the one the document declares
    pub fn base_url(&self, document: &OpenApiDocument) -> String {
        self.config
            .base_url
            .clone()
            .unwrap_or_else(|| document.base_url())
    }
}

impl ToolGenerator for OpenAiGenerator {
    fn family(&self) -> ToolFamily {
        ToolFamily::OpenAi
    }

    fn gen_spec(&self, document: &OpenApiDocument) -> Result<BuildOutput> {
        Ok(FunctionSpecBuilder::new(document, &self.config).build())
    }

    fn gen_code(&self, document: &OpenApiDocument, functions: &[ToolFunction]) -> Result<String> {
        self.emitter
            .emit(functions, &self.base_url(document), document.version())
    }
}
