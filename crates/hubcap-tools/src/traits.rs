//! The Tool trait

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use hubcap_protocol::{JsonSchema, ToolName, ToolOutput, ToolSpec};

use crate::ToolError;

/// A named, schema-validated callable exposed to an LLM agent, wrapping one
/// remote operation.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Identifier within the closed tool enumeration.
    fn name(&self) -> ToolName;

    /// Description consumed by the model for tool selection.
    fn description(&self) -> &str;

    /// JSON schema of the expected input.
    fn schema(&self) -> JsonSchema;

    /// Resolved approval flag. `Some` for mutating tools, `None` for
    /// read-only ones — read-only tools never carry a flag.
    fn approval(&self) -> Option<bool> {
        None
    }

    /// Execute against the remote API. Input is validated first; validation
    /// failures surface as [`ToolError::InvalidInput`] without any remote
    /// call having been made.
    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError>;
}

/// A boxed tool for dynamic dispatch.
pub type BoxedTool = Arc<dyn Tool>;

impl dyn Tool {
    /// Specification handed to the model API.
    pub fn spec(&self) -> ToolSpec {
        let spec = ToolSpec::new(self.name().as_str(), self.description(), self.schema());
        match self.approval() {
            Some(flag) => spec.with_approval(flag),
            None => spec,
        }
    }
}
