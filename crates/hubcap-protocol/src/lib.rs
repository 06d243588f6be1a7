//! Shared vocabulary for the hubcap tool layer.
//!
//! Everything an agent framework needs to talk about tools without executing
//! them: the closed tool-name enumeration, preset tables, approval policy,
//! and the schema/spec/output types tools are described with.

pub mod approval;
pub mod names;
pub mod schema;

pub use approval::ApprovalPolicy;
pub use names::{Preset, PresetError, ToolName, ToolNameError};
pub use schema::{JsonSchema, ToolOutput, ToolSpec};
