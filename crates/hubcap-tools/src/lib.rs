//! GitHub tools for LLM agents.
//!
//! Each tool wraps one GitHub REST operation behind a schema-described,
//! validated input and reshapes the response into a compact JSON object.
//! [`ToolRegistry::builder`] composes the full set: one shared client,
//! approval flags resolved for mutating tools, optional preset filtering.
//!
//! This layer supplies approval flags but never enforces them; the calling
//! agent framework owns the human-in-the-loop gate, as well as concurrency,
//! cancellation and retry decisions.

pub mod builtins;
mod error;
mod registry;
mod traits;

pub use error::ToolError;
pub use registry::{RegistryBuilder, RegistryError, ToolRegistry};
pub use traits::{BoxedTool, Tool};
