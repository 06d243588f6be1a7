//! Schema and spec types describing tools to a model API

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON Schema for a tool's input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        rename = "additionalProperties"
    )]
    pub additional_properties: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonSchema>>,
}

impl JsonSchema {
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            description: None,
            properties: Some(serde_json::json!({})),
            required: None,
            additional_properties: Some(false),
            items: None,
        }
    }

    pub fn array(items: JsonSchema) -> Self {
        Self {
            schema_type: "array".to_string(),
            description: None,
            properties: None,
            required: None,
            additional_properties: None,
            items: Some(Box::new(items)),
        }
    }

    pub fn string() -> Self {
        Self::leaf("string")
    }

    pub fn integer() -> Self {
        Self::leaf("integer")
    }

    pub fn boolean() -> Self {
        Self::leaf("boolean")
    }

    fn leaf(schema_type: &str) -> Self {
        Self {
            schema_type: schema_type.to_string(),
            description: None,
            properties: None,
            required: None,
            additional_properties: None,
            items: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn property(mut self, name: &str, schema: JsonSchema) -> Self {
        let props = self.properties.get_or_insert(serde_json::json!({}));
        if let Some(obj) = props.as_object_mut() {
            obj.insert(
                name.to_string(),
                serde_json::to_value(schema).unwrap_or(Value::Null),
            );
        }
        self
    }

    pub fn required(mut self, fields: &[&str]) -> Self {
        self.required = Some(fields.iter().map(|s| s.to_string()).collect());
        self
    }
}

/// Tool specification handed to the model API for tool selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: JsonSchema,
    /// Present only for mutating tools; the calling framework is responsible
    /// for enforcing it as a human-in-the-loop gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_approval: Option<bool>,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: JsonSchema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: schema,
            requires_approval: None,
        }
    }

    pub fn with_approval(mut self, requires_approval: bool) -> Self {
        self.requires_approval = Some(requires_approval);
        self
    }
}

/// Result of a tool execution: a compact JSON object for the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput(pub Value);

impl ToolOutput {
    pub fn json(value: Value) -> Self {
        Self(value)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self(Value::String(text.into()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_text(&self) -> Option<&str> {
        self.0.as_str()
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_builder() {
        let schema = JsonSchema::object()
            .property(
                "owner",
                JsonSchema::string().description("Repository owner"),
            )
            .property("number", JsonSchema::integer())
            .required(&["owner", "number"]);

        assert_eq!(schema.schema_type, "object");
        assert_eq!(
            schema.required,
            Some(vec!["owner".to_string(), "number".to_string()])
        );
        let props = schema.properties.unwrap();
        assert_eq!(props["owner"]["type"], "string");
        assert_eq!(props["number"]["type"], "integer");
    }

    #[test]
    fn test_array_schema_declares_items() {
        let schema = JsonSchema::array(JsonSchema::string()).description("Label names");
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["type"], "array");
        assert_eq!(json["items"]["type"], "string");
    }

    #[test]
    fn test_tool_spec_approval_serialization() {
        let read = ToolSpec::new("getIssue", "Fetch one issue", JsonSchema::object());
        let json = serde_json::to_value(&read).unwrap();
        assert!(json.get("requires_approval").is_none());

        let write = ToolSpec::new("createIssue", "Open an issue", JsonSchema::object())
            .with_approval(true);
        let json = serde_json::to_value(&write).unwrap();
        assert_eq!(json["requires_approval"], true);
    }

    #[test]
    fn test_tool_output_accessors() {
        let out = ToolOutput::json(serde_json::json!({"name": "hubcap"}));
        assert_eq!(out.as_value()["name"], "hubcap");
        assert!(out.as_text().is_none());

        let text = ToolOutput::text("done");
        assert_eq!(text.as_text(), Some("done"));
    }
}
