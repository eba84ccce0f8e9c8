use crate::error::{Result, StoryforgeError};
use crate::llm::extract::{truncate_preview, PREVIEW_LIMIT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Structured specification produced by the requirements stage.
///
/// Field names mirror the JSON schema the stage prompt demands, so the
/// struct both decodes the model's answer and serializes back into the
/// exact shape embedded in downstream prompts and `specification.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub functional_requirements: Vec<String>,
    #[serde(default)]
    pub non_functional_requirements: Vec<String>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub api_endpoints: Vec<ApiEndpoint>,
    #[serde(default)]
    pub acceptance_criteria_gherkin: Vec<GherkinScenario>,
    #[serde(default)]
    pub tech_choice: TechChoice,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(rename = "in", default)]
    pub in_scope: Vec<String>,
    #[serde(rename = "out", default)]
    pub out_of_scope: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// Models frequently omit the flag for key fields; treat those as required.
    #[serde(default = "default_true")]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEndpoint {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub request_body_example: serde_json::Value,
    #[serde(default)]
    pub response_example: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GherkinScenario {
    pub feature: String,
    pub scenario: String,
    #[serde(default)]
    pub given: Vec<String>,
    #[serde(default)]
    pub when: Vec<String>,
    #[serde(default)]
    pub then: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechChoice {
    pub language: String,
    pub framework: String,
    pub test_framework: String,
}

impl Default for TechChoice {
    fn default() -> Self {
        Self {
            language: "python".to_string(),
            framework: "fastapi".to_string(),
            test_framework: "pytest".to_string(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Specification {
    /// Reject structurally empty specifications the downstream stages
    /// cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(self.structural_error("has an empty title"));
        }
        if self.entities.is_empty() {
            return Err(self.structural_error("defines no entities"));
        }
        for entity in &self.entities {
            if entity.name.trim().is_empty() {
                return Err(self.structural_error("contains an unnamed entity"));
            }
        }
        if self.api_endpoints.is_empty() {
            return Err(self.structural_error("defines no API endpoints"));
        }
        Ok(())
    }

    /// Pretty-printed JSON as embedded in the code and test stage prompts.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn structural_error(&self, reason: &str) -> StoryforgeError {
        StoryforgeError::MalformedOutput {
            reason: format!("specification {reason}"),
            preview: truncate_preview(
                &serde_json::to_string(self).unwrap_or_default(),
                PREVIEW_LIMIT,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn make_spec_value() -> serde_json::Value {
        json!({
            "title": "User Account API",
            "summary": "A small REST service for managing user accounts.",
            "scope": {
                "in": ["User CRUD"],
                "out": ["Authentication"]
            },
            "functional_requirements": ["Users can be created"],
            "non_functional_requirements": ["Responses under 100ms"],
            "entities": [
                {
                    "name": "User",
                    "fields": [
                        {"name": "id", "type": "int", "required": true},
                        {"name": "name", "type": "str", "required": true},
                        {"name": "email", "type": "str", "required": false}
                    ]
                }
            ],
            "api_endpoints": [
                {
                    "method": "POST",
                    "path": "/users",
                    "description": "Create a user",
                    "request_body_example": {"id": 1, "name": "A", "email": "a@test.com"},
                    "response_example": {"id": 1}
                },
                {
                    "method": "GET",
                    "path": "/users",
                    "description": "List users",
                    "request_body_example": {},
                    "response_example": []
                }
            ],
            "acceptance_criteria_gherkin": [
                {
                    "feature": "User management",
                    "scenario": "Create a user",
                    "given": ["the service is running"],
                    "when": ["a valid user payload is posted"],
                    "then": ["the user is returned with status 200"]
                }
            ],
            "tech_choice": {
                "language": "python",
                "framework": "fastapi",
                "test_framework": "pytest"
            }
        })
    }

    fn make_spec() -> Specification {
        serde_json::from_value(make_spec_value()).unwrap()
    }

    // ========================================================================
    // Deserialization
    // ========================================================================

    #[test]
    fn test_full_schema_deserializes() {
        let spec = make_spec();
        assert_eq!(spec.title, "User Account API");
        assert_eq!(spec.entities.len(), 1);
        assert_eq!(spec.entities[0].name, "User");
        assert_eq!(spec.entities[0].fields.len(), 3);
        assert_eq!(spec.api_endpoints.len(), 2);
        assert_eq!(spec.acceptance_criteria_gherkin[0].when.len(), 1);
        assert_eq!(spec.tech_choice.framework, "fastapi");
    }

    #[test]
    fn test_scope_uses_in_out_keys() {
        let spec = make_spec();
        assert_eq!(spec.scope.in_scope, vec!["User CRUD"]);
        assert_eq!(spec.scope.out_of_scope, vec!["Authentication"]);

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["scope"]["in"], json!(["User CRUD"]));
        assert_eq!(value["scope"]["out"], json!(["Authentication"]));
    }

    #[test]
    fn test_field_type_uses_type_key() {
        let spec = make_spec();
        assert_eq!(spec.entities[0].fields[0].field_type, "int");

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["entities"][0]["fields"][0]["type"], json!("int"));
    }

    #[test]
    fn test_omitted_required_flag_defaults_true() {
        let field: FieldDef =
            serde_json::from_value(json!({"name": "id", "type": "int"})).unwrap();
        assert!(field.required);
    }

    #[test]
    fn test_omitted_sections_default() {
        let spec: Specification = serde_json::from_value(json!({
            "title": "Minimal",
            "entities": [{"name": "Item", "fields": []}],
            "api_endpoints": [{"method": "GET", "path": "/items"}]
        }))
        .unwrap();
        assert!(spec.summary.is_empty());
        assert!(spec.scope.in_scope.is_empty());
        assert!(spec.functional_requirements.is_empty());
        assert_eq!(spec.tech_choice.language, "python");
        assert_eq!(spec.tech_choice.test_framework, "pytest");
    }

    // ========================================================================
    // Validation
    // ========================================================================

    #[test]
    fn test_validate_accepts_complete_spec() {
        assert!(make_spec().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_title_fails() {
        let mut spec = make_spec();
        spec.title = "   ".to_string();
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("empty title"));
    }

    #[test]
    fn test_validate_no_entities_fails() {
        let mut spec = make_spec();
        spec.entities.clear();
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("no entities"));
    }

    #[test]
    fn test_validate_unnamed_entity_fails() {
        let mut spec = make_spec();
        spec.entities[0].name = String::new();
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("unnamed entity"));
    }

    #[test]
    fn test_validate_no_endpoints_fails() {
        let mut spec = make_spec();
        spec.api_endpoints.clear();
        let err = spec.validate().unwrap_err();
        assert!(matches!(err, StoryforgeError::MalformedOutput { .. }));
    }

    // ========================================================================
    // Serialization round trips
    // ========================================================================

    #[test]
    fn test_save_writes_pretty_json() {
        let spec = make_spec();
        let file = NamedTempFile::new().unwrap();
        spec.save(file.path()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("\n"));
        let reloaded: Specification = serde_json::from_str(&content).unwrap();
        assert_eq!(reloaded, spec);
    }

    #[test]
    fn test_pretty_json_contains_schema_keys() {
        let rendered = make_spec().to_pretty_json().unwrap();
        assert!(rendered.contains("\"functional_requirements\""));
        assert!(rendered.contains("\"acceptance_criteria_gherkin\""));
        assert!(rendered.contains("\"tech_choice\""));
    }
}
