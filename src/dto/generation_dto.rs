use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenerateMaterialPayload {
    #[serde(default, deserialize_with = "string_or_absent")]
    #[validate(required, length(min = 1))]
    pub course_title: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    #[validate(required, length(min = 1))]
    pub material_title: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    #[validate(required, length(min = 1))]
    pub lesson_title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenerateMcqPayload {
    #[serde(default, deserialize_with = "string_or_absent")]
    #[validate(required, length(min = 1))]
    pub course_title: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    #[validate(required, length(min = 1))]
    pub quiz_title: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub description: Option<String>,
}

/// Edge-function style event: the request body nested under `body`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct InvocationEvent {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub body: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialParams {
    pub course_title: String,
    pub material_title: String,
    pub lesson_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McqParams {
    pub course_title: String,
    pub quiz_title: String,
    pub description: String,
}

// Anything that is not a JSON string counts as absent.
fn string_or_absent<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::String(s) => Some(s),
        _ => None,
    })
}

/// Reads a payload out of an arbitrary JSON body. A body that is not an
/// object has no fields, so every required field is reported missing.
pub fn payload_from_body<T>(body: &JsonValue) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    match body {
        JsonValue::Object(_) => T::deserialize(body).unwrap_or_default(),
        _ => T::default(),
    }
}

impl GenerateMaterialPayload {
    pub fn into_params(self) -> Result<MaterialParams> {
        self.validate()?;
        match (self.course_title, self.material_title, self.lesson_title) {
            (Some(course_title), Some(material_title), Some(lesson_title)) => Ok(MaterialParams {
                course_title,
                material_title,
                lesson_title,
            }),
            _ => Err(Error::Validation(Vec::new())),
        }
    }
}

impl GenerateMcqPayload {
    pub fn into_params(self) -> Result<McqParams> {
        self.validate()?;
        match (self.course_title, self.quiz_title) {
            (Some(course_title), Some(quiz_title)) => Ok(McqParams {
                course_title,
                quiz_title,
                description: self.description.unwrap_or_default(),
            }),
            _ => Err(Error::Validation(Vec::new())),
        }
    }
}
