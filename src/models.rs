use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recipe as it travels over the wire and lives in the store.
///
/// Every field besides the identifier is optional: the service does no
/// validation beyond type coercion, and absent fields stay absent all the
/// way through (they are omitted from stored documents and responses).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Assigned by the store on insert; immutable thereafter.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Free text, e.g. "Easy" / "Medium" / "Difficult". Not validated here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    /// Caller-supplied, not server-assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

/// The request-body shape shared by create and update.
///
/// This is the single field-shaping block for the whole API: the field list
/// lives here once, and unknown body fields are dropped by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl RecipeDraft {
    /// Attach a store-assigned identifier, producing a full recipe.
    pub fn into_recipe(self, id: String) -> Recipe {
        Recipe {
            id: Some(id),
            title: self.title,
            instructions: self.instructions,
            level: self.level,
            ingredients: self.ingredients,
            image: self.image,
            duration: self.duration,
            is_archived: self.is_archived,
            created: self.created,
        }
    }
}

/// Success envelope for single-recipe responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeEnvelope {
    pub message: String,
    pub recipe: Recipe,
}

/// Success envelope for the list response.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeListEnvelope {
    pub message: String,
    pub recipes: Vec<Recipe>,
}

/// Failure envelope, used for every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub error_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recipe_uses_wire_field_names() {
        let recipe = Recipe {
            id: Some("64f000000000000000000000".into()),
            title: Some("Soup".into()),
            is_archived: Some(false),
            ..Default::default()
        };
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": "64f000000000000000000000",
                "title": "Soup",
                "isArchived": false,
            })
        );
    }

    #[test]
    fn absent_fields_are_omitted() {
        let value = serde_json::to_value(Recipe::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn draft_drops_unknown_body_fields() {
        let draft: RecipeDraft = serde_json::from_value(json!({
            "title": "Soup",
            "rating": 5,
            "chef": "nobody",
        }))
        .unwrap();
        assert_eq!(draft.title.as_deref(), Some("Soup"));
        assert_eq!(serde_json::to_value(&draft).unwrap(), json!({"title": "Soup"}));
    }

    #[test]
    fn created_round_trips_rfc3339() {
        let draft: RecipeDraft =
            serde_json::from_value(json!({"created": "2024-05-01T12:30:00Z"})).unwrap();
        let recipe = draft.into_recipe("64f000000000000000000000".into());
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["created"], json!("2024-05-01T12:30:00Z"));
    }

    #[test]
    fn error_envelope_uses_error_message_key() {
        let value = serde_json::to_value(ErrorEnvelope {
            error_message: "nope".into(),
        })
        .unwrap();
        assert_eq!(value, json!({"errorMessage": "nope"}));
    }
}
