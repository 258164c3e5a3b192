use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct CreatedRecipeResponse {
    pub recipe: Value,
}

#[derive(Debug, Serialize)]
pub struct RecipeListResponse {
    pub recipes: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct RecipeDetailsResponse {
    // historical field name, kept for client compatibility
    pub user: Value,
}

#[derive(Debug, Serialize)]
pub struct UpdatedRecipeResponse {
    pub recipe: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_details_response_serialization() {
        let response = RecipeDetailsResponse {
            user: json!({ "title": "Focaccia" }),
        };

        let encoded = serde_json::to_string(&response).unwrap();
        assert!(encoded.contains("\"user\""));
        assert!(encoded.contains("Focaccia"));
    }

    #[test]
    fn test_updated_response_serializes_missing_recipe_as_null() {
        let response = UpdatedRecipeResponse { recipe: None };

        let encoded = serde_json::to_string(&response).unwrap();
        assert_eq!(encoded, r#"{"recipe":null}"#);
    }
}
