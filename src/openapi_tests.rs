#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::{schema::Schema, RefOr};
    use utoipa::OpenApi;

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("{} should be an object schema", name),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();
        assert!(components.schemas.contains_key("ErrorResponse"));
        assert!(components.schemas.contains_key("HealthResponse"));
        assert!(components.schemas.contains_key("DashboardPanel"));
        assert!(components.schemas.contains_key("ChartSlot"));

        let json_result = serde_json::to_string(&openapi);
        assert!(json_result.is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");
        assert!(properties.contains(&"error".to_string()));
        assert!(properties.contains(&"code".to_string()));
        assert!(properties.contains(&"success".to_string()));
    }

    #[test]
    fn test_health_response_schema_structure() {
        let properties = object_properties("HealthResponse");
        assert!(properties.contains(&"status".to_string()));
        assert!(properties.contains(&"version".to_string()));
        assert!(properties.contains(&"dataset_rows".to_string()));
        assert!(properties.contains(&"binding_state".to_string()));
    }

    #[test]
    fn test_dashboard_panel_schema_structure() {
        let properties = object_properties("DashboardPanel");
        assert!(properties.contains(&"metric".to_string()));
        assert!(properties.contains(&"region".to_string()));
        assert!(properties.contains(&"charts".to_string()));
    }

    #[test]
    fn test_paths_are_documented() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        for path in [
            "/health",
            "/api/v1/options",
            "/api/v1/summary",
            "/api/v1/dashboard",
            "/api/v1/charts/{slot}",
        ] {
            assert!(paths.contains_key(path), "missing path {}", path);
        }
    }
}
