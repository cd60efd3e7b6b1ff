//! OpenAPI documentation.
//!
//! [`ApiDoc`] registers every HTTP endpoint and the schema wrappers from
//! `inbound::http::schemas`. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserSchema};
use crate::inbound::http::users::{CreateUserResponse, MessageResponse, UserRequest};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User CRUD API",
        description = "API for basic user operations",
        version = "1.0.0"
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::home,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::ui::ui,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        UserRequest,
        MessageResponse,
        CreateUserResponse
    )),
    tags(
        (name = "users", description = "User directory operations"),
        (name = "ui", description = "Browser client"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn info_matches_service_identity() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "User CRUD API");
        assert_eq!(doc.info.version, "1.0.0");
    }

    #[rstest]
    #[case("/")]
    #[case("/users")]
    #[case("/users/{id}")]
    #[case("/ui")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn registers_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("User", &["id", "name", "email"])]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("CreateUserResponse", &["message", "user_id"])]
    fn schema_has_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }
}
