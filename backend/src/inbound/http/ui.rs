//! Browser client for the user directory.
//!
//! A single static page that drives the JSON API from the same origin. Its
//! email check mirrors the server's only loosely; the API stays authoritative.

use actix_web::http::header::{CACHE_CONTROL, ContentType};
use actix_web::{HttpResponse, get};

const UI_PAGE: &str = include_str!("../../../static/ui.html");

#[utoipa::path(
    get,
    path = "/ui",
    tags = ["ui"],
    responses((status = 200, description = "HTML client", body = String, content_type = "text/html"))
)]
#[get("/ui")]
pub async fn ui() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header((CACHE_CONTROL, "no-cache"))
        .body(UI_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    #[actix_web::test]
    async fn serves_html_page() {
        let app = actix_test::init_service(App::new().service(ui)).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/ui").to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        assert!(content_type.starts_with("text/html"));
        let body = actix_test::read_body(response).await;
        assert!(std::str::from_utf8(&body).expect("utf8").contains("<title>"));
    }

    #[rstest]
    #[case("User Table Summary")]
    #[case("Total Users")]
    #[case("Total Columns")]
    #[case("No users found.")]
    #[case("Failed to fetch users")]
    #[case("/users")]
    fn page_contains(#[case] needle: &str) {
        assert!(UI_PAGE.contains(needle), "missing {needle}");
    }
}
