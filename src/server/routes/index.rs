use actix_web::http::header::ContentType;
use actix_web::{get, HttpResponse};
use crate::server::controller::error::ApiError;

const WELCOME: &str = "<h1>Welcome to the Restaurant Backend API!</h1>\
<p>Use <code>POST /place_order</code> to place an order.</p>";

#[get("/")]
pub(crate) async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(WELCOME)
}

/// fallback for every unknown route
pub(crate) async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}

#[cfg(test)]
mod test {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use super::*;

    #[actix_web::test]
    async fn welcome_banner() {
        let app = test::init_service(App::new().service(index)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("Welcome to the Restaurant Backend API!"));
        assert!(body.contains("POST /place_order"));
    }

    #[actix_web::test]
    async fn unknown_route() {
        let app = test::init_service(App::new().default_service(web::to(not_found))).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/menu").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"error": "Not found"}));
    }
}
