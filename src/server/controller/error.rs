use actix_web::{error, HttpResponse};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use derive_more::{Display, Error};
use crate::server::model::ErrorResponse;

const INTERNAL_ERROR_MSG: &str = "Internal server error";

/// Errors a client can see. The display text is the whole response body, no details.
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub(crate) enum ApiError {
    #[display("Missing or invalid required fields")]
    InvalidRequest,
    #[display("Failed to send order")]
    DeliveryFailure,
    #[display("Not found")]
    NotFound,
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::InvalidRequest => StatusCode::BAD_REQUEST,
            ApiError::DeliveryFailure => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ErrorResponse { error: self.to_string() })
    }
}

/// Safety net: any 500 that did not come from an `ApiError` gets a generic body
pub(crate) fn error_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, mask_internal_error)
}

fn mask_internal_error<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let raised_by_api = res
        .response()
        .error()
        .and_then(|e| e.as_error::<ApiError>())
        .is_some();
    if raised_by_api {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    log::error!("unhandled internal error, {:?}", res.response().error());
    let (req, _) = res.into_parts();
    let res = HttpResponse::InternalServerError()
        .json(ErrorResponse { error: INTERNAL_ERROR_MSG.to_string() });
    Ok(ErrorHandlerResponse::Response(ServiceResponse::new(req, res).map_into_right_body()))
}

#[cfg(test)]
mod test {
    use actix_web::body::MessageBody;
    use actix_web::{test, web, App, ResponseError};
    use super::*;

    #[::core::prelude::v1::test]
    fn status_codes() {
        assert_eq!(ApiError::InvalidRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::DeliveryFailure.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[::core::prelude::v1::test]
    fn json_body() {
        let body = ApiError::DeliveryFailure
            .error_response()
            .into_body()
            .try_into_bytes()
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({"error": "Failed to send order"}));
    }

    #[actix_web::test]
    async fn internal_errors_are_masked() {
        let app = test::init_service(
            App::new()
                .wrap(error_handlers())
                .route("/boom", web::get().to(|| async {
                    Err::<HttpResponse, _>(error::ErrorInternalServerError("smtp password=hunter2"))
                }))
                .route("/mail", web::get().to(|| async {
                    Err::<HttpResponse, _>(ApiError::DeliveryFailure)
                })),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/boom").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"error": "Internal server error"}));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/mail").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"error": "Failed to send order"}));
    }
}
