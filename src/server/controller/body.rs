use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use log::warn;
use crate::server::controller::error::ApiError;
use crate::server::model::order::OrderRequest;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Url-encoded bodies are read as form pairs, anything else as json.
/// Unreadable bodies count as an invalid request.
impl FromRequest for OrderRequest {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if req.content_type().eq_ignore_ascii_case(FORM_CONTENT_TYPE) {
            let form = web::Form::<Vec<(String, String)>>::from_request(req, payload);
            async move {
                form.await
                    .map(|form| OrderRequest::from_form_pairs(form.into_inner()))
                    .map_err(|e| {
                        warn!("unreadable form body, {}", e);
                        ApiError::InvalidRequest
                    })
            }
            .boxed_local()
        } else {
            let json = web::Json::<OrderRequest>::from_request(req, payload);
            async move {
                json.await
                    .map(web::Json::into_inner)
                    .map_err(|e| {
                        warn!("unreadable json body, {}", e);
                        ApiError::InvalidRequest
                    })
            }
            .boxed_local()
        }
    }
}
