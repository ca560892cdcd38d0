use serde::Serialize;

pub(crate) mod config;
pub(crate) mod order;

#[derive(Debug, Serialize)]
pub(crate) struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
}
