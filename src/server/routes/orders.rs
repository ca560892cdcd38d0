use actix_web::{post, web, HttpResponse, Responder};
use actix_web::rt::time;
use log::{error, info, warn};
use crate::server::controller::error::ApiError;
use crate::server::mail::{MailError, OrderMail};
use crate::server::model::order::{OrderRequest, OrderSubmission};
use crate::server::model::MessageResponse;
use crate::server::state::AppState;

const ORDER_PLACED_MSG: &str = "Order placed successfully!";

#[post("/place_order")]
/// Validate an order and mail it to the restaurant. One mail attempt, no retry.
pub(crate) async fn place_order(body: OrderRequest, data: web::Data<AppState>) -> Result<impl Responder, ApiError> {
    if data.is_verbose() {
        info!("received order body={:?}", body);
    }
    let order = OrderSubmission::try_from(body).map_err(|_| {
        warn!("rejected order, missing or invalid required fields");
        ApiError::InvalidRequest
    })?;
    info!("received order with {} item(s)", order.items.len());

    let mail = OrderMail::for_order(&order, data.get_mailbox());
    let mailer = data.get_mailer();
    let sleep = time::sleep(data.get_mail_timeout());
    tokio::pin!(sleep);
    let sent = tokio::select! {
        result = mailer.send(mail) => result,
        _ = &mut sleep => Err(MailError::Timeout),
    };

    match sent {
        Ok(confirmation) => {
            info!("order email sent to the restaurant, {}", confirmation);
            Ok(HttpResponse::Ok().json(MessageResponse { message: ORDER_PLACED_MSG }))
        }
        Err(e) => {
            error!("failed to send order email, {}", e);
            Err(ApiError::DeliveryFailure)
        }
    }
}
