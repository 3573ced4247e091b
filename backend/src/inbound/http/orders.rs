//! Order intake HTTP handler.
//!
//! ```text
//! POST /api/order
//! ```

use actix_web::{HttpRequest, HttpResponse, error::JsonPayloadError, post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::domain::{Error, Order, OrderDraft, OrderValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, scalar_text};

/// Message shown to the customer once the order is accepted.
pub const ORDER_ACCEPTED_MESSAGE: &str =
    "Заявка успешно отправлена! Мы свяжемся с вами в ближайшее время.";

/// Message returned when the body is not a JSON object.
pub const INVALID_PAYLOAD_MESSAGE: &str = "Некорректный формат заявки";

const MAX_ORDER_BYTES: usize = 16 * 1024;

/// Order form payload.
///
/// Fields are loosely typed because the form may send numbers or strings;
/// see [`scalar_text`] for what counts as filled in.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct OrderRequest {
    /// Customer name.
    #[schema(value_type = Option<String>, example = "Анна")]
    pub name: Option<Value>,
    /// Contact phone number.
    #[schema(value_type = Option<String>, example = "+7 900 000-00-00")]
    pub phone: Option<Value>,
    /// Product code, e.g. `birch` or `oak`.
    #[schema(value_type = Option<String>, example = "birch")]
    pub product: Option<Value>,
    /// Quantity as a number or numeric string.
    #[schema(value_type = Option<String>, example = "5")]
    pub quantity: Option<Value>,
    /// Optional free-form comment.
    #[schema(value_type = Option<String>)]
    pub comment: Option<Value>,
}

impl OrderRequest {
    fn into_draft(self) -> OrderDraft {
        OrderDraft {
            name: scalar_text(self.name.as_ref()),
            phone: scalar_text(self.phone.as_ref()),
            product: scalar_text(self.product.as_ref()),
            quantity: scalar_text(self.quantity.as_ref()),
            comment: scalar_text(self.comment.as_ref()),
        }
    }
}

/// Successful order response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderAcceptedResponse {
    /// Always `true`.
    #[schema(example = true)]
    pub success: bool,
    /// Confirmation shown to the customer.
    #[schema(example = "Заявка успешно отправлена! Мы свяжемся с вами в ближайшее время.")]
    pub message: String,
}

fn map_validation_error(error: OrderValidationError) -> Error {
    match error {
        OrderValidationError::MissingField { field } => missing_field_error(field),
    }
}

fn payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected order payload");
    Error::invalid_request(INVALID_PAYLOAD_MESSAGE)
        .with_details(json!({ "code": "invalid_payload" }))
        .into()
}

/// JSON extractor settings for the order endpoint: malformed or non-object
/// bodies become `400` responses in the usual error envelope.
pub fn order_json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_ORDER_BYTES)
        .error_handler(payload_error)
}

/// Submit an order from the landing page.
#[utoipa::path(
    post,
    path = "/api/order",
    description = "Validate an order and forward it to every subscribed chat. \
        Delivery failures never change the response.",
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order accepted", body = OrderAcceptedResponse),
        (status = 400, description = "Missing field or malformed payload", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["orders"],
    operation_id = "submitOrder"
)]
#[post("/api/order")]
pub async fn submit_order(
    state: web::Data<HttpState>,
    payload: web::Json<OrderRequest>,
) -> ApiResult<HttpResponse> {
    let order = Order::try_from_draft(payload.into_inner().into_draft())
        .map_err(map_validation_error)?;
    let receipt = state.order_intake.submit(order).await?;
    debug!(notified = receipt.notified, "order request completed");

    Ok(HttpResponse::Ok().json(OrderAcceptedResponse {
        success: true,
        message: ORDER_ACCEPTED_MESSAGE.to_owned(),
    }))
}
