//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the order, page and health endpoints together with
//! the request and response payloads. The document backs Swagger UI in debug
//! builds and is exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::orders::{OrderAcceptedResponse, OrderRequest};
use crate::inbound::http::schemas::ErrorCodeSchema;

/// OpenAPI document for the HTTP interface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order relay API",
        description = "Landing page order intake forwarded to Telegram subscribers, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::orders::submit_order,
        crate::inbound::http::pages::index,
        crate::inbound::http::pages::static_asset,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(OrderRequest, OrderAcceptedResponse, ErrorBody, ErrorCodeSchema)),
    tags(
        (name = "orders", description = "Order submission from the landing page"),
        (name = "pages", description = "Landing page and static assets"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
