//! Server construction and middleware wiring.

mod compose;
mod config;

pub use compose::serve_with_listener;
pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use order_relay::Trace;
#[cfg(debug_assertions)]
use order_relay::doc::ApiDoc;
use order_relay::domain::ports::OrderIntake;
use order_relay::inbound::http::health::{HealthState, live, ready};
use order_relay::inbound::http::orders::{order_json_config, submit_order};
use order_relay::inbound::http::pages::{index, static_asset};
use order_relay::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(order_json_config())
        .wrap(Trace)
        .service(submit_order)
        .service(index)
        .service(static_asset)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Bind the HTTP server and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    order_intake: Arc<dyn OrderIntake>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        static_dir,
    } = config;
    let http_state = web::Data::new(HttpState::new(order_intake, static_dir));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr.clone())?
    .run();

    info!(host = %bind_addr.0, port = bind_addr.1, "http server listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use order_relay::domain::ports::FixtureOrderIntake;
    use serde_json::json;

    fn deps(static_dir: &std::path::Path) -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::new(Arc::new(FixtureOrderIntake), static_dir)),
        }
    }

    #[actix_web::test]
    async fn routes_are_wired() {
        let site = tempfile::tempdir().expect("tempdir");
        std::fs::write(site.path().join("index.html"), "<form></form>").expect("write index");
        let app = actix_test::init_service(build_app(deps(site.path()))).await;

        let landing =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        assert_eq!(landing.status(), StatusCode::OK);
        assert!(landing.headers().contains_key("trace-id"));

        let order = actix_test::TestRequest::post()
            .uri("/api/order")
            .set_json(json!({"name": "Ann", "phone": "1", "product": "oak", "quantity": 1}))
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, order).await.status(),
            StatusCode::OK
        );

        let live_request = actix_test::TestRequest::get().uri("/health/live").to_request();
        assert_eq!(
            actix_test::call_service(&app, live_request).await.status(),
            StatusCode::OK
        );
    }

    #[actix_web::test]
    async fn get_on_order_endpoint_is_not_allowed() {
        let site = tempfile::tempdir().expect("tempdir");
        let app = actix_test::init_service(build_app(deps(site.path()))).await;

        let request = actix_test::TestRequest::get().uri("/api/order").to_request();
        let status = actix_test::call_service(&app, request).await.status();
        assert!(status.is_client_error(), "unexpected status {status}");
    }
}
