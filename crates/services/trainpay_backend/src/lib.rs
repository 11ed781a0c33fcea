// --- File: crates/services/trainpay_backend/src/lib.rs ---
use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use trainpay_omise::ChargeSettings;

pub mod app_state;
pub mod service_factory;

use app_state::AppState;

/// Assembles the full application router.
///
/// All API routes sit at the root. Requests matching none of them fall through
/// to the static directory when one is configured. CORS is permissive.
pub fn build_router(state: &AppState) -> Router {
    let config = &state.config;
    let services = &state.service_factory;

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new()
        .merge(trainpay_common::routes())
        .merge(trainpay_omise::routes(
            services.payment_gateway(),
            ChargeSettings::from(&config.omise),
        ))
        .merge(trainpay_firebase::routes(
            services.object_storage(),
            config.upload.max_body_bytes,
        ));

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use trainpay_firebase::openapi::StorageApiDoc;
        use trainpay_omise::doc::OmiseApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Trainpay API",
                version = "0.1.0",
                description = "Training payments and slip uploads",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            paths(trainpay_common::handlers::health_handler),
            components(schemas(trainpay_common::handlers::HealthResponse)),
            tags((name = "Health", description = "Liveness check")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(OmiseApiDoc::openapi());
        openapi_doc.merge(StorageApiDoc::openapi());
        info!("📖 Adding Swagger UI at /docs");

        app = app.merge(SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc));
    }

    let app = match config.server.static_dir.as_deref() {
        Some(dir) => {
            info!("Serving static files from {}", dir);
            app.fallback_service(ServeDir::new(dir))
        }
        None => app,
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
