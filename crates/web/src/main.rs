use std::sync::Arc;

use academy::SystemClock;
use anyhow::Context;
use clap::Parser;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod routes;
mod seed;
mod state;

use config::Config;
use features::{attendance, graduation};
use seed::SeedData;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        graduation::handlers::get_graduation,
        graduation::handlers::list_promotions,
        graduation::handlers::create_promotion,
        graduation::handlers::delete_promotion,
        graduation::handlers::get_ladder,
        attendance::handlers::get_today,
        attendance::handlers::create_checkin,
    ),
    components(
        schemas(
            academy::dto::graduation::GraduationInfo,
            academy::dto::graduation::GraduationResponse,
            academy::dto::graduation::LadderEntry,
            academy::dto::graduation::PromotionResponse,
            academy::dto::graduation::CreatePromotionRequest,
            academy::dto::attendance::ClassInstanceResponse,
            academy::dto::attendance::DashboardOverview,
            academy::dto::attendance::CreateCheckinRequest,
            academy::dto::attendance::CheckinResponse,
            academy::models::AgeGroup,
            academy::models::PromotionType,
            academy::models::RequirementsMet,
            academy::models::CheckinMethod,
            academy::models::InstanceStatus,
        )
    ),
    tags(
        (name = "graduation", description = "Belt ranks and promotion history"),
        (name = "attendance", description = "Today's classes and check-ins"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting academy API");

    let config = Config::parse();
    tracing::info!("Configuration loaded successfully");

    let seed = match &config.seed_file {
        Some(path) => SeedData::from_file(path)?,
        None => {
            tracing::warn!("No seed file given, starting with empty stores");
            SeedData::default()
        }
    };

    let state = AppState::in_memory(seed, Arc::new(SystemClock), config.attendance_basis)
        .await
        .context("Failed to load seed data")?;
    tracing::info!(
        "Attendance percentages use the {} basis",
        state.attendance.basis()
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    let app = routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let bind_address = config.bind_address();
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
