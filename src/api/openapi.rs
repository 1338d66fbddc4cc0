//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::{analysis, error, health, info};
use crate::model::{
    AnalysisQuality, AnalysisSummary, FactorsExplanation, ImageAnalysisResult, PriceEstimate,
};

/// OpenAPI document for the car analyzer API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Car Analyzer API",
        description = "Vehicle characteristic extraction and price estimation from photographs"
    ),
    paths(
        analysis::analyze,
        analysis::analyze_multiple,
        health::health,
        info::api_info
    ),
    components(schemas(
        analysis::AnalyzeForm,
        analysis::AnalyzeMultipleForm,
        analysis::AnalyzeResponse,
        analysis::AnalyzeMultipleResponse,
        error::ErrorResponse,
        health::HealthStatus,
        info::ApiInfo,
        info::ApiLimits,
        AnalysisQuality,
        AnalysisSummary,
        FactorsExplanation,
        ImageAnalysisResult,
        PriceEstimate
    )),
    tags(
        (name = "analysis", description = "Photograph analysis and price estimation"),
        (name = "health", description = "Service health"),
        (name = "info", description = "Service description")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
