//! Service description endpoint

use actix_web::{HttpResponse, Responder, get, web};
use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::service::AppraisalService;

const FEATURES: [&str; 5] = [
    "Single image analysis",
    "Multiple image analysis",
    "Comprehensive car assessment",
    "Price estimation",
    "Condition evaluation",
];

const ENDPOINTS: [(&str, &str); 4] = [
    ("/analyze", "Single image analysis (legacy)"),
    ("/analyze-multiple", "Multiple images analysis (recommended)"),
    ("/health", "API health check"),
    ("/api-info", "API information"),
];

const SUPPORTED_FORMATS: [&str; 3] = ["JPG", "PNG", "WebP"];

#[derive(Serialize, ToSchema)]
pub struct ApiInfo {
    pub version: String,
    pub features: Vec<String>,
    /// Path -> description
    #[schema(value_type = Object)]
    pub endpoints: IndexMap<String, String>,
    pub limits: ApiLimits,
}

#[derive(Serialize, ToSchema)]
pub struct ApiLimits {
    pub max_images_per_request: usize,
    /// e.g. "10MB per image"
    pub max_file_size: String,
    pub supported_formats: Vec<String>,
}

/// Describe the API, its features and request limits
#[utoipa::path(
    get,
    path = "/api-info",
    responses(
        (status = 200, description = "API description", body = ApiInfo)
    ),
    tag = "info"
)]
#[get("/api-info")]
pub async fn api_info(service: web::Data<AppraisalService>) -> impl Responder {
    let limits = service.limits();

    HttpResponse::Ok().json(ApiInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: FEATURES.iter().map(|f| f.to_string()).collect(),
        endpoints: ENDPOINTS
            .iter()
            .map(|(path, description)| (path.to_string(), description.to_string()))
            .collect(),
        limits: ApiLimits {
            max_images_per_request: limits.max_images_per_request,
            max_file_size: format!("{}MB per image", limits.max_image_bytes / (1024 * 1024)),
            supported_formats: SUPPORTED_FORMATS.iter().map(|f| f.to_string()).collect(),
        },
    })
}

/// Configure info routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_info);
}
