//! REST API endpoints for photograph analysis

use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::{HttpResponse, post, web};
use futures::StreamExt;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{
    AnalysisSummary, CharacteristicSet, ImageAnalysisResult, ImageUpload, LimitsConfig,
    PriceEstimate, upload_display_name,
};
use crate::service::AppraisalService;

const SINGLE_FILE_FIELD: &str = "file";
const MULTI_FILE_FIELD: &str = "files";
const FOCUS_FIELD: &str = "analysis_focus";
const DEFAULT_ANALYSIS_FOCUS: &str = "comprehensive";

/// Upper bound on a non-file form field such as `analysis_focus`
const MAX_TEXT_FIELD_BYTES: usize = 1024;

const ANALYSIS_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Multipart form accepted by `/analyze`
#[derive(ToSchema)]
#[allow(dead_code)] // Documentation only; the handler reads the raw multipart stream
pub struct AnalyzeForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Multipart form accepted by `/analyze-multiple`
#[derive(ToSchema)]
#[allow(dead_code)] // Documentation only; the handler reads the raw multipart stream
pub struct AnalyzeMultipleForm {
    /// One to ten image files
    #[schema(value_type = Vec<String>)]
    pub files: Vec<Vec<u8>>,
    /// Accepted for compatibility, defaults to "comprehensive"
    pub analysis_focus: Option<String>,
}

/// Response for a single-image analysis
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    #[schema(value_type = Object)]
    pub characteristics: CharacteristicSet,
    pub price_estimation: PriceEstimate,
    pub raw_analysis: String,
    pub analysis_date: String,
    pub success: bool,
    pub message: String,
}

/// Response for a multi-image analysis
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeMultipleResponse {
    #[schema(value_type = Object)]
    pub consolidated_characteristics: CharacteristicSet,
    pub price_estimation: PriceEstimate,
    pub individual_analyses: Vec<ImageAnalysisResult>,
    pub analysis_summary: AnalysisSummary,
    pub analysis_date: String,
    pub success: bool,
    pub message: String,
    pub images_processed: usize,
}

/// Files and text fields received in one multipart body
#[derive(Default)]
struct UploadForm {
    files: Vec<ImageUpload>,
    fields: HashMap<String, String>,
}

/// Drain a multipart body, keeping parts named `file_field` as uploads
///
/// Stops with 400 as soon as a file part grows past `max_image_bytes`, a
/// file part beyond `max_images_per_request` arrives, or a text field
/// grows past `MAX_TEXT_FIELD_BYTES`. The rest of the body is not read.
async fn read_form(
    mut payload: Multipart,
    file_field: &str,
    limits: &LimitsConfig,
) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field.name().unwrap_or_default().to_string();
        let is_file = name == file_field;

        if is_file && form.files.len() >= limits.max_images_per_request {
            return Err(ApiError::BadRequest(format!(
                "Maximum {} images allowed",
                limits.max_images_per_request
            )));
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let content_type = field.content_type().map(|mime| mime.to_string());
        let max_bytes = if is_file {
            limits.max_image_bytes
        } else {
            MAX_TEXT_FIELD_BYTES
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if data.len() + chunk.len() > max_bytes {
                let message = if is_file {
                    let image_name =
                        upload_display_name(filename.as_deref(), form.files.len() + 1);
                    format!(
                        "File {} exceeds the maximum size of {} bytes",
                        image_name, max_bytes
                    )
                } else {
                    format!("Field {} exceeds the maximum size of {} bytes", name, max_bytes)
                };
                tracing::warn!(field = %name, limit = max_bytes, "Multipart part too large");
                return Err(ApiError::BadRequest(message));
            }
            data.extend_from_slice(&chunk);
        }

        if is_file {
            form.files.push(ImageUpload {
                filename,
                content_type,
                data,
            });
        } else {
            form.fields
                .insert(name, String::from_utf8_lossy(&data).into_owned());
        }
    }

    Ok(form)
}

fn analysis_date() -> String {
    chrono::Local::now().format(ANALYSIS_DATE_FORMAT).to_string()
}

/// Analyze a single car photograph
#[utoipa::path(
    post,
    path = "/analyze",
    request_body(content = AnalyzeForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Analysis completed", body = AnalyzeResponse),
        (status = 400, description = "Upload is not an image", body = ErrorResponse),
        (status = 500, description = "Vision model failure", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/analyze")]
pub async fn analyze(
    service: web::Data<AppraisalService>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let form = read_form(payload, SINGLE_FILE_FIELD, service.limits()).await?;
    let upload = form
        .files
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::BadRequest("File is required".to_string()))?;

    tracing::info!(
        filename = ?upload.filename,
        bytes = upload.data.len(),
        "Received single image for analysis"
    );

    let analysis = service
        .analyze_single(&upload)
        .await
        .map_err(|e| ApiError::from_appraisal(e, "Analysis failed"))?;

    Ok(HttpResponse::Ok().json(AnalyzeResponse {
        characteristics: analysis.characteristics,
        price_estimation: analysis.price_estimation,
        raw_analysis: analysis.raw_analysis,
        analysis_date: analysis_date(),
        success: true,
        message: "Analysis completed successfully".to_string(),
    }))
}

/// Analyze up to ten photographs of the same car
#[utoipa::path(
    post,
    path = "/analyze-multiple",
    request_body(content = AnalyzeMultipleForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Analysis completed", body = AnalyzeMultipleResponse),
        (status = 400, description = "Too many, too few or non-image uploads", body = ErrorResponse),
        (status = 500, description = "Vision model failure", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/analyze-multiple")]
pub async fn analyze_multiple(
    service: web::Data<AppraisalService>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let form = read_form(payload, MULTI_FILE_FIELD, service.limits()).await?;
    let analysis_focus = form
        .fields
        .get(FOCUS_FIELD)
        .map(String::as_str)
        .unwrap_or(DEFAULT_ANALYSIS_FOCUS);

    let analysis = service
        .analyze_multiple(&form.files, analysis_focus)
        .await
        .map_err(|e| ApiError::from_appraisal(e, "Multi-image analysis failed"))?;

    let images_processed = analysis.individual_analyses.len();
    Ok(HttpResponse::Ok().json(AnalyzeMultipleResponse {
        consolidated_characteristics: analysis.consolidated_characteristics,
        price_estimation: analysis.price_estimation,
        individual_analyses: analysis.individual_analyses,
        analysis_summary: analysis.analysis_summary,
        analysis_date: analysis_date(),
        success: true,
        message: format!("Successfully analyzed {} images", images_processed),
        images_processed,
    }))
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze).service(analyze_multiple);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    use super::*;
    use crate::service::vision::VisionError;
    use crate::service::vision::mock::MockVisionExtractor;

    const BOUNDARY: &str = "car-analyzer-test-boundary";

    const ANSWER: &str = "BRAND/MAKE: BMW\n\
        MODEL: X5\n\
        APPROXIMATE YEAR: unknown\n\
        BODY CONDITION: excellent\n\
        MARKET SEGMENT: luxury";

    /// (field name, filename, content type, body)
    type Part<'a> = (&'a str, Option<&'a str>, Option<&'a str>, &'a [u8]);

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, content_type, data) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            let disposition = match filename {
                Some(filename) => format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    name, filename
                ),
                None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", name),
            };
            body.extend_from_slice(disposition.as_bytes());
            if let Some(content_type) = content_type {
                body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
            }
            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn post(uri: &str, parts: &[Part<'_>]) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(multipart_body(parts))
    }

    fn image<'a>(field: &'a str, filename: &'a str) -> Part<'a> {
        (field, Some(filename), Some("image/jpeg"), &b"\xff\xd8\xff\xe0"[..])
    }

    fn app_data(mock: Arc<MockVisionExtractor>) -> web::Data<AppraisalService> {
        app_data_with(mock, LimitsConfig::default())
    }

    fn app_data_with(
        mock: Arc<MockVisionExtractor>,
        limits: LimitsConfig,
    ) -> web::Data<AppraisalService> {
        web::Data::new(AppraisalService::new(mock, limits))
    }

    #[actix_web::test]
    async fn test_analyze_single_image() {
        let mock = Arc::new(MockVisionExtractor::answering(ANSWER, 1));
        let app = test::init_service(App::new().app_data(app_data(mock)).configure(configure)).await;

        let req = post("/analyze", &[image("file", "car.jpg")]).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Analysis completed successfully");
        assert_eq!(body["characteristics"]["brand"], "BMW");
        assert_eq!(body["raw_analysis"], ANSWER);
        assert_eq!(body["price_estimation"]["estimated_price"], 75_000);
        assert_eq!(body["price_estimation"]["estimated_price_range"], "$60,000 - $90,000");
        assert_eq!(body["analysis_date"].as_str().map(str::len), Some(19));
    }

    #[actix_web::test]
    async fn test_analyze_rejects_non_image() {
        let mock = Arc::new(MockVisionExtractor::answering(ANSWER, 1));
        let app = test::init_service(
            App::new()
                .app_data(app_data(mock.clone()))
                .configure(configure),
        )
        .await;

        let req = post(
            "/analyze",
            &[("file", Some("notes.txt"), Some("text/plain"), &b"hello"[..])],
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "bad_request");
        assert_eq!(body["message"], "File must be an image");
        assert!(body["request_id"].is_string());
        assert!(mock.calls().is_empty());
    }

    #[actix_web::test]
    async fn test_analyze_extraction_failure_is_500() {
        let mock = Arc::new(MockVisionExtractor::new(vec![Err(VisionError::Connection(
            "http://localhost:11434".to_string(),
        ))]));
        let app = test::init_service(App::new().app_data(app_data(mock)).configure(configure)).await;

        let req = post("/analyze", &[image("file", "car.jpg")]).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let message = body["message"].as_str().unwrap_or_default();
        assert!(message.starts_with("Analysis failed: Failed to analyze image car.jpg"));
    }

    #[actix_web::test]
    async fn test_analyze_multiple_images() {
        let mock = Arc::new(MockVisionExtractor::answering(ANSWER, 2));
        let app = test::init_service(
            App::new()
                .app_data(app_data(mock.clone()))
                .configure(configure),
        )
        .await;

        let req = post(
            "/analyze-multiple",
            &[
                image("files", "exterior.jpg"),
                image("files", "interior.jpg"),
                ("analysis_focus", None, None, &b"quick"[..]),
            ],
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Successfully analyzed 2 images");
        assert_eq!(body["images_processed"], 2);
        assert_eq!(body["consolidated_characteristics"]["model"], "X5");
        assert_eq!(body["individual_analyses"][1]["image_name"], "interior.jpg");
        assert_eq!(body["analysis_summary"]["total_images"], 2);
        assert_eq!(
            body["analysis_summary"]["condition_assessment"]["Body Condition"],
            "excellent"
        );
        assert_eq!(mock.calls().len(), 2);
    }

    #[actix_web::test]
    async fn test_analyze_multiple_requires_images() {
        let mock = Arc::new(MockVisionExtractor::new(vec![]));
        let app = test::init_service(App::new().app_data(app_data(mock)).configure(configure)).await;

        let req = post("/analyze-multiple", &[("analysis_focus", None, None, &b"quick"[..])]).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "At least one image is required");
    }

    #[actix_web::test]
    async fn test_analyze_multiple_rejects_too_many() {
        let mock = Arc::new(MockVisionExtractor::new(vec![]));
        let app = test::init_service(App::new().app_data(app_data(mock)).configure(configure)).await;

        let names: Vec<String> = (0..11).map(|i| format!("car_{}.jpg", i)).collect();
        let parts: Vec<Part<'_>> = names.iter().map(|name| image("files", name)).collect();
        let req = post("/analyze-multiple", &parts).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Maximum 10 images allowed");
    }

    #[actix_web::test]
    async fn test_oversized_part_rejected_while_streaming() {
        let mock = Arc::new(MockVisionExtractor::answering(ANSWER, 2));
        let limits = LimitsConfig {
            max_image_bytes: 2,
            ..LimitsConfig::default()
        };
        let app = test::init_service(
            App::new()
                .app_data(app_data_with(mock.clone(), limits))
                .configure(configure),
        )
        .await;

        for (uri, field) in [("/analyze", "file"), ("/analyze-multiple", "files")] {
            let req = post(uri, &[image(field, "big.jpg")]).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "File big.jpg exceeds the maximum size of 2 bytes");
        }
        assert!(mock.calls().is_empty());
    }

    #[actix_web::test]
    async fn test_extra_file_part_rejected_before_reading() {
        let mock = Arc::new(MockVisionExtractor::answering(ANSWER, 3));
        let limits = LimitsConfig {
            max_images_per_request: 2,
            ..LimitsConfig::default()
        };
        let app = test::init_service(
            App::new()
                .app_data(app_data_with(mock.clone(), limits))
                .configure(configure),
        )
        .await;

        let req = post(
            "/analyze-multiple",
            &[image("files", "a.jpg"), image("files", "b.jpg"), image("files", "c.jpg")],
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Maximum 2 images allowed");
        assert!(mock.calls().is_empty());
    }

    #[actix_web::test]
    async fn test_long_text_field_rejected() {
        let mock = Arc::new(MockVisionExtractor::answering(ANSWER, 1));
        let app = test::init_service(
            App::new()
                .app_data(app_data(mock.clone()))
                .configure(configure),
        )
        .await;

        let focus = vec![b'x'; MAX_TEXT_FIELD_BYTES + 1];
        let req = post(
            "/analyze-multiple",
            &[image("files", "a.jpg"), ("analysis_focus", None, None, &focus[..])],
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body["message"],
            "Field analysis_focus exceeds the maximum size of 1024 bytes"
        );
        assert!(mock.calls().is_empty());
    }
}
