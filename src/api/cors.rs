//! Cross-origin middleware for browser clients

use actix_cors::Cors;

use crate::model::CorsConfig;

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware
///
/// Without configured origins every origin is allowed, with credentials.
pub fn build_cors(config: &CorsConfig) -> Cors {
    if config.allowed_origins.is_empty() {
        return Cors::permissive();
    }

    config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(PREFLIGHT_MAX_AGE_SECS)
}

#[cfg(test)]
mod tests {
    use actix_web::http::header;
    use actix_web::{App, test};

    use super::*;
    use crate::api::health;

    fn allow_origin<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<String> {
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    #[actix_web::test]
    async fn test_permissive_by_default() {
        let app = test::init_service(
            App::new()
                .wrap(build_cors(&CorsConfig::default()))
                .configure(health::configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(allow_origin(&resp).as_deref(), Some("http://localhost:3000"));
    }

    #[actix_web::test]
    async fn test_preflight_for_configured_origin() {
        let config = CorsConfig::from_list("http://frontend.local:3000");
        let app = test::init_service(
            App::new()
                .wrap(build_cors(&config))
                .configure(health::configure),
        )
        .await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/health")
            .insert_header((header::ORIGIN, "http://frontend.local:3000"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(allow_origin(&resp).as_deref(), Some("http://frontend.local:3000"));
    }
}
