use actix_web::{HttpRequest, HttpResponse, Resource, web};
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::SharedFactory;
use super::helpers::{blocking_failed, error_from_shortkey, error_response};

/// Request and response body of the shorten endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrlPayload {
    #[serde(rename = "URL")]
    pub url: String,
}

pub struct ShortenService;

impl ShortenService {
    /// `POST /api/v1/url/shorten` with `{"URL": "..."}`
    pub async fn shorten(
        req: HttpRequest,
        body: web::Bytes,
        factory: web::Data<SharedFactory>,
    ) -> HttpResponse {
        let payload: UrlPayload = match serde_json::from_slice(&body) {
            Ok(payload) => payload,
            Err(e) => {
                debug!("Malformed shorten request body: {}", e);
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "E006",
                    format!("invalid request body: {}", e),
                );
            }
        };

        let factory = factory.get_ref().clone();
        let long_url = payload.url;
        let key = match web::block(move || factory.generate_and_store(&long_url)).await {
            Ok(Ok(key)) => key,
            Ok(Err(e)) => return error_from_shortkey(&e),
            Err(e) => return blocking_failed(e),
        };

        let short_url = Self::short_url(&req, &key);
        info!("Generated short url: {}", short_url);

        HttpResponse::Ok().json(UrlPayload { url: short_url })
    }

    /// 根据请求的 scheme/host 拼接短链接
    fn short_url(req: &HttpRequest, key: &str) -> String {
        let conn = req.connection_info();
        format!("{}://{}/u/{}", conn.scheme(), conn.host(), key)
    }
}

pub fn shorten_routes() -> Resource {
    web::resource("/shorten").route(web::post().to(ShortenService::shorten))
}
