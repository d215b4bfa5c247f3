use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Resource, web};
use tracing::{debug, trace};

use super::SharedStore;
use super::helpers::{blocking_failed, error_from_shortkey};
use crate::store::KeyValueStore;

pub struct RedirectService;

impl RedirectService {
    /// `GET /u/{shortkey}` → 307 to the stored URL, 404 when the key is unknown.
    pub async fn handle_redirect(
        path: web::Path<String>,
        store: web::Data<SharedStore>,
    ) -> HttpResponse {
        let key = path.into_inner();
        let store = store.get_ref().clone();
        let lookup_key = key.clone();

        match web::block(move || store.get(&lookup_key)).await {
            Ok(Ok(Some(long_url))) => {
                trace!("Fetched long url for '{}': {}", key, long_url);
                HttpResponse::TemporaryRedirect()
                    .insert_header(("Location", long_url))
                    .finish()
            }
            Ok(Ok(None)) => {
                debug!("Short key not found: {}", key);
                Self::not_found_response()
            }
            Ok(Err(e)) => error_from_shortkey(&e),
            Err(e) => blocking_failed(e),
        }
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .insert_header(("Cache-Control", "public, max-age=60"))
            .body("Not Found")
    }
}

pub fn redirect_routes() -> Resource {
    web::resource("/u/{shortkey}")
        .route(web::get().to(RedirectService::handle_redirect))
        .route(web::head().to(RedirectService::handle_redirect))
}
