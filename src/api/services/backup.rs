use actix_web::http::StatusCode;
use actix_web::http::header::ContentEncoding;
use actix_web::{HttpResponse, Resource, web};
use tracing::{error, info};

use super::SharedStore;
use super::helpers::{blocking_failed, error_from_shortkey, error_response};
use crate::store::{BufferSink, KeyValueStore};

/// Backup download settings
#[derive(Debug, Clone)]
pub struct BackupSettings {
    /// File name suggested to the client.
    pub filename: String,
}

pub struct BackupService;

impl BackupService {
    /// `GET /api/v1/url/backup` streams a consistent snapshot of the store file.
    pub async fn download(
        store: web::Data<SharedStore>,
        settings: web::Data<BackupSettings>,
    ) -> HttpResponse {
        let store = store.get_ref().clone();
        let filename = settings.filename.clone();

        let result = web::block(move || {
            let mut sink = BufferSink::new();
            store.backup(&filename, &mut sink).map(|_| sink.into_parts())
        })
        .await;

        match result {
            Ok(Ok((Some(meta), bytes))) => {
                info!("Serving backup '{}' ({} bytes)", meta.filename, bytes.len());
                HttpResponse::Ok()
                    .content_type(meta.content_type())
                    .insert_header(("Content-Disposition", meta.content_disposition()))
                    // 快照按原样传输，Content-Length 与文件大小一致
                    .insert_header(ContentEncoding::Identity)
                    .body(bytes)
            }
            Ok(Ok((None, _))) => {
                error!("Backup finished without announcing metadata");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E003",
                    "backup failed",
                )
            }
            Ok(Err(e)) => error_from_shortkey(&e),
            Err(e) => blocking_failed(e),
        }
    }
}

pub fn backup_routes() -> Resource {
    web::resource("/backup").route(web::get().to(BackupService::download))
}
