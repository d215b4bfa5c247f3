use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Scope, web};
use serde::Serialize;
use tracing::{error, trace};

use super::SharedStore;
use crate::store::KeyValueStore;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub entries: Option<u64>,
    pub uptime_secs: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct HealthService;

impl HealthService {
    /// Reports the entry count; a failing count marks the service unhealthy.
    pub async fn health_check(
        store: web::Data<SharedStore>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        trace!("Received health check request");

        let store = store.get_ref().clone();
        let size = web::block(move || store.size())
            .await
            .map_err(|e| e.to_string())
            .and_then(|r| r.map_err(|e| e.to_string()));

        let uptime_secs = (chrono::Utc::now() - app_start_time.start_datetime)
            .num_seconds()
            .max(0);

        let (status, body) = match size {
            Ok(entries) => (
                StatusCode::OK,
                HealthResponse {
                    status: "healthy",
                    entries: Some(entries),
                    uptime_secs,
                    error: None,
                },
            ),
            Err(e) => {
                error!("Store health check failed: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    HealthResponse {
                        status: "unhealthy",
                        entries: None,
                        uptime_secs,
                        error: Some(e),
                    },
                )
            }
        };

        HttpResponse::build(status).json(body)
    }

    // 活跃性检查
    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");

        HttpResponse::NoContent().finish()
    }
}

/// Health 路由配置
pub fn health_routes() -> Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
