//! 响应构造辅助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::{error, warn};

use crate::errors::ShortkeyError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

pub fn error_response(status: StatusCode, code: &'static str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody {
        error: message.into(),
        code,
    })
}

/// 将核心错误映射为 HTTP 响应
///
/// - Validation → 400
/// - GeneratorExhausted → 503
/// - 其余 → 500（不向客户端暴露内部细节）
pub fn error_from_shortkey(err: &ShortkeyError) -> HttpResponse {
    match err {
        ShortkeyError::Validation(msg) => {
            warn!("Rejected request: {}", msg);
            error_response(StatusCode::BAD_REQUEST, err.code(), msg.clone())
        }
        ShortkeyError::GeneratorExhausted(msg) => {
            error!("Key generation failed: {}", msg);
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                err.code(),
                "could not allocate a short key, try again later",
            )
        }
        other => {
            error!("{}", other.format_simple());
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                other.code(),
                "internal error while processing the request",
            )
        }
    }
}

pub fn blocking_failed(err: impl std::fmt::Display) -> HttpResponse {
    error!("Blocking task failed: {}", err);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "E000",
        "internal error while processing the request",
    )
}
