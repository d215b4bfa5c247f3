//! URL 验证模块
//!
//! 接受绝对 URI（带 scheme）或以 `/` 开头的绝对路径，
//! 可选地阻止危险协议。

use url::Url;

/// URL 验证错误
#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    DangerousProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::DangerousProtocol(proto) => {
                write!(f, "Dangerous protocol blocked: {}", proto)
            }
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 危险协议列表
const DANGEROUS_PROTOCOLS: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

/// 解析相对路径时使用的占位 base，仅用于语法检查
const PATH_BASE: &str = "http://localhost/";

/// 验证请求 URI
///
/// 检查项目：
/// 1. URI 不为空
/// 2. 不含首尾空白和控制字符（校验的字符串必须与存储的字符串一致）
/// 3. 以 `/` 开头时按绝对路径解析
/// 4. 否则必须是带 scheme 的绝对 URI
/// 5. `block_dangerous` 为 true 时拒绝 javascript:, data:, file: 等
pub fn validate_request_uri(uri: &str, block_dangerous: bool) -> Result<(), UrlValidationError> {
    if uri.trim().is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    // Url::parse 会静默去掉这些字符，必须在解析前拒绝
    if uri.trim() != uri {
        return Err(UrlValidationError::InvalidFormat(
            "leading or trailing whitespace in URL".to_string(),
        ));
    }
    if uri.chars().any(|c| c.is_ascii_control()) {
        return Err(UrlValidationError::InvalidFormat(
            "invalid control character in URL".to_string(),
        ));
    }

    if uri.starts_with('/') {
        let base = Url::parse(PATH_BASE)
            .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;
        base.join(uri)
            .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;
        return Ok(());
    }

    if block_dangerous {
        let uri_lower = uri.to_lowercase();
        for proto in DANGEROUS_PROTOCOLS {
            if uri_lower.starts_with(proto) {
                return Err(UrlValidationError::DangerousProtocol(proto.to_string()));
            }
        }
    }

    Url::parse(uri).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    Ok(())
}
