use std::fmt;

#[derive(Debug, Clone)]
pub enum ShortkeyError {
    Validation(String),
    StoreOpen(String),
    StoreOperation(String),
    GeneratorExhausted(String),
    FileOperation(String),
    Serialization(String),
    Config(String),
}

impl ShortkeyError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortkeyError::Validation(_) => "E001",
            ShortkeyError::StoreOpen(_) => "E002",
            ShortkeyError::StoreOperation(_) => "E003",
            ShortkeyError::GeneratorExhausted(_) => "E004",
            ShortkeyError::FileOperation(_) => "E005",
            ShortkeyError::Serialization(_) => "E006",
            ShortkeyError::Config(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortkeyError::Validation(_) => "Validation Error",
            ShortkeyError::StoreOpen(_) => "Store Open Error",
            ShortkeyError::StoreOperation(_) => "Store Operation Error",
            ShortkeyError::GeneratorExhausted(_) => "Key Generator Exhausted",
            ShortkeyError::FileOperation(_) => "File Operation Error",
            ShortkeyError::Serialization(_) => "Serialization Error",
            ShortkeyError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortkeyError::Validation(msg)
            | ShortkeyError::StoreOpen(msg)
            | ShortkeyError::StoreOperation(msg)
            | ShortkeyError::GeneratorExhausted(msg)
            | ShortkeyError::FileOperation(msg)
            | ShortkeyError::Serialization(msg)
            | ShortkeyError::Config(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// Whether the failure was caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ShortkeyError::Validation(_))
    }
}

impl fmt::Display for ShortkeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortkeyError {}

// 便捷的构造函数
impl ShortkeyError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortkeyError::Validation(msg.into())
    }

    pub fn store_open<T: Into<String>>(msg: T) -> Self {
        ShortkeyError::StoreOpen(msg.into())
    }

    pub fn store_operation<T: Into<String>>(msg: T) -> Self {
        ShortkeyError::StoreOperation(msg.into())
    }

    pub fn generator_exhausted(attempts: u32) -> Self {
        ShortkeyError::GeneratorExhausted(format!(
            "no free key found after {} attempts",
            attempts
        ))
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ShortkeyError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShortkeyError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ShortkeyError::Config(msg.into())
    }
}

// redb 的错误全部归为存储操作错误；打开失败由 UrlStore::open 单独映射
impl From<redb::Error> for ShortkeyError {
    fn from(err: redb::Error) -> Self {
        ShortkeyError::StoreOperation(err.to_string())
    }
}

impl From<redb::DatabaseError> for ShortkeyError {
    fn from(err: redb::DatabaseError) -> Self {
        ShortkeyError::StoreOperation(err.to_string())
    }
}

impl From<redb::TransactionError> for ShortkeyError {
    fn from(err: redb::TransactionError) -> Self {
        ShortkeyError::StoreOperation(err.to_string())
    }
}

impl From<redb::TableError> for ShortkeyError {
    fn from(err: redb::TableError) -> Self {
        ShortkeyError::StoreOperation(err.to_string())
    }
}

impl From<redb::StorageError> for ShortkeyError {
    fn from(err: redb::StorageError) -> Self {
        ShortkeyError::StoreOperation(err.to_string())
    }
}

impl From<redb::CommitError> for ShortkeyError {
    fn from(err: redb::CommitError) -> Self {
        ShortkeyError::StoreOperation(err.to_string())
    }
}

impl From<std::io::Error> for ShortkeyError {
    fn from(err: std::io::Error) -> Self {
        ShortkeyError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ShortkeyError {
    fn from(err: serde_json::Error) -> Self {
        ShortkeyError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortkeyError>;
