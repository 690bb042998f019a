use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum TinylinkError {
    Validation(String),
    Conflict { message: String, suggestion: String },
    NotFound(String),
    FileOperation(String),
    Serialization(String),
    Config(String),
    Internal(String),
}

impl TinylinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TinylinkError::Validation(_) => "E001",
            TinylinkError::Conflict { .. } => "E002",
            TinylinkError::NotFound(_) => "E003",
            TinylinkError::FileOperation(_) => "E004",
            TinylinkError::Serialization(_) => "E005",
            TinylinkError::Config(_) => "E006",
            TinylinkError::Internal(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TinylinkError::Validation(_) => "Validation Error",
            TinylinkError::Conflict { .. } => "Conflict Error",
            TinylinkError::NotFound(_) => "Resource Not Found",
            TinylinkError::FileOperation(_) => "File Operation Error",
            TinylinkError::Serialization(_) => "Serialization Error",
            TinylinkError::Config(_) => "Configuration Error",
            TinylinkError::Internal(_) => "Internal Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            TinylinkError::Validation(msg) => msg,
            TinylinkError::Conflict { message, .. } => message,
            TinylinkError::NotFound(msg) => msg,
            TinylinkError::FileOperation(msg) => msg,
            TinylinkError::Serialization(msg) => msg,
            TinylinkError::Config(msg) => msg,
            TinylinkError::Internal(msg) => msg,
        }
    }

    /// Alternative short code offered with a conflict
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            TinylinkError::Conflict { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    /// HTTP status the API answers with for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            TinylinkError::Validation(_) | TinylinkError::Conflict { .. } => {
                StatusCode::BAD_REQUEST
            }
            TinylinkError::NotFound(_) => StatusCode::NOT_FOUND,
            TinylinkError::FileOperation(_)
            | TinylinkError::Serialization(_)
            | TinylinkError::Config(_)
            | TinylinkError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
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

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TinylinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TinylinkError {}

// 便捷的构造函数
impl TinylinkError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Validation(msg.into())
    }

    pub fn conflict<T: Into<String>, S: Into<String>>(msg: T, suggestion: S) -> Self {
        TinylinkError::Conflict {
            message: msg.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TinylinkError::NotFound(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        TinylinkError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Config(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Internal(msg.into())
    }
}

impl From<std::io::Error> for TinylinkError {
    fn from(err: std::io::Error) -> Self {
        TinylinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TinylinkError {
    fn from(err: serde_json::Error) -> Self {
        TinylinkError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for TinylinkError {
    fn from(err: config::ConfigError) -> Self {
        TinylinkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TinylinkError>;
