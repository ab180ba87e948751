use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkregError {
    Parse(String),
    InvalidInput(String),
    DuplicateCode(String),
    GenerationExhausted(String),
    NotFound(String),
    Expired(String),
    Unauthorized(String),
    FileOperation(String),
    Config(String),
}

impl LinkregError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkregError::Parse(_) => "E001",
            LinkregError::InvalidInput(_) => "E002",
            LinkregError::DuplicateCode(_) => "E003",
            LinkregError::GenerationExhausted(_) => "E004",
            LinkregError::NotFound(_) => "E005",
            LinkregError::Expired(_) => "E006",
            LinkregError::Unauthorized(_) => "E007",
            LinkregError::FileOperation(_) => "E008",
            LinkregError::Config(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkregError::Parse(_) => "Parse Error",
            LinkregError::InvalidInput(_) => "Invalid Input",
            LinkregError::DuplicateCode(_) => "Duplicate Code",
            LinkregError::GenerationExhausted(_) => "Code Generation Exhausted",
            LinkregError::NotFound(_) => "Not Found",
            LinkregError::Expired(_) => "Link Expired",
            LinkregError::Unauthorized(_) => "Unauthorized",
            LinkregError::FileOperation(_) => "File Operation Error",
            LinkregError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkregError::Parse(msg)
            | LinkregError::InvalidInput(msg)
            | LinkregError::DuplicateCode(msg)
            | LinkregError::GenerationExhausted(msg)
            | LinkregError::NotFound(msg)
            | LinkregError::Expired(msg)
            | LinkregError::Unauthorized(msg)
            | LinkregError::FileOperation(msg)
            | LinkregError::Config(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 CLI 终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkregError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkregError {}

// 便捷的构造函数
impl LinkregError {
    pub fn parse<T: Into<String>>(msg: T) -> Self {
        LinkregError::Parse(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        LinkregError::InvalidInput(msg.into())
    }

    pub fn duplicate_code<T: Into<String>>(msg: T) -> Self {
        LinkregError::DuplicateCode(msg.into())
    }

    pub fn generation_exhausted<T: Into<String>>(msg: T) -> Self {
        LinkregError::GenerationExhausted(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkregError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        LinkregError::Expired(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LinkregError::Unauthorized(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkregError::FileOperation(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkregError::Config(msg.into())
    }
}

impl From<std::io::Error> for LinkregError {
    fn from(err: std::io::Error) -> Self {
        LinkregError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkregError {
    fn from(err: serde_json::Error) -> Self {
        LinkregError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for LinkregError {
    fn from(err: toml::de::Error) -> Self {
        LinkregError::Config(err.to_string())
    }
}

/// 命令行参数错误（未知选项、缺少值等）
impl From<clap::Error> for LinkregError {
    fn from(err: clap::Error) -> Self {
        let rendered = err.to_string();
        let message = rendered.trim().trim_start_matches("error: ");
        LinkregError::InvalidInput(message.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkregError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            LinkregError::parse("x"),
            LinkregError::invalid_input("x"),
            LinkregError::duplicate_code("x"),
            LinkregError::generation_exhausted("x"),
            LinkregError::not_found("x"),
            LinkregError::expired("x"),
            LinkregError::unauthorized("x"),
            LinkregError::file_operation("x"),
            LinkregError::config("x"),
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = LinkregError::duplicate_code("short code 'abc' already exists");
        assert_eq!(
            err.to_string(),
            "Duplicate Code: short code 'abc' already exists"
        );
        assert_eq!(err.message(), "short code 'abc' already exists");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: LinkregError = io.into();
        assert!(matches!(err, LinkregError::FileOperation(_)));
    }

    #[test]
    fn test_clap_error_conversion() {
        let clap_err = clap::Error::raw(
            clap::error::ErrorKind::UnknownArgument,
            "unexpected argument '--colour' found\n",
        );
        let err: LinkregError = clap_err.into();
        assert!(matches!(err, LinkregError::InvalidInput(_)));
        assert!(err.message().contains("unexpected argument '--colour' found"));
        assert!(!err.message().starts_with("error:"));
    }
}
