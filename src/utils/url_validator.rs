//! URL 验证模块
//!
//! 目标地址必须是可解析的绝对 URL，并阻止可执行脚本的协议

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
const DANGEROUS_PROTOCOLS: &[&str] = &["javascript", "data", "file", "vbscript", "about", "blob"];

/// Validate that `url` is an absolute URL safe to redirect to, returning
/// the parsed form.
pub fn validate_url(url: &str) -> Result<Url, UrlValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    // 相对地址（如 "not-a-url"）在这里失败
    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if DANGEROUS_PROTOCOLS.contains(&parsed.scheme()) {
        return Err(UrlValidationError::DangerousProtocol(format!(
            "{}:",
            parsed.scheme()
        )));
    }

    Ok(parsed)
}
