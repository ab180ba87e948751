//! 密码摘要工具模块
//!
//! 存储的是 SHA-256 的十六进制摘要，明文从不落盘

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// SHA-256 of `password`, lowercase hex.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// 验证密码是否匹配摘要（常量时间比较）
pub fn verify_password(password: &str, hash: &str) -> bool {
    let candidate = hash_password(password);
    let expected = hash.trim().to_ascii_lowercase();
    candidate.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// 处理用户输入的新密码
///
/// - 如果输入为空或 None，返回 None
/// - 否则返回摘要
pub fn process_new_password(password: Option<&str>) -> Option<String> {
    match password {
        Some(pwd) if !pwd.is_empty() => Some(hash_password(pwd)),
        _ => None,
    }
}
