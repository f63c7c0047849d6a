use std::sync::LazyLock;
use regex::Regex;

pub mod response;
pub mod user;

/// 邮箱格式：local@domain.tld，顶级域至少两个字母。
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@([A-Za-z0-9.-]+\.[A-Za-z]{2,})$").expect("Invalid Regex")
});

/// 类 E.164 号码：可选的 `+`，首位 1-9，后跟 1 到 14 位数字。
/// 使用 `[0-9]` 而不是 `\d`，避免匹配到 Unicode 中的其他数字字符。
pub static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[1-9][0-9]{1,14}$").expect("Invalid Regex")
});
