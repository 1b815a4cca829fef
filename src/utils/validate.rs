use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static GITHUB_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?github\.com/[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+/?$")
        .expect("Invalid GitHub URL regex")
});

/// 时段最长时长（小时）
const SLOT_MAX_DURATION_HOURS: i64 = 48;
/// 工作时间窗口（UTC）
const SLOT_EARLIEST_HOUR: u32 = 9;
const SLOT_LATEST_HOUR: u32 = 17;

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：5 <= x <= 16
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    // 用户名格式校验：只能包含字母、数字、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit");
    }
    Ok(())
}

/// 验证仓库地址是否为 GitHub 仓库 URL
pub fn is_github_url(url: &str) -> bool {
    GITHUB_URL_RE.is_match(url)
}

/// 从 GitHub 仓库 URL 提取仓库名
pub fn extract_repo_name(url: &str) -> Option<String> {
    if !is_github_url(url) {
        return None;
    }
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .map(|name| name.trim_end_matches(".git").to_string())
}

/// 验证评审时段的时间窗口
///
/// 约束：起始早于结束、时长不超过 48 小时、落在工作日
/// 09:00–17:00（UTC）之间。
pub fn validate_slot_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), &'static str> {
    if start >= end {
        return Err("Slot start time must be before end time");
    }
    if (end - start).num_minutes() > SLOT_MAX_DURATION_HOURS * 60 {
        return Err("Slot duration must not exceed 48 hours");
    }
    if is_weekend(start) || is_weekend(end) {
        return Err("Slots must fall on a weekday");
    }
    if start.hour() < SLOT_EARLIEST_HOUR {
        return Err("Slots must not start before 09:00 UTC");
    }
    if end.hour() > SLOT_LATEST_HOUR || (end.hour() == SLOT_LATEST_HOUR && end.minute() > 0) {
        return Err("Slots must not end after 17:00 UTC");
    }
    Ok(())
}

fn is_weekend(at: DateTime<Utc>) -> bool {
    matches!(at.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_valid_github_urls() {
        assert!(is_github_url("https://github.com/a/proj"));
        assert!(is_github_url("https://www.github.com/someone/some-repo"));
        assert!(is_github_url("http://github.com/someone/repo.name/"));
    }

    #[test]
    fn test_invalid_github_urls() {
        assert!(!is_github_url("https://gitlab.com/a/proj"));
        assert!(!is_github_url("https://github.com/onlyowner"));
        assert!(!is_github_url("github.com/a/proj"));
        assert!(!is_github_url("https://github.com/a/proj/tree/main"));
    }

    #[test]
    fn test_extract_repo_name() {
        assert_eq!(
            extract_repo_name("https://github.com/a/proj").as_deref(),
            Some("proj")
        );
        assert_eq!(
            extract_repo_name("https://github.com/a/proj.git/").as_deref(),
            Some("proj")
        );
        assert_eq!(extract_repo_name("https://example.com/a/b"), None);
    }

    #[test]
    fn test_weekend_slot_rejected() {
        // 2026-08-08 是周六
        let err = validate_slot_window(at(2026, 8, 8, 10, 0), at(2026, 8, 8, 10, 45));
        assert_eq!(err, Err("Slots must fall on a weekday"));
    }

    #[test]
    fn test_slot_past_closing_hour_rejected() {
        // 2026-08-10 是周一，16:30–17:15 超出 17:00 截止
        let err = validate_slot_window(at(2026, 8, 10, 16, 30), at(2026, 8, 10, 17, 15));
        assert_eq!(err, Err("Slots must not end after 17:00 UTC"));
    }

    #[test]
    fn test_slot_ending_exactly_at_17_accepted() {
        assert!(validate_slot_window(at(2026, 8, 10, 16, 15), at(2026, 8, 10, 17, 0)).is_ok());
    }

    #[test]
    fn test_morning_slot_accepted() {
        // 周一 09:00–09:45 合法
        assert!(validate_slot_window(at(2026, 8, 10, 9, 0), at(2026, 8, 10, 9, 45)).is_ok());
    }

    #[test]
    fn test_slot_before_opening_hour_rejected() {
        let err = validate_slot_window(at(2026, 8, 10, 8, 30), at(2026, 8, 10, 9, 15));
        assert_eq!(err, Err("Slots must not start before 09:00 UTC"));
    }

    #[test]
    fn test_inverted_and_overlong_slots_rejected() {
        assert!(validate_slot_window(at(2026, 8, 10, 10, 0), at(2026, 8, 10, 10, 0)).is_err());
        assert!(validate_slot_window(at(2026, 8, 10, 10, 0), at(2026, 8, 10, 9, 0)).is_err());
        // 周一 09:00 到 周四 10:00 超过 48 小时
        assert!(validate_slot_window(at(2026, 8, 10, 9, 0), at(2026, 8, 13, 10, 0)).is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("SecurePass123").is_ok());
        assert!(validate_password("short1A").is_err());
        assert!(validate_password("alllowercase1").is_err());
        assert!(validate_password("ALLUPPERCASE1").is_err());
        assert!(validate_password("NoDigitsHere").is_err());
    }

    #[test]
    fn test_username_policy() {
        assert!(validate_username("jdupont").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("has space").is_err());
    }
}
