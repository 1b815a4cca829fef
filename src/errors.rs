//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_bootcamp_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum BootcampError {
            $($variant(String),)*
        }

        impl BootcampError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(BootcampError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(BootcampError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(BootcampError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl BootcampError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        BootcampError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_bootcamp_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Conflict("E008", "State Conflict Error"),
    Forbidden("E009", "Forbidden Error"),
    Serialization("E010", "Serialization Error"),
    StoragePluginNotFound("E011", "Storage Plugin Not Found"),
    DateParse("E012", "Date Parse Error"),
    Authentication("E013", "Authentication Error"),
    Authorization("E014", "Authorization Error"),
}

impl BootcampError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for BootcampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for BootcampError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for BootcampError {
    fn from(err: sea_orm::DbErr) -> Self {
        BootcampError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for BootcampError {
    fn from(err: std::io::Error) -> Self {
        BootcampError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for BootcampError {
    fn from(err: serde_json::Error) -> Self {
        BootcampError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for BootcampError {
    fn from(err: chrono::ParseError) -> Self {
        BootcampError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BootcampError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(BootcampError::cache_connection("test").code(), "E001");
        assert_eq!(BootcampError::validation("test").code(), "E006");
        assert_eq!(BootcampError::conflict("test").code(), "E008");
        assert_eq!(BootcampError::forbidden("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            BootcampError::conflict("slot already booked").error_type(),
            "State Conflict Error"
        );
        assert_eq!(
            BootcampError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = BootcampError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = BootcampError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }
}
