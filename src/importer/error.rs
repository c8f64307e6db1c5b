// ==========================================
// BLS 培训管理系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: Display 文本即界面展示给用户的错误信息
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("Unsupported file format: {0}. Please upload a CSV or Excel file.")]
    UnsupportedFormat(String),

    #[error("Failed to read file: {0}")]
    FileReadError(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Failed to decode base64 content: {0}")]
    Base64DecodeError(String),

    #[error("File is not valid UTF-8 text: {0}")]
    TextDecodeError(String),

    #[error("Failed to parse CSV file: {0}")]
    CsvParseError(String),

    #[error("Failed to parse Excel file: {0}")]
    ExcelParseError(String),

    #[error("Excel file contains no sheets")]
    EmptyWorkbook,

    // ===== 内容解析错误 =====
    #[error("Question {0}: Could not parse question format")]
    QuestionFormat(usize),

    // ===== 配置错误 =====
    #[error("Invalid import configuration: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<base64::DecodeError> for ImportError {
    fn from(err: base64::DecodeError) -> Self {
        ImportError::Base64DecodeError(err.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::ConfigError(err.to_string())
    }
}

impl From<std::str::Utf8Error> for ImportError {
    fn from(err: std::str::Utf8Error) -> Self {
        ImportError::TextDecodeError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_message() {
        let err = ImportError::UnsupportedFormat("pdf".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported file format: pdf. Please upload a CSV or Excel file."
        );
    }

    #[test]
    fn test_question_format_message() {
        assert_eq!(
            ImportError::QuestionFormat(3).to_string(),
            "Question 3: Could not parse question format"
        );
    }

    #[test]
    fn test_json_error_is_config_error() {
        let err: ImportError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(matches!(err, ImportError::ConfigError(_)));
        assert!(err.to_string().starts_with("Invalid import configuration"));
    }
}
