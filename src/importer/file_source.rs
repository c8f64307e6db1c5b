// ==========================================
// BLS 培训管理系统 - 文件来源解析
// ==========================================
// 职责: 扩展名识别 + 内容获取（路径 / 字节 / 文本 / data URI）
// 说明: 传输层问题，在任何解析策略运行前解决
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use base64::{engine::general_purpose, Engine as _};
use std::path::PathBuf;
use tracing::debug;

// ==========================================
// FileFormat - 支持的文件格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
    Xls,
}

impl FileFormat {
    /// 根据文件名识别格式（取最后一个 '.' 之后的小写后缀）
    pub fn from_file_name(file_name: &str) -> ImportResult<Self> {
        let ext = file_extension(file_name);
        match ext.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" => Ok(FileFormat::Xlsx),
            "xls" => Ok(FileFormat::Xls),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }

    pub fn is_workbook(&self) -> bool {
        matches!(self, FileFormat::Xlsx | FileFormat::Xls)
    }
}

/// 无 '.' 时整个文件名即后缀
pub fn file_extension(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

// ==========================================
// FileContent - 上传内容
// ==========================================
#[derive(Debug, Clone)]
pub enum FileContent {
    Path(PathBuf),
    Bytes(Vec<u8>),
    Text(String),
    /// data:<mime>;base64,<payload>
    DataUri(String),
}

impl FileContent {
    /// 文本内容；以 "data:" 开头时视为 data URI
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.starts_with("data:") {
            FileContent::DataUri(text)
        } else {
            FileContent::Text(text)
        }
    }

    /// 异步读取本地文件
    pub async fn read_async(path: impl Into<PathBuf>) -> ImportResult<Self> {
        let path = path.into();
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| ImportError::FileReadError(format!("{}: {}", path.display(), e)))?;
        Ok(FileContent::Bytes(bytes))
    }

    /// 解析为原始字节
    pub fn into_bytes(self) -> ImportResult<Vec<u8>> {
        match self {
            FileContent::Path(path) => std::fs::read(&path)
                .map_err(|e| ImportError::FileReadError(format!("{}: {}", path.display(), e))),
            FileContent::Bytes(bytes) => Ok(bytes),
            FileContent::Text(text) => Ok(text.into_bytes()),
            FileContent::DataUri(uri) => decode_data_uri(&uri),
        }
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(bytes: Vec<u8>) -> Self {
        FileContent::Bytes(bytes)
    }
}

impl From<PathBuf> for FileContent {
    fn from(path: PathBuf) -> Self {
        FileContent::Path(path)
    }
}

/// 解码 data URI：逗号之后的部分按 base64 解码
pub fn decode_data_uri(uri: &str) -> ImportResult<Vec<u8>> {
    let (meta, payload) = uri
        .split_once(',')
        .ok_or_else(|| ImportError::InvalidDataUri("missing ',' separator".to_string()))?;
    debug!(meta = %meta, payload_len = payload.len(), "解码 data URI");

    let bytes = general_purpose::STANDARD.decode(payload.trim())?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(FileFormat::from_file_name("q.CSV").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_file_name("bank.v2.xlsx").unwrap(), FileFormat::Xlsx);
        assert_eq!(FileFormat::from_file_name("old.xls").unwrap(), FileFormat::Xls);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = FileFormat::from_file_name("notes.PDF").unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ref ext) if ext == "pdf"));
    }

    #[test]
    fn test_extension_without_dot_is_whole_name() {
        assert_eq!(file_extension("README"), "readme");
    }

    #[test]
    fn test_data_uri_decoded() {
        // "a,b\n1,2"
        let uri = "data:text/csv;base64,YSxiCjEsMg==";
        let bytes = FileContent::from_text(uri).into_bytes().unwrap();
        assert_eq!(bytes, b"a,b\n1,2");
    }

    #[test]
    fn test_data_uri_without_comma() {
        let err = decode_data_uri("data:text/csv;base64").unwrap_err();
        assert!(matches!(err, ImportError::InvalidDataUri(_)));
    }

    #[test]
    fn test_data_uri_bad_base64() {
        let err = decode_data_uri("data:text/csv;base64,@@@").unwrap_err();
        assert!(matches!(err, ImportError::Base64DecodeError(_)));
    }

    #[test]
    fn test_missing_path_is_read_error() {
        let err = FileContent::Path(PathBuf::from("does_not_exist.csv"))
            .into_bytes()
            .unwrap_err();
        assert!(matches!(err, ImportError::FileReadError(_)));
    }
}
