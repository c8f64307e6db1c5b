// ==========================================
// BLS 培训管理系统 - 文件解析结果
// ==========================================
// 红线: success == errors.is_empty()，构造后不可变
// 用途: 交给预览界面，确认后逐条转为后端创建调用
// ==========================================

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedFileResult<T> {
    success: bool,
    data: Vec<T>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl<T> ParsedFileResult<T> {
    /// 由解析产物构造；success 由 errors 推导
    pub fn new(data: Vec<T>, errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            success: errors.is_empty(),
            data,
            errors,
            warnings,
        }
    }

    /// 单条致命错误，无数据
    pub fn failure(error: impl Into<String>) -> Self {
        Self::new(Vec::new(), vec![error.into()], Vec::new())
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<String>, Vec<String>) {
        (self.data, self.errors, self.warnings)
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// 逐条转换数据，errors / warnings 原样保留
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> ParsedFileResult<U> {
        ParsedFileResult {
            success: self.success,
            data: self.data.into_iter().map(f).collect(),
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_follows_errors() {
        let ok: ParsedFileResult<u8> = ParsedFileResult::new(vec![1], vec![], vec!["w".into()]);
        assert!(ok.success());
        assert_eq!(ok.warnings(), ["w".to_string()]);

        let failed: ParsedFileResult<u8> = ParsedFileResult::failure("boom");
        assert!(!failed.success());
        assert!(failed.data().is_empty());
        assert_eq!(failed.errors(), ["boom".to_string()]);

        let mapped = failed.map(|n| n as u32 * 2);
        assert!(!mapped.success());
        assert_eq!(mapped.errors(), ["boom".to_string()]);
    }
}
