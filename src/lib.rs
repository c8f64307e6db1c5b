// ==========================================
// BLS 培训管理系统 - 导入核心库
// ==========================================
// 职责: 题库与技能检查表的表格文件导入
// 后端存储、界面、扫码均为外部协作方
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与结果类型
pub mod domain;

// 导入层 - 文件解析与分组
pub mod importer;

// 配置层 - 阈值与默认值
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::ImportConfig;
pub use domain::{
    AnswerOption, CheckInError, CheckInPayload, ChecklistCategory, ChecklistItem,
    ParsedFileResult, QuestionImportFormat,
};
pub use importer::{
    validate_questions, FileContent, ImportCommitter, ImportError, ImportPreview,
    SpreadsheetImportParser,
};

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
