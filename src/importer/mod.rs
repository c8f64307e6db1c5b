// ==========================================
// BLS 培训管理系统 - 导入层
// ==========================================
// 职责: 题库 / 检查表文件导入，生成结构化记录
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod bilingual_merger;
pub mod checklist_grouper;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod file_source;
pub mod import_committer;
pub mod import_parser;
pub mod importer_trait;
pub mod question_grouper;
pub mod question_text_parser;
pub mod question_validator;
pub mod row_shape;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, HeaderMode, RawRow, RawSheet};
pub use file_source::{FileContent, FileFormat};
pub use import_committer::{CommitFailure, CommitSummary, ImportCommitter};
pub use import_parser::SpreadsheetImportParser;
pub use question_validator::{
    validate_questions, ImportPreview, InvalidQuestion, QuestionValidation,
};

// 重导出 Trait 接口
pub use importer_trait::{ChecklistStore, FileParser, QuestionStore, StoreError};
