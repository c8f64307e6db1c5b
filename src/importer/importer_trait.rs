// ==========================================
// BLS 培训管理系统 - 导入接口 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::{ChecklistItem, QuestionImportFormat};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{HeaderMode, RawSheet};
use async_trait::async_trait;
use std::error::Error;

/// 后端调用错误（由后端协作方定义）
pub type StoreError = Box<dyn Error + Send + Sync>;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（字节 → 原始行）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件字节为工作表列表
    ///
    /// # 参数
    /// - bytes: 文件内容
    /// - header_mode: 首行是否为表头
    ///
    /// # 返回
    /// - Ok(Vec<RawSheet>): 按工作簿顺序排列（CSV 固定一张）
    /// - Err: 编码错误、文件损坏
    fn parse_sheets(&self, bytes: &[u8], header_mode: HeaderMode) -> ImportResult<Vec<RawSheet>>;
}

// ==========================================
// QuestionStore Trait
// ==========================================
// 用途: 后端题目创建接口（每条记录一次调用，无批量接口）
// 实现者: 后端协作方
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// 创建题目，返回后端生成的 ID
    async fn create_question(&self, question: &QuestionImportFormat) -> Result<String, StoreError>;
}

// ==========================================
// ChecklistStore Trait
// ==========================================
// 用途: 后端检查表条目创建接口
// 实现者: 后端协作方
#[async_trait]
pub trait ChecklistStore: Send + Sync {
    /// 创建检查表条目，返回后端生成的 ID
    async fn create_checklist_item(&self, item: &ChecklistItem) -> Result<String, StoreError>;
}
