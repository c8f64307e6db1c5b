// ==========================================
// BLS 培训管理系统 - 领域模型层
// ==========================================
// 职责: 导入记录、解析结果、签到载荷
// 红线: 不含文件解析逻辑
// ==========================================

pub mod checkin;
pub mod checklist;
pub mod parse_result;
pub mod question;

// 重导出核心类型
pub use checkin::{CheckInError, CheckInPayload};
pub use checklist::{ChecklistCategory, ChecklistItem};
pub use parse_result::ParsedFileResult;
pub use question::{AnswerOption, QuestionImportFormat};
