// ==========================================
// BLS 培训管理系统 - 配置层
// ==========================================
// 职责: 导入阈值与默认值
// ==========================================

pub mod import_config;

pub use import_config::{ImportConfig, QuestionDefaults};
