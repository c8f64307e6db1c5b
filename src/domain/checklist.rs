// ==========================================
// BLS 培训管理系统 - 检查表领域模型
// ==========================================
// 职责: 检查表导入产物（分组段落 / 独立条目）
// 红线: category = Section 时 sub_items 至少一条
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistCategory {
    Section,
    Item,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: ChecklistCategory,
    #[serde(default)]
    pub sub_items: Vec<String>,
}

impl ChecklistItem {
    /// 段落（带子条目）
    pub fn section(title: impl Into<String>, sub_items: Vec<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            category: ChecklistCategory::Section,
            sub_items,
        }
    }

    /// 独立条目（无子条目）
    pub fn item(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            category: ChecklistCategory::Item,
            sub_items: Vec::new(),
        }
    }

    pub fn is_section(&self) -> bool {
        self.category == ChecklistCategory::Section
    }
}
