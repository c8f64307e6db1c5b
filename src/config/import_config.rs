// ==========================================
// BLS 培训管理系统 - 导入配置
// ==========================================
// 职责: 行分类阈值、段落关键字、题目默认值
// 存储: JSON 文件（可选），缺省字段回落到默认值
// ==========================================

use crate::domain::question::{
    DEFAULT_CATEGORY, DEFAULT_DIFFICULTY_LEVEL, DEFAULT_PARSED_TEST_TYPE, DEFAULT_POINTS,
    DEFAULT_QUESTION_TYPE, QuestionImportFormat,
};
use crate::importer::error::ImportResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 导入配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// 单列表头长度超过此值时，视为第一道题的题干（无表头导出）
    pub header_embedded_min_len: usize,

    /// 段落标题最大长度（不含关键字时）
    pub section_header_max_len: usize,

    /// 段落关键字（命中时不受长度限制）
    pub section_keywords: Vec<String>,

    /// 每题最多选项数
    pub max_options: usize,

    /// 题目默认值
    pub defaults: QuestionDefaults,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            header_embedded_min_len: 50,
            section_header_max_len: 50,
            section_keywords: [
                "DANGER",
                "RESPONSE",
                "AIRWAY",
                "BREATHING",
                "CIRCULATION",
                "DEFIBRILATION",
                "STATION",
                "SKILL",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
            max_options: 4,
            defaults: QuestionDefaults::default(),
        }
    }
}

/// 题目默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionDefaults {
    pub question_type: String,
    pub difficulty_level: String,
    pub category: String,
    pub points: i32,

    /// 单列文本解析出的题目所属测试类型
    pub parsed_test_type: String,
}

impl Default for QuestionDefaults {
    fn default() -> Self {
        Self {
            question_type: DEFAULT_QUESTION_TYPE.to_string(),
            difficulty_level: DEFAULT_DIFFICULTY_LEVEL.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            points: DEFAULT_POINTS,
            parsed_test_type: DEFAULT_PARSED_TEST_TYPE.to_string(),
        }
    }
}

impl QuestionDefaults {
    /// 以配置的默认元数据创建题目
    pub fn new_question(&self, question_text: impl Into<String>) -> QuestionImportFormat {
        let mut question = QuestionImportFormat::new(question_text);
        question.question_type = self.question_type.clone();
        question.difficulty_level = self.difficulty_level.clone();
        question.category = self.category.clone();
        question.points = self.points;
        question
    }
}

impl ImportConfig {
    pub fn from_json_str(raw: &str) -> ImportResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 从 JSON 文件加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径
    ///
    /// # 返回
    /// - Ok(ImportConfig): 未出现的字段取默认值
    /// - Err: 文件读取失败或 JSON 格式错误
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// 关键字匹配（区分大小写，标题已是全大写）
    pub fn contains_section_keyword(&self, line: &str) -> bool {
        self.section_keywords.iter().any(|k| line.contains(k.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_thresholds() {
        let config = ImportConfig::default();
        assert_eq!(config.header_embedded_min_len, 50);
        assert_eq!(config.section_header_max_len, 50);
        assert_eq!(config.section_keywords.len(), 8);
        assert_eq!(config.defaults.points, 10);
        assert_eq!(config.defaults.parsed_test_type, "practice");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ImportConfig::from_json_str(r#"{"max_options": 5, "defaults": {"points": 5}}"#)
            .unwrap();
        assert_eq!(config.max_options, 5);
        assert_eq!(config.defaults.points, 5);
        assert_eq!(config.defaults.category, "basic_life_support");
        assert_eq!(config.header_embedded_min_len, 50);
    }

    #[test]
    fn test_from_json_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"section_keywords": ["COMPRESSION"]}}"#).unwrap();

        let config = ImportConfig::from_json_file(temp_file.path()).unwrap();
        assert!(config.contains_section_keyword("CHEST COMPRESSION"));
        assert!(!config.contains_section_keyword("DANGER"));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = ImportConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ImportError::ConfigError(_)));
    }
}
