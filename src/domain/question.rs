// ==========================================
// BLS 培训管理系统 - 题目领域模型
// ==========================================
// 职责: 题库导入中间结构体（文件解析 → 此结构 → 后端创建）
// 生命周期: 导入流程内临时对象，仅在人工复核时补充正确答案
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// AnswerOption - 选项字母
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerOption {
    A,
    B,
    C,
    D,
}

impl AnswerOption {
    /// 按扫描顺序取选项槽位（0 → A）
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(AnswerOption::A),
            1 => Some(AnswerOption::B),
            2 => Some(AnswerOption::C),
            3 => Some(AnswerOption::D),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerOption::A => "A",
            AnswerOption::B => "B",
            AnswerOption::C => "C",
            AnswerOption::D => "D",
        }
    }
}

impl fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerOption {
    type Err = String;

    /// 大小写不敏感；两端空白忽略
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(AnswerOption::A),
            "B" => Ok(AnswerOption::B),
            "C" => Ok(AnswerOption::C),
            "D" => Ok(AnswerOption::D),
            other => Err(format!("invalid answer option: {}", other)),
        }
    }
}

// ==========================================
// QuestionImportFormat - 导入题目
// ==========================================
// 红线: question_text 是唯一必填字段，其余字段均可缺省
// 对齐: 后端 create-question 调用的入参
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionImportFormat {
    // ===== 题干 =====
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_text_en: Option<String>, // 英文题干（仅双语导入）

    // ===== 元数据 =====
    pub question_type: String,    // 默认 multiple_choice
    pub difficulty_level: String, // 默认 easy
    pub category: String,         // 默认 basic_life_support（snake_case）
    pub points: i32,              // 默认 10
    #[serde(default)]
    pub time_limit_seconds: Option<i32>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub correct_answer: Option<AnswerOption>, // 缺失时由人工复核选择

    // ===== 选项 =====
    #[serde(default)]
    pub option_a: Option<String>,
    #[serde(default)]
    pub option_b: Option<String>,
    #[serde(default)]
    pub option_c: Option<String>,
    #[serde(default)]
    pub option_d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_a_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_b_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_c_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_d_en: Option<String>,

    // ===== 分类 =====
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub test_type: Option<String>, // pre_test / post_test / practice
}

impl QuestionImportFormat {
    /// 以默认元数据创建题目
    pub fn new(question_text: impl Into<String>) -> Self {
        Self {
            question_text: question_text.into(),
            question_text_en: None,
            question_type: DEFAULT_QUESTION_TYPE.to_string(),
            difficulty_level: DEFAULT_DIFFICULTY_LEVEL.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            points: DEFAULT_POINTS,
            time_limit_seconds: None,
            explanation: None,
            correct_answer: None,
            option_a: None,
            option_b: None,
            option_c: None,
            option_d: None,
            option_a_en: None,
            option_b_en: None,
            option_c_en: None,
            option_d_en: None,
            tags: None,
            test_type: None,
        }
    }

    /// 题目是否完整（题干去空白后非空）
    pub fn is_well_formed(&self) -> bool {
        !self.question_text.trim().is_empty()
    }

    /// 按 A..D 顺序返回选项（保留空槽位）
    pub fn options(&self) -> [Option<&str>; 4] {
        [
            self.option_a.as_deref(),
            self.option_b.as_deref(),
            self.option_c.as_deref(),
            self.option_d.as_deref(),
        ]
    }

    /// 按槽位写入选项
    pub fn set_option(&mut self, slot: AnswerOption, text: Option<String>) {
        match slot {
            AnswerOption::A => self.option_a = text,
            AnswerOption::B => self.option_b = text,
            AnswerOption::C => self.option_c = text,
            AnswerOption::D => self.option_d = text,
        }
    }

    /// 按槽位写入英文选项
    pub fn set_option_en(&mut self, slot: AnswerOption, text: Option<String>) {
        match slot {
            AnswerOption::A => self.option_a_en = text,
            AnswerOption::B => self.option_b_en = text,
            AnswerOption::C => self.option_c_en = text,
            AnswerOption::D => self.option_d_en = text,
        }
    }

    /// 人工复核: 补充正确答案
    pub fn with_correct_answer(mut self, answer: AnswerOption) -> Self {
        self.correct_answer = Some(answer);
        self
    }
}

// 默认值
pub const DEFAULT_QUESTION_TYPE: &str = "multiple_choice";
pub const DEFAULT_DIFFICULTY_LEVEL: &str = "easy";
pub const DEFAULT_CATEGORY: &str = "basic_life_support";
pub const DEFAULT_POINTS: i32 = 10;
pub const DEFAULT_PARSED_TEST_TYPE: &str = "practice";
