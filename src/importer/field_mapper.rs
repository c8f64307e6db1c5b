// ==========================================
// BLS 培训管理系统 - 字段映射器实现
// ==========================================
// 职责: 标准形态行（具名列）→ QuestionImportFormat
// 规则: 声明式别名表，按顺序取第一个非空别名；无值取默认值
// ==========================================

use crate::config::ImportConfig;
use crate::domain::question::{AnswerOption, QuestionImportFormat};
use crate::importer::file_parser::RawRow;
use tracing::debug;

/// 目标字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionField {
    QuestionText,
    QuestionTextEn,
    QuestionType,
    DifficultyLevel,
    Category,
    Points,
    TimeLimitSeconds,
    Explanation,
    CorrectAnswer,
    Option(AnswerOption),
    OptionEn(AnswerOption),
    Tags,
    TestType,
}

/// 值标准化方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// TRIM
    Text,
    /// 小写 + 空白折叠为单个下划线
    SnakeCase,
    /// 大写
    Upper,
    /// 整数（失败回落默认值）
    Integer,
}

impl Normalizer {
    fn apply(&self, raw: &str) -> String {
        match self {
            Normalizer::Text | Normalizer::Integer => raw.trim().to_string(),
            Normalizer::SnakeCase => to_snake_case(raw),
            Normalizer::Upper => raw.trim().to_uppercase(),
        }
    }
}

pub struct FieldRule {
    pub field: QuestionField,
    pub aliases: &'static [&'static str],
    pub normalizer: Normalizer,
}

const fn rule(
    field: QuestionField,
    aliases: &'static [&'static str],
    normalizer: Normalizer,
) -> FieldRule {
    FieldRule {
        field,
        aliases,
        normalizer,
    }
}

// ==========================================
// 别名表
// ==========================================
const QUESTION_TEXT_RULE: FieldRule = rule(
    QuestionField::QuestionText,
    &["question_text", "question", "text", "Question Text", "Question", "Text", "QUESTION"],
    Normalizer::Text,
);

pub const FIELD_RULES: &[FieldRule] = &[
    QUESTION_TEXT_RULE,
    rule(
        QuestionField::QuestionTextEn,
        &["question_text_en", "question_en", "Question Text EN", "Question EN", "questionTextEn"],
        Normalizer::Text,
    ),
    rule(
        QuestionField::QuestionType,
        &["question_type", "type", "Question Type", "Type", "questionType"],
        Normalizer::Text,
    ),
    rule(
        QuestionField::DifficultyLevel,
        &["difficulty_level", "difficulty", "Difficulty Level", "Difficulty", "difficultyLevel"],
        Normalizer::Text,
    ),
    rule(
        QuestionField::Category,
        &["category", "Category", "CATEGORY"],
        Normalizer::SnakeCase,
    ),
    rule(
        QuestionField::Points,
        &["points", "Points", "score", "Score"],
        Normalizer::Integer,
    ),
    rule(
        QuestionField::TimeLimitSeconds,
        &["time_limit_seconds", "time_limit", "Time Limit", "Time Limit Seconds", "timeLimitSeconds"],
        Normalizer::Integer,
    ),
    rule(
        QuestionField::Explanation,
        &["explanation", "Explanation", "rationale", "Rationale"],
        Normalizer::Text,
    ),
    rule(
        QuestionField::CorrectAnswer,
        &["correct_answer", "correct", "answer", "Correct Answer", "Correct", "Answer", "correctAnswer"],
        Normalizer::Upper,
    ),
    rule(
        QuestionField::Option(AnswerOption::A),
        &["option_a", "a", "A", "Option A", "option a", "optionA"],
        Normalizer::Text,
    ),
    rule(
        QuestionField::Option(AnswerOption::B),
        &["option_b", "b", "B", "Option B", "option b", "optionB"],
        Normalizer::Text,
    ),
    rule(
        QuestionField::Option(AnswerOption::C),
        &["option_c", "c", "C", "Option C", "option c", "optionC"],
        Normalizer::Text,
    ),
    rule(
        QuestionField::Option(AnswerOption::D),
        &["option_d", "d", "D", "Option D", "option d", "optionD"],
        Normalizer::Text,
    ),
    rule(
        QuestionField::OptionEn(AnswerOption::A),
        &["option_a_en", "Option A EN", "optionAEn"],
        Normalizer::Text,
    ),
    rule(
        QuestionField::OptionEn(AnswerOption::B),
        &["option_b_en", "Option B EN", "optionBEn"],
        Normalizer::Text,
    ),
    rule(
        QuestionField::OptionEn(AnswerOption::C),
        &["option_c_en", "Option C EN", "optionCEn"],
        Normalizer::Text,
    ),
    rule(
        QuestionField::OptionEn(AnswerOption::D),
        &["option_d_en", "Option D EN", "optionDEn"],
        Normalizer::Text,
    ),
    rule(QuestionField::Tags, &["tags", "Tags", "TAGS"], Normalizer::Text),
    rule(
        QuestionField::TestType,
        &["test_type", "Test Type", "testType", "TestType"],
        Normalizer::SnakeCase,
    ),
];

/// 小写 + 空白折叠为单个下划线
pub fn to_snake_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// 解析整数；接受整数值的浮点文本（工作簿数值单元格）
pub fn parse_integer(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    trimmed.parse::<i32>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.fract() == 0.0 && *f >= i32::MIN as f64 && *f <= i32::MAX as f64)
            .map(|f| f as i32)
    })
}

/// 按别名顺序取第一个非空值
pub fn resolve<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|alias| row.get(alias))
        .map(str::trim)
        .find(|v| !v.is_empty())
}

// ==========================================
// ExplicitMetadata - 行内显式给出的元数据
// ==========================================
// 用途: 区分"列中给出的值"与"默认值"，供双语合并按 主语言 → 英文 → 默认值 取值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplicitMetadata {
    pub question_type: Option<String>,
    pub difficulty_level: Option<String>,
    pub category: Option<String>,
    pub points: Option<i32>,
}

/// 映射产物: 题目 + 显式元数据
#[derive(Debug, Clone, PartialEq)]
pub struct MappedQuestion {
    pub question: QuestionImportFormat,
    pub explicit: ExplicitMetadata,
}

impl MappedQuestion {
    /// 非标准形态解析出的题目（元数据全部为默认值）
    pub fn defaulted(question: QuestionImportFormat) -> Self {
        Self {
            question,
            explicit: ExplicitMetadata::default(),
        }
    }
}

// ==========================================
// FieldMapper - 行 → 题目
// ==========================================
pub struct FieldMapper<'c> {
    config: &'c ImportConfig,
}

impl<'c> FieldMapper<'c> {
    pub fn new(config: &'c ImportConfig) -> Self {
        Self { config }
    }

    /// 映射单行；题干为空的行返回 None（视为空行/分隔行）
    pub fn map_row(&self, row: &RawRow, row_number: usize) -> Option<QuestionImportFormat> {
        self.map_row_tracked(row, row_number).map(|m| m.question)
    }

    /// 映射单行，同时记录哪些元数据由列显式给出
    pub fn map_row_tracked(&self, row: &RawRow, row_number: usize) -> Option<MappedQuestion> {
        let Some(text) = resolve(row, QUESTION_TEXT_RULE.aliases) else {
            debug!(row_number, "题干为空，跳过该行");
            return None;
        };
        let mut q = self.config.defaults.new_question(text);
        let mut explicit = ExplicitMetadata::default();

        for rule in FIELD_RULES {
            let Some(raw) = resolve(row, rule.aliases) else {
                continue;
            };
            let value = rule.normalizer.apply(raw);

            match rule.field {
                QuestionField::QuestionText => {}
                QuestionField::QuestionTextEn => q.question_text_en = Some(value),
                QuestionField::QuestionType => {
                    q.question_type = value.clone();
                    explicit.question_type = Some(value);
                }
                QuestionField::DifficultyLevel => {
                    q.difficulty_level = value.clone();
                    explicit.difficulty_level = Some(value);
                }
                QuestionField::Category => {
                    q.category = value.clone();
                    explicit.category = Some(value);
                }
                QuestionField::Points => match parse_integer(&value) {
                    Some(points) => {
                        q.points = points;
                        explicit.points = Some(points);
                    }
                    None => debug!(row_number, value = %value, "分值无法解析，使用默认值"),
                },
                QuestionField::TimeLimitSeconds => q.time_limit_seconds = parse_integer(&value),
                QuestionField::Explanation => q.explanation = Some(value),
                QuestionField::CorrectAnswer => {
                    q.correct_answer = value.parse::<AnswerOption>().ok();
                    if q.correct_answer.is_none() {
                        debug!(row_number, value = %value, "正确答案不在 A-D 范围内");
                    }
                }
                QuestionField::Option(slot) => q.set_option(slot, Some(value)),
                QuestionField::OptionEn(slot) => q.set_option_en(slot, Some(value)),
                QuestionField::Tags => q.tags = Some(value),
                QuestionField::TestType => q.test_type = Some(value),
            }
        }

        Some(MappedQuestion {
            question: q,
            explicit,
        })
    }

    /// 映射全部行，丢弃题干为空的行
    pub fn map_rows(&self, rows: &[RawRow]) -> Vec<QuestionImportFormat> {
        self.map_rows_tracked(rows)
            .into_iter()
            .map(|m| m.question)
            .collect()
    }

    pub fn map_rows_tracked(&self, rows: &[RawRow]) -> Vec<MappedQuestion> {
        rows.iter()
            .enumerate()
            .filter_map(|(idx, row)| self.map_row_tracked(row, idx + 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(row: RawRow) -> Option<QuestionImportFormat> {
        let config = ImportConfig::default();
        FieldMapper::new(&config).map_row(&row, 1)
    }

    #[test]
    fn test_field_mapper_basic() {
        let q = map(RawRow::from_pairs([
            ("question", "What is CPR?"),
            ("option_a", "A"),
            ("correct", "a"),
        ]))
        .unwrap();

        assert_eq!(q.question_text, "What is CPR?");
        assert_eq!(q.option_a.as_deref(), Some("A"));
        assert_eq!(q.correct_answer, Some(AnswerOption::A));
        assert_eq!(q.points, 10);
        assert_eq!(q.category, "basic_life_support");
    }

    #[test]
    fn test_alias_order_skips_empty_values() {
        let q = map(RawRow::from_pairs([
            ("question_text", "  "),
            ("Question", "Fallback text"),
        ]))
        .unwrap();
        assert_eq!(q.question_text, "Fallback text");
    }

    #[test]
    fn test_blank_question_dropped() {
        assert!(map(RawRow::from_pairs([("question", "   "), ("option_a", "x")])).is_none());
        assert!(map(RawRow::from_pairs([("option_a", "x")])).is_none());
    }

    #[test]
    fn test_category_and_test_type_snake_case() {
        let q = map(RawRow::from_pairs([
            ("question", "Q"),
            ("Category", "  Advanced   Life Support "),
            ("Test Type", "Pre Test"),
        ]))
        .unwrap();
        assert_eq!(q.category, "advanced_life_support");
        assert_eq!(q.test_type.as_deref(), Some("pre_test"));
    }

    #[test]
    fn test_invalid_points_fall_back_to_default() {
        let q = map(RawRow::from_pairs([
            ("question", "Q"),
            ("points", "ten"),
            ("time_limit", "abc"),
        ]))
        .unwrap();
        assert_eq!(q.points, 10);
        assert_eq!(q.time_limit_seconds, None);
    }

    #[test]
    fn test_integral_float_numbers() {
        let q = map(RawRow::from_pairs([
            ("question", "Q"),
            ("Points", "15.0"),
            ("time_limit_seconds", "30"),
        ]))
        .unwrap();
        assert_eq!(q.points, 15);
        assert_eq!(q.time_limit_seconds, Some(30));
    }

    #[test]
    fn test_correct_answer_out_of_range() {
        let q = map(RawRow::from_pairs([("question", "Q"), ("answer", "e")])).unwrap();
        assert_eq!(q.correct_answer, None);
    }

    #[test]
    fn test_bilingual_columns() {
        let q = map(RawRow::from_pairs([
            ("question_text", "Apa itu CPR?"),
            ("question_text_en", "What is CPR?"),
            ("option_b", "Kompresi"),
            ("option_b_en", "Compressions"),
        ]))
        .unwrap();
        assert_eq!(q.question_text_en.as_deref(), Some("What is CPR?"));
        assert_eq!(q.option_b_en.as_deref(), Some("Compressions"));
    }

    #[test]
    fn test_explicit_metadata_tracked() {
        let config = ImportConfig::default();
        let mapped = FieldMapper::new(&config)
            .map_row_tracked(
                &RawRow::from_pairs([
                    ("question", "Q"),
                    ("difficulty", "hard"),
                    ("points", "easy money"),
                ]),
                1,
            )
            .unwrap();

        assert_eq!(mapped.question.difficulty_level, "hard");
        assert_eq!(mapped.explicit.difficulty_level.as_deref(), Some("hard"));
        // 分值解析失败即视为未给出
        assert_eq!(mapped.explicit.points, None);
        assert_eq!(mapped.explicit.category, None);
        assert_eq!(mapped.question.category, "basic_life_support");
    }

    #[test]
    fn test_map_rows_drops_separator_rows() {
        let config = ImportConfig::default();
        let rows = vec![
            RawRow::from_pairs([("question", "Q1")]),
            RawRow::from_pairs([("question", "")]),
            RawRow::from_pairs([("question", "Q2")]),
        ];
        let questions = FieldMapper::new(&config).map_rows(&rows);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].question_text, "Q2");
    }
}
