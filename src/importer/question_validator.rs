// ==========================================
// BLS 培训管理系统 - 题目校验器
// ==========================================
// 规则: 题干去空白后非空即有效（唯一规则，其余字段照单全收）
// 职责: 有效/无效分组 + 导入前预览汇总
// ==========================================

use crate::domain::parse_result::ParsedFileResult;
use crate::domain::question::QuestionImportFormat;
use serde::Serialize;

pub const QUESTION_TEXT_REQUIRED: &str = "Question text is required";

/// 无效题目及其原因
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidQuestion {
    pub question: QuestionImportFormat,
    pub errors: Vec<String>,
}

/// 校验分组结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestionValidation {
    pub valid: Vec<QuestionImportFormat>,
    pub invalid: Vec<InvalidQuestion>,
}

/// 单题校验，返回违规原因
pub fn validate_question(question: &QuestionImportFormat) -> Vec<String> {
    let mut errors = Vec::new();
    if !question.is_well_formed() {
        errors.push(QUESTION_TEXT_REQUIRED.to_string());
    }
    errors
}

/// 有效/无效分组（保持原顺序）
pub fn validate_questions<I>(questions: I) -> QuestionValidation
where
    I: IntoIterator<Item = QuestionImportFormat>,
{
    let mut validation = QuestionValidation::default();
    for question in questions {
        let errors = validate_question(&question);
        if errors.is_empty() {
            validation.valid.push(question);
        } else {
            validation.invalid.push(InvalidQuestion { question, errors });
        }
    }
    validation
}

// ==========================================
// ImportPreview - 导入前预览
// ==========================================
// 用途: 确认导入前向用户展示有效/无效数量及原始错误/警告文本
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportPreview {
    pub parse_success: bool,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub missing_answer_count: usize,
    pub validation: QuestionValidation,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ImportPreview {
    pub fn from_result(result: ParsedFileResult<QuestionImportFormat>) -> Self {
        let parse_success = result.success();
        let (data, errors, warnings) = result.into_parts();
        let validation = validate_questions(data);

        Self {
            parse_success,
            valid_count: validation.valid.len(),
            invalid_count: validation.invalid.len(),
            missing_answer_count: validation
                .valid
                .iter()
                .filter(|q| q.correct_answer.is_none())
                .count(),
            validation,
            errors,
            warnings,
        }
    }

    /// 可提交: 至少一条有效题目
    pub fn can_commit(&self) -> bool {
        self.valid_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::question::AnswerOption;

    #[test]
    fn test_validator_partition() {
        let validation = validate_questions(vec![
            QuestionImportFormat::new("X"),
            QuestionImportFormat::new(""),
            QuestionImportFormat::new("  "),
        ]);

        assert_eq!(validation.valid.len(), 1);
        assert_eq!(validation.invalid.len(), 2);
        for invalid in &validation.invalid {
            assert_eq!(invalid.errors, vec!["Question text is required".to_string()]);
        }
    }

    #[test]
    fn test_other_fields_not_validated() {
        let mut q = QuestionImportFormat::new("Q");
        q.points = -5;
        q.question_type = String::new();
        assert!(validate_question(&q).is_empty());
    }

    #[test]
    fn test_preview_counts() {
        let result = ParsedFileResult::new(
            vec![
                QuestionImportFormat::new("Q1").with_correct_answer(AnswerOption::A),
                QuestionImportFormat::new("Q2"),
                QuestionImportFormat::new(" "),
            ],
            vec!["Question 4: Could not parse question format".to_string()],
            vec!["Row 2: expected 3 fields but found 2".to_string()],
        );

        let preview = ImportPreview::from_result(result);
        assert!(!preview.parse_success);
        assert_eq!(preview.valid_count, 2);
        assert_eq!(preview.invalid_count, 1);
        assert_eq!(preview.missing_answer_count, 1);
        assert_eq!(preview.errors.len(), 1);
        assert_eq!(preview.warnings.len(), 1);
        assert!(preview.can_commit());
    }
}
