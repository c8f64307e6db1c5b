// ==========================================
// BLS 培训管理系统 - 双语工作表合并
// ==========================================
// 职责: 主语言工作表 + 英文工作表 → 双语题目序列
// 规则:
// - 按位置对齐（第 i 题对第 i 题），不做内容匹配
// - 基础字段取主语言，_en 字段取英文，任一缺失时用另一方补齐
// - 元数据: 主语言显式值 → 英文显式值 → 默认值
// ==========================================

use crate::domain::parse_result::ParsedFileResult;
use crate::domain::question::{AnswerOption, QuestionImportFormat};
use crate::importer::field_mapper::MappedQuestion;
use tracing::debug;

const SLOTS: [AnswerOption; 4] = [AnswerOption::A, AnswerOption::B, AnswerOption::C, AnswerOption::D];

/// 合并两张工作表的解析结果
pub fn merge_bilingual(
    primary: ParsedFileResult<MappedQuestion>,
    english: ParsedFileResult<MappedQuestion>,
) -> ParsedFileResult<QuestionImportFormat> {
    let (primary_data, mut errors, mut warnings) = primary.into_parts();
    let (english_data, english_errors, english_warnings) = english.into_parts();
    errors.extend(english_errors);
    warnings.extend(english_warnings);

    if primary_data.len() != english_data.len() {
        debug!(
            primary = primary_data.len(),
            english = english_data.len(),
            "双语工作表题目数量不一致，按位置对齐"
        );
    }

    let n = primary_data.len().max(english_data.len());
    let merged: Vec<QuestionImportFormat> = (0..n)
        .filter_map(|i| merge_pair(primary_data.get(i), english_data.get(i)))
        .collect();

    ParsedFileResult::new(merged, errors, warnings)
}

/// 合并同一位置的两道题；两者都缺失时返回 None
pub fn merge_pair(
    primary: Option<&MappedQuestion>,
    english: Option<&MappedQuestion>,
) -> Option<QuestionImportFormat> {
    // 以存在的一方为基底（主语言优先）
    let base = primary.or(english)?;
    let fallback = english.or(primary)?;
    let primary_q = primary.map(|m| &m.question);
    let english_q = english.map(|m| &m.question);

    let mut merged = base.question.clone();

    // 英文题干: 英文表 → 主语言表自带的英文列 → 主语言题干
    merged.question_text_en = english_q
        .map(|q| q.question_text.clone())
        .or_else(|| primary_q.and_then(|q| q.question_text_en.clone()))
        .or_else(|| primary_q.map(|q| q.question_text.clone()));

    for slot in SLOTS {
        let primary_option = primary_q.and_then(|q| q.options()[slot as usize]);
        let primary_option_en = primary_q.and_then(|q| option_en_at(q, slot));
        let english_option = english_q.and_then(|q| q.options()[slot as usize]);

        merged.set_option(slot, primary_option.or(english_option).map(str::to_string));
        merged.set_option_en(
            slot,
            english_option
                .or(primary_option_en)
                .or(primary_option)
                .map(str::to_string),
        );
    }

    // 元数据: 任一方显式给出即采用，否则保持基底的默认值
    let (p, e) = (&base.explicit, &fallback.explicit);
    if let Some(v) = p.question_type.as_ref().or(e.question_type.as_ref()) {
        merged.question_type = v.clone();
    }
    if let Some(v) = p.difficulty_level.as_ref().or(e.difficulty_level.as_ref()) {
        merged.difficulty_level = v.clone();
    }
    if let Some(v) = p.category.as_ref().or(e.category.as_ref()) {
        merged.category = v.clone();
    }
    if let Some(v) = p.points.or(e.points) {
        merged.points = v;
    }

    // 可选标量: 主语言缺失时取英文
    let (b, f) = (&base.question, &fallback.question);
    merged.time_limit_seconds = b.time_limit_seconds.or(f.time_limit_seconds);
    merged.explanation = b.explanation.clone().or_else(|| f.explanation.clone());
    merged.correct_answer = b.correct_answer.or(f.correct_answer);
    merged.tags = b.tags.clone().or_else(|| f.tags.clone());
    merged.test_type = b.test_type.clone().or_else(|| f.test_type.clone());

    Some(merged)
}

fn option_en_at(question: &QuestionImportFormat, slot: AnswerOption) -> Option<&str> {
    match slot {
        AnswerOption::A => question.option_a_en.as_deref(),
        AnswerOption::B => question.option_b_en.as_deref(),
        AnswerOption::C => question.option_c_en.as_deref(),
        AnswerOption::D => question.option_d_en.as_deref(),
    }
}
