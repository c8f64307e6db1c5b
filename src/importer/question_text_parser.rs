// ==========================================
// BLS 培训管理系统 - 题目文本解析器
// ==========================================
// 职责: 单个文本块（题干行 + 选项行）→ 题目
// 规则:
// - 选项行: 单个字母 a-d（不区分大小写）+ '.' 或 ')' + 选项文本
// - 选项按扫描顺序依次落入 A/B/C/D 槽位，不按行首字母重排
// - 其余行以空格拼接为题干，最后去掉行首题号
// - 题干为空的文本块拒绝（返回 None）
// ==========================================

use crate::config::ImportConfig;
use crate::domain::question::{AnswerOption, QuestionImportFormat};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-d][.)]\s*(.+)$").expect("valid option regex"));

static QUESTION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+[.)]\s*").expect("valid question number regex"));

/// 行首是否为题号（"3. " / "12) "）
pub fn starts_with_question_number(line: &str) -> bool {
    QUESTION_NUMBER.is_match(line.trim())
}

/// 去掉行首题号
pub fn strip_question_number(text: &str) -> &str {
    match QUESTION_NUMBER.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// 选项行返回选项文本
pub fn option_text(line: &str) -> Option<&str> {
    OPTION_LINE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// 解析文本块
///
/// # 参数
/// - block: 以换行分隔的题干行与选项行
/// - config: 导入配置（选项上限、默认值）
///
/// # 返回
/// - Some(QuestionImportFormat): 解析成功
/// - None: 题干为空（例如只有选项的残缺块）
pub fn parse_question_text(block: &str, config: &ImportConfig) -> Option<QuestionImportFormat> {
    let mut text_parts: Vec<&str> = Vec::new();
    let mut options: Vec<String> = Vec::new();

    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match option_text(line) {
            Some(option) => {
                if options.len() < config.max_options {
                    options.push(option.to_string());
                } else {
                    debug!(option = %option, "超出选项上限，已忽略");
                }
            }
            None => text_parts.push(line),
        }
    }

    let joined = text_parts.join(" ");
    let question_text = strip_question_number(joined.trim()).trim();

    if question_text.is_empty() {
        debug!(options = options.len(), "题干为空，拒绝该文本块");
        return None;
    }

    let mut question = config.defaults.new_question(question_text);
    question.test_type = Some(config.defaults.parsed_test_type.clone());
    question.correct_answer = if options.is_empty() {
        None
    } else {
        Some(AnswerOption::A)
    };
    for (idx, option) in options.into_iter().enumerate() {
        if let Some(slot) = AnswerOption::from_index(idx) {
            question.set_option(slot, Some(option));
        }
    }

    Some(question)
}
