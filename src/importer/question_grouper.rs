// ==========================================
// BLS 培训管理系统 - 单列文本分组状态机
// ==========================================
// 职责: 自上而下扫描单列文本，还原题目边界与选项列表
// 状态: 当前题干 / 当前选项 / 题目序号
// 规则:
// - 行首为题号的行开启新题；其余行为选项或续行
// - 新题开启前，若当前题已有选项则定稿
// - 扫描结束时按同一规则定稿最后一题
// ==========================================

use crate::config::ImportConfig;
use crate::domain::question::QuestionImportFormat;
use crate::importer::error::ImportError;
use crate::importer::file_parser::RawRow;
use crate::importer::question_text_parser::{parse_question_text, starts_with_question_number};
use tracing::{debug, warn};

/// 分组产物
#[derive(Debug, Default)]
pub struct GroupedQuestions {
    pub questions: Vec<QuestionImportFormat>,
    pub errors: Vec<String>,
}

struct GroupingState<'c> {
    config: &'c ImportConfig,
    current_text: String,
    current_options: Vec<String>,
    question_index: usize,
    output: GroupedQuestions,
}

impl<'c> GroupingState<'c> {
    fn new(config: &'c ImportConfig, first_question: Option<&str>) -> Self {
        Self {
            config,
            current_text: first_question.unwrap_or_default().to_string(),
            current_options: Vec::new(),
            question_index: 0,
            output: GroupedQuestions::default(),
        }
    }

    fn feed(&mut self, line: &str) {
        if starts_with_question_number(line) {
            self.finalize_current();
            self.current_text = line.to_string();
            self.current_options.clear();
        } else {
            self.current_options.push(line.to_string());
        }
    }

    /// 仅当已有选项时定稿；否则当前题干被新题覆盖
    fn finalize_current(&mut self) {
        if self.current_options.is_empty() {
            if !self.current_text.is_empty() {
                debug!(question = %self.current_text, "题目无选项，未定稿");
            }
            return;
        }

        let block = format!("{}\n{}", self.current_text, self.current_options.join("\n"));
        match parse_question_text(&block, self.config) {
            Some(question) => self.output.questions.push(question),
            None => {
                let err = ImportError::QuestionFormat(self.question_index + 1);
                warn!(error = %err, "题目文本块无法解析");
                self.output.errors.push(err.to_string());
            }
        }
        self.question_index += 1;
        self.current_options.clear();
    }

    fn finish(mut self) -> GroupedQuestions {
        self.finalize_current();
        self.output
    }
}

/// 对单列行执行分组
///
/// # 参数
/// - rows: 数据行（每行取第一个非空值）
/// - first_question: 表头即题干时，作为第 0 题的题干
/// - config: 导入配置
pub fn group_single_column(
    rows: &[RawRow],
    first_question: Option<&str>,
    config: &ImportConfig,
) -> GroupedQuestions {
    let lines = rows.iter().filter_map(RawRow::first_non_empty);
    group_lines(lines, first_question, config)
}

/// 对文本行执行分组（空行跳过）
pub fn group_lines<'a, I>(lines: I, first_question: Option<&str>, config: &ImportConfig) -> GroupedQuestions
where
    I: IntoIterator<Item = &'a str>,
{
    let mut state = GroupingState::new(config, first_question);
    for line in lines.into_iter().map(str::trim).filter(|l| !l.is_empty()) {
        state.feed(line);
    }
    let grouped = state.finish();
    debug!(
        questions = grouped.questions.len(),
        errors = grouped.errors.len(),
        "单列分组完成"
    );
    grouped
}
