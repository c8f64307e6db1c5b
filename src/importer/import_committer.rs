// ==========================================
// BLS 培训管理系统 - 导入提交
// ==========================================
// 职责: 将确认后的记录逐条转交后端创建（无批量接口）
// 规则:
// - 题目先校验，无效题目跳过计数
// - 单条创建失败只记录，不中断整批
// ==========================================

use crate::domain::checklist::ChecklistItem;
use crate::domain::question::QuestionImportFormat;
use crate::importer::importer_trait::{ChecklistStore, QuestionStore};
use crate::importer::question_validator::validate_question;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// 单条提交失败
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitFailure {
    /// 在提交输入中的位置（含被跳过的无效记录）
    pub index: usize,
    pub title: String,
    pub message: String,
}

/// 提交汇总
#[derive(Debug, Clone, Serialize)]
pub struct CommitSummary {
    pub batch_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub created_ids: Vec<String>,
    pub skipped: usize,
    pub failures: Vec<CommitFailure>,
}

impl CommitSummary {
    fn start() -> Self {
        let now = Utc::now();
        Self {
            batch_id: Uuid::new_v4().to_string(),
            started_at: now,
            finished_at: now,
            created_ids: Vec::new(),
            skipped: 0,
            failures: Vec::new(),
        }
    }

    fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    pub fn created(&self) -> usize {
        self.created_ids.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.skipped == 0
    }
}

// ==========================================
// ImportCommitter
// ==========================================
pub struct ImportCommitter<S> {
    store: S,
}

impl<S> ImportCommitter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: QuestionStore> ImportCommitter<S> {
    /// 逐条创建题目
    #[instrument(skip(self, questions), fields(count = questions.len()))]
    pub async fn commit_questions(&self, questions: Vec<QuestionImportFormat>) -> CommitSummary {
        let mut summary = CommitSummary::start();

        // index 为调用方输入中的位置
        for (index, question) in questions.iter().enumerate() {
            let violations = validate_question(question);
            if !violations.is_empty() {
                debug!(index, ?violations, "无效题目，跳过");
                summary.skipped += 1;
                continue;
            }

            match self.store.create_question(question).await {
                Ok(id) => summary.created_ids.push(id),
                Err(e) => {
                    warn!(index, error = %e, "题目创建失败");
                    summary.failures.push(CommitFailure {
                        index,
                        title: question.question_text.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let summary = summary.finish();
        info!(
            batch_id = %summary.batch_id,
            created = summary.created(),
            skipped = summary.skipped,
            failed = summary.failures.len(),
            "题目提交完成"
        );
        summary
    }
}

impl<S: ChecklistStore> ImportCommitter<S> {
    /// 逐条创建检查表条目
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn commit_checklist(&self, items: Vec<ChecklistItem>) -> CommitSummary {
        let mut summary = CommitSummary::start();

        for (index, item) in items.iter().enumerate() {
            match self.store.create_checklist_item(item).await {
                Ok(id) => summary.created_ids.push(id),
                Err(e) => {
                    warn!(index, error = %e, "检查表条目创建失败");
                    summary.failures.push(CommitFailure {
                        index,
                        title: item.title.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let summary = summary.finish();
        info!(
            batch_id = %summary.batch_id,
            created = summary.created(),
            failed = summary.failures.len(),
            "检查表提交完成"
        );
        summary
    }
}
