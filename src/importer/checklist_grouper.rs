// ==========================================
// BLS 培训管理系统 - 检查表分组
// ==========================================
// 职责: 单遍扫描，将行分为段落标题与子条目
// 规则:
// - 行主内容 = 第一个非空字段
// - 段落标题: 仅含大写字母/空格/冒号，且（长度 < 上限 或 含关键字）
// - 新标题出现时，上一段落有子条目才输出
// - 全文无段落输出时，退化为每个非空字段一条独立条目
// ==========================================

use crate::config::ImportConfig;
use crate::domain::checklist::ChecklistItem;
use crate::importer::file_parser::RawRow;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z\s:]+$").expect("valid section header regex"));

/// 是否为段落标题
pub fn is_section_header(line: &str, config: &ImportConfig) -> bool {
    SECTION_HEADER.is_match(line)
        && (line.chars().count() < config.section_header_max_len
            || config.contains_section_keyword(line))
}

struct OpenSection {
    title: String,
    sub_items: Vec<String>,
}

/// 检查表分组
///
/// # 参数
/// - rows: 原始行（无表头读取）
/// - config: 导入配置（标题长度上限、关键字）
///
/// # 返回
/// - 段落列表；无段落时为独立条目列表
pub fn group_checklist(rows: &[RawRow], config: &ImportConfig) -> Vec<ChecklistItem> {
    let mut items = Vec::new();
    let mut current: Option<OpenSection> = None;

    for line in rows.iter().filter_map(RawRow::first_non_empty) {
        if is_section_header(line, config) {
            flush_section(current.take(), &mut items);
            current = Some(OpenSection {
                title: line.to_string(),
                sub_items: Vec::new(),
            });
        } else if let Some(section) = current.as_mut() {
            section.sub_items.push(line.to_string());
        } else {
            debug!(line = %line, "首个段落标题之前的行，已忽略");
        }
    }
    flush_section(current.take(), &mut items);

    if items.is_empty() {
        debug!("未识别到段落标题，按独立条目导入");
        return fallback_items(rows);
    }

    debug!(sections = items.len(), "检查表分组完成");
    items
}

/// 只输出至少有一个子条目的段落
fn flush_section(section: Option<OpenSection>, items: &mut Vec<ChecklistItem>) {
    let Some(section) = section else {
        return;
    };
    if section.sub_items.is_empty() {
        debug!(title = %section.title, "段落无子条目，未输出");
        return;
    }
    items.push(ChecklistItem::section(section.title, section.sub_items));
}

/// 每个非空字段一条独立条目
fn fallback_items(rows: &[RawRow]) -> Vec<ChecklistItem> {
    rows.iter()
        .flat_map(|row| row.values())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ChecklistItem::item)
        .collect()
}
