// ==========================================
// BLS 培训管理系统 - 行形态判定
// ==========================================
// 职责: 判断表格是标准形态（一行一题）还是单列文本形态
// 规则: 只看第一行的列名集合
// ==========================================

use crate::importer::file_parser::RawRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowShape {
    /// 多个具名列，一行一题
    Standard,
    /// 单列且列名过长: 列名本身就是第一道题的题干（无表头导出）
    HeaderEmbedded { first_question: String },
    /// 单列且列名较短: 列名为普通表头
    SingleColumn,
}

/// 判定行形态
///
/// # 参数
/// - rows: 原始行
/// - header_embedded_min_len: 列名长度超过此值视为题干
pub fn classify_rows(rows: &[RawRow], header_embedded_min_len: usize) -> RowShape {
    let Some(first) = rows.first() else {
        return RowShape::Standard;
    };

    let columns: Vec<&str> = first.columns().collect();
    match columns.as_slice() {
        [only] if only.chars().count() > header_embedded_min_len => RowShape::HeaderEmbedded {
            first_question: only.to_string(),
        },
        [_] => RowShape::SingleColumn,
        _ => RowShape::Standard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: &str = "1. Which of the following is the first step when you find a collapsed adult?";

    #[test]
    fn test_multiple_columns_is_standard() {
        let rows = vec![RawRow::from_pairs([("question", "Q"), ("option_a", "A")])];
        assert_eq!(classify_rows(&rows, 50), RowShape::Standard);
    }

    #[test]
    fn test_long_single_column_is_header_embedded() {
        let rows = vec![RawRow::from_pairs([(LONG, "a. Check for danger")])];
        assert_eq!(
            classify_rows(&rows, 50),
            RowShape::HeaderEmbedded {
                first_question: LONG.to_string()
            }
        );
    }

    #[test]
    fn test_short_single_column_is_plain() {
        let rows = vec![RawRow::from_pairs([("Questions", "1. What is CPR?")])];
        assert_eq!(classify_rows(&rows, 50), RowShape::SingleColumn);
    }

    #[test]
    fn test_exactly_threshold_is_plain() {
        let header = "x".repeat(50);
        let rows = vec![RawRow::from_pairs([(header.as_str(), "v")])];
        assert_eq!(classify_rows(&rows, 50), RowShape::SingleColumn);
    }
}
