// ==========================================
// BLS 培训管理系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件字节 → 原始行（列名 → 值，保留列顺序）
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto_from_rs, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;
use tracing::{debug, warn};

// ==========================================
// RawRow - 原始行
// ==========================================
// 说明: 按列出现顺序保存 (列名, 值)，值已 TRIM
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.push((column.into(), value.into()));
    }

    /// 按列名取值
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 所有值均为空白
    pub fn is_blank(&self) -> bool {
        self.values().all(|v| v.trim().is_empty())
    }

    /// 第一个非空值（行的主内容）
    pub fn first_non_empty(&self) -> Option<&str> {
        self.values().map(str::trim).find(|v| !v.is_empty())
    }
}

/// 首行处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    /// 首行为列名（题库导入）
    FirstRow,
    /// 无表头，列名为 column_1, column_2, ...（检查表导入）
    NoHeader,
}

/// 单张工作表的解析结果
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<RawRow>,
    pub warnings: Vec<String>,
}

fn positional_column(col_idx: usize) -> String {
    format!("column_{}", col_idx + 1)
}

/// 空表头命名: __EMPTY, __EMPTY_1, ...
fn empty_header_name(empty_count: usize) -> String {
    if empty_count == 0 {
        "__EMPTY".to_string()
    } else {
        format!("__EMPTY_{}", empty_count)
    }
}

fn name_headers<I: IntoIterator<Item = String>>(raw: I) -> Vec<String> {
    let mut empty_count = 0;
    raw.into_iter()
        .map(|h| {
            let trimmed = h.trim().to_string();
            if trimmed.is_empty() {
                let name = empty_header_name(empty_count);
                empty_count += 1;
                name
            } else {
                trimmed
            }
        })
        .collect()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_sheets(&self, bytes: &[u8], header_mode: HeaderMode) -> ImportResult<Vec<RawSheet>> {
        let text = std::str::from_utf8(bytes)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut reader = ReaderBuilder::new()
            .has_headers(header_mode == HeaderMode::FirstRow)
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        let headers: Vec<String> = match header_mode {
            HeaderMode::FirstRow => name_headers(reader.headers()?.iter().map(str::to_string)),
            HeaderMode::NoHeader => Vec::new(),
        };

        let mut sheet = RawSheet {
            name: "csv".to_string(),
            ..RawSheet::default()
        };

        for (row_idx, result) in reader.records().enumerate() {
            let row_number = row_idx + 1;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!(row_number, error = %e, "CSV 行解析失败，已跳过");
                    sheet.warnings.push(format!("Row {}: {}", row_number, e));
                    continue;
                }
            };

            // 跳过完全空白的行
            if record.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            if header_mode == HeaderMode::FirstRow && record.len() != headers.len() {
                sheet.warnings.push(format!(
                    "Row {}: expected {} fields but found {}",
                    row_number,
                    headers.len(),
                    record.len()
                ));
            }

            let mut row = RawRow::new();
            for (col_idx, value) in record.iter().enumerate() {
                let column = match header_mode {
                    HeaderMode::FirstRow => match headers.get(col_idx) {
                        Some(header) => header.clone(),
                        None => continue,
                    },
                    HeaderMode::NoHeader => positional_column(col_idx),
                };
                row.push(column, value.trim());
            }
            sheet.rows.push(row);
        }

        debug!(rows = sheet.rows.len(), warnings = sheet.warnings.len(), "CSV 解析完成");
        Ok(vec![sheet])
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 说明: 按内容识别 xlsx/xls，返回全部工作表
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_sheets(&self, bytes: &[u8], header_mode: HeaderMode) -> ImportResult<Vec<RawSheet>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let sheet_names = workbook.sheet_names().to_owned();

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name)?;
            let mut rows = range.rows();

            let headers: Vec<String> = match header_mode {
                HeaderMode::FirstRow => match rows.next() {
                    Some(header_row) => name_headers(header_row.iter().map(|c| c.to_string())),
                    None => Vec::new(),
                },
                HeaderMode::NoHeader => Vec::new(),
            };

            let mut sheet = RawSheet {
                name: sheet_name.clone(),
                ..RawSheet::default()
            };

            for data_row in rows {
                let mut row = RawRow::new();
                for (col_idx, cell) in data_row.iter().enumerate() {
                    let value = cell.to_string().trim().to_string();
                    // 空单元格不进入行
                    if value.is_empty() {
                        continue;
                    }
                    let column = match header_mode {
                        HeaderMode::FirstRow => match headers.get(col_idx) {
                            Some(header) => header.clone(),
                            None => continue,
                        },
                        HeaderMode::NoHeader => positional_column(col_idx),
                    };
                    row.push(column, value);
                }

                // 跳过完全空白的行
                if row.is_empty() {
                    continue;
                }
                sheet.rows.push(row);
            }

            if sheet.rows.is_empty() {
                debug!(sheet = %sheet_name, "工作表无数据行");
            }
            sheets.push(sheet);
        }

        debug!(sheets = sheets.len(), "Excel 解析完成");
        Ok(sheets)
    }
}
