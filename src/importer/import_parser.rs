// ==========================================
// BLS 培训管理系统 - 导入解析入口
// ==========================================
// 职责: 格式识别与分派，产出 ParsedFileResult
// 流程:
// - 扩展名校验 → 内容获取（含 data URI 解码）
// - CSV: 首行为表头 → 字段映射
// - Excel: 两张及以上工作表 → 双语合并（仅取前两张）
//          单张工作表 → 行形态判定 → 字段映射 / 单列分组
// 红线: 对外入口从不返回 Err，所有失败落入 errors
// ==========================================

use crate::config::ImportConfig;
use crate::domain::checklist::ChecklistItem;
use crate::domain::parse_result::ParsedFileResult;
use crate::domain::question::QuestionImportFormat;
use crate::importer::bilingual_merger::merge_bilingual;
use crate::importer::checklist_grouper::group_checklist;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{FieldMapper, MappedQuestion};
use crate::importer::file_parser::{CsvParser, ExcelParser, HeaderMode, RawSheet};
use crate::importer::file_source::{FileContent, FileFormat};
use crate::importer::importer_trait::FileParser;
use crate::importer::question_grouper::group_single_column;
use crate::importer::row_shape::{classify_rows, RowShape};
use futures::future::join_all;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument, warn};

// ==========================================
// SpreadsheetImportParser - 题库/检查表导入解析器
// ==========================================
pub struct SpreadsheetImportParser {
    config: ImportConfig,
    csv_parser: Box<dyn FileParser>,
    excel_parser: Box<dyn FileParser>,
}

impl Default for SpreadsheetImportParser {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

impl SpreadsheetImportParser {
    pub fn new(config: ImportConfig) -> Self {
        Self::with_parsers(config, Box::new(CsvParser), Box::new(ExcelParser))
    }

    /// 注入自定义文件解析器
    pub fn with_parsers(
        config: ImportConfig,
        csv_parser: Box<dyn FileParser>,
        excel_parser: Box<dyn FileParser>,
    ) -> Self {
        Self {
            config,
            csv_parser,
            excel_parser,
        }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    // ==========================================
    // 题库导入
    // ==========================================

    /// 解析题库文件
    ///
    /// # 参数
    /// - content: 文件内容（路径 / 字节 / 文本 / data URI）
    /// - file_name: 原始文件名（用于识别格式）
    ///
    /// # 返回
    /// - ParsedFileResult: 失败时 success=false，错误信息在 errors 中
    #[instrument(skip(self, content))]
    pub fn parse_questions(
        &self,
        content: FileContent,
        file_name: &str,
    ) -> ParsedFileResult<QuestionImportFormat> {
        match self.try_parse_questions(content, file_name) {
            Ok(result) => {
                info!(
                    questions = result.data().len(),
                    errors = result.errors().len(),
                    warnings = result.warnings().len(),
                    "题库文件解析完成"
                );
                result
            }
            Err(e) => {
                error!(error = %e, "题库文件解析失败");
                ParsedFileResult::failure(e.to_string())
            }
        }
    }

    fn try_parse_questions(
        &self,
        content: FileContent,
        file_name: &str,
    ) -> ImportResult<ParsedFileResult<QuestionImportFormat>> {
        let format = FileFormat::from_file_name(file_name)?;
        let bytes = content.into_bytes()?;

        match format {
            FileFormat::Csv => {
                let sheet = self
                    .csv_parser
                    .parse_sheets(&bytes, HeaderMode::FirstRow)?
                    .into_iter()
                    .next()
                    .unwrap_or_default();
                Ok(self.parse_standard_sheet(sheet))
            }
            FileFormat::Xlsx | FileFormat::Xls => {
                let sheets = self.excel_parser.parse_sheets(&bytes, HeaderMode::FirstRow)?;
                self.parse_workbook(sheets)
            }
        }
    }

    fn parse_workbook(
        &self,
        sheets: Vec<RawSheet>,
    ) -> ImportResult<ParsedFileResult<QuestionImportFormat>> {
        let sheet_count = sheets.len();
        let mut sheets = sheets.into_iter();

        match (sheets.next(), sheets.next()) {
            (None, _) => Err(ImportError::EmptyWorkbook),
            (Some(only), None) => Ok(self.parse_sheet(only).map(|m| m.question)),
            (Some(primary), Some(english)) => {
                if sheet_count > 2 {
                    debug!(ignored = sheet_count - 2, "双语工作簿仅使用前两张工作表");
                }
                info!(primary = %primary.name, english = %english.name, "识别为双语工作簿");
                Ok(merge_bilingual(
                    self.parse_sheet(primary),
                    self.parse_sheet(english),
                ))
            }
        }
    }

    /// 按行形态解析单张工作表（保留显式元数据，供双语合并使用）
    fn parse_sheet(&self, sheet: RawSheet) -> ParsedFileResult<MappedQuestion> {
        let shape = classify_rows(&sheet.rows, self.config.header_embedded_min_len);
        debug!(sheet = %sheet.name, shape = ?shape, rows = sheet.rows.len(), "行形态判定");

        let grouped = match shape {
            RowShape::Standard => {
                let questions = FieldMapper::new(&self.config).map_rows_tracked(&sheet.rows);
                debug!(
                    rows = sheet.rows.len(),
                    questions = questions.len(),
                    "标准形态映射完成"
                );
                return ParsedFileResult::new(questions, Vec::new(), sheet.warnings);
            }
            RowShape::HeaderEmbedded { first_question } => {
                group_single_column(&sheet.rows, Some(&first_question), &self.config)
            }
            RowShape::SingleColumn => group_single_column(&sheet.rows, None, &self.config),
        };

        let questions = grouped
            .questions
            .into_iter()
            .map(MappedQuestion::defaulted)
            .collect();
        ParsedFileResult::new(questions, grouped.errors, sheet.warnings)
    }

    fn parse_standard_sheet(&self, sheet: RawSheet) -> ParsedFileResult<QuestionImportFormat> {
        let questions = FieldMapper::new(&self.config).map_rows(&sheet.rows);
        debug!(
            rows = sheet.rows.len(),
            questions = questions.len(),
            "标准形态映射完成"
        );
        ParsedFileResult::new(questions, Vec::new(), sheet.warnings)
    }

    // ==========================================
    // 检查表导入
    // ==========================================

    /// 解析检查表文件（无表头读取，取第一张工作表）
    #[instrument(skip(self, content))]
    pub fn parse_checklist(
        &self,
        content: FileContent,
        file_name: &str,
    ) -> ParsedFileResult<ChecklistItem> {
        match self.try_parse_checklist(content, file_name) {
            Ok(result) => {
                info!(items = result.data().len(), "检查表文件解析完成");
                result
            }
            Err(e) => {
                error!(error = %e, "检查表文件解析失败");
                ParsedFileResult::failure(e.to_string())
            }
        }
    }

    fn try_parse_checklist(
        &self,
        content: FileContent,
        file_name: &str,
    ) -> ImportResult<ParsedFileResult<ChecklistItem>> {
        let format = FileFormat::from_file_name(file_name)?;
        let bytes = content.into_bytes()?;

        let parser = if format.is_workbook() {
            &self.excel_parser
        } else {
            &self.csv_parser
        };
        let sheet = parser
            .parse_sheets(&bytes, HeaderMode::NoHeader)?
            .into_iter()
            .next()
            .ok_or(ImportError::EmptyWorkbook)?;

        let items = group_checklist(&sheet.rows, &self.config);
        Ok(ParsedFileResult::new(items, Vec::new(), sheet.warnings))
    }

    // ==========================================
    // 批量导入
    // ==========================================

    /// 并发读取并解析多个题库文件
    ///
    /// # 说明
    /// - 每个文件独立解析，某个文件失败不影响其他文件
    /// - 返回顺序与输入顺序一致
    pub async fn parse_question_files(
        &self,
        paths: Vec<PathBuf>,
    ) -> Vec<(PathBuf, ParsedFileResult<QuestionImportFormat>)> {
        let tasks = paths.into_iter().map(|path| async move {
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();

            // 格式不支持时不读取文件
            if let Err(e) = FileFormat::from_file_name(&file_name) {
                return (path, ParsedFileResult::failure(e.to_string()));
            }

            let result = match FileContent::read_async(path.clone()).await {
                Ok(content) => self.parse_questions(content, &file_name),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "文件读取失败");
                    ParsedFileResult::failure(e.to_string())
                }
            };
            (path, result)
        });

        join_all(tasks).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format() {
        let parser = SpreadsheetImportParser::default();
        let result = parser.parse_questions(FileContent::from_text("whatever"), "questions.pdf");

        assert!(!result.success());
        assert!(result.data().is_empty());
        assert!(result.warnings().is_empty());
        assert_eq!(
            result.errors(),
            ["Unsupported file format: pdf. Please upload a CSV or Excel file.".to_string()]
        );
    }

    #[test]
    fn test_csv_standard_rows() {
        let parser = SpreadsheetImportParser::default();
        let csv = "question,option_a,option_b,correct,points\n\
                   What is CPR?,Compressions,Breaths,a,\n\
                   ,,,,\n\
                   Rate?,100-120,60,A,5\n";
        let result = parser.parse_questions(FileContent::from_text(csv), "bank.csv");

        assert!(result.success());
        assert_eq!(result.data().len(), 2);
        assert_eq!(result.data()[0].points, 10);
        assert_eq!(result.data()[1].points, 5);
    }

    #[test]
    fn test_corrupt_workbook_is_captured() {
        let parser = SpreadsheetImportParser::default();
        let result = parser.parse_questions(FileContent::Bytes(b"garbage".to_vec()), "bank.xlsx");
        assert!(!result.success());
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].starts_with("Failed to parse Excel file"));
    }

    #[test]
    fn test_checklist_from_csv() {
        let parser = SpreadsheetImportParser::default();
        let result = parser.parse_checklist(
            FileContent::from_text("DANGER\nRESPONSE\ncheck pulse\n"),
            "skills.csv",
        );
        assert!(result.success());
        assert_eq!(result.data().len(), 1);
        assert_eq!(result.data()[0].title, "RESPONSE");
    }

    #[test]
    fn test_checklist_unsupported_format() {
        let parser = SpreadsheetImportParser::default();
        let result = parser.parse_checklist(FileContent::from_text("x"), "skills.docx");
        assert!(!result.success());
        assert!(result.errors()[0].contains("docx"));
    }
}
