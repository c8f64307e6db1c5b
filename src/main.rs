// ==========================================
// BLS 培训管理系统 - 导入预览工具
// ==========================================
// 用法: bls-import [--checklist] [--config <path>] [--json-log] <file>
// 输出: 解析预览（JSON，stdout）
// ==========================================

use anyhow::{anyhow, Context, Result};
use bls_import::importer::{FileContent, ImportPreview, SpreadsheetImportParser};
use bls_import::{logging, ImportConfig};
use std::env;
use std::path::PathBuf;

struct Args {
    checklist: bool,
    json_log: bool,
    config: Option<PathBuf>,
    file: PathBuf,
}

fn parse_args() -> Result<Args> {
    let mut checklist = false;
    let mut json_log = false;
    let mut config = None;
    let mut file = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--checklist" => checklist = true,
            "--json-log" => json_log = true,
            "--config" => {
                let path = args.next().ok_or_else(|| anyhow!("--config requires a path"))?;
                config = Some(PathBuf::from(path));
            }
            _ => file = Some(PathBuf::from(arg)),
        }
    }

    let file = file.ok_or_else(|| {
        anyhow!("Usage: bls-import [--checklist] [--config <path>] [--json-log] <file>")
    })?;

    Ok(Args {
        checklist,
        json_log,
        config,
        file,
    })
}

fn main() -> Result<()> {
    let args = parse_args()?;

    if args.json_log {
        logging::init_json();
    } else {
        logging::init();
    }
    tracing::info!("BLS 导入预览 v{}", bls_import::VERSION);

    let config = match &args.config {
        Some(path) => ImportConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ImportConfig::default(),
    };

    let file_name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("invalid file name: {}", args.file.display()))?
        .to_string();

    let parser = SpreadsheetImportParser::new(config);
    let content = FileContent::Path(args.file.clone());

    let output = if args.checklist {
        serde_json::to_string_pretty(&parser.parse_checklist(content, &file_name))?
    } else {
        let preview = ImportPreview::from_result(parser.parse_questions(content, &file_name));
        serde_json::to_string_pretty(&preview)?
    };
    println!("{}", output);

    Ok(())
}
