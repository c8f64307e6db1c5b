// ==========================================
// BLS 培训管理系统 - 检查表导入集成测试
// ==========================================


use bls_import::domain::ChecklistCategory;
use bls_import::logging;
use bls_import::importer::{FileContent, SpreadsheetImportParser};
use test_helpers::build_xlsx;

fn parser() -> SpreadsheetImportParser {
    logging::init_test();
    SpreadsheetImportParser::default()
}

#[test]
fn test_back_to_back_headers_drop_first() {
    let result = parser().parse_checklist(
        FileContent::from_text("DANGER\nRESPONSE\ncheck pulse\n"),
        "checklist.csv",
    );

    assert!(result.success());
    assert_eq!(result.data().len(), 1);
    let section = &result.data()[0];
    assert_eq!(section.title, "RESPONSE");
    assert_eq!(section.category, ChecklistCategory::Section);
    assert_eq!(section.sub_items, vec!["check pulse".to_string()]);
}

#[test]
fn test_xlsx_checklist_sections() {
    let bytes = build_xlsx(&[
        (
            "Skills",
            &[
                "STATION: ADULT BLS",
                "|Scene is safe",
                "|Checks responsiveness",
                "AIRWAY",
                "Head tilt chin lift|Jaw thrust if trauma",
                "",
                "CIRCULATION",
                "30 compressions",
            ],
        ),
        ("Other", &["IGNORED SECTION", "ignored item"]),
    ]);
    let result = parser().parse_checklist(FileContent::Bytes(bytes), "skills.xlsx");

    assert!(result.success());
    let titles: Vec<&str> = result.data().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["STATION: ADULT BLS", "AIRWAY", "CIRCULATION"]);
    assert_eq!(result.data()[0].sub_items.len(), 2);
    // 每行只取第一个非空字段
    assert_eq!(
        result.data()[1].sub_items,
        vec!["Head tilt chin lift".to_string()]
    );
}

#[test]
fn test_no_headers_falls_back_to_items() {
    let csv = "check scene safety,wear gloves\ntap and shout\n,open the airway\n";
    let result = parser().parse_checklist(FileContent::from_text(csv), "checklist.csv");

    assert!(result.success());
    assert_eq!(result.data().len(), 4);
    assert!(result
        .data()
        .iter()
        .all(|i| i.category == ChecklistCategory::Item && i.sub_items.is_empty()));
    assert_eq!(result.data()[3].title, "open the airway");
}

#[test]
fn test_long_keyword_header_accepted() {
    let header = "DEFIBRILATION AND SHOCK DELIVERY USING THE AUTOMATED DEVICE";
    let csv = format!("{}\nturn on AED\nattach pads\n", header);
    let result = parser().parse_checklist(FileContent::from_text(csv), "checklist.csv");

    assert_eq!(result.data().len(), 1);
    assert_eq!(result.data()[0].title, header);
    assert_eq!(result.data()[0].sub_items.len(), 2);
}

#[test]
fn test_corrupt_checklist_workbook() {
    let result = parser().parse_checklist(FileContent::Bytes(vec![1, 2, 3]), "skills.xls");
    assert!(!result.success());
    assert!(result.data().is_empty());
}
