pub mod pdf;

use crate::error::{MedicalCardError, Result};
use medical_card_common::export::{report_file_name, PdfExportSettings};
use medical_card_common::{ReportData, ReportView, SelectedFile};
use std::path::{Path, PathBuf};

/// 出力先がディレクトリ（または拡張子なし）ならレポート名のファイルを作る
pub fn output_path_for_report(output: &Path, patient_id: Option<&str>) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(report_file_name(patient_id))
    } else {
        output.to_path_buf()
    }
}

/// 保存済みのレポートJSONからPDFを出力
pub fn export_report(
    report: &ReportData,
    scan: Option<&SelectedFile>,
    output: &Path,
    date: &str,
) -> Result<PathBuf> {
    let view = ReportView::from_report(report, date).ok_or(MedicalCardError::NoReport)?;
    let output_path = output_path_for_report(output, report.patient_id.as_deref());

    println!("- PDFを生成中...");
    pdf::generate_report_pdf(&view, scan, &output_path, &PdfExportSettings::default())?;
    println!("✔ PDF出力: {}", output_path.display());

    Ok(output_path)
}
