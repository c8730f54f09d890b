//! マルチパート送信内容の組み立て
//!
//! HTTPクライアントに依存しない形でフォームのフィールドを決める。
//! ファイル本体（`file` パート）は送信側で必ず付与する。

use crate::intake::SelectedFile;
use crate::scan_type::{Endpoint, ScanType};
use crate::types::AnalysisResult;

/// テキストのフォームフィールド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub value: String,
}

impl FormField {
    fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self { name, value: value.into() }
    }
}

/// 送信1回分のリクエスト
#[derive(Debug, Clone)]
pub struct MultipartRequest<'a> {
    pub endpoint: Endpoint,
    pub file: &'a SelectedFile,
    pub fields: Vec<FormField>,
}

impl<'a> MultipartRequest<'a> {
    /// 解析リクエスト
    ///
    /// `scan_type` は汎用パスで種別が選ばれているときだけ付与する。
    pub fn analysis(file: &'a SelectedFile, scan_type: &ScanType) -> Self {
        let fields = scan_type
            .form_value()
            .map(|value| vec![FormField::new("scan_type", value)])
            .unwrap_or_default();

        Self {
            endpoint: scan_type.endpoint(),
            file,
            fields,
        }
    }

    /// レポート生成リクエスト
    pub fn report(file: &'a SelectedFile, analysis: &AnalysisResult, patient: &PatientIdentity) -> Self {
        let mut fields = vec![
            FormField::new("patient_id", patient.patient_id.as_str()),
            FormField::new("patient_name", patient.patient_name.as_str()),
        ];
        if let Some(scan_type) = analysis.known_scan_type() {
            fields.push(FormField::new("scan_type", scan_type));
        }

        Self {
            endpoint: Endpoint::ReportGenerate,
            file,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// 仮の患者ID・氏名（実在の患者管理とは無関係なプレースホルダー）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientIdentity {
    pub patient_id: String,
    pub patient_name: String,
}

impl PatientIdentity {
    pub const ID_RANGE: std::ops::RangeInclusive<u32> = 10_000..=99_999;
    pub const NAME_RANGE: std::ops::RangeInclusive<u32> = 0..=99;

    pub fn new(id_number: u32, name_number: u32) -> Self {
        Self {
            patient_id: format!("PT-{}", id_number),
            patient_name: format!("Patient #{}", name_number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_file() -> SelectedFile {
        SelectedFile::new("scan.png", "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn test_analysis_auto_has_no_scan_type() {
        let file = png_file();
        let request = MultipartRequest::analysis(&file, &ScanType::Auto);
        assert_eq!(request.endpoint, Endpoint::Analyze);
        assert!(request.fields.is_empty());
    }

    #[test]
    fn test_analysis_general_carries_scan_type() {
        let file = png_file();
        let request = MultipartRequest::analysis(&file, &ScanType::from_selector("xray"));
        assert_eq!(request.endpoint, Endpoint::Analyze);
        assert_eq!(request.field("scan_type"), Some("xray"));
    }

    #[test]
    fn test_analysis_specialized_omits_scan_type() {
        let file = png_file();
        for selector in ["breast_ultrasound", "pcos_ultrasound"] {
            let request = MultipartRequest::analysis(&file, &ScanType::from_selector(selector));
            assert_ne!(request.endpoint, Endpoint::Analyze);
            assert_eq!(request.field("scan_type"), None);
        }
    }

    #[test]
    fn test_report_fields() {
        let file = png_file();
        let analysis = AnalysisResult {
            scan_type: Some("xray".into()),
            ..Default::default()
        };
        let patient = PatientIdentity::new(12345, 7);
        let request = MultipartRequest::report(&file, &analysis, &patient);

        assert_eq!(request.endpoint, Endpoint::ReportGenerate);
        assert_eq!(request.field("patient_id"), Some("PT-12345"));
        assert_eq!(request.field("patient_name"), Some("Patient #7"));
        assert_eq!(request.field("scan_type"), Some("xray"));
    }

    #[test]
    fn test_report_without_scan_type() {
        let file = png_file();
        let patient = PatientIdentity::new(10000, 0);
        let request = MultipartRequest::report(&file, &AnalysisResult::default(), &patient);
        assert_eq!(request.field("scan_type"), None);
        assert_eq!(request.fields.len(), 2);
    }
}
