//! 画面表示用の射影
//!
//! 解析結果/レポートから画面の各欄に入れる文字列を作る。描画自体はフロントエンド側。

use crate::types::{AnalysisResult, ReportData};

const UNKNOWN_SCAN_TYPE: &str = "UNKNOWN";
const NOT_AVAILABLE: &str = "N/A";

/// 解析結果画面
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsView {
    /// 検出種別バッジ（大文字）
    pub badge: String,
    pub classification: String,
    pub confidence: String,
    pub findings: Vec<String>,
    /// スキャン画像のプレビュー（Data URL）
    pub preview: Option<String>,
}

impl ResultsView {
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        Self {
            badge: analysis
                .scan_type
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(UNKNOWN_SCAN_TYPE)
                .to_uppercase(),
            classification: text_or_na(analysis.classification.as_deref()),
            confidence: text_or_na(analysis.confidence.as_deref()),
            findings: analysis.findings.clone(),
            preview: None,
        }
    }

    pub fn with_preview(mut self, data_url: Option<String>) -> Self {
        self.preview = data_url;
        self
    }
}

fn text_or_na(value: Option<&str>) -> String {
    value
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// レポート画面
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportView {
    pub date: String,
    pub patient_id: String,
    pub scan_type: String,
    pub narrative: String,
    pub classification: String,
    pub confidence: String,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub disclaimer: Option<String>,
}

impl ReportView {
    /// `analysis` がなければ何も描画しない（None）
    pub fn from_report(report: &ReportData, date: &str) -> Option<Self> {
        let analysis = report.analysis.as_ref()?;

        Some(Self {
            date: date.to_string(),
            patient_id: report.patient_id.clone().unwrap_or_default(),
            scan_type: analysis.scan_type.to_uppercase(),
            narrative: analysis.report.clone(),
            classification: analysis.classification.clone(),
            confidence: analysis.confidence.clone(),
            findings: analysis.findings.clone(),
            recommendations: analysis.recommendations.clone(),
            disclaimer: analysis.disclaimer.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReportAnalysis;

    #[test]
    fn test_results_view_from_xray() {
        let analysis: AnalysisResult = serde_json::from_str(
            r#"{"scan_type":"xray","classification":"normal","confidence":"92%","findings":["no fracture"]}"#,
        )
        .unwrap();
        let view = ResultsView::from_analysis(&analysis);

        assert_eq!(view.badge, "XRAY");
        assert_eq!(view.classification, "normal");
        assert_eq!(view.confidence, "92%");
        assert_eq!(view.findings, vec!["no fracture".to_string()]);
    }

    #[test]
    fn test_results_view_defaults() {
        let view = ResultsView::from_analysis(&AnalysisResult::default());
        assert_eq!(view.badge, "UNKNOWN");
        assert_eq!(view.classification, "N/A");
        assert_eq!(view.confidence, "N/A");
        assert!(view.findings.is_empty());
        assert!(view.preview.is_none());
    }

    #[test]
    fn test_results_view_with_preview() {
        let view = ResultsView::from_analysis(&AnalysisResult::default())
            .with_preview(Some("data:image/png;base64,AA==".into()));
        assert_eq!(view.preview.as_deref(), Some("data:image/png;base64,AA=="));
    }

    #[test]
    fn test_report_view_from_report() {
        let report: ReportData = serde_json::from_str(
            r#"{"patient_id":"PT-12345","analysis":{"scan_type":"xray","report":"...","classification":"normal","confidence":"92%","findings":["a"],"recommendations":["b","c"]}}"#,
        )
        .unwrap();
        let view = ReportView::from_report(&report, "01/18/2026").unwrap();

        assert_eq!(view.date, "01/18/2026");
        assert_eq!(view.patient_id, "PT-12345");
        assert_eq!(view.scan_type, "XRAY");
        assert_eq!(view.narrative, "...");
        assert_eq!(view.findings, vec!["a".to_string()]);
        assert_eq!(view.recommendations, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_report_view_without_analysis() {
        let report = ReportData {
            patient_id: Some("PT-1".into()),
            ..Default::default()
        };
        assert!(ReportView::from_report(&report, "01/18/2026").is_none());
    }

    #[test]
    fn test_report_view_keeps_disclaimer() {
        let report = ReportData {
            patient_id: None,
            analysis: Some(ReportAnalysis {
                scan_type: "breast ultrasound".into(),
                disclaimer: Some("Educational use only.".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let view = ReportView::from_report(&report, "").unwrap();
        assert_eq!(view.scan_type, "BREAST ULTRASOUND");
        assert_eq!(view.patient_id, "");
        assert_eq!(view.disclaimer.as_deref(), Some("Educational use only."));
    }
}
