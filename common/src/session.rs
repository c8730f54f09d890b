//! セッション状態
//!
//! 選択ファイル・解析結果・レポートを1か所で所有する。
//! 値の設定は解析/レポートの取得とパースが成功した後にだけ行う。

use crate::intake::SelectedFile;
use crate::types::{AnalysisResult, ReportData};

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    selected_file: Option<SelectedFile>,
    analysis: Option<AnalysisResult>,
    report: Option<ReportData>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルを差し替える（以前のファイルは破棄）
    pub fn select_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn store_analysis(&mut self, analysis: AnalysisResult) {
        self.analysis = Some(analysis);
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn has_analysis(&self) -> bool {
        self.analysis.is_some()
    }

    pub fn store_report(&mut self, report: ReportData) {
        self.report = Some(report);
    }

    pub fn report(&self) -> Option<&ReportData> {
        self.report.as_ref()
    }

    /// レポート生成の前提（ファイルと解析結果の両方）
    pub fn report_inputs(&self) -> Option<(&SelectedFile, &AnalysisResult)> {
        match (&self.selected_file, &self.analysis) {
            (Some(file), Some(analysis)) => Some((file, analysis)),
            _ => None,
        }
    }

    /// アップロード画面へ戻るときのリセット
    ///
    /// レポートは残るが、解析結果がない間はレポート画面に遷移できない。
    pub fn clear_for_upload(&mut self) {
        self.selected_file = None;
        self.analysis = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> SelectedFile {
        SelectedFile::new(name, "image/png", vec![1, 2, 3])
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = SessionState::new();
        assert!(session.selected_file().is_none());
        assert!(!session.has_analysis());
        assert!(session.report().is_none());
        assert!(session.report_inputs().is_none());
    }

    #[test]
    fn test_select_file_replaces_previous() {
        let mut session = SessionState::new();
        session.select_file(file("a.png"));
        session.select_file(file("b.png"));
        assert_eq!(session.selected_file().unwrap().name, "b.png");
    }

    #[test]
    fn test_report_inputs_require_both() {
        let mut session = SessionState::new();
        session.select_file(file("a.png"));
        assert!(session.report_inputs().is_none());

        session.store_analysis(AnalysisResult::default());
        let (f, _) = session.report_inputs().expect("inputs should be present");
        assert_eq!(f.name, "a.png");
    }

    #[test]
    fn test_analysis_without_file_is_not_enough() {
        let mut session = SessionState::new();
        session.store_analysis(AnalysisResult::default());
        assert!(session.report_inputs().is_none());
    }

    #[test]
    fn test_clear_for_upload() {
        let mut session = SessionState::new();
        session.select_file(file("a.png"));
        session.store_analysis(AnalysisResult::default());
        session.store_report(ReportData::default());

        session.clear_for_upload();

        assert!(session.selected_file().is_none());
        assert!(!session.has_analysis());
        assert!(session.report().is_some());
    }
}
