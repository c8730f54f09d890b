//! 画面コントローラ
//!
//! ユーザー操作を `Command` として受け取り、1件ずつ処理する。
//! 状態（選択ファイル・解析結果・レポート）は `SessionState` が単独で所有し、
//! 各ハンドラは `&mut self` を取るため、リクエストが重なって処理されることはない。
//!
//! エラーの扱い:
//! - 画像以外のファイル / 解析前の画面遷移 / 解析・レポートの失敗 → アラート
//! - ヘルスチェックの失敗 → ログのみ
//! - PDF出力の失敗 → 呼び出し元へそのまま返す

use crate::api::{HealthResponse, ScanApi};
use crate::error::{MedicalCardError, Result};
use crate::export::pdf;
use crate::presenter::{HealthStatus, Presenter};
use medical_card_common::export::{report_file_name, PdfExportSettings};
use medical_card_common::{
    MultipartRequest, PatientIdentity, ReportView, ResultsView, ScanType, SelectedFile,
    SessionState, TabController, View,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const ANALYSIS_LOADING_LABEL: &str = "AI Analysis in Progress...";
pub const REPORT_LOADING_LABEL: &str = "Compiling Report...";

/// ユーザー操作
#[derive(Debug, Clone)]
pub enum Command {
    CheckHealth,
    SelectScanType(ScanType),
    /// ファイル選択（参照ボタン・ドロップ共通）
    SelectFile(SelectedFile),
    /// タブのクリック
    RequestView(View),
    BackToUpload,
    GenerateReport,
    ExportPdf { output_dir: PathBuf },
}

/// 処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Health(HealthStatus),
    ScanTypeSelected(ScanType),
    ViewChanged(View),
    Analyzed,
    ReportGenerated,
    /// 前提条件を満たさないため何もしなかった
    Skipped,
    Exported(PathBuf),
}

/// レポート画面の日付（ローカル時刻、en-US形式）
pub fn local_date_string() -> String {
    chrono::Local::now().format("%m/%d/%Y").to_string()
}

pub struct Controller<A, P> {
    api: A,
    presenter: P,
    session: SessionState,
    tabs: TabController,
    scan_type: ScanType,
    health: HealthStatus,
    preview: Option<String>,
    report_view: Option<ReportView>,
    /// レポート生成時に送ったスキャン画像（PDFに載せる）
    report_scan: Option<SelectedFile>,
    pdf_settings: PdfExportSettings,
    rng: StdRng,
    clock: fn() -> String,
}

impl<A: ScanApi, P: Presenter> Controller<A, P> {
    pub fn new(api: A, presenter: P) -> Self {
        Self {
            api,
            presenter,
            session: SessionState::new(),
            tabs: TabController::new(),
            scan_type: ScanType::Auto,
            health: HealthStatus::Unknown,
            preview: None,
            report_view: None,
            report_scan: None,
            pdf_settings: PdfExportSettings::default(),
            rng: StdRng::from_entropy(),
            clock: local_date_string,
        }
    }

    /// 患者IDの乱数を固定する（テスト用）
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn active_view(&self) -> View {
        self.tabs.active()
    }

    pub fn scan_type(&self) -> &ScanType {
        &self.scan_type
    }

    pub fn health(&self) -> HealthStatus {
        self.health
    }

    pub fn report_view(&self) -> Option<&ReportView> {
        self.report_view.as_ref()
    }

    /// 表示中のレポートに対応するスキャン画像
    pub fn report_scan(&self) -> Option<&SelectedFile> {
        self.report_scan.as_ref()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// 1コマンドを処理する。アラート対象のエラーはここで表示してから返す。
    pub async fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        debug!(?command, "dispatch");
        let result = match command {
            Command::CheckHealth => Ok(Outcome::Health(self.check_health().await)),
            Command::SelectScanType(scan_type) => Ok(self.select_scan_type(scan_type)),
            Command::SelectFile(file) => self.select_file(file).await,
            Command::RequestView(view) => self.request_view(view),
            Command::BackToUpload => Ok(self.back_to_upload()),
            Command::GenerateReport => self.generate_report().await,
            Command::ExportPdf { output_dir } => self.export_pdf(output_dir),
        };

        if let Err(err) = &result {
            if err.is_alert() {
                self.presenter.alert(&err.user_message());
            }
        }
        result
    }

    async fn check_health(&mut self) -> HealthStatus {
        let status = match self.api.check_health().await {
            Ok(HealthResponse::Ok) => HealthStatus::Online,
            Ok(HealthResponse::Status(code)) => {
                warn!(status = code, "health check returned non-success status");
                HealthStatus::Offline
            }
            Err(err) => {
                warn!(error = %err, "health check failed");
                HealthStatus::Offline
            }
        };

        self.health = status;
        self.presenter.set_health(status);
        status
    }

    fn select_scan_type(&mut self, scan_type: ScanType) -> Outcome {
        debug!(%scan_type, endpoint = scan_type.endpoint().path(), "scan type selected");
        self.scan_type = scan_type.clone();
        Outcome::ScanTypeSelected(scan_type)
    }

    /// ファイルを受け付けて解析まで行う
    async fn select_file(&mut self, file: SelectedFile) -> Result<Outcome> {
        let file = file.accept()?;
        info!(file = %file.name, media_type = %file.media_type, bytes = file.len(), "file accepted");

        self.preview = Some(file.data_url());
        self.session.select_file(file);
        self.analyze().await
    }

    async fn analyze(&mut self) -> Result<Outcome> {
        let Some(file) = self.session.selected_file() else {
            return Ok(Outcome::Skipped);
        };
        let request = MultipartRequest::analysis(file, &self.scan_type);

        self.presenter.show_loading(ANALYSIS_LOADING_LABEL);
        let response = self.api.analyze(&request).await;
        self.presenter.hide_loading();

        let analysis = response.map_err(|err| {
            warn!(error = %err, "analysis failed");
            into_failure(err, MedicalCardError::AnalysisFailed)
        })?;

        info!(scan_type = ?analysis.scan_type, classification = ?analysis.classification, "analysis stored");
        let results = ResultsView::from_analysis(&analysis).with_preview(self.preview.clone());
        self.session.store_analysis(analysis);
        self.presenter.render_results(&results);
        self.switch_to(View::Results);

        Ok(Outcome::Analyzed)
    }

    fn request_view(&mut self, view: View) -> Result<Outcome> {
        self.tabs.request_switch(view, self.session.has_analysis())?;
        self.presenter.show_view(view);
        Ok(Outcome::ViewChanged(view))
    }

    fn back_to_upload(&mut self) -> Outcome {
        self.session.clear_for_upload();
        self.preview = None;
        self.switch_to(View::Upload);
        Outcome::ViewChanged(View::Upload)
    }

    async fn generate_report(&mut self) -> Result<Outcome> {
        let Some((file, analysis)) = self.session.report_inputs() else {
            debug!("report requested without file or analysis; ignored");
            return Ok(Outcome::Skipped);
        };

        let patient = PatientIdentity::new(
            self.rng.gen_range(PatientIdentity::ID_RANGE),
            self.rng.gen_range(PatientIdentity::NAME_RANGE),
        );
        let request = MultipartRequest::report(file, analysis, &patient);
        let scan = file.clone();

        self.presenter.show_loading(REPORT_LOADING_LABEL);
        let response = self.api.generate_report(&request).await;
        self.presenter.hide_loading();

        let report = response.map_err(|err| {
            warn!(error = %err, "report generation failed");
            into_failure(err, MedicalCardError::ReportFailed)
        })?;

        info!(patient_id = ?report.patient_id, "report stored");
        let view = ReportView::from_report(&report, &(self.clock)());
        if let Some(view) = &view {
            self.presenter.render_report(view);
        }
        // analysisがないレポートは描画しないが、前回の画面内容は残る
        if view.is_some() {
            self.report_view = view;
            self.report_scan = Some(scan);
        }
        self.session.store_report(report);
        self.switch_to(View::Report);

        Ok(Outcome::ReportGenerated)
    }

    fn export_pdf(&self, output_dir: PathBuf) -> Result<Outcome> {
        let view = self.report_view.as_ref().ok_or(MedicalCardError::NoReport)?;
        let patient_id = Some(view.patient_id.as_str()).filter(|id| !id.is_empty());
        let path = output_dir.join(report_file_name(patient_id));

        pdf::generate_report_pdf(view, self.report_scan.as_ref(), &path, &self.pdf_settings)?;
        info!(path = %path.display(), "report exported");
        Ok(Outcome::Exported(path))
    }

    fn switch_to(&mut self, view: View) {
        self.tabs.switch_to(view);
        self.presenter.show_view(view);
    }
}

/// 通信・パースのエラーを操作単位の失敗にまとめる
fn into_failure(err: MedicalCardError, failed: fn(String) -> MedicalCardError) -> MedicalCardError {
    match err {
        MedicalCardError::AnalysisFailed(_) | MedicalCardError::ReportFailed(_) => err,
        other => failed(other.to_string()),
    }
}
