//! 画面出力
//!
//! Controllerは `Presenter` にだけ描画を依頼する。ターミナル版は `ConsolePresenter`。

use indicatif::{ProgressBar, ProgressStyle};
use medical_card_common::{ReportView, ResultsView, View};
use std::time::Duration;

/// ステータス表示（ヘッダーのインジケータ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "Connecting...",
            HealthStatus::Online => "System Online",
            HealthStatus::Offline => "Offline",
        }
    }
}

pub trait Presenter {
    /// ブロッキングのアラート
    fn alert(&mut self, message: &str);

    fn show_loading(&mut self, label: &str);

    fn hide_loading(&mut self);

    fn set_health(&mut self, status: HealthStatus);

    /// 画面を切り替える（指定画面のみ表示）
    fn show_view(&mut self, view: View);

    /// 結果画面の内容を差し替える
    fn render_results(&mut self, results: &ResultsView);

    /// レポート画面の内容を差し替える
    fn render_report(&mut self, report: &ReportView);
}

/// ターミナル出力
#[derive(Default)]
pub struct ConsolePresenter {
    spinner: Option<ProgressBar>,
    results: Option<ResultsView>,
    report: Option<ReportView>,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn print_results(&self) {
        let Some(results) = &self.results else {
            println!("(結果なし)");
            return;
        };
        println!("[{}]", results.badge);
        println!("  Classification: {}", results.classification);
        println!("  Confidence:     {}", results.confidence);
        println!("  Findings:");
        for finding in &results.findings {
            println!("    - {}", finding);
        }
        if let Some(preview) = &results.preview {
            // Data URLは長いので先頭だけ
            let head: String = preview.chars().take(48).collect();
            println!("  Preview: {}... ({} chars)", head, preview.len());
        }
    }

    fn print_report(&self) {
        let Some(report) = &self.report else {
            return;
        };
        println!("Date:       {}", report.date);
        println!("Patient ID: {}", report.patient_id);
        println!("Scan Type:  {}", report.scan_type);
        println!();
        println!("{}", report.narrative);
        println!();
        println!("Classification: {}", report.classification);
        println!("Confidence:     {}", report.confidence);
        println!("Findings:");
        for finding in &report.findings {
            println!("  - {}", finding);
        }
        println!("Recommendations:");
        for (i, rec) in report.recommendations.iter().enumerate() {
            println!("  {}. {}", i + 1, rec);
        }
        if let Some(disclaimer) = &report.disclaimer {
            println!();
            println!("{}", disclaimer);
        }
    }
}

impl Presenter for ConsolePresenter {
    fn alert(&mut self, message: &str) {
        eprintln!("✗ {}", message);
    }

    fn show_loading(&mut self, label: &str) {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        // 前のスピナーが残っていれば消す
        if let Some(previous) = self.spinner.replace(bar) {
            previous.finish_and_clear();
        }
    }

    fn hide_loading(&mut self) {
        if let Some(bar) = self.spinner.take() {
            bar.finish_and_clear();
        }
    }

    fn set_health(&mut self, status: HealthStatus) {
        let dot = if status == HealthStatus::Online { "●" } else { "○" };
        println!("{} {}", dot, status.label());
    }

    fn show_view(&mut self, view: View) {
        println!("\n── {} ──", view.label());
        match view {
            View::Upload => println!("スキャン画像を選択してください"),
            View::Results => self.print_results(),
            View::Report => self.print_report(),
        }
    }

    fn render_results(&mut self, results: &ResultsView) {
        self.results = Some(results.clone());
    }

    fn render_report(&mut self, report: &ReportView) {
        self.report = Some(report.clone());
    }
}
