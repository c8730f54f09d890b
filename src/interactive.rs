//! 対話モード
//!
//! ブラウザ版のページ操作（タブ・ファイル選択・ボタン）をメニューで再現する。

use crate::api::ScanApi;
use crate::controller::{Command, Controller, Outcome};
use crate::error::{MedicalCardError, Result};
use crate::intake;
use crate::presenter::Presenter;
use dialoguer::{Input, Select};
use medical_card_common::{ScanType, View};
use std::path::{Path, PathBuf};

/// メニュー項目
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    ChooseFile,
    ChooseScanType,
    ShowView(View),
    BackToUpload,
    GenerateReport,
    DownloadPdf,
    Quit,
}

impl SessionAction {
    pub fn label(&self) -> String {
        match self {
            SessionAction::ChooseFile => "スキャン画像を選択".to_string(),
            SessionAction::ChooseScanType => "スキャン種別を変更".to_string(),
            SessionAction::ShowView(view) => format!("タブ: {}", view.label()),
            SessionAction::BackToUpload => "アップロードに戻る".to_string(),
            SessionAction::GenerateReport => "レポートを生成".to_string(),
            SessionAction::DownloadPdf => "PDFをダウンロード".to_string(),
            SessionAction::Quit => "終了".to_string(),
        }
    }
}

/// 画面ごとのメニュー（タブは常に3つとも出し、遷移可否はControllerが判定する）
pub fn available_actions(view: View) -> Vec<SessionAction> {
    let mut actions = match view {
        View::Upload => vec![SessionAction::ChooseFile, SessionAction::ChooseScanType],
        View::Results => vec![SessionAction::GenerateReport, SessionAction::BackToUpload],
        View::Report => vec![SessionAction::DownloadPdf, SessionAction::BackToUpload],
    };
    actions.extend(
        View::ALL
            .into_iter()
            .filter(|v| *v != view)
            .map(SessionAction::ShowView),
    );
    actions.push(SessionAction::Quit);
    actions
}

pub async fn run_session<A: ScanApi, P: Presenter>(
    controller: &mut Controller<A, P>,
    output_dir: &Path,
) -> Result<()> {
    controller.dispatch(Command::CheckHealth).await?;
    controller.dispatch(Command::RequestView(View::Upload)).await?;

    loop {
        let actions = available_actions(controller.active_view());
        let labels: Vec<String> = actions.iter().map(|a| a.label()).collect();
        let choice = Select::new()
            .with_prompt(format!("操作 (種別: {})", controller.scan_type()))
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| MedicalCardError::Prompt(e.to_string()))?;

        let command = match &actions[choice] {
            SessionAction::Quit => break,
            SessionAction::ChooseFile => {
                let path = prompt_path()?;
                match intake::load_file(&path) {
                    Ok(file) => Command::SelectFile(file),
                    Err(err) => {
                        println!("✗ {}", err);
                        continue;
                    }
                }
            }
            SessionAction::ChooseScanType => Command::SelectScanType(prompt_scan_type()?),
            SessionAction::ShowView(view) => Command::RequestView(*view),
            SessionAction::BackToUpload => Command::BackToUpload,
            SessionAction::GenerateReport => Command::GenerateReport,
            SessionAction::DownloadPdf => Command::ExportPdf {
                output_dir: output_dir.to_path_buf(),
            },
        };

        // アラート対象はController側で表示済み。PDF出力などの失敗だけここで出す
        match controller.dispatch(command).await {
            Ok(Outcome::Exported(path)) => {
                println!("✔ PDF出力: {}", path.display());
            }
            Ok(_) => {}
            Err(err) if !err.is_alert() => println!("✗ {}", err),
            Err(_) => {}
        }
    }

    Ok(())
}

fn prompt_path() -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt("画像ファイルのパス")
        .interact_text()
        .map_err(|e| MedicalCardError::Prompt(e.to_string()))?;
    Ok(PathBuf::from(input.trim()))
}

fn prompt_scan_type() -> Result<ScanType> {
    let options = ScanType::options();
    let labels: Vec<&str> = options.iter().map(|(_, label)| *label).collect();
    let choice = Select::new()
        .with_prompt("スキャン種別")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| MedicalCardError::Prompt(e.to_string()))?;
    Ok(ScanType::from_selector(options[choice].0))
}
