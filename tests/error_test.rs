//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use medical_card::error::MedicalCardError;
use medical_card::intake;
use medical_card_common::View;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを選択した場合
#[test]
fn test_load_nonexistent_file() {
    let result = intake::load_file(Path::new("/nonexistent/path/scan.png"));

    let err = result.unwrap_err();
    assert!(matches!(err, MedicalCardError::FileNotFound(_)));
    assert!(!err.is_alert());
}

/// ディレクトリを選択した場合
#[test]
fn test_load_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = intake::load_file(dir.path());
    assert!(matches!(result, Err(MedicalCardError::FileNotFound(_))));
}

/// テキストファイルは読み込めるが受け付けられない
#[test]
fn test_text_file_rejected_on_accept() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let file = intake::load_file(&path).unwrap();
    assert_eq!(file.media_type, "text/plain");

    let err: MedicalCardError = file.accept().unwrap_err().into();
    assert!(matches!(err, MedicalCardError::InvalidFileType(_)));
    assert!(err.is_alert());
    assert_eq!(err.user_message(), "Invalid File Type. Please upload an image.");
}

/// MedicalCardErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        MedicalCardError::Config("テスト設定エラー".to_string()),
        MedicalCardError::FileNotFound("scan.png".to_string()),
        MedicalCardError::InvalidFileType("text/plain".to_string()),
        MedicalCardError::NavigationRefused(View::Results),
        MedicalCardError::AnalysisFailed("HTTP 500".to_string()),
        MedicalCardError::ReportFailed("HTTP 500".to_string()),
        MedicalCardError::NoReport,
        MedicalCardError::ImageLoad("broken.png".to_string()),
        MedicalCardError::PdfGeneration("PDF生成エラー".to_string()),
        MedicalCardError::Prompt("中断".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// アラート文言は画面表示と同じ英語
#[test]
fn test_alert_messages() {
    assert_eq!(
        MedicalCardError::NavigationRefused(View::Report).user_message(),
        "Please upload and analyze a scan first."
    );
    assert_eq!(
        MedicalCardError::AnalysisFailed("HTTP 502".to_string()).user_message(),
        "Analysis Error: Analysis failed"
    );
    assert_eq!(
        MedicalCardError::ReportFailed("timeout".to_string()).user_message(),
        "Report Generation Failed"
    );
}

/// アラート対象でないエラーはメッセージをそのまま返す
#[test]
fn test_non_alert_errors() {
    let err = MedicalCardError::NoReport;
    assert!(!err.is_alert());
    assert_eq!(err.user_message(), err.to_string());
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = MedicalCardError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: MedicalCardError = io_err.into();

    assert!(matches!(err, MedicalCardError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: MedicalCardError = json_err.into();

    assert!(matches!(err, MedicalCardError::JsonParse(_)));
}

/// common::Errorからの変換（対応する変種へ写す）
#[test]
fn test_common_error_conversion() {
    let err: MedicalCardError = medical_card_common::Error::NavigationRefused(View::Report).into();
    assert!(matches!(err, MedicalCardError::NavigationRefused(View::Report)));
    assert!(err.is_alert());

    let err: MedicalCardError =
        medical_card_common::Error::InvalidFileType("application/pdf".to_string()).into();
    assert!(matches!(err, MedicalCardError::InvalidFileType(ref t) if t == "application/pdf"));
}
