use medical_card_common::View;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MedicalCardError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像ではないファイルです: {0}")]
    InvalidFileType(String),

    #[error("画面 {0:?} は解析結果がないと表示できません")]
    NavigationRefused(View),

    #[error("解析に失敗しました: {0}")]
    AnalysisFailed(String),

    #[error("レポート生成に失敗しました: {0}")]
    ReportFailed(String),

    #[error("エクスポートするレポートがありません")]
    NoReport,

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

impl From<medical_card_common::Error> for MedicalCardError {
    fn from(err: medical_card_common::Error) -> Self {
        use medical_card_common::Error as E;
        match err {
            E::InvalidFileType(media_type) => MedicalCardError::InvalidFileType(media_type),
            E::NavigationRefused(view) => MedicalCardError::NavigationRefused(view),
        }
    }
}

impl MedicalCardError {
    /// 画面上でアラート表示するエラーか（それ以外は呼び出し元へ返すだけ）
    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            MedicalCardError::InvalidFileType(_)
                | MedicalCardError::NavigationRefused(_)
                | MedicalCardError::AnalysisFailed(_)
                | MedicalCardError::ReportFailed(_)
        )
    }

    /// アラートに表示する文言（画面の表示と同じ英語メッセージ）
    pub fn user_message(&self) -> String {
        match self {
            MedicalCardError::InvalidFileType(_) => "Invalid File Type. Please upload an image.".to_string(),
            MedicalCardError::NavigationRefused(_) => "Please upload and analyze a scan first.".to_string(),
            MedicalCardError::AnalysisFailed(_) => "Analysis Error: Analysis failed".to_string(),
            MedicalCardError::ReportFailed(_) => "Report Generation Failed".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MedicalCardError>;
