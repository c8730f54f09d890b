//! エラー型定義

use crate::view::View;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 画像以外のファイルが選択された（宣言されたMIMEタイプ）
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    /// 解析結果がない状態で結果/レポート画面へ遷移しようとした
    #[error("Navigation refused: {0:?} requires an analysis result")]
    NavigationRefused(View),
}

impl Error {
    /// アラートに表示する文言
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidFileType(_) => "Invalid File Type. Please upload an image.".to_string(),
            Error::NavigationRefused(_) => "Please upload and analyze a scan first.".to_string(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
