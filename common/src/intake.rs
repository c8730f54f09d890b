//! 選択ファイルの保持と検証

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// ユーザーが選択したスキャン画像
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    /// 宣言されたMIMEタイプ（例: "image/png"）
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// 画像として受け付けるか検証して返す
    pub fn accept(self) -> Result<Self> {
        if is_image_media_type(&self.media_type) {
            Ok(self)
        } else {
            Err(Error::InvalidFileType(self.media_type))
        }
    }

    /// プレビュー用のData URL
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, STANDARD.encode(&self.bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// 画像本体をログに出さない
impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// MIMEタイプが "image/" で始まるか
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}
