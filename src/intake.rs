//! ディスク上のファイルを選択ファイルとして読み込む

use crate::error::{MedicalCardError, Result};
use image::ImageFormat;
use medical_card_common::SelectedFile;
use std::path::Path;

/// 画像以外で宣言タイプを決められる拡張子
const NON_IMAGE_TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
    ("dcm", "application/dicom"),
    ("zip", "application/zip"),
];

const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// ファイルを読み込み、宣言MIMEタイプを付けて返す（検証はしない）
pub fn load_file(path: &Path) -> Result<SelectedFile> {
    if !path.is_file() {
        return Err(MedicalCardError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let media_type = declared_media_type(path, &bytes);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "scan".to_string());

    Ok(SelectedFile::new(name, media_type, bytes))
}

/// 拡張子 → 既知の非画像拡張子 → 内容の判定 の順でMIMEタイプを決める
pub fn declared_media_type(path: &Path, bytes: &[u8]) -> String {
    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type().to_string();
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());
    if let Some(ext) = extension.as_deref() {
        if let Some((_, media_type)) = NON_IMAGE_TYPES.iter().find(|(e, _)| *e == ext) {
            return media_type.to_string();
        }
    }

    image::guess_format(bytes)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| UNKNOWN_MEDIA_TYPE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn test_media_type_from_extension() {
        assert_eq!(declared_media_type(Path::new("scan.png"), b""), "image/png");
        assert_eq!(declared_media_type(Path::new("scan.JPG"), b""), "image/jpeg");
        assert_eq!(declared_media_type(Path::new("notes.txt"), PNG_MAGIC), "text/plain");
        assert_eq!(declared_media_type(Path::new("study.dcm"), b""), "application/dicom");
    }

    #[test]
    fn test_media_type_sniffed_without_extension() {
        assert_eq!(declared_media_type(Path::new("scan"), PNG_MAGIC), "image/png");
        assert_eq!(declared_media_type(Path::new("scan"), b"plain"), UNKNOWN_MEDIA_TYPE);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file(Path::new("/nonexistent/scan.png")).unwrap_err();
        assert!(matches!(err, MedicalCardError::FileNotFound(_)));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("chest.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let file = load_file(&path).unwrap();
        assert_eq!(file.name, "chest.png");
        assert_eq!(file.media_type, "image/png");
        assert_eq!(file.len(), PNG_MAGIC.len());
    }
}
