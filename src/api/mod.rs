//! 解析サービスAPI
//!
//! 画面ロジック（Controller）はこのトレイト越しにサービスを呼ぶ。
//! 実装はHTTP版（client.rs）とテスト用のフェイク。

mod client;

pub use client::HttpScanApi;

use crate::error::Result;
use medical_card_common::{AnalysisResult, MultipartRequest, ReportData};

/// ヘルスチェックの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthResponse {
    /// 2xx
    Ok,
    /// 2xx以外のHTTPステータス
    Status(u16),
}

#[allow(async_fn_in_trait)]
pub trait ScanApi {
    /// `GET /health`（通信失敗はErr）
    async fn check_health(&self) -> Result<HealthResponse>;

    /// `/analyze` 系エンドポイントへ送信
    async fn analyze(&self, request: &MultipartRequest<'_>) -> Result<AnalysisResult>;

    /// `/report/generate` へ送信
    async fn generate_report(&self, request: &MultipartRequest<'_>) -> Result<ReportData>;
}
