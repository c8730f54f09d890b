//! 解析APIレスポンスの型定義
//!
//! - AnalysisResult: `/analyze` 系エンドポイントの出力
//! - ReportData: `/report/generate` の出力（ReportAnalysisを内包）

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 解析結果
///
/// 画面表示に使うのは `scan_type` / `classification` / `confidence` / `findings` のみ。
/// 欠けているフィールドは表示時に既定値へ置き換える（エラーにはしない）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub scan_type: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub findings: Vec<String>,

    /// 所見の詳細文（レポート生成前でも返ってくる場合がある）
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub recommendations: Vec<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

impl AnalysisResult {
    /// 空文字を除いたスキャン種別
    pub fn known_scan_type(&self) -> Option<&str> {
        self.scan_type.as_deref().filter(|s| !s.is_empty())
    }
}

/// レポート生成結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,

    /// サーバー側で整形済みのプレーンテキストレポート
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ReportAnalysis>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

/// レポート内の解析部分
///
/// `analysis` が存在する場合、下記6フィールドは必須として扱う。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportAnalysis {
    #[serde(deserialize_with = "required_text")]
    pub scan_type: String,

    #[serde(deserialize_with = "required_text")]
    pub report: String,

    #[serde(deserialize_with = "required_text")]
    pub classification: String,

    #[serde(deserialize_with = "required_text")]
    pub confidence: String,

    pub findings: Vec<String>,

    pub recommendations: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// JSONスカラー値を表示用テキストへ変換（null は None）
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text))
}

fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_text(value).ok_or_else(|| serde::de::Error::custom("expected a text value, found null"))
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.into_iter().filter_map(value_to_text).collect(),
        Some(other) => value_to_text(other).into_iter().collect(),
        None => Vec::new(),
    })
}
