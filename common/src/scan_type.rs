//! スキャン種別とエンドポイントの対応表
//!
//! セレクタの値 → ScanType → Endpoint をテーブルで解決する。
//! 専用エンドポイントを持たない値はすべて `General` として汎用パスへ送る。

use serde::{Deserialize, Serialize};

/// 解析サービスのエンドポイント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Health,
    Analyze,
    AnalyzeBreastUltrasound,
    AnalyzePcos,
    ReportGenerate,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Health => "/health",
            Endpoint::Analyze => "/analyze",
            Endpoint::AnalyzeBreastUltrasound => "/analyze/breast-ultrasound",
            Endpoint::AnalyzePcos => "/analyze/pcos",
            Endpoint::ReportGenerate => "/report/generate",
        }
    }

    /// ベースURLと結合したURL（末尾スラッシュは1つにまとめる）
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

/// 専用エンドポイントを持つセレクタ値
const SPECIALIZED_ROUTES: &[(&str, ScanType, Endpoint)] = &[
    ("breast_ultrasound", ScanType::BreastUltrasound, Endpoint::AnalyzeBreastUltrasound),
    ("pcos_ultrasound", ScanType::PcosUltrasound, Endpoint::AnalyzePcos),
];

/// セレクタの選択肢（セレクタ値, 表示名）
const SELECTOR_OPTIONS: &[(&str, &str)] = &[
    ("", "Auto-detect"),
    ("xray", "X-Ray"),
    ("ct", "CT"),
    ("mri", "MRI"),
    ("ultrasound", "Ultrasound"),
    ("breast_ultrasound", "Breast Ultrasound"),
    ("pcos_ultrasound", "PCOS Ultrasound"),
];

/// スキャン種別セレクタの値
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScanType {
    /// 未選択（サービス側で自動判定）
    #[default]
    Auto,
    BreastUltrasound,
    PcosUltrasound,
    /// 専用エンドポイントのない種別。値はフォームの `scan_type` として送る
    General(String),
}

impl ScanType {
    /// セレクタ値から変換（前後の空白は無視）
    pub fn from_selector(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return ScanType::Auto;
        }
        SPECIALIZED_ROUTES
            .iter()
            .find(|(selector, _, _)| *selector == value)
            .map(|(_, scan_type, _)| scan_type.clone())
            .unwrap_or_else(|| {
                if !Self::is_listed(value) {
                    tracing::debug!(scan_type = value, "unrecognised scan type, routing to general analysis");
                }
                ScanType::General(value.to_string())
            })
    }

    /// セレクタ値（Autoは空文字）
    pub fn selector_value(&self) -> &str {
        match self {
            ScanType::Auto => "",
            ScanType::General(value) => value.as_str(),
            specialized => SPECIALIZED_ROUTES
                .iter()
                .find(|(_, scan_type, _)| scan_type == specialized)
                .map(|(selector, _, _)| *selector)
                .unwrap_or(""),
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        SPECIALIZED_ROUTES
            .iter()
            .find(|(_, scan_type, _)| scan_type == self)
            .map(|(_, _, endpoint)| *endpoint)
            .unwrap_or(Endpoint::Analyze)
    }

    /// 汎用パスにのみ付与する `scan_type` フォーム値
    pub fn form_value(&self) -> Option<&str> {
        match self {
            ScanType::General(value) if !value.is_empty() => Some(value.as_str()),
            _ => None,
        }
    }

    /// 画面上の選択肢（セレクタ値, 表示名）
    pub fn options() -> &'static [(&'static str, &'static str)] {
        SELECTOR_OPTIONS
    }

    /// セレクタの選択肢にある値か
    pub fn is_listed(value: &str) -> bool {
        SELECTOR_OPTIONS.iter().any(|(selector, _)| *selector == value)
    }
}

impl std::str::FromStr for ScanType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ScanType::from_selector(s))
    }
}

impl std::fmt::Display for ScanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanType::Auto => write!(f, "auto"),
            other => write!(f, "{}", other.selector_value()),
        }
    }
}
