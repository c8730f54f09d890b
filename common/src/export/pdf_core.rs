//! PDF export core utilities (page geometry, text layout).
//!
//! 描画ライブラリに依存しない部分。レポート画面の内容を行単位に分解し、
//! US Letter縦向きのページへ割り付ける。

use crate::render::ReportView;

/// 1インチ = 72pt
pub const INCH_TO_PT: f32 = 72.0;

/// US Letter 縦向き（pt）
pub const LETTER_PORTRAIT_PT: (f32, f32) = (8.5 * INCH_TO_PT, 11.0 * INCH_TO_PT);

/// PDF出力設定（固定値）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfExportSettings {
    pub margin_in: f32,
    /// 画像の再エンコード品質 (0.0-1.0)
    pub image_quality: f32,
    /// 画像のラスタライズ倍率
    pub raster_scale: f32,
}

impl Default for PdfExportSettings {
    fn default() -> Self {
        Self {
            margin_in: 0.5,
            image_quality: 0.98,
            raster_scale: 2.0,
        }
    }
}

impl PdfExportSettings {
    pub fn page_size_pt(&self) -> (f32, f32) {
        LETTER_PORTRAIT_PT
    }

    pub fn margin_pt(&self) -> f32 {
        self.margin_in * INCH_TO_PT
    }

    /// JPEG品質 (1-100)
    pub fn jpeg_quality(&self) -> u8 {
        (self.image_quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// 行の種類（フォントサイズと太字を決める）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Subtitle,
    Heading,
    Body,
    Small,
    Blank,
}

impl LineStyle {
    pub fn font_size_pt(&self) -> f32 {
        match self {
            LineStyle::Title => 18.0,
            LineStyle::Subtitle => 12.0,
            LineStyle::Heading => 12.0,
            LineStyle::Body => 10.0,
            LineStyle::Small => 8.0,
            LineStyle::Blank => 6.0,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, LineStyle::Title | LineStyle::Heading)
    }

    pub fn line_height_pt(&self) -> f32 {
        self.font_size_pt() * 1.4
    }
}

/// PDFの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfLine {
    pub style: LineStyle,
    pub text: String,
}

impl PdfLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self { style, text: text.into() }
    }

    fn blank() -> Self {
        Self::new(LineStyle::Blank, "")
    }
}

/// PDF描画で使用するレイアウト計算結果（pt単位）
#[derive(Debug, Clone)]
pub struct PdfLayoutCore {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
    pub content_width_pt: f32,
    /// 1ページ目のスキャン画像欄の最大高さ
    pub image_max_height_pt: f32,
}

impl PdfLayoutCore {
    pub fn from_settings(settings: &PdfExportSettings) -> Self {
        let (page_width_pt, page_height_pt) = settings.page_size_pt();
        let margin_pt = settings.margin_pt();

        Self {
            page_width_pt,
            page_height_pt,
            margin_pt,
            content_width_pt: page_width_pt - margin_pt * 2.0,
            image_max_height_pt: 3.0 * INCH_TO_PT,
        }
    }

    /// 本文の最上段ベースライン（pt、下端基準）
    pub fn top_y_pt(&self) -> f32 {
        self.page_height_pt - self.margin_pt
    }

    /// 1行に収まるおおよその文字数（Helveticaの平均字幅 ≒ 0.5em）
    pub fn chars_per_line(&self, style: LineStyle) -> usize {
        let avg_char_width = style.font_size_pt() * 0.5;
        ((self.content_width_pt / avg_char_width).floor() as usize).max(1)
    }

    /// 画像を縦横比を保って欄に収めたサイズ（pt）
    pub fn fit_image(&self, width_px: u32, height_px: u32) -> (f32, f32) {
        if width_px == 0 || height_px == 0 {
            return (0.0, 0.0);
        }
        let ratio = width_px as f32 / height_px as f32;
        let mut width = self.content_width_pt;
        let mut height = width / ratio;
        if height > self.image_max_height_pt {
            height = self.image_max_height_pt;
            width = height * ratio;
        }
        (width, height)
    }

    /// 行をページに割り付ける
    ///
    /// `first_page_reserved_pt` は1ページ目の上部に確保する高さ（画像欄）。
    pub fn paginate<'a>(&self, lines: &'a [PdfLine], first_page_reserved_pt: f32) -> Vec<Vec<&'a PdfLine>> {
        let usable = self.page_height_pt - self.margin_pt * 2.0;
        let mut pages: Vec<Vec<&PdfLine>> = vec![Vec::new()];
        let mut used = first_page_reserved_pt.min(usable);

        for line in lines {
            let height = line.style.line_height_pt();
            if used + height > usable && pages.last().map_or(false, |p| !p.is_empty()) {
                pages.push(Vec::new());
                used = 0.0;
            }
            // 改ページ直後の空行は捨てる
            if used == 0.0 && line.style == LineStyle::Blank {
                continue;
            }
            if let Some(page) = pages.last_mut() {
                page.push(line);
            }
            used += height;
        }

        pages
    }
}

/// レポート画面の内容をPDFの行へ展開する
pub fn build_report_lines(view: &ReportView, layout: &PdfLayoutCore) -> Vec<PdfLine> {
    let mut lines = vec![
        PdfLine::new(LineStyle::Title, "MEDICAL IMAGING REPORT"),
        PdfLine::new(LineStyle::Subtitle, "Smart Medical Card System"),
        PdfLine::blank(),
        PdfLine::new(LineStyle::Heading, "PATIENT INFORMATION"),
        PdfLine::new(LineStyle::Body, format!("Patient ID: {}", view.patient_id)),
        PdfLine::new(LineStyle::Body, format!("Report Date: {}", view.date)),
        PdfLine::new(LineStyle::Body, format!("Scan Type: {}", view.scan_type)),
        PdfLine::blank(),
        PdfLine::new(LineStyle::Heading, "FINDINGS"),
    ];

    let body_width = layout.chars_per_line(LineStyle::Body);
    for finding in &view.findings {
        push_wrapped(&mut lines, LineStyle::Body, &format!("- {}", finding), body_width);
    }

    lines.push(PdfLine::blank());
    lines.push(PdfLine::new(LineStyle::Heading, "IMPRESSION"));
    lines.push(PdfLine::new(LineStyle::Body, format!("Classification: {}", view.classification)));
    lines.push(PdfLine::new(LineStyle::Body, format!("Confidence Level: {}", view.confidence)));

    lines.push(PdfLine::blank());
    lines.push(PdfLine::new(LineStyle::Heading, "DETAILED REPORT"));
    push_wrapped(&mut lines, LineStyle::Body, &view.narrative, body_width);

    lines.push(PdfLine::blank());
    lines.push(PdfLine::new(LineStyle::Heading, "RECOMMENDATIONS"));
    for (i, rec) in view.recommendations.iter().enumerate() {
        push_wrapped(&mut lines, LineStyle::Body, &format!("{}. {}", i + 1, rec), body_width);
    }

    if let Some(disclaimer) = view.disclaimer.as_deref().filter(|d| !d.is_empty()) {
        lines.push(PdfLine::blank());
        let small_width = layout.chars_per_line(LineStyle::Small);
        push_wrapped(&mut lines, LineStyle::Small, &format!("DISCLAIMER: {}", disclaimer), small_width);
    }

    lines
}

fn push_wrapped(lines: &mut Vec<PdfLine>, style: LineStyle, text: &str, width: usize) {
    for wrapped in wrap_text(text, width) {
        lines.push(PdfLine::new(style, wrapped));
    }
}

/// 単語単位の折り返し。改行はそのまま段落区切りとして扱う。
/// 1単語が幅を超える場合は文字単位で分割する。
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(width);
                out.push(word.into_iter().collect());
                word = rest;
            }
            let current_len = current.chars().count();
            if current_len > 0 && current_len + 1 + word.len() > width {
                out.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.extend(word);
        }
        if !current.is_empty() {
            out.push(current);
        }
    }

    out
}

/// ダウンロード時のファイル名
pub fn report_file_name(patient_id: Option<&str>) -> String {
    let id = patient_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or("Scan");
    let safe: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("MedicalReport_{}.pdf", safe)
}
