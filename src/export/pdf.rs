//! レポートPDF生成（printpdf）
//!
//! 1ページ目の見出しの下にスキャン画像を置き、その後にレポート本文を流し込む。

use crate::error::{MedicalCardError, Result};
use ::image::codecs::jpeg::JpegEncoder;
use ::image::imageops::FilterType;
use ::image::DynamicImage;
use medical_card_common::export::pdf_core::{
    build_report_lines, LineStyle, PdfExportSettings, PdfLayoutCore, PdfLine, INCH_TO_PT,
};
use medical_card_common::{ReportView, SelectedFile};
use printpdf::*;
use std::path::Path;
use tracing::{debug, warn};

/// 画像欄の上下の余白（pt）
const IMAGE_GAP_PT: f32 = 8.0;

/// 見出し2行（タイトル・サブタイトル）の後に画像を置く
const HEADER_LINES: usize = 2;

/// 埋め込み用に縮小・再エンコードした画像
struct PreparedImage {
    jpeg: Vec<u8>,
    width_pt: f32,
    height_pt: f32,
    dpi: f32,
}

pub fn generate_report_pdf(
    view: &ReportView,
    scan: Option<&SelectedFile>,
    output_path: &Path,
    settings: &PdfExportSettings,
) -> Result<()> {
    let bytes = render_report_pdf(view, scan, settings)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, bytes)?;
    Ok(())
}

/// PDFのバイト列を生成
pub fn render_report_pdf(
    view: &ReportView,
    scan: Option<&SelectedFile>,
    settings: &PdfExportSettings,
) -> Result<Vec<u8>> {
    let layout = PdfLayoutCore::from_settings(settings);
    let lines = build_report_lines(view, &layout);

    let title = if view.patient_id.is_empty() {
        "Medical Report".to_string()
    } else {
        format!("Medical Report {}", view.patient_id)
    };
    let mut doc = PdfDocument::new(&title);
    let mut warnings = Vec::new();

    // 画像が読めなくてもレポート本文は出力する
    let image = scan.and_then(|file| match prepare_image(file, &layout, settings) {
        Ok(prepared) => Some(prepared),
        Err(err) => {
            warn!(file = %file.name, error = %err, "scan image skipped in PDF");
            None
        }
    });

    let mut image_op = None;
    let reserved = match &image {
        Some(prepared) => {
            let raw = RawImage::decode_from_bytes(&prepared.jpeg, &mut warnings)
                .map_err(|e| MedicalCardError::PdfGeneration(format!("画像埋め込みエラー: {}", e)))?;
            let id = doc.add_image(&raw);
            image_op = Some((id, prepared));
            prepared.height_pt + IMAGE_GAP_PT * 2.0
        }
        None => 0.0,
    };

    let pages = layout.paginate(&lines, reserved);
    debug!(pages = pages.len(), lines = lines.len(), "laying out report PDF");

    let pdf_pages: Vec<PdfPage> = pages
        .iter()
        .enumerate()
        .map(|(index, page_lines)| {
            let image_here = if index == 0 { image_op.as_ref() } else { None };
            let ops = page_ops(page_lines, &layout, image_here);
            PdfPage::new(
                Mm::from(Pt(layout.page_width_pt)),
                Mm::from(Pt(layout.page_height_pt)),
                ops,
            )
        })
        .collect();

    let bytes = doc
        .with_pages(pdf_pages)
        .save(&PdfSaveOptions::default(), &mut warnings);

    if !warnings.is_empty() {
        debug!(count = warnings.len(), "printpdf reported warnings");
    }
    Ok(bytes)
}

fn page_ops(
    lines: &[&PdfLine],
    layout: &PdfLayoutCore,
    image: Option<&(XObjectId, &PreparedImage)>,
) -> Vec<Op> {
    let mut ops = Vec::new();
    let mut y = layout.top_y_pt();

    for (index, line) in lines.iter().enumerate() {
        if index == HEADER_LINES {
            if let Some((id, prepared)) = image {
                y -= IMAGE_GAP_PT + prepared.height_pt;
                ops.push(Op::UseXobject {
                    id: id.clone(),
                    transform: XObjectTransform {
                        translate_x: Some(Pt(layout.margin_pt)),
                        translate_y: Some(Pt(y)),
                        dpi: Some(prepared.dpi),
                        ..Default::default()
                    },
                });
                y -= IMAGE_GAP_PT;
            }
        }

        y -= line.style.line_height_pt();
        if line.style == LineStyle::Blank || line.text.is_empty() {
            continue;
        }

        let font = if line.style.is_bold() {
            BuiltinFont::HelveticaBold
        } else {
            BuiltinFont::Helvetica
        };
        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(layout.margin_pt),
                y: Pt(y),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(line.style.font_size_pt()),
            font,
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(pdf_safe_text(&line.text))],
            font,
        });
        ops.push(Op::EndTextSection);
    }

    ops
}

/// 画像を表示サイズ × ラスタ倍率に縮小してJPEG化する
fn prepare_image(
    file: &SelectedFile,
    layout: &PdfLayoutCore,
    settings: &PdfExportSettings,
) -> Result<PreparedImage> {
    let img = ::image::load_from_memory(&file.bytes)
        .map_err(|e| MedicalCardError::ImageLoad(format!("{}: {}", file.name, e)))?;

    let (width_pt, height_pt) = layout.fit_image(img.width(), img.height());
    if width_pt <= 0.0 || height_pt <= 0.0 {
        return Err(MedicalCardError::ImageLoad(format!("{}: 画像サイズが0です", file.name)));
    }

    let target_w = (width_pt * settings.raster_scale).round().max(1.0) as u32;
    let target_h = (height_pt * settings.raster_scale).round().max(1.0) as u32;
    let img = if img.width() > target_w || img.height() > target_h {
        img.resize(target_w, target_h, FilterType::Lanczos3)
    } else {
        img
    };

    // 実際のピクセル幅から表示サイズが width_pt になるDPIを求める
    let dpi = img.width() as f32 / (width_pt / INCH_TO_PT);

    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, settings.jpeg_quality()))
        .map_err(|e| MedicalCardError::ImageLoad(format!("JPEGエンコードエラー: {}", e)))?;

    Ok(PreparedImage {
        jpeg,
        width_pt,
        height_pt,
        dpi,
    })
}

/// 組み込みフォント（WinAnsi）で表示できない文字を置き換える
fn pdf_safe_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '•' => '-',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            c if (c as u32) < 0x100 && !c.is_control() => c,
            _ => '?',
        })
        .collect()
}
