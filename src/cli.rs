use clap::{Parser, Subcommand};
use medical_card_common::ScanType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "medical-card")]
#[command(about = "Smart Medical Card - スキャン画像解析・レポート出力クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 解析サービスのベースURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// サービスの稼働状況を確認
    Health,

    /// スキャン画像を解析して結果を表示
    Analyze {
        /// スキャン画像ファイル
        #[arg(required = true)]
        file: PathBuf,

        /// スキャン種別 (xray/ct/mri/breast_ultrasound/pcos_ultrasound、省略時は自動判定)
        #[arg(short, long)]
        scan_type: Option<ScanType>,

        /// 解析結果JSONの保存先
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 解析からレポート生成・PDF出力まで一括実行
    Report {
        /// スキャン画像ファイル
        #[arg(required = true)]
        file: PathBuf,

        /// スキャン種別
        #[arg(short, long)]
        scan_type: Option<ScanType>,

        /// PDFの出力ディレクトリ（省略時は設定値またはカレント）
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// レポートJSONの保存先
        #[arg(long)]
        json: Option<PathBuf>,

        /// PDFを出力しない
        #[arg(long)]
        no_pdf: bool,
    },

    /// 保存済みレポートJSONからPDFを生成
    Export {
        /// レポートJSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// PDFに載せるスキャン画像
        #[arg(long)]
        image: Option<PathBuf>,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 対話モード（アップロード → 結果 → レポート）
    Session,

    /// 設定を表示/編集
    Config {
        /// 解析サービスのURLを保存
        #[arg(long)]
        set_api_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_with_scan_type() {
        let cli = Cli::try_parse_from([
            "medical-card",
            "analyze",
            "scan.png",
            "--scan-type",
            "breast_ultrasound",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { file, scan_type, output } => {
                assert_eq!(file, PathBuf::from("scan.png"));
                assert_eq!(scan_type, Some(ScanType::BreastUltrasound));
                assert!(output.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_default_scan_type_is_auto() {
        let cli = Cli::try_parse_from(["medical-card", "report", "scan.png", "--no-pdf"]).unwrap();
        match cli.command {
            Commands::Report { scan_type, no_pdf, .. } => {
                assert_eq!(scan_type.unwrap_or_default(), ScanType::Auto);
                assert!(no_pdf);
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn test_global_api_url() {
        let cli = Cli::try_parse_from(["medical-card", "health", "--api-url", "http://10.0.0.5:8000"])
            .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.5:8000"));
    }
}
