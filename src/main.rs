use anyhow::Context;
use clap::Parser;
use medical_card::api::HttpScanApi;
use medical_card::cli::{Cli, Commands};
use medical_card::config::Config;
use medical_card::controller::{local_date_string, Command, Controller, Outcome};
use medical_card::presenter::{ConsolePresenter, HealthStatus};
use medical_card::{export, intake, interactive};
use medical_card_common::ReportData;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load()?;

    if let Commands::Config { set_api_url, show } = &cli.command {
        if let Some(url) = set_api_url {
            config.set_api_base_url(url.clone())?;
            println!("✔ APIのURLを設定しました");
        }
        if *show {
            println!("設定:");
            println!("  API URL: {}", config.api_base_url);
            println!(
                "  タイムアウト: {}",
                config
                    .request_timeout_seconds
                    .map(|s| format!("{}秒", s))
                    .unwrap_or_else(|| "なし".into())
            );
            println!("  出力先: {}", config.output_dir().display());
        }
        return Ok(());
    }

    let base_url = config.resolve_api_base_url(cli.api_url.as_deref())?;
    tracing::debug!(%base_url, "using analysis service");
    let api = HttpScanApi::new(base_url, config.request_timeout())?;
    let mut controller = Controller::new(api, ConsolePresenter::new());

    match cli.command {
        Commands::Health => {
            let outcome = controller.dispatch(Command::CheckHealth).await?;
            if outcome != Outcome::Health(HealthStatus::Online) {
                std::process::exit(1);
            }
        }

        Commands::Analyze { file, scan_type, output } => {
            println!("🩺 medical-card - スキャン解析\n");
            let selected = intake::load_file(&file)?;
            controller
                .dispatch(Command::SelectScanType(scan_type.unwrap_or_default()))
                .await?;
            controller.dispatch(Command::SelectFile(selected)).await?;

            if let (Some(path), Some(analysis)) = (output, controller.session().analysis()) {
                let json = serde_json::to_string_pretty(analysis)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("write {}", path.display()))?;
                println!("✔ 結果を保存: {}", path.display());
            }
        }

        Commands::Report { file, scan_type, output_dir, json, no_pdf } => {
            println!("🩺 medical-card - レポート生成\n");
            let selected = intake::load_file(&file)?;
            controller
                .dispatch(Command::SelectScanType(scan_type.unwrap_or_default()))
                .await?;

            println!("[1/3] 解析中...");
            controller.dispatch(Command::SelectFile(selected)).await?;

            println!("\n[2/3] レポート生成中...");
            controller.dispatch(Command::GenerateReport).await?;

            if let (Some(path), Some(report)) = (json, controller.session().report()) {
                let content = serde_json::to_string_pretty(report)?;
                std::fs::write(&path, content)
                    .with_context(|| format!("write {}", path.display()))?;
                println!("✔ レポートJSONを保存: {}", path.display());
            }

            if !no_pdf {
                println!("\n[3/3] PDF出力中...");
                let output_dir = output_dir.unwrap_or_else(|| config.output_dir());
                if let Outcome::Exported(path) =
                    controller.dispatch(Command::ExportPdf { output_dir }).await?
                {
                    println!("✔ PDF出力: {}", path.display());
                }
            }

            println!("\n✅ 完了");
        }

        Commands::Export { input, image, output } => {
            println!("📄 medical-card - PDFエクスポート\n");
            let content = std::fs::read_to_string(&input)
                .with_context(|| format!("read {}", input.display()))?;
            let report: ReportData = serde_json::from_str(&content)
                .with_context(|| format!("parse {}", input.display()))?;

            let scan = image
                .as_deref()
                .map(load_image)
                .transpose()?;
            let output = output.unwrap_or_else(|| config.output_dir());
            export::export_report(&report, scan.as_ref(), &output, &local_date_string())?;
        }

        Commands::Session => {
            let output_dir = config.output_dir();
            interactive::run_session(&mut controller, &output_dir).await?;
        }

        Commands::Config { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn load_image(path: &Path) -> anyhow::Result<medical_card_common::SelectedFile> {
    let file = intake::load_file(path)?;
    Ok(file.accept()?)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}
