use clap::Parser;
use disease_predict::app::{batch, form};
use disease_predict::utils::error::{ErrorSeverity, PredictError};
use disease_predict::utils::logger;
use disease_predict::utils::validation::{self, Validate};
use disease_predict::{CliConfig, Command, ConfigProvider, ModelRegistry, RawInputSet};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    match &config.command {
        Command::Serve { .. } => logger::init_server_logger(&settings.log_level, settings.log_json),
        _ => logger::init_cli_logger(config.verbose),
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 模型只在啟動時載入一次
    let registry = ModelRegistry::load(&settings);

    match config.command {
        Command::Predict { disease, values } => {
            let raw = RawInputSet::new(values);
            match registry.diagnose(disease, &raw) {
                Ok(diagnosis) => println!("{}", diagnosis.label),
                Err(e) => fail(&e),
            }
        }
        Command::Form { disease } => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut session =
                form::FormSession::new(&registry, disease, stdin.lock(), stdout.lock());
            if let Err(e) = session.run() {
                fail(&e);
            }
        }
        Command::Batch {
            disease,
            input,
            output,
        } => {
            let output_path = output.as_deref().map(Path::new);
            match batch::run_batch_file(&registry, disease, Path::new(&input), output_path) {
                Ok(summary) => {
                    eprintln!(
                        "✅ {} rows processed ({} positive, {} negative, {} failed)",
                        summary.total, summary.positive, summary.negative, summary.failed
                    );
                    if let Some(path) = output {
                        eprintln!("📁 Output saved to: {}", path);
                    }
                }
                Err(e) => fail(&e),
            }
        }
        Command::Models => print_models(&registry, &settings),
        Command::Serve { .. } => run_server(registry, &settings).await?,
    }

    Ok(())
}

#[cfg(feature = "server")]
async fn run_server(registry: ModelRegistry, settings: &impl ConfigProvider) -> anyhow::Result<()> {
    use anyhow::Context;

    let addr = validation::validate_socket_addr("server.bind", settings.bind_address())?;
    disease_predict::app::server::serve(std::sync::Arc::new(registry), addr)
        .await
        .context("HTTP server failed")
}

#[cfg(not(feature = "server"))]
async fn run_server(_registry: ModelRegistry, _settings: &impl ConfigProvider) -> anyhow::Result<()> {
    anyhow::bail!("this binary was built without the `server` feature")
}

fn print_models(registry: &ModelRegistry, settings: &impl ConfigProvider) {
    for status in registry.status() {
        let disease = status.disease;
        let state = if status.available {
            "✅ loaded".to_string()
        } else {
            format!("❌ unavailable ({})", status.reason.unwrap_or_default())
        };
        println!("{} [{}] {}", status.title, disease.slug(), state);
        println!("  file: {}", settings.model_path(disease).display());
        for field in disease.fields() {
            println!("  - {}", field.label);
        }
    }
}

fn fail(e: &PredictError) -> ! {
    tracing::error!(
        "❌ Prediction failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 1,      // 輸入錯誤
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 3,     // 模型錯誤
        ErrorSeverity::Critical => 4, // 系統錯誤
    };
    std::process::exit(exit_code);
}
