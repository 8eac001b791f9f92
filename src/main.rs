use clap::Parser;
use coax_phase_sim::app::commands::{execute, render};
use coax_phase_sim::utils::{logger, validation::Validate};
use coax_phase_sim::{load_catalog, CliConfig};
use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting coax-phase-sim {}", config.command.name());
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let result = load_catalog(config.catalog.as_deref())
        .and_then(|catalog| execute(&config.command, &catalog))
        .and_then(|output| render(&output, config.command.name(), config.format));

    match result {
        Ok(bytes) => match &config.output {
            Some(path) => {
                std::fs::write(path, &bytes)?;
                tracing::info!("📁 Output saved to: {}", path);
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&bytes)?;
                stdout.flush()?;
            }
        },
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                config.command.name(),
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
