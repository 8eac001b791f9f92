use clap::Parser;
use coax_phase_sim::utils::{logger, validation::Validate};
use coax_phase_sim::{load_catalog, ScenarioConfig, ScenarioRunner};

#[derive(Parser)]
#[command(name = "scenario-sim")]
#[command(about = "Run a batch of coax phase and environment checks from a TOML scenario")]
struct Args {
    /// Path to TOML scenario file
    #[arg(short, long, default_value = "scenario.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the output directory from the scenario
    #[arg(long)]
    output_path: Option<String>,

    /// Dry run - list the steps without computing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting scenario runner");
    tracing::info!("📁 Loading scenario from: {}", args.config);

    // 載入 TOML 情境
    let mut config = match ScenarioConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load scenario file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(path) = &args.output_path {
        config.output.output_path = path.clone();
        tracing::info!("🔧 Output path overridden to: {}", path);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Scenario validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_scenario_summary(&config, &args);

    let catalog = match load_catalog(config.scenario.catalog.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let runner = ScenarioRunner::new(config, catalog);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        println!("🔍 Dry Run Analysis:");
        for (i, step) in runner.plan().iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
        return Ok(());
    }

    match runner.run() {
        Ok(summary) => {
            println!("✅ Scenario '{}' completed", summary.scenario);
            if let Some(dphi) = summary.marker_phase_deg {
                println!("  ΔPhase marker: {:.2}°", dphi);
            }
            if let Some(dphi) = summary.strain_phase_deg {
                println!("  Strain model Δφ: {:.4}°", dphi);
            }
            if let Some(dphi) = summary.routed_phase_deg {
                println!("  Routed model Δφ: {:.4}°", dphi);
            }
            if let Some(report) = &summary.mission {
                println!(
                    "  Mission {} @ {:.0} ft: {}",
                    report.cable, report.altitude_ft, report.status
                );
            }
            if let Some(failures) = summary.profile_failures {
                println!("  Altitude profile failures: {}", failures);
            }
            for file in &summary.files {
                println!("📁 {}", file);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Scenario failed: {} (Category: {:?}, Severity: {:?})",
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

fn display_scenario_summary(config: &ScenarioConfig, args: &Args) {
    println!("📋 Scenario Summary:");
    println!("  Name: {}", config.scenario.name);
    if let Some(description) = &config.scenario.description {
        println!("  Description: {}", description);
    }
    println!(
        "  Catalog: {}",
        config.scenario.catalog.as_deref().unwrap_or("built-in")
    );
    println!("  Steps: {}", config.step_count());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output.output_formats.join(", "));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
