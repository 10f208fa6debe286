use anyhow::Context;
use clap::Parser;
use planner_bench::config::cli::{Command, ReportArgs, RunArgs};
use planner_bench::core::report::{self, Report};
use planner_bench::domain::model::SolverKind;
use planner_bench::utils::error::ErrorSeverity;
use planner_bench::utils::{logger, validation::Validate};
use planner_bench::{BenchConfig, BenchEngine, BenchError, BenchmarkDriver, CliConfig};
use planner_bench::{LocalStorage, ProcessInvoker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Report(args) => report(args).await,
    }
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    tracing::info!("📁 Loading configuration from: {}", args.config.display());

    let mut config = match BenchConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "❌ Failed to load config file '{}': {}",
                args.config.display(),
                e
            );
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(output) = args.output {
        tracing::info!("🔧 Output path overridden to: {}", output.display());
        config.output_path = output;
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, args.dry_run);

    let invoker = ProcessInvoker::from_config(&config);
    let driver = BenchmarkDriver::new(config, invoker);
    let engine = BenchEngine::new(driver, LocalStorage::current_dir());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No solver will be launched");
        match engine.plan() {
            Ok(corpora) => {
                for corpus in corpora {
                    println!(
                        "{} ({})",
                        corpus.domain.name,
                        corpus.domain.description_file.display()
                    );
                    for problem in corpus.problems {
                        println!("  {}", problem.path.display());
                    }
                }
            }
            Err(e) => exit_with(&e),
        }
        return Ok(());
    }

    match engine.run().await {
        Ok(pass) => {
            println!("✅ Benchmark completed: {} row(s)", pass.table.len());
            println!("📁 Output saved to: {}", engine.output_path().display());
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

async fn report(args: ReportArgs) -> anyhow::Result<()> {
    let storage = LocalStorage::current_dir();
    let records = report::read_results_from(&storage, &args.input)
        .await
        .with_context(|| format!("reading {}", args.input.display()))?;
    let report = Report::from_records(args.input.display().to_string(), records);

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
        for summary in &report.domains {
            println!("{}: {}", summary.domain, summary.charts.join(", "));
        }
    }
    Ok(())
}

fn display_config_summary(config: &BenchConfig, dry_run: bool) {
    println!("📋 Configuration Summary:");
    println!("  Benchmarks: {}", config.benchmarks_dir.display());
    println!("  Domains: {}", config.domains.join(", "));
    println!("  Sample size: {}", config.sample_size);
    for solver in SolverKind::ALL {
        if let Some(spec) = config.solver(solver) {
            println!("  {}: {} {}", solver, spec.program, spec.args.join(" "));
        }
    }
    println!("  Output: {}", config.output_path.display());

    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn exit_with(e: &BenchError) -> ! {
    tracing::error!(
        "❌ Benchmark failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
