mod common;
mod logic;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use common::split_csv;
use logic::{
    FunnelWalker, LogicTester, SCENARIO_NAMES, ScenarioResult, get_scenario, list_scenarios,
    resolve_seed_inputs,
};
use sorte_funnel::{BundledConfig, ConfigSource, FunnelConfig};

#[derive(Debug, Parser)]
#[command(name = "sorte-tester", version)]
#[command(about = "Headless QA driver for the Sorte Chinelista funnel")]
struct Args {
    /// Scenarios to run (comma-separated, `all` for every scenario)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Funnel configuration JSON to test instead of the bundled one
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let cfg = load_config(&args)?;
    let tester = LogicTester::new(FunnelWalker::new(cfg, args.verbose), args.verbose);

    let results = run_scenarios(&args, &scenarios, &seeds, &tester)?;
    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🩴 Sorte Funnel Tester".bright_cyan().bold());
    println!("{}", "======================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for name in SCENARIO_NAMES {
            if !scenarios.iter().any(|s| s == name) {
                scenarios.push(name.to_string());
            }
        }
    }
    scenarios
}

fn load_config(args: &Args) -> Result<FunnelConfig> {
    match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            FunnelConfig::from_json(&json)
                .with_context(|| format!("invalid funnel config in {}", path.display()))
        }
        None => BundledConfig
            .load_funnel_config()
            .context("bundled funnel config is invalid"),
    }
}

fn run_scenarios(
    args: &Args,
    scenarios: &[String],
    seeds: &[u64],
    tester: &LogicTester,
) -> Result<Vec<ScenarioResult>> {
    println!("{}", "🧠 Running Funnel Scenarios".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let mut results = Vec::new();
    for scenario_name in scenarios {
        let Some(scenario) = get_scenario(scenario_name) else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
            continue;
        };
        results.extend(tester.run_scenario(&scenario, seeds, args.iterations));
    }
    if results.is_empty() && !scenarios.is_empty() {
        bail!("none of the requested scenarios exist: {}", scenarios.join(", "));
    }
    Ok(results)
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(output_target.writer(), results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Sorte Funnel QA Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(output_target.writer(), results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    output_target.writer(),
                    results,
                    start_time.elapsed(),
                )?;
            }
            let duration = start_time.elapsed();
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            iterations: 1,
            report: "json".to_string(),
            verbose: false,
            output: None,
            config: None,
        }
    }

    #[test]
    fn all_expands_without_duplicates() {
        let scenarios = expand_scenarios("smoke,all");
        assert_eq!(scenarios.len(), SCENARIO_NAMES.len());
        assert_eq!(scenarios[0], "smoke");
        assert!(scenarios.iter().any(|s| s == "fallbacks"));
    }

    #[test]
    fn plain_list_is_kept_in_order() {
        assert_eq!(
            expand_scenarios("fallbacks, smoke"),
            vec!["fallbacks".to_string(), "smoke".to_string()]
        );
    }

    #[test]
    fn unknown_only_scenarios_fail() {
        let args = base_args();
        let tester = LogicTester::new(FunnelWalker::new(FunnelConfig::default(), false), false);
        let err = run_scenarios(&args, &["nope".to_string()], &[1], &tester).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn config_file_overrides_bundled() {
        let mut cfg = FunnelConfig::builtin();
        cfg.fallback_bonus = "Brinde".into();
        let path = std::env::temp_dir().join(format!("sorte-cfg-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&cfg).unwrap()).unwrap();

        let mut args = base_args();
        args.config = Some(path.clone());
        assert_eq!(load_config(&args).unwrap().fallback_bonus, "Brinde");
        let _ = std::fs::remove_file(path);

        assert_eq!(load_config(&base_args()).unwrap(), FunnelConfig::default());
    }

    #[test]
    fn report_goes_to_output_file() {
        let path = std::env::temp_dir().join(format!("sorte-report-{}.json", std::process::id()));
        let mut args = base_args();
        args.output = Some(path.clone());
        let result = ScenarioResult {
            scenario_name: "smoke".into(),
            seed: 1,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: std::time::Duration::ZERO,
        };
        write_reports(&args, &[result], Instant::now()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(path);
        assert!(content.contains("\"scenario_name\": \"smoke\""));
    }
}
