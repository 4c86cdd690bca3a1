// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use alitheia_workbench::config::{self, Config, DEFAULT_REAPER_PERIOD_MS};
use alitheia_workbench::error::Result;
use alitheia_workbench::fixtures::{Case, CaseCatalog, RuleOutcome};
use alitheia_workbench::notifications::{spawn_reaper, NotificationStore, ToastSpec, Variant};
use alitheia_workbench::telemetry::{ComponentTracker, Props, TelemetryCollector, Tracker};
use serde_json::json;
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
alitheia-demo - drive the underwriting workbench core against fixture data

USAGE:
  alitheia-demo [OPTIONS] <COMMAND>

COMMANDS:
  cases          List fixture cases
  case <ID>      Show one case with assessments and rule decisions
  session        Run a scripted review session

OPTIONS:
  --config PATH   Read settings from PATH instead of the user config directory
  --fixture PATH  Load cases from PATH instead of the bundled fixture
  --export PATH   (session) Write the telemetry report to PATH
  -h, --help      Print this help
";

enum Command {
    Cases,
    Case(String),
    Session,
}

struct Args {
    config: Option<PathBuf>,
    fixture: Option<PathBuf>,
    export: Option<PathBuf>,
    command: Command,
}

fn parse_args() -> std::result::Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let config = args.opt_value_from_str("--config")?;
    let fixture = args.opt_value_from_str("--fixture")?;
    let export = args.opt_value_from_str("--export")?;

    let command = match args.subcommand()?.as_deref() {
        Some("cases") => Command::Cases,
        Some("case") => Command::Case(args.free_from_str()?),
        Some("session") => Command::Session,
        Some(other) => {
            return Err(pico_args::Error::ArgumentParsingFailed {
                cause: format!("unknown command '{other}'"),
            })
        }
        None => return Ok(None),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("warning: unused arguments left: {remaining:?}");
    }

    Ok(Some(Args {
        config,
        fixture,
        export,
        command,
    }))
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    let config = match &args.config {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);

    match run(args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "demo failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args, config: &Config) -> Result<()> {
    let catalog = match &args.fixture {
        Some(path) => CaseCatalog::load(path)?,
        None => CaseCatalog::builtin()?,
    };

    match args.command {
        Command::Cases => {
            for case in catalog.cases() {
                print_case_line(case);
            }
            Ok(())
        }
        Command::Case(id) => {
            match catalog.get(&id) {
                Some(case) => print_case_detail(case),
                None => println!("no case with id {id}"),
            }
            Ok(())
        }
        Command::Session => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            LocalSet::new().block_on(&runtime, session(&catalog, config, args.export))
        }
    }
}

fn print_case_line(case: &Case) {
    let risk = case
        .overall_risk()
        .map_or_else(|| "unassessed".to_string(), |level| level.to_string());
    println!(
        "{:<8} {:<18} {:<12} {:<10} {}",
        case.id, case.applicant.name, case.status, risk, case.policy.product
    );
}

fn print_case_detail(case: &Case) {
    print_case_line(case);
    println!(
        "  applicant: {}, {} ({})",
        case.applicant.name, case.applicant.age, case.applicant.occupation
    );
    println!(
        "  ehr: bmi {:.1}, bp {}, smoker {}, conditions [{}]",
        case.ehr.bmi,
        case.ehr.blood_pressure,
        case.ehr.smoker,
        case.ehr.conditions.join(", ")
    );
    for assessment in &case.assessments {
        println!(
            "  risk {:<15} {:>3} {:<9} {}",
            assessment.category, assessment.score, assessment.level, assessment.rationale
        );
    }
    for decision in &case.rule_decisions {
        println!(
            "  rule {:<9} {:<26} {:?} - {}",
            decision.rule_id, decision.rule_name, decision.outcome, decision.reason
        );
    }
}

fn case_props(case: &Case) -> Props {
    let mut props = Props::new();
    props.insert("case_id".into(), json!(case.id));
    props.insert("status".into(), json!(case.status));
    props.insert("overall_risk".into(), json!(case.overall_risk()));
    props
}

fn review_toast(case: &Case) -> ToastSpec {
    match case.worst_outcome() {
        Some(RuleOutcome::Decline) => ToastSpec::new()
            .title("Case declined")
            .description(format!("{} failed a decline rule", case.id))
            .variant(Variant::Destructive),
        Some(RuleOutcome::Refer) => ToastSpec::new()
            .title("Referred for senior review")
            .description(format!("{} needs a second opinion", case.id)),
        Some(RuleOutcome::Pass) => ToastSpec::new()
            .title("All rules passed")
            .description(case.id.clone())
            .variant(Variant::Success),
        None => ToastSpec::new()
            .title("Awaiting assessment")
            .description(case.id.clone()),
    }
}

async fn session(catalog: &CaseCatalog, config: &Config, export: Option<PathBuf>) -> Result<()> {
    let mut collector = TelemetryCollector::new(config.telemetry.buffer_capacity());
    let tracker = if config.telemetry.is_enabled() {
        Tracker::new(collector.sink())
    } else {
        Tracker::disabled()
    };

    let store = NotificationStore::from_config(&config.notifications);
    let period = Duration::from_millis(DEFAULT_REAPER_PERIOD_MS);
    let _reaper = spawn_reaper(&store, period);
    let _subscription = store.subscribe(|toasts| {
        for toast in toasts {
            tracing::info!(
                id = %toast.id(),
                title = toast.title().unwrap_or_default(),
                open = toast.is_open(),
                "toast"
            );
        }
    });

    let mut shell = ComponentTracker::mount(&tracker, "Shell");
    shell.render();

    let mut review = ComponentTracker::mount(&tracker, "CaseReview");
    for case in catalog.cases() {
        review.render();
        review.props(case_props(case));
        tracker.on_click("open_case", json!({ "case_id": case.id }));

        if case.rule_decisions.is_empty() {
            tracker.on_error(
                "rule_evaluation",
                format!("no rule decisions recorded for {}", case.id),
                json!({ "case_id": case.id }),
            );
        }

        let handle = store.notify(review_toast(case));
        print_case_line(case);
        handle.dismiss();
    }
    tracker.on_submit("close_workbench", serde_json::Value::Null);
    drop(review);
    drop(shell);

    println!(
        "waiting {} ms for {} dismissed toast(s) to clear",
        store.remove_delay().as_millis(),
        store.len()
    );
    tokio::time::sleep(store.remove_delay().as_duration() + period).await;
    println!("toasts remaining: {}", store.len());
    store.shutdown();

    collector.process_pending();
    let summary = collector.summary();
    println!(
        "telemetry: {} event(s), {} error(s), {} evicted",
        summary.events,
        summary.errors,
        collector.evicted()
    );
    for (category, count) in &summary.by_category {
        println!("  {category:<12} {count}");
    }

    if let Some(path) = export {
        let written = collector.export_to_file(&path)?;
        println!("report written to {}", written.display());
    }
    Ok(())
}
