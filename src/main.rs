mod cli;
mod config;
mod core;
mod exporters;
mod repl;
mod utils;

use anyhow::Result;
use clap::Parser;
use crate::cli::{Cli, Commands, ExportArgs, OutputArgs, ScoreArgs, TakeArgs};
use crate::config::Config;
use crate::core::error::QuizError;
use crate::core::report::{self, JsonReport, LadderReport};
use crate::core::score::{Assessment, Scorer};
use crate::core::session::Session;
use crate::exporters::ExportDocument;
use serde_json::json;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Take(args) => run_take(args),
        Commands::Score(args) => run_score(args),
        Commands::Questions(args) => {
            let (cfg, scorer) = load_scorer(&args)?;
            if wants_json(&args, &cfg) {
                let body = json!({
                    "scale": scorer.scale(),
                    "questions": core::answers::QUESTIONS,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print!("{}", report::render_questions(scorer.scale()));
            }
            Ok(0)
        }
        Commands::Bands(args) => {
            let (cfg, scorer) = load_scorer(&args)?;
            let ladder = LadderReport::from(&scorer);
            if wants_json(&args, &cfg) {
                println!("{}", serde_json::to_string_pretty(&ladder)?);
            } else {
                report::print_ladder(&ladder);
            }
            Ok(0)
        }
        Commands::Init => {
            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_scorer(args: &OutputArgs) -> Result<(Config, Scorer)> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.config.as_deref(), &cwd)?;
    let scorer = core::build_scorer(&loaded.config)?;
    Ok((loaded.config, scorer))
}

/// `--json` on the command line or `[general] json = true` in the config.
fn wants_json(args: &OutputArgs, cfg: &Config) -> bool {
    args.json || cfg.general.json
}

fn run_take(args: TakeArgs) -> Result<i32> {
    let (cfg, scorer) = load_scorer(&args.output)?;
    let options = repl::ReplOptions {
        json: wants_json(&args.output, &cfg),
        export_path: args.export.export,
        export_format: args.export.format,
        export_config: &cfg.export,
    };

    let mut session = Session::new(&scorer);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    repl::run(&mut session, stdin.lock(), &mut stdout, &options)?;
    Ok(0)
}

fn run_score(args: ScoreArgs) -> Result<i32> {
    let (cfg, scorer) = load_scorer(&args.output)?;
    score_ratings(&args, &cfg, &scorer)
}

/// Scores the given ratings and exports on request. Returns the exit code:
/// 1 when an answer is missing, 2 when the export fails.
fn score_ratings(args: &ScoreArgs, cfg: &Config, scorer: &Scorer) -> Result<i32> {
    let answers = core::parse_ratings(scorer, &args.ratings)?;

    if !scorer.validate_complete(&answers) {
        let err = QuizError::Incomplete {
            unanswered: answers.unanswered(),
        };
        eprintln!("rejected: {err}");
        return Ok(1);
    }

    let assessment = scorer.assess(&answers)?;
    if wants_json(&args.output, cfg) {
        let json_report = JsonReport::new(&assessment, scorer);
        println!("{}", serde_json::to_string_pretty(&json_report)?);
    } else {
        report::print_human(&assessment, scorer);
    }

    export_if_requested(&args.export, &assessment, scorer, cfg)
}

fn export_if_requested(
    args: &ExportArgs,
    assessment: &Assessment,
    scorer: &Scorer,
    cfg: &Config,
) -> Result<i32> {
    let Some(path) = &args.export else {
        return Ok(0);
    };

    let doc = ExportDocument {
        assessment,
        max_score: scorer.score_range().1,
        config: &cfg.export,
    };
    let format = exporters::resolve_format(args.format, path, &cfg.export);
    match exporters::export_to_file(&doc, format, path) {
        Ok(written) => {
            eprintln!("exported {}", written.display());
            Ok(0)
        }
        Err(err) => {
            eprintln!("export failed: {err:#}");
            Ok(2)
        }
    }
}
