use crate::config::{ExportConfig, ExportFormat};
use crate::core::answers::{QUESTION_COUNT, QUESTIONS};
use crate::core::report::{self, JsonReport};
use crate::core::score::{Assessment, Scorer};
use crate::core::session::{Phase, Session};
use crate::exporters::{self, ExportDocument};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

static SET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:q|set\s+)?(\d+)\s*(?:[=:]\s*|\s+)(\d+)$").expect("valid set regex")
});
static UNSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^unset\s+q?(\d+)$").expect("valid unset regex"));
static EXPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^export\s+(\S+)(?:\s+(\S+))?$").expect("valid export regex")
});

const HELP: &str = "\
commands:
  <q> <rating>       rate question q (also q3=4, set 3 4)
  unset <q>          clear the rating of question q
  show               list current answers
  submit             score the answers
  restart            clear all answers and start over
  export <path> [fmt] write the result (markdown, text, json)
  help               show this help
  quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { index: usize, rating: u8 },
    Unset { index: usize },
    Show,
    Submit,
    Restart,
    Export {
        path: PathBuf,
        format: Option<ExportFormat>,
    },
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "show" | "status" => return Ok(Command::Show),
        "submit" | "s" => return Ok(Command::Submit),
        "restart" | "r" => return Ok(Command::Restart),
        "help" | "h" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        _ => {}
    }

    if let Some(caps) = SET_RE.captures(line) {
        let index = parse_question(&caps[1])?;
        let rating = caps[2]
            .parse::<u8>()
            .map_err(|_| format!("'{}' is not a rating", &caps[2]))?;
        return Ok(Command::Set { index, rating });
    }

    if let Some(caps) = UNSET_RE.captures(line) {
        return Ok(Command::Unset {
            index: parse_question(&caps[1])?,
        });
    }

    if let Some(caps) = EXPORT_RE.captures(line) {
        let format = match caps.get(2) {
            Some(raw) => Some(
                ExportFormat::parse(raw.as_str())
                    .ok_or_else(|| format!("unknown format '{}'", raw.as_str()))?,
            ),
            None => None,
        };
        return Ok(Command::Export {
            path: PathBuf::from(&caps[1]),
            format,
        });
    }

    Err(format!("unrecognized input '{line}' (type help)"))
}

/// Maps a 1-based question number onto a slot index.
fn parse_question(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(number) if (1..=QUESTION_COUNT).contains(&number) => Ok(number - 1),
        _ => Err(format!(
            "question {raw} does not exist (expected 1..={QUESTION_COUNT})"
        )),
    }
}

pub struct ReplOptions<'a> {
    pub json: bool,
    pub export_path: Option<PathBuf>,
    pub export_format: Option<ExportFormat>,
    pub export_config: &'a ExportConfig,
}

/// Drives a session from line input until `quit` or end of input. Returns the
/// last result shown, if any.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    input: R,
    out: &mut W,
    options: &ReplOptions<'_>,
) -> Result<Option<Assessment>> {
    let scorer = session.scorer();
    write!(out, "{}", report::render_questions(scorer.scale()))?;
    writeln!(out, "type help for commands")?;

    let mut last_result = None;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "error: {message}")?;
                continue;
            }
        };

        match command {
            Command::Set { index, rating } => match session.set_answer(index, rating) {
                Ok(()) => {
                    let answered = QUESTION_COUNT - session.answers().unanswered().len();
                    writeln!(
                        out,
                        "q{} = {} ({}/{} answered)",
                        index + 1,
                        rating,
                        answered,
                        QUESTION_COUNT
                    )?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Command::Unset { index } => match session.clear_answer(index) {
                Ok(()) => writeln!(out, "q{} cleared", index + 1)?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Command::Show => write_status(out, session)?,
            Command::Submit => match session.submit() {
                Ok(result) => {
                    let result = result.clone();
                    write_result(out, &result, scorer, options.json)?;
                    if let Some(path) = &options.export_path {
                        export_result(out, &result, scorer, options, path, options.export_format)?;
                    }
                    last_result = Some(result);
                }
                Err(err) => writeln!(out, "rejected: {err}")?,
            },
            Command::Restart => {
                session.restart();
                writeln!(out, "answers cleared")?;
                write!(out, "{}", report::render_questions(scorer.scale()))?;
            }
            Command::Export { path, format } => match session.result() {
                Ok(result) => {
                    let result = result.clone();
                    export_result(out, &result, scorer, options, &path, format)?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }

    Ok(last_result)
}

fn write_status<W: Write>(out: &mut W, session: &Session<'_>) -> Result<()> {
    for (index, question) in QUESTIONS.iter().enumerate() {
        let rating = session
            .answers()
            .get(index)
            .map_or_else(|| "-".to_string(), |rating| rating.to_string());
        writeln!(out, "{}. [{}] {}", index + 1, rating, question)?;
    }
    let phase = match session.phase() {
        Phase::Answering => "answering",
        Phase::ResultShown => "result shown (restart to change answers)",
    };
    writeln!(out, "state: {phase}")?;
    Ok(())
}

fn write_result<W: Write>(out: &mut W, result: &Assessment, scorer: &Scorer, json: bool) -> Result<()> {
    if json {
        let report = JsonReport::new(result, scorer);
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(out, "{}", report::render_human(result, scorer))?;
    }
    Ok(())
}

/// Export failures are reported and leave the session as it was.
fn export_result<W: Write>(
    out: &mut W,
    result: &Assessment,
    scorer: &Scorer,
    options: &ReplOptions<'_>,
    path: &Path,
    format: Option<ExportFormat>,
) -> Result<()> {
    let doc = ExportDocument {
        assessment: result,
        max_score: scorer.score_range().1,
        config: options.export_config,
    };
    let format = exporters::resolve_format(format, path, options.export_config);

    match exporters::export_to_file(&doc, format, path) {
        Ok(written) => writeln!(out, "exported {}", written.display())?,
        Err(err) => {
            warn!(error = %format!("{err:#}"), "export failed");
            writeln!(out, "export failed: {err:#}")?;
        }
    }
    Ok(())
}
