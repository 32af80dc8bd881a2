use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::{info, warn};

use intent_parser::TokenStream;
use inventory_registry::Workcell;
use motion_facade::{MockArm, MockArmConfig};
use scene_sync::ShutdownSignal;
use task_orchestrator::{Orchestrator, OrchestratorConfig, SessionMetrics};
use voice_local::plugin::{new_transcriber, TranscriberKind};
use voice_local::{Transcriber, TranscriptionError};

/// Attempts at reading an utterance before giving up on unintelligible input
const MAX_LISTEN_ATTEMPTS: usize = 3;

#[derive(Parser, Debug)]
#[command(
    name = "pnp",
    version,
    about = "Voice-driven pick-and-place against a simulated arm"
)]
struct Cli {
    /// Workcell YAML (catalogs, bins, rest joints); built-in reference cell if omitted
    #[arg(long)]
    workcell: Option<PathBuf>,

    /// Utterance to run, e.g. "pick red place red"
    #[arg(long, conflicts_with = "stdin")]
    utterance: Option<String>,

    /// Read the utterance from standard input
    #[arg(long, action = ArgAction::SetTrue)]
    stdin: bool,

    /// Scene confirmation timeout per mutation
    #[arg(long, default_value_t = 4000)]
    sync_timeout_ms: u64,

    /// Scene polling cadence while waiting
    #[arg(long, default_value_t = 100)]
    poll_interval_ms: u64,

    /// Scene queries before a mutation becomes visible (mock arm)
    #[arg(long, default_value_t = 0)]
    scene_lag_polls: u32,

    /// Inject a failure on the Nth motion call (mock arm, 1-based)
    #[arg(long)]
    fail_motion_at: Option<usize>,

    /// Print the session report as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Print prometheus counters after the session
    #[arg(long, action = ArgAction::SetTrue)]
    metrics: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();
    intent_parser::init().map_err(|e| anyhow!("{e}"))?;

    let cell = match &cli.workcell {
        Some(path) => inventory_registry::load_workcell_file(path)?,
        None => {
            info!("using built-in reference workcell");
            Workcell::reference()
        }
    };

    let kind = match (&cli.utterance, cli.stdin) {
        (Some(text), _) => TranscriberKind::Scripted(text.clone()),
        (None, true) => TranscriberKind::Stdin,
        (None, false) => return Err(anyhow!("pass --utterance <TEXT> or --stdin")),
    };
    let mut transcriber = new_transcriber(kind).map_err(|e| anyhow!(e))?;
    let transcript = tokio::task::spawn_blocking(move || listen(&mut transcriber))
        .await
        .context("transcriber task")??;
    let tokens = TokenStream::from_transcript(&transcript);
    info!(tokens = tokens.len(), "heard: {transcript}");

    let mut config = OrchestratorConfig {
        sync_timeout_ms: cli.sync_timeout_ms,
        poll_interval_ms: cli.poll_interval_ms,
        ..OrchestratorConfig::default()
    };
    if let Some(rest) = cell.rest_joints.clone() {
        config.rest_joints = rest;
    }

    let arm = MockArm::with_objects(
        cell.object_names(),
        MockArmConfig {
            scene_lag_polls: cli.scene_lag_polls,
            fail_motion_at: cli.fail_motion_at,
            ..MockArmConfig::default()
        },
    );
    let metrics = SessionMetrics::new().map_err(|e| anyhow!(e))?;

    let shutdown = ShutdownSignal::new();
    let on_ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.trigger();
        }
    });

    let mut orchestrator = Orchestrator::new(arm, cell.registry, cell.presets, config, shutdown)
        .with_metrics(metrics.clone());
    let report = tokio::task::spawn_blocking(move || orchestrator.run_session(&tokens))
        .await
        .context("session task")?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        for task in &report.tasks {
            println!(
                "#{:<3} {:<5} {:<5} {:<4} {}",
                task.index,
                task.command.as_str(),
                task.color.as_str(),
                task.object.as_deref().unwrap_or("-"),
                task.state()
            );
        }
        for d in &report.diagnostics {
            println!("! {d}");
        }
        println!("{}", report.summary());
    }
    if cli.metrics {
        print!("{}", metrics.encode_text());
    }
    Ok(())
}

/// Ask for an utterance, re-listening while the audio is unintelligible
fn listen(transcriber: &mut dyn Transcriber) -> Result<String> {
    for attempt in 1..=MAX_LISTEN_ATTEMPTS {
        match transcriber.transcribe() {
            Ok(t) => return Ok(t.text),
            Err(TranscriptionError::Unintelligible) => {
                warn!(attempt, "could not understand; please repeat");
            }
            Err(e) => {
                return Err(e).with_context(|| format!("{} transcriber", transcriber.name()));
            }
        }
    }
    Err(anyhow!(
        "no intelligible utterance after {MAX_LISTEN_ATTEMPTS} attempts"
    ))
}

fn setup_tracing() {
    // Best-effort; avoid panics if already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_local::{ScriptedReply, ScriptedTranscriber};

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["pnp", "--utterance", "pick red place red"]).unwrap();
        assert_eq!(cli.sync_timeout_ms, 4000);
        assert_eq!(cli.poll_interval_ms, 100);
        assert!(!cli.stdin && !cli.json);
        assert!(Cli::try_parse_from(["pnp", "--utterance", "x", "--stdin"]).is_err());
    }

    #[test]
    fn test_listen_retries_unintelligible_only() {
        let mut t = ScriptedTranscriber::new([
            ScriptedReply::Unintelligible,
            ScriptedReply::Text("pick blue".into()),
        ]);
        assert_eq!(listen(&mut t).unwrap(), "pick blue");

        let mut t = ScriptedTranscriber::new([ScriptedReply::Unavailable("offline".into())]);
        assert!(listen(&mut t).is_err());

        let mut t =
            ScriptedTranscriber::new(vec![ScriptedReply::Unintelligible; MAX_LISTEN_ATTEMPTS]);
        assert!(listen(&mut t).is_err());
    }
}
