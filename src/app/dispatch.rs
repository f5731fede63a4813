use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use mindmate::Config;
use mindmate::chat::Conversation;
use mindmate::gateway::run_gateway;
use mindmate::journal::JournalAnalyzer;
use mindmate::llm::{CliStreamSink, GatewayClient};
use mindmate::wellness::{
    DashboardStats, FocusSession, FocusTimer, Insights, MoodLog, MoodPreset, MoodScore,
    WellnessExport,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

const RECENT_MOODS_SHOWN: usize = 7;

async fn run_chat(config: &Config, message: Option<String>) -> Result<()> {
    let client = GatewayClient::new(&config.llm)?;
    let mut conversation = Conversation::from_config(&config.chat);
    let sink = CliStreamSink::new();

    if let Some(message) = message {
        conversation.send(&message, &client, &sink).await?;
        println!();
        return Ok(());
    }

    println!("MindMate is listening. /clear starts over, /exit quits.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "/exit" | "/quit" => break,
            "/clear" => {
                conversation.clear();
                println!("Conversation cleared.");
            }
            input => match conversation.send(input, &client, &sink).await {
                Ok(Some(_)) => println!("\n"),
                Ok(None) => {}
                Err(error) => eprintln!("\n! {error}"),
            },
        }
    }

    info!(
        turns = conversation.turns().len(),
        "Chat session ended"
    );
    Ok(())
}

async fn run_analyze(
    config: &Config,
    title: Option<String>,
    text: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let content = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => anyhow::bail!("Provide entry text or --file"),
    };

    let client = GatewayClient::new(&config.llm)?;
    let entry = JournalAnalyzer::new(&client, &config.journal)
        .create_entry(title.as_deref(), &content)
        .await?;

    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(())
}

fn render_insights(export: &WellnessExport, now: DateTime<Utc>) -> String {
    let insights = Insights::compute(&export.mood_logs, &export.sessions, now);
    let stats = DashboardStats::compute(
        &export.mood_logs,
        &export.journal_entries,
        &export.sessions,
        now,
    );

    let mut out = String::new();
    out.push_str("Last 30 days\n");
    out.push_str(&format!("  Mood trend:     {}\n", insights.trend()));
    out.push_str(&format!("  Average stress: {:.1}/5\n", insights.avg_stress));
    out.push_str(&format!("  Average energy: {:.1}/5\n", insights.avg_energy));
    out.push_str(&format!(
        "  Focus sessions: {} ({}h)\n",
        insights.completed_sessions, insights.focus_hours
    ));

    out.push_str("Last 7 days\n");
    out.push_str(&format!("  Mood average:   {}/10\n", stats.mood_average));
    out.push_str(&format!("  Journal:        {} entries\n", stats.journal_entries));
    out.push_str(&format!("  Focus time:     {}h\n", stats.focus_hours));

    if !insights.trend_points.is_empty() {
        out.push_str("Recent moods\n");
        for point in insights.trend_points.iter().rev().take(RECENT_MOODS_SHOWN) {
            out.push_str(&format!(
                "  {}  {}/10\n",
                point.at.format("%Y-%m-%d"),
                point.mood
            ));
        }
    }
    out
}

fn run_insights(path: &Path) -> Result<()> {
    let export = WellnessExport::load(path)?;
    print!("{}", render_insights(&export, Utc::now()));
    Ok(())
}

fn run_mood(score: u8) -> Result<()> {
    let score = MoodScore::new(score)?;
    let log = MoodLog::record(score, Utc::now());
    if let Some(preset) = MoodPreset::all().find(|p| p.score() == score) {
        println!("Feeling: {preset}");
    }
    println!("{}", serde_json::to_string_pretty(&log)?);
    Ok(())
}

/// Tick a running timer and start the next phase as soon as one ends.
fn advance_focus(
    timer: &mut FocusTimer,
    seconds: u32,
    now: DateTime<Utc>,
) -> Option<FocusSession> {
    let phase = timer.phase();
    let session = timer.tick(seconds, now);
    if timer.phase() != phase {
        timer.toggle();
    }
    session
}

async fn run_focus(task: Option<String>) -> Result<()> {
    let mut timer = FocusTimer::new();
    if let Some(task) = task {
        timer.set_task(task);
    }
    timer.toggle();

    let mut completed = 0_u32;
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
    interval.tick().await;
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                println!("\nFocus timer stopped after {completed} session(s).");
                return Ok(());
            }
        }

        let phase = timer.phase();
        if let Some(session) = advance_focus(&mut timer, 1, Utc::now()) {
            completed += 1;
            println!("\nFocus session complete. Time for a break.");
            println!("{}", serde_json::to_string_pretty(&session)?);
        } else if timer.phase() != phase {
            println!("\nBreak over. Back to focus.");
        }
        print!("\r{} {}", timer.phase(), timer.display());
        std::io::stdout().flush().ok();
    }
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Chat { message } => run_chat(&config, message).await,
        Commands::Analyze { title, text, file } => run_analyze(&config, title, text, file).await,
        Commands::Insights { path } => run_insights(&path),
        Commands::Mood { score } => run_mood(score),
        Commands::Focus { task } => run_focus(task).await,
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            let port = port.unwrap_or(config.gateway.port);
            run_gateway(&host, port, &config).await?;
            Ok(())
        }
    }
}
