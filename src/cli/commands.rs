use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `MindMate` - AI mental wellness companion.
#[derive(Parser, Debug)]
#[command(name = "mindmate")]
#[command(version)]
#[command(about = "Chat, journal analysis and wellness insights.", long_about = None)]
pub struct Cli {
    /// Log at debug level regardless of [observability] log_level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Talk with the companion (interactive unless --message is given)
    Chat {
        /// Single message mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Analyze a journal entry and print it with its analysis
    Analyze {
        /// Entry title (defaults to [journal] default_title)
        #[arg(short, long)]
        title: Option<String>,

        /// Entry text
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        text: Option<String>,

        /// Read the entry text from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Summarize a wellness export (mood logs, focus sessions, journal entries)
    Insights {
        /// JSON export file
        path: PathBuf,
    },

    /// Record a mood score (1-10) and print the log entry
    Mood {
        score: u8,
    },

    /// Run a Pomodoro timer (25 min focus, 5 min break) until Ctrl-C
    Focus {
        /// What you are working on
        #[arg(short, long)]
        task: Option<String>,
    },

    /// Start the HTTP gateway
    Serve {
        /// Host to bind to (defaults to [gateway] host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to [gateway] port; 0 for a random port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
