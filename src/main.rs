use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use liftfix::config::{self, Config};
use liftfix::display;
use liftfix::history::{ConversationSink, JsonlStore, MemoryStore, UsageStats};
use liftfix::theme::Theme;
use liftfix::{Assistant, KnowledgeBase};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLE_PROMPTS: &[&str] = &[
    "Otis E1 porte bloquée",
    "Kone F7 défaut fermeture",
    "Schindler 88 récurrent",
];

#[derive(Parser)]
#[command(name = "liftfix", version, about = "Troubleshooting assistant for elevator technicians")]
struct Cli {
    /// Use an alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive diagnosis session (default)
    Chat,
    /// Diagnose a single fault description
    Diagnose {
        #[arg(required = true)]
        message: Vec<String>,
        /// Do not record the conversation
        #[arg(long)]
        no_save: bool,
    },
    /// List known brands and models
    Brands,
    /// Show recent conversations
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show usage statistics
    Stats,
    /// Mark a conversation as solved
    Solve { id: u64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LIFTFIX_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };
    let config = Config::load_or_create(&config_path)?;
    if !config.display.color_output {
        colored::control::set_override(false);
    }

    let kb = config.knowledge_base()?;
    let theme = config.theme();
    let store = JsonlStore::new(config.history_path()?);

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => chat(&kb, &store, &theme).await?,
        Command::Diagnose { message, no_save } => {
            let message = message.join(" ");
            let memory = MemoryStore::new();
            let sink: &dyn ConversationSink = if no_save { &memory } else { &store };
            let assistant = Assistant::new(&kb, sink)?;
            let exchange = assistant.handle(&message).await;
            print!("{}", display::render_response(&exchange.response, &theme));
            if let (false, Some(id)) = (no_save, exchange.conversation_id) {
                println!("{}", theme.muted.apply(&format!("conversation #{}", id)));
            }
        }
        Command::Brands => print!("{}", display::render_brands(&kb, &theme)),
        Command::History { limit } => {
            let records = store.recent(limit).await?;
            print!(
                "{}",
                display::render_history(&records, &theme, config.display.show_timestamps)
            );
        }
        Command::Stats => {
            let stats = UsageStats::from_records(&store.load_all().await?);
            print!("{}", display::render_stats(&stats, &theme));
        }
        Command::Solve { id } => {
            store.mark_solved(id).await?;
            println!("Conversation #{} marked as solved", id);
        }
    }

    Ok(())
}

async fn chat(kb: &KnowledgeBase, store: &JsonlStore, theme: &Theme) -> Result<()> {
    let assistant = Assistant::new(kb, store)?;

    println!("{}", "Liftfix - Assistant Dépannage Ascenseurs".green().bold());
    let brands: Vec<&str> = kb.brands().iter().map(|b| b.name.as_str()).collect();
    println!("Marques: {}", brands.join(" • ").blue());
    println!("Exemples:");
    for example in EXAMPLE_PROMPTS {
        println!("  {}", example.italic());
    }
    println!("Type 'exit' to quit\n");

    loop {
        print!("liftfix> ");
        io::stdout().flush()?;

        let mut query = String::new();
        if io::stdin().read_line(&mut query)? == 0 {
            break;
        }
        let query = query.trim();

        if query == "exit" || query == "quit" {
            break;
        }
        if query.is_empty() {
            continue;
        }

        let exchange = assistant.handle(query).await;
        println!("{}", display::render_response(&exchange.response, theme));
    }

    Ok(())
}
