//! Portfolio Bot - chat about a portfolio and check role fit.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portfolio_bot::chat::{fallback, Action, ChatEngine, ConversationContext, Reply};
use portfolio_bot::config::{BotConfig, ConfigError, ConfigLoader};
use portfolio_bot::display;
use portfolio_bot::fit::RuleError;
use portfolio_bot::knowledge::KnowledgeBase;
use portfolio_bot::server::{ChatServer, ServerError};

#[derive(Parser)]
#[command(
    name = "portfolio-bot",
    about = "Portfolio chatbot with knowledge-base answers and role-fit scoring",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of the default search paths.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print replies as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question.
    Ask {
        /// The question.
        #[arg(required = true, trailing_var_arg = true)]
        question: Vec<String>,
    },
    /// Score how well a role fits.
    Fit {
        /// Job title or description.
        #[arg(trailing_var_arg = true, required_unless_present = "file")]
        job: Vec<String>,
        /// Read the job description from a file.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Start an interactive chat.
    Chat,
    /// List visible projects.
    Projects,
    /// Serve the HTTP API.
    Serve {
        /// Host to bind, overriding the config.
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overriding the config.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Inspect configuration.
    Config {
        /// Print the effective configuration as TOML.
        #[arg(long)]
        show: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Rules(#[from] RuleError),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to encode TOML: {0}")]
    Toml(#[from] toml::ser::Error),
    #[error("Job description is empty")]
    EmptyJob,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<BotConfig, ConfigError> {
    let loader = path.map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    if let Some(found) = loader.find_config_file() {
        tracing::info!(path = %found.display(), "Using config file");
    }
    loader.load()
}

async fn build_engine(config: &BotConfig) -> Result<ChatEngine, RuleError> {
    let knowledge = Arc::new(KnowledgeBase::load(&config.knowledge).await);
    if knowledge.is_empty() {
        tracing::warn!(
            data_dir = %config.knowledge.data_dir.display(),
            "Knowledge base is empty"
        );
    }
    ChatEngine::from_config(knowledge, config)
}

fn print_reply(reply: &Reply, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
    } else {
        display::print_reply(reply);
    }
    Ok(())
}

async fn run_chat(engine: &ChatEngine) -> Result<(), CliError> {
    let mut ctx = ConversationContext::new();
    display::print_banner(engine.name(), engine.has_ai());
    display::print_reply(&engine.act(&mut ctx, Action::Welcome));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        display::print_prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let reply = match line.trim() {
            "/quit" | "/exit" => break,
            "/fit" => Some(engine.act(&mut ctx, Action::BeginFit)),
            "/projects" => Some(engine.act(&mut ctx, Action::ShowProjects)),
            "/about" => Some(engine.act(&mut ctx, Action::About)),
            "/help" => Some(Reply::Guidance {
                text: fallback::search_guidance("", engine.name()),
            }),
            "/reset" => {
                ctx.reset();
                Some(engine.act(&mut ctx, Action::Welcome))
            }
            input => engine.respond(&mut ctx, input).await,
        };

        if let Some(reply) = reply {
            display::print_reply(&reply);
        }
    }

    tracing::debug!(conversation = %ctx.id(), turns = ctx.len(), "Chat ended");
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(cli.config)?;

    match cli.command {
        Commands::Ask { question } => {
            let engine = build_engine(&config).await?;
            let mut ctx = ConversationContext::new();
            if let Some(reply) = engine.respond(&mut ctx, &question.join(" ")).await {
                print_reply(&reply, cli.json)?;
            }
        }
        Commands::Fit { job, file } => {
            let text = match file {
                Some(path) => tokio::fs::read_to_string(path).await?,
                None => job.join(" "),
            };
            let text = text.trim();
            if text.is_empty() {
                return Err(CliError::EmptyJob);
            }
            let engine = build_engine(&config).await?;
            let report = engine.fit(text).await;
            print_reply(&Reply::Fit { report }, cli.json)?;
        }
        Commands::Chat => {
            let engine = build_engine(&config).await?;
            run_chat(&engine).await?;
        }
        Commands::Projects => {
            let engine = build_engine(&config).await?;
            let mut ctx = ConversationContext::new();
            print_reply(&engine.act(&mut ctx, Action::ShowProjects), cli.json)?;
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let engine = Arc::new(build_engine(&config).await?);
            let server = ChatServer::new(engine).with_config(config.server.clone());

            let cancel = server.cancel_token();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Received Ctrl-C");
                }
                cancel.cancel();
            });

            println!("Listening on http://{}", server.address());
            server.run().await?;
        }
        Commands::Config { show } => {
            if show {
                print!("{}", toml::to_string_pretty(&config)?);
            } else {
                let loader = ConfigLoader::new();
                for path in loader.search_paths() {
                    let marker = if path.exists() { "found" } else { "missing" };
                    println!("{} ({marker})", path.display());
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
