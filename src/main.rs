mod cmd;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::warn;

use igotyou::config::AppConfig;
use igotyou::context::AppContext;
use igotyou::error::AppResult;
use igotyou::infra::{OfflineClient, OpenAiClient};
use igotyou::logging::init_cli_logger;
use igotyou::services::LanguageModelService;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::link::LinkArgs;
use crate::cmd::parse::ParseArgs;
use crate::cmd::predict::{PredictArgs, TipsArgs};
use crate::cmd::slug::SlugArgs;

#[derive(Parser)]
#[command(name = "igotyou", author, version, about = "Workplace petition drafting toolkit")]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draft a petition in a guided chat with the assistant.
    Draft,
    /// Extract draft fields from an assistant reply.
    Parse(ParseArgs),
    /// Generate a URL slug for a petition title.
    Slug(SlugArgs),
    /// Build a shareable petition link.
    Link(LinkArgs),
    /// Estimate how likely a petition is to succeed.
    Predict(PredictArgs),
    /// Get strategy tips for an active petition.
    Tips(TipsArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    if let Err(error) = run(cli.command).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> AppResult<()> {
    match command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Parse(args) => cmd::parse::run(args),
        Commands::Slug(args) => {
            cmd::slug::run(args);
            Ok(())
        }
        Commands::Link(args) => cmd::link::run(&AppConfig::load()?, args),
        Commands::Draft => cmd::draft::run(&build_context()?).await,
        Commands::Predict(args) => cmd::predict::run_predict(&build_context()?, args).await,
        Commands::Tips(args) => cmd::predict::run_tips(&build_context()?, args).await,
    }
}

fn build_context() -> AppResult<AppContext> {
    let config = AppConfig::load()?;

    let language_model: Arc<dyn LanguageModelService> = match &config.openai_api_key {
        Some(api_key) => Arc::new(OpenAiClient::new(
            Some(api_key.clone()),
            config.openai_model.clone(),
            config.openai_base_url.clone(),
        )),
        None => {
            warn!("OpenAI API key not configured; using offline sample responses.");
            Arc::new(OfflineClient::new())
        }
    };

    Ok(AppContext::new(config, language_model))
}
