use std::io::{self, BufRead, Write};

use clap::{Args, Subcommand};

use igotyou::config::{StoredConfig, config_file_path};
use igotyou::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;
    let stdin = io::stdin();
    let mut wizard = Wizard::new(stdin.lock(), io::stdout());

    wizard.intro()?;
    wizard.update("OpenAI API key", &mut cfg.openai_api_key, true)?;
    wizard.update("Model (e.g., gpt-3.5-turbo)", &mut cfg.openai_model, false)?;
    wizard.update(
        "Completion API base URL (e.g., https://api.openai.com/v1)",
        &mut cfg.openai_base_url,
        false,
    )?;
    wizard.update(
        "Public site URL used in petition links",
        &mut cfg.public_base_url,
        false,
    )?;

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;
    write_summary(&mut io::stdout(), &cfg, &path.display().to_string())
}

fn write_summary(out: &mut impl Write, cfg: &StoredConfig, path: &str) -> AppResult<()> {
    writeln!(out, "Configuration file: {path}")?;
    writeln!(out, "OpenAI API key: {}", mask_secret(&cfg.openai_api_key))?;
    writeln!(out, "Model: {}", or_unset(cfg.openai_model.as_deref()))?;
    writeln!(
        out,
        "Completion API base URL: {}",
        or_unset(cfg.openai_base_url.as_deref())
    )?;
    writeln!(out, "Public site URL: {}", or_unset(cfg.public_base_url.as_deref()))?;
    Ok(())
}

/// Line-based question loop over any reader/writer pair.
struct Wizard<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Wizard<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn intro(&mut self) -> AppResult<()> {
        writeln!(self.output, "Configuring igotyou.")?;
        writeln!(self.output, "Press Enter to keep the current value, '-' to clear it.")?;
        writeln!(
            self.output,
            "Secrets are stored in the local config file; protect your filesystem accordingly.\n"
        )?;
        Ok(())
    }

    /// Asks for one field and applies the answer in place. End of input keeps the value.
    fn update(&mut self, field: &str, value: &mut Option<String>, secret: bool) -> AppResult<()> {
        let shown = match value.as_deref() {
            Some(_) if secret => Some("****"),
            other => other,
        };
        match shown {
            Some(current) => write!(
                self.output,
                "{field} [{current}] (Enter to keep, '-' to clear): "
            )?,
            None => write!(self.output, "{field} (Enter to skip): ")?,
        }
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        match PromptAction::from_input(&line) {
            PromptAction::Keep => {}
            PromptAction::Clear => *value = None,
            PromptAction::Set(answer) => *value = Some(answer),
        }
        Ok(())
    }
}

fn or_unset(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("<not set>")
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

impl PromptAction {
    fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            PromptAction::Keep
        } else if trimmed == "-" {
            PromptAction::Clear
        } else {
            PromptAction::Set(trimmed.to_string())
        }
    }
}
