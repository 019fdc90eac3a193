use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use igotyou::context::AppContext;
use igotyou::domain::slug::{DEFAULT_SLUG_LENGTH, generate_slug};
use igotyou::error::{AppError, AppResult};
use igotyou::workflow::draft::DraftSession;

const DONE_COMMAND: &str = "/done";

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    println!("Describe the workplace issue you want to petition about.");
    println!("Type {DONE_COMMAND} (or send EOF) when the draft looks right.\n");

    let mut session = DraftSession::new();
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim();
        if message == DONE_COMMAND {
            break;
        }
        if message.is_empty() {
            continue;
        }

        match session.send(ctx, message).await {
            Ok(reply) => {
                println!("\n{}\n", reply.response);
                if reply.suggested_draft.is_some() {
                    println!("Current draft:");
                    println!("{}\n", serde_json::to_string_pretty(&session.draft)?);
                }
            }
            // A failed call leaves the session untouched, so the user can retry.
            Err(AppError::LanguageModel(err)) => eprintln!("Assistant unavailable: {err}"),
            Err(err) => return Err(err),
        }
    }

    if session.draft.is_empty() {
        println!("\nNo draft was produced.");
        return Ok(());
    }

    println!("\nFinal draft:");
    println!("{}", serde_json::to_string_pretty(&session.draft)?);
    if let Some(category) = session.draft.category {
        println!("Category: {}", category.label());
    }
    if let Some(title) = &session.draft.title {
        println!("Suggested slug: {}", generate_slug(title, DEFAULT_SLUG_LENGTH));
    }
    if !session.draft.is_complete() {
        println!("Some fields are still missing; fill them in before publishing.");
    }
    Ok(())
}
