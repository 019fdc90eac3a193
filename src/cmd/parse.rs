use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use igotyou::domain::draft::ParsedDraft;
use igotyou::error::AppResult;
use igotyou::parser::{extract_draft_from_response, has_draft_markers};

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// File holding an assistant reply; reads stdin when omitted.
    pub file: Option<PathBuf>,
}

#[derive(Serialize)]
struct ParseOutput {
    has_markers: bool,
    draft: ParsedDraft,
}

pub fn run(args: ParseArgs) -> AppResult<()> {
    let text = match &args.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let output = ParseOutput {
        has_markers: has_draft_markers(&text),
        draft: extract_draft_from_response(&text),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
