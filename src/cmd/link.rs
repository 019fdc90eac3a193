use clap::Args;

use igotyou::config::AppConfig;
use igotyou::domain::link::{ShareSource, petition_url};
use igotyou::error::AppResult;

use super::parse_share_source;

#[derive(Args, Debug, Clone)]
pub struct LinkArgs {
    /// Slug of the petition.
    pub slug: String,
    /// Where the link will be shared (qr, share, email).
    #[arg(long, value_parser = parse_share_source)]
    pub source: Option<ShareSource>,
    /// Override the configured public base URL.
    #[arg(long)]
    pub base_url: Option<String>,
}

pub fn run(config: &AppConfig, args: LinkArgs) -> AppResult<()> {
    let base_url = args.base_url.as_deref().unwrap_or(&config.public_base_url);
    let url = petition_url(base_url, &args.slug, args.source)?;
    println!("{url}");
    Ok(())
}
