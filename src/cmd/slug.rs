use clap::Args;

use igotyou::domain::slug::{DEFAULT_SLUG_LENGTH, generate_base_slug, generate_slug};

#[derive(Args, Debug, Clone)]
pub struct SlugArgs {
    /// Petition title to turn into a slug.
    pub title: String,
    /// Maximum length of the slug before the random suffix.
    #[arg(long, default_value_t = DEFAULT_SLUG_LENGTH)]
    pub max_length: usize,
    /// Print only the base slug, without the random suffix.
    #[arg(long)]
    pub base_only: bool,
}

pub fn run(args: SlugArgs) {
    let slug = if args.base_only {
        generate_base_slug(&args.title, args.max_length)
    } else {
        generate_slug(&args.title, args.max_length)
    };
    println!("{slug}");
}
