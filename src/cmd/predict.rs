use clap::Args;

use igotyou::cache::PredictionCache;
use igotyou::context::AppContext;
use igotyou::domain::category::PetitionCategory;
use igotyou::domain::prediction::{PetitionProgress, PetitionSummary, StrategyTip};
use igotyou::error::AppResult;
use igotyou::workflow::predict::{predict_success, predict_success_cached, strategy_tips};

use super::parse_category;

#[derive(Args, Debug, Clone)]
pub struct PetitionArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    /// Person or group the petition asks to act.
    #[arg(long)]
    pub target: String,
    #[arg(long, value_parser = parse_category)]
    pub category: PetitionCategory,
    #[arg(long)]
    pub company: Option<String>,
}

impl PetitionArgs {
    fn summary(self) -> PetitionSummary {
        PetitionSummary {
            title: self.title,
            description: self.description,
            target: self.target,
            category: self.category,
            company: self.company.filter(|c| !c.trim().is_empty()),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub petition: PetitionArgs,
    /// Always ask the model, ignoring cached predictions.
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TipsArgs {
    #[command(flatten)]
    pub petition: PetitionArgs,
    /// Signatures collected so far.
    #[arg(long)]
    pub signatures: u64,
    /// Signature goal.
    #[arg(long)]
    pub goal: u64,
    /// Days since the petition went live.
    #[arg(long)]
    pub days: u64,
}

pub async fn run_predict(ctx: &AppContext, args: PredictArgs) -> AppResult<()> {
    let summary = args.petition.summary();
    let prediction = if args.no_cache {
        predict_success(ctx, &summary).await?
    } else {
        let mut cache = PredictionCache::load(&ctx.config.config_dir)?;
        predict_success_cached(ctx, &mut cache, &summary).await?
    };

    println!(
        "Success likelihood: {}%",
        (prediction.score * 100.0).round()
    );
    println!("{}", prediction.reasoning);
    print_tips(&prediction.tips);
    Ok(())
}

pub async fn run_tips(ctx: &AppContext, args: TipsArgs) -> AppResult<()> {
    let progress = PetitionProgress {
        signature_count: args.signatures,
        goal: args.goal,
        days_active: args.days,
    };
    let tips = strategy_tips(ctx, &args.petition.summary(), &progress).await?;
    if tips.is_empty() {
        println!("No tips available right now.");
    }
    print_tips(&tips);
    Ok(())
}

fn print_tips(tips: &[StrategyTip]) {
    for tip in tips {
        println!(
            "\n[{:?}/{:?}] {}\n  {}",
            tip.priority, tip.tip_type, tip.title, tip.description
        );
    }
}
