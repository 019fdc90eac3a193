use tracing::{debug, info};

use crate::cache::PredictionCache;
use crate::context::AppContext;
use crate::domain::chat::ChatMessage;
use crate::domain::prediction::{
    PetitionProgress, PetitionSummary, StrategyTip, SuccessPrediction, parse_prediction,
    parse_strategy_tips,
};
use crate::error::{AppError, AppResult};
use crate::prompt::{
    PREDICTION_SYSTEM_PROMPT, TIPS_SYSTEM_PROMPT, prediction_prompt, strategy_tips_prompt,
};
use crate::services::CompletionRequest;

const PREDICTION_TEMPERATURE: f32 = 0.5;
const TIPS_TEMPERATURE: f32 = 0.7;
const ANALYSIS_MAX_TOKENS: u32 = 400;

fn validate(summary: &PetitionSummary) -> AppResult<()> {
    for (field, value) in [
        ("title", &summary.title),
        ("description", &summary.description),
        ("target", &summary.target),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} must not be empty")));
        }
    }
    Ok(())
}

pub async fn predict_success(
    ctx: &AppContext,
    summary: &PetitionSummary,
) -> AppResult<SuccessPrediction> {
    validate(summary)?;

    let content = ctx
        .language_model
        .complete(CompletionRequest {
            messages: vec![
                ChatMessage::system(PREDICTION_SYSTEM_PROMPT),
                ChatMessage::user(prediction_prompt(summary)),
            ],
            temperature: PREDICTION_TEMPERATURE,
            max_tokens: ANALYSIS_MAX_TOKENS,
            json_mode: true,
        })
        .await?;

    let prediction = parse_prediction(&content);
    info!(
        score = prediction.score,
        tips = prediction.tips.len(),
        "predicted petition success"
    );
    Ok(prediction)
}

/// Like [`predict_success`], but answers from `cache` when the same petition
/// text was scored before.
pub async fn predict_success_cached(
    ctx: &AppContext,
    cache: &mut PredictionCache,
    summary: &PetitionSummary,
) -> AppResult<SuccessPrediction> {
    let key = PredictionCache::compute_key(summary);
    if let Some(hit) = cache.get(&key) {
        debug!(%key, "prediction cache hit");
        return Ok(hit);
    }

    let prediction = predict_success(ctx, summary).await?;
    cache.insert(key, &prediction);
    cache.save()?;
    Ok(prediction)
}

pub async fn strategy_tips(
    ctx: &AppContext,
    summary: &PetitionSummary,
    progress: &PetitionProgress,
) -> AppResult<Vec<StrategyTip>> {
    validate(summary)?;
    if progress.goal == 0 {
        return Err(AppError::Validation(
            "signature goal must be greater than zero".to_string(),
        ));
    }

    let content = ctx
        .language_model
        .complete(CompletionRequest {
            messages: vec![
                ChatMessage::system(TIPS_SYSTEM_PROMPT),
                ChatMessage::user(strategy_tips_prompt(summary, progress)),
            ],
            temperature: TIPS_TEMPERATURE,
            max_tokens: ANALYSIS_MAX_TOKENS,
            json_mode: false,
        })
        .await?;

    Ok(parse_strategy_tips(&content))
}
