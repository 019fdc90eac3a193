use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::category::PetitionCategory;

const DEFAULT_SCORE: f64 = 50.0;
const FALLBACK_SCORE: f64 = 0.5;
const DEFAULT_REASONING: &str = "Unable to analyze petition.";
const FALLBACK_REASONING: &str = "Unable to analyze petition at this time.";

/// The parts of a petition the success model looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetitionSummary {
    pub title: String,
    pub description: String,
    pub target: String,
    pub category: PetitionCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetitionProgress {
    pub signature_count: u64,
    pub goal: u64,
    pub days_active: u64,
}

impl PetitionProgress {
    /// Share of the goal reached, as a whole percentage capped at 100.
    pub fn percent_complete(&self) -> u64 {
        if self.goal == 0 {
            return 0;
        }
        let percent = (self.signature_count as f64 / self.goal as f64 * 100.0).round() as u64;
        percent.min(100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipType {
    Timing,
    Target,
    Content,
    Threshold,
    Escalation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyTip {
    #[serde(rename = "type")]
    pub tip_type: TipType,
    pub title: String,
    pub description: String,
    pub priority: TipPriority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessPrediction {
    /// Likelihood of success in `[0, 1]`.
    pub score: f64,
    pub reasoning: String,
    pub tips: Vec<StrategyTip>,
}

impl SuccessPrediction {
    fn fallback() -> Self {
        Self {
            score: FALLBACK_SCORE,
            reasoning: FALLBACK_REASONING.to_string(),
            tips: Vec::new(),
        }
    }
}

/// Reads the model's JSON verdict. The score arrives on a 0-100 scale and is
/// clamped before being scaled down; unreadable output gives a neutral 0.5.
pub fn parse_prediction(content: &str) -> SuccessPrediction {
    let json: Value = match serde_json::from_str(strip_code_fence(content)) {
        Ok(json) => json,
        Err(err) => {
            warn!("prediction response was not valid JSON: {err}");
            return SuccessPrediction::fallback();
        }
    };
    let Some(obj) = json.as_object() else {
        warn!("prediction response was not a JSON object");
        return SuccessPrediction::fallback();
    };

    let raw_score = obj
        .get("score")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_SCORE);
    let reasoning = obj
        .get("reasoning")
        .and_then(Value::as_str)
        .filter(|r| !r.trim().is_empty())
        .unwrap_or(DEFAULT_REASONING)
        .to_string();
    let tips = obj.get("tips").map(parse_tip_list).unwrap_or_default();

    SuccessPrediction {
        score: raw_score.clamp(0.0, 100.0) / 100.0,
        reasoning,
        tips,
    }
}

/// Reads a JSON array of tips; anything else yields no tips.
pub fn parse_strategy_tips(content: &str) -> Vec<StrategyTip> {
    match serde_json::from_str::<Value>(strip_code_fence(content)) {
        Ok(json) => parse_tip_list(&json),
        Err(err) => {
            warn!("strategy tips response was not valid JSON: {err}");
            Vec::new()
        }
    }
}

fn parse_tip_list(json: &Value) -> Vec<StrategyTip> {
    let Some(items) = json.as_array() else {
        warn!("expected a JSON array of tips");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(
            |(idx, item)| match serde_json::from_value::<StrategyTip>(item.clone()) {
                Ok(tip) => Some(tip),
                Err(err) => {
                    warn!("skipping tip {idx}: {err}");
                    None
                }
            },
        )
        .collect()
}

/// Models sometimes wrap JSON in a markdown code block.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => "",
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Historical success rate per category, used when no model is configured.
pub fn offline_prediction(category: PetitionCategory) -> SuccessPrediction {
    let score = match category {
        PetitionCategory::PayEquity => 0.45,
        PetitionCategory::Benefits => 0.55,
        PetitionCategory::WorkplaceSafety => 0.72,
        PetitionCategory::RemoteWork => 0.68,
        PetitionCategory::Layoffs => 0.35,
        PetitionCategory::Harassment => 0.58,
        PetitionCategory::Discrimination => 0.52,
        PetitionCategory::Union => 0.42,
        PetitionCategory::PolicyChange => 0.61,
        PetitionCategory::Environmental => 0.48,
        PetitionCategory::Other => 0.50,
    };

    SuccessPrediction {
        score,
        reasoning: format!(
            "Based on historical data, petitions in the {} category have a {}% success rate. \
             Your petition has solid foundations but could be strengthened with more specific asks.",
            category.as_str().to_lowercase().replacen('_', " ", 1),
            (score * 100.0_f64).round()
        ),
        tips: vec![
            StrategyTip {
                tip_type: TipType::Content,
                title: "Add specific metrics".to_string(),
                description: "Petitions with concrete numbers (e.g., \"30% of employees affected\") perform 23% better.".to_string(),
                priority: TipPriority::High,
            },
            StrategyTip {
                tip_type: TipType::Timing,
                title: "Launch on Monday morning".to_string(),
                description: "Petitions launched Monday-Wednesday get 40% more signatures in the first week.".to_string(),
                priority: TipPriority::Medium,
            },
            StrategyTip {
                tip_type: TipType::Target,
                title: "Consider adding secondary targets".to_string(),
                description: "Including the Board of Directors as a CC often accelerates responses.".to_string(),
                priority: TipPriority::Low,
            },
        ],
    }
}
