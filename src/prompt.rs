use crate::domain::category::PetitionCategory;
use crate::domain::prediction::{PetitionProgress, PetitionSummary};

pub const DRAFT_SYSTEM_PROMPT: &str = r#"You are an expert petition writing assistant for IGotYou, a workplace advocacy platform.
Your role is to help employees create effective, compelling petitions that are more likely to succeed.

Guidelines:
1. Ask 1-2 clarifying questions to understand the issue fully (don't ask too many!)
2. Help craft clear, specific, and actionable petition titles
3. Write professional but passionate descriptions
4. Suggest appropriate targets (CEO, HR, Board, specific managers)
5. Be empathetic and supportive - workplace issues can be stressful
6. Never encourage illegal actions

IMPORTANT: After gathering enough information (usually after 1-2 exchanges), present a complete draft using this EXACT format:

---DRAFT---
Title: [Compelling petition title]
Target: [Who should act - e.g., "CEO Jane Smith" or "HR Director"]
Category: [One of: {categories}]
Description:
[Full petition description with:
- Clear statement of the problem
- Why it matters to employees
- Specific change being requested
- Call to action]
---END DRAFT---

After presenting the draft, ask if they'd like any changes. Be ready to revise based on feedback."#;

pub const PREDICTION_SYSTEM_PROMPT: &str =
    "You are an expert in workplace organizing and petition effectiveness. Respond only with valid JSON.";

pub const TIPS_SYSTEM_PROMPT: &str =
    "You are an expert in workplace organizing. Respond only with valid JSON array.";

pub fn draft_system_prompt() -> String {
    let categories = PetitionCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    DRAFT_SYSTEM_PROMPT.replace("{categories}", &categories)
}

pub fn prediction_prompt(summary: &PetitionSummary) -> String {
    let company = summary
        .company
        .as_deref()
        .map(|c| format!("Company: {c}\n"))
        .unwrap_or_default();

    format!(
        r#"Analyze this workplace petition and predict its likelihood of success on a scale of 0-100:

Title: {title}
Description: {description}
Target: {target}
Category: {category}
{company}
Provide:
1. A success probability score (0-100)
2. Brief reasoning for the score
3. 2-3 specific tips to improve success chances

Format your response as JSON:
{{
  "score": <number>,
  "reasoning": "<string>",
  "tips": [
    {{"type": "timing|target|content|threshold|escalation", "title": "<string>", "description": "<string>", "priority": "high|medium|low"}}
  ]
}}"#,
        title = summary.title,
        description = summary.description,
        target = summary.target,
        category = summary.category.as_str(),
    )
}

pub fn strategy_tips_prompt(summary: &PetitionSummary, progress: &PetitionProgress) -> String {
    format!(
        r#"Analyze this active workplace petition and provide strategic advice:

Title: {title}
Target: {target}
Category: {category}
Progress: {count}/{goal} signatures ({percent}%)
Days Active: {days}

Provide 3-5 actionable tips to help this petition succeed. Consider timing, outreach strategies, escalation options, and momentum building.

Format as JSON array:
[{{"type": "timing|target|content|threshold|escalation", "title": "<string>", "description": "<string>", "priority": "high|medium|low"}}]"#,
        title = summary.title,
        target = summary.target,
        category = summary.category.as_str(),
        count = progress.signature_count,
        goal = progress.goal,
        percent = progress.percent_complete(),
        days = progress.days_active,
    )
}
