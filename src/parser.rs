//! Turns free-form assistant replies into petition draft fields.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::category::PetitionCategory;
use crate::domain::draft::ParsedDraft;

static DRAFT_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)---DRAFT---\s*(.*?)(?:---END DRAFT---|\z)").expect("draft section regex")
});

static START_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)---DRAFT---").expect("start marker regex"));

static END_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)---END DRAFT---").expect("end marker regex"));

static TITLE_LINE: LazyLock<Regex> = LazyLock::new(|| label_line("Title"));
static TARGET_LINE: LazyLock<Regex> = LazyLock::new(|| label_line("Target"));
static CATEGORY_LINE: LazyLock<Regex> = LazyLock::new(|| label_line("Category"));
static DESCRIPTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{LABEL_PREFIX}Description:\**")).expect("description label regex")
});

// Start of a line, optionally decorated with markdown emphasis or heading marks.
const LABEL_PREFIX: &str = r"(?im)^[ \t]*[*#_]*[ \t]*";

fn label_line(label: &str) -> Regex {
    Regex::new(&format!(r"{LABEL_PREFIX}{label}:\**[ \t]*([^\r\n]*)"))
        .expect("label line regex")
}

/// Cheap check for whether a reply is worth running through
/// [`extract_draft_from_response`].
pub fn has_draft_markers(response: &str) -> bool {
    START_MARKER.is_match(response) || TITLE_LINE.is_match(response)
}

/// Pulls title, target, category and description out of an assistant reply.
///
/// Looks inside the `---DRAFT---` fence when one exists (the closing marker
/// is optional) and falls back to the whole reply otherwise. A missing label
/// or an unknown category leaves the field absent; a label with nothing after
/// it gives an empty value. This never fails.
pub fn extract_draft_from_response(response: &str) -> ParsedDraft {
    let section = DRAFT_SECTION
        .captures(response)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(response);

    ParsedDraft {
        title: line_value(&TITLE_LINE, section).map(clean_value),
        target: line_value(&TARGET_LINE, section).map(clean_value),
        category: line_value(&CATEGORY_LINE, section).and_then(parse_category),
        description: description_block(section),
    }
}

fn line_value<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn description_block(section: &str) -> Option<String> {
    let label = DESCRIPTION_LABEL.find(section)?;
    let rest = &section[label.end()..];
    let body = match END_MARKER.find(rest) {
        Some(end) => &rest[..end.start()],
        None => rest,
    };
    Some(body.trim().to_string())
}

/// Strips bold markers around the value and a leading heading mark.
fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('*')
        .trim_end_matches('*')
        .trim_start_matches('#')
        .trim()
        .to_string()
}

fn parse_category(raw: &str) -> Option<PetitionCategory> {
    let tag: String = raw
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || *c == '_')
        .collect();
    PetitionCategory::from_str(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENTAL_LEAVE: &str = "---DRAFT---
Title: Better Parental Leave Policy
Target: HR Director
Category: BENEFITS
Description:
We need better parental leave.
---END DRAFT---";

    #[test]
    fn extracts_all_fields_from_fenced_draft() {
        let draft = extract_draft_from_response(PARENTAL_LEAVE);
        assert_eq!(
            draft,
            ParsedDraft {
                title: Some("Better Parental Leave Policy".to_string()),
                target: Some("HR Director".to_string()),
                category: Some(PetitionCategory::Benefits),
                description: Some("We need better parental leave.".to_string()),
            }
        );
    }

    #[test]
    fn ignores_chatter_around_the_fence() {
        let response = format!(
            "Great, here is what I came up with:\n\n{PARENTAL_LEAVE}\n\nWould you like any changes? Title: ignored"
        );
        let draft = extract_draft_from_response(&response);
        assert_eq!(draft.title.as_deref(), Some("Better Parental Leave Policy"));
        assert_eq!(
            draft.description.as_deref(),
            Some("We need better parental leave.")
        );
    }

    #[test]
    fn handles_missing_end_marker() {
        let response = "---DRAFT---
Title: Safety Improvements Needed
Target: Facilities Manager
Category: WORKPLACE_SAFETY
Description:
Our workplace needs better safety equipment.

Please act before winter.";
        let draft = extract_draft_from_response(response);
        assert_eq!(draft.title.as_deref(), Some("Safety Improvements Needed"));
        assert_eq!(draft.category, Some(PetitionCategory::WorkplaceSafety));
        assert_eq!(
            draft.description.as_deref(),
            Some("Our workplace needs better safety equipment.\n\nPlease act before winter.")
        );
    }

    #[test]
    fn extracts_without_fence() {
        let response = "Here's a draft for your petition:

Title: Fair Pay for All
Target: Compensation Committee
Category: PAY_EQUITY
Description:
We demand equal pay for equal work.";
        let draft = extract_draft_from_response(response);
        assert_eq!(draft.title.as_deref(), Some("Fair Pay for All"));
        assert_eq!(draft.target.as_deref(), Some("Compensation Committee"));
        assert_eq!(draft.category, Some(PetitionCategory::PayEquity));
        assert_eq!(
            draft.description.as_deref(),
            Some("We demand equal pay for equal work.")
        );
    }

    #[test]
    fn markers_are_case_insensitive() {
        let response = "---draft---\ntitle: Quiet Hours\nCATEGORY: other\n---end draft---\ntarget: nobody";
        let draft = extract_draft_from_response(response);
        assert_eq!(draft.title.as_deref(), Some("Quiet Hours"));
        assert_eq!(draft.category, Some(PetitionCategory::Other));
        assert_eq!(draft.target, None);
    }

    #[test]
    fn strips_markdown_decoration() {
        let response = "Title: **Bold Title Here**\nTarget: ## Board of Directors\nCategory: OTHER";
        let draft = extract_draft_from_response(response);
        assert_eq!(draft.title.as_deref(), Some("Bold Title Here"));
        assert_eq!(draft.target.as_deref(), Some("Board of Directors"));
    }

    #[test]
    fn keeps_interior_punctuation() {
        let response = "Title: Stop the 2024 lay-offs, *now*!\nTarget: CEO (Jane Smith)";
        let draft = extract_draft_from_response(response);
        assert_eq!(draft.title.as_deref(), Some("Stop the 2024 lay-offs, *now*!"));
        assert_eq!(draft.target.as_deref(), Some("CEO (Jane Smith)"));
    }

    #[test]
    fn accepts_bold_labels() {
        let response = "**Title:** Employees Demand Flexible Hours\n\n**Target:** HR Director";
        let draft = extract_draft_from_response(response);
        assert_eq!(draft.title.as_deref(), Some("Employees Demand Flexible Hours"));
        assert_eq!(draft.target.as_deref(), Some("HR Director"));
    }

    #[test]
    fn drops_unknown_category() {
        let response = "Title: Test\nTarget: Boss\nCategory: INVALID_CATEGORY";
        let draft = extract_draft_from_response(response);
        assert_eq!(draft.category, None);
        assert_eq!(draft.title.as_deref(), Some("Test"));
    }

    #[test]
    fn normalizes_category_spelling() {
        let draft = extract_draft_from_response("Category: **Remote_Work**.");
        assert_eq!(draft.category, Some(PetitionCategory::RemoteWork));
    }

    #[test]
    fn accepts_every_category() {
        for category in PetitionCategory::ALL {
            let response = format!("Title: Test\nTarget: Boss\nCategory: {}", category.as_str());
            let draft = extract_draft_from_response(&response);
            assert_eq!(draft.category, Some(category));
        }
    }

    #[test]
    fn conversational_reply_yields_empty_draft() {
        let response = "Can you tell me more about your workplace issue?";
        assert!(!has_draft_markers(response));
        assert!(extract_draft_from_response(response).is_empty());
    }

    #[test]
    fn empty_input_yields_empty_draft() {
        assert!(!has_draft_markers(""));
        assert!(extract_draft_from_response("").is_empty());
    }

    #[test]
    fn title_must_start_a_line() {
        let response = "A good Title: matters a lot, as does the Target: audience.";
        assert!(!has_draft_markers(response));
        assert!(extract_draft_from_response(response).is_empty());
    }

    #[test]
    fn preserves_multiline_description() {
        let response = "---DRAFT---
Title: Better Benefits
Target: HR
Category: BENEFITS
Description:
Line 1 of description.


Line 2 of description with more details.

- Bullet point 1
- Bullet point 2
---END DRAFT---";
        let draft = extract_draft_from_response(response);
        assert_eq!(
            draft.description.as_deref(),
            Some(
                "Line 1 of description.\n\n\nLine 2 of description with more details.\n\n- Bullet point 1\n- Bullet point 2"
            )
        );
    }

    #[test]
    fn description_on_label_line() {
        let response = "Description: We want lunch breaks.\nThey matter.\n---END DRAFT---\nThanks!";
        let draft = extract_draft_from_response(response);
        assert_eq!(
            draft.description.as_deref(),
            Some("We want lunch breaks.\nThey matter.")
        );
    }

    #[test]
    fn detects_markers() {
        assert!(has_draft_markers("---DRAFT---\nTitle: Test\n---END DRAFT---"));
        assert!(has_draft_markers("Here is your draft:\nTitle: My Petition"));
        assert!(has_draft_markers("intro ---Draft--- body"));
        assert!(has_draft_markers("  title: indented"));
    }

    #[test]
    fn reextracting_serialized_draft_is_stable() {
        let responses = [
            PARENTAL_LEAVE.to_string(),
            "Title: **Fair Pay**\nCategory: pay_equity\nDescription:\n- one\n\n- two".to_string(),
            "Target: HR\nDescription: short".to_string(),
        ];
        for response in responses {
            let first = extract_draft_from_response(&response);
            let second = extract_draft_from_response(&first.to_draft_block());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn keeps_underscores_in_values() {
        let draft = extract_draft_from_response("Title:_Draft_Policy_\nTarget:__HR__");
        assert_eq!(draft.title.as_deref(), Some("_Draft_Policy_"));
        assert_eq!(draft.target.as_deref(), Some("__HR__"));
    }

    #[test]
    fn bare_labels_give_empty_values() {
        let draft =
            extract_draft_from_response("---DRAFT---\nTitle: X\nTarget:\nDescription:\n---END DRAFT---");
        assert_eq!(draft.title.as_deref(), Some("X"));
        assert_eq!(draft.target.as_deref(), Some(""));
        assert_eq!(draft.description.as_deref(), Some(""));
        assert_eq!(draft.category, None);
    }

    #[test]
    fn bare_category_label_is_dropped() {
        let draft = extract_draft_from_response("Category:\nTitle: Y");
        assert_eq!(draft.category, None);
        assert_eq!(draft.title.as_deref(), Some("Y"));
    }
}
