use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PetitionCategory {
    PayEquity,
    Benefits,
    WorkplaceSafety,
    RemoteWork,
    Layoffs,
    Harassment,
    Discrimination,
    Union,
    PolicyChange,
    Environmental,
    Other,
}

impl PetitionCategory {
    pub const ALL: [PetitionCategory; 11] = [
        PetitionCategory::PayEquity,
        PetitionCategory::Benefits,
        PetitionCategory::WorkplaceSafety,
        PetitionCategory::RemoteWork,
        PetitionCategory::Layoffs,
        PetitionCategory::Harassment,
        PetitionCategory::Discrimination,
        PetitionCategory::Union,
        PetitionCategory::PolicyChange,
        PetitionCategory::Environmental,
        PetitionCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PetitionCategory::PayEquity => "PAY_EQUITY",
            PetitionCategory::Benefits => "BENEFITS",
            PetitionCategory::WorkplaceSafety => "WORKPLACE_SAFETY",
            PetitionCategory::RemoteWork => "REMOTE_WORK",
            PetitionCategory::Layoffs => "LAYOFFS",
            PetitionCategory::Harassment => "HARASSMENT",
            PetitionCategory::Discrimination => "DISCRIMINATION",
            PetitionCategory::Union => "UNION",
            PetitionCategory::PolicyChange => "POLICY_CHANGE",
            PetitionCategory::Environmental => "ENVIRONMENTAL",
            PetitionCategory::Other => "OTHER",
        }
    }

    /// Human-readable label shown next to a petition.
    pub fn label(&self) -> &'static str {
        match self {
            PetitionCategory::PayEquity => "Pay Equity",
            PetitionCategory::Benefits => "Benefits",
            PetitionCategory::WorkplaceSafety => "Workplace Safety",
            PetitionCategory::RemoteWork => "Remote Work",
            PetitionCategory::Layoffs => "Layoffs",
            PetitionCategory::Harassment => "Harassment",
            PetitionCategory::Discrimination => "Discrimination",
            PetitionCategory::Union => "Union/Organizing",
            PetitionCategory::PolicyChange => "Policy Change",
            PetitionCategory::Environmental => "Environmental",
            PetitionCategory::Other => "Other",
        }
    }

    /// Matches a category tag, ignoring case and surrounding whitespace.
    pub fn from_str(value: &str) -> Option<Self> {
        let tag = value.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == tag)
    }
}
