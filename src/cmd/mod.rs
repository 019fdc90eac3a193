pub mod config;
pub mod draft;
pub mod link;
pub mod parse;
pub mod predict;
pub mod slug;

use igotyou::domain::category::PetitionCategory;
use igotyou::domain::link::ShareSource;

pub fn parse_category(value: &str) -> Result<PetitionCategory, String> {
    PetitionCategory::from_str(value).ok_or_else(|| {
        let known = PetitionCategory::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown category '{value}' (expected one of: {known})")
    })
}

pub fn parse_share_source(value: &str) -> Result<ShareSource, String> {
    ShareSource::from_str(value)
        .ok_or_else(|| format!("unknown source '{value}' (expected qr, share or email)"))
}
