//! Petition drafting toolkit: parses assistant replies into petition drafts,
//! generates petition slugs and share links, and scores petitions through a
//! chat-completion service.

pub mod cache;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod infra;
pub mod logging;
pub mod parser;
pub mod prompt;
pub mod services;
pub mod workflow;

pub use domain::category::PetitionCategory;
pub use domain::draft::ParsedDraft;
pub use domain::slug::{DEFAULT_SLUG_LENGTH, generate_base_slug, generate_slug};
pub use error::{AppError, AppResult};
pub use parser::{extract_draft_from_response, has_draft_markers};
