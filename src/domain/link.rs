use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, AppResult};

pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";

/// Channel a petition link was handed out through, carried as `?ref=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareSource {
    Qr,
    Share,
    Email,
}

impl ShareSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareSource::Qr => "qr",
            ShareSource::Share => "share",
            ShareSource::Email => "email",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "qr" => Some(ShareSource::Qr),
            "share" => Some(ShareSource::Share),
            "email" => Some(ShareSource::Email),
            _ => None,
        }
    }
}

/// How a signature reached the petition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureSource {
    Direct,
    QrCode,
    Share,
    Email,
}

impl SignatureSource {
    /// Classifies a signature by the `ref=` tag in the page it was signed from.
    pub fn from_referrer(referrer: Option<&str>) -> Self {
        let Some(referrer) = referrer else {
            return SignatureSource::Direct;
        };
        if referrer.contains("ref=qr") {
            SignatureSource::QrCode
        } else if referrer.contains("ref=share") {
            SignatureSource::Share
        } else if referrer.contains("ref=email") {
            SignatureSource::Email
        } else {
            SignatureSource::Direct
        }
    }
}

impl From<ShareSource> for SignatureSource {
    fn from(source: ShareSource) -> Self {
        match source {
            ShareSource::Qr => SignatureSource::QrCode,
            ShareSource::Share => SignatureSource::Share,
            ShareSource::Email => SignatureSource::Email,
        }
    }
}

pub fn petition_url(base_url: &str, slug: &str, source: Option<ShareSource>) -> AppResult<Url> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(AppError::Validation("slug must not be empty".to_string()));
    }

    let base = Url::parse(base_url)?;
    let mut url = base.join(&format!("/p/{slug}"))?;
    if let Some(source) = source {
        url.query_pairs_mut().append_pair("ref", source.as_str());
    }
    Ok(url)
}
