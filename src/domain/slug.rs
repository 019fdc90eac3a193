use uuid::Uuid;

pub const DEFAULT_SLUG_LENGTH: usize = 50;
pub const SUFFIX_LENGTH: usize = 6;

const SUFFIX_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Lowercases `title` and collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen, then cuts the result to `max_length`.
///
/// Truncation is applied after trimming, so a cut in the middle of a
/// separator can leave a trailing hyphen.
pub fn generate_base_slug(title: &str, max_length: usize) -> String {
    let lower = title.to_lowercase();
    let mut collapsed = String::with_capacity(lower.len());
    let mut prev_dash = false;
    for ch in lower.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            collapsed.push(ch);
            prev_dash = false;
        } else if !prev_dash {
            collapsed.push('-');
            prev_dash = true;
        }
    }

    let trimmed = collapsed.strip_prefix('-').unwrap_or(&collapsed);
    let trimmed = trimmed.strip_suffix('-').unwrap_or(trimmed);

    // Only ASCII survives the collapse, so byte and char lengths agree.
    let mut slug = trimmed.to_string();
    slug.truncate(max_length);
    slug
}

/// Base slug plus a random six-character suffix.
pub fn generate_slug(title: &str, max_length: usize) -> String {
    let base = generate_base_slug(title, max_length);
    format!("{base}-{}", random_suffix())
}

fn random_suffix() -> String {
    // The first six bytes of a v4 UUID are fully random.
    let id = Uuid::new_v4();
    id.as_bytes()[..SUFFIX_LENGTH]
        .iter()
        .map(|byte| SUFFIX_ALPHABET[(byte & 0x3f) as usize] as char)
        .collect()
}
