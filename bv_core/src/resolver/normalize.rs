//! Identifier normalization

use crate::types::TechBase;

/// Parenthesised tags dropped without changing the item
const NOISE_TAGS: &[&str] = &["r", "t", "armored", "omnipod", "split"];

/// Tags marking a one-shot launcher, keyed as `<launcher>-os`
const ONE_SHOT_TAGS: &[&str] = &["os", "ios"];

/// Result of normalizing a raw identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    /// Lowercase, dash-separated catalog key without tech markers
    pub key: String,
    /// Tech base named by the identifier itself
    pub tech: Option<TechBase>,
}

/// Lowercase alphanumeric form used to key lookup tables and slot names
pub fn table_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Normalize a raw identifier into a catalog key
pub fn normalize(raw: &str) -> NormalizedName {
    let mut text = raw.trim();
    if let Some(pos) = text.find('@') {
        text = &text[..pos];
    }

    let tags = strip_tags(text);
    let (body, tag_tech) = (tags.body, tags.tech);
    let (prefix_tech, body) = strip_tech_prefix(body.trim());

    let mut words = split_words(body);
    if words.first().map(String::as_str) == Some("ammo") {
        let ammo = words.remove(0);
        words.push(ammo);
    }
    // "AC/10 Ammo 2" style bin numbering
    if words.len() > 2 && words[words.len() - 2] == "ammo" && words[words.len() - 1].chars().all(|c| c.is_ascii_digit()) {
        words.pop();
    }
    if tags.one_shot && !words.is_empty() && words.last().map(String::as_str) != Some("os") {
        words.push("os".to_string());
    }

    NormalizedName {
        key: words.join("-"),
        tech: tag_tech.or(prefix_tech),
    }
}

/// Tech base named by an identifier or slot entry, if any
pub fn tech_marker(raw: &str) -> Option<TechBase> {
    normalize(raw).tech
}

/// Character-sorted key, equal for identifiers that differ only in word order
pub fn sorted_key(raw: &str) -> String {
    let mut chars: Vec<char> = normalize(raw).key.chars().filter(|c| *c != '-').collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

/// Identifier body with its tags removed
struct Stripped {
    body: String,
    tech: Option<TechBase>,
    one_shot: bool,
}

/// Remove parenthesised and bracketed tags, remembering tech and one-shot tags
fn strip_tags(text: &str) -> Stripped {
    let mut body = String::with_capacity(text.len());
    let mut tag = String::new();
    let mut tech = None;
    let mut one_shot = false;
    let mut depth = 0usize;

    for c in text.chars() {
        match c {
            '(' | '[' => {
                if depth == 0 {
                    tag.clear();
                }
                depth += 1;
            }
            ')' | ']' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    let compact = table_key(&tag);
                    match compact.as_str() {
                        "clan" | "cl" => tech = Some(TechBase::Clan),
                        "is" | "innersphere" => tech = Some(TechBase::InnerSphere),
                        other if ONE_SHOT_TAGS.contains(&other) => one_shot = true,
                        other if NOISE_TAGS.contains(&other) => {}
                        other => tracing::trace!("dropping identifier tag '{}'", other),
                    }
                    body.push(' ');
                }
            }
            _ if depth > 0 => tag.push(c),
            _ => body.push(c),
        }
    }
    Stripped { body, tech, one_shot }
}

/// Strip "Clan ", "CL" and "IS" prefixes in either spelling scheme
fn strip_tech_prefix(text: &str) -> (Option<TechBase>, &str) {
    let lower = text.to_ascii_lowercase();
    if lower.starts_with("clan ") || lower.starts_with("clan-") {
        return (Some(TechBase::Clan), &text[5..]);
    }

    let marker_end = |rest: &str| {
        rest.chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == ' ')
    };
    if let Some(rest) = text.strip_prefix("CL") {
        if marker_end(rest) {
            return (Some(TechBase::Clan), rest);
        }
    }
    if let Some(rest) = text.strip_prefix("IS") {
        if marker_end(rest) {
            return (Some(TechBase::InnerSphere), rest);
        }
    }
    (None, text)
}

/// Split on separators, case changes and letter/digit boundaries
fn split_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        // `current` is lowercased, so case boundaries read the raw previous char
        if i > 0 && !current.is_empty() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_digit() != c.is_ascii_digit()
                || (prev.is_ascii_lowercase() && c.is_ascii_uppercase())
                || (prev.is_ascii_uppercase() && c.is_ascii_uppercase() && next_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c.to_ascii_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
