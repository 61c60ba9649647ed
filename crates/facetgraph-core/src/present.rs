//! # Presentation Helpers
//!
//! Small pure functions the rendering side needs alongside the graph:
//! colour dimming for inactive nodes, duration labels, and URL slugs.

use crate::catalog::PrimaryItem;
use crate::types::ItemId;
use std::collections::{BTreeMap, HashMap, HashSet};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

// =============================================================================
// COLOUR DIMMING
// =============================================================================

/// Translucent variant of `color` at the given opacity.
///
/// Accepts `#rrggbb`, `#rgb`, and functional `rgb(...)`/`rgba(...)` syntax
/// (the first three integer components are used). Returns `None` for
/// anything else.
#[must_use]
pub fn dim_color(color: &str, amount: f64) -> Option<String> {
    let color = color.trim();
    let (r, g, b) = if color.starts_with("rgb") {
        parse_functional(color)?
    } else {
        parse_hex(color.strip_prefix('#')?)?
    };
    Some(format!("rgba({},{},{},{})", r, g, b, amount))
}

fn parse_functional(color: &str) -> Option<(u8, u8, u8)> {
    let mut parts = color
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(str::parse::<u8>);
    let r = parts.next()?.ok()?;
    let g = parts.next()?.ok()?;
    let b = parts.next()?.ok()?;
    Some((r, g, b))
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => Some((
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

// =============================================================================
// DURATION
// =============================================================================

/// Format minutes as `"Hh Mm"`, or `"Mm"` under an hour.
#[must_use]
pub fn format_duration(minutes: u64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours == 0 {
        format!("{}m", rest)
    } else {
        format!("{}h {}m", hours, rest)
    }
}

// =============================================================================
// SLUGS
// =============================================================================

/// URL slug of a free-text title.
///
/// Lowercases, strips diacritics, collapses everything that is not an
/// ASCII letter or digit into single dashes, and trims dashes at the ends.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    let lowered = text.to_lowercase();
    for c in lowered.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Assign every item a slug, unique across the catalog in most cases.
///
/// An explicit `slug` attribute wins and reserves its text. Otherwise the
/// title is slugified (the id when the title is empty); a slug already
/// handed out gets the slugified `directorName` (or `director`) attribute
/// appended, or the slugified id.
#[must_use]
pub fn assign_slugs(items: &[PrimaryItem]) -> BTreeMap<ItemId, String> {
    let mut slugs = BTreeMap::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();

    for item in items {
        if slugs.contains_key(&item.id) {
            continue;
        }
        let slug = if let Some(explicit) = item.attribute_str("slug") {
            *counts.entry(explicit.to_string()).or_default() += 1;
            explicit.to_string()
        } else {
            let mut base = slugify(&item.title);
            if base.is_empty() {
                base = slugify(item.id.as_str());
            }
            let count = counts.entry(base.clone()).or_default();
            *count += 1;
            let mut slug = if *count > 1 {
                let suffix = item
                    .attribute_str("directorName")
                    .or_else(|| item.attribute_str("director"))
                    .map(slugify)
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| slugify(item.id.as_str()));
                format!("{}-{}", base, suffix)
            } else {
                base
            };
            if taken.contains(&slug) {
                slug = format!("{}-{}", slug, slugify(item.id.as_str()));
            }
            slug
        };
        taken.insert(slug.clone());
        slugs.insert(item.id.clone(), slug);
    }
    slugs
}

// =============================================================================
// TESTS
// =============================================================================
