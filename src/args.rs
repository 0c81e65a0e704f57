// args.rs
//! Command-line argument resolution.
//!
//! Two styles are accepted at the same time:
//! - positional tokens bound by index (`url title width height fullscreen
//!   maximized no-resize always-on-top x y`)
//! - named flags `--key=value` (or bare `--key`, meaning `true`)
//!
//! Positional bindings are merged first, named flags afterwards, so a named
//! flag always wins over the positional value for the same key. Resolution
//! never fails: anything malformed degrades to the field default.

use log::{debug, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_DOCUMENT: &str = "index.htm";
pub const DEFAULT_TITLE: &str = "Local HTML Viewer";
pub const DEFAULT_WIDTH: f64 = 1200.0;
pub const DEFAULT_HEIGHT: f64 = 800.0;

/// Key of the positional URL slot in the merge map.
const URL_KEY: &str = "";

/// Positional index -> logical key. Slot 6 is special-cased, see `seed_positional`.
const POSITIONAL_KEYS: [&str; 10] = [
    URL_KEY,
    "title",
    "width",
    "height",
    "fullscreen",
    "maximized",
    "resizable",
    "alwaysontop",
    "x",
    "y",
];

const RESIZABLE_SLOT: usize = 6;

/// Keys that mean something to the resolver. Anything else is carried in the
/// map but never read.
const KNOWN_KEYS: [&str; 10] = [
    "title",
    "width",
    "height",
    "fullscreen",
    "maximized",
    "resizable",
    "alwaysontop",
    "x",
    "y",
    "icon",
];

/// Fully defaulted window/content parameters handed to a window host.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Absolute, scheme-qualified URI of the document. `None` only when a
    /// local path could not be made absolute (no usable base directory).
    pub url: Option<String>,
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub fullscreen: bool,
    pub maximized: bool,
    pub resizable: bool,
    pub always_on_top: bool,
    /// `None` means "let the host decide" for that axis.
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub icon: Option<PathBuf>,
}

impl ResolvedConfig {
    /// The configuration used when no arguments are given at all.
    #[cfg(test)]
    pub fn defaults(base_dir: &Path) -> Self {
        resolve::<&str>(&[], base_dir)
    }

    /// True when at least one axis was given explicitly.
    pub fn has_position(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

/// Resolve raw tokens (program name already stripped) against `base_dir`,
/// which relative document paths are made absolute against.
pub fn resolve<S: AsRef<str>>(raw: &[S], base_dir: &Path) -> ResolvedConfig {
    let merged = merge(raw);
    let get = |key: &str| merged.get(key).map(String::as_str);

    let url = match get(URL_KEY) {
        Some(value) if !value.trim().is_empty() => to_uri(value.trim(), base_dir),
        _ => file_uri(Path::new(DEFAULT_DOCUMENT), base_dir),
    };

    ResolvedConfig {
        url,
        title: get("title").map_or_else(|| DEFAULT_TITLE.to_string(), str::to_string),
        width: parse_dimension(get("width"), DEFAULT_WIDTH),
        height: parse_dimension(get("height"), DEFAULT_HEIGHT),
        fullscreen: parse_flag(get("fullscreen")),
        maximized: parse_flag(get("maximized")),
        resizable: get("resizable").is_none_or(|value| parse_flag(Some(value))),
        always_on_top: parse_flag(get("alwaysontop")),
        x: parse_coordinate(get("x")),
        y: parse_coordinate(get("y")),
        icon: get("icon")
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from),
    }
}

/// Two-phase merge into a single key -> value map; last write per key wins.
fn merge<S: AsRef<str>>(raw: &[S]) -> HashMap<String, String> {
    let tokens: Vec<&str> = raw.iter().map(|token| token.as_ref()).collect();
    let mut merged = HashMap::new();

    // Phase 1: positional tokens, in order.
    let positional = tokens.iter().filter(|token| !token.starts_with("--"));
    for (index, token) in positional.enumerate() {
        seed_positional(&mut merged, index, token);
    }

    // Phase 2: named flags override.
    for token in &tokens {
        if let Some((key, value)) = parse_named(token) {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                debug!("Ignoring unknown flag --{}", key);
            }
            merged.insert(key, value);
        }
    }

    merged
}

fn seed_positional(merged: &mut HashMap<String, String>, index: usize, token: &str) {
    let Some(key) = POSITIONAL_KEYS.get(index) else {
        debug!("Ignoring extra positional argument #{}: {:?}", index, token);
        return;
    };
    let value = if index == RESIZABLE_SLOT {
        // The positional slot disables resizing, the logical key enables it.
        (!parse_flag(Some(token))).to_string()
    } else {
        token.to_string()
    };
    merged.insert(key.to_string(), value);
}

/// `--key=value` -> (lower-cased key, value); `--key` -> (key, "true").
fn parse_named(token: &str) -> Option<(String, String)> {
    let body = token.strip_prefix("--")?;
    let (key, value) = match body.split_once('=') {
        Some((key, value)) => (key, value),
        None => (body, "true"),
    };
    if key.is_empty() {
        debug!("Ignoring flag without a key: {:?}", token);
        return None;
    }
    Some((key.to_lowercase(), value.to_string()))
}

/// `true` (any case) or `1`; everything else, absence included, is false.
pub fn parse_flag(value: Option<&str>) -> bool {
    match value {
        Some(value) => {
            let value = value.trim();
            value.eq_ignore_ascii_case("true") || value == "1"
        }
        None => false,
    }
}

/// Finite and strictly positive, otherwise `default`.
fn parse_dimension(value: Option<&str>, default: f64) -> f64 {
    let Some(raw) = value else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed > 0.0 => parsed,
        _ => {
            debug!("Invalid dimension {:?}, using {}", raw, default);
            default
        }
    }
}

/// Finite and non-negative, otherwise unset. `center` is an explicit unset.
fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    let raw = value?.trim();
    if raw.eq_ignore_ascii_case("center") {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => Some(parsed),
        _ => {
            debug!("Invalid coordinate {:?}, leaving axis unset", raw);
            None
        }
    }
}

fn has_known_scheme(value: &str) -> bool {
    ["http://", "https://", "file://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Network and file URIs pass through; anything else is a filesystem path.
fn to_uri(value: &str, base_dir: &Path) -> Option<String> {
    if has_known_scheme(value) {
        Some(value.to_string())
    } else {
        file_uri(Path::new(value), base_dir)
    }
}

/// `file://` URI for `path`, or `None` if it cannot be made absolute.
fn file_uri(path: &Path, base_dir: &Path) -> Option<String> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    };
    match Url::from_file_path(&absolute) {
        Ok(url) => Some(url.to_string()),
        Err(()) => {
            warn!("Cannot build an absolute file URI for {}", absolute.display());
            None
        }
    }
}
