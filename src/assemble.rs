//! Template assembly: placeholder substitution into the page skeleton.
//!
//! The skeleton and the behavior-script template are static strings embedded
//! at compile time, each containing unique `%%PINMAP_*%%` tokens. Assembly
//! is a pure fold over an ordered list of `(token, replacement)` pairs; each
//! replacement is a literal, single-occurrence text substitution. Fixed
//! assets are substituted before user-derived text so user content cannot
//! capture a token that has not been replaced yet.
//!
//! Two invariants close the stage:
//!
//! - every token named in the substitution list must exist in the template
//!   (a miss means the templates and the code have drifted);
//! - after the fold, no occurrence of the `%%PINMAP_` prefix may survive.
//!
//! Both are internal template errors, distinct from bad user input, and
//! abort assembly rather than emit a broken document.

use crate::input::MapSettings;
use crate::minify;
use crate::project::Projection;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Prefix shared by every placeholder token; the post-assembly scan keys on
/// it, so generated content must never legitimately contain it.
pub const PLACEHOLDER_PREFIX: &str = "%%PINMAP_";

const SKELETON: &str = include_str!("../static/skeleton.html");
const BEHAVIOR_TEMPLATE: &str = include_str!("../static/map.js");
const STYLE: &str = include_str!("../static/map.css");
// Vendored mapping-library assets, inserted without further minification.
const MAP_LIB_CSS: &str = include_str!("../static/vendor/leaflet.css");
const MAP_LIB_JS: &str = include_str!("../static/vendor/leaflet.js");

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("failed to read external asset file '{path}': {source}")]
    ExternalAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("internal template error: placeholder '{0}' not found in template")]
    MissingPlaceholder(&'static str),
    #[error("internal template error: unresolved placeholder near '{0}'")]
    UnresolvedPlaceholder(String),
}

/// Assemble the final HTML document from the projection and the external
/// asset lists carried on the raw map settings.
pub fn assemble(projection: &Projection, settings: &MapSettings) -> Result<String, AssembleError> {
    let behavior = substitute(
        BEHAVIOR_TEMPLATE,
        &[
            (
                "%%PINMAP_SETTINGS%%",
                &serde_json::to_string(&projection.settings)?,
            ),
            (
                "%%PINMAP_ICONS%%",
                &serde_json::to_string(projection.registry.assets())?,
            ),
            (
                "%%PINMAP_MARKERS%%",
                &serde_json::to_string(&projection.markers)?,
            ),
        ],
    )?;
    let behavior = minify::js(&behavior);

    let external_css = minify::css(&concat_files(&settings.external_css)?);
    let external_js = minify::js(&concat_files(&settings.external_js)?);

    let page = substitute(
        SKELETON,
        &[
            ("%%PINMAP_LEAFLET_CSS%%", MAP_LIB_CSS),
            ("%%PINMAP_LEAFLET_JS%%", MAP_LIB_JS),
            ("%%PINMAP_STYLE%%", &minify::css(STYLE)),
            ("%%PINMAP_LANG%%", &projection.settings.language),
            ("%%PINMAP_TITLE%%", &escape_html(&projection.settings.title)),
            ("%%PINMAP_EXTERNAL_CSS%%", &external_css),
            ("%%PINMAP_EXTERNAL_JS%%", &external_js),
            ("%%PINMAP_BEHAVIOR%%", &behavior),
        ],
    )?;

    if let Some(pos) = page.find(PLACEHOLDER_PREFIX) {
        let context: String = page[pos..].chars().take(40).collect();
        return Err(AssembleError::UnresolvedPlaceholder(context));
    }

    Ok(minify::html(&page))
}

/// Apply an ordered list of literal replacements to a template. Each token
/// must occur in the accumulated text exactly where the template put it;
/// a missing token aborts.
fn substitute(
    template: &str,
    replacements: &[(&'static str, &str)],
) -> Result<String, AssembleError> {
    replacements
        .iter()
        .copied()
        .try_fold(template.to_string(), |text, (token, value)| {
            if !text.contains(token) {
                return Err(AssembleError::MissingPlaceholder(token));
            }
            Ok(text.replacen(token, value, 1))
        })
}

/// Read and concatenate external asset files in configured order, each
/// followed by a newline. An unreadable file aborts, naming that path.
fn concat_files(paths: &[PathBuf]) -> Result<String, AssembleError> {
    let mut out = String::new();
    for path in paths {
        let content = fs::read_to_string(path).map_err(|source| AssembleError::ExternalAsset {
            path: path.clone(),
            source,
        })?;
        out.push_str(&content);
        out.push('\n');
    }
    Ok(out)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
