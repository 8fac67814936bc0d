//! # pinmap
//!
//! Compile a declarative YAML map description — markers, icons, popups,
//! styling — into a single self-contained HTML document that renders an
//! interactive map. Everything the page needs at view time is inlined:
//! the mapping library, the stylesheet, the behavior script, and every
//! icon as a base64 `data:` URL. Only map tile imagery is streamed.
//!
//! # Architecture: One-Shot Pipeline
//!
//! ```text
//! YAML → parse → validate → project (resolve + intern icons) → assemble → HTML
//! ```
//!
//! Each stage is a pure function over the previous stage's output; the only
//! accumulating state is the icon registry, which is scoped to a single run.
//! Every failure is fatal — this is a batch generator, not a service, so
//! there is no retry policy and no partial output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`input`] | serde types for the map document and YAML parsing |
//! | [`validate`] | coordinate range and uniqueness checks |
//! | [`icon`] | icon resolution cascade, SVG recoloring, dedup registry |
//! | [`project`] | marker/settings projection into the page-script shapes |
//! | [`minify`] | light CSS/JS/HTML minifiers |
//! | [`assemble`] | placeholder substitution into the page skeleton |
//! | [`generate`] | top-level orchestration |
//!
//! # Design Decisions
//!
//! ## Icon Deduplication
//!
//! A document with a hundred markers usually uses two or three distinct
//! icons. Resolved icons are interned in an append-only registry keyed on
//! structural equality (mime + payload); markers reference registry indices,
//! so each distinct asset is embedded exactly once. Indices are assigned in
//! first-seen order and never move, which keeps output deterministic.
//!
//! ## One Recolorable SVG Per Built-in Icon
//!
//! Bundled icons are vector files carrying a single `__FILL__` token.
//! Recoloring is a text substitution at generation time, so one file serves
//! every color the user asks for. Raster icons are embedded byte-for-byte;
//! they do not support dynamic color.
//!
//! ## Placeholder Templates Over a Template Engine
//!
//! The page skeleton and behavior script are static strings with unique
//! `%%PINMAP_*%%` tokens. Assembly is a fold over an ordered replacement
//! list with two hard post-conditions: every token must be found, and none
//! may survive. A template engine would buy nothing here — there are no
//! loops or conditionals in the skeleton, only eight substitution points.
//!
//! ## Vendored Mapping Runtime
//!
//! The generated page must work from a `file://` URL with no network fetch
//! for code. The mapping library (a Leaflet-compatible subset) ships inside
//! the binary, pre-compacted, and is inlined into every document.

pub mod assemble;
pub mod generate;
pub mod icon;
pub mod input;
pub mod minify;
pub mod project;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
