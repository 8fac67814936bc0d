//! Top-level orchestration: source text in, finished HTML document out.
//!
//! ```text
//! parse → validate → project (resolve + intern icons) → assemble → minify
//! ```
//!
//! The run is synchronous and all-or-nothing: any stage error aborts before
//! a single output byte is produced. Given identical input and identical
//! contents for every referenced file, the output is byte-identical across
//! runs.

use crate::assemble::{self, AssembleError};
use crate::icon::IconError;
use crate::input::{self, InputError};
use crate::project;
use crate::validate::{self, ValidateError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Validate(#[from] ValidateError),
    #[error(transparent)]
    Icon(#[from] IconError),
    #[error(transparent)]
    Assemble(#[from] AssembleError),
}

/// Generate the self-contained HTML document for a YAML map description.
pub fn generate(source: &str) -> Result<String, GenerateError> {
    let doc = input::parse(source)?;
    validate::validate(&doc)?;
    let projection = project::project(&doc)?;
    Ok(assemble::assemble(&projection, &doc.map_settings)?)
}
