//! Orchestrator that ties the header scanner and registry extractors together.

use std::fs;
use std::path::Path;

use crate::config::SpecSources;
use crate::error::{Result, VkSpecError};
use crate::header::scan_header;
use crate::registry::{parse_registry, Section};
use crate::types::Data;
use crate::xml::{DocumentTokens, RegistryCursor};

/// Read both documents and build the unified specification model.
///
/// # Arguments
/// * `sources` - Header and registry paths plus the target API
///
/// # Returns
/// The assembled `Data`, or the first fatal error; no partial model is
/// produced.
pub fn parse(sources: &SpecSources) -> Result<Data> {
    sources.validate()?;

    let header = read_document(&sources.header)?;
    let registry = read_document(&sources.registry)?;

    parse_documents(&header, &registry, &sources.api)
}

/// Build the unified specification model from document text.
///
/// # Arguments
/// * `header` - Reference header text
/// * `registry` - Registry XML text
/// * `api` - API identifier registry elements must apply to
pub fn parse_documents(header: &str, registry: &str, api: &str) -> Result<Data> {
    let mut data = Data {
        types: scan_header(header)?,
        ..Data::default()
    };

    let mut cursor = RegistryCursor::new(DocumentTokens::parse(registry)?);
    for section in parse_registry(&mut cursor, api)? {
        match section {
            Section::Handles(handles) => data.handles.extend(handles),
            Section::Commands(commands) => data.commands.extend(commands),
            Section::Extensions(extensions) => data.extensions.extend(extensions),
        }
    }

    tracing::info!(
        api,
        types = data.types.len(),
        handles = data.handles.len(),
        commands = data.commands.len(),
        extensions = data.extensions.len(),
        "Parsed specification"
    );
    Ok(data)
}

fn read_document(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "Reading document");
    fs::read_to_string(path).map_err(|source| VkSpecError::Io {
        path: path.to_path_buf(),
        source,
    })
}
