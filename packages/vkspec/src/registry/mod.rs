//! Registry document (`vk.xml`) extraction.
//!
//! The walk visits the children of `<registry>` and hands each section it
//! knows to its extractor:
//! - `<types>`: handles ([`handles`])
//! - `<commands>`: commands ([`commands`])
//! - `<extensions>`: extensions ([`extensions`])
//!
//! Every other section is skipped whole.

pub mod commands;
pub mod extensions;
pub mod handles;

use std::collections::BTreeMap;

use crate::config::is_listed;
use crate::error::{Result, VkSpecError};
use crate::types::{Command, Extension, Handle};
use crate::xml::{RegistryCursor, StartTag, TokenSource};

/// The entity collection extracted from one registry section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Handles(BTreeMap<String, Handle>),
    Commands(BTreeMap<String, Command>),
    Extensions(BTreeMap<String, Extension>),
}

/// Walk the registry document and extract every known section.
///
/// # Arguments
/// * `cursor` - Cursor positioned at the start of the document
/// * `api` - API identifier elements must apply to
///
/// # Errors
/// Fails if the root is not `<registry>` or any section is malformed.
pub fn parse_registry<S: TokenSource>(
    cursor: &mut RegistryCursor<S>,
    api: &str,
) -> Result<Vec<Section>> {
    let root = cursor
        .next_element()?
        .ok_or_else(|| VkSpecError::unexpected_eof("registry"))?;
    if root.name != "registry" {
        return Err(VkSpecError::UnknownRoot(root.name));
    }

    let mut sections = Vec::new();
    while let Some(section) = cursor.next_element()? {
        match section.name.as_str() {
            "types" => sections.push(Section::Handles(handles::parse_types(cursor, api)?)),
            "commands" => sections.push(Section::Commands(commands::parse_commands(cursor, api)?)),
            "extensions" => {
                sections.push(Section::Extensions(extensions::parse_extensions(cursor, api)?));
            }
            other => {
                tracing::debug!(section = other, "Skipping registry section");
                cursor.skip()?;
            }
        }
    }
    Ok(sections)
}

/// Check whether an element's `api` attribute admits `api`.
///
/// Elements without the attribute apply to every API.
pub(crate) fn applies_to(tag: &StartTag, api: &str) -> bool {
    let list = tag.attribute("api");
    list.is_empty() || is_listed(list, api)
}

/// Read `<expected>text</expected>` as the next child element.
///
/// An element without text yields an empty string.
pub(crate) fn read_text_element<S: TokenSource>(
    cursor: &mut RegistryCursor<S>,
    expected: &str,
    context: &str,
) -> Result<String> {
    let tag = cursor
        .next_element()?
        .ok_or_else(|| VkSpecError::unexpected_eof(context))?;
    if tag.name != expected {
        return Err(VkSpecError::unexpected_element(context, expected, tag.name));
    }
    let text = cursor.next_text()?.unwrap_or_default();
    cursor.element_end()?;
    Ok(text)
}
