//! Extension extraction from the `<extensions>` section.

use std::collections::BTreeMap;

use super::applies_to;
use crate::config::{is_listed, DEPENDENCY_SEPARATOR, OBJECT_TYPE_ENUM, OBJECT_TYPE_PREFIX};
use crate::error::{Result, VkSpecError};
use crate::types::Extension;
use crate::xml::{RegistryCursor, StartTag, TokenSource};

/// Extract every extension of the `<extensions>` section.
///
/// Contributed handles are canonicalized against each extension's
/// contributed types once all extensions are read.
///
/// # Errors
/// `VkSpecError::PromotedAndDeprecated` if an extension declares both
/// a promotion and a deprecation target.
pub fn parse_extensions<S: TokenSource>(
    cursor: &mut RegistryCursor<S>,
    api: &str,
) -> Result<BTreeMap<String, Extension>> {
    tracing::debug!(api, "Parsing registry extensions");
    let mut extensions = BTreeMap::new();

    while let Some(tag) = cursor.next_element()? {
        if tag.name != "extension" {
            cursor.skip()?;
            continue;
        }

        let mut extension = read_header(cursor, &tag, api)?;
        while let Some(child) = cursor.next_element()? {
            if child.name == "require" && applies_to(&child, api) {
                read_requirements(cursor, &mut extension)?;
            } else {
                cursor.skip()?;
            }
        }

        tracing::trace!(
            extension = %extension.name,
            types = extension.types.len(),
            commands = extension.commands.len(),
            "Registered extension"
        );
        extensions.insert(extension.name.clone(), extension);
    }

    for extension in extensions.values_mut() {
        canonicalize_handles(extension);
    }

    tracing::debug!(extensions = extensions.len(), "Parsed registry extensions");
    Ok(extensions)
}

/// Build an extension from the attributes of its start tag.
fn read_header<S: TokenSource>(
    cursor: &RegistryCursor<S>,
    tag: &StartTag,
    api: &str,
) -> Result<Extension> {
    let name = cursor.attribute(tag, "name");
    let promoted = cursor.attribute(tag, "promotedto");
    let deprecated = cursor.attribute(tag, "deprecatedby");
    if !promoted.is_empty() && !deprecated.is_empty() {
        return Err(VkSpecError::PromotedAndDeprecated {
            extension: name.to_string(),
            promoted: promoted.to_string(),
            deprecated: deprecated.to_string(),
        });
    }

    Ok(Extension {
        name: name.to_string(),
        kind: cursor.attribute(tag, "type").to_string(),
        platform: cursor.attribute(tag, "platform").to_string(),
        promoted: promoted.to_string(),
        deprecated: deprecated.to_string(),
        valid: is_listed(cursor.attribute(tag, "supported"), api),
        provisional: cursor.attribute(tag, "provisional") == "true",
        depends: flatten_depends(cursor.attribute(tag, "depends")),
        ..Extension::default()
    })
}

/// Flatten a dependency expression into an ordered list of names.
///
/// Parentheses are dropped and both combinators become separators; the
/// result is read as "all of".
///
/// # Examples
/// ```
/// use vkspec::registry::extensions::flatten_depends;
///
/// assert_eq!(
///     flatten_depends("(VK_KHR_get_physical_device_properties2,VK_VERSION_1_1)+VK_KHR_surface"),
///     ["VK_KHR_get_physical_device_properties2", "VK_VERSION_1_1", "VK_KHR_surface"]
/// );
/// assert!(flatten_depends("").is_empty());
/// ```
#[must_use]
pub fn flatten_depends(expression: &str) -> Vec<String> {
    let stripped: String = expression
        .chars()
        .filter(|c| !matches!(c, '(' | ')'))
        .collect();
    if stripped.is_empty() {
        return Vec::new();
    }
    DEPENDENCY_SEPARATOR
        .split(&stripped)
        .map(str::to_string)
        .collect()
}

/// Record the items of one `<require>` block.
///
/// Consumes the block's end tag.
fn read_requirements<S: TokenSource>(
    cursor: &mut RegistryCursor<S>,
    extension: &mut Extension,
) -> Result<()> {
    while let Some(item) = cursor.next_element()? {
        cursor.element_end()?;

        let name = cursor.attribute(&item, "name");
        match item.name.as_str() {
            "enum" => {
                let extends = cursor.attribute(&item, "extends");
                if extends == OBJECT_TYPE_ENUM {
                    extension.handles.push(name.to_string());
                } else if !extends.is_empty() {
                    extension
                        .extends
                        .entry(extends.to_string())
                        .or_default()
                        .push(name.to_string());
                }
            }
            "type" if !name.is_empty() => extension.types.push(name.to_string()),
            "command" if !name.is_empty() => extension.commands.push(name.to_string()),
            _ => {}
        }
    }
    Ok(())
}

/// Replace object type enumerators with the handle types they denote.
fn canonicalize_handles(extension: &mut Extension) {
    let Extension { handles, types, name, .. } = extension;
    for handle in handles.iter_mut() {
        match canonical_handle_name(handle, types) {
            Some(canonical) => *handle = canonical.to_string(),
            None => tracing::warn!(
                extension = %name,
                enumerator = %handle,
                "No contributed type matches object type enumerator"
            ),
        }
    }
}

/// Find the contributed type an object type enumerator names.
///
/// `VK_OBJECT_TYPE_DEBUG_UTILS_MESSENGER_EXT` matches `VkDebugUtilsMessengerEXT`.
/// The first match wins.
#[must_use]
pub fn canonical_handle_name<'a>(enumerator: &str, types: &'a [String]) -> Option<&'a str> {
    let stem = enumerator
        .strip_prefix(OBJECT_TYPE_PREFIX)
        .unwrap_or(enumerator)
        .replace('_', "");
    let target = format!("VK{stem}");
    types
        .iter()
        .find(|t| t.to_uppercase() == target)
        .map(String::as_str)
}
