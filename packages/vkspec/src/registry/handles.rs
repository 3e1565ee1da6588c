//! Handle extraction from the `<types>` section.
//!
//! A handle definition looks like
//! `<type category="handle" parent="VkDevice" objtypeenum="VK_OBJECT_TYPE_FENCE"><type>VK_DEFINE_NON_DISPATCHABLE_HANDLE</type>(<name>VkFence</name>)</type>`;
//! one without `objtypeenum` is an alias: `<type category="handle" name="X" alias="Y"/>`.

use std::collections::BTreeMap;

use super::{applies_to, read_text_element};
use crate::alias::resolve_aliases;
use crate::error::{Result, VkSpecError};
use crate::types::Handle;
use crate::xml::{RegistryCursor, StartTag, TokenSource};

/// Extract every handle of the `<types>` section, aliases resolved.
///
/// The cursor must be positioned just after `<types>`; it is left just
/// after `</types>`.
pub fn parse_types<S: TokenSource>(
    cursor: &mut RegistryCursor<S>,
    api: &str,
) -> Result<BTreeMap<String, Handle>> {
    tracing::debug!(api, "Parsing registry types");
    let mut handles = BTreeMap::new();

    while let Some(tag) = cursor.next_element()? {
        if cursor.attribute(&tag, "category") == "handle" && applies_to(&tag, api) {
            parse_handle(cursor, &tag, &mut handles)?;
            cursor.element_end()?;
        } else {
            cursor.skip()?;
        }
    }

    resolve_aliases(&mut handles)?;
    tracing::debug!(handles = handles.len(), "Parsed registry handles");
    Ok(handles)
}

/// Read one handle definition whose start tag is `tag`.
///
/// Leaves the cursor inside the element; the caller consumes its end tag.
fn parse_handle<S: TokenSource>(
    cursor: &mut RegistryCursor<S>,
    tag: &StartTag,
    handles: &mut BTreeMap<String, Handle>,
) -> Result<()> {
    if cursor.attribute(tag, "objtypeenum").is_empty() {
        let name = cursor.attribute(tag, "name");
        if !name.is_empty() {
            tracing::trace!(handle = name, "Registered handle alias");
            handles.insert(
                name.to_string(),
                Handle {
                    name: name.to_string(),
                    alias: cursor.attribute(tag, "alias").to_string(),
                    ..Handle::default()
                },
            );
        }
        return Ok(());
    }

    let parent = cursor.attribute(tag, "parent").to_string();
    let type_name = read_text_element(cursor, "type", "handle")?;
    let name = read_text_element(cursor, "name", "handle")?;
    if name.is_empty() {
        return Err(VkSpecError::EmptyName {
            context: "handle".to_string(),
        });
    }

    tracing::trace!(handle = %name, parent = %parent, "Registered handle");
    handles.insert(
        name.clone(),
        Handle {
            name,
            type_name,
            alias: String::new(),
            parent,
        },
    );
    Ok(())
}
