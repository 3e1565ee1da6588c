//! Command extraction from the `<commands>` section.

use std::collections::BTreeMap;

use super::{applies_to, read_text_element};
use crate::alias::resolve_aliases;
use crate::config::is_listed;
use crate::error::{Result, VkSpecError};
use crate::types::{Command, CommandParam};
use crate::xml::{RegistryCursor, TokenSource};

/// Extract every command of the `<commands>` section, aliases resolved.
///
/// Commands whose `export` or `api` list does not name `api` are skipped.
pub fn parse_commands<S: TokenSource>(
    cursor: &mut RegistryCursor<S>,
    api: &str,
) -> Result<BTreeMap<String, Command>> {
    tracing::debug!(api, "Parsing registry commands");
    let mut commands = BTreeMap::new();

    while let Some(tag) = cursor.next_element()? {
        let export = cursor.attribute(&tag, "export");
        if (!export.is_empty() && !is_listed(export, api)) || !applies_to(&tag, api) {
            cursor.skip()?;
            continue;
        }

        let alias = cursor.attribute(&tag, "alias");
        if !alias.is_empty() {
            let name = cursor.attribute(&tag, "name");
            tracing::trace!(command = name, alias, "Registered command alias");
            commands.insert(
                name.to_string(),
                Command {
                    name: name.to_string(),
                    alias: alias.to_string(),
                    ..Command::default()
                },
            );
            cursor.element_end()?;
            continue;
        }

        let command = parse_command(cursor, api)?;
        tracing::trace!(
            command = %command.name,
            params = command.params.len(),
            "Registered command"
        );
        commands.insert(command.name.clone(), command);
    }

    resolve_aliases(&mut commands)?;
    tracing::debug!(commands = commands.len(), "Parsed registry commands");
    Ok(commands)
}

/// Read `<proto>` and the `<param>` children of one `<command>`.
///
/// Consumes the command's end tag.
fn parse_command<S: TokenSource>(cursor: &mut RegistryCursor<S>, api: &str) -> Result<Command> {
    let proto = cursor
        .next_element()?
        .ok_or_else(|| VkSpecError::unexpected_eof("command"))?;
    if proto.name != "proto" {
        return Err(VkSpecError::unexpected_element("command", "proto", proto.name));
    }
    let return_type = read_text_element(cursor, "type", "command prototype")?;
    let name = read_text_element(cursor, "name", "command prototype")?;
    cursor.element_end()?;

    if name.is_empty() {
        return Err(VkSpecError::EmptyName {
            context: "command prototype".to_string(),
        });
    }

    let context = format!("parameter of {name}");
    let mut params = Vec::new();
    while let Some(child) = cursor.next_element()? {
        if child.name != "param" || !applies_to(&child, api) {
            cursor.skip()?;
            continue;
        }
        params.push(parse_param(cursor, &context)?);
    }

    Ok(Command {
        return_type,
        name,
        alias: String::new(),
        params,
    })
}

/// Read `[const] <type>T</type>[*] <name>n</name>` and the param end tag.
fn parse_param<S: TokenSource>(
    cursor: &mut RegistryCursor<S>,
    context: &str,
) -> Result<CommandParam> {
    let is_read_only = cursor
        .next_text()?
        .is_some_and(|text| text.trim() == "const");
    let type_name = read_text_element(cursor, "type", context)?;
    let is_pointer = cursor.next_text()?.is_some_and(|text| text.trim() == "*");
    let var_name = read_text_element(cursor, "name", context)?;
    cursor.element_end()?;

    Ok(CommandParam {
        type_name,
        is_read_only,
        is_pointer,
        var_name,
    })
}
