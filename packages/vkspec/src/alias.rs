//! Alias chain resolution shared by types, handles and commands.
//!
//! An aliased entity carries no payload of its own until this pass copies the
//! payload of the terminal (non-aliased) definition at the end of its chain.

use std::collections::{BTreeMap, HashSet};

use crate::error::{Result, VkSpecError};
use crate::types::{Command, Handle, Type};

/// An entity that may stand in for another entity of the same collection.
pub trait Aliased: Clone {
    /// Name of the entity this one aliases, empty for terminal definitions.
    fn alias(&self) -> &str;

    /// Copy the substantive payload of `terminal` onto `self`.
    fn adopt(&mut self, terminal: &Self);
}

impl Aliased for Type {
    fn alias(&self) -> &str {
        &self.alias
    }

    fn adopt(&mut self, terminal: &Self) {
        self.declaration.clone_from(&terminal.declaration);
    }
}

impl Aliased for Handle {
    fn alias(&self) -> &str {
        &self.alias
    }

    fn adopt(&mut self, terminal: &Self) {
        self.type_name.clone_from(&terminal.type_name);
        self.parent.clone_from(&terminal.parent);
    }
}

impl Aliased for Command {
    fn alias(&self) -> &str {
        &self.alias
    }

    fn adopt(&mut self, terminal: &Self) {
        self.return_type.clone_from(&terminal.return_type);
        self.params.clone_from(&terminal.params);
    }
}

/// Give every aliased entity the payload of its terminal definition.
///
/// A chain that names a missing entity simply ends and leaves the aliasing
/// entity untouched. Running the pass twice yields the same collection.
///
/// # Errors
/// `VkSpecError::AliasCycle` if a chain revisits a name.
pub fn resolve_aliases<T: Aliased>(entities: &mut BTreeMap<String, T>) -> Result<()> {
    let view: &BTreeMap<String, T> = entities;
    let mut resolved: Vec<(String, String)> = Vec::new();
    for (name, entity) in view {
        if entity.alias().is_empty() {
            continue;
        }
        if let Some(terminal) = find_terminal(view, name)? {
            resolved.push((name.clone(), terminal.to_string()));
        }
    }

    for (name, terminal) in resolved {
        let Some(source) = entities.get(&terminal).cloned() else {
            continue;
        };
        if let Some(entity) = entities.get_mut(&name) {
            entity.adopt(&source);
        }
    }

    Ok(())
}

/// Follow the chain starting at `start` to its terminal definition.
///
/// Returns `None` when the chain runs into a name that is not defined.
fn find_terminal<'a, T: Aliased>(
    entities: &'a BTreeMap<String, T>,
    start: &'a str,
) -> Result<Option<&'a str>> {
    let mut seen: HashSet<&str> = HashSet::from([start]);
    let mut chain = vec![start];
    let mut current = start;

    loop {
        let Some(entity) = entities.get(current) else {
            return Ok(None);
        };
        let next = entity.alias();
        if next.is_empty() {
            return Ok(Some(current));
        }
        chain.push(next);
        if !seen.insert(next) {
            return Err(VkSpecError::AliasCycle {
                chain: chain.into_iter().map(String::from).collect(),
            });
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CommandParam;

    /// Build a type map from `(name, alias, declaration)` rows, with
    /// declaration lines separated by `;`.
    fn types(entries: &[(&str, &str, &str)]) -> BTreeMap<String, Type> {
        entries
            .iter()
            .map(|(name, alias, decl)| {
                (
                    (*name).to_string(),
                    Type {
                        name: (*name).to_string(),
                        alias: (*alias).to_string(),
                        declaration: decl
                            .split(';')
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_single_alias() {
        let mut map = types(&[("VkFoo", "", "int a"), ("VkFooKHR", "VkFoo", "")]);
        resolve_aliases(&mut map).unwrap();
        assert_eq!(map["VkFooKHR"].declaration, ["int a"]);
        assert_eq!(map["VkFooKHR"].alias, "VkFoo");
    }

    #[test]
    fn test_deep_chain_resolves_to_terminal() {
        let mut map = types(&[
            ("D", "C", ""),
            ("C", "B", ""),
            ("B", "A", ""),
            ("A", "", "x;y"),
        ]);
        resolve_aliases(&mut map).unwrap();
        for name in ["B", "C", "D"] {
            assert_eq!(map[name].declaration, ["x", "y"], "chain from {name}");
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut map = types(&[("B", "A", ""), ("C", "B", ""), ("A", "", "x")]);
        resolve_aliases(&mut map).unwrap();
        let once = map.clone();
        resolve_aliases(&mut map).unwrap();
        assert_eq!(map, once);
    }

    #[test]
    fn test_missing_target_ends_chain() {
        let mut map = types(&[("B", "A", ""), ("C", "B", "")]);
        resolve_aliases(&mut map).unwrap();
        assert!(map["B"].declaration.is_empty());
        assert!(map["C"].declaration.is_empty());
    }

    #[test]
    fn test_cycle_is_an_error() {
        let mut map = types(&[("A", "B", ""), ("B", "A", "")]);
        let err = resolve_aliases(&mut map).unwrap_err();
        assert!(matches!(err, VkSpecError::AliasCycle { .. }));
    }

    #[test]
    fn test_self_alias_is_a_cycle() {
        let mut map = types(&[("A", "A", "")]);
        assert!(resolve_aliases(&mut map).is_err());
    }

    #[test]
    fn test_handle_payload() {
        let mut map = BTreeMap::new();
        map.insert(
            "VkFoo".to_string(),
            Handle {
                name: "VkFoo".to_string(),
                type_name: "VK_DEFINE_NON_DISPATCHABLE_HANDLE".to_string(),
                parent: "VkDevice".to_string(),
                alias: String::new(),
            },
        );
        map.insert(
            "VkFooKHR".to_string(),
            Handle {
                name: "VkFooKHR".to_string(),
                alias: "VkFoo".to_string(),
                ..Handle::default()
            },
        );
        resolve_aliases(&mut map).unwrap();
        assert_eq!(map["VkFooKHR"].type_name, "VK_DEFINE_NON_DISPATCHABLE_HANDLE");
        assert_eq!(map["VkFooKHR"].parent, "VkDevice");
        assert_eq!(map["VkFooKHR"].name, "VkFooKHR");
    }

    #[test]
    fn test_command_payload() {
        let mut map = BTreeMap::new();
        map.insert(
            "vkTrimCommandPool".to_string(),
            Command {
                return_type: "void".to_string(),
                name: "vkTrimCommandPool".to_string(),
                alias: String::new(),
                params: vec![CommandParam {
                    type_name: "VkDevice".to_string(),
                    var_name: "device".to_string(),
                    ..CommandParam::default()
                }],
            },
        );
        map.insert(
            "vkTrimCommandPoolKHR".to_string(),
            Command {
                name: "vkTrimCommandPoolKHR".to_string(),
                alias: "vkTrimCommandPool".to_string(),
                ..Command::default()
            },
        );
        resolve_aliases(&mut map).unwrap();
        let aliased = &map["vkTrimCommandPoolKHR"];
        assert_eq!(aliased.return_type, "void");
        assert_eq!(aliased.params.len(), 1);
        assert_eq!(aliased.params[0].var_name, "device");
    }
}
