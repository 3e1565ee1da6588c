//! Core data types of the normalized specification model.
//!
//! Every collection is keyed by the entity's unique name. After a parse,
//! aliased entities carry the payload of their terminal definition.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A type declared in the reference header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    /// Type name (e.g., "VkImageCreateInfo").
    pub name: String,

    /// Name of the type this one is equivalent to, empty for terminal definitions.
    pub alias: String,

    /// Member, field or enumerator lines in declaration order.
    pub declaration: Vec<String>,
}

impl Type {
    /// Create a terminal type with no declaration lines yet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a type that stands in for `target`.
    #[must_use]
    pub fn alias_of(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: target.into(),
            declaration: Vec::new(),
        }
    }
}

/// An opaque object handle declared in the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handle {
    /// Handle name (e.g., "VkDevice").
    pub name: String,

    /// Underlying representation macro (e.g., "VK_DEFINE_HANDLE").
    pub type_name: String,

    /// Name of the handle this one is equivalent to, empty for terminal definitions.
    pub alias: String,

    /// Handle that owns this one, empty for root handles.
    pub parent: String,
}

/// One parameter of a command, in prototype order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandParam {
    /// Parameter type name without qualifiers.
    pub type_name: String,

    /// Whether the type is `const` qualified.
    pub is_read_only: bool,

    /// Whether the parameter is a single pointer.
    pub is_pointer: bool,

    /// Parameter name.
    pub var_name: String,
}

/// An API entry point declared in the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Return type name.
    pub return_type: String,

    /// Command name (e.g., "vkCreateDevice").
    pub name: String,

    /// Name of the command this one is equivalent to, empty for terminal definitions.
    pub alias: String,

    /// Parameters in prototype order.
    pub params: Vec<CommandParam>,
}

/// An extension (or feature set) declared in the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    /// Extension name (e.g., "VK_KHR_swapchain").
    pub name: String,

    /// Category tag ("instance" or "device").
    pub kind: String,

    /// Platform the extension is restricted to, empty if portable.
    pub platform: String,

    /// Feature or extension this one was promoted to, empty if none.
    pub promoted: String,

    /// Extension that deprecates this one, empty if none.
    pub deprecated: String,

    /// Whether the extension is supported by the target API.
    pub valid: bool,

    /// Whether the extension is provisional.
    pub provisional: bool,

    /// Prerequisite names. Treat as a list that must all be satisfied.
    pub depends: Vec<String>,

    /// Types contributed.
    pub types: Vec<String>,

    /// Handles contributed.
    pub handles: Vec<String>,

    /// Commands contributed.
    pub commands: Vec<String>,

    /// Enumerators added to existing enumerations, keyed by enumeration name.
    pub extends: BTreeMap<String, Vec<String>>,
}

/// The unified specification model handed to the binding generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Data {
    /// Types from the reference header.
    pub types: BTreeMap<String, Type>,

    /// Handles from the registry.
    pub handles: BTreeMap<String, Handle>,

    /// Commands from the registry.
    pub commands: BTreeMap<String, Command>,

    /// Extensions from the registry.
    pub extensions: BTreeMap<String, Extension>,
}

impl Data {
    /// Find the extension that contributes a command.
    #[must_use]
    pub fn extension_providing_command(&self, command: &str) -> Option<&Extension> {
        self.extensions
            .values()
            .find(|e| e.commands.iter().any(|c| c == command))
    }

    /// Find the extension that contributes a type.
    #[must_use]
    pub fn extension_providing_type(&self, type_name: &str) -> Option<&Extension> {
        self.extensions
            .values()
            .find(|e| e.types.iter().any(|t| t == type_name))
    }

    /// Iterate commands that no extension contributes.
    pub fn core_commands(&self) -> impl Iterator<Item = &Command> {
        let contributed: BTreeSet<&str> = self
            .extensions
            .values()
            .flat_map(|e| e.commands.iter().map(String::as_str))
            .collect();
        self.commands
            .values()
            .filter(move |c| !contributed.contains(c.name.as_str()))
    }
}
