//! vkspec - Extract the Vulkan API description from its reference documents.
//!
//! This crate reads the reference C header (`vulkan_core.h`) and the
//! registry document (`vk.xml`) and merges them into one [`Data`] model
//! of types, handles, commands and extensions, ready for a binding
//! generator.
//!
//! # Example
//!
//! ```
//! use vkspec::config::API_NAME;
//!
//! let header = "typedef enum VkFrontFace {\n\
//!     VK_FRONT_FACE_COUNTER_CLOCKWISE = 0,\n\
//!     VK_FRONT_FACE_MAX_ENUM = 0x7FFFFFFF\n\
//! } VkFrontFace;\n";
//! let registry = "<registry><commands/></registry>";
//!
//! let data = vkspec::parse_documents(header, registry, API_NAME).unwrap();
//! assert!(data.types.contains_key("VkFrontFace"));
//! ```
//!
//! # Architecture
//!
//! The extractor is organized into several modules:
//!
//! - [`config`]: Recognized names, sentinels and input paths
//! - [`types`]: Core data types (Type, Handle, Command, Extension, Data)
//! - [`error`]: Error types and Result alias
//! - [`header`]: Line-oriented reference header scanner
//! - [`xml`]: Registry tag stream and cursor
//! - [`registry`]: Handle, command and extension extractors
//! - [`alias`]: Alias chain resolution
//! - [`parser`]: Entry points assembling the model

pub mod alias;
pub mod config;
pub mod error;
pub mod header;
pub mod parser;
pub mod registry;
pub mod types;
pub mod xml;

// Re-export main functions
pub use parser::{parse, parse_documents};

// Re-export commonly used items
pub use config::SpecSources;
pub use error::{ErrorKind, Result, VkSpecError};
pub use types::{Command, CommandParam, Data, Extension, Handle, Type};
