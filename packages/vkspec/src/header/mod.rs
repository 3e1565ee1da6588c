//! Reference header (`vulkan_core.h`) scanning.
//!
//! Recognizes four declaration shapes by line prefix:
//! - `typedef enum` enumerations, copied up to the `MAX_ENUM` enumerator
//! - `typedef VkFlags64 ...FlagBits...` 64-bit flag values
//! - `typedef struct` structures that start with a `VkStructureType` tag
//! - physical device feature structures and their aliases
//!
//! `FlagBits` names are recorded under their `Flags` spelling.

mod features;
mod scanner;

use std::collections::BTreeMap;

pub use scanner::HeaderScanner;

use crate::error::Result;
use crate::types::Type;

/// Scan header text into types keyed by name, aliases resolved.
///
/// # Examples
/// ```
/// use vkspec::header::scan_header;
///
/// let header = "typedef enum VkFrontFace {\n\
///     VK_FRONT_FACE_COUNTER_CLOCKWISE = 0,\n\
///     VK_FRONT_FACE_MAX_ENUM = 0x7FFFFFFF\n\
/// } VkFrontFace;\n";
/// let types = scan_header(header).unwrap();
/// assert_eq!(types["VkFrontFace"].declaration.len(), 2);
/// ```
pub fn scan_header(text: &str) -> Result<BTreeMap<String, Type>> {
    let types = HeaderScanner::new(text).scan()?;
    tracing::debug!(types = types.len(), "Scanned reference header");
    Ok(types)
}
