//! Recognized names, sentinels and input configuration.
//!
//! The header and registry conventions below must match the real documents
//! byte for byte; parsing fails or silently drops declarations otherwise.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, VkSpecError};

/// API identifier used in `supported`, `export` and `api` attribute lists.
pub const API_NAME: &str = "vulkan";

/// Marker contained in the forced-width maximum enumerator that ends an enum.
pub const MAX_ENUM_SENTINEL: &str = "MAX_ENUM";

/// Name fragment of bitmask enumerations.
pub const FLAG_BITS: &str = "FlagBits";

/// Name fragment of the flag type a bitmask enumeration is stored in.
pub const FLAGS: &str = "Flags";

/// Suffix of 64-bit integer literals.
pub const SUFFIX_64BIT: &str = "ULL";

/// Type of the tag member every modeled structure starts with.
pub const STRUCTURE_TYPE_FIELD: &str = "VkStructureType";

/// Declaration recorded for the structure tag member.
pub const STRUCTURE_TYPE_DECL: &str = "VkStructureType sType";

/// Declaration recorded for the extension chain pointer of feature structures.
pub const NEXT_POINTER_DECL: &str = "void* pNext";

/// Prefix of the extension chain pointer member line.
pub const NEXT_POINTER_FIELD: &str = "void*";

/// Boolean member type of feature structures.
pub const BOOL_TYPE: &str = "VkBool32";

/// Feature structure that chains every other feature structure.
pub const FEATURES_ROOT: &str = "VkPhysicalDeviceFeatures2";

/// Feature structure without tag and chain pointer.
pub const FEATURES_BASE: &str = "VkPhysicalDeviceFeatures";

/// Enumeration whose registry extensions introduce new handles.
pub const OBJECT_TYPE_ENUM: &str = "VkObjectType";

/// Prefix of `VkObjectType` enumerators.
pub const OBJECT_TYPE_PREFIX: &str = "VK_OBJECT_TYPE_";

/// Feature structure aliases that are legacy or ambiguous and never recorded.
///
/// Keep this list sorted: it is searched with `binary_search`.
pub const LEGACY_FEATURE_ALIASES: &[&str] = &[
    "VkPhysicalDeviceBufferAddressFeaturesEXT",
    "VkPhysicalDeviceFeatures2KHR",
    "VkPhysicalDeviceFloat16Int8FeaturesKHR",
    "VkPhysicalDeviceShaderDrawParameterFeatures",
    "VkPhysicalDeviceVariablePointerFeatures",
    "VkPhysicalDeviceVariablePointerFeaturesKHR",
];

/// Separators of a flattened `depends` expression.
///
/// `,` (any of) and `+` (all of) both become list separators once the
/// parentheses are gone.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static DEPENDENCY_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,+]").expect("valid regex"));

/// Check whether a comma-separated API list names `api`.
///
/// # Examples
/// ```
/// use vkspec::config::is_listed;
///
/// assert!(is_listed("vulkan,vulkansc", "vulkan"));
/// assert!(!is_listed("vulkansc", "vulkan"));
/// assert!(!is_listed("", "vulkan"));
/// ```
#[must_use]
pub fn is_listed(list: &str, api: &str) -> bool {
    list.split(',').any(|entry| entry == api)
}

/// The two documents one parse reads, and the API surface it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSources {
    /// Path to the reference header (`vulkan_core.h`).
    pub header: PathBuf,

    /// Path to the registry document (`vk.xml`).
    pub registry: PathBuf,

    /// API identifier matched against registry API lists.
    pub api: String,
}

impl SpecSources {
    /// Describe the inputs of a parse targeting [`API_NAME`].
    #[must_use]
    pub fn new(header: impl Into<PathBuf>, registry: impl Into<PathBuf>) -> Self {
        Self {
            header: header.into(),
            registry: registry.into(),
            api: API_NAME.to_string(),
        }
    }

    /// Target a different API variant.
    #[must_use]
    pub fn with_api(mut self, api: impl Into<String>) -> Self {
        self.api = api.into();
        self
    }

    /// Check that both documents exist and are regular files.
    ///
    /// # Returns
    /// * `Ok(())` if both paths are readable files
    /// * `Err(VkSpecError::Io)` naming the first offending path
    pub fn validate(&self) -> Result<()> {
        validate_file(&self.header)?;
        validate_file(&self.registry)
    }
}

fn validate_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(VkSpecError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "document does not exist"),
        });
    }
    if !path.is_file() {
        return Err(VkSpecError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_aliases_sorted() {
        let mut sorted = LEGACY_FEATURE_ALIASES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, LEGACY_FEATURE_ALIASES);
    }

    #[test]
    fn test_is_listed_requires_exact_entry() {
        assert!(is_listed("vulkan", "vulkan"));
        assert!(is_listed("vulkansc,vulkan", "vulkan"));
        assert!(!is_listed("vulkansc", "vulkan"));
        assert!(!is_listed("vulkan ", "vulkan"));
    }

    #[test]
    fn test_dependency_separator() {
        let parts: Vec<&str> = DEPENDENCY_SEPARATOR.split("a,b+c").collect();
        assert_eq!(parts, ["a", "b", "c"]);
    }

    #[test]
    fn test_sources_default_api() {
        let sources = SpecSources::new("vulkan_core.h", "vk.xml");
        assert_eq!(sources.api, API_NAME);
        assert_eq!(sources.with_api("vulkansc").api, "vulkansc");
    }

    #[test]
    fn test_validate_missing_header() {
        let dir = tempfile::tempdir().unwrap();
        let registry = dir.path().join("vk.xml");
        std::fs::write(&registry, "<registry/>").unwrap();

        let sources = SpecSources::new(dir.path().join("vulkan_core.h"), &registry);
        let err = sources.validate().unwrap_err();
        assert!(err.to_string().contains("vulkan_core.h"));
    }

    #[test]
    fn test_validate_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("vulkan_core.h");
        std::fs::write(&header, "").unwrap();

        let sources = SpecSources::new(&header, dir.path());
        assert!(sources.validate().is_err());
    }

    #[test]
    fn test_validate_ok() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("vulkan_core.h");
        let registry = dir.path().join("vk.xml");
        std::fs::write(&header, "").unwrap();
        std::fs::write(&registry, "<registry/>").unwrap();

        assert!(SpecSources::new(header, registry).validate().is_ok());
    }
}
