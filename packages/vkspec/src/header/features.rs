//! Physical device feature structures.
//!
//! Feature structures share one layout: a type tag, an extension chain
//! pointer, then nothing but `VkBool32` members. `VkPhysicalDeviceFeatures`
//! has no tag or pointer, and `VkPhysicalDeviceFeatures2` only wraps it, so
//! its body is left to the generator.

use super::scanner::{trim_member, HeaderScanner};
use crate::config::{
    BOOL_TYPE, FEATURES_BASE, FEATURES_ROOT, LEGACY_FEATURE_ALIASES, NEXT_POINTER_DECL,
    NEXT_POINTER_FIELD, STRUCTURE_TYPE_DECL, STRUCTURE_TYPE_FIELD,
};
use crate::error::{Result, VkSpecError};
use crate::types::Type;

impl HeaderScanner<'_> {
    /// Record `typedef VkPhysicalDeviceXFeatures VkPhysicalDeviceXFeaturesKHR`.
    ///
    /// Names in [`LEGACY_FEATURE_ALIASES`] are never recorded.
    pub(super) fn register_feature_alias(&mut self, line: &str) -> Result<()> {
        let mut fields = line.split_whitespace().skip(1);
        let (Some(target), Some(name)) = (fields.next(), fields.next()) else {
            return Err(VkSpecError::MalformedDeclaration {
                type_name: "feature structure alias".to_string(),
                line: line.to_string(),
            });
        };

        if LEGACY_FEATURE_ALIASES.binary_search(&name).is_ok() {
            tracing::debug!(alias = name, "Skipping legacy feature structure alias");
            return Ok(());
        }

        self.types.insert(name.to_string(), Type::alias_of(name, target));
        Ok(())
    }

    /// Start `typedef struct VkPhysicalDeviceXFeatures`.
    pub(super) fn begin_feature_struct(&mut self, line: &str) -> Result<()> {
        let Some(name) = line.split_whitespace().nth(2) else {
            return Err(VkSpecError::MalformedDeclaration {
                type_name: "feature structure".to_string(),
                line: line.to_string(),
            });
        };
        self.begin(name.to_string());
        Ok(())
    }

    /// Scan the body of the feature structure under construction.
    pub(super) fn scan_feature_struct(&mut self) -> Result<()> {
        if self.current == FEATURES_ROOT {
            self.skip_body();
            return Ok(());
        }

        if self.current != FEATURES_BASE {
            self.expect_member(STRUCTURE_TYPE_FIELD)?;
            self.push_declaration(STRUCTURE_TYPE_DECL);
            self.expect_member(NEXT_POINTER_FIELD)?;
            self.push_declaration(NEXT_POINTER_DECL);
        }

        while let Some(raw) = self.next_line() {
            let member = trim_member(raw);
            if member.contains('}') {
                return Ok(());
            }
            if !member.starts_with(BOOL_TYPE) {
                return Err(VkSpecError::NonBooleanFeature {
                    type_name: self.current.clone(),
                    line: member.to_string(),
                });
            }
            self.push_declaration(member);
        }
        Ok(())
    }

    fn expect_member(&mut self, prefix: &str) -> Result<()> {
        let line = self.next_line().unwrap_or_default().trim();
        if line.starts_with(prefix) {
            Ok(())
        } else {
            Err(VkSpecError::MalformedDeclaration {
                type_name: self.current.clone(),
                line: line.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ErrorKind;

    fn scan(text: &str) -> Result<BTreeMap<String, Type>> {
        HeaderScanner::new(text).scan()
    }

    const FEATURES: &str = "\
typedef struct VkPhysicalDeviceFeatures {
    VkBool32    robustBufferAccess;
    VkBool32    fullDrawIndexUint32;
} VkPhysicalDeviceFeatures;

typedef struct VkPhysicalDeviceFeatures2 {
    VkStructureType             sType;
    void*                       pNext;
    VkPhysicalDeviceFeatures    features;
} VkPhysicalDeviceFeatures2;

typedef VkPhysicalDeviceFeatures2 VkPhysicalDeviceFeatures2KHR;

typedef struct VkPhysicalDevice16BitStorageFeatures {
    VkStructureType    sType;
    void*              pNext;
    VkBool32           storageBuffer16BitAccess;
    VkBool32           uniformAndStorageBuffer16BitAccess;
} VkPhysicalDevice16BitStorageFeatures;

typedef VkPhysicalDevice16BitStorageFeatures VkPhysicalDevice16BitStorageFeaturesKHR;
";

    #[test]
    fn test_base_features_are_flat() {
        let types = scan(FEATURES).unwrap();
        assert_eq!(
            types[FEATURES_BASE].declaration,
            [
                "VkBool32    robustBufferAccess",
                "VkBool32    fullDrawIndexUint32",
            ]
        );
    }

    #[test]
    fn test_root_features_body_is_not_modeled() {
        let types = scan(FEATURES).unwrap();
        assert!(types[FEATURES_ROOT].declaration.is_empty());
        assert!(types[FEATURES_ROOT].alias.is_empty());
    }

    #[test]
    fn test_family_member_gets_tag_and_chain_pointer() {
        let types = scan(FEATURES).unwrap();
        assert_eq!(
            types["VkPhysicalDevice16BitStorageFeatures"].declaration,
            [
                "VkStructureType sType",
                "void* pNext",
                "VkBool32           storageBuffer16BitAccess",
                "VkBool32           uniformAndStorageBuffer16BitAccess",
            ]
        );
    }

    #[test]
    fn test_feature_alias_resolved() {
        let types = scan(FEATURES).unwrap();
        let alias = &types["VkPhysicalDevice16BitStorageFeaturesKHR"];
        assert_eq!(alias.alias, "VkPhysicalDevice16BitStorageFeatures");
        assert_eq!(
            alias.declaration,
            types["VkPhysicalDevice16BitStorageFeatures"].declaration
        );
    }

    #[test]
    fn test_legacy_alias_is_skipped() {
        let types = scan(FEATURES).unwrap();
        assert!(!types.contains_key("VkPhysicalDeviceFeatures2KHR"));
    }

    #[test]
    fn test_every_legacy_alias_is_skipped() {
        for name in LEGACY_FEATURE_ALIASES {
            let header = format!("typedef VkPhysicalDeviceFooFeatures {name};\n");
            let types = scan(&header).unwrap();
            assert!(types.is_empty(), "{name} should not be recorded");
        }
    }

    #[test]
    fn test_non_boolean_member_aborts() {
        let header = "\
typedef struct VkPhysicalDeviceFooFeaturesEXT {
    VkStructureType    sType;
    void*              pNext;
    uint32_t           maxFoo;
} VkPhysicalDeviceFooFeaturesEXT;
";
        let err = scan(header).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Consistency);
        assert!(err.to_string().contains("maxFoo"));
    }

    #[test]
    fn test_missing_type_tag_aborts() {
        let header = "\
typedef struct VkPhysicalDeviceFooFeaturesEXT {
    VkBool32           foo;
} VkPhysicalDeviceFooFeaturesEXT;
";
        let err = scan(header).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structure);
    }
}
