//! Permission declarations
//!
//! Typed view of `<uses-permission>` elements.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::manifest::tags;

/// Android permission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Full permission name (e.g., "android.permission.READ_PHONE_STATE")
    pub name: String,
    
    /// Maximum SDK version (for compatibility)
    pub max_sdk_version: Option<u32>,
}

impl Permission {
    /// Create a new permission
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            max_sdk_version: None,
        }
    }

    /// Read a `<uses-permission>` element; None if it has no name
    pub fn from_element(element: &Element) -> Option<Self> {
        let name = element.android_attribute("name")?;
        Some(Self {
            name: name.to_string(),
            max_sdk_version: element
                .android_attribute("maxSdkVersion")
                .and_then(|s| s.parse().ok()),
        })
    }

    /// Build the `<uses-permission>` element
    pub fn to_element(&self) -> Element {
        let element = Element::new(tags::USES_PERMISSION).with_android_attribute("name", &self.name);
        match self.max_sdk_version {
            Some(max) => element.with_android_attribute("maxSdkVersion", max.to_string()),
            None => element,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_conversion() {
        let perm = Permission {
            name: "android.permission.READ_PHONE_STATE".to_string(),
            max_sdk_version: Some(29),
        };

        let element = perm.to_element();
        assert_eq!(element.name, "uses-permission");
        assert_eq!(element.android_attribute("maxSdkVersion"), Some("29"));
        assert_eq!(Permission::from_element(&element), Some(perm));
    }

    #[test]
    fn test_unnamed_permission_ignored() {
        assert_eq!(Permission::from_element(&Element::new("uses-permission")), None);
    }
}
