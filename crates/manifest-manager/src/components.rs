//! Broadcast receiver declarations
//!
//! Typed view of `<receiver>` elements inside `<application>`.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::intent_filters::IntentFilter;
use crate::manifest::tags;

/// Broadcast Receiver component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    /// Class name (.CallReceiver or full package.Class)
    pub name: String,
    
    /// Enabled state
    pub enabled: Option<bool>,
    
    /// Whether the receiver is exported
    pub exported: Option<bool>,
    
    /// Permission required to send broadcasts
    pub permission: Option<String>,
    
    /// Intent filters
    pub intent_filters: Vec<IntentFilter>,
}

impl Receiver {
    /// The phone-state receiver injected by the prebuild
    pub fn call_receiver() -> Self {
        Self {
            name: crate::call_receiver::RECEIVER_NAME.to_string(),
            enabled: Some(true),
            exported: Some(true),
            permission: None,
            intent_filters: vec![IntentFilter::phone_state()],
        }
    }

    /// Read a `<receiver>` element
    pub fn from_element(element: &Element) -> Self {
        Self {
            name: element.android_attribute("name").unwrap_or_default().to_string(),
            enabled: parse_bool(element.android_attribute("enabled")),
            exported: parse_bool(element.android_attribute("exported")),
            permission: element.android_attribute("permission").map(str::to_string),
            intent_filters: element
                .children_named(tags::INTENT_FILTER)
                .map(IntentFilter::from_element)
                .collect(),
        }
    }

    /// Build the `<receiver>` element
    pub fn to_element(&self) -> Element {
        let mut element = Element::new(tags::RECEIVER).with_android_attribute("name", &self.name);
        if let Some(enabled) = self.enabled {
            element.set_attribute("android:enabled", enabled.to_string());
        }
        if let Some(exported) = self.exported {
            element.set_attribute("android:exported", exported.to_string());
        }
        if let Some(ref permission) = self.permission {
            element.set_attribute("android:permission", permission.as_str());
        }
        for filter in &self.intent_filters {
            element = element.with_child(filter.to_element());
        }
        element
    }
}

fn parse_bool(value: Option<&str>) -> Option<bool> {
    match value? {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
