//! Intent Filters
//!
//! Handles intent-filter, action and category elements.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::manifest::tags;

/// Intent filter for components
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentFilter {
    /// Actions
    pub actions: Vec<IntentAction>,
    
    /// Categories
    pub categories: Vec<IntentCategory>,
    
    /// Priority
    pub priority: Option<i32>,
}

impl IntentFilter {
    /// Telephony state change broadcasts
    pub fn phone_state() -> Self {
        Self {
            actions: vec![IntentAction::phone_state()],
            ..Default::default()
        }
    }

    /// Read an `<intent-filter>` element
    pub fn from_element(element: &Element) -> Self {
        Self {
            actions: element
                .children_named(tags::ACTION)
                .filter_map(|a| a.android_attribute("name"))
                .map(IntentAction::new)
                .collect(),
            categories: element
                .children_named(tags::CATEGORY)
                .filter_map(|c| c.android_attribute("name"))
                .map(IntentCategory::new)
                .collect(),
            priority: element
                .android_attribute("priority")
                .and_then(|s| s.parse().ok()),
        }
    }

    /// Build the `<intent-filter>` element
    pub fn to_element(&self) -> Element {
        let mut element = Element::new(tags::INTENT_FILTER);
        if let Some(priority) = self.priority {
            element.set_attribute("android:priority", priority.to_string());
        }
        for action in &self.actions {
            element = element.with_child(
                Element::new(tags::ACTION).with_android_attribute("name", &action.name),
            );
        }
        for category in &self.categories {
            element = element.with_child(
                Element::new(tags::CATEGORY).with_android_attribute("name", &category.name),
            );
        }
        element
    }
}

/// Intent action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentAction {
    pub name: String,
}

impl IntentAction {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }

    pub fn phone_state() -> Self {
        Self::new(actions::PHONE_STATE)
    }
}

/// Intent category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentCategory {
    pub name: String,
}

impl IntentCategory {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

/// Broadcast actions
pub mod actions {
    pub const PHONE_STATE: &str = "android.intent.action.PHONE_STATE";
}
