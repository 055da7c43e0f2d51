//! Android Manifest Manager
//! 
//! Lossless parsing and writing of AndroidManifest.xml, plus the
//! idempotent patch the prebuild applies to it.

pub mod element;
pub mod parser;
pub mod manifest;
pub mod permissions;
pub mod components;
pub mod intent_filters;
pub mod writer;
pub mod patcher;

pub use element::{Element, Node};
pub use parser::{ManifestParser, ParseError};
pub use manifest::{ManifestDocument, ManifestSummary, XmlDeclaration};
pub use permissions::Permission;
pub use components::Receiver;
pub use intent_filters::{IntentFilter, IntentAction, IntentCategory};
pub use writer::{ManifestWriter, WriteError};
pub use patcher::{ManifestPatch, PatchError, PatchReport};

/// Declarations required by the phone-state call receiver
pub mod call_receiver {
    /// Receiver class, relative to the app package
    pub const RECEIVER_NAME: &str = ".CallReceiver";

    /// Required permissions, in the order they are appended
    pub const PERMISSIONS: [&str; 6] = [
        "android.permission.READ_PHONE_STATE",
        "android.permission.READ_CALL_LOG",
        "android.permission.WAKE_LOCK",
        "android.permission.POST_NOTIFICATIONS",
        "android.permission.USE_FULL_SCREEN_INTENT",
        "android.permission.VIBRATE",
    ];
}
