//! Java sources injected into the app package.
//!
//! The contents are opaque to the prebuild and are written byte for byte.

/// A named source file with fixed contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePayload {
    pub file_name: &'static str,
    pub contents: &'static str,
}

/// Phone-state broadcast receiver
pub const CALL_RECEIVER: SourcePayload = SourcePayload {
    file_name: "CallReceiver.java",
    contents: include_str!("../payloads/CallReceiver.java"),
};

/// Caller-info notification helper
pub const NATIVE_NOTIFICATION_HELPER: SourcePayload = SourcePayload {
    file_name: "NativeNotificationHelper.java",
    contents: include_str!("../payloads/NativeNotificationHelper.java"),
};

/// React Native module syncing client data into SharedPreferences
pub const NATIVE_STORAGE_BRIDGE: SourcePayload = SourcePayload {
    file_name: "NativeStorageBridge.java",
    contents: include_str!("../payloads/NativeStorageBridge.java"),
};

/// ReactPackage registering the storage bridge
pub const NATIVE_STORAGE_PACKAGE: SourcePayload = SourcePayload {
    file_name: "NativeStoragePackage.java",
    contents: include_str!("../payloads/NativeStoragePackage.java"),
};

/// All sources, in write order
pub const JAVA_SOURCES: [SourcePayload; 4] = [
    CALL_RECEIVER,
    NATIVE_NOTIFICATION_HELPER,
    NATIVE_STORAGE_BRIDGE,
    NATIVE_STORAGE_PACKAGE,
];
