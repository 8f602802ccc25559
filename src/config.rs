use serde::{Deserialize, Serialize};

/// Settings for the response serializer.
///
/// Version metadata is off by default: most deployments want the wire
/// payload untouched. Turning it on annotates every serialized response
/// with the library info below.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SerializerConfig {
    /// Attach library version metadata to serialized responses
    #[serde(default)]
    pub include_library_metadata: bool,

    /// Library identification injected when metadata is enabled
    #[serde(default)]
    pub library: LibraryInfo,
}

impl SerializerConfig {
    /// Config with version metadata enabled and default library info.
    pub fn with_library_metadata() -> Self {
        Self {
            include_library_metadata: true,
            library: LibraryInfo::default(),
        }
    }
}

/// Name/language/version triple identifying this library on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryInfo {
    pub name: String,
    pub language: String,
    pub version: String,
}

impl Default for LibraryInfo {
    fn default() -> Self {
        Self {
            name: "actions".to_string(),
            language: "rust".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
