//! Speech client configuration

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Where a speech client points: a full endpoint URI (path and query
/// included), a host-only URI (the client derives the resource path), or a
/// bare region (the client derives the whole URI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceTarget {
    Endpoint(String),
    Host(String),
    Region(String),
}

/// Assembled configuration for one speech-synthesis client.
///
/// Pure data: construction and property population only, no I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    target: ServiceTarget,
    subscription_key: String,
    properties: HashMap<String, String>,
    voice_name: Option<String>,
}

impl SpeechConfig {
    /// Configuration against a full service endpoint URI.
    pub fn from_endpoint(endpoint: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(ServiceTarget::Endpoint(endpoint.into()), key)
    }

    /// Configuration against a host-only URI.
    pub fn from_host(host: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(ServiceTarget::Host(host.into()), key)
    }

    /// Configuration from a subscription key and service region.
    pub fn from_subscription(key: impl Into<String>, region: impl Into<String>) -> Self {
        Self::new(ServiceTarget::Region(region.into()), key)
    }

    fn new(target: ServiceTarget, key: impl Into<String>) -> Self {
        Self {
            target,
            subscription_key: key.into(),
            properties: HashMap::new(),
            voice_name: None,
        }
    }

    pub fn target(&self) -> &ServiceTarget {
        &self.target
    }

    pub fn subscription_key(&self) -> &str {
        &self.subscription_key
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn set_voice_name(&mut self, voice_name: impl Into<String>) {
        self.voice_name = Some(voice_name.into());
    }

    pub fn voice_name(&self) -> Option<&str> {
        self.voice_name.as_deref()
    }
}
