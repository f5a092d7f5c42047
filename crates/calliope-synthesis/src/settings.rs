//! Test settings for the end-to-end synthesis suite
//!
//! Settings come from an optional `calliope-test.toml` in the working
//! directory, overridden by `CALLIOPE_`-prefixed environment variables with
//! `__` as the path separator (e.g. `CALLIOPE_UNIFIED_SPEECH__REGION`).

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::error::{SynthesisError, SynthesisResult};

/// Subscription key plus the service region it is valid in.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionRegion {
    pub key: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestSettings {
    /// Unified speech subscription used by the REST/WebSocket configs.
    pub unified_speech: SubscriptionRegion,
    /// Subscription hosting the deployed custom voice.
    pub custom_voice: SubscriptionRegion,
    pub custom_voice_deployment_id: String,
    pub custom_voice_voice_name: String,
}

impl TestSettings {
    pub fn load() -> SynthesisResult<Self> {
        let sources = Config::builder()
            .add_source(File::with_name("calliope-test").required(false))
            .add_source(Environment::with_prefix("CALLIOPE").separator("__"))
            .build()?;
        let settings: TestSettings = sources.try_deserialize()?;

        if settings.unified_speech.key.is_empty() || settings.unified_speech.region.is_empty() {
            return Err(SynthesisError::Config(
                "unified speech subscription key and region must be set".into(),
            ));
        }
        debug!(region = %settings.unified_speech.region, "test settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: &[(&str, &str)] = &[
        ("CALLIOPE_UNIFIED_SPEECH__KEY", "unified-key"),
        ("CALLIOPE_UNIFIED_SPEECH__REGION", "westus"),
        ("CALLIOPE_CUSTOM_VOICE__KEY", "cv-key"),
        ("CALLIOPE_CUSTOM_VOICE__REGION", "eastus"),
        ("CALLIOPE_CUSTOM_VOICE_DEPLOYMENT_ID", "deadbeef"),
        ("CALLIOPE_CUSTOM_VOICE_VOICE_NAME", "CalliopeNeural"),
    ];

    fn with_vars<R>(f: impl FnOnce() -> R) -> R {
        for (name, value) in VARS {
            std::env::set_var(name, value);
        }
        let result = f();
        for (name, _) in VARS {
            std::env::remove_var(name);
        }
        result
    }

    #[test]
    #[serial_test::serial]
    fn settings_load_from_environment() {
        let settings = with_vars(|| TestSettings::load()).unwrap();
        assert_eq!(settings.unified_speech.key, "unified-key");
        assert_eq!(settings.unified_speech.region, "westus");
        assert_eq!(settings.custom_voice.region, "eastus");
        assert_eq!(settings.custom_voice_deployment_id, "deadbeef");
        assert_eq!(settings.custom_voice_voice_name, "CalliopeNeural");
    }

    #[test]
    #[serial_test::serial]
    fn empty_unified_key_is_rejected() {
        let result = with_vars(|| {
            std::env::set_var("CALLIOPE_UNIFIED_SPEECH__KEY", "");
            TestSettings::load()
        });
        assert!(matches!(result, Err(SynthesisError::Config(_))));
    }
}
