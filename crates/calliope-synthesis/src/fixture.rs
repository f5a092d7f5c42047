//! Shared fixtures for the end-to-end synthesis tests

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use calliope_diagnostics::{DumpOptions, LogCapture, MemoryLogEngine};
use tracing::{info, warn};

use crate::config::SpeechConfig;
use crate::error::SynthesisResult;
use crate::settings::TestSettings;

/// Size in bytes of a WAV file holding no audio data.
pub const EMPTY_WAVE_FILE_SIZE: u64 = 46;
/// Length of a service request id with dashes stripped.
pub const GUID_LENGTH: usize = 32;
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_VOICE: &str = "Microsoft Server Speech Text to Speech Voice (en-US, AriaRUS)";
/// Total and per-chunk audio sizes produced by the mock synthesis engine.
pub const MOCK_AUDIO_SIZE: usize = 32000;
pub const MOCK_AUDIO_CHUNK_SIZE: usize = 3200;
/// Property selecting the mock synthesis engine instead of a live service.
pub const MOCK_ENGINE_PROPERTY: &str = "CALLIOPE-INTERNAL-UseTtsEngine-Mock";

/// Wrap `text` in the SSML envelope the synthesis tests send.
pub fn build_ssml(language: &str, voice: &str, text: &str) -> String {
    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' \
         xmlns:mstts='http://www.w3.org/2001/mstts' \
         xmlns:emo='http://www.w3.org/2009/10/emotionml' \
         xml:lang='{language}'><voice name='{voice}'>{text}</voice></speak>"
    )
}

/// The six client configurations the synthesis suite exercises.
#[derive(Debug, Clone)]
pub struct SynthesisFixture {
    /// REST endpoint with test traffic tagging.
    pub rest_config: SpeechConfig,
    /// REST host-only variant.
    pub rest_host_config: SpeechConfig,
    /// WebSocket endpoint with test traffic tagging.
    pub websocket_config: SpeechConfig,
    /// WebSocket host-only variant.
    pub websocket_host_config: SpeechConfig,
    /// Offline mock engine, no live service involved.
    pub mock_config: SpeechConfig,
    /// Deployed custom voice endpoint.
    pub custom_voice_config: SpeechConfig,
}

impl SynthesisFixture {
    pub fn from_settings(settings: &TestSettings) -> Self {
        let region = &settings.unified_speech.region;
        let key = &settings.unified_speech.key;
        info!(%region, "building synthesis client configs");

        let rest_endpoint = format!(
            "https://{region}.tts.speech.microsoft.com/cognitiveservices/v1?TrafficType=Test"
        );
        let rest_host = format!("https://{region}.tts.speech.microsoft.com");
        let websocket_endpoint = format!(
            "wss://{region}.tts.speech.microsoft.com/cognitiveservices/websocket/v1?TrafficType=Test"
        );
        let websocket_host = format!("wss://{region}.tts.speech.microsoft.com");

        let mut mock_config = SpeechConfig::from_subscription("None", "None");
        mock_config.set_property(MOCK_ENGINE_PROPERTY, "true");

        let custom_voice_region = &settings.custom_voice.region;
        let custom_voice_endpoint = format!(
            "https://{custom_voice_region}.voice.speech.microsoft.com/cognitiveservices/v1\
             ?deploymentId={}",
            settings.custom_voice_deployment_id
        );
        let mut custom_voice_config =
            SpeechConfig::from_endpoint(custom_voice_endpoint, &settings.custom_voice.key);
        custom_voice_config.set_voice_name(&settings.custom_voice_voice_name);

        Self {
            rest_config: SpeechConfig::from_endpoint(rest_endpoint, key),
            rest_host_config: SpeechConfig::from_host(rest_host, key),
            websocket_config: SpeechConfig::from_endpoint(websocket_endpoint, key),
            websocket_host_config: SpeechConfig::from_host(websocket_host, key),
            mock_config,
            custom_voice_config,
        }
    }
}

/// Directory for per-test memory-log dumps, under the workspace target dir.
pub fn test_log_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .unwrap_or(manifest_dir);
    workspace_root.join("target").join("test-logs")
}

/// Arms the memory log for one test run and dumps it on teardown.
///
/// Replaces the original suite's class-init/cleanup hooks with RAII: the
/// ring starts collecting at construction and is stopped and written to
/// the dump path when the fixture drops.
pub struct LoggingFixture {
    capture: Arc<LogCapture>,
    dump_path: PathBuf,
}

impl LoggingFixture {
    /// Fixture over a fresh in-process engine, dumping to
    /// `target/test-logs/<name>.log`. Tests sharing nothing can run in
    /// parallel.
    pub fn for_test(name: &str) -> SynthesisResult<Self> {
        let dir = test_log_dir();
        fs::create_dir_all(&dir)?;
        let capture = Arc::new(LogCapture::new(Arc::new(MemoryLogEngine::new())));
        Ok(Self::over(capture, dir.join(format!("{name}.log"))))
    }

    /// Fixture over an existing facility, dumping to `dump_path`.
    pub fn over(capture: Arc<LogCapture>, dump_path: PathBuf) -> Self {
        capture.start_memory_logging();
        Self { capture, dump_path }
    }

    /// Restrict collection to lines matching the `;`-delimited `filters`.
    pub fn with_filter(self, filters: &str) -> SynthesisResult<Self> {
        self.capture.set_log_message_filter(filters)?;
        Ok(self)
    }

    pub fn capture(&self) -> &LogCapture {
        &self.capture
    }
}

impl Drop for LoggingFixture {
    fn drop(&mut self) {
        self.capture.stop_memory_logging();
        if let Err(err) = self
            .capture
            .dump_memory_log(Some(&self.dump_path), DumpOptions::file())
        {
            warn!(error = %err, path = %self.dump_path.display(), "memory log dump failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceTarget;
    use crate::settings::SubscriptionRegion;

    fn settings() -> TestSettings {
        TestSettings {
            unified_speech: SubscriptionRegion {
                key: "unified-key".into(),
                region: "westus".into(),
            },
            custom_voice: SubscriptionRegion {
                key: "cv-key".into(),
                region: "eastus".into(),
            },
            custom_voice_deployment_id: "deadbeef".into(),
            custom_voice_voice_name: "CalliopeNeural".into(),
        }
    }

    #[test]
    fn fixture_builds_all_six_configs() {
        let fixture = SynthesisFixture::from_settings(&settings());

        assert_eq!(
            fixture.rest_config.target(),
            &ServiceTarget::Endpoint(
                "https://westus.tts.speech.microsoft.com/cognitiveservices/v1?TrafficType=Test"
                    .into()
            )
        );
        assert_eq!(
            fixture.rest_host_config.target(),
            &ServiceTarget::Host("https://westus.tts.speech.microsoft.com".into())
        );
        assert_eq!(
            fixture.websocket_config.target(),
            &ServiceTarget::Endpoint(
                "wss://westus.tts.speech.microsoft.com/cognitiveservices/websocket/v1\
                 ?TrafficType=Test"
                    .into()
            )
        );
        assert_eq!(
            fixture.websocket_host_config.target(),
            &ServiceTarget::Host("wss://westus.tts.speech.microsoft.com".into())
        );
        assert_eq!(fixture.rest_config.subscription_key(), "unified-key");
    }

    #[test]
    fn mock_config_selects_the_mock_engine() {
        let fixture = SynthesisFixture::from_settings(&settings());
        assert_eq!(fixture.mock_config.subscription_key(), "None");
        assert_eq!(
            fixture.mock_config.property(MOCK_ENGINE_PROPERTY),
            Some("true")
        );
    }

    #[test]
    fn custom_voice_config_carries_deployment_and_voice() {
        let fixture = SynthesisFixture::from_settings(&settings());
        match fixture.custom_voice_config.target() {
            ServiceTarget::Endpoint(endpoint) => {
                assert!(endpoint.starts_with("https://eastus.voice.speech.microsoft.com"));
                assert!(endpoint.ends_with("deploymentId=deadbeef"));
            }
            other => panic!("expected endpoint target, got {other:?}"),
        }
        assert_eq!(
            fixture.custom_voice_config.voice_name(),
            Some("CalliopeNeural")
        );
    }

    #[test]
    fn ssml_envelope_wraps_language_voice_and_text() {
        let ssml = build_ssml(DEFAULT_LANGUAGE, DEFAULT_VOICE, "hello world");
        assert!(ssml.starts_with("<speak version='1.0'"));
        assert!(ssml.contains("xml:lang='en-US'"));
        assert!(ssml.contains(&format!("<voice name='{DEFAULT_VOICE}'>hello world</voice>")));
        assert!(ssml.ends_with("</speak>"));
    }

    #[test]
    fn logging_fixture_dumps_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let dump_path = dir.path().join("fixture.log");
        let capture = Arc::new(LogCapture::new(Arc::new(MemoryLogEngine::new())));
        {
            let fixture = LoggingFixture::over(Arc::clone(&capture), dump_path.clone());
            fixture.capture().trace_info("inside the test body");
        }

        let contents = fs::read_to_string(&dump_path).unwrap();
        assert!(contents.contains("inside the test body"));
        // The ring stopped collecting when the fixture dropped.
        capture.trace_info("after teardown");
        assert_eq!(fs::read_to_string(&dump_path).unwrap(), contents);
    }
}
