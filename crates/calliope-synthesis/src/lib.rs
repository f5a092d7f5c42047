//! Speech-synthesis client configuration and test fixtures for Calliope
//!
//! This crate is configuration assembly only: it builds [`SpeechConfig`]
//! objects against REST, WebSocket, mock, and custom-voice service
//! endpoints from region/subscription settings, and provides the shared
//! fixtures the end-to-end synthesis tests run on. The synthesis engine
//! itself and its wire protocol live elsewhere.

pub mod config;
pub mod error;
pub mod fixture;
pub mod settings;

pub use self::config::{ServiceTarget, SpeechConfig};
pub use self::error::{SynthesisError, SynthesisResult};
pub use self::fixture::{build_ssml, LoggingFixture, SynthesisFixture};
pub use self::settings::{SubscriptionRegion, TestSettings};
