//! Builder for configuring and constructing a `Session`.

use crate::{Error, Result, Session, SessionConfig};
use midilink_core::CyclePolicy;
use midilink_ports::NamingConfig;

/// # Example
///
/// ```ignore
/// use midilink::prelude::*;
///
/// let session = Session::builder(MemoryBackend::new())
///     .daw_alias("REAPER")
///     .cycle_policy(CyclePolicy::Error)
///     .build()?;
/// ```
pub struct SessionBuilder<B> {
    backend: B,
    config: SessionConfig,
}

impl<B> SessionBuilder<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: SessionConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn naming(mut self, naming: NamingConfig) -> Self {
        self.config.naming = naming;
        self
    }

    /// Default: `"localhost"`
    pub fn local_alias(mut self, alias: impl Into<String>) -> Self {
        self.config.naming.local_alias = alias.into();
        self
    }

    /// Default: `"system"`
    pub fn hardware_alias(mut self, alias: impl Into<String>) -> Self {
        self.config.naming.hardware_alias = alias.into();
        self
    }

    /// Default: `"REAPER"`
    pub fn daw_alias(mut self, alias: impl Into<String>) -> Self {
        self.config.naming.daw_alias = alias.into();
        self
    }

    pub fn skip_unparseable(mut self, skip: bool) -> Self {
        self.config.naming.skip_unparseable = skip;
        self
    }

    pub fn cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.config.tree.cycle_policy = policy;
        self
    }

    pub fn build(self) -> Result<Session<B>> {
        let naming = &self.config.naming;
        for (key, value) in [
            ("local_alias", &naming.local_alias),
            ("hardware_alias", &naming.hardware_alias),
            ("daw_alias", &naming.daw_alias),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidConfig(format!("naming.{key} must not be empty")));
            }
        }
        if naming.hardware_alias == naming.daw_alias {
            return Err(Error::InvalidConfig(
                "naming.hardware_alias and naming.daw_alias must differ".to_string(),
            ));
        }

        tracing::debug!(
            "Session: local={}, hardware={}, daw={}, cycles={:?}",
            naming.local_alias,
            naming.hardware_alias,
            naming.daw_alias,
            self.config.tree.cycle_policy
        );
        Ok(Session::from_parts(self.backend, self.config))
    }
}
