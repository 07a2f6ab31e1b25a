//! Banner injection fallback
//!
//! Best-effort side effect triggered after a successful resolution. The ad
//! network is an injected capability probed for availability, never assumed
//! present, and no failure here ever reaches primary request state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Banner placement parameters handed to the network capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    pub script_src: String,
    pub key: String,
    pub width: u32,
    pub height: u32,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            script_src: "https://ads.example.invalid/invoke.js".to_string(),
            key: String::new(),
            width: 728,
            height: 90,
        }
    }
}

/// Slot lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPhase {
    NotRequested,
    ScriptLoading,
    Rendered,
    FallbackShown,
}

/// Fetches and injects the third-party script; only the load/failure signal
/// is consumed here.
#[async_trait]
pub trait ScriptLoader: Send + Sync {
    async fn load(&self, src: &str) -> anyhow::Result<()>;
}

/// Narrow interface over the ad network's page-level object
pub trait BannerNetwork: Send + Sync {
    /// Whether the network capability is already present
    fn is_available(&self) -> bool;

    /// Render a banner into the slot
    fn run_banner(&self, config: &BannerConfig) -> anyhow::Result<()>;
}

/// The single banner slot.
///
/// Cleared before every write, so repeated attempts replace rather than
/// stack banner instances.
pub struct BannerSlot {
    loader: Arc<dyn ScriptLoader>,
    network: Arc<dyn BannerNetwork>,
    config: BannerConfig,
    phase: BannerPhase,
    script_injected: bool,
}

impl BannerSlot {
    pub fn new(
        loader: Arc<dyn ScriptLoader>,
        network: Arc<dyn BannerNetwork>,
        config: BannerConfig,
    ) -> Self {
        Self {
            loader,
            network,
            config,
            phase: BannerPhase::NotRequested,
            script_injected: false,
        }
    }

    pub fn phase(&self) -> BannerPhase {
        self.phase
    }

    /// Fire-and-forget render attempt. Never returns an error; every
    /// failure mode ends in `FallbackShown`.
    pub async fn try_load(&mut self) {
        self.phase = BannerPhase::NotRequested;

        if !self.network.is_available() {
            self.phase = BannerPhase::ScriptLoading;
            if let Err(e) = self.loader.load(&self.config.script_src).await {
                warn!("Banner script failed to load: {}", e);
                self.phase = BannerPhase::FallbackShown;
                return;
            }
            self.script_injected = true;

            if !self.network.is_available() {
                warn!("Banner capability missing after script load");
                self.phase = BannerPhase::FallbackShown;
                return;
            }
        }

        match self.network.run_banner(&self.config) {
            Ok(()) => {
                debug!("Banner rendered");
                self.phase = BannerPhase::Rendered;
            }
            Err(e) => {
                warn!("Banner render failed: {}", e);
                self.phase = BannerPhase::FallbackShown;
            }
        }
    }

    /// Teardown on unmount; drops the injected script marker so a later
    /// mount starts clean.
    pub fn unmount(&mut self) {
        self.script_injected = false;
        self.phase = BannerPhase::NotRequested;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct CountingLoader {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ScriptLoader for CountingLoader {
        async fn load(&self, _src: &str) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(anyhow!("script blocked"))
            } else {
                Ok(())
            }
        }
    }

    struct TestNetwork {
        available: AtomicBool,
        render_fails: bool,
        renders: AtomicUsize,
    }

    impl BannerNetwork for TestNetwork {
        fn is_available(&self) -> bool {
            self.available.load(Ordering::SeqCst)
        }

        fn run_banner(&self, _config: &BannerConfig) -> anyhow::Result<()> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            if self.render_fails {
                Err(anyhow!("render exploded"))
            } else {
                self.available.store(true, Ordering::SeqCst);
                Ok(())
            }
        }
    }

    fn slot(loader_fails: bool, available: bool, render_fails: bool) -> BannerSlot {
        BannerSlot::new(
            Arc::new(CountingLoader {
                fail: loader_fails,
                calls: AtomicUsize::new(0),
            }),
            Arc::new(TestNetwork {
                available: AtomicBool::new(available),
                render_fails,
                renders: AtomicUsize::new(0),
            }),
            BannerConfig::default(),
        )
    }

    #[tokio::test]
    async fn script_load_failure_shows_fallback() {
        let mut slot = slot(true, false, false);
        slot.try_load().await;
        assert_eq!(slot.phase(), BannerPhase::FallbackShown);
    }

    #[tokio::test]
    async fn missing_capability_after_load_shows_fallback() {
        // Loader succeeds but the network object never appears.
        let mut slot = slot(false, false, false);
        slot.try_load().await;
        assert_eq!(slot.phase(), BannerPhase::FallbackShown);
    }

    #[tokio::test]
    async fn render_failure_shows_fallback() {
        let mut slot = slot(false, true, true);
        slot.try_load().await;
        assert_eq!(slot.phase(), BannerPhase::FallbackShown);
    }

    #[tokio::test]
    async fn available_network_skips_script_loading() {
        let loader = Arc::new(CountingLoader {
            fail: false,
            calls: AtomicUsize::new(0),
        });
        let mut slot = BannerSlot::new(
            loader.clone(),
            Arc::new(TestNetwork {
                available: AtomicBool::new(true),
                render_fails: false,
                renders: AtomicUsize::new(0),
            }),
            BannerConfig::default(),
        );
        slot.try_load().await;
        assert_eq!(slot.phase(), BannerPhase::Rendered);
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn repeated_calls_rerender_instead_of_stacking() {
        let network = Arc::new(TestNetwork {
            available: AtomicBool::new(true),
            render_fails: false,
            renders: AtomicUsize::new(0),
        });
        let mut slot = BannerSlot::new(
            Arc::new(CountingLoader {
                fail: false,
                calls: AtomicUsize::new(0),
            }),
            network.clone(),
            BannerConfig::default(),
        );

        slot.try_load().await;
        slot.try_load().await;

        assert_eq!(slot.phase(), BannerPhase::Rendered);
        assert_eq!(network.renders.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unmount_resets_the_slot() {
        let mut slot = slot(false, true, false);
        slot.try_load().await;
        assert_eq!(slot.phase(), BannerPhase::Rendered);

        slot.unmount();
        assert_eq!(slot.phase(), BannerPhase::NotRequested);
    }
}
