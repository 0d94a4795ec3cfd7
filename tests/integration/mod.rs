//! Shared setup for the integration tests.

pub mod api_client_test;
pub mod session_flow_test;

use std::sync::{Arc, Once};
use veestributes_client::config::NotificationTimings;
use veestributes_client::notify::ManualClock;
use veestributes_client::storage::MemoryStorage;
use veestributes_client::{
    ApiClient, ClientConfig, ClientContext, NotificationCenter, NotificationLevel,
    ReqwestTransport,
};

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Client pointed at `base_url`, with volatile storage and a manual clock.
pub fn client_for(base_url: &str) -> (ApiClient<ReqwestTransport>, Arc<ManualClock>) {
    init_test_env();
    let clock = Arc::new(ManualClock::new());
    let notifications = Arc::new(NotificationCenter::new(
        clock.clone(),
        NotificationTimings::default(),
    ));
    let config = ClientConfig {
        base_url: base_url.to_string(),
        ..Default::default()
    };
    let context = ClientContext::new(config, Arc::new(MemoryStorage::new()), notifications);
    let client = ApiClient::new(context).expect("client should build");
    (client, clock)
}

/// Messages currently on screen, oldest first.
pub fn shown(client: &ApiClient<ReqwestTransport>) -> Vec<(NotificationLevel, String)> {
    client
        .context()
        .notifications()
        .active()
        .into_iter()
        .map(|n| (n.level, n.message))
        .collect()
}
