//! Simulator against a live webhook server.

use salesys_devtools::config::{
    ForwardConfig, SimulationTarget, SimulatorConfig, WebhookServerConfig,
};
use salesys_devtools::webhook::simulate_webhook_call;
use salesys_devtools::Simulator;
use std::time::{Duration, Instant};

mod common;

async fn live_server() -> (std::net::SocketAddr, salesys_devtools::Shutdown) {
    let config = WebhookServerConfig {
        forward: ForwardConfig {
            enabled: false,
            ..ForwardConfig::default()
        },
        ..WebhookServerConfig::default()
    };
    common::start_webhook_server(config).await
}

#[tokio::test]
async fn simulated_call_is_acknowledged() {
    let (server, shutdown) = live_server().await;

    let delivered = simulate_webhook_call(
        &common::client(),
        &format!("http://{server}/webhook/inbound-call"),
        "test-1",
    )
    .await;
    assert!(delivered);

    shutdown.trigger();
}

#[tokio::test]
async fn unreachable_target_is_false() {
    let target = common::unused_addr().await;
    let delivered = simulate_webhook_call(
        &common::client(),
        &format!("http://{target}/webhook/inbound-call"),
        "prod-1",
    )
    .await;
    assert!(!delivered);
}

#[tokio::test]
async fn wrong_path_is_false() {
    let (server, shutdown) = live_server().await;

    let delivered = simulate_webhook_call(
        &common::client(),
        &format!("http://{server}/not-the-webhook"),
        "test-1",
    )
    .await;
    assert!(!delivered);

    shutdown.trigger();
}

#[tokio::test]
async fn waits_between_consecutive_calls() {
    let down = common::unused_addr().await;
    let url = format!("http://{down}/webhook/inbound-call");

    let config = SimulatorConfig {
        targets: vec![
            SimulationTarget::optional(&url, "a"),
            SimulationTarget::optional(&url, "b"),
            SimulationTarget::optional(&url, "c"),
        ],
        delay_secs: 1,
        timeout_secs: 2,
    };

    let start = Instant::now();
    let report = Simulator::new(config).unwrap().run().await;
    let elapsed = start.elapsed();

    assert_eq!(report.outcomes.len(), 3);
    // two gaps between three calls, none before the first
    assert!(elapsed >= Duration::from_secs(2), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(6), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn runs_targets_in_order() {
    let (server, shutdown) = live_server().await;
    let down = common::unused_addr().await;
    let live_url = format!("http://{server}/webhook/inbound-call");

    let config = SimulatorConfig {
        targets: vec![
            SimulationTarget::required(&live_url, "test-1"),
            SimulationTarget::required(&live_url, "test-2"),
            SimulationTarget::optional(format!("http://{down}/webhook/inbound-call"), "prod-1"),
        ],
        delay_secs: 0,
        timeout_secs: 2,
    };

    let report = Simulator::new(config).unwrap().run().await;
    let delivered: Vec<bool> = report.outcomes.iter().map(|o| o.delivered).collect();
    assert_eq!(delivered, vec![true, true, false]);
    assert_eq!(report.delivered(), 2);
    assert_eq!(report.required_failures(), 0);
    assert_eq!(report.outcomes[1].target.call_suffix, "test-2");

    shutdown.trigger();
}
