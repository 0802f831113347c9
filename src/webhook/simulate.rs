//! Webhook simulator.
//!
//! Builds realistic inbound-call events and POSTs them at one or more
//! targets in sequence, printing what each target answered. Meant to be run
//! by hand against a local webhook server.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::{SimulationTarget, SimulatorConfig};

/// Call id embedding the caller-supplied suffix.
pub fn call_id(call_suffix: &str) -> String {
    format!("c2225ahk{call_suffix}-3c56hbk-dgkk")
}

fn sweden_dialplan() -> Value {
    json!({
        "key": "SE",
        "name": "Sweden",
        "globalPrefix": "00",
        "natPrefix": "0",
        "cc": "46",
        "areaPrefix": true,
    })
}

/// A trying-state inbound call from 0737606800 to 0775893847.
pub fn sample_call_event(call_suffix: &str, now: DateTime<Utc>) -> Value {
    let id = call_id(call_suffix);
    let caller = "0737606800";
    let called = "0775893847";

    json!({
        "id": id,
        "url": format!("https://api.telnect.com/v1/Calls/{id}"),
        "source": {
            "dialplan": sweden_dialplan(),
            "asserted": { "scheme": "tel", "user": caller },
            "caller": { "scheme": "tel", "user": caller },
            "privacy": false,
        },
        "destination": {
            "dialplan": sweden_dialplan(),
            "req": { "scheme": "tel", "user": called },
            "to": { "scheme": "tel", "user": called },
        },
        "number": {
            "asserted": caller,
            "called": called,
            "caller": caller,
        },
        "meta": {
            "src_ip": "10.6.66.62",
            "src_port": "5060",
            "auth_centrex_custid": "129738",
            "instance": "pbx02-salessys",
            "node_ip": "10.6.70.158",
            "binding": "default",
            "id": id,
            "node_port": "52001",
            "inbound_trunk": "trunk:centrex",
            "auth_custid": "277360",
        },
        "header": {
            "X-Original-Callid": [format!("p65555t{}m205508c32899s4", now.timestamp())],
            "X-Accounting-ID": [id],
        },
        "status": "trying",
        "actions": [],
    })
}

async fn deliver(
    client: &reqwest::Client,
    target_url: &str,
    event: &Value,
) -> Result<(StatusCode, Option<String>), reqwest::Error> {
    let response = client
        .post(target_url)
        .json(event)
        .send()
        .await?
        .error_for_status()?;

    let status = response.status();
    let body: Value = response.json().await?;
    let message = body.get("message").and_then(Value::as_str).map(str::to_string);
    Ok((status, message))
}

/// Send one simulated call. Prints the outcome and never fails.
pub async fn simulate_webhook_call(
    client: &reqwest::Client,
    target_url: &str,
    call_suffix: &str,
) -> bool {
    let event = sample_call_event(call_suffix, Utc::now());

    println!();
    println!("SIMULATING WEBHOOK CALL: {call_suffix}");
    println!("   Target: {target_url}");
    println!("   Call ID: {}", event["id"].as_str().unwrap_or_default());

    match deliver(client, target_url, &event).await {
        Ok((status, message)) => {
            println!(
                "   Response: {} - {}",
                status.as_u16(),
                message.as_deref().unwrap_or("None")
            );
            true
        }
        Err(e) => {
            println!("   Failed: {e}");
            tracing::debug!(url = %target_url, error = %e, "Simulated call failed");
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOutcome {
    pub target: SimulationTarget,
    pub delivered: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub outcomes: Vec<SimulationOutcome>,
}

impl SimulationReport {
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.delivered).count()
    }

    /// Optional targets do not count against the run.
    pub fn required_failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| !o.delivered && !o.target.optional)
            .count()
    }
}

pub struct Simulator {
    client: reqwest::Client,
    config: SimulatorConfig,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Call every target in order with the configured pause between calls.
    pub async fn run(&self) -> SimulationReport {
        let delay = Duration::from_secs(self.config.delay_secs);
        let mut report = SimulationReport::default();

        for (i, target) in self.config.targets.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let delivered = simulate_webhook_call(&self.client, &target.url, &target.call_suffix).await;
            if !delivered && target.optional {
                println!("   Server at {} not running, skipping...", target.url);
            }

            report.outcomes.push(SimulationOutcome {
                target: target.clone(),
                delivered,
            });
        }
        report
    }
}
