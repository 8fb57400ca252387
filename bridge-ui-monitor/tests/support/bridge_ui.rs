//! Fake bridge UI served by wiremock

use std::path::Path;
use std::time::Duration;

use bridge_ui_monitor::config::CheckerConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const HOME_ADDRESS: &str = "0x4aa42145Aa6Ebf72e164C9bBC74fbD3788045016";
pub const FOREIGN_ADDRESS: &str = "0x7301CFA0e1756B71869E93d4e4Dca5c7d0eb0AA6";
pub const SCRIPT_HASH: &str = "3f9c2a1b.js";

/// Main page linking the bundle the way the production build does.
pub fn main_page(hash: &str) -> String {
    format!(
        r#"<!doctype html><html lang="en"><head><meta charset="utf-8"><title>Bridge Monitor</title><link href="/static/css/main.5b1c.css" rel="stylesheet"></head><body><div id="root"></div><script type="text/javascript" src="/static/js/main.{hash}"></script></body></html>"#
    )
}

/// Minified bundle fragment with both address assignments.
pub fn script_body(home: &str, foreign: &str) -> String {
    format!(
        r#"!function(e){{var t={{}};}}([]);var s=function(){{function e(){{this.HOME_BRIDGE_ADDRESS="{home}",this.FOREIGN_BRIDGE_ADDRESS="{foreign}",this.HOME_HTTP_PARITY_URL="https://core.example"}}return e}}();"#
    )
}

pub fn script_path(hash: &str) -> String {
    format!("/static/js/main.{hash}")
}

/// 200 response behind cloudflare
pub fn cloudflare_ok(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("server", "cloudflare")
        .set_body_string(body)
}

pub async fn mount_main_page(mock: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(response)
        .mount(mock)
        .await;
}

pub async fn mount_script(mock: &MockServer, hash: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(script_path(hash)))
        .respond_with(response)
        .mount(mock)
        .await;
}

/// UI that passes every check for the default addresses.
pub async fn spawn_healthy_ui() -> MockServer {
    spawn_ui_with_addresses(HOME_ADDRESS, FOREIGN_ADDRESS).await
}

pub async fn spawn_ui_with_addresses(home: &str, foreign: &str) -> MockServer {
    let mock = MockServer::start().await;
    mount_main_page(&mock, cloudflare_ok(main_page(SCRIPT_HASH))).await;
    mount_script(&mock, SCRIPT_HASH, cloudflare_ok(script_body(home, foreign))).await;
    mock
}

/// UI whose main page answers only after `delay`.
pub async fn spawn_slow_ui(delay: Duration) -> MockServer {
    let mock = MockServer::start().await;
    mount_main_page(
        &mock,
        cloudflare_ok(main_page(SCRIPT_HASH)).set_delay(delay),
    )
    .await;
    mock
}

pub fn checker_config(base_url: &str, result_file: &Path) -> CheckerConfig {
    CheckerConfig::new(
        Some(base_url.to_string()),
        Some(HOME_ADDRESS.to_string()),
        Some(FOREIGN_ADDRESS.to_string()),
    )
    .expect("complete checker config")
    .with_result_file(result_file)
}
