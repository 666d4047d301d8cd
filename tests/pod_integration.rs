// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests for the pod, coordinator, and service layers against a
//! mocked device.

use std::sync::Arc;
use std::time::Duration;

use freesleep_lib::coordinator::FirmwareCoordinator;
use freesleep_lib::service::SetScheduleCommand;
use freesleep_lib::types::TemperatureUnit;
use freesleep_lib::{Pod, PodConfig, PodRegistry, Side};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn device_status_body() -> serde_json::Value {
    json!({
        "left": {
            "currentTemperatureLevel": -26,
            "currentTemperatureF": 75,
            "targetTemperatureF": 75,
            "secondsRemaining": 39656,
            "isOn": true,
            "isAlarmVibrating": false,
        },
        "right": {
            "currentTemperatureLevel": -64,
            "currentTemperatureF": 65,
            "targetTemperatureF": 77,
            "secondsRemaining": 0,
            "isOn": false,
            "isAlarmVibrating": false,
        },
        "coverVersion": "Pod 4",
        "hubVersion": "Pod 4",
        "freeSleep": {"version": "2.1.3", "branch": "main"},
        "waterLevel": "true",
        "isPriming": false,
        "settings": {"v": 1, "gainLeft": 400, "gainRight": 400, "ledBrightness": 40},
        "wifiStrength": 82,
    })
}

fn settings_body() -> serde_json::Value {
    json!({
        "id": "settings",
        "timeZone": "Europe/Berlin",
        "temperatureFormat": "fahrenheit",
        "rebootDaily": false,
        "left": {"name": "Alice", "awayMode": false},
        "right": {"name": "Bob", "awayMode": false},
        "primePodDaily": {"enabled": true, "time": "14:00"},
    })
}

/// Mounts happy-path mocks for every endpoint a full refresh touches.
async fn mount_refresh_mocks(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/deviceStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_status_body()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(settings_body()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/metrics/vitals/summary"))
        .and(query_param("side", "left"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "heartRate": 60.0,
            "respirationRate": 15.0,
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/metrics/vitals/summary"))
        .and(query_param("side", "right"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "heartRate": 58.0,
            "respirationRate": 13.5,
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "biometrics": {"enabled": true, "jobs": {}},
        })))
        .mount(server)
        .await;
}

fn pod_for(server: &MockServer) -> Pod {
    let client = PodConfig::new(server.uri())
        .unwrap()
        .into_client()
        .unwrap();
    Pod::new(client, "Bedroom Pod")
}

// ============================================================================
// Connect and refresh
// ============================================================================

#[tokio::test]
async fn connect_validates_and_takes_its_name_from_the_hub() {
    let server = MockServer::start().await;
    mount_refresh_mocks(&server).await;

    let config = PodConfig::new(server.uri()).unwrap();
    let pod = Pod::connect(config).await.unwrap();

    assert_eq!(pod.name(), "Pod 4");
    assert!(pod.data().is_some());
}

#[tokio::test]
async fn connect_fails_against_an_unreachable_pod() {
    let server = MockServer::start().await;
    // No mocks mounted: every route answers 404.

    let config = PodConfig::new(server.uri()).unwrap();
    assert!(Pod::connect(config).await.is_err());
}

#[tokio::test]
async fn refresh_builds_a_complete_snapshot() {
    let server = MockServer::start().await;
    mount_refresh_mocks(&server).await;

    let pod = pod_for(&server);
    pod.refresh().await.unwrap();

    let state = pod.data().unwrap();
    assert_eq!(state.status.side(Side::Left).current_temperature_f, 75.0);
    assert_eq!(state.settings.prime_pod_daily.time, "14:00");
    assert_eq!(state.vitals.side(Side::Left).heart_rate, Some(60.0));
    assert_eq!(state.vitals.side(Side::Right).heart_rate, Some(58.0));
    assert!(state.services.get("biometrics").unwrap().enabled);
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_snapshot() {
    let server = MockServer::start().await;

    // The right-side vitals fetch succeeds exactly once, then breaks.
    Mock::given(method("GET"))
        .and(path("/api/metrics/vitals/summary"))
        .and(query_param("side", "right"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "heartRate": 58.0,
            "respirationRate": 13.5,
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/metrics/vitals/summary"))
        .and(query_param("side", "right"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_refresh_mocks(&server).await;

    let pod = pod_for(&server);
    pod.refresh().await.unwrap();
    assert!(pod.refresh().await.is_err());

    // The stale-but-complete snapshot is still served.
    let state = pod.data().unwrap();
    assert_eq!(state.vitals.side(Side::Right).heart_rate, Some(58.0));
}

// ============================================================================
// Write-through actions
// ============================================================================

#[tokio::test]
async fn set_target_temperature_patches_the_cache() {
    let server = MockServer::start().await;
    mount_refresh_mocks(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/deviceStatus"))
        .and(body_json(json!({"left": {"targetTemperatureF": 70.0}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let pod = pod_for(&server);
    pod.refresh().await.unwrap();

    pod.set_target_temperature(Side::Left, 70.0).await.unwrap();

    // Visible immediately, without another fetch.
    let status = pod.side_status(Side::Left).unwrap();
    assert_eq!(status.target_temperature_f, 70.0);
}

#[tokio::test]
async fn set_active_patches_only_the_named_side() {
    let server = MockServer::start().await;
    mount_refresh_mocks(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/deviceStatus"))
        .and(body_json(json!({"right": {"isOn": true}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let pod = pod_for(&server);
    pod.refresh().await.unwrap();

    pod.set_active(Side::Right, true).await.unwrap();

    assert!(pod.side_status(Side::Right).unwrap().is_on);
    assert!(pod.side_status(Side::Left).unwrap().is_on);
}

#[tokio::test]
async fn failed_write_leaves_the_cache_untouched() {
    let server = MockServer::start().await;
    mount_refresh_mocks(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let pod = pod_for(&server);
    pod.refresh().await.unwrap();

    assert!(pod.set_away_mode(Side::Left, true).await.is_err());
    assert!(!pod.side_settings(Side::Left).unwrap().away_mode);
}

#[tokio::test]
async fn set_biometrics_patches_the_service_map() {
    let server = MockServer::start().await;
    mount_refresh_mocks(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/services"))
        .and(body_json(json!({"biometrics": {"enabled": false}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let pod = pod_for(&server);
    pod.refresh().await.unwrap();

    pod.set_biometrics(false).await.unwrap();

    let state = pod.data().unwrap();
    assert!(!state.services.get("biometrics").unwrap().enabled);
}

#[tokio::test]
async fn snapshot_observers_see_write_through_patches() {
    let server = MockServer::start().await;
    mount_refresh_mocks(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let pod = pod_for(&server);
    pod.refresh().await.unwrap();

    let mut rx = pod.coordinator().subscribe();
    rx.mark_unchanged();

    pod.set_reboot_daily(true).await.unwrap();

    assert!(rx.has_changed().unwrap());
    let state = rx.borrow_and_update().clone().unwrap();
    assert!(state.settings.reboot_daily);
}

#[tokio::test]
async fn refresh_completing_after_a_patch_overwrites_it() {
    let server = MockServer::start().await;

    // Device status answers slowly; every other endpoint is instant.
    Mock::given(method("GET"))
        .and(path("/api/deviceStatus"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(device_status_body())
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    mount_refresh_mocks(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/deviceStatus"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let pod = pod_for(&server);
    pod.refresh().await.unwrap();

    // Start a refresh, then land a write-through patch while it is still in
    // flight.
    let coordinator = Arc::clone(pod.coordinator());
    let in_flight = tokio::spawn(async move { coordinator.refresh().await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    pod.set_target_temperature(Side::Left, 70.0).await.unwrap();
    let status = pod.side_status(Side::Left).unwrap();
    assert_eq!(status.target_temperature_f, 70.0);

    // Known limitation: whichever of refresh and patch completes last wins.
    // The refresh finishes after the patch here, so the snapshot reverts to
    // device-reported state until the device itself reports the new target;
    // the cache is at most one polling interval away from correct.
    in_flight.await.unwrap().unwrap();
    let status = pod.side_status(Side::Left).unwrap();
    assert_eq!(status.target_temperature_f, 75.0);
}

// ============================================================================
// Firmware coordinator
// ============================================================================

#[tokio::test]
async fn firmware_refresh_combines_local_and_remote_versions() {
    let server = MockServer::start().await;
    mount_refresh_mocks(&server).await;

    Mock::given(method("GET"))
        .and(path("/serverInfo.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "2.2.0"})))
        .mount(&server)
        .await;

    let client = PodConfig::new(server.uri())
        .unwrap()
        .into_client()
        .unwrap()
        .with_server_info_url(format!("{}/serverInfo.json", server.uri()));

    let coordinator = FirmwareCoordinator::new(client);
    let state = coordinator.refresh().await.unwrap();

    assert_eq!(state.current_version, Some("2.1.3".to_string()));
    assert_eq!(state.latest_version, Some("2.2.0".to_string()));
    assert!(state.update_available());
}

#[tokio::test]
async fn firmware_refresh_tolerates_a_missing_remote_version() {
    let server = MockServer::start().await;
    mount_refresh_mocks(&server).await;

    Mock::given(method("GET"))
        .and(path("/serverInfo.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = PodConfig::new(server.uri())
        .unwrap()
        .into_client()
        .unwrap()
        .with_server_info_url(format!("{}/serverInfo.json", server.uri()));

    let state = FirmwareCoordinator::new(client).refresh().await.unwrap();

    assert_eq!(state.latest_version, None);
    assert!(!state.update_available());
}

// ============================================================================
// Set-schedule service
// ============================================================================

#[tokio::test]
async fn set_schedule_converts_celsius_and_routes_to_the_pod() {
    let server = MockServer::start().await;

    let schedule_f = json!({
        "power": {"enabled": true, "onTemperature": 68, "onTime": "22:00", "offTime": "08:00"},
    });
    Mock::given(method("POST"))
        .and(path("/api/schedules"))
        .and(body_json(json!({"left": {"monday": schedule_f}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let pod = Arc::new(pod_for(&server));
    let registry = PodRegistry::new();
    registry.register(Arc::clone(&pod));

    let command: SetScheduleCommand = serde_json::from_value(json!({
        "side": pod.side_id(Side::Left),
        "day_of_week": "monday",
        "schedule": {
            "power": {"enabled": true, "onTemperature": 20, "onTime": "22:00", "offTime": "08:00"},
        },
    }))
    .unwrap();

    registry
        .handle_set_schedule(command, TemperatureUnit::Celsius)
        .await
        .unwrap();
}

#[tokio::test]
async fn set_schedule_defaults_to_every_day() {
    let server = MockServer::start().await;

    let schedule = json!({"power": {"enabled": false}});
    let all_days: serde_json::Value = [
        "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    ]
    .into_iter()
    .map(|day| (day.to_string(), schedule.clone()))
    .collect::<serde_json::Map<_, _>>()
    .into();
    Mock::given(method("POST"))
        .and(path("/api/schedules"))
        .and(body_json(json!({"right": all_days})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let pod = Arc::new(pod_for(&server));
    let registry = PodRegistry::new();
    registry.register(Arc::clone(&pod));

    let command: SetScheduleCommand = serde_json::from_value(json!({
        "side": pod.side_id(Side::Right),
        "schedule": {"power": {"enabled": false}},
    }))
    .unwrap();

    registry
        .handle_set_schedule(command, TemperatureUnit::Fahrenheit)
        .await
        .unwrap();
}

#[tokio::test]
async fn set_schedule_fans_out_to_both_sides() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/schedules"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let pod = Arc::new(pod_for(&server));
    let registry = PodRegistry::new();
    registry.register(Arc::clone(&pod));

    let command: SetScheduleCommand = serde_json::from_value(json!({
        "side": [pod.side_id(Side::Left), pod.side_id(Side::Right)],
        "day_of_week": ["friday"],
        "schedule": {"power": {"enabled": true}},
    }))
    .unwrap();

    registry
        .handle_set_schedule(command, TemperatureUnit::Fahrenheit)
        .await
        .unwrap();
}
