// SPDX-License-Identifier: Apache-2.0

use assert_cmd::Command;
use std::io::Write as _;

const DEFAULTS_PAYLOAD: &str = "00020126330014br.gov.bcb.pix011111999998888520400005303986\
                                5802BR5910ROTI PAOLA6009SAO PAULO62070503***630422D8";

fn pix_brcode() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pix-brcode"))
}

#[test]
fn generate_prints_the_reference_payload() {
    let output = pix_brcode()
        .args(["generate", "--key", "11999998888"])
        .output()
        .expect("run generate");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8 payload");
    assert_eq!(text.trim_end(), DEFAULTS_PAYLOAD);
}

#[test]
fn generate_json_reports_payload_and_crc() {
    let output = pix_brcode()
        .args(["generate", "--key", "11999998888", "--json"])
        .output()
        .expect("run generate");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(value["payload"].as_str(), Some(DEFAULTS_PAYLOAD));
    assert_eq!(value["crc"].as_str(), Some("22D8"));
}

#[test]
fn generate_accepts_a_request_document() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{"pix_key": "12345678901", "merchant_name": "LOJA TESTE", "amount": 100.5, "txid": "TX123"}}"#
    )
    .expect("write request");
    let output = pix_brcode()
        .args(["generate", "--request"])
        .arg(file.path())
        .output()
        .expect("run generate");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8 payload");
    assert!(text.contains("5406100.50"));
    assert!(text.contains("LOJA TESTE"));
    assert!(text.contains("TX123"));
}

#[test]
fn negative_amount_maps_to_the_validation_exit_code() {
    let output = pix_brcode()
        .args(["generate", "--key", "chave", "--amount", "-1", "--json"])
        .output()
        .expect("run generate");
    assert_eq!(output.status.code(), Some(3));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("machine error");
    assert_eq!(value["code"].as_str(), Some("validation"));
}

#[test]
fn legacy_mode_accepts_what_strict_mode_rejects() {
    let output = pix_brcode()
        .args(["generate", "--key", "chave", "--amount", "-1", "--legacy"])
        .output()
        .expect("run generate");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8 payload");
    assert!(!text.contains("5406"));
}

#[test]
fn verify_round_trips_generated_payloads() {
    pix_brcode()
        .args(["verify", DEFAULTS_PAYLOAD])
        .assert()
        .success()
        .stdout("ok\n");
}

#[test]
fn verify_rejects_a_tampered_payload() {
    let mut tampered = DEFAULTS_PAYLOAD.to_string();
    tampered.replace_range(20..21, "9");
    let output = pix_brcode()
        .args(["verify", &tampered])
        .output()
        .expect("run verify");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn missing_key_and_request_is_a_usage_error() {
    let output = pix_brcode().arg("generate").output().expect("run generate");
    assert_eq!(output.status.code(), Some(2));
}
