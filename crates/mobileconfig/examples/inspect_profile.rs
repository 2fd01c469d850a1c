//! Simple decoder to inspect configuration profiles.
//!
//! Run with `RUST_LOG=mobileconfig=trace` to see unrecognized payloads.

use std::fs;
use std::time::SystemTime;

use mobileconfig::{PayloadValue, decode_profile};
use tracing_subscriber::EnvFilter;

fn format_date(date: Option<SystemTime>) -> String {
    match date.map(|d| d.duration_since(SystemTime::UNIX_EPOCH)) {
        Some(Ok(since)) => format!("{}s since epoch", since.as_secs()),
        Some(Err(_)) => "before epoch".to_string(),
        None => "-".to_string(),
    }
}

fn describe(payload: &PayloadValue) -> String {
    match payload {
        PayloadValue::CertificatePkcs1(cert) => format!(
            "certificate {:?} ({} bytes)",
            cert.certificate_file_name,
            cert.content.len()
        ),
        PayloadValue::Mdm(mdm) => format!("MDM server={} topic={}", mdm.server_url, mdm.topic),
        PayloadValue::Scep(scep) => {
            let names = scep
                .content
                .subject_alt_name
                .as_ref()
                .filter(|san| !san.is_empty())
                .map(|san| san.dns_names.iter().cloned().collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            format!("SCEP url={} dns=[{}]", scep.content.url, names)
        }
        PayloadValue::AcmeCertificate(acme) => format!(
            "ACME directory={} key={} {}",
            acme.directory_url, acme.key_type, acme.key_size
        ),
        PayloadValue::Unknown(_) => "(unrecognized)".to_string(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "testdata/pkcs1.mobileconfig".to_string());

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    let profile = match decode_profile(&data) {
        Ok(profile) => profile,
        Err(err) => {
            eprintln!("Failed to decode: {err}");
            std::process::exit(1);
        }
    };

    println!("\n=== Profile ===");
    println!("Identifier: {}", profile.payload.identifier);
    println!("UUID: {}", profile.payload.uuid);
    println!("Display name: {}", profile.payload.display_name);
    println!("Organization: {}", profile.payload.organization);
    println!("Scope: {}", profile.scope);
    println!("Expires: {}", format_date(profile.expiration_date));
    println!("Payloads: {}", profile.payload_content.len());

    println!("\n=== Payloads ===");
    for (i, payload) in profile.payload_content.iter().enumerate() {
        let common = payload.common();
        println!(
            "[{}] {} {} ({})",
            i, common.payload_type, common.identifier, common.uuid
        );
        println!("    {}", describe(payload));
    }
}
