//! Decoding and re-encoding of the profiles under `testdata/`.

use std::io::Cursor;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use mobileconfig::codec::{EncodeOptions, parse_document};
use mobileconfig::{
    AcmeCertificatePayload, CertificatePkcs1Payload, DecodeError, Payload, PayloadKind,
    PayloadValue, Profile, ProfileBuilder, decode_profile, encode_profile,
    encode_profile_with_options,
};
use plist::Value;

const PROFILE_ID: &str =
    "com.github.erikberglund.ProfileCreator.2689BE77-60CE-4588-83F7-7CDC494DB1AA";
const PKCS1_ID: &str = "com.github.erikberglund.ProfileCreator.2689BE77-60CE-4588-83F7-7CDC494DB1AA.com.apple.security.pkcs1.8BF53919-B83E-4280-A40C-0407FB6AF341";
const PKCS1_CONTENT: [u8; 19] = [
    0x30, 0x82, 0x04, 0x3e, 0x30, 0x82, 0x03, 0x26, 0xa0, 0x03, 0x02, 0x01, 0x02, 0x02, 0x04,
    0x4a, 0x53, 0x8c, 0x28,
];

fn fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

fn tree(bytes: &[u8]) -> Value {
    Value::from_reader(Cursor::new(bytes)).unwrap()
}

fn check_pkcs1_profile(profile: &Profile) {
    assert_eq!(profile.payload.uuid, "2689BE77-60CE-4588-83F7-7CDC494DB1AA");
    assert_eq!(profile.payload.identifier, PROFILE_ID);
    assert_eq!(profile.scope, "User");
    assert_eq!(profile.payload_content.len(), 1);

    let certs = profile.certificate_pkcs1_payloads();
    assert_eq!(certs.len(), 1);
    let cert = certs[0];
    assert_eq!(cert.payload.uuid, "8BF53919-B83E-4280-A40C-0407FB6AF341");
    assert_eq!(cert.payload.identifier, PKCS1_ID);
    assert_eq!(cert.payload.display_name, "Certificate");
    assert_eq!(cert.content, PKCS1_CONTENT);
}

#[test]
fn test_pkcs1_fixture_decodes() {
    let profile = decode_profile(&fixture("pkcs1.mobileconfig")).unwrap();
    check_pkcs1_profile(&profile);

    let cert = profile.certificate_pkcs1_payloads()[0];
    assert_eq!(cert.certificate_file_name, "entrust_g2_ca.cer");
    assert_eq!(cert.payload.description, "Adds a PKCS#1-formatted certificate");
    assert_eq!(profile.payload.organization, "ProfileCreator");
}

#[test]
fn test_constructed_profile_matches_fixture_shape() {
    let profile = ProfileBuilder::new(PROFILE_ID)
        .uuid("2689BE77-60CE-4588-83F7-7CDC494DB1AA")
        .scope("User")
        .payload_with(CertificatePkcs1Payload::new(PKCS1_ID), |cert| {
            cert.payload.display_name = "Certificate".to_string();
            cert.payload.uuid = "8BF53919-B83E-4280-A40C-0407FB6AF341".to_string();
            cert.content = PKCS1_CONTENT.to_vec();
        })
        .build();
    check_pkcs1_profile(&profile);

    let bytes = encode_profile(&profile).unwrap();
    let decoded = decode_profile(&bytes).unwrap();
    check_pkcs1_profile(&decoded);
    assert_eq!(decoded, profile);
}

#[test]
fn test_pkcs1_fixture_reencodes_to_same_tree() {
    let input = fixture("pkcs1.mobileconfig");
    let profile = decode_profile(&input).unwrap();
    let output = encode_profile(&profile).unwrap();
    assert_eq!(tree(&output), tree(&input));
}

#[test]
fn test_acme_fixture_decodes() {
    let profile = decode_profile(&fixture("acme-da.mobileconfig")).unwrap();

    let mut acme = AcmeCertificatePayload {
        payload: Payload {
            identifier: "com.apple.security.acme.cbdc6238-feec-4171-8784-98e576bbb814".to_string(),
            uuid: "cbdc6238-feec-4171-8784-98e576bbb814".to_string(),
            payload_type: "com.apple.security.acme".to_string(),
            version: 1,
            ..Default::default()
        },
        attest: true,
        client_identifier: "2678F47F-7A0B-4E7E-BEBC-29C1DCAF28C6".to_string(),
        directory_url: "https://127.0.0.1:8443/acme/appleacmesim/directory".to_string(),
        extended_key_usage: vec!["1.3.6.1.5.5.7.3.2".to_string()],
        hardware_bound: true,
        key_is_extractable: None,
        key_type: "ECSECPrimeRandom".to_string(),
        key_size: 384,
        usage_flags: 0,
        ..Default::default()
    };
    acme.subject = vec![
        vec![vec!["C".to_string(), "NL".to_string()]],
        vec![vec!["O".to_string(), "Smallstep ACME DA Demo".to_string()]],
    ];

    let expected = Profile {
        payload: Payload {
            uuid: "734EEACF-1334-4B65-8E8C-6AC07E9B79E5".to_string(),
            identifier: "com.smallstep.acmedademo".to_string(),
            payload_type: "Configuration".to_string(),
            display_name: "ACME DA Certificate".to_string(),
            version: 1,
            ..Default::default()
        },
        payload_content: vec![PayloadValue::AcmeCertificate(acme)],
        ..Default::default()
    };

    assert_eq!(profile, expected);
}

#[test]
fn test_multistring_fixture_error() {
    let err = decode_profile(&fixture("multistring-error.mobileconfig")).unwrap_err();

    assert_eq!(
        err.path(),
        Some("PayloadContent[0].PayloadContent.SubjectAltName.dNSName")
    );
    assert_eq!(
        err.without_context(),
        &DecodeError::UnexpectedType {
            found: "integer 42".to_string(),
            target: "MultiString",
        }
    );
    assert_eq!(
        err.to_string(),
        "PayloadContent[0].PayloadContent.SubjectAltName.dNSName: \
         cannot decode integer 42 into value of type MultiString"
    );
}

#[test]
fn test_enrollment_fixture_decodes_all_kinds() {
    let profile = decode_profile(&fixture("enrollment.mobileconfig")).unwrap();

    let kinds: Vec<PayloadKind> = profile.payload_content.iter().map(|p| p.kind()).collect();
    assert_eq!(
        kinds,
        vec![PayloadKind::Scep, PayloadKind::Mdm, PayloadKind::Unknown]
    );

    assert!(profile.removal_disallowed);
    assert_eq!(profile.scope, "System");
    assert_eq!(
        profile.expiration_date,
        Some(SystemTime::UNIX_EPOCH + Duration::from_secs(1_893_456_000))
    );
    assert_eq!(
        profile.consent_text["default"],
        "Installing this profile enrolls the device in Example MDM."
    );

    let scep = &profile.scep_payloads()[0].content;
    assert_eq!(scep.retries, 3);
    assert_eq!(scep.key_is_extractable, Some(false));
    let san = scep.subject_alt_name.as_ref().unwrap();
    assert_eq!(
        san.dns_names.as_slice(),
        ["device1.example.com", "device1.corp.example.com"]
    );
    assert_eq!(san.nt_principal_names.as_slice(), ["device1@CORP.EXAMPLE.COM"]);

    // The MDM identity points at the SCEP payload of the same profile.
    let mdm = profile.mdm_payloads()[0];
    assert_eq!(mdm.access_rights, 8191);
    let identity = profile.find_payload(&mdm.identity_certificate_uuid).unwrap();
    assert_eq!(identity.kind(), PayloadKind::Scep);

    let wifi = profile.unknown_payloads()[0];
    assert_eq!(wifi.payload_type, "com.apple.wifi.managed");
    assert_eq!(wifi.display_name, "Corporate Wi-Fi");
}

#[test]
fn test_enrollment_fixture_reencodes_to_same_tree() {
    let input = fixture("enrollment.mobileconfig");
    let profile = decode_profile(&input).unwrap();
    let output = encode_profile(&profile).unwrap();

    // Only the unrecognized payload's own keys are lost.
    let mut expected = parse_document(&input).unwrap();
    let wifi = expected
        .as_dictionary_mut()
        .and_then(|d| d.get_mut("PayloadContent"))
        .and_then(Value::as_array_mut)
        .and_then(|items| items.get_mut(2))
        .and_then(Value::as_dictionary_mut)
        .unwrap();
    for key in ["SSID_STR", "EncryptionType", "AutoJoin"] {
        assert!(wifi.remove(key).is_some());
    }

    assert_eq!(tree(&output), expected);
}

#[test]
fn test_binary_format_roundtrip() {
    let profile = decode_profile(&fixture("enrollment.mobileconfig")).unwrap();

    let binary = encode_profile_with_options(&profile, EncodeOptions::binary()).unwrap();
    assert!(binary.starts_with(b"bplist00"));
    let decoded = decode_profile(&binary).unwrap();
    assert_eq!(decoded, profile);

    let xml = encode_profile(&decoded).unwrap();
    assert_eq!(tree(&xml), tree(&binary));
}

#[test]
fn test_unknown_payloads_survive_reencoding() {
    let profile = decode_profile(&fixture("enrollment.mobileconfig")).unwrap();
    let decoded = decode_profile(&encode_profile(&profile).unwrap()).unwrap();

    let before: Vec<&Payload> = profile.unknown_payloads();
    let after: Vec<&Payload> = decoded.unknown_payloads();
    assert_eq!(before, after);
}
