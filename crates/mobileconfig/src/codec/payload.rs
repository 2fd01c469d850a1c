//! Payload encoding/decoding.
//!
//! A `PayloadContent` entry is decoded in two passes over the same
//! dictionary node:
//!
//! 1. read only `PayloadType`;
//! 2. look the discriminator up in the payload registry and decode the whole
//!    dictionary, from the start, into the selected shape.
//!
//! Unrecognized discriminators decode as [`PayloadValue::Unknown`]. A
//! recognized discriminator whose body does not fit its shape is an error;
//! it never degrades to `Unknown`.

use plist::Value;

use crate::codec::primitives::{Decode, DictReader, DictWriter, Encode, Reader};
use crate::error::{DecodeError, EncodeError};
use crate::model::{
    AcmeCertificatePayload, CertificatePkcs1Payload, MdmPayload, Payload, PayloadKind,
    PayloadValue, ScepPayload, ScepPayloadContent, SubjectAltName,
};

/// Key holding the payload discriminator.
pub const PAYLOAD_TYPE_KEY: &str = "PayloadType";

// =============================================================================
// DISPATCH
// =============================================================================

/// First-pass target: the discriminator and nothing else.
struct PayloadTypeProbe(String);

impl Decode for PayloadTypeProbe {
    const TYPE_NAME: &'static str = "PayloadValue";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        let dict = reader.dictionary(Self::TYPE_NAME)?;
        dict.required(PAYLOAD_TYPE_KEY).map(PayloadTypeProbe)
    }
}

impl Decode for PayloadValue {
    const TYPE_NAME: &'static str = "PayloadValue";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        let PayloadTypeProbe(payload_type) = reader.decode()?;
        decode_payload_body(PayloadKind::from_payload_type(&payload_type), reader)
    }
}

/// Decodes a payload dictionary as the shape `kind`.
pub fn decode_payload_body(kind: PayloadKind, reader: Reader<'_>) -> Result<PayloadValue, DecodeError> {
    match kind {
        PayloadKind::CertificatePkcs1 => reader.decode().map(PayloadValue::CertificatePkcs1),
        PayloadKind::Mdm => reader.decode().map(PayloadValue::Mdm),
        PayloadKind::Scep => reader.decode().map(PayloadValue::Scep),
        PayloadKind::AcmeCertificate => reader.decode().map(PayloadValue::AcmeCertificate),
        PayloadKind::Unknown => reader.decode().map(PayloadValue::Unknown),
    }
}

impl Encode for PayloadValue {
    fn encode(&self) -> Result<Value, EncodeError> {
        match self {
            PayloadValue::CertificatePkcs1(p) => p.encode(),
            PayloadValue::Mdm(p) => p.encode(),
            PayloadValue::Scep(p) => p.encode(),
            PayloadValue::AcmeCertificate(p) => p.encode(),
            PayloadValue::Unknown(p) => p.encode(),
        }
    }
}

// =============================================================================
// COMMON KEYS
// =============================================================================

/// Reads the keys shared by every payload.
pub fn decode_common(dict: &DictReader<'_>) -> Result<Payload, DecodeError> {
    Ok(Payload {
        description: dict.field("PayloadDescription")?,
        display_name: dict.field("PayloadDisplayName")?,
        identifier: dict.field("PayloadIdentifier")?,
        organization: dict.field("PayloadOrganization")?,
        uuid: dict.field("PayloadUUID")?,
        payload_type: dict.field(PAYLOAD_TYPE_KEY)?,
        version: dict.field("PayloadVersion")?,
    })
}

/// Writes the keys shared by every payload.
pub fn encode_common(payload: &Payload, writer: &mut DictWriter) -> Result<(), EncodeError> {
    writer.field_omit_empty("PayloadDescription", &payload.description)?;
    writer.field_omit_empty("PayloadDisplayName", &payload.display_name)?;
    writer.field("PayloadIdentifier", &payload.identifier)?;
    writer.field_omit_empty("PayloadOrganization", &payload.organization)?;
    writer.field("PayloadUUID", &payload.uuid)?;
    writer.field(PAYLOAD_TYPE_KEY, &payload.payload_type)?;
    writer.field("PayloadVersion", &payload.version)?;
    Ok(())
}

impl Decode for Payload {
    const TYPE_NAME: &'static str = "Payload";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        decode_common(&reader.dictionary(Self::TYPE_NAME)?)
    }
}

impl Encode for Payload {
    fn encode(&self) -> Result<Value, EncodeError> {
        let mut writer = DictWriter::new();
        encode_common(self, &mut writer)?;
        Ok(writer.finish())
    }
}

// =============================================================================
// PAYLOAD SHAPES
// =============================================================================

impl Decode for CertificatePkcs1Payload {
    const TYPE_NAME: &'static str = "CertificatePkcs1Payload";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        let dict = reader.dictionary(Self::TYPE_NAME)?;
        Ok(Self {
            payload: decode_common(&dict)?,
            certificate_file_name: dict.field("PayloadCertificateFileName")?,
            content: dict.data("PayloadContent")?,
        })
    }
}

impl Encode for CertificatePkcs1Payload {
    fn encode(&self) -> Result<Value, EncodeError> {
        let mut writer = DictWriter::new();
        encode_common(&self.payload, &mut writer)?;
        writer.field_omit_empty("PayloadCertificateFileName", &self.certificate_file_name)?;
        writer.data("PayloadContent", &self.content);
        Ok(writer.finish())
    }
}

impl Decode for SubjectAltName {
    const TYPE_NAME: &'static str = "SubjectAltName";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        let dict = reader.dictionary(Self::TYPE_NAME)?;
        Ok(Self {
            dns_names: dict.field("dNSName")?,
            nt_principal_names: dict.field("ntPrincipalName")?,
            rfc822_names: dict.field("rfc822Name")?,
            uris: dict.field("uniformResourceIdentifier")?,
        })
    }
}

impl Encode for SubjectAltName {
    fn encode(&self) -> Result<Value, EncodeError> {
        let mut writer = DictWriter::new();
        writer.field_omit_empty("dNSName", &self.dns_names)?;
        writer.field_omit_empty("ntPrincipalName", &self.nt_principal_names)?;
        writer.field_omit_empty("rfc822Name", &self.rfc822_names)?;
        writer.field_omit_empty("uniformResourceIdentifier", &self.uris)?;
        Ok(writer.finish())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Decode for ScepPayloadContent {
    const TYPE_NAME: &'static str = "ScepPayloadContent";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        let dict = reader.dictionary(Self::TYPE_NAME)?;
        Ok(Self {
            url: dict.field("URL")?,
            name: dict.field("Name")?,
            subject: dict.field("Subject")?,
            challenge: dict.field("Challenge")?,
            key_size: dict.field("Keysize")?,
            key_type: dict.field("Key Type")?,
            key_usage: dict.field("Key Usage")?,
            retries: dict.field("Retries")?,
            retry_delay: dict.field("RetryDelay")?,
            ca_fingerprint: dict.data("CAFingerprint")?,
            allow_all_apps_access: dict.field("AllowAllAppsAccess")?,
            key_is_extractable: dict.optional("KeyIsExtractable")?,
            subject_alt_name: dict.optional("SubjectAltName")?,
        })
    }
}

impl Encode for ScepPayloadContent {
    fn encode(&self) -> Result<Value, EncodeError> {
        let mut writer = DictWriter::new();
        writer.field("URL", &self.url)?;
        writer.field_omit_empty("Name", &self.name)?;
        writer.field_omit_empty("Subject", &self.subject)?;
        writer.field_omit_empty("Challenge", &self.challenge)?;
        writer.field_omit_empty("Keysize", &self.key_size)?;
        writer.field_omit_empty("Key Type", &self.key_type)?;
        writer.field_omit_empty("Key Usage", &self.key_usage)?;
        writer.field_omit_empty("Retries", &self.retries)?;
        writer.field_omit_empty("RetryDelay", &self.retry_delay)?;
        writer.data_omit_empty("CAFingerprint", &self.ca_fingerprint);
        writer.field_omit_empty("AllowAllAppsAccess", &self.allow_all_apps_access)?;
        writer.optional("KeyIsExtractable", &self.key_is_extractable)?;
        writer.optional("SubjectAltName", &self.subject_alt_name)?;
        Ok(writer.finish())
    }
}

impl Decode for ScepPayload {
    const TYPE_NAME: &'static str = "ScepPayload";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        let dict = reader.dictionary(Self::TYPE_NAME)?;
        Ok(Self {
            payload: decode_common(&dict)?,
            content: dict.field("PayloadContent")?,
        })
    }
}

impl Encode for ScepPayload {
    fn encode(&self) -> Result<Value, EncodeError> {
        let mut writer = DictWriter::new();
        encode_common(&self.payload, &mut writer)?;
        writer.field("PayloadContent", &self.content)?;
        Ok(writer.finish())
    }
}

impl Decode for AcmeCertificatePayload {
    const TYPE_NAME: &'static str = "AcmeCertificatePayload";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        let dict = reader.dictionary(Self::TYPE_NAME)?;
        Ok(Self {
            payload: decode_common(&dict)?,
            allow_all_apps_access: dict.field("AllowAllAppsAccess")?,
            attest: dict.field("Attest")?,
            client_identifier: dict.field("ClientIdentifier")?,
            directory_url: dict.field("DirectoryURL")?,
            extended_key_usage: dict.field("ExtendedKeyUsage")?,
            hardware_bound: dict.field("HardwareBound")?,
            key_size: dict.field("KeySize")?,
            key_is_extractable: dict.optional("KeyIsExtractable")?,
            key_type: dict.field("KeyType")?,
            subject: dict.field("Subject")?,
            usage_flags: dict.field("UsageFlags")?,
            subject_alt_name: dict.optional("SubjectAltName")?,
        })
    }
}

impl Encode for AcmeCertificatePayload {
    fn encode(&self) -> Result<Value, EncodeError> {
        let mut writer = DictWriter::new();
        encode_common(&self.payload, &mut writer)?;
        writer.field_omit_empty("AllowAllAppsAccess", &self.allow_all_apps_access)?;
        writer.field_omit_empty("Attest", &self.attest)?;
        writer.field_omit_empty("ClientIdentifier", &self.client_identifier)?;
        writer.field_omit_empty("DirectoryURL", &self.directory_url)?;
        writer.field_omit_empty("ExtendedKeyUsage", &self.extended_key_usage)?;
        writer.field_omit_empty("HardwareBound", &self.hardware_bound)?;
        writer.field_omit_empty("KeySize", &self.key_size)?;
        writer.optional("KeyIsExtractable", &self.key_is_extractable)?;
        writer.field_omit_empty("KeyType", &self.key_type)?;
        writer.field_omit_empty("Subject", &self.subject)?;
        writer.field_omit_empty("UsageFlags", &self.usage_flags)?;
        writer.optional("SubjectAltName", &self.subject_alt_name)?;
        Ok(writer.finish())
    }
}

impl Decode for MdmPayload {
    const TYPE_NAME: &'static str = "MdmPayload";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        let dict = reader.dictionary(Self::TYPE_NAME)?;
        Ok(Self {
            payload: decode_common(&dict)?,
            identity_certificate_uuid: dict.field("IdentityCertificateUUID")?,
            topic: dict.field("Topic")?,
            server_url: dict.field("ServerURL")?,
            server_capabilities: dict.field("ServerCapabilities")?,
            sign_message: dict.field("SignMessage")?,
            check_in_url: dict.field("CheckInURL")?,
            check_out_when_removed: dict.field("CheckOutWhenRemoved")?,
            access_rights: dict.field("AccessRights")?,
            use_development_apns: dict.field("UseDevelopmentAPNS")?,
            server_url_pinning_certificate_uuids: dict.field("ServerURLPinningCertificateUUIDs")?,
            check_in_url_pinning_certificate_uuids: dict
                .field("CheckInURLPinningCertificateUUIDs")?,
            pinning_revocation_check_required: dict.field("PinningRevocationCheckRequired")?,
        })
    }
}

impl Encode for MdmPayload {
    fn encode(&self) -> Result<Value, EncodeError> {
        let mut writer = DictWriter::new();
        encode_common(&self.payload, &mut writer)?;
        writer.field("IdentityCertificateUUID", &self.identity_certificate_uuid)?;
        writer.field("Topic", &self.topic)?;
        writer.field("ServerURL", &self.server_url)?;
        writer.field_omit_empty("ServerCapabilities", &self.server_capabilities)?;
        writer.field_omit_empty("SignMessage", &self.sign_message)?;
        writer.field_omit_empty("CheckInURL", &self.check_in_url)?;
        writer.field_omit_empty("CheckOutWhenRemoved", &self.check_out_when_removed)?;
        writer.field("AccessRights", &self.access_rights)?;
        writer.field_omit_empty("UseDevelopmentAPNS", &self.use_development_apns)?;
        writer.field_omit_empty(
            "ServerURLPinningCertificateUUIDs",
            &self.server_url_pinning_certificate_uuids,
        )?;
        writer.field_omit_empty(
            "CheckInURLPinningCertificateUUIDs",
            &self.check_in_url_pinning_certificate_uuids,
        )?;
        writer.field_omit_empty(
            "PinningRevocationCheckRequired",
            &self.pinning_revocation_check_required,
        )?;
        Ok(writer.finish())
    }
}
