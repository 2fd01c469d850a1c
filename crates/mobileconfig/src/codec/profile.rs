//! Profile encoding/decoding.

use plist::Value;

use crate::codec::payload::{decode_common, encode_common};
use crate::codec::primitives::{Decode, DictWriter, Encode, Reader};
use crate::error::{DecodeError, EncodeError};
use crate::model::Profile;

impl Decode for Profile {
    const TYPE_NAME: &'static str = "Profile";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        let dict = reader.dictionary(Self::TYPE_NAME)?;
        Ok(Self {
            payload: decode_common(&dict)?,
            payload_content: dict.field("PayloadContent")?,
            expiration_date: dict.date("PayloadExpirationDate")?,
            removal_disallowed: dict.field("PayloadRemovalDisallowed")?,
            scope: dict.field("PayloadScope")?,
            date: dict.date("PayloadDate")?,
            duration_until_removal: dict.field("DurationUntilRemoval")?,
            consent_text: dict.field("ConsentText")?,
            encrypted_payload_content: dict.data("EncryptedPayloadContent")?,
            has_removal_passcode: dict.field("HasRemovalPasscode")?,
            is_encrypted: dict.field("IsEncrypted")?,
            removal_date: dict.date("RemovalDate")?,
            target_device_type: dict.field("TargetDeviceType")?,
        })
    }
}

impl Encode for Profile {
    fn encode(&self) -> Result<Value, EncodeError> {
        let mut writer = DictWriter::new();
        encode_common(&self.payload, &mut writer)?;
        writer.field("PayloadContent", &self.payload_content)?;
        writer.date_omit_empty("PayloadExpirationDate", self.expiration_date);
        writer.field_omit_empty("PayloadRemovalDisallowed", &self.removal_disallowed)?;
        writer.field_omit_empty("PayloadScope", &self.scope)?;
        writer.date_omit_empty("PayloadDate", self.date);
        writer.field_omit_empty("DurationUntilRemoval", &self.duration_until_removal)?;
        writer.field_omit_empty("ConsentText", &self.consent_text)?;
        writer.data_omit_empty("EncryptedPayloadContent", &self.encrypted_payload_content);
        writer.field_omit_empty("HasRemovalPasscode", &self.has_removal_passcode)?;
        writer.field_omit_empty("IsEncrypted", &self.is_encrypted)?;
        writer.date_omit_empty("RemovalDate", self.removal_date);
        writer.field_omit_empty("TargetDeviceType", &self.target_device_type)?;
        Ok(writer.finish())
    }
}
