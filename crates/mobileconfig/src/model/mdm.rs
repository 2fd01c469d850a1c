//! MDM enrollment payload.

use crate::model::Payload;
use crate::model::payload::MDM_PAYLOAD_TYPE;

/// MDM enrollment (`com.apple.mdm`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MdmPayload {
    pub payload: Payload,
    /// `PayloadUUID` of the identity certificate payload in the same profile.
    pub identity_certificate_uuid: String,
    /// APNs push topic.
    pub topic: String,
    pub server_url: String,
    pub server_capabilities: Vec<String>,
    pub sign_message: bool,
    pub check_in_url: String,
    pub check_out_when_removed: bool,
    /// Bit mask of granted MDM rights.
    pub access_rights: i64,
    pub use_development_apns: bool,
    pub server_url_pinning_certificate_uuids: Vec<String>,
    pub check_in_url_pinning_certificate_uuids: Vec<String>,
    pub pinning_revocation_check_required: bool,
}

impl MdmPayload {
    /// Creates an MDM payload with identifier `identifier`.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            payload: Payload::new(MDM_PAYLOAD_TYPE, identifier),
            ..Default::default()
        }
    }
}
