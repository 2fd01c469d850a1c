//! Builder API for ergonomic Profile construction.
//!
//! # Example
//!
//! ```rust
//! use mobileconfig::model::builder::ProfileBuilder;
//! use mobileconfig::{CertificatePkcs1Payload, MdmPayload};
//!
//! let profile = ProfileBuilder::new("com.example.enrollment")
//!     .display_name("Example Enrollment")
//!     .organization("Example Inc.")
//!     .scope("System")
//!     .payload(CertificatePkcs1Payload::new("com.example.enrollment.ca"))
//!     .payload_with(MdmPayload::new("com.example.enrollment.mdm"), |mdm| {
//!         mdm.topic = "com.apple.mgmt.External.example".to_string();
//!         mdm.server_url = "https://mdm.example.com/mdm".to_string();
//!         mdm.access_rights = 8191;
//!     })
//!     .build();
//!
//! assert_eq!(profile.payload_content.len(), 2);
//! assert_eq!(profile.mdm_payloads()[0].access_rights, 8191);
//! ```

use std::time::SystemTime;

use crate::model::{PayloadValue, Profile};

/// Builder for constructing a [`Profile`].
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    profile: Profile,
}

impl ProfileBuilder {
    /// Creates a builder for a profile with identifier `identifier`.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            profile: Profile::new(identifier),
        }
    }

    /// Overrides the generated `PayloadUUID`.
    pub fn uuid(mut self, uuid: impl Into<String>) -> Self {
        self.profile.payload.uuid = uuid.into();
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.profile.payload.display_name = display_name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.profile.payload.description = description.into();
        self
    }

    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.profile.payload.organization = organization.into();
        self
    }

    /// Sets `PayloadScope` (`System` or `User`).
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.profile.scope = scope.into();
        self
    }

    pub fn removal_disallowed(mut self, disallowed: bool) -> Self {
        self.profile.removal_disallowed = disallowed;
        self
    }

    pub fn expiration_date(mut self, date: SystemTime) -> Self {
        self.profile.expiration_date = Some(date);
        self
    }

    /// Adds localized consent text for `language` (use `default` for the
    /// fallback entry).
    pub fn consent_text(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.profile.consent_text.insert(language.into(), text.into());
        self
    }

    /// Appends a payload.
    pub fn payload(mut self, payload: impl Into<PayloadValue>) -> Self {
        self.profile.add_payload(payload);
        self
    }

    /// Appends a payload after letting `f` fill in its fields.
    pub fn payload_with<P, F>(mut self, mut payload: P, f: F) -> Self
    where
        P: Into<PayloadValue>,
        F: FnOnce(&mut P),
    {
        f(&mut payload);
        self.profile.add_payload(payload);
        self
    }

    /// Returns the finished profile.
    pub fn build(self) -> Profile {
        self.profile
    }
}
