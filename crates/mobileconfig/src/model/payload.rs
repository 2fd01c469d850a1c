//! Payload common fields and the discriminated payload union.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::model::id::new_payload_uuid;
use crate::model::{AcmeCertificatePayload, CertificatePkcs1Payload, MdmPayload, ScepPayload};

/// Version written into newly constructed payloads.
pub const DEFAULT_PAYLOAD_VERSION: i64 = 1;

/// `PayloadType` of a PKCS#1 certificate payload.
pub const PKCS1_PAYLOAD_TYPE: &str = "com.apple.security.pkcs1";
/// `PayloadType` of an MDM enrollment payload.
pub const MDM_PAYLOAD_TYPE: &str = "com.apple.mdm";
/// `PayloadType` of a SCEP enrollment payload.
pub const SCEP_PAYLOAD_TYPE: &str = "com.apple.security.scep";
/// `PayloadType` of an ACME certificate payload.
pub const ACME_PAYLOAD_TYPE: &str = "com.apple.security.acme";

/// Discriminators with a dedicated payload shape.
///
/// Any `PayloadType` not listed here decodes as [`PayloadValue::Unknown`].
pub const KNOWN_PAYLOAD_TYPES: &[(&str, PayloadKind)] = &[
    (PKCS1_PAYLOAD_TYPE, PayloadKind::CertificatePkcs1),
    (MDM_PAYLOAD_TYPE, PayloadKind::Mdm),
    (SCEP_PAYLOAD_TYPE, PayloadKind::Scep),
    (ACME_PAYLOAD_TYPE, PayloadKind::AcmeCertificate),
];

lazy_static! {
    static ref PAYLOAD_REGISTRY: FxHashMap<&'static str, PayloadKind> =
        KNOWN_PAYLOAD_TYPES.iter().copied().collect();
}

/// Keys shared by every payload, including the profile itself.
///
/// On its own this is the shape of a payload whose `PayloadType` has no
/// dedicated struct: only these keys are kept and the rest of the body is
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Payload {
    pub description: String,
    pub display_name: String,
    /// Reverse-DNS identifier, unique within the profile.
    pub identifier: String,
    pub organization: String,
    pub uuid: String,
    pub payload_type: String,
    pub version: i64,
}

impl Payload {
    /// Creates a payload of type `payload_type` with identifier `identifier`,
    /// a fresh UUID and version 1.
    pub fn new(payload_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            uuid: new_payload_uuid(),
            payload_type: payload_type.into(),
            version: DEFAULT_PAYLOAD_VERSION,
            ..Default::default()
        }
    }
}

/// Payload shape selected by a `PayloadType` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    CertificatePkcs1,
    Mdm,
    Scep,
    AcmeCertificate,
    /// Any discriminator without a dedicated shape.
    Unknown,
}

impl PayloadKind {
    /// Looks up the shape for a discriminator. Never fails: unrecognized
    /// strings map to [`PayloadKind::Unknown`].
    pub fn from_payload_type(payload_type: &str) -> Self {
        PAYLOAD_REGISTRY
            .get(payload_type)
            .copied()
            .unwrap_or(PayloadKind::Unknown)
    }

    /// Returns the discriminator of a known kind.
    pub fn payload_type(self) -> Option<&'static str> {
        match self {
            PayloadKind::CertificatePkcs1 => Some(PKCS1_PAYLOAD_TYPE),
            PayloadKind::Mdm => Some(MDM_PAYLOAD_TYPE),
            PayloadKind::Scep => Some(SCEP_PAYLOAD_TYPE),
            PayloadKind::AcmeCertificate => Some(ACME_PAYLOAD_TYPE),
            PayloadKind::Unknown => None,
        }
    }
}

/// One entry of a profile's `PayloadContent` array.
///
/// Decoding picks the case from the entry's `PayloadType`; see
/// [`crate::codec::payload`].
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    CertificatePkcs1(CertificatePkcs1Payload),
    Mdm(MdmPayload),
    Scep(ScepPayload),
    AcmeCertificate(AcmeCertificatePayload),
    /// Common keys of a payload whose type has no dedicated shape.
    Unknown(Payload),
}

impl PayloadValue {
    /// Returns the shape of this value.
    pub fn kind(&self) -> PayloadKind {
        match self {
            PayloadValue::CertificatePkcs1(_) => PayloadKind::CertificatePkcs1,
            PayloadValue::Mdm(_) => PayloadKind::Mdm,
            PayloadValue::Scep(_) => PayloadKind::Scep,
            PayloadValue::AcmeCertificate(_) => PayloadKind::AcmeCertificate,
            PayloadValue::Unknown(_) => PayloadKind::Unknown,
        }
    }

    /// Returns the common keys of any variant.
    pub fn common(&self) -> &Payload {
        match self {
            PayloadValue::CertificatePkcs1(p) => &p.payload,
            PayloadValue::Mdm(p) => &p.payload,
            PayloadValue::Scep(p) => &p.payload,
            PayloadValue::AcmeCertificate(p) => &p.payload,
            PayloadValue::Unknown(p) => p,
        }
    }

    /// Returns the common keys of any variant, mutably.
    pub fn common_mut(&mut self) -> &mut Payload {
        match self {
            PayloadValue::CertificatePkcs1(p) => &mut p.payload,
            PayloadValue::Mdm(p) => &mut p.payload,
            PayloadValue::Scep(p) => &mut p.payload,
            PayloadValue::AcmeCertificate(p) => &mut p.payload,
            PayloadValue::Unknown(p) => p,
        }
    }

    /// Returns the `PayloadType` discriminator.
    pub fn payload_type(&self) -> &str {
        &self.common().payload_type
    }

    /// Returns the variant as `T`, if it is one.
    pub fn downcast_ref<T: PayloadVariant>(&self) -> Option<&T> {
        T::from_payload(self)
    }

    /// Returns the variant as `T` mutably, if it is one.
    pub fn downcast_mut<T: PayloadVariant>(&mut self) -> Option<&mut T> {
        T::from_payload_mut(self)
    }
}

/// A concrete payload shape that can be pulled back out of a
/// [`PayloadValue`].
pub trait PayloadVariant: Into<PayloadValue> {
    /// Shape of the variant.
    const KIND: PayloadKind;

    fn from_payload(value: &PayloadValue) -> Option<&Self>;

    fn from_payload_mut(value: &mut PayloadValue) -> Option<&mut Self>;
}

macro_rules! payload_variant {
    ($ty:ty, $case:ident) => {
        impl PayloadVariant for $ty {
            const KIND: PayloadKind = PayloadKind::$case;

            fn from_payload(value: &PayloadValue) -> Option<&Self> {
                match value {
                    PayloadValue::$case(p) => Some(p),
                    _ => None,
                }
            }

            fn from_payload_mut(value: &mut PayloadValue) -> Option<&mut Self> {
                match value {
                    PayloadValue::$case(p) => Some(p),
                    _ => None,
                }
            }
        }

        impl From<$ty> for PayloadValue {
            fn from(payload: $ty) -> Self {
                PayloadValue::$case(payload)
            }
        }
    };
}

payload_variant!(CertificatePkcs1Payload, CertificatePkcs1);
payload_variant!(MdmPayload, Mdm);
payload_variant!(ScepPayload, Scep);
payload_variant!(AcmeCertificatePayload, AcmeCertificate);
payload_variant!(Payload, Unknown);
