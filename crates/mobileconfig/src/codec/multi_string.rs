//! Single-or-list string encoding.
//!
//! Decoding tries the bare-string shape first and the array shape second.
//! Both attempts read the same borrowed node, so the failed first attempt
//! cannot disturb the second.

use plist::Value;

use crate::codec::primitives::{Decode, Encode, Reader};
use crate::error::{DecodeError, EncodeError};
use crate::model::MultiString;

impl Decode for MultiString {
    const TYPE_NAME: &'static str = "MultiString";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        if let Ok(single) = reader.decode::<String>() {
            return Ok(MultiString::one(single));
        }

        match reader.decode::<Vec<String>>() {
            Ok(many) => Ok(MultiString::from(many)),
            // Report the field's own type, not the last shape probed.
            Err(err) => Err(err.retarget(Self::TYPE_NAME)),
        }
    }
}

impl Encode for MultiString {
    fn encode(&self) -> Result<Value, EncodeError> {
        match self.as_slice() {
            [] => Err(EncodeError::EmptyValue {
                type_name: <Self as Decode>::TYPE_NAME,
            }),
            [single] => Ok(Value::String(single.clone())),
            many => Ok(Value::Array(
                many.iter().cloned().map(Value::String).collect(),
            )),
        }
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}
