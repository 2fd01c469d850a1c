//! Decode and encode contracts over the property-list value tree.
//!
//! The `plist` crate turns bytes into a [`Value`] tree and back. This module
//! layers two traits on top of it:
//!
//! - [`Decode`]: materialize a borrowed node as a typed value. Decoding only
//!   reads the node through a [`Reader`], so a failed attempt leaves nothing
//!   behind and the same node can be probed again as a different type.
//! - [`Encode`]: turn a typed value into a fresh node.
//!
//! Records are decoded through [`DictReader`] and encoded through
//! [`DictWriter`], which attach the dictionary key to any error raised below
//! it.

use std::collections::BTreeMap;
use std::time::SystemTime;

use plist::{Date, Dictionary, Value};

use crate::error::{DecodeError, EncodeError};

// =============================================================================
// DECODING
// =============================================================================

/// A type that can be decoded from a property-list node.
pub trait Decode: Sized {
    /// Type name reported in type-mismatch errors.
    const TYPE_NAME: &'static str;

    /// Decodes `Self` from the node behind `reader`.
    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError>;
}

/// Read handle on a borrowed property-list node.
///
/// `Reader` is `Copy`: probing a node as one type and then another never
/// advances or mutates anything.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    value: &'a Value,
}

impl<'a> Reader<'a> {
    /// Creates a reader over `value`.
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Returns the underlying node.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Decodes the node as `T`.
    #[inline]
    pub fn decode<T: Decode>(self) -> Result<T, DecodeError> {
        T::decode(self)
    }

    /// Builds a type-mismatch error for this node.
    pub fn mismatch(self, target: &'static str) -> DecodeError {
        DecodeError::UnexpectedType {
            found: describe(self.value),
            target,
        }
    }

    /// Opens the node as a dictionary. `target` names the record being
    /// decoded, for the error raised when the node is not a dictionary.
    pub fn dictionary(self, target: &'static str) -> Result<DictReader<'a>, DecodeError> {
        match self.value {
            Value::Dictionary(dict) => Ok(DictReader { dict }),
            _ => Err(self.mismatch(target)),
        }
    }

    /// Reads the node as a `data` blob.
    pub fn data(self) -> Result<&'a [u8], DecodeError> {
        match self.value {
            Value::Data(bytes) => Ok(bytes),
            _ => Err(self.mismatch("data")),
        }
    }

    /// Reads the node as a `date`.
    pub fn date(self) -> Result<SystemTime, DecodeError> {
        match self.value {
            Value::Date(date) => Ok(SystemTime::from(*date)),
            _ => Err(self.mismatch("date")),
        }
    }
}

/// Keyed access to a dictionary node.
///
/// Keys the record does not ask for are ignored.
#[derive(Debug, Clone, Copy)]
pub struct DictReader<'a> {
    dict: &'a Dictionary,
}

impl<'a> DictReader<'a> {
    /// Decodes `key` as `T`, falling back to `T::default()` when absent.
    pub fn field<T: Decode + Default>(&self, key: &str) -> Result<T, DecodeError> {
        Ok(self.optional(key)?.unwrap_or_default())
    }

    /// Decodes `key` as `T`, failing when absent.
    pub fn required<T: Decode>(&self, key: &'static str) -> Result<T, DecodeError> {
        self.optional(key)?
            .ok_or(DecodeError::MissingField { field: key })
    }

    /// Decodes `key` as `T` when present.
    pub fn optional<T: Decode>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        self.with_key(key, Reader::decode)
    }

    /// Reads `key` as a `data` blob; absent keys read as empty.
    pub fn data(&self, key: &str) -> Result<Vec<u8>, DecodeError> {
        Ok(self
            .with_key(key, |reader| reader.data().map(<[u8]>::to_vec))?
            .unwrap_or_default())
    }

    /// Reads `key` as a `date` when present.
    pub fn date(&self, key: &str) -> Result<Option<SystemTime>, DecodeError> {
        self.with_key(key, Reader::date)
    }

    fn with_key<T>(
        &self,
        key: &str,
        decode: impl FnOnce(Reader<'a>) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        match self.dict.get(key) {
            Some(value) => decode(Reader::new(value))
                .map(Some)
                .map_err(|err| err.in_field(key)),
            None => Ok(None),
        }
    }
}

/// Short human-readable description of a node for error messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("string {s:?}"),
        Value::Integer(int) => match (int.as_signed(), int.as_unsigned()) {
            (Some(v), _) => format!("integer {v}"),
            (None, Some(v)) => format!("integer {v}"),
            (None, None) => "integer".to_string(),
        },
        Value::Real(r) => format!("real {r}"),
        Value::Boolean(b) => format!("boolean {b}"),
        Value::Data(bytes) => format!("data ({} bytes)", bytes.len()),
        Value::Date(_) => "date".to_string(),
        Value::Array(items) => format!("array ({} items)", items.len()),
        Value::Dictionary(_) => "dictionary".to_string(),
        _ => "value".to_string(),
    }
}

impl Decode for String {
    const TYPE_NAME: &'static str = "string";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        match reader.value() {
            Value::String(s) => Ok(s.clone()),
            _ => Err(reader.mismatch(Self::TYPE_NAME)),
        }
    }
}

impl Decode for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        match reader.value() {
            Value::Integer(int) => match (int.as_signed(), int.as_unsigned()) {
                (Some(v), _) => Ok(v),
                (None, Some(value)) => Err(DecodeError::IntegerOutOfRange { value }),
                (None, None) => Err(reader.mismatch(Self::TYPE_NAME)),
            },
            _ => Err(reader.mismatch(Self::TYPE_NAME)),
        }
    }
}

impl Decode for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        match reader.value() {
            Value::Boolean(b) => Ok(*b),
            _ => Err(reader.mismatch(Self::TYPE_NAME)),
        }
    }
}

impl Decode for f32 {
    const TYPE_NAME: &'static str = "real";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        match reader.value() {
            Value::Real(r) => Ok(*r as f32),
            // Hand-written profiles often use <integer> for whole numbers.
            Value::Integer(int) => int
                .as_signed()
                .map(|v| v as f32)
                .ok_or_else(|| reader.mismatch(Self::TYPE_NAME)),
            _ => Err(reader.mismatch(Self::TYPE_NAME)),
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    const TYPE_NAME: &'static str = "array";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        match reader.value() {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    Reader::new(item)
                        .decode()
                        .map_err(|err| err.in_field(format!("[{i}]")))
                })
                .collect(),
            _ => Err(reader.mismatch(Self::TYPE_NAME)),
        }
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    const TYPE_NAME: &'static str = "dictionary";

    fn decode(reader: Reader<'_>) -> Result<Self, DecodeError> {
        match reader.value() {
            Value::Dictionary(dict) => dict
                .iter()
                .map(|(key, value)| {
                    Reader::new(value)
                        .decode()
                        .map(|v| (key.clone(), v))
                        .map_err(|err| err.in_field(key.as_str()))
                })
                .collect(),
            _ => Err(reader.mismatch(Self::TYPE_NAME)),
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// A type that can be encoded into a property-list node.
pub trait Encode {
    /// Encodes `self` into a fresh node.
    fn encode(&self) -> Result<Value, EncodeError>;

    /// Returns true if the value is skipped by omit-if-empty fields.
    fn is_empty_value(&self) -> bool {
        false
    }
}

/// Builds a dictionary node with keys in insertion order.
#[derive(Debug)]
pub struct DictWriter {
    dict: Dictionary,
}

impl Default for DictWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DictWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self {
            dict: Dictionary::new(),
        }
    }

    /// Writes `key`, whatever its value.
    pub fn field<T: Encode + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), EncodeError> {
        let encoded = value.encode().map_err(|err| err.in_field(key))?;
        self.dict.insert(key.to_string(), encoded);
        Ok(())
    }

    /// Writes `key` unless `value` is empty.
    pub fn field_omit_empty<T: Encode + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), EncodeError> {
        if value.is_empty_value() {
            return Ok(());
        }
        self.field(key, value)
    }

    /// Writes `key` if `value` is set.
    pub fn optional<T: Encode>(&mut self, key: &str, value: &Option<T>) -> Result<(), EncodeError> {
        match value {
            Some(v) => self.field(key, v),
            None => Ok(()),
        }
    }

    /// Writes `key` as a `data` blob.
    pub fn data(&mut self, key: &str, bytes: &[u8]) {
        self.dict.insert(key.to_string(), Value::Data(bytes.to_vec()));
    }

    /// Writes `key` as a `data` blob unless it is empty.
    pub fn data_omit_empty(&mut self, key: &str, bytes: &[u8]) {
        if !bytes.is_empty() {
            self.data(key, bytes);
        }
    }

    /// Writes `key` as a `date` if set.
    pub fn date_omit_empty(&mut self, key: &str, date: Option<SystemTime>) {
        if let Some(date) = date {
            self.dict.insert(key.to_string(), Value::Date(Date::from(date)));
        }
    }

    /// Returns the finished dictionary node.
    pub fn finish(self) -> Value {
        Value::Dictionary(self.dict)
    }
}

impl Encode for str {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::String(self.to_string()))
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Encode for String {
    fn encode(&self) -> Result<Value, EncodeError> {
        self.as_str().encode()
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Encode for i64 {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Integer((*self).into()))
    }

    fn is_empty_value(&self) -> bool {
        *self == 0
    }
}

impl Encode for bool {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Boolean(*self))
    }

    fn is_empty_value(&self) -> bool {
        !*self
    }
}

impl Encode for f32 {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Real(f64::from(*self)))
    }

    fn is_empty_value(&self) -> bool {
        *self == 0.0
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self) -> Result<Value, EncodeError> {
        self.iter()
            .enumerate()
            .map(|(i, item)| item.encode().map_err(|err| err.in_field(format!("[{i}]"))))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Encode> Encode for BTreeMap<String, T> {
    fn encode(&self) -> Result<Value, EncodeError> {
        let mut writer = DictWriter::new();
        for (key, value) in self {
            writer.field(key, value)?;
        }
        Ok(writer.finish())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(entries: Vec<(&str, Value)>) -> Value {
        let mut dict = Dictionary::new();
        for (key, value) in entries {
            dict.insert(key.to_string(), value);
        }
        Value::Dictionary(dict)
    }

    #[test]
    fn test_failed_probe_leaves_reader_usable() {
        let value = Value::Array(vec![
            Value::String("a".to_string()),
            Value::String("b".to_string()),
        ]);
        let reader = Reader::new(&value);

        assert!(reader.decode::<String>().is_err());
        let items: Vec<String> = reader.decode().unwrap();
        assert_eq!(items, vec!["a", "b"]);
        assert!(std::ptr::eq(reader.value(), &value));
    }

    #[test]
    fn test_integer_mismatch_message() {
        let value = Value::Integer(42i64.into());
        let err = Reader::new(&value).decode::<String>().unwrap_err();
        assert_eq!(err.to_string(), "cannot decode integer 42 into value of type string");
    }

    #[test]
    fn test_unsigned_integer_out_of_range() {
        let value = Value::Integer(u64::MAX.into());
        let err = Reader::new(&value).decode::<i64>().unwrap_err();
        assert_eq!(err, DecodeError::IntegerOutOfRange { value: u64::MAX });
    }

    #[test]
    fn test_real_accepts_integer() {
        let value = Value::Integer(3i64.into());
        assert_eq!(Reader::new(&value).decode::<f32>().unwrap(), 3.0);
    }

    #[test]
    fn test_array_element_error_has_index() {
        let value = Value::Array(vec![
            Value::String("ok".to_string()),
            Value::Boolean(true),
        ]);
        let err = Reader::new(&value).decode::<Vec<String>>().unwrap_err();
        assert_eq!(err.path(), Some("[1]"));
        assert!(matches!(
            err.without_context(),
            DecodeError::UnexpectedType { target: "string", .. }
        ));
    }

    #[test]
    fn test_dict_reader_field_semantics() {
        let value = dict(vec![
            ("Name", Value::String("vpn".to_string())),
            ("Retries", Value::Integer(3i64.into())),
        ]);
        let reader = Reader::new(&value).dictionary("Test").unwrap();

        assert_eq!(reader.field::<String>("Name").unwrap(), "vpn");
        assert_eq!(reader.field::<i64>("Missing").unwrap(), 0);
        assert_eq!(reader.optional::<i64>("Retries").unwrap(), Some(3));
        assert_eq!(reader.optional::<bool>("Missing").unwrap(), None);
        assert_eq!(
            reader.required::<String>("URL").unwrap_err(),
            DecodeError::MissingField { field: "URL" }
        );
        assert!(reader.data("Missing").unwrap().is_empty());
        assert!(reader.date("Missing").unwrap().is_none());
    }

    #[test]
    fn test_dict_reader_tags_key() {
        let value = dict(vec![("Retries", Value::String("three".to_string()))]);
        let reader = Reader::new(&value).dictionary("Test").unwrap();
        let err = reader.field::<i64>("Retries").unwrap_err();
        assert_eq!(err.path(), Some("Retries"));
    }

    #[test]
    fn test_dictionary_mismatch_names_record() {
        let value = Value::String("nope".to_string());
        let err = Reader::new(&value).dictionary("ScepPayloadContent").unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedType {
                found: "string \"nope\"".to_string(),
                target: "ScepPayloadContent",
            }
        );
    }

    #[test]
    fn test_dict_writer_omits_empty_values() {
        let mut writer = DictWriter::new();
        writer.field("Required", "").unwrap();
        writer.field_omit_empty("Name", "").unwrap();
        writer.field_omit_empty("Retries", &0i64).unwrap();
        writer.field_omit_empty("Flag", &false).unwrap();
        writer.optional::<bool>("KeyIsExtractable", &None).unwrap();
        writer.optional("Explicit", &Some(false)).unwrap();
        writer.data_omit_empty("Blob", &[]);
        writer.date_omit_empty("When", None);

        let value = writer.finish();
        let dict = value.as_dictionary().unwrap();
        let keys: Vec<&str> = dict.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Required", "Explicit"]);
    }

    #[test]
    fn test_dict_writer_preserves_insertion_order() {
        let mut writer = DictWriter::new();
        writer.field("Zeta", &1i64).unwrap();
        writer.field("Alpha", &2i64).unwrap();
        writer.data("Mid", &[1, 2, 3]);

        let value = writer.finish();
        let keys: Vec<&str> = value
            .as_dictionary()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_btreemap_roundtrip() {
        let mut map = BTreeMap::new();
        map.insert("default".to_string(), "Install me".to_string());
        map.insert("de".to_string(), "Installier mich".to_string());

        let encoded = map.encode().unwrap();
        let decoded: BTreeMap<String, String> = Reader::new(&encoded).decode().unwrap();
        assert_eq!(decoded, map);
    }
}
