//! Field-level cursors handed to extension hooks.
//!
//! [`FieldReader`] is positioned on the value of one field during decode and
//! is consumed by whichever read it performs, so a hook always advances the
//! input by exactly one value. [`FieldWriter`] appends named values to the
//! object being encoded.
//!
//! Scalar reads are lenient about quoting: a number may arrive as a numeric
//! string and a string field may carry a bare number.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Unexpected, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cursor over the value of the field whose name was just read
pub struct FieldReader<'a, A> {
    access: &'a mut A,
}

impl<'a, 'de, A> FieldReader<'a, A>
where
    A: MapAccess<'de>,
{
    pub fn new(access: &'a mut A) -> Self {
        Self { access }
    }

    /// Read the value as any deserializable type
    pub fn next_value<T>(self) -> Result<T, A::Error>
    where
        T: Deserialize<'de>,
    {
        self.access.next_value()
    }

    /// Read a number or numeric string; `null` yields `None`
    pub fn next_f64(self) -> Result<Option<f64>, A::Error> {
        self.next_value::<LenientF64>().map(|v| v.0)
    }

    /// Read an integer or integral string; `null` yields `None`
    pub fn next_i32(self) -> Result<Option<i32>, A::Error> {
        self.next_value::<LenientI32>().map(|v| v.0)
    }

    /// Read a string or bare number; `null` yields `None`
    pub fn next_string(self) -> Result<Option<String>, A::Error> {
        self.next_value::<LenientString>().map(|v| v.0)
    }

    /// Advance past the value without interpreting it
    pub fn skip_value(self) -> Result<(), A::Error> {
        self.access.next_value::<IgnoredAny>().map(|_| ())
    }
}

struct LenientF64(Option<f64>);

impl<'de> Deserialize<'de> for LenientF64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LenientF64Visitor).map(LenientF64)
    }
}

struct LenientF64Visitor;

impl<'de> Visitor<'de> for LenientF64Visitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        // Rust also parses "NaN" and "inf", which JSON numbers cannot carry
        match v.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(Some(number)),
            _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

struct LenientI32(Option<i32>);

impl<'de> Deserialize<'de> for LenientI32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LenientI32Visitor).map(LenientI32)
    }
}

struct LenientI32Visitor;

impl LenientI32Visitor {
    fn integral<E: de::Error>(&self, v: f64) -> Result<Option<i32>, E> {
        if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) {
            Ok(Some(v as i32))
        } else {
            Err(E::invalid_value(Unexpected::Float(v), self))
        }
    }
}

impl<'de> Visitor<'de> for LenientI32Visitor {
    type Value = Option<i32>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a 32-bit integer or integral string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        i32::try_from(v)
            .map(Some)
            .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i32::try_from(v)
            .map(Some)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        self.integral(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let v = v.trim();
        if let Ok(number) = v.parse::<i32>() {
            return Ok(Some(number));
        }
        match v.parse::<f64>() {
            Ok(number) => self.integral(number),
            Err(_) => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

struct LenientString(Option<String>);

impl<'de> Deserialize<'de> for LenientString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LenientStringVisitor).map(LenientString)
    }
}

struct LenientStringVisitor;

impl<'de> Visitor<'de> for LenientStringVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

/// Appends named values to the object being encoded
pub struct FieldWriter<'a, M> {
    map: &'a mut M,
}

impl<'a, M> FieldWriter<'a, M>
where
    M: SerializeMap,
{
    pub fn new(map: &'a mut M) -> Self {
        Self { map }
    }

    pub fn field<T>(&mut self, name: &str, value: &T) -> Result<&mut Self, M::Error>
    where
        T: Serialize + ?Sized,
    {
        self.map.serialize_entry(name, value)?;
        Ok(self)
    }
}
