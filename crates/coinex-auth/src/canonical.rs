//! Canonical JSON encoding of request bodies
//!
//! The body string is part of the signature, so the bytes that are signed and
//! the bytes that are sent must be identical. Bodies are encoded in field
//! declaration order with `", "` and `": "` separators and every non-ASCII
//! character written as a `\uXXXX` escape. This is the layout CoinEx's
//! reference clients produce, which keeps signatures reproducible across
//! implementations.

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

use crate::error::{AuthError, AuthResult};

/// `serde_json` formatter producing the canonical body layout
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Serialize a value into its canonical JSON string
pub fn to_canonical_json<T>(value: &T) -> AuthResult<String>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, CanonicalFormatter);
    value
        .serialize(&mut ser)
        .map_err(|e| AuthError::Serialization(e.to_string()))?;

    // Every non-ASCII char was escaped above
    String::from_utf8(buf).map_err(|e| AuthError::Serialization(e.to_string()))
}

/// Serialize a request body, returning `None` when it carries no fields
///
/// An empty body contributes an empty string to the signature and is not
/// sent at all.
pub fn canonical_body<T>(value: &T) -> AuthResult<Option<String>>
where
    T: Serialize + ?Sized,
{
    let json = to_canonical_json(value)?;
    match json.as_str() {
        "{}" | "null" => Ok(None),
        _ => Ok(Some(json)),
    }
}
