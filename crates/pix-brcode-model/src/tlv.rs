// SPDX-License-Identifier: Apache-2.0

//! TLV field framing for EMV-QRCPS merchant-presented payloads.
//!
//! Every field is a fixed 2-digit tag, a 2-digit decimal length, then that
//! many characters of value. Lengths and truncation count UTF-16 code units,
//! which for the ASCII alphabet these payloads carry is the same as bytes.

/// A 2-digit decimal length cannot express more than 99 code units.
pub const VALUE_MAX_LEN: usize = 99;

pub(crate) const TAG_PAYLOAD_FORMAT: &str = "00";
pub(crate) const TAG_MERCHANT_ACCOUNT: &str = "26";
pub(crate) const TAG_MERCHANT_CATEGORY: &str = "52";
pub(crate) const TAG_CURRENCY: &str = "53";
pub(crate) const TAG_AMOUNT: &str = "54";
pub(crate) const TAG_COUNTRY: &str = "58";
pub(crate) const TAG_MERCHANT_NAME: &str = "59";
pub(crate) const TAG_MERCHANT_CITY: &str = "60";
pub(crate) const TAG_ADDITIONAL_DATA: &str = "62";

pub(crate) const SUB_TAG_GUI: &str = "00";
pub(crate) const SUB_TAG_PIX_KEY: &str = "01";
pub(crate) const SUB_TAG_TXID: &str = "05";

#[must_use]
pub fn code_unit_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Truncate to at most `max` UTF-16 code units.
#[must_use]
pub fn truncate_code_units(value: &str, max: usize) -> String {
    if code_unit_len(value) <= max {
        return value.to_string();
    }
    let units: Vec<u16> = value.encode_utf16().take(max).collect();
    String::from_utf16_lossy(&units)
}

/// Encode one tag-length-value field.
///
/// The caller keeps `value` within [`VALUE_MAX_LEN`] code units; the builder
/// enforces that before calling here.
#[must_use]
pub fn encode_field(tag: &str, value: &str) -> String {
    debug_assert!(tag.len() == 2 && tag.bytes().all(|b| b.is_ascii_digit()));
    debug_assert!(code_unit_len(value) <= VALUE_MAX_LEN);
    format!("{tag}{len:02}{value}", len = code_unit_len(value))
}
