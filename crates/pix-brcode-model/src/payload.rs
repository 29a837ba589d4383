// SPDX-License-Identifier: Apache-2.0

//! Merchant-presented (static) PIX payload builder and verifier.
//!
//! Field order is the wire contract: the checksum spans the full
//! concatenation and some consumers parse positionally, so the sequence in
//! [`assemble`] must not be reordered.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::crc::crc16_hex;
use crate::merchant::{MerchantConfig, MERCHANT_CITY_MAX_LEN, MERCHANT_NAME_MAX_LEN};
use crate::tlv::{
    code_unit_len, encode_field, truncate_code_units, SUB_TAG_GUI, SUB_TAG_PIX_KEY, SUB_TAG_TXID,
    TAG_ADDITIONAL_DATA, TAG_AMOUNT, TAG_COUNTRY, TAG_CURRENCY, TAG_MERCHANT_ACCOUNT,
    TAG_MERCHANT_CATEGORY, TAG_MERCHANT_CITY, TAG_MERCHANT_NAME, TAG_PAYLOAD_FORMAT,
    VALUE_MAX_LEN,
};

/// Globally unique identifier of the PIX arrangement, sub-field `00` of the
/// merchant account information template.
pub const PIX_GUI: &str = "br.gov.bcb.pix";

/// Every payload opens with field `00`, length `02`, value `"01"`.
pub const PAYLOAD_PREFIX: &str = "000201";

/// Field `63` header: the CRC value is always exactly 4 characters, so the
/// tag and length are constant and are checksummed along with the body.
pub const CRC_FIELD_PREFIX: &str = "6304";

const PAYLOAD_FORMAT_VERSION: &str = "01";
const MERCHANT_CATEGORY_UNSPECIFIED: &str = "0000";
const CURRENCY_BRL: &str = "986";
const COUNTRY_BR: &str = "BR";
const CRC_LEN: usize = 4;

/// The key is wrapped twice: once as sub-field `01` and again inside the
/// outer `26` template together with the 18-unit GUI sub-field, so the outer
/// length cap of 99 leaves 77 units for the key itself.
pub const PIX_KEY_MAX_LEN: usize = VALUE_MAX_LEN - 4 - (4 + PIX_GUI.len());

/// Sub-field `05` adds a 4-unit header inside the outer `62` template.
pub const TXID_MAX_LEN: usize = VALUE_MAX_LEN - 4;

/// One charge to render as a static QR payload.
///
/// `None` name/city/txid fall back to the injected [`MerchantConfig`];
/// a `None` or zero amount omits the amount field entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChargeRequest {
    pub pix_key: String,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub merchant_city: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub txid: Option<String>,
}

impl ChargeRequest {
    #[must_use]
    pub fn new(pix_key: &str) -> Self {
        Self {
            pix_key: pix_key.to_string(),
            merchant_name: None,
            merchant_city: None,
            amount: None,
            txid: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BuildError {
    InvalidKey,
    ValueTooLong { field: &'static str, len: usize },
    NegativeAmount(f64),
    UnrepresentableAmount(f64),
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey => f.write_str("pix key must not be empty or blank"),
            Self::ValueTooLong { field, len } => {
                write!(f, "{field} is {len} code units and cannot be length-encoded")
            }
            Self::NegativeAmount(amount) => {
                write!(f, "amount {amount} is negative")
            }
            Self::UnrepresentableAmount(amount) => {
                write!(f, "amount {amount} cannot be rendered as a decimal value field")
            }
        }
    }
}

impl std::error::Error for BuildError {}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VerifyError {
    NotAscii,
    TooShort(usize),
    BadPrefix,
    MalformedChecksum,
    ChecksumMismatch { expected: String, found: String },
}

impl Display for VerifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAscii => f.write_str("payload must be ASCII"),
            Self::TooShort(len) => write!(f, "payload of {len} characters is too short"),
            Self::BadPrefix => {
                write!(f, "payload must start with the format indicator {PAYLOAD_PREFIX}")
            }
            Self::MalformedChecksum => {
                f.write_str("payload must end with the 6304 field and 4 uppercase hex digits")
            }
            Self::ChecksumMismatch { expected, found } => {
                write!(f, "checksum mismatch: expected {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for VerifyError {}

/// Build a payload, rejecting inputs the wire format cannot carry.
///
/// # Errors
///
/// [`BuildError::InvalidKey`] for an empty or whitespace-only key,
/// [`BuildError::ValueTooLong`] when the key, txid, or rendered amount
/// exceeds its template budget, [`BuildError::NegativeAmount`] for a
/// negative amount, and [`BuildError::UnrepresentableAmount`] for a
/// positive infinity the decimal rendering cannot express.
pub fn build_payload(
    request: &ChargeRequest,
    config: &MerchantConfig,
) -> Result<String, BuildError> {
    if request.pix_key.trim().is_empty() {
        return Err(BuildError::InvalidKey);
    }
    let key_len = code_unit_len(&request.pix_key);
    if key_len > PIX_KEY_MAX_LEN {
        return Err(BuildError::ValueTooLong { field: "pix_key", len: key_len });
    }
    let txid = resolve(request.txid.as_deref(), &config.txid);
    let txid_len = code_unit_len(txid);
    if txid_len > TXID_MAX_LEN {
        return Err(BuildError::ValueTooLong { field: "txid", len: txid_len });
    }
    if let Some(amount) = request.amount {
        if amount < 0.0 {
            return Err(BuildError::NegativeAmount(amount));
        }
        if amount > 0.0 {
            if amount.is_infinite() {
                return Err(BuildError::UnrepresentableAmount(amount));
            }
            let len = format!("{amount:.2}").len();
            if len > VALUE_MAX_LEN {
                return Err(BuildError::ValueTooLong { field: "amount", len });
            }
        }
    }
    let name = truncate_code_units(
        resolve(request.merchant_name.as_deref(), &config.merchant_name),
        MERCHANT_NAME_MAX_LEN,
    );
    let city = truncate_code_units(
        resolve(request.merchant_city.as_deref(), &config.merchant_city),
        MERCHANT_CITY_MAX_LEN,
    );
    Ok(assemble(&request.pix_key, &name, &city, txid, request.amount))
}

/// Build a payload the way the legacy generator did: no validation, total
/// over any request.
///
/// An empty key yields a structurally valid but semantically useless payload;
/// a negative amount is treated as "no amount". The divergences from the
/// legacy generator are confined to inputs it corrupted: over-long keys and
/// txids are truncated to their template budget, and amounts whose rendering
/// the 2-digit length cannot carry are omitted like "no amount".
#[must_use]
pub fn build_payload_lenient(request: &ChargeRequest, config: &MerchantConfig) -> String {
    let key = truncate_code_units(&request.pix_key, PIX_KEY_MAX_LEN);
    let txid = truncate_code_units(
        resolve(request.txid.as_deref(), &config.txid),
        TXID_MAX_LEN,
    );
    let name = truncate_code_units(
        resolve(request.merchant_name.as_deref(), &config.merchant_name),
        MERCHANT_NAME_MAX_LEN,
    );
    let city = truncate_code_units(
        resolve(request.merchant_city.as_deref(), &config.merchant_city),
        MERCHANT_CITY_MAX_LEN,
    );
    assemble(&key, &name, &city, &txid, request.amount)
}

/// Structural check of an existing payload: framing prefix, crc field
/// header, and a tail that matches the recomputed checksum.
///
/// # Errors
///
/// A [`VerifyError`] naming the first violated framing rule.
pub fn verify_payload(payload: &str) -> Result<(), VerifyError> {
    if !payload.is_ascii() {
        return Err(VerifyError::NotAscii);
    }
    let min_len = PAYLOAD_PREFIX.len() + CRC_FIELD_PREFIX.len() + CRC_LEN;
    if payload.len() < min_len {
        return Err(VerifyError::TooShort(payload.len()));
    }
    if !payload.starts_with(PAYLOAD_PREFIX) {
        return Err(VerifyError::BadPrefix);
    }
    let (body, tail) = payload.split_at(payload.len() - CRC_LEN);
    let tail_is_hex = tail
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b));
    if !tail_is_hex || !body.ends_with(CRC_FIELD_PREFIX) {
        return Err(VerifyError::MalformedChecksum);
    }
    let expected = crc16_hex(body);
    if expected != tail {
        return Err(VerifyError::ChecksumMismatch {
            expected,
            found: tail.to_string(),
        });
    }
    Ok(())
}

fn resolve<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

/// Zero and NaN both fail the `> 0.0` comparison, so they omit the field
/// exactly like an absent amount. Renderings the 2-digit length cannot
/// carry (infinities, amounts over 99 digits) are dropped the same way;
/// the strict builder rejects those before getting here.
fn amount_value(amount: Option<f64>) -> Option<String> {
    match amount {
        Some(a) if a > 0.0 && a.is_finite() => {
            let value = format!("{a:.2}");
            (value.len() <= VALUE_MAX_LEN).then_some(value)
        }
        _ => None,
    }
}

fn assemble(key: &str, name: &str, city: &str, txid: &str, amount: Option<f64>) -> String {
    let account = format!(
        "{}{}",
        encode_field(SUB_TAG_GUI, PIX_GUI),
        encode_field(SUB_TAG_PIX_KEY, key)
    );
    let mut payload = String::with_capacity(160);
    payload.push_str(&encode_field(TAG_PAYLOAD_FORMAT, PAYLOAD_FORMAT_VERSION));
    payload.push_str(&encode_field(TAG_MERCHANT_ACCOUNT, &account));
    payload.push_str(&encode_field(TAG_MERCHANT_CATEGORY, MERCHANT_CATEGORY_UNSPECIFIED));
    payload.push_str(&encode_field(TAG_CURRENCY, CURRENCY_BRL));
    if let Some(value) = amount_value(amount) {
        payload.push_str(&encode_field(TAG_AMOUNT, &value));
    }
    payload.push_str(&encode_field(TAG_COUNTRY, COUNTRY_BR));
    payload.push_str(&encode_field(TAG_MERCHANT_NAME, name));
    payload.push_str(&encode_field(TAG_MERCHANT_CITY, city));
    payload.push_str(&encode_field(
        TAG_ADDITIONAL_DATA,
        &encode_field(SUB_TAG_TXID, txid),
    ));
    payload.push_str(CRC_FIELD_PREFIX);
    let crc = crc16_hex(&payload);
    payload.push_str(&crc);
    payload
}
