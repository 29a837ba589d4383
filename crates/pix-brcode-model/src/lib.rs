#![forbid(unsafe_code)]
//! Static PIX BR Code payload model.
//!
//! Pure, synchronous string transforms with no I/O and no shared state:
//! TLV field framing, the CRC-16/CCITT-FALSE checksum, and the
//! merchant-presented payload builder and verifier. Safe to call from any
//! number of threads without coordination.

mod crc;
mod merchant;
mod payload;
mod tlv;

pub use crc::{crc16_ccitt_false, crc16_hex};
pub use merchant::{
    MerchantConfig, DEFAULT_MERCHANT_CITY, DEFAULT_MERCHANT_NAME, DEFAULT_TXID,
    MERCHANT_CITY_MAX_LEN, MERCHANT_NAME_MAX_LEN,
};
pub use payload::{
    build_payload, build_payload_lenient, verify_payload, BuildError, ChargeRequest, VerifyError,
    CRC_FIELD_PREFIX, PAYLOAD_PREFIX, PIX_GUI, PIX_KEY_MAX_LEN, TXID_MAX_LEN,
};
pub use tlv::{code_unit_len, encode_field, truncate_code_units, VALUE_MAX_LEN};

pub const CRATE_NAME: &str = "pix-brcode-model";
