// SPDX-License-Identifier: Apache-2.0

//! CRC-16/CCITT-FALSE, the checksum scanning wallets recompute over the
//! payload text (including the `"6304"` field prefix) to validate a code.

const POLY: u16 = 0x1021;
const INIT: u16 = 0xFFFF;

/// Checksum over the input, one UTF-16 code unit at a time.
///
/// The payload alphabet is ASCII, where code units and bytes coincide; the
/// function stays total over any string.
#[must_use]
pub fn crc16_ccitt_false(input: &str) -> u16 {
    let mut crc = INIT;
    for unit in input.encode_utf16() {
        crc ^= unit << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLY
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// The 4-character uppercase hex rendering embedded as the payload tail.
#[must_use]
pub fn crc16_hex(input: &str) -> String {
    format!("{:04X}", crc16_ccitt_false(input))
}

#[cfg(test)]
mod tests {
    use super::{crc16_ccitt_false, crc16_hex};

    #[test]
    fn empty_input_yields_the_initial_value() {
        assert_eq!(crc16_ccitt_false(""), 0xFFFF);
    }

    #[test]
    fn standard_check_value() {
        // The canonical CRC-16/CCITT-FALSE check vector.
        assert_eq!(crc16_ccitt_false("123456789"), 0x29B1);
    }

    #[test]
    fn crc_field_prefix_alone() {
        assert_eq!(crc16_hex("6304"), "6007");
    }

    #[test]
    fn hex_rendering_is_uppercase_and_padded() {
        assert_eq!(crc16_hex("A"), "B915");
        assert_eq!(crc16_hex("").len(), 4);
    }
}
