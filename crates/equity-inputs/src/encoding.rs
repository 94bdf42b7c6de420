//! Wire encodings for witness arguments.
//!
//! Numeric arguments travel as 8-byte little-endian hex, byte arguments as
//! plain hex. Both encodings are what the transaction-construction service
//! expects in `raw_data` fields.

/// A resolved witness argument prior to hex encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Number(u64),
    Bytes(Vec<u8>),
}

/// Encode one resolved argument as its wire hex string.
#[must_use]
pub fn data_to_arg_string(value: &ArgValue) -> String {
    match value {
        ArgValue::Number(n) => hex::encode(n.to_le_bytes()),
        ArgValue::Bytes(bytes) => hex::encode(bytes),
    }
}

/// Hex-encode the UTF-8 bytes of a string argument.
#[must_use]
pub fn str_to_hex_char_code(s: &str) -> String {
    hex::encode(s.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_encodes_fixed_width_little_endian() {
        assert_eq!(data_to_arg_string(&ArgValue::Number(1)), "0100000000000000");
        assert_eq!(
            data_to_arg_string(&ArgValue::Number(0x1300)),
            "0013000000000000"
        );
        assert_eq!(data_to_arg_string(&ArgValue::Number(0)), "0000000000000000");
    }

    #[test]
    fn bytes_encode_straight_hex() {
        assert_eq!(
            data_to_arg_string(&ArgValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef])),
            "deadbeef"
        );
    }

    #[test]
    fn string_hex_char_codes() {
        assert_eq!(str_to_hex_char_code("abc"), "616263");
        assert_eq!(str_to_hex_char_code(""), "");
    }
}
