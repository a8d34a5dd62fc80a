//! Base64 encode/decode of selected text.

use base64::alphabet;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use std::fmt;

/// Standard alphabet that tolerates missing padding and stray trailing bits,
/// so selections copied from wrapped or truncated blocks still decode.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Heading shown above a decoded result.
pub const DECODE_RESULT_TITLE: &str = "Base64 解密结果";

#[derive(Debug)]
pub enum Base64Error {
    /// Nothing selected; carries the prompt to show.
    EmptySelection(&'static str),
    /// Selection is not valid standard Base64.
    Invalid(base64::DecodeError),
}

impl fmt::Display for Base64Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Base64Error::EmptySelection(msg) => write!(f, "{}", msg),
            Base64Error::Invalid(_) => write!(f, "解密失败: 请确保选中的文本是有效的 Base64 格式"),
        }
    }
}

impl std::error::Error for Base64Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Base64Error::Invalid(e) => Some(e),
            Base64Error::EmptySelection(_) => None,
        }
    }
}

/// Encodes the UTF-8 bytes of `selection` (standard alphabet, padded).
pub fn encode(selection: &str) -> Result<String, Base64Error> {
    if selection.is_empty() {
        return Err(Base64Error::EmptySelection("请先选择要加密的文本"));
    }
    Ok(BASE64.encode(selection.as_bytes()))
}

/// Decodes `selection` as standard Base64; invalid UTF-8 in the result is replaced.
///
/// ASCII whitespace anywhere in the selection (line wrapping, indentation) is
/// dropped first, and padding is optional.
pub fn decode(selection: &str) -> Result<String, Base64Error> {
    if selection.is_empty() {
        return Err(Base64Error::EmptySelection("请先选择要解密的文本"));
    }
    let compact: String = selection
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = LENIENT.decode(compact).map_err(Base64Error::Invalid)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_ascii_and_unicode() {
        assert_eq!(encode("hello").unwrap(), "aGVsbG8=");
        assert_eq!(encode("周报").unwrap(), "5ZGo5oql");
    }

    #[test]
    fn decode_known_values() {
        assert_eq!(decode("aGVsbG8=").unwrap(), "hello");
        assert_eq!(decode("  5ZGo5oql\n").unwrap(), "周报");
    }

    #[test]
    fn decode_wrapped_block() {
        assert_eq!(decode("aGVsbG8g\nd29ybGQ=").unwrap(), "hello world");
        assert_eq!(decode("  aGVs\r\n  bG8g\td29y\nbGQ=\n").unwrap(), "hello world");
    }

    #[test]
    fn decode_without_padding() {
        assert_eq!(decode("aGVsbG8").unwrap(), "hello");
        assert_eq!(decode("aGk").unwrap(), "hi");
    }

    #[test]
    fn encode_output_decodes_back() {
        let text = "周报 No42 ✓";
        assert_eq!(decode(&encode(text).unwrap()).unwrap(), text);
    }

    #[test]
    fn decode_invalid_input() {
        let err = decode("not base64!!").unwrap_err();
        assert!(matches!(err, Base64Error::Invalid(_)));
        assert!(err.to_string().contains("Base64"));
    }

    #[test]
    fn decode_non_utf8_is_lossy() {
        // 0xff 0xfe
        assert_eq!(decode("//4=").unwrap(), "\u{fffd}\u{fffd}");
    }

    #[test]
    fn empty_selection_rejected() {
        assert!(matches!(encode(""), Err(Base64Error::EmptySelection(_))));
        assert!(matches!(decode(""), Err(Base64Error::EmptySelection(_))));
    }
}
