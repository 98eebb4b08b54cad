use std::fmt::Write;

use anyhow::{bail, Result};

use crate::emit::CppWriter;
use crate::status::Status;

pub const KEY_LEN: usize = 32;

/// Embeds the AES-256 key used to encrypt exported scripts.
pub struct EncryptionKeyGenerator {
    key: Option<String>,
    key_env: String,
}

impl EncryptionKeyGenerator {
    /// `key` is the value of the `key_env` environment variable, if set.
    pub fn new(key: Option<String>, key_env: impl Into<String>) -> Self {
        Self {
            key,
            key_env: key_env.into(),
        }
    }
}

impl super::Generator for EncryptionKeyGenerator {
    fn name(&self) -> &'static str {
        "encryption-key"
    }

    fn generate(&self, out: &mut CppWriter, status: &Status) -> Result<()> {
        let key = match self.key.as_deref().filter(|k| !k.is_empty()) {
            Some(src) => parse_key(src, &self.key_env)?,
            None => {
                status.detail(format!("{} not set, using an all-zero key", self.key_env));
                [0; KEY_LEN]
            }
        };

        let bytes = out.bytes(&key, 1);
        writeln!(
            out,
            "#include \"core/config/project_settings.h\"\n\nuint8_t script_encryption_key[{KEY_LEN}] = {{\n\t{bytes}\n}};"
        )?;
        Ok(())
    }
}

/// Decode exactly 64 hexadecimal characters into a key.
pub fn parse_key(src: &str, key_env: &str) -> Result<[u8; KEY_LEN]> {
    if src.len() != KEY_LEN * 2 || !src.bytes().all(|b| b.is_ascii_hexdigit()) {
        bail!(
            "Invalid AES256 encryption key, not {} hexadecimal characters: \"{}\".\n\
             Unset `{}` in your environment or make sure that it contains exactly {} hexadecimal characters.",
            KEY_LEN * 2,
            src,
            key_env,
            KEY_LEN * 2
        );
    }

    let mut key = [0u8; KEY_LEN];
    for (byte, pair) in key.iter_mut().zip(src.as_bytes().chunks(2)) {
        *byte = (hex_value(pair[0]) << 4) | hex_value(pair[1]);
    }
    Ok(key)
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::render;

    const ENV: &str = "SCRIPT_AES256_ENCRYPTION_KEY";

    #[test]
    fn test_parse_key() {
        let src = format!("00ff10Ab{}", "0".repeat(56));
        let key = parse_key(&src, ENV).unwrap();
        assert_eq!(&key[..4], &[0x00, 0xff, 0x10, 0xab]);
        assert!(key[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = parse_key("abcd", ENV).unwrap_err();
        assert!(err.to_string().contains("not 64 hexadecimal characters"));
        assert!(err.to_string().contains(ENV));
    }

    #[test]
    fn test_rejects_non_hex() {
        let src = "g".repeat(64);
        assert!(parse_key(&src, ENV).is_err());
    }

    #[test]
    fn test_unset_key_is_zeroed() {
        let out = render(&EncryptionKeyGenerator::new(None, ENV), "script_encryption_key.gen.cpp");
        assert!(out.contains("#include \"core/config/project_settings.h\""));
        let zeros = vec!["0"; 32].join(", ");
        assert!(out.contains(&format!("uint8_t script_encryption_key[32] = {{\n\t{zeros}\n}};")));
        assert!(!out.contains("#pragma once"));
    }

    #[test]
    fn test_empty_key_is_treated_as_unset() {
        let out = render(
            &EncryptionKeyGenerator::new(Some(String::new()), ENV),
            "script_encryption_key.gen.cpp",
        );
        assert!(out.contains("script_encryption_key[32]"));
    }
}
