//! 地址编码与验证
//!
//! Ethereum: EIP-55 校验和 (https://eips.ethereum.org/EIPS/eip-55)
//! Solana: Base58 编码的 32 字节 ed25519 公钥

use sha3::{Digest, Keccak256};

use crate::domain::Chain;

/// 地址验证器
pub struct AddressValidator;

impl AddressValidator {
    /// 验证地址格式
    pub fn validate(chain: Chain, address: &str) -> bool {
        match chain {
            Chain::Eth => Self::validate_evm_address(address),
            Chain::Solana => Self::validate_solana_address(address),
        }
    }

    /// 20 字节地址 → EIP-55 混合大小写字符串
    pub fn to_eip55(address: &[u8; 20]) -> String {
        let lower = hex::encode(address);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, ch) in lower.chars().enumerate() {
            if ch.is_ascii_alphabetic() && Self::hash_nibble(&hash, i) >= 8 {
                out.push(ch.to_ascii_uppercase());
            } else {
                out.push(ch);
            }
        }
        out
    }

    fn hash_nibble(hash: &[u8], i: usize) -> u8 {
        let byte = hash[i / 2];
        if i % 2 == 0 {
            byte >> 4
        } else {
            byte & 0x0f
        }
    }

    /// 验证EVM地址（全小写/全大写放行，混合大小写需满足 EIP-55）
    fn validate_evm_address(address: &str) -> bool {
        let Some(hex_part) = address.strip_prefix("0x") else {
            return false;
        };
        if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return false;
        }

        let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
        if !(has_upper && has_lower) {
            return true;
        }

        Self::verify_eip55_checksum(hex_part)
    }

    fn verify_eip55_checksum(hex_part: &str) -> bool {
        let hash = Keccak256::digest(hex_part.to_ascii_lowercase().as_bytes());
        hex_part.chars().enumerate().all(|(i, ch)| {
            !ch.is_ascii_alphabetic() || ch.is_ascii_uppercase() == (Self::hash_nibble(&hash, i) >= 8)
        })
    }

    /// 验证Solana地址（Base58编码，32字节）
    fn validate_solana_address(address: &str) -> bool {
        if address.len() < 32 || address.len() > 44 {
            return false;
        }

        match bs58::decode(address).into_vec() {
            Ok(decoded) => decoded.len() == 32,
            Err(_) => false,
        }
    }
}
