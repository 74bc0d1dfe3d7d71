use alloy::primitives::{hex, Address, Signature};

/// Verify an EIP-191 personal-message signature against an address.
/// Malformed signatures or addresses verify as `false`.
pub fn verify_signature(message: &str, signature: &str, address: &str) -> bool {
    let Ok(expected) = address.parse::<Address>() else {
        return false;
    };
    let Ok(bytes) = hex::decode(signature) else {
        return false;
    };
    let Ok(sig) = Signature::try_from(bytes.as_slice()) else {
        return false;
    };

    match sig.recover_address_from_msg(message) {
        Ok(recovered) => recovered == expected,
        Err(e) => {
            tracing::debug!(error = %e, "Signature recovery failed");
            false
        }
    }
}

/// 32 random bytes as a `0x`-prefixed hex string, for sign-in challenges.
pub fn generate_nonce() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode_prefixed(bytes)
}
