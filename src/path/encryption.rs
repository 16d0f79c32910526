use crate::SignError;
use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

/// AES block size, which is also the IV length.
pub const IV_SIZE: usize = 16;

fn key_size_error(len: usize) -> SignError {
    SignError::InvalidArgument(format!("AES key must be 16, 24 or 32 bytes, got {}", len))
}

fn iv_size_error(len: usize) -> SignError {
    SignError::InvalidArgument(format!("IV must be {} bytes, got {}", IV_SIZE, len))
}

/// Encrypts a source URL with AES-CBC and PKCS#7 padding.
///
/// Returns `iv || ciphertext`, the payload of an `enc/` source segment.
/// The AES variant follows the key length. The IV is supplied by the
/// caller; reusing one IV for different URLs leaks shared prefixes, so
/// derive it per URL when output must be deterministic.
///
/// # Errors
/// `SignError::InvalidArgument` for a key that is not 16, 24 or 32 bytes,
/// or an IV that is not 16 bytes.
pub fn encrypt_source_url(key: &[u8], iv: &[u8], url: &str) -> Result<Vec<u8>, SignError> {
    if iv.len() != IV_SIZE {
        return Err(iv_size_error(iv.len()));
    }
    let data = url.as_bytes();
    let ciphertext = match key.len() {
        16 => cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
            .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(data)),
        24 => cbc::Encryptor::<Aes192>::new_from_slices(key, iv)
            .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(data)),
        32 => cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
            .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(data)),
        n => return Err(key_size_error(n)),
    }
    .map_err(|e| SignError::InvalidArgument(e.to_string()))?;

    let mut out = Vec::with_capacity(IV_SIZE + ciphertext.len());
    out.extend_from_slice(iv);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Reverses [`encrypt_source_url`] on an `iv || ciphertext` payload.
pub fn decrypt_source_url(key: &[u8], payload: &[u8]) -> Result<String, SignError> {
    if payload.len() < 2 * IV_SIZE || payload.len() % IV_SIZE != 0 {
        return Err(SignError::InvalidArgument(format!(
            "encrypted source has invalid length {}",
            payload.len()
        )));
    }
    let (iv, ciphertext) = payload.split_at(IV_SIZE);
    let plain = match key.len() {
        16 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
            .map(|c| c.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)),
        24 => cbc::Decryptor::<Aes192>::new_from_slices(key, iv)
            .map(|c| c.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)),
        32 => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .map(|c| c.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)),
        n => return Err(key_size_error(n)),
    }
    .map_err(|e| SignError::InvalidArgument(e.to_string()))?
    .map_err(|_| SignError::InvalidArgument("encrypted source has invalid padding".into()))?;

    String::from_utf8(plain)
        .map_err(|e| SignError::InvalidArgument(format!("decrypted source is not UTF-8: {}", e)))
}
