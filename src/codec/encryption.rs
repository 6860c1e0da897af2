//! Encryption algorithms dispatched by their on-disk tag (§4.C). Like
//! `compression`, this is a closed trait-object set, not an open registry.
//!
//! For authenticated modes (XChaCha20-Poly1305) a tag failure is a hard
//! `DecryptionFailed` and the chunk is rejected outright. For unauthenticated
//! modes (AES-CTR, XOR) a wrong password decrypts "successfully" into
//! garbage that the caller's subsequent CRC check or decompression attempt
//! will reject instead.
use aes::Aes256;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key as XChaChaKey, XChaCha20Poly1305, XNonce};
use ctr::cipher::{KeyIvInit, StreamCipher};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use crate::errors::RresError;
use crate::password;
use crate::types::EncryptionType;

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

const PBKDF2_ROUNDS: u32 = 100_000;
const PBKDF2_SALT: &[u8] = b"rres-rs/v1/key-derivation";
const AES_NONCE_LEN: usize = 16;
const XCHACHA_NONCE_LEN: usize = 24;

fn derive_key(password_bytes: &[u8]) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password_bytes, PBKDF2_SALT, PBKDF2_ROUNDS, &mut key);
    key
}

fn required_password() -> Result<password::Passphrase, RresError> {
    password::cipher_password().ok_or(RresError::NoPassword)
}

pub trait Cipher: Send + Sync {
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, RresError>;
    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, RresError>;
}

struct NoneCipher;

impl Cipher for NoneCipher {
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, RresError> {
        Ok(data.to_vec())
    }

    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, RresError> {
        Ok(data.to_vec())
    }
}

/// Legacy 128-bit XOR "encryption" (§4.C minimum conformance does not
/// require this, but the original format's tag set reserves it and it
/// costs little to support).
struct XorCipher;

impl XorCipher {
    fn apply(&self, data: &[u8]) -> Result<Vec<u8>, RresError> {
        let password = required_password()?;
        let key = derive_key(password.as_bytes());
        Ok(data
            .iter()
            .enumerate()
            .map(|(i, b)| b ^ key[i % key.len()])
            .collect())
    }
}

impl Cipher for XorCipher {
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, RresError> {
        self.apply(data)
    }

    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, RresError> {
        self.apply(data)
    }
}

/// AES-256 in CTR mode, PBKDF2-derived key, random 16-byte nonce prepended.
struct AesCtrCipher;

impl Cipher for AesCtrCipher {
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, RresError> {
        let password = required_password()?;
        let key = derive_key(password.as_bytes());

        let mut nonce = [0u8; AES_NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let mut buffer = data.to_vec();
        let mut cipher = Aes256Ctr::new_from_slices(&key, &nonce)
            .map_err(|_| RresError::DecryptionFailed)?;
        cipher.apply_keystream(&mut buffer);

        let mut out = Vec::with_capacity(AES_NONCE_LEN + buffer.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&buffer);
        Ok(out)
    }

    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, RresError> {
        if data.len() < AES_NONCE_LEN {
            return Err(RresError::DecryptionFailed);
        }
        let password = required_password()?;
        let key = derive_key(password.as_bytes());

        let (nonce, ciphertext) = data.split_at(AES_NONCE_LEN);
        let mut buffer = ciphertext.to_vec();
        let mut cipher =
            Aes256Ctr::new_from_slices(&key, nonce).map_err(|_| RresError::DecryptionFailed)?;
        cipher.apply_keystream(&mut buffer);
        Ok(buffer)
    }
}

/// XChaCha20-Poly1305, PBKDF2-derived key, random 24-byte nonce prepended,
/// 16-byte Poly1305 tag appended by the AEAD implementation itself.
struct XChaCha20Poly1305Cipher;

impl Cipher for XChaCha20Poly1305Cipher {
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, RresError> {
        let password = required_password()?;
        let key = derive_key(password.as_bytes());
        let aead = XChaCha20Poly1305::new(XChaChaKey::from_slice(&key));

        let mut nonce_bytes = [0u8; XCHACHA_NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = XNonce::from_slice(&nonce_bytes);

        let ciphertext = aead
            .encrypt(nonce, data)
            .map_err(|_| RresError::DecryptionFailed)?;

        let mut out = Vec::with_capacity(XCHACHA_NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, RresError> {
        if data.len() < XCHACHA_NONCE_LEN {
            return Err(RresError::DecryptionFailed);
        }
        let password = required_password()?;
        let key = derive_key(password.as_bytes());
        let aead = XChaCha20Poly1305::new(XChaChaKey::from_slice(&key));

        let (nonce_bytes, ciphertext) = data.split_at(XCHACHA_NONCE_LEN);
        let nonce = XNonce::from_slice(nonce_bytes);

        aead.decrypt(nonce, ciphertext)
            .map_err(|_| RresError::DecryptionFailed)
    }
}

pub fn get_cipher(kind: EncryptionType) -> Result<Box<dyn Cipher>, RresError> {
    match kind {
        EncryptionType::None => Ok(Box::new(NoneCipher)),
        EncryptionType::Xor => Ok(Box::new(XorCipher)),
        EncryptionType::Aes => Ok(Box::new(AesCtrCipher)),
        EncryptionType::Xchacha20Poly1305 => Ok(Box::new(XChaCha20Poly1305Cipher)),
        other => Err(RresError::UnsupportedCipher(other.as_u8())),
    }
}
