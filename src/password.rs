//! The `password` module holds the process-wide symmetric-cipher passphrase
//! (§4.H). It is the only mutable state shared between readers and writers;
//! everything else in a read or write session is scoped to that session.
use std::sync::{OnceLock, RwLock};

use zeroize::Zeroize;

/// An owned passphrase that zeroizes its backing buffer on drop.
#[derive(Clone)]
pub struct Passphrase(Vec<u8>);

impl Passphrase {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Passphrase(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for Passphrase {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

fn store() -> &'static RwLock<Option<Passphrase>> {
    static STORE: OnceLock<RwLock<Option<Passphrase>>> = OnceLock::new();
    STORE.get_or_init(|| RwLock::new(None))
}

/// Set (or replace) the active passphrase. Replacing zeroizes the previous
/// one immediately rather than waiting for it to be dropped by the
/// scheduler, so no old key material lingers longer than necessary.
pub fn set_cipher_password(bytes: impl Into<Vec<u8>>) {
    let mut guard = store().write().expect("password store lock poisoned");
    if let Some(mut old) = guard.take() {
        old.0.zeroize();
    }
    *guard = Some(Passphrase::new(bytes));
}

/// Clear the active passphrase, zeroizing it in place.
pub fn clear_cipher_password() {
    let mut guard = store().write().expect("password store lock poisoned");
    if let Some(mut old) = guard.take() {
        old.0.zeroize();
    }
}

/// Fetch a clone of the active passphrase, if any has been set.
pub fn cipher_password() -> Option<Passphrase> {
    store()
        .read()
        .expect("password store lock poisoned")
        .clone()
}

/// Every test anywhere in this crate that touches the password store takes
/// this lock first. `cargo test` runs tests in separate threads of the same
/// process by default, and the store is process-wide state, so without this
/// two tests setting different passwords can interleave and corrupt each
/// other's view of the store.
#[cfg(test)]
pub(crate) fn test_lock() -> &'static std::sync::Mutex<()> {
    static LOCK: OnceLock<std::sync::Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| std::sync::Mutex::new(()))
}
