use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-wide counters for cipher calls. Cloning shares the same counters.
#[derive(Clone, Default)]
pub struct CryptoMetrics {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    encrypt_ok: AtomicU64,
    encrypt_err: AtomicU64,
    decrypt_ok: AtomicU64,
    decrypt_err: AtomicU64,
}

impl CryptoMetrics {
    pub fn record_encrypt_ok(&self) {
        self.inner.encrypt_ok.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_encrypt_err(&self) {
        self.inner.encrypt_err.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decrypt_ok(&self) {
        self.inner.decrypt_ok.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decrypt_err(&self) {
        self.inner.decrypt_err.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CryptoMetricsSnapshot {
        CryptoMetricsSnapshot {
            encrypt_ok: self.inner.encrypt_ok.load(Ordering::Relaxed),
            encrypt_err: self.inner.encrypt_err.load(Ordering::Relaxed),
            decrypt_ok: self.inner.decrypt_ok.load(Ordering::Relaxed),
            decrypt_err: self.inner.decrypt_err.load(Ordering::Relaxed),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CryptoMetricsSnapshot {
    pub encrypt_ok: u64,
    pub encrypt_err: u64,
    pub decrypt_ok: u64,
    pub decrypt_err: u64,
}
