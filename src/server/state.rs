use cryptogate_cipher::CryptoMetrics;

#[derive(Clone)]
pub struct ServeState {
    pub metrics: CryptoMetrics,
}

impl ServeState {
    pub fn new(metrics: CryptoMetrics) -> Self {
        Self { metrics }
    }
}
