use rand::Rng;

use crate::deck::Item;

const CATAAS_URL: &str = "https://cataas.com/cat";

/// Supplies fresh batches of image handles. Uniqueness is not checked.
pub trait ImageSource {
    fn provide_items(&mut self, count: usize) -> Vec<Item>;
}

/// Random cats from cataas.com. Every URL carries a unique query so the
/// browser fetches a new picture instead of reusing a cached one.
#[derive(Debug, Clone)]
pub struct CatImageSource {
    base_url: String,
    issued: u64,
}

impl CatImageSource {
    pub fn new() -> Self {
        Self::with_base_url(CATAAS_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            issued: 0,
        }
    }
}

impl Default for CatImageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for CatImageSource {
    fn provide_items(&mut self, count: usize) -> Vec<Item> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|_| {
                self.issued += 1;
                let nonce: u32 = rng.gen();
                Item::from(format!(
                    "{}?random={}-{:08x}",
                    self.base_url, self.issued, nonce
                ))
            })
            .collect()
    }
}
