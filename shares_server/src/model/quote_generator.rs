//! Market price generator.
//!
//! The `QuoteGenerator` runs a background thread that moves every listed price
//! one random-walk step per tick. The market is shared with the HTTP handlers
//! through an `Arc<RwLock<Market>>`, so every request observes the same
//! sequence of prices.
//!
//! The thread stops when the shutdown flag is set or the lock is poisoned.

use std::sync::{
    Arc, RwLock,
    atomic::{AtomicBool, Ordering},
};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{error, info};

use crate::model::market::Market;

/// Background market data generator.
pub struct QuoteGenerator;

impl QuoteGenerator {
    /// Start the generator thread.
    pub fn start(
        market: Arc<RwLock<Market>>,
        tick: Duration,
        shutdown: Arc<AtomicBool>,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            info!(
                "Market generator started (thread {:?}, tick {:?})",
                thread::current().id(),
                tick
            );
            let mut rng = rand::rng();
            while !shutdown.load(Ordering::Relaxed) {
                match market.write() {
                    Ok(mut market) => market.tick(&mut rng),
                    Err(e) => {
                        error!("Market lock poisoned: {}", e);
                        break;
                    }
                }
                thread::sleep(tick);
            }
            info!("Market generator stopping...");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shares_common::Symbol;

    #[test]
    fn generator_moves_prices_until_shutdown() {
        let market = Arc::new(RwLock::new(Market::sandbox()));
        let shutdown = Arc::new(AtomicBool::new(false));
        let aapl = Symbol::parse("AAPL").expect("symbol");
        let before = market
            .read()
            .expect("lock")
            .listing(&aapl)
            .map(|listing| listing.price);

        let handle = QuoteGenerator::start(market.clone(), Duration::from_millis(1), shutdown.clone());
        thread::sleep(Duration::from_millis(50));
        shutdown.store(true, Ordering::SeqCst);
        handle.join().expect("generator thread");

        let after = market
            .read()
            .expect("lock")
            .listing(&aapl)
            .map(|listing| listing.price);
        assert_ne!(before, after);
    }
}
