use std::time::Duration;

use rand::Rng;

use crate::configuration::ScraperSettings;

/// Random pause taken between two page requests to the same catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtesyDelay {
    min_millis: u64,
    max_millis: u64,
}

impl CourtesyDelay {
    pub fn new(min_millis: u64, max_millis: u64) -> Self {
        CourtesyDelay {
            min_millis: min_millis.min(max_millis),
            max_millis: min_millis.max(max_millis),
        }
    }

    pub fn none() -> Self {
        CourtesyDelay::new(0, 0)
    }

    pub fn from_settings(settings: &ScraperSettings) -> Self {
        CourtesyDelay::new(settings.delay_min_millis, settings.delay_max_millis)
    }

    pub fn pick(&self) -> Duration {
        let millis = rand::thread_rng().gen_range(self.min_millis..=self.max_millis);
        Duration::from_millis(millis)
    }

    pub async fn wait(&self) {
        let delay = self.pick();
        if delay.is_zero() {
            return;
        }
        log::debug!("Waiting {:?} before next page", delay);
        tokio::time::sleep(delay).await;
    }
}
