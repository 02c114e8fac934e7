use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
};

use uuid::Uuid;

use crate::domain::scrape_report::ScrapeReport;

/// Finished reports of recent runs, kept so their csv can be downloaded.
/// Holds at most `capacity` runs, evicting the oldest first.
pub struct RunStore {
    capacity: usize,
    runs: Mutex<VecDeque<Arc<ScrapeReport>>>,
}

impl RunStore {
    pub fn new(capacity: usize) -> Self {
        RunStore {
            capacity: capacity.max(1),
            runs: Mutex::new(VecDeque::new()),
        }
    }

    pub fn insert(&self, report: Arc<ScrapeReport>) {
        let mut runs = self.runs.lock().unwrap_or_else(PoisonError::into_inner);
        while runs.len() >= self.capacity {
            if let Some(evicted) = runs.pop_front() {
                log::debug!("Evicting run {} from run store", evicted.run_id);
            }
        }
        runs.push_back(report);
    }

    pub fn get(&self, run_id: &Uuid) -> Option<Arc<ScrapeReport>> {
        self.runs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|report| report.run_id == *run_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.runs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
