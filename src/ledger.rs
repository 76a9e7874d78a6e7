use chrono::{Local, NaiveDateTime, SubsecRound};

use crate::models::{ColorSample, NewSample};

/// Append-only, sequence-numbered record of sampled colors.
#[derive(Debug, Default, Clone)]
pub struct SampleLedger {
    samples: Vec<ColorSample>,
}

impl SampleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `sample` stamped with the current local time (whole seconds).
    pub fn append(&mut self, sample: NewSample) -> &ColorSample {
        let now = Local::now().naive_local().trunc_subsecs(0);
        self.append_at(sample, now)
    }

    pub fn append_at(&mut self, sample: NewSample, timestamp: NaiveDateTime) -> &ColorSample {
        let sequence = self.next_sequence();
        let index = self.samples.len();
        self.samples
            .push(ColorSample::new(sequence, timestamp.trunc_subsecs(0), sample));
        &self.samples[index]
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&ColorSample> {
        self.samples.last()
    }

    /// All samples in sequence order.
    pub fn all(&self) -> &[ColorSample] {
        &self.samples
    }

    /// Owned copy for work that outlives the borrow (exports on another task).
    pub fn snapshot(&self) -> Vec<ColorSample> {
        self.samples.clone()
    }

    /// Discards every record and restarts numbering at 1. Does nothing unless
    /// the caller passes the user's explicit confirmation. Returns how many
    /// records were discarded.
    pub fn clear(&mut self, confirmed: bool) -> usize {
        if !confirmed {
            return 0;
        }
        let discarded = self.samples.len();
        self.samples.clear();
        discarded
    }

    fn next_sequence(&self) -> u32 {
        u32::try_from(self.samples.len()).map_or(u32::MAX, |count| count.saturating_add(1))
    }
}
