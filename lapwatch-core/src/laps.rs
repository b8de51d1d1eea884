//! Lap ledger: finalized laps plus fastest/slowest bookkeeping
//!
//! The ledger only knows about finalized laps. The lap in progress is never
//! stored; its duration is derived on demand as
//! `elapsed - total_recorded_ms`, so it keeps growing with the clock until
//! the next lap is recorded.
//!
//! Callers must only call [`LapLedger::record`] while the clock is running
//! and has a non-zero elapsed time. The stopwatch reducer enforces this.

/// A finalized lap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lap {
    /// 1-based, in creation order
    pub number: u32,
    pub duration_ms: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LapLedger {
    laps: Vec<Lap>,
    total_recorded_ms: u64,
    // Indices into `laps`. Tracked from the first lap, exposed from the second.
    fastest: Option<usize>,
    slowest: Option<usize>,
}

impl LapLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalize the lap in progress at `elapsed` and start the next one.
    pub fn record(&mut self, elapsed: u64) -> Lap {
        let lap = Lap {
            number: self.current_number(),
            duration_ms: self.provisional_duration(elapsed),
        };
        let index = self.laps.len();
        self.laps.push(lap);
        self.total_recorded_ms += lap.duration_ms;

        // Strict comparisons: on a tie the earlier lap keeps the title.
        if self
            .fastest
            .is_none_or(|i| lap.duration_ms < self.laps[i].duration_ms)
        {
            self.fastest = Some(index);
        }
        if self
            .slowest
            .is_none_or(|i| lap.duration_ms > self.laps[i].duration_ms)
        {
            self.slowest = Some(index);
        }

        lap
    }

    /// Duration of the lap in progress.
    pub fn provisional_duration(&self, elapsed: u64) -> u64 {
        elapsed.saturating_sub(self.total_recorded_ms)
    }

    /// Number the lap in progress will get when recorded.
    pub fn current_number(&self) -> u32 {
        u32::try_from(self.laps.len() + 1).unwrap_or(u32::MAX)
    }

    /// Finalized laps in creation order.
    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Finalized laps, most recent first.
    pub fn newest_first(&self) -> impl Iterator<Item = &Lap> {
        self.laps.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    /// Sum of all finalized lap durations.
    pub fn total_recorded_ms(&self) -> u64 {
        self.total_recorded_ms
    }

    /// Shortest finalized lap. `None` until two laps exist.
    pub fn fastest(&self) -> Option<&Lap> {
        self.extremum(self.fastest)
    }

    /// Longest finalized lap. `None` until two laps exist.
    pub fn slowest(&self) -> Option<&Lap> {
        self.extremum(self.slowest)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn extremum(&self, index: Option<usize>) -> Option<&Lap> {
        if self.laps.len() < 2 {
            return None;
        }
        index.and_then(|i| self.laps.get(i))
    }
}
