use serde::{Serialize, Deserialize};

/// Number of most recent scar values a coherence sample (and the rolling
/// activity mean) covers.
pub const COHERENCE_WINDOW: usize = 10;

/// Summary of everything recorded in a `ScarMemory`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubstrateMetrics {
    /// Number of backward steps that recorded a scar value.
    pub scar_memory_length: usize,
    /// Mean scar activity over all steps; `0.0` when nothing was recorded.
    pub average_scar_activity: f64,
    /// Mean of the coherence history; `0.0` when it is empty.
    pub substrate_coherence: f64,
    /// `1 - average_scar_activity`.
    pub generative_capacity_preserved: f64,
}

/// Append-only record of per-step scar activity and the coherence values
/// derived from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScarMemory {
    scar_memory: Vec<f64>,
    coherence_history: Vec<f64>,
}

impl ScarMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one step's scar activity. Once more than `COHERENCE_WINDOW`
    /// values exist, the population standard deviation of the most recent
    /// window is appended to the coherence history as well.
    pub fn metabolize(&mut self, scar_value: f64) {
        self.scar_memory.push(scar_value);
        if self.scar_memory.len() > COHERENCE_WINDOW {
            let recent = &self.scar_memory[self.scar_memory.len() - COHERENCE_WINDOW..];
            self.coherence_history.push(std_dev(recent));
        }
    }

    pub fn len(&self) -> usize {
        self.scar_memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scar_memory.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.scar_memory
    }

    pub fn coherence_history(&self) -> &[f64] {
        &self.coherence_history
    }

    pub fn last(&self) -> Option<f64> {
        self.scar_memory.last().copied()
    }

    /// Mean of the last `COHERENCE_WINDOW` values (fewer if not yet
    /// recorded); `None` while the memory is empty.
    pub fn recent_mean(&self) -> Option<f64> {
        if self.scar_memory.is_empty() {
            return None;
        }
        let start = self.scar_memory.len().saturating_sub(COHERENCE_WINDOW);
        Some(mean(&self.scar_memory[start..]))
    }

    pub fn metrics(&self) -> SubstrateMetrics {
        let average_scar_activity = mean(&self.scar_memory);
        SubstrateMetrics {
            scar_memory_length: self.scar_memory.len(),
            average_scar_activity,
            substrate_coherence: mean(&self.coherence_history),
            generative_capacity_preserved: 1.0 - average_scar_activity,
        }
    }
}

/// Arithmetic mean; `0.0` for an empty slice.
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    let mu = mean(values);
    let var = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_memory_metrics() {
        let memory = ScarMemory::new();
        let m = memory.metrics();
        assert_eq!(m.scar_memory_length, 0);
        assert_eq!(m.average_scar_activity, 0.0);
        assert_eq!(m.substrate_coherence, 0.0);
        assert_eq!(m.generative_capacity_preserved, 1.0);
        assert_eq!(memory.recent_mean(), None);
    }

    #[test]
    fn test_coherence_starts_after_window() {
        let mut memory = ScarMemory::new();
        for i in 0..COHERENCE_WINDOW {
            memory.metabolize(i as f64);
        }
        assert!(memory.coherence_history().is_empty());

        memory.metabolize(10.0);
        assert_eq!(memory.coherence_history().len(), 1);
        // std of 1..=10 (population) = sqrt(8.25)
        assert!((memory.coherence_history()[0] - 8.25_f64.sqrt()).abs() < 1e-12);

        memory.metabolize(11.0);
        assert_eq!(memory.coherence_history().len(), 2);
        assert_eq!(memory.len(), 12);
    }

    #[test]
    fn test_constant_activity_has_zero_coherence() {
        let mut memory = ScarMemory::new();
        for _ in 0..25 {
            memory.metabolize(0.25);
        }
        let m = memory.metrics();
        assert_eq!(m.scar_memory_length, 25);
        assert!((m.average_scar_activity - 0.25).abs() < 1e-12);
        assert!(m.substrate_coherence.abs() < 1e-12);
        assert!((m.generative_capacity_preserved - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_recent_mean_uses_last_window() {
        let mut memory = ScarMemory::new();
        memory.metabolize(4.0);
        assert_eq!(memory.recent_mean(), Some(4.0));
        for _ in 0..COHERENCE_WINDOW {
            memory.metabolize(1.0);
        }
        assert_eq!(memory.recent_mean(), Some(1.0));
        assert_eq!(memory.last(), Some(1.0));
    }
}
