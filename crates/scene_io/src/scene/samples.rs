//! Time-sampled storage
//!
//! Lookup holds the previous sample: a query at `t` returns the sample with
//! the greatest time `<= t`, or the first sample when `t` precedes them all.
//! `-0.0` and `0.0` are the same sample time.

use serde::{Deserialize, Deserializer, Serialize};

/// One stored sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample<T> {
    /// Sample time
    pub time: f64,
    /// Sample value
    pub value: T,
    /// Loaded from an existing store; append sessions may not replace it
    #[serde(skip)]
    pub finalized: bool,
}

/// Rejected overwrite of a finalized sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalizedSample {
    /// Time of the sample that would have been replaced
    pub time: f64,
}

/// Values keyed by sample time, kept sorted
///
/// Deserializing sorts the stored samples and rejects NaN or repeated times.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sampled<T> {
    samples: Vec<Sample<T>>,
}

fn normalize_time(time: f64) -> f64 {
    time + 0.0
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sampled<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let samples = Vec::<Sample<T>>::deserialize(deserializer)?;
        Self::from_samples(samples).map_err(serde::de::Error::custom)
    }
}

impl<T> Default for Sampled<T> {
    fn default() -> Self {
        Self { samples: Vec::new() }
    }
}

impl<T> Sampled<T> {
    /// Create an empty sample set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from samples in any order
    ///
    /// Fails on a NaN time or on two samples at the same time.
    pub fn from_samples(mut samples: Vec<Sample<T>>) -> Result<Self, String> {
        for sample in &mut samples {
            if sample.time.is_nan() {
                return Err("sample time is NaN".to_string());
            }
            sample.time = normalize_time(sample.time);
        }
        samples.sort_by(|a, b| a.time.total_cmp(&b.time));

        let repeated = samples
            .windows(2)
            .find(|pair| pair[0].time.total_cmp(&pair[1].time).is_eq());
        if let Some(pair) = repeated {
            return Err(format!("duplicate sample time {}", pair[0].time));
        }
        Ok(Self { samples })
    }

    /// Whether no sample was ever written
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Stored sample times in ascending order
    pub fn sample_times(&self) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.time).collect()
    }

    /// Value for a query time
    pub fn get(&self, time: f64) -> Option<&T> {
        let time = normalize_time(time);
        let after = self
            .samples
            .partition_point(|sample| sample.time.total_cmp(&time).is_le());
        let index = after.saturating_sub(1);
        self.samples.get(index).map(|sample| &sample.value)
    }

    /// Store a value at `time`, replacing any sample at exactly that time
    ///
    /// With `protect_finalized`, replacing a finalized sample is refused.
    pub fn insert(
        &mut self,
        time: f64,
        value: T,
        protect_finalized: bool,
    ) -> Result<(), FinalizedSample> {
        let time = normalize_time(time);
        let index = self
            .samples
            .partition_point(|sample| sample.time.total_cmp(&time).is_lt());

        match self.samples.get_mut(index) {
            Some(existing) if existing.time.total_cmp(&time).is_eq() => {
                if protect_finalized && existing.finalized {
                    return Err(FinalizedSample { time });
                }
                existing.value = value;
                existing.finalized = false;
            }
            _ => self.samples.insert(index, Sample { time, value, finalized: false }),
        }
        Ok(())
    }

    /// Mark every stored sample as finalized
    pub fn finalize(&mut self) {
        for sample in &mut self.samples {
            sample.finalized = true;
        }
    }

    /// Iterate over samples in time order
    pub fn iter(&self) -> impl Iterator<Item = &Sample<T>> {
        self.samples.iter()
    }
}
