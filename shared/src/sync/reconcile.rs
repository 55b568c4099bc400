//! Positional and physiological stream reconciliation.
//!
//! Merges the two sample streams of a session into one ordered timeline.
//! Physiological readings are snapped onto the nearest GPS fix so that heart
//! rate and position travel together, and heart rate gaps are forward-filled.

use super::{nearest_timestamp, SyncError};
use crate::models::{format_epoch_millis, Observation, PhysiologicalSample, PositionalSample};
use std::collections::btree_map::{self, BTreeMap, Entry};

/// Ordered mapping from epoch milliseconds to reconciled observations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timeline {
    entries: BTreeMap<i64, Observation>,
}

impl Timeline {
    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the timeline holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the observation recorded at `timestamp`.
    #[must_use]
    pub fn get(&self, timestamp: i64) -> Option<&Observation> {
        self.entries.get(&timestamp)
    }

    /// Returns the timestamps in ascending order.
    #[must_use]
    pub fn timestamps(&self) -> Vec<i64> {
        self.entries.keys().copied().collect()
    }

    /// Iterates over `(timestamp, observation)` pairs in ascending order.
    pub fn iter(&self) -> btree_map::Iter<'_, i64, Observation> {
        self.entries.iter()
    }

    /// Consumes the timeline, returning the observations in ascending order.
    #[must_use]
    pub fn into_observations(self) -> Vec<Observation> {
        self.entries.into_values().collect()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = (&'a i64, &'a Observation);
    type IntoIter = btree_map::Iter<'a, i64, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The physiological fields of a sample that count as real readings.
///
/// Zero values are treated the same as missing ones.
struct Readings {
    distance: Option<f64>,
    cadence: Option<f64>,
    heart_rate: Option<i64>,
    speed: Option<f64>,
}

impl Readings {
    #[allow(clippy::cast_possible_truncation)]
    fn from_sample(sample: &PhysiologicalSample) -> Self {
        let non_zero = |value: Option<f64>| value.filter(|v| v.abs() > 0.0);
        Self {
            distance: non_zero(sample.distance),
            cadence: non_zero(sample.cadence),
            heart_rate: sample.heart_rate.map(|hr| hr as i64).filter(|hr| *hr != 0),
            speed: non_zero(sample.speed),
        }
    }

    fn is_empty(&self) -> bool {
        self.distance.is_none()
            && self.cadence.is_none()
            && self.heart_rate.is_none()
            && self.speed.is_none()
    }
}

/// Sets `slot` to `value` unless it already holds a reading.
fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if let Some(value) = value {
        slot.get_or_insert(value);
    }
}

fn format_time(timestamp: i64) -> Result<String, SyncError> {
    format_epoch_millis(timestamp).ok_or(SyncError::TimestampOutOfRange(timestamp))
}

/// Reconciles the positional and physiological streams of one session.
///
/// - Every positional sample seeds an observation; the first sample wins
///   when timestamps repeat.
/// - A physiological sample keeps its timestamp if an observation already
///   exists there. Otherwise it is snapped to the nearest positional
///   timestamp, or kept as is when there is no positional data at all.
/// - Fields are only added, never overwritten: the first reading of a field
///   at a timestamp wins.
/// - Heart rate is truncated to whole beats and forward-filled in time
///   order, starting from `0`.
///
/// # Errors
///
/// Returns [`SyncError::TimestampOutOfRange`] if a timestamp cannot be
/// formatted as a UTC date time.
///
/// # Example
///
/// ```
/// use shared::models::{PhysiologicalSample, PositionalSample};
/// use shared::sync::reconcile;
///
/// let positional = [
///     PositionalSample::new(1000, 10.0, 20.0),
///     PositionalSample::new(2000, 11.0, 21.0),
/// ];
/// let physiological = [PhysiologicalSample::new(1400).with_heart_rate(120.0)];
///
/// let timeline = reconcile(&positional, &physiological).unwrap();
///
/// assert_eq!(timeline.timestamps(), vec![1000, 2000]);
/// assert_eq!(timeline.get(1000).unwrap().heart_rate, Some(120));
/// assert_eq!(timeline.get(2000).unwrap().heart_rate, Some(120));
/// ```
pub fn reconcile(
    positional: &[PositionalSample],
    physiological: &[PhysiologicalSample],
) -> Result<Timeline, SyncError> {
    let mut merged: BTreeMap<i64, Observation> = BTreeMap::new();

    for sample in positional {
        if let Entry::Vacant(slot) = merged.entry(sample.timestamp) {
            slot.insert(Observation {
                latitude: Some(sample.latitude),
                longitude: Some(sample.longitude),
                altitude: sample.altitude,
                ..Observation::at(format_time(sample.timestamp)?)
            });
        }
    }

    let mut candidates: Vec<i64> = positional.iter().map(|s| s.timestamp).collect();
    candidates.sort_unstable();

    for sample in physiological {
        let timestamp = if merged.contains_key(&sample.timestamp) || candidates.is_empty() {
            sample.timestamp
        } else {
            nearest_timestamp(sample.timestamp, &candidates)?
        };

        let readings = Readings::from_sample(sample);
        if readings.is_empty() {
            continue;
        }

        let observation = match merged.entry(timestamp) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => slot.insert(Observation::at(format_time(timestamp)?)),
        };
        fill(&mut observation.distance, readings.distance);
        fill(&mut observation.cadence, readings.cadence);
        fill(&mut observation.heart_rate, readings.heart_rate);
        fill(&mut observation.speed, readings.speed);
    }

    merged
        .values_mut()
        .fold(0_i64, |last, observation| match observation.heart_rate {
            Some(hr) if hr != 0 => hr,
            _ => {
                observation.heart_rate = Some(last);
                last
            }
        });

    Ok(Timeline { entries: merged })
}
