//! The fixed Low/Mid/High band set and per-band result containers.
//!
//! Results are always keyed by [`FrequencyBand`] through [`PerBand`], never by
//! position in an anonymous tuple, so display code cannot silently swap bands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{HIGH_BAND, LOW_BAND, MID_BAND};

/// One of the three analysis bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyBand {
    /// 20-250 Hz by default.
    Low,
    /// 250-2000 Hz by default.
    Mid,
    /// 2000-20000 Hz by default.
    High,
}

impl FrequencyBand {
    /// All bands in computation and display order.
    pub const ALL: [FrequencyBand; 3] = [FrequencyBand::Low, FrequencyBand::Mid, FrequencyBand::High];

    /// Lowercase name used in logs, file names, and serialized output.
    pub fn name(self) -> &'static str {
        match self {
            FrequencyBand::Low => "low",
            FrequencyBand::Mid => "mid",
            FrequencyBand::High => "high",
        }
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower and upper edge of a pass band, in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cutoffs {
    /// Lower cutoff frequency in Hz.
    pub low_hz: f64,
    /// Upper cutoff frequency in Hz.
    pub high_hz: f64,
}

impl Cutoffs {
    /// Create a cutoff pair.
    pub const fn new(low_hz: f64, high_hz: f64) -> Self {
        Self { low_hz, high_hz }
    }

    /// Geometric center of the band.
    pub fn center_hz(&self) -> f64 {
        (self.low_hz * self.high_hz).sqrt()
    }

    /// Bandwidth in Hz.
    pub fn bandwidth(&self) -> f64 {
        self.high_hz - self.low_hz
    }
}

/// A value for each of the three bands.
///
/// Serializes as `{ "low": .., "mid": .., "high": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerBand<T> {
    /// Value for [`FrequencyBand::Low`].
    pub low: T,
    /// Value for [`FrequencyBand::Mid`].
    pub mid: T,
    /// Value for [`FrequencyBand::High`].
    pub high: T,
}

impl<T> PerBand<T> {
    /// Build by calling `f` once per band, in Low, Mid, High order.
    pub fn from_fn(mut f: impl FnMut(FrequencyBand) -> T) -> Self {
        let low = f(FrequencyBand::Low);
        let mid = f(FrequencyBand::Mid);
        let high = f(FrequencyBand::High);
        Self { low, mid, high }
    }

    /// Like [`PerBand::from_fn`], stopping at the first error.
    pub fn try_from_fn<E>(mut f: impl FnMut(FrequencyBand) -> Result<T, E>) -> Result<Self, E> {
        let low = f(FrequencyBand::Low)?;
        let mid = f(FrequencyBand::Mid)?;
        let high = f(FrequencyBand::High)?;
        Ok(Self { low, mid, high })
    }

    /// Value for `band`.
    pub fn get(&self, band: FrequencyBand) -> &T {
        match band {
            FrequencyBand::Low => &self.low,
            FrequencyBand::Mid => &self.mid,
            FrequencyBand::High => &self.high,
        }
    }

    /// Transform every value, keeping the band association.
    pub fn map<U>(self, mut f: impl FnMut(FrequencyBand, T) -> U) -> PerBand<U> {
        PerBand {
            low: f(FrequencyBand::Low, self.low),
            mid: f(FrequencyBand::Mid, self.mid),
            high: f(FrequencyBand::High, self.high),
        }
    }

    /// `(band, value)` pairs in Low, Mid, High order.
    pub fn iter(&self) -> impl Iterator<Item = (FrequencyBand, &T)> {
        FrequencyBand::ALL.into_iter().map(move |band| (band, self.get(band)))
    }
}

impl<T, E> PerBand<Result<T, E>> {
    /// Turn per-band results into one result, taking the first error in
    /// Low, Mid, High order.
    pub fn transpose(self) -> Result<PerBand<T>, E> {
        Ok(PerBand {
            low: self.low?,
            mid: self.mid?,
            high: self.high?,
        })
    }
}

impl<T: Copy> PerBand<T> {
    /// The values as a `(low, mid, high)` tuple.
    pub fn to_tuple(&self) -> (T, T, T) {
        (self.low, self.mid, self.high)
    }
}

/// Cutoffs for each band.
///
/// Missing bands in a deserialized config keep their default edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandEdges {
    /// Edges of [`FrequencyBand::Low`].
    pub low: Cutoffs,
    /// Edges of [`FrequencyBand::Mid`].
    pub mid: Cutoffs,
    /// Edges of [`FrequencyBand::High`].
    pub high: Cutoffs,
}

impl BandEdges {
    /// Edges of `band`.
    pub fn get(&self, band: FrequencyBand) -> Cutoffs {
        match band {
            FrequencyBand::Low => self.low,
            FrequencyBand::Mid => self.mid,
            FrequencyBand::High => self.high,
        }
    }
}

impl Default for BandEdges {
    fn default() -> Self {
        Self {
            low: LOW_BAND,
            mid: MID_BAND,
            high: HIGH_BAND,
        }
    }
}
