//! Named channel data.

use std::collections::BTreeMap;

use boomsim_types::Channel;
use serde::{Deserialize, Serialize};

/// A set of named time series and named scalars.
///
/// This is the structured side of the codec: [`crate::encode`] packs a
/// `ChannelSet` into a flat buffer and [`crate::decode`] unpacks one.
/// Values are kept verbatim in solver-native units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelSet {
    #[serde(default)]
    series: BTreeMap<Channel, Vec<f64>>,
    #[serde(default)]
    scalars: BTreeMap<Channel, f64>,
}

impl ChannelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a time series, replacing any previous data for the channel.
    pub fn with_series(mut self, channel: Channel, values: impl Into<Vec<f64>>) -> Self {
        self.insert_series(channel, values);
        self
    }

    /// Adds a scalar, replacing any previous value for the channel.
    pub fn with_scalar(mut self, channel: Channel, value: f64) -> Self {
        self.insert_scalar(channel, value);
        self
    }

    pub fn insert_series(&mut self, channel: Channel, values: impl Into<Vec<f64>>) {
        self.series.insert(channel, values.into());
    }

    pub fn insert_scalar(&mut self, channel: Channel, value: f64) {
        self.scalars.insert(channel, value);
    }

    pub fn series(&self, channel: Channel) -> Option<&[f64]> {
        self.series.get(&channel).map(Vec::as_slice)
    }

    pub fn scalar(&self, channel: Channel) -> Option<f64> {
        self.scalars.get(&channel).copied()
    }

    pub fn remove_series(&mut self, channel: Channel) -> Option<Vec<f64>> {
        self.series.remove(&channel)
    }

    /// Number of named entries (series and scalars).
    pub fn len(&self) -> usize {
        self.series.len() + self.scalars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.scalars.is_empty()
    }
}
