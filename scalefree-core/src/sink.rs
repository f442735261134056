//! Destinations for computed statistics.
//!
//! The evaluator and the real-network adapter never format output
//! themselves; they hand named values to a [`StatisticsSink`].

use std::fmt;

use tracing::info;

use crate::ScaleFreeErrorCode;

/// A single statistic handed to a sink.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StatisticValue {
    /// An exact count such as a node or edge total.
    Count(usize),
    /// A real-valued measurement.
    Real(f64),
    /// The statistic could not be computed; carries the failure code.
    Unavailable(ScaleFreeErrorCode),
}

impl fmt::Display for StatisticValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(value) => write!(f, "{value}"),
            Self::Real(value) => write!(f, "{value:.6}"),
            Self::Unavailable(code) => write!(f, "unavailable ({code})"),
        }
    }
}

/// Receives named statistics grouped by scope, for example
/// `("scale_free", "exponent")`.
pub trait StatisticsSink {
    /// Records `value` for `name` within `scope`.
    fn record(&mut self, scope: &str, name: &str, value: StatisticValue);
}

impl<S: StatisticsSink + ?Sized> StatisticsSink for &mut S {
    fn record(&mut self, scope: &str, name: &str, value: StatisticValue) {
        (**self).record(scope, name, value);
    }
}

/// Sink that emits every statistic as an `info` event.
///
/// # Examples
/// ```
/// use scalefree_core::{StatisticValue, StatisticsSink, TracingSink};
///
/// let mut sink = TracingSink;
/// sink.record("scale_free", "edges", StatisticValue::Count(10));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl StatisticsSink for TracingSink {
    fn record(&mut self, scope: &str, name: &str, value: StatisticValue) {
        info!(scope, statistic = name, value = %value, "statistic");
    }
}

/// Sink that keeps every statistic in memory, in arrival order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectingSink {
    entries: Vec<(String, String, StatisticValue)>,
}

impl CollectingSink {
    /// Returns the recorded `(scope, name, value)` triples.
    #[must_use]
    #[rustfmt::skip]
    pub fn entries(&self) -> &[(String, String, StatisticValue)] { &self.entries }

    /// Returns the first value recorded for `scope` and `name`.
    #[must_use]
    pub fn get(&self, scope: &str, name: &str) -> Option<StatisticValue> {
        self.entries
            .iter()
            .find(|(s, n, _)| s == scope && n == name)
            .map(|&(_, _, value)| value)
    }
}

impl StatisticsSink for CollectingSink {
    fn record(&mut self, scope: &str, name: &str, value: StatisticValue) {
        self.entries.push((scope.to_owned(), name.to_owned(), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use scalefree_test_support::tracing::record;

    #[rstest]
    #[case(StatisticValue::Count(12), "12")]
    #[case(StatisticValue::Real(0.5), "0.500000")]
    #[case(
        StatisticValue::Unavailable(ScaleFreeErrorCode::DegenerateDistribution),
        "unavailable (SCALEFREE_DEGENERATE_DISTRIBUTION)"
    )]
    fn values_render_for_display(#[case] value: StatisticValue, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    fn collecting_sink_keeps_order_and_lookup() {
        let mut sink = CollectingSink::default();
        sink.record("random", "edges", StatisticValue::Count(3));
        sink.record("random", "exponent", StatisticValue::Real(2.0));
        assert_eq!(sink.entries().len(), 2);
        assert_eq!(sink.get("random", "edges"), Some(StatisticValue::Count(3)));
        assert_eq!(sink.get("scale_free", "edges"), None);
    }

    #[rstest]
    fn tracing_sink_emits_structured_events() {
        let ((), layer) = record(|| {
            TracingSink.record("scale_free", "edges", StatisticValue::Count(7));
        });
        let events = layer.events_with_message("statistic");
        assert_eq!(events.len(), 1);
        let fields = &events[0].fields;
        assert_eq!(fields.get("scope").map(String::as_str), Some("scale_free"));
        assert_eq!(fields.get("statistic").map(String::as_str), Some("edges"));
        assert_eq!(fields.get("value").map(String::as_str), Some("7"));
    }
}
