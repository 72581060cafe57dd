use serde::Deserialize;

/// Tunables for a single decoder instance.
///
/// The defaults decode everything known; every knob only
/// narrows or widens how much of a PDU is rendered, never how it is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Upper bound for any count field read from the wire (items, data values,
    /// SZL records, alarm objects). Counts above it are clamped.
    pub max_list_entries: usize,
    /// Decode SZL partial-list records into typed layouts. When disabled every
    /// record is surfaced as raw bytes.
    pub szl_records: bool,
    /// Treat a non-zero leading byte of an alarm-query response as the length
    /// of a continuation fragment.
    pub alarm_query_heuristic: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderConfig {
    pub const fn new() -> Self {
        Self {
            max_list_entries: 1024,
            szl_records: true,
            alarm_query_heuristic: true,
        }
    }

    #[inline]
    pub fn with_max_list_entries(mut self, max: usize) -> Self {
        self.max_list_entries = max;
        self
    }

    #[inline]
    pub fn with_szl_records(mut self, enabled: bool) -> Self {
        self.szl_records = enabled;
        self
    }

    /// Configure the alarm-query continuation heuristic.
    #[inline]
    pub fn with_alarm_query_heuristic(mut self, enabled: bool) -> Self {
        self.alarm_query_heuristic = enabled;
        self
    }

    /// Clamp a wire count against the configured maximum.
    #[inline]
    pub(crate) fn clamp_count(&self, count: usize) -> usize {
        count.min(self.max_list_entries)
    }
}
