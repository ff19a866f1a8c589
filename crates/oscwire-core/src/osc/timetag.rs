use super::layout;

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Convert a raw NTP 32.32 time tag to seconds since the Unix epoch.
/// The reserved value `1` means "immediately" and maps to `None`.
pub(crate) fn seconds_from_ntp(raw: u64) -> Option<f64> {
    if raw == layout::IMMEDIATELY {
        return None;
    }
    Some(raw as f64 / TWO_POW_32 - layout::NTP_DELTA as f64)
}

/// Convert seconds since the Unix epoch back to a raw NTP time tag.
/// `None` encodes as the "immediately" sentinel.
pub(crate) fn ntp_from_seconds(seconds: Option<f64>) -> u64 {
    match seconds {
        None => layout::IMMEDIATELY,
        Some(seconds) => ((seconds + layout::NTP_DELTA as f64) * TWO_POW_32).round() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::{ntp_from_seconds, seconds_from_ntp};

    #[test]
    fn sentinel_decodes_as_immediate() {
        assert_eq!(seconds_from_ntp(1), None);
    }

    #[test]
    fn immediate_encodes_as_sentinel() {
        assert_eq!(ntp_from_seconds(None), 1);
    }

    #[test]
    fn known_tag_converts_to_unix_seconds() {
        // 0xA0C65B2A seconds since 1900, zero fraction.
        let seconds = seconds_from_ntp(0xA0C6_5B2A_0000_0000).unwrap();
        assert_eq!(seconds, 2_697_419_562.0 - 2_208_988_800.0);
    }

    #[test]
    fn conversion_round_trips_whole_seconds() {
        let raw = ntp_from_seconds(Some(488_430_762.0));
        assert_eq!(raw, 0xA0C6_5B2A_0000_0000);
        assert_eq!(seconds_from_ntp(raw), Some(488_430_762.0));
    }
}
