//! Compact text encoding of a timer list for share links
//!
//! Each timer is one record, records are joined by `;`:
//!
//! ```text
//! kind|workMinutes,workSeconds|restMinutes,restSeconds|rounds|description
//! ```
//!
//! Optional fields are empty segments. The description is percent-encoded so
//! delimiters inside it survive. Ids and playback state are not encoded.

use crate::{
    error::DecodeError,
    state::{TimeSpec, TimerConfig, TimerKind},
};

const RECORD_SEPARATOR: char = ';';
const FIELD_SEPARATOR: char = '|';
const PAIR_SEPARATOR: char = ',';

/// Encode timers in list order
pub fn encode(timers: &[TimerConfig]) -> String {
    timers
        .iter()
        .map(encode_record)
        .collect::<Vec<_>>()
        .join(&RECORD_SEPARATOR.to_string())
}

fn encode_record(timer: &TimerConfig) -> String {
    let rest = timer
        .rest_duration
        .map(encode_time)
        .unwrap_or_default();
    let rounds = timer
        .total_rounds
        .map(|rounds| rounds.to_string())
        .unwrap_or_default();
    let description = timer
        .description
        .as_deref()
        .map(|text| urlencoding::encode(text).into_owned())
        .unwrap_or_default();

    format!(
        "{kind}{sep}{work}{sep}{rest}{sep}{rounds}{sep}{description}",
        kind = timer.kind.as_str(),
        work = encode_time(timer.work_duration),
        sep = FIELD_SEPARATOR,
    )
}

fn encode_time(time: TimeSpec) -> String {
    format!("{}{}{}", time.minutes, PAIR_SEPARATOR, time.seconds)
}

/// Decode a list, failing on the first bad record.
///
/// Every decoded timer is idle and gets a fresh id.
pub fn decode(encoded: &str) -> Result<Vec<TimerConfig>, DecodeError> {
    if encoded.trim().is_empty() {
        return Ok(Vec::new());
    }

    encoded
        .split(RECORD_SEPARATOR)
        .enumerate()
        .map(|(record, text)| decode_record(record, text))
        .collect()
}

fn decode_record(record: usize, text: &str) -> Result<TimerConfig, DecodeError> {
    let mut fields = text.split(FIELD_SEPARATOR);

    let kind_field = fields.next().unwrap_or_default().trim();
    let kind = TimerKind::from_name(kind_field).ok_or_else(|| DecodeError::InvalidTimerKind {
        record,
        value: kind_field.to_string(),
    })?;

    let work_field = fields.next().unwrap_or_default();
    let work = decode_time(work_field).ok_or_else(|| DecodeError::InvalidDuration {
        record,
        value: work_field.to_string(),
    })?;

    let mut timer = TimerConfig::new(kind, work);

    let rest_field = fields.next().unwrap_or_default();
    if !rest_field.trim().is_empty() {
        let rest = decode_time(rest_field).ok_or_else(|| DecodeError::InvalidDuration {
            record,
            value: rest_field.to_string(),
        })?;
        timer.rest_duration = Some(rest);
    }

    let rounds_field = fields.next().unwrap_or_default();
    if !rounds_field.trim().is_empty() {
        let rounds = rounds_field
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|rounds| *rounds > 0)
            .ok_or_else(|| DecodeError::InvalidRounds {
                record,
                value: rounds_field.to_string(),
            })?;
        timer.total_rounds = Some(rounds);
    }

    // Older links stop after the rounds field
    let description_field = fields.next().unwrap_or_default();
    if !description_field.is_empty() {
        let description = urlencoding::decode(description_field)
            .map(|text| text.into_owned())
            .unwrap_or_else(|_| description_field.to_string());
        timer.description = Some(description);
    }

    Ok(timer)
}

fn decode_time(field: &str) -> Option<TimeSpec> {
    let (minutes, seconds) = field.split_once(PAIR_SEPARATOR)?;
    let minutes = minutes.trim().parse::<u32>().ok()?;
    let seconds = seconds.trim().parse::<u32>().ok()?;
    Some(TimeSpec::new(minutes, seconds)).filter(TimeSpec::in_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LifecycleState;
    use assert_matches::assert_matches;

    fn sample() -> Vec<TimerConfig> {
        vec![
            TimerConfig::count_up(TimeSpec::new(1, 0)),
            TimerConfig::count_down(TimeSpec::new(0, 45)).with_description("plank; then rest"),
            TimerConfig::interval(TimeSpec::new(0, 20), TimeSpec::new(0, 10), 8),
            TimerConfig::fixed_rounds(TimeSpec::new(2, 5), 3).with_description("5 pull-ups | 10 push-ups"),
        ]
    }

    #[test]
    fn encodes_records_in_order() {
        let encoded = encode(&sample()[..3]);
        assert_eq!(
            encoded,
            "stopwatch|1,0|||;countdown|0,45|||plank%3B%20then%20rest;tabata|0,20|0,10|8|"
        );
    }

    #[test]
    fn round_trips_everything_but_session_fields() {
        let original = sample();
        let decoded = decode(&encode(&original)).unwrap();
        assert_eq!(decoded.len(), original.len());
        for (before, after) in original.iter().zip(&decoded) {
            assert_eq!(after.kind, before.kind);
            assert_eq!(after.work_duration, before.work_duration);
            assert_eq!(after.rest_duration, before.rest_duration);
            assert_eq!(after.total_rounds, before.total_rounds);
            assert_eq!(after.description, before.description);
            assert_ne!(after.id, before.id);
            assert_eq!(after.lifecycle_state, LifecycleState::Idle);
            assert!(!after.skipped);
        }
    }

    #[test]
    fn empty_input_is_empty_list() {
        assert_eq!(encode(&[]), "");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn accepts_four_field_records() {
        let decoded = decode("xy|1,0||10").unwrap();
        assert_eq!(decoded[0].kind, TimerKind::FixedRounds);
        assert_eq!(decoded[0].total_rounds, Some(10));
        assert_eq!(decoded[0].description, None);
    }

    #[test]
    fn rejects_unknown_kind() {
        assert_matches!(
            decode("bogus|1,2|| |"),
            Err(DecodeError::InvalidTimerKind { record: 0, .. })
        );
    }

    #[test]
    fn rejects_out_of_range_seconds() {
        assert_matches!(
            decode("countdown|1,75||| "),
            Err(DecodeError::InvalidDuration { .. })
        );
        assert_matches!(
            decode("tabata|0,20|0,60|8|"),
            Err(DecodeError::InvalidDuration { .. })
        );
        assert_matches!(decode("countdown|-1,0|||"), Err(DecodeError::InvalidDuration { .. }));
        assert_matches!(decode("countdown"), Err(DecodeError::InvalidDuration { .. }));
    }

    #[test]
    fn rejects_minutes_past_the_hour() {
        assert_matches!(
            decode("countdown|61,0|||"),
            Err(DecodeError::InvalidDuration { record: 0, ref value }) if value == "61,0"
        );
        assert_matches!(decode("tabata|0,20|999,0|8|"), Err(DecodeError::InvalidDuration { .. }));
        assert_eq!(decode("countdown|60,59|||").unwrap()[0].work_duration, TimeSpec::new(60, 59));
    }

    #[test]
    fn huge_round_counts_do_not_overflow() {
        let decoded = decode("xy|60,59||4294967295|;tabata|60,59|60,59|4294967295|").unwrap();
        assert_eq!(decoded[0].total_rounds, Some(u32::MAX));
        assert_eq!(decoded[0].nominal_ms(), 3_659_000 * u64::from(u32::MAX));
        assert_eq!(decoded[1].nominal_ms(), 2 * 3_659_000 * u64::from(u32::MAX));
    }

    #[test]
    fn rejects_zero_or_garbage_rounds() {
        assert_matches!(decode("countdown|1,0||0|"), Err(DecodeError::InvalidRounds { .. }));
        assert_matches!(decode("xy|1,0||many|"), Err(DecodeError::InvalidRounds { .. }));
        assert!(decode("countdown|1,0|||").is_ok());
    }

    #[test]
    fn fails_whole_list_on_later_bad_record() {
        let result = decode("countdown|0,30|||;stopwatch|0,30|||;xy|0,99||3|");
        assert_matches!(result, Err(DecodeError::InvalidDuration { record: 2, .. }));
    }
}
