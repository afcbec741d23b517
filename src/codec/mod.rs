//! # State Codec
//!
//! Turns a [`ControllerState`] into a short shareable code and back.
//!
//! ## Token Format
//! ```text
//! base64( zlib( color "," scale_percent "," label_0 "," ... "," label_18 ) )
//! ```
//! - Fields follow the registry order of [`Control::ALL`].
//! - A comma inside the color or a label is written as [`LABEL_PLACEHOLDER`] (U+0001)
//!   and turned back into a comma on decode.
//! - Trailing empty labels are dropped from the record; the decoder reads missing
//!   trailing fields as empty.
//! - zlib at the default level, then the standard padded base64 alphabet.
//!
//! ## Failure Handling
//! Decoding never panics. Empty input, invalid base64, streams that do not inflate
//! to UTF-8 text and records with too many fields are all reported as
//! [`CodecError`] so the caller can leave its state untouched.

pub mod error;

pub use error::CodecError;

use crate::controls::{Control, CONTROL_COUNT};
use crate::state::{ControllerState, LABEL_PLACEHOLDER};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::fmt;
use std::io::{Read, Write};

/// Field separator of the uncompressed record.
pub const DELIMITER: char = ',';

/// Number of fields in a complete record: color, scale and one per control.
pub const FIELD_COUNT: usize = CONTROL_COUNT + 2;

/// Opaque, shareable representation of a [`ControllerState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedToken(String);

impl EncodedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encodes a state into its canonical code.
pub fn encode(state: &ControllerState) -> Result<EncodedToken, CodecError> {
    let record = build_record(state);

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(record.as_bytes())
        .map_err(CodecError::Compress)?;
    let compressed = encoder.finish().map_err(CodecError::Compress)?;

    Ok(EncodedToken(STANDARD.encode(compressed)))
}

/// Decodes a code into a fresh state.
///
/// `previous` only supplies the scale when the scale field is not a number.
pub fn decode(token: &str, previous: &ControllerState) -> Result<ControllerState, CodecError> {
    if token.is_empty() {
        return Err(CodecError::EmptyToken);
    }

    let compressed = STANDARD.decode(token)?;
    let record = inflate(&compressed)?;
    parse_record(&record, previous)
}

/// Builds the uncompressed, delimited record for a state.
pub fn build_record(state: &ControllerState) -> String {
    let labels = state
        .labels()
        .map(|(_, label)| escape(label))
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{}{}{}{}{}",
        escape(state.color()),
        DELIMITER,
        state.scale_percent(),
        DELIMITER,
        labels.trim_end_matches(DELIMITER)
    )
}

/// Parses an uncompressed record.
///
/// Records with fewer fields than [`FIELD_COUNT`] are padded with empty labels;
/// records with more are rejected.
pub fn parse_record(
    record: &str,
    previous: &ControllerState,
) -> Result<ControllerState, CodecError> {
    let found = record.matches(DELIMITER).count() + 1;
    if found > FIELD_COUNT {
        return Err(CodecError::FieldCount {
            found,
            expected: FIELD_COUNT,
        });
    }

    // missing trailing fields read as empty
    let mut fields = record.split(DELIMITER).chain(std::iter::repeat(""));

    let color = unescape(fields.next().unwrap_or_default());
    let scale_percent = fields
        .next()
        .and_then(parse_scale)
        .unwrap_or_else(|| previous.scale_percent());

    let mut state = ControllerState::new(color, scale_percent);
    for (control, label) in Control::ALL.iter().zip(fields) {
        state = state.with_label(*control, unescape(label));
    }

    Ok(state)
}

/// Best-effort integer parse of the scale field.
///
/// Accepts integers and finite decimals (rounded). Anything else yields `None`.
pub fn parse_scale(field: &str) -> Option<i32> {
    let field = field.trim();
    if let Ok(value) = field.parse::<i32>() {
        return Some(value);
    }

    let value = field.parse::<f64>().ok().filter(|value| value.is_finite())?;
    Some(value.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32)
}

fn inflate(compressed: &[u8]) -> Result<String, CodecError> {
    let mut record = String::new();
    ZlibDecoder::new(compressed)
        .read_to_string(&mut record)
        .map_err(CodecError::Inflate)?;
    Ok(record)
}

fn escape(field: &str) -> String {
    field.replace(DELIMITER, &LABEL_PLACEHOLDER.to_string())
}

fn unescape(field: &str) -> String {
    field.replace(LABEL_PLACEHOLDER, &DELIMITER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_state() -> ControllerState {
        ControllerState::new("#ff0000", 40)
            .with_label(Control::A, "Jump")
            .with_label(Control::X, "Reload, fast")
    }

    fn token_for_record(record: &str) -> String {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(record.as_bytes()).unwrap();
        STANDARD.encode(encoder.finish().unwrap())
    }

    fn record_of(token: &EncodedToken) -> String {
        inflate(&STANDARD.decode(token.as_str()).unwrap()).unwrap()
    }

    #[test]
    fn test_example_round_trip() {
        let state = example_state();
        let token = encode(&state).unwrap();
        let decoded = decode(token.as_str(), &ControllerState::default()).unwrap();

        assert_eq!(decoded.label(Control::A), "Jump");
        assert_eq!(decoded.label(Control::X), "Reload, fast");
        assert_eq!(decoded.label(Control::B), "");
        assert_eq!(decoded.color(), "#ff0000");
        assert_eq!(decoded.scale_percent(), 40);
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_round_trip_every_label() {
        let state = Control::ALL.iter().fold(
            ControllerState::new("rgb(10, 20, 30)", 125),
            |state, control| {
                state.with_label(*control, format!("{} ,, über 🎮 ,", control.display_name()))
            },
        );
        let token = encode(&state).unwrap();
        assert_eq!(decode(token.as_str(), &ControllerState::default()).unwrap(), state);
    }

    #[test]
    fn test_commas_are_escaped_in_record() {
        let record = build_record(&example_state());
        assert_eq!(record, "#ff0000,40,Jump,,Reload\u{1} fast");
        assert_eq!(record.matches(DELIMITER).count(), 4);
    }

    #[test]
    fn test_empty_labels_keep_scale_delimiter() {
        let record = build_record(&ControllerState::new("#000000", 40));
        assert_eq!(record, "#000000,40,");
    }

    #[test]
    fn test_truncated_record_matches_full_record() {
        let state = example_state();
        let truncated = build_record(&state);
        let full = format!(
            "{}{}",
            truncated,
            ",".repeat(FIELD_COUNT - 1 - truncated.matches(',').count())
        );
        assert_eq!(full.matches(',').count(), FIELD_COUNT - 1);

        let previous = ControllerState::default();
        let from_truncated = decode(&token_for_record(&truncated), &previous).unwrap();
        let from_full = decode(&token_for_record(&full), &previous).unwrap();
        assert_eq!(from_truncated, from_full);
        assert_eq!(from_full, state);
    }

    #[test]
    fn test_color_only_record_pads_everything() {
        let previous = ControllerState::new("#ffffff", 65);
        let decoded = decode(&token_for_record("#abcdef"), &previous).unwrap();
        assert_eq!(decoded.color(), "#abcdef");
        assert_eq!(decoded.scale_percent(), 65);
        assert!(decoded.labels().all(|(_, label)| label.is_empty()));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let previous = example_state();
        assert!(matches!(decode("", &previous), Err(CodecError::EmptyToken)));
        assert!(matches!(decode("not base64!", &previous), Err(CodecError::Base64(_))));
        // "hello world" is valid base64 but not a zlib stream
        assert!(matches!(
            decode("aGVsbG8gd29ybGQ=", &previous),
            Err(CodecError::Inflate(_))
        ));
    }

    #[test]
    fn test_whitespace_is_not_tolerated() {
        let token = encode(&example_state()).unwrap();
        let padded = format!(" {}\n", token);
        assert!(decode(&padded, &ControllerState::default()).is_err());
    }

    #[test]
    fn test_too_many_fields_are_rejected() {
        let record = format!("#fff,40{}", ",x".repeat(CONTROL_COUNT + 1));
        let result = decode(&token_for_record(&record), &ControllerState::default());
        match result {
            Err(CodecError::FieldCount { found, expected }) => {
                assert_eq!(found, FIELD_COUNT + 1);
                assert_eq!(expected, FIELD_COUNT);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_scale_keeps_previous() {
        let previous = ControllerState::new("#fff", 85);
        let decoded = decode(&token_for_record("#000,huge,Jump"), &previous).unwrap();
        assert_eq!(decoded.scale_percent(), 85);
        assert_eq!(decoded.label(Control::A), "Jump");
    }

    #[test]
    fn test_parse_scale() {
        assert_eq!(parse_scale("40"), Some(40));
        assert_eq!(parse_scale(" -5 "), Some(-5));
        assert_eq!(parse_scale("62.5"), Some(63));
        assert_eq!(parse_scale(""), None);
        assert_eq!(parse_scale("NaN"), None);
        assert_eq!(parse_scale("inf"), None);
        assert_eq!(parse_scale("1e12"), Some(i32::MAX));
    }

    #[test]
    fn test_field_order_follows_registry() {
        let base = ControllerState::new("#00ff00", 40);
        let first = encode(&base.clone().with_label(Control::Lb, "Left")).unwrap();
        let second = encode(
            &base
                .with_label(Control::Lb, "Left")
                .with_label(Control::Rt, "Fire")
                .with_label(Control::DpadDown, "Crouch"),
        )
        .unwrap();

        let padded = |record: &str| -> Vec<String> {
            record
                .split(',')
                .chain(std::iter::repeat(""))
                .take(FIELD_COUNT)
                .map(str::to_owned)
                .collect()
        };
        let first = padded(&record_of(&first));
        let second = padded(&record_of(&second));

        let differing: Vec<usize> = (0..FIELD_COUNT)
            .filter(|i| first[*i] != second[*i])
            .collect();
        assert_eq!(
            differing,
            vec![Control::DpadDown.position() + 2, Control::Rt.position() + 2]
        );
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let state = example_state();
        assert_eq!(encode(&state).unwrap(), encode(&state).unwrap());
    }
}
