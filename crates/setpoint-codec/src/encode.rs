//! Mailbox wire-format encoding.
//!
//! The wire format is a UTF-8 bracketed literal: `[t, v1, v2, ..., vn]`.
//! Encoders always emit the plain form; only decoders tolerate foreign
//! annotation wrappers.

/// Encode a value sequence as a bracketed literal.
///
/// Floats print in their shortest round-tripping form, so
/// `decode(&encode(values))` recovers `values` exactly.
pub fn encode(values: &[f64]) -> String {
    let body = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{body}]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::decode;

    #[test]
    fn formats_bracketed_comma_separated() {
        assert_eq!(encode(&[0.0, 1.5, 2.0]), "[0, 1.5, 2]");
        assert_eq!(encode(&[-0.25]), "[-0.25]");
        assert_eq!(encode(&[]), "[]");
    }

    #[test]
    fn round_trips_through_decode() {
        let values = vec![3.0, -1.5, 0.001, 12345.6789];
        assert_eq!(decode(&encode(&values)).unwrap(), values);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decode_inverts_encode(values in proptest::collection::vec(-1.0e9..1.0e9f64, 0..16)) {
                let decoded = decode(&encode(&values)).unwrap();
                prop_assert_eq!(decoded, values);
            }
        }
    }
}
