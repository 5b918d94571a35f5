use realtime_plot::decode::{decode, decode_f32s, encode_f32s};
use realtime_plot::{Base91Float32, DecodeError, WaveDecoder};

#[test]
fn decodes_known_float_payloads() {
    assert_eq!(decode_f32s("AAk_HAAAlBAARtA").unwrap(), vec![1.0, 2.0, 3.0]);
    assert_eq!(decode_f32s("AA/`XA1[AD").unwrap(), vec![-1.25, 1000.0]);
    assert_eq!(Base91Float32.decode("AA+>H").unwrap(), vec![0.5]);
}

#[test]
fn encoder_matches_known_payload() {
    assert_eq!(encode_f32s(&[1.0, 2.0, 3.0]), "AAk_HAAAlBAARtA");
}

#[test]
fn whitespace_is_ignored() {
    assert_eq!(decode_f32s(" AAk_H\nAAAlB AARtA ").unwrap(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn empty_payload_is_empty_array() {
    assert_eq!(decode_f32s("").unwrap(), Vec::<f32>::new());
}

#[test]
fn rejects_characters_outside_alphabet() {
    assert_eq!(
        decode("AB\\C"),
        Err(DecodeError::InvalidCharacter {
            character: '\\',
            position: 2
        })
    );
    assert!(matches!(
        decode("AAé"),
        Err(DecodeError::InvalidCharacter { character: 'é', .. })
    ));
}

#[test]
fn rejects_partial_floats() {
    // "#G(I" is the three bytes "abc".
    assert_eq!(decode("#G(I").unwrap(), b"abc");
    assert_eq!(
        decode_f32s("#G(I"),
        Err(DecodeError::TruncatedFloat { len: 3 })
    );
}
