use realtime_plot::{FieldError, Sample, SampleError, SeriesName};

#[test]
fn parses_yaml_block_document_in_order() {
    let parsed = Sample::parse("t: 0.2\nz(Anthineas): -1.5\nx(Anthineas): 3\n").unwrap();
    assert!(parsed.diagnostics.is_empty());

    let sample = parsed.sample;
    assert_eq!(sample.t, Some(0.2));
    let names: Vec<String> = sample.fields.iter().map(|f| f.name.to_string()).collect();
    assert_eq!(names, vec!["z(Anthineas)", "x(Anthineas)"]);
    assert_eq!(sample.get("x(Anthineas)"), Some(3.0));
    assert_eq!(sample.waves, None);
}

#[test]
fn parses_json_with_waves() {
    let parsed = Sample::parse(r#"{"t": 1, "Fx(gravity,ship,ship)": 9.81, "waves": {"z": "AA+>H"}}"#)
        .unwrap();
    let sample = parsed.sample;
    assert_eq!(sample.t, Some(1.0));
    assert_eq!(
        sample.fields[0].name,
        SeriesName::new("Fx", "gravity,ship,ship")
    );
    assert_eq!(sample.waves.map(|w| w.z), Some("AA+>H".to_string()));
}

#[test]
fn missing_time_leaves_t_empty() {
    let parsed = Sample::parse("{x(ship): 1}").unwrap();
    assert_eq!(parsed.sample.t, None);
    assert_eq!(parsed.sample.fields.len(), 1);
    assert!(parsed.diagnostics.is_empty());
}

#[test]
fn invalid_entries_become_diagnostics() {
    let parsed =
        Sample::parse("{t: soon, a(b): [1], 3: 4, waves: 12, ok(ship): 1000.5, '': 1}").unwrap();
    assert_eq!(parsed.sample.t, None);
    assert_eq!(parsed.sample.fields.len(), 1);
    assert_eq!(parsed.sample.get("ok(ship)"), Some(1000.5));

    let d = &parsed.diagnostics;
    assert_eq!(d.len(), 5);
    assert_eq!(d[0], FieldError::InvalidTime);
    assert_eq!(
        d[1],
        FieldError::NonNumeric {
            name: "a(b)".to_string()
        }
    );
    assert!(matches!(d[2], FieldError::InvalidName { .. }));
    assert!(matches!(d[3], FieldError::InvalidWaves { .. }));
    assert!(matches!(d[4], FieldError::InvalidName { .. }));
}

#[test]
fn non_mapping_documents_are_rejected() {
    assert!(matches!(Sample::parse("42"), Err(SampleError::NotAMapping)));
    assert!(matches!(Sample::parse("{a: [}"), Err(SampleError::Parse(_))));
}
