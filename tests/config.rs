use realtime_plot::{PlotterConfig, RestartPolicy, SeriesSelector};

#[test]
fn defaults_select_z_of_anthineas() {
    let cfg = PlotterConfig::default();
    assert_eq!(cfg.selector.label(), "z(Anthineas)");
    assert_eq!(cfg.color, Some(1));
    assert_eq!(cfg.restart, RestartPolicy::Strict);
    assert_eq!(cfg.max_points, None);
}

#[test]
fn partial_yaml_keeps_other_defaults() {
    let cfg = PlotterConfig::from_yaml_str(
        "selector: {variable: phi, entity: boat}\nrestart: non_increasing\nmax_points: 300\n",
    )
    .unwrap();
    assert_eq!(cfg.selector, SeriesSelector::new("phi", "boat"));
    assert_eq!(cfg.restart, RestartPolicy::NonIncreasing);
    assert_eq!(cfg.max_points, Some(300));
    assert_eq!(cfg.color, Some(1));
    assert_eq!(cfg.title, PlotterConfig::default().title);
}

#[test]
fn null_color_disables_display_attribute() {
    let cfg = PlotterConfig::from_yaml_str("color: null\n").unwrap();
    assert_eq!(cfg.color, None);
}

#[test]
fn unknown_restart_policy_is_an_error() {
    assert!(PlotterConfig::from_yaml_str("restart: sometimes\n").is_err());
}

#[test]
fn load_reports_missing_file() {
    let err = PlotterConfig::load(std::path::Path::new("/nonexistent/plot.yml")).unwrap_err();
    assert!(err.to_string().contains("plot.yml"));
}
