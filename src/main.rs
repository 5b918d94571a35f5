use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use log::{error, info};
use realtime_plot::{channel_samples, feed_documents, run_plotter, PlotterConfig};

// Live plot of telemetry samples.
//
// Input: one sample per line as JSON/flow YAML, e.g.
//   {"t": 0.1, "x(ship)": 0.0, "z(ship)": -0.2}
// or block YAML documents separated by blank lines or `---`.
//
// Usage:
//   realtime-plot [--config plot.yml] [--variable z] [--entity ship] [INPUT]
//
// INPUT defaults to stdin.

const USAGE: &str =
    "usage: realtime-plot [--config FILE] [--variable NAME] [--entity NAME] [INPUT]";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config: Option<PathBuf>,
    variable: Option<String>,
    entity: Option<String>,
    input: Option<PathBuf>,
}

impl CliArgs {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self, String> {
        let mut out = CliArgs::default();
        while let Some(arg) = args.next() {
            let mut value = |flag: &str| args.next().ok_or_else(|| format!("{flag} needs a value"));
            match arg.as_str() {
                "--config" => out.config = Some(PathBuf::from(value("--config")?)),
                "--variable" => out.variable = Some(value("--variable")?),
                "--entity" => out.entity = Some(value("--entity")?),
                s if s.starts_with("--") => return Err(format!("unknown option {s}")),
                _ if out.input.is_none() => out.input = Some(PathBuf::from(&arg)),
                _ => return Err(format!("unexpected argument {arg}")),
            }
        }
        Ok(out)
    }

    fn into_config(self) -> Result<(PlotterConfig, Option<PathBuf>), String> {
        let mut cfg = match &self.config {
            Some(path) => PlotterConfig::load(path).map_err(|e| e.to_string())?,
            None => PlotterConfig::default(),
        };
        if let Some(variable) = self.variable {
            cfg.selector.variable = variable;
        }
        if let Some(entity) = self.entity {
            cfg.selector.entity = entity;
        }
        Ok((cfg, self.input))
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (cfg, input) = match CliArgs::parse(std::env::args().skip(1)).and_then(CliArgs::into_config)
    {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            std::process::exit(2);
        }
    };
    info!("plotting {}", cfg.selector.label());

    let (sink, rx) = channel_samples();

    // Reader thread: forward every document to the UI, which drains the channel each frame.
    std::thread::spawn(move || {
        let reader: Box<dyn BufRead> = match &input {
            Some(path) => match File::open(path) {
                Ok(f) => Box::new(BufReader::new(f)),
                Err(e) => {
                    error!("cannot open {}: {e}", path.display());
                    return;
                }
            },
            None => Box::new(BufReader::new(std::io::stdin())),
        };
        match feed_documents(reader, &sink) {
            Ok(n) => info!("input finished after {n} samples"),
            Err(e) => error!("read error: {e}"),
        }
    });

    run_plotter(rx, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_selector_overrides_and_input() {
        let cli = CliArgs::parse(args(&["--variable", "x", "--entity", "boat", "run.yml"])).unwrap();
        assert_eq!(cli.variable.as_deref(), Some("x"));
        assert_eq!(cli.entity.as_deref(), Some("boat"));
        assert_eq!(cli.input, Some(PathBuf::from("run.yml")));

        let (cfg, input) = cli.into_config().unwrap();
        assert_eq!(cfg.selector.label(), "x(boat)");
        assert_eq!(input, Some(PathBuf::from("run.yml")));
    }

    #[test]
    fn rejects_missing_flag_value_and_unknown_options() {
        assert!(CliArgs::parse(args(&["--entity"])).is_err());
        assert!(CliArgs::parse(args(&["--fast"])).is_err());
        assert!(CliArgs::parse(args(&["a", "b"])).is_err());
    }
}
