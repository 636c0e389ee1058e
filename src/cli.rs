use std::env;
use std::path::PathBuf;

use crate::model::Category;
use crate::session::PlantSource;

pub struct CliOptions {
    pub source: Option<PlantSource>,
    pub list: bool,
    pub json_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub hide: Vec<Category>,
    pub export: Option<PathBuf>,
    pub manifest_out: Option<PathBuf>,
    pub metadata: bool,
    pub serve: bool,
    pub port: Option<u16>,
    pub tui: bool,
    pub help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut plant = None;
    let mut select = None;
    let mut opts = CliOptions {
        source: None,
        list: false,
        json_dir: None,
        config: None,
        hide: Vec::new(),
        export: None,
        manifest_out: None,
        metadata: false,
        serve: false,
        port: None,
        tui: false,
        help: false,
    };

    while i < args.len() {
        match args[i].as_str() {
            "--plant" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --plant (expected a JSON file path)",
                )?;
                if plant.replace(PathBuf::from(path)).is_some() {
                    return Err("--plant provided more than once".to_string());
                }
            }
            "--select" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --select (expected a library file name)",
                )?;
                if select.replace(name.to_string()).is_some() {
                    return Err("--select provided more than once".to_string());
                }
            }
            "--json-dir" => {
                i += 1;
                let dir = args.next_or_err(i, "missing value for --json-dir (expected a directory)")?;
                opts.json_dir = Some(PathBuf::from(dir));
            }
            "--config" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --config (expected a TOML file)")?;
                opts.config = Some(PathBuf::from(path));
            }
            "--hide" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --hide (expected buildings, equipment, silos or markers)",
                )?;
                let category: Category = name.parse()?;
                if !opts.hide.contains(&category) {
                    opts.hide.push(category);
                }
            }
            "--export" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --export (expected a file path)")?;
                opts.export = Some(PathBuf::from(path));
            }
            "--manifest-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --manifest-out (expected a file path)",
                )?;
                opts.manifest_out = Some(PathBuf::from(path));
            }
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let port = raw
                    .parse::<u16>()
                    .ok()
                    .filter(|p| *p > 0)
                    .ok_or_else(|| format!("--port value \"{raw}\" is not a valid port"))?;
                opts.port = Some(port);
            }
            "--list" => opts.list = true,
            "--metadata" => opts.metadata = true,
            "--serve" => opts.serve = true,
            "--tui" => opts.tui = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    opts.source = match (plant, select) {
        (Some(_), Some(_)) => {
            return Err(
                "arguments `--plant` and `--select` are mutually exclusive; choose one source"
                    .to_string(),
            );
        }
        (Some(path), None) => Some(PlantSource::Upload(path)),
        (None, Some(name)) => Some(PlantSource::Library(name)),
        (None, None) => None,
    };

    if opts.serve && opts.tui {
        return Err("arguments `--serve` and `--tui` are mutually exclusive".to_string());
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("plant-viewer - coal plant layout viewer");
    eprintln!();
    eprintln!("Usage: plant-viewer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --plant <path>           Load a local plant JSON file");
    eprintln!("  --select <name>          Load a file from the JSON library");
    eprintln!("  --list                   List the JSON library and exit");
    eprintln!("  --json-dir <dir>         Library directory (default: json-files)");
    eprintln!("  --config <path>          Load settings from a TOML file");
    eprintln!("  --hide <category>        Hide buildings, equipment, silos or markers");
    eprintln!("  --export <path>          Write the loaded document as JSON");
    eprintln!("  --manifest-out <path>    Write the composed scene as CSV");
    eprintln!("  --metadata               Print the document metadata panel");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start the HTTP API");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Open the terminal viewer");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("Without --plant or --select, the last loaded document is restored.");
}

#[cfg(test)]
mod tests {
    use super::parse_args_from;
    use crate::model::Category;
    use crate::session::PlantSource;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn supports_plant_cli() {
        let opts = parse_args_from(args(&["--plant", "plant.json", "--metadata"]))
            .expect("parse should succeed");
        assert_eq!(
            opts.source,
            Some(PlantSource::Upload("plant.json".into()))
        );
        assert!(opts.metadata);
    }

    #[test]
    fn supports_select_cli() {
        let opts = parse_args_from(args(&["--select", "unit1.json", "--json-dir", "plants"]))
            .expect("parse should succeed");
        assert_eq!(opts.source, Some(PlantSource::Library("unit1.json".into())));
        assert_eq!(
            opts.json_dir.as_deref().and_then(|p| p.to_str()),
            Some("plants")
        );
    }

    #[test]
    fn plant_and_select_are_exclusive() {
        let err = parse_args_from(args(&["--plant", "a.json", "--select", "b.json"]));
        assert!(err.is_err());
    }

    #[test]
    fn hide_is_repeatable() {
        let opts = parse_args_from(args(&["--hide", "silos", "--hide", "marker", "--hide", "silo"]))
            .expect("parse should succeed");
        assert_eq!(opts.hide, [Category::Silo, Category::Marker]);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_args_from(args(&["--hide", "pipes"])).is_err());
        assert!(parse_args_from(args(&["--port", "0"])).is_err());
        assert!(parse_args_from(args(&["--plant"])).is_err());
        assert!(parse_args_from(args(&["--frobnicate"])).is_err());
    }
}
