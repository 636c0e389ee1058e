//! plant-viewer entry point: CLI wiring and config-driven session construction.

use std::process;

use env_logger::Env;

use plant_viewer::cli::{self, CliOptions};
use plant_viewer::config::ViewerConfig;
use plant_viewer::io::export::export_manifest_csv;
use plant_viewer::library::JsonLibrary;
use plant_viewer::reporting::{print_dropped, print_metadata, print_scene};
use plant_viewer::session::ViewerSession;
use plant_viewer::store::DirSlotStore;

fn load_config(cli: &CliOptions) -> ViewerConfig {
    let config = match &cli.config {
        Some(path) => ViewerConfig::from_toml_file(path).unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        }),
        None => ViewerConfig::default(),
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

fn main() {
    let cli = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });
    if cli.help {
        cli::print_usage();
        return;
    }

    let config = load_config(&cli);
    env_logger::Builder::from_env(Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    let library = JsonLibrary::new(
        cli.json_dir
            .clone()
            .unwrap_or_else(|| config.library.dir.clone()),
    );

    if cli.list {
        match library.list() {
            Ok(files) if files.is_empty() => {
                println!("No JSON files in {}", library.dir().display());
            }
            Ok(files) => {
                for f in files {
                    println!("{}", f.name);
                }
            }
            Err(e) => {
                eprintln!("error: failed to list {}: {e}", library.dir().display());
                process::exit(1);
            }
        }
        return;
    }

    if cli.serve {
        serve(&cli, &config, library);
        return;
    }

    let mut visibility = config.visibility;
    for &category in &cli.hide {
        visibility.set(category, false);
    }
    let mut session = ViewerSession::new(visibility).with_slot(config.storage.slot.clone());
    let mut store = DirSlotStore::new(config.storage.dir.clone());

    if cli.tui {
        run_tui(&cli, library, store, session);
        return;
    }

    // Load: an explicit source replaces the slot, otherwise restore it
    match &cli.source {
        Some(source) => {
            if let Err(e) = session.load(source, &library, &mut store) {
                eprintln!("error: {e}");
                if e.is_invalid_input() {
                    eprintln!("Expected a .json file holding a plant document.");
                }
                process::exit(1);
            }
        }
        None => match session.restore(&store) {
            Ok(Some(_)) => {}
            Ok(None) => {
                eprintln!("No plant data loaded. Use --plant <path> or --select <name>.");
                process::exit(1);
            }
            Err(e) => {
                eprintln!("error: failed to read stored plant data: {e}");
                process::exit(1);
            }
        },
    }

    let scene = session.scene();
    print_scene(&scene);
    if let Some(loaded) = session.current() {
        print_dropped(&loaded.plant.dropped);
        if cli.metadata {
            print_metadata(loaded.plant.metadata.as_ref());
        }
    }

    if let Some(ref path) = cli.export {
        if let Err(e) = session.export_to_path(path) {
            eprintln!("error: failed to export plant data: {e}");
            process::exit(1);
        }
        eprintln!("Plant data written to {}", path.display());
    }

    if let Some(ref path) = cli.manifest_out {
        if let Err(e) = export_manifest_csv(&scene.drawables, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Scene manifest written to {}", path.display());
    }
}

#[cfg(feature = "api")]
fn serve(cli: &CliOptions, config: &ViewerConfig, library: JsonLibrary) {
    use std::sync::Arc;

    let mut server = config.server.clone();
    if let Some(port) = cli.port {
        server.port = port;
    }
    let addr = server.socket_addr().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let state = Arc::new(plant_viewer::api::AppState { library });
    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    if let Err(e) = rt.block_on(plant_viewer::api::serve(state, addr)) {
        eprintln!("error: API server on {addr} failed: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "api"))]
fn serve(_cli: &CliOptions, _config: &ViewerConfig, _library: JsonLibrary) {
    eprintln!("error: --serve requires the `api` feature");
    process::exit(1);
}

#[cfg(feature = "tui")]
fn run_tui(cli: &CliOptions, library: JsonLibrary, store: DirSlotStore, session: ViewerSession) {
    use plant_viewer::tui::{self, App};

    let mut app = App::new(library, Box::new(store), session);
    if let Some(ref path) = cli.export {
        app = app.with_export_path(path);
    }
    if let Some(ref source) = cli.source {
        app.open(source);
    }
    if let Err(e) = tui::run(app) {
        eprintln!("error: TUI crashed: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn run_tui(_cli: &CliOptions, _library: JsonLibrary, _store: DirSlotStore, _session: ViewerSession) {
    eprintln!("error: --tui requires the `tui` feature");
    process::exit(1);
}
