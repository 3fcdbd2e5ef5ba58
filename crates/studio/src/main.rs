use massing_studio_lib::command::execute_json_batch;
use massing_studio_lib::export::import_json;
use massing_studio_lib::state::StudioStore;

/// Command line options
#[derive(Default)]
struct Args {
    model: Option<String>,
    commands: Option<String>,
    data_dir: Option<String>,
    no_save: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "massing_studio=info,massing_studio_lib=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args();
    let store = match &args.data_dir {
        Some(dir) => Some(StudioStore::in_dir(dir)),
        None => StudioStore::platform(),
    };
    let mut state = store.as_ref().map(StudioStore::load_state).unwrap_or_default();

    if let Some(path) = &args.model {
        match std::fs::read_to_string(path) {
            Ok(json) => match import_json(&json) {
                Ok(model) => {
                    tracing::info!("Loaded model from {path} ({} masses)", model.masses.len());
                    state.load_model(model);
                }
                Err(e) => {
                    tracing::error!("Failed to parse model JSON from {path}: {e}");
                    std::process::exit(1);
                }
            },
            Err(e) => {
                tracing::error!("Failed to read model file {path}: {e}");
                std::process::exit(1);
            }
        }
    }

    let mut responses = Vec::new();
    if let Some(path) = &args.commands {
        let replayed = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read command file {path}: {e}"))
            .and_then(|json| execute_json_batch(&mut state, &json));
        match replayed {
            Ok(r) => {
                let failed = r.iter().filter(|resp| !resp.success).count();
                tracing::info!("Replayed {} commands ({failed} failed)", r.len());
                responses = r;
            }
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        }
    }

    if let Some(store) = store.as_ref().filter(|_| !args.no_save) {
        if let Err(e) = store.save_state(&state) {
            tracing::warn!("Failed to save studio state: {e}");
        }
    }

    let output = serde_json::json!({
        "model": state.model(),
        "report": state.report(),
        "responses": responses,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            tracing::error!("Failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--model" if i + 1 < args.len() => {
                parsed.model = Some(args[i + 1].clone());
                i += 1;
            }
            "--commands" if i + 1 < args.len() => {
                parsed.commands = Some(args[i + 1].clone());
                i += 1;
            }
            "--data-dir" if i + 1 < args.len() => {
                parsed.data_dir = Some(args[i + 1].clone());
                i += 1;
            }
            "--no-save" => parsed.no_save = true,
            other => tracing::warn!("Ignoring argument {other}"),
        }
        i += 1;
    }
    parsed
}
