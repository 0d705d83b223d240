use clap::Parser;
use inspection_map::core::{ConfigProvider, MapPresenter, Pipeline};
use inspection_map::utils::{logger, validation::Validate};
use inspection_map::{
    CliConfig, FilePresenter, HttpTransport, InspectionPipeline, LocalStorage, MapError, MapSession,
    MapView, OutputFormat, StaticLocationProvider, TomlConfig, TracingPresenter,
};

#[tokio::main]
async fn main() {
    let args = CliConfig::parse();

    // Initialize logging before anything can fail
    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting inspection-map");

    // A config file replaces the command-line options wholesale
    let result = match args.config.clone() {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(config) => run(config).await,
                Err(e) => Err(e),
            }
        }
        None => run(args).await,
    };

    match result {
        Ok(view) => {
            tracing::info!("Map ready with {} markers", view.markers.len());
            println!("Placed {} markers around {}", view.markers.len(), view.center);
        }
        Err(e) => {
            // Full detail goes to the log
            tracing::error!(
                "Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            // One user-visible notification per failed run.
            eprintln!("{}", e.user_friendly_message());

            std::process::exit(e.exit_code());
        }
    }
}

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<MapView, MapError> {
    // Reject bad settings before any request goes out
    config.validate()?;
    tracing::debug!(
        "Endpoint {}, keeping {} records, excluding {:?}",
        config.endpoint(),
        config.max_records(),
        config.excluded_risks()
    );

    // Build the collaborators; the pipeline takes ownership of the config
    let location = StaticLocationProvider::new(config.last_known_location());
    let transport = HttpTransport::from_config(&config)?;
    let zoom = config.zoom();
    let location_timeout = config.location_timeout();
    let format = config.output_format();
    let storage = LocalStorage::new(config.output_path());
    let pipeline = InspectionPipeline::new(transport, config);

    // Presenter types differ, so each arm runs its own session
    match format {
        OutputFormat::Log => {
            present(pipeline, location, TracingPresenter, zoom, location_timeout).await
        }
        format => {
            let presenter = FilePresenter::new(storage, format)?;
            present(pipeline, location, presenter, zoom, location_timeout).await
        }
    }
}

async fn present<P: Pipeline, M: MapPresenter>(
    pipeline: P,
    location: StaticLocationProvider,
    presenter: M,
    zoom: f32,
    location_timeout: std::time::Duration,
) -> Result<MapView, MapError> {
    MapSession::new(pipeline, location, presenter, zoom)
        .with_location_timeout(location_timeout)
        .run()
        .await
}
