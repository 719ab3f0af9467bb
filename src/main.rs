use tracing::{error, info, warn};

use tutorlink::{AccountRepository, Config, Database, RelationRepository, Variant};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    // Load configuration
    let mut config = match Config::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {CONFIG_PATH}: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = tutorlink::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        tutorlink::logging::init_console_only(&config.logging.level);
    }

    info!("tutorlink - student/tutor hiring service");

    if let Err(e) = run(&config).await {
        error!(error = %e, "Startup failed");
        std::process::exit(1);
    }
}

async fn run(config: &Config) -> tutorlink::Result<()> {
    let db = Database::open(&config.database.path).await?;
    info!(
        path = %config.database.path,
        schema_version = db.schema_version().await?,
        "Database ready"
    );

    let accounts = AccountRepository::new(db.pool());
    let students = accounts.count(Variant::Student).await?;
    let tutors = accounts.count(Variant::Tutor).await?;
    let relations = RelationRepository::new(db.pool()).count().await?;
    info!(students, tutors, relations, "Account summary");

    if students == 0 && tutors == 0 {
        warn!("No accounts registered yet");
    }

    db.close().await;
    Ok(())
}
