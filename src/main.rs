//! ion-init - one-shot MongoDB bootstrap for the Ion patient records service

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ion_init::{
    config::Args,
    db::{schemas::PatientDoc, MongoClient},
    fixtures,
    provision::{self, RoleGrant, UserSpec},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ion_init={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration
    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // Print startup banner
    info!("======================================");
    info!("  ion-init - Ion database bootstrap");
    info!("  build {} ({})", env!("GIT_COMMIT_SHORT"), env!("BUILD_TIMESTAMP"));
    info!("======================================");
    info!("MongoDB: {}", args.mongodb_uri);
    info!("Database: {}", args.db);
    info!("App user: {} ({} on {})", args.app_user, args.app_role, args.db);
    info!("Collection: {} (capped: false)", args.collection);
    info!("Mode: {}", if args.strict { "STRICT" } else { "IDEMPOTENT" });
    info!("Seed fixtures: {}", args.seed_fixtures);
    info!("======================================");

    // The administrative connection is the only shared resource; every
    // step below uses it sequentially and aborts the run on failure.
    let mongo = match MongoClient::new(&args.mongodb_uri, &args.db).await {
        Ok(client) => client,
        Err(e) => {
            error!("MongoDB connection failed: {}", e);
            std::process::exit(1);
        }
    };
    let db = mongo.database();

    let user_spec = UserSpec {
        username: args.app_user.clone(),
        password: args.app_password.clone(),
        roles: vec![RoleGrant {
            role: args.app_role.clone(),
            db: args.db.clone(),
        }],
    };
    let user_outcome = match provision::user::provision(&db, &user_spec, args.strict).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("User provisioning failed: {}", e);
            std::process::exit(1);
        }
    };

    let collection_outcome =
        match provision::collection::provision::<PatientDoc>(&db, &args.collection, args.strict)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Collection provisioning failed: {}", e);
                std::process::exit(1);
            }
        };

    let mut seeded = 0;
    if args.seed_fixtures {
        seeded = match fixtures::populate(&db, &args.collection).await {
            Ok(count) => count,
            Err(e) => {
                error!("Fixture seeding failed: {}", e);
                std::process::exit(1);
            }
        };
    }

    info!("======================================");
    info!("User '{}': {}", args.app_user, user_outcome);
    info!("Collection '{}': {}", args.collection, collection_outcome);
    if args.seed_fixtures {
        info!("Fixture patients inserted: {}", seeded);
    }
    info!("Bootstrap complete");

    Ok(())
}
