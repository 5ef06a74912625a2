//! Configuration for ion-init
//!
//! CLI arguments and environment variable handling using clap. Defaults
//! reproduce the development literals the Ion deployment was originally
//! initialized with, so a bare run needs no configuration at all.

use clap::Parser;

use crate::db::schemas::PATIENT_COLLECTION;

/// Per-database builtin roles the application user may be granted
const BUILTIN_DB_ROLES: &[&str] = &["read", "readWrite", "dbAdmin", "dbOwner", "userAdmin"];

/// ion-init - one-shot MongoDB bootstrap for the Ion patient records service
#[derive(Parser, Debug, Clone)]
#[command(name = "ion-init")]
#[command(about = "Provision the Ion database: application user, patients collection, fixtures")]
pub struct Args {
    /// MongoDB connection URI for the administrative connection
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// Target database; also the scope of the application user's role grant
    #[arg(long, env = "BOOTSTRAP_DB", default_value = "ion")]
    pub db: String,

    /// Username of the application account to create
    #[arg(long, env = "BOOTSTRAP_USER", default_value = "dev_user")]
    pub app_user: String,

    /// Password of the application account to create
    #[arg(long, env = "BOOTSTRAP_PASSWORD", default_value = "dev_pass")]
    pub app_password: String,

    /// Role granted to the application account on the target database
    #[arg(long, env = "BOOTSTRAP_ROLE", default_value = "readWrite")]
    pub app_role: String,

    /// Collection to create in the target database
    #[arg(long, env = "BOOTSTRAP_COLLECTION", default_value = PATIENT_COLLECTION)]
    pub collection: String,

    /// Fail when the user or collection already exists instead of
    /// treating it as already provisioned
    #[arg(long, env = "STRICT", default_value = "false")]
    pub strict: bool,

    /// Insert the development fixture patients after provisioning
    #[arg(long, env = "SEED_FIXTURES", default_value = "false")]
    pub seed_fixtures: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.db.is_empty() {
            return Err("BOOTSTRAP_DB must not be empty".to_string());
        }

        if self.app_user.is_empty() {
            return Err("BOOTSTRAP_USER must not be empty".to_string());
        }

        if self.app_password.is_empty() {
            return Err("BOOTSTRAP_PASSWORD must not be empty".to_string());
        }

        if self.collection.is_empty() {
            return Err("BOOTSTRAP_COLLECTION must not be empty".to_string());
        }

        if !BUILTIN_DB_ROLES.contains(&self.app_role.as_str()) {
            return Err(format!(
                "BOOTSTRAP_ROLE must be one of {} (got '{}')",
                BUILTIN_DB_ROLES.join(", "),
                self.app_role
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_deployment() {
        let args = Args::try_parse_from(["ion-init"]).unwrap();

        assert_eq!(args.db, "ion");
        assert_eq!(args.app_user, "dev_user");
        assert_eq!(args.app_password, "dev_pass");
        assert_eq!(args.app_role, "readWrite");
        assert_eq!(args.collection, "patients");
        assert!(!args.strict);
        assert!(!args.seed_fixtures);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_names() {
        for flag in ["--db", "--app-user", "--app-password", "--collection"] {
            let args = Args::try_parse_from(["ion-init", flag, ""]).unwrap();
            assert!(args.validate().is_err(), "{flag} should reject empty");
        }
    }

    #[test]
    fn test_accepts_all_builtin_db_roles() {
        for role in BUILTIN_DB_ROLES {
            let args = Args::try_parse_from(["ion-init", "--app-role", role]).unwrap();
            assert!(args.validate().is_ok(), "{role} should validate");
        }
    }

    #[test]
    fn test_rejects_cluster_scoped_role() {
        let args = Args::try_parse_from(["ion-init", "--app-role", "clusterAdmin"]).unwrap();
        let err = args.validate().unwrap_err();
        assert!(err.contains("BOOTSTRAP_ROLE"));
    }
}
