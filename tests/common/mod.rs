use std::sync::Arc;

use tawreed::config::{EnvConfig, OtpConfig, CONFIG};
use tawreed::db::database_service::DatabaseService;
use tempdir::TempDir;

pub mod client;
pub mod multipart;

pub const ADMIN_KEY: &str = "test-admin-key";
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024;
pub const PASSWORD: &str = "password123";

pub struct TestContext {
    pub db: Arc<DatabaseService>,
    _dir: TempDir,
}

impl TestContext {
    pub async fn new() -> TestContext {
        CONFIG.get_or_init(get_test_config);

        let dir = TempDir::new("tawreed").expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());

        let db = Arc::new(
            DatabaseService::new(&db_url)
                .await
                .expect("Failed to initialize DatabaseService"),
        );

        TestContext { db, _dir: dir }
    }
}

pub fn get_test_config() -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: "test".to_string(), // Not used in tests
        admin_key: ADMIN_KEY.to_string(),
        max_upload_bytes: MAX_UPLOAD_BYTES,
        expiry_sweep_secs: 0,
        otp: OtpConfig::disabled(),
    }
}
