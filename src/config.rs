use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::warn;

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub admin_key: String,
    /// Per-file cap for proposal attachments.
    pub max_upload_bytes: usize,
    /// 0 disables the background expiry sweep.
    pub expiry_sweep_secs: u64,
    pub otp: OtpConfig,
}

#[derive(Clone, Debug)]
pub struct OtpConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: String,
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    fn get_env_or<T: FromStr>(key: &str, default: T) -> T {
        match env::var(key) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Invalid value for {key}, using default");
                default
            }),
            Err(_) => default,
        }
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let otp_enabled = Self::get_env_or("OTP_ENABLED", false);
        let otp = if otp_enabled {
            OtpConfig {
                enabled: true,
                endpoint: Self::get_env("OTP_ENDPOINT"),
                api_key: Self::get_env("OTP_API_KEY"),
            }
        } else {
            OtpConfig::disabled()
        };

        EnvConfig {
            port: Self::get_env_or("PORT", 8080),
            db_url: Self::get_env("DATABASE_URL"),
            admin_key: Self::get_env("ADMIN_KEY"),
            max_upload_bytes: Self::get_env_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
            expiry_sweep_secs: Self::get_env_or("EXPIRY_SWEEP_SECS", 0),
            otp,
        }
    }
}

impl OtpConfig {
    pub fn disabled() -> Self {
        OtpConfig {
            enabled: false,
            endpoint: String::new(),
            api_key: String::new(),
        }
    }
}

pub static CONFIG: OnceLock<EnvConfig> = OnceLock::new();

pub fn config() -> &'static EnvConfig {
    CONFIG.get().expect("Not initialized")
}
