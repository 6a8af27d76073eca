//! Security Config

use clap::Args;

/// Request forgery protection settings.
#[derive(Debug, Args)]
pub struct SecurityConfig {
    /// 32-byte key signing CSRF cookies; random per process when unset
    #[arg(long, env = "CSRF_SECRET", hide_env_values = true)]
    pub csrf_secret: Option<String>,
}
