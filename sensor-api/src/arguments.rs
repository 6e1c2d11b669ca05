//! Program arguments and application state.
use clap::Parser;
use sensor_database::PostgrestArgs;
use std::{
    fmt::{self, Display, Formatter},
    path::{Path, PathBuf},
};

/// Command line arguments. Every option can also be set from the environment.
#[derive(Parser, Clone)]
#[clap(about, version, author)]
pub struct ProgramArgs {
    #[clap(flatten)]
    pub database_opts: PostgrestArgs,
    #[clap(long, env = "API_KEY", hide_env_values = true)]
    #[clap(help = "Shared secret expected in the x-api-key header")]
    pub api_key: String,
    #[clap(long, env = "PORT", default_value_t = 3000)]
    #[clap(help = "Port to listen on")]
    pub port: u16,
    #[clap(long, env = "STATIC_DIR", default_value = "public")]
    #[clap(help = "Directory holding the api test page")]
    pub static_dir: PathBuf,
    #[clap(long, requires = "server_tls_cert_file")]
    #[clap(help = "ssl tls key file")]
    pub server_tls_key_file: Option<PathBuf>,
    #[clap(long, requires = "server_tls_key_file")]
    #[clap(help = "ssl tls certificate file")]
    pub server_tls_cert_file: Option<PathBuf>,
}

impl ProgramArgs {
    /// Certificate and key files when TLS is configured.
    pub fn tls_files(&self) -> Option<(&PathBuf, &PathBuf)> {
        self.server_tls_cert_file
            .as_ref()
            .zip(self.server_tls_key_file.as_ref())
    }
}

impl Display for ProgramArgs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} api_key ***** port {} static_dir {:?} tls {}",
            self.database_opts,
            self.port,
            self.static_dir,
            self.tls_files().is_some()
        )
    }
}

/// Application State.
#[derive(Clone)]
pub struct AppConfig {
    api_key: String,
    static_dir: PathBuf,
}

impl AppConfig {
    /// Create a new application config state.
    pub fn new(api_key: impl Into<String>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_key: api_key.into(),
            static_dir: static_dir.into(),
        }
    }

    /// Check a client supplied key against the configured secret.
    pub fn accepts_key(&self, key: &str) -> bool {
        self.api_key == key
    }

    /// Get a reference to the static files directory.
    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
}

impl From<&ProgramArgs> for AppConfig {
    fn from(args: &ProgramArgs) -> Self {
        Self::new(args.api_key.clone(), args.static_dir.clone())
    }
}
