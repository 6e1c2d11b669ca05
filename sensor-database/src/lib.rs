//! Storage and validation for air quality measurements.
pub mod database;
pub mod memory_database;
pub mod postgrest_database;
pub mod time;
pub mod types;
pub mod validation;

use clap::Args;
use std::fmt::{Display, Formatter};

pub const DATABASE_TARGET: &str = "database";

/// Connection options for the hosted measurements table.
#[derive(Args, Debug, Clone)]
pub struct PostgrestArgs {
    #[clap(long, env = "SUPABASE_URL", requires = "supabase_key")]
    #[clap(help = "PostgREST endpoint of the hosted table, in memory storage when missing")]
    pub supabase_url: Option<String>,
    #[clap(long, env = "SUPABASE_KEY", hide_env_values = true)]
    #[clap(help = "Key sent as apikey and bearer token")]
    pub supabase_key: Option<String>,
    #[clap(long, env = "TABLE_NAME", default_value = "measurements")]
    #[clap(help = "Measurements table name")]
    pub table_name: String,
}

impl Display for PostgrestArgs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "supabase_url {} \
            supabase_key ***** \
            table_name {}",
            self.supabase_url.as_deref().unwrap_or("<none>"),
            self.table_name,
        )
    }
}
