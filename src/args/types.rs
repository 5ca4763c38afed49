use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The sqlite database file. Created if it does not exist.
    #[arg(
        short = 'n',
        long,
        value_name = "DATABASE_NAME",
        env = "CADDIE_DB_NAME",
        default_value = "golf_caddie.db"
    )]
    pub db_name: String,
    /// If specified, this sql is run on program startup, after the schema. Separate several files with ';'.
    #[arg(long, value_name = "DATABASE_STARTUP_SCRIPT", value_parser = crate::args::validation::check_readable_file)]
    pub db_startup_script: Option<String>,

    #[arg(short = 'b', long, value_name = "ADDRESS", default_value = "0.0.0.0")]
    pub bind: String,
    #[arg(short = 'p', long, value_name = "PORT", env = "CADDIE_PORT", default_value = "8000")]
    pub port: u16,
    /// Directory served under /static.
    #[arg(long, value_name = "DIR", default_value = "./static")]
    pub static_dir: String,

    /// Without a key the app runs, but every caddie request reports an error.
    #[arg(long, value_name = "KEY", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,
    #[arg(long, value_name = "MODEL", env = "AI_MODEL_NAME", default_value = crate::caddie::DEFAULT_MODEL)]
    pub ai_model: String,
    #[arg(long, value_name = "URL", env = "AI_BASE_URL", default_value = crate::caddie::DEFAULT_BASE_URL)]
    pub ai_base_url: String,
    #[arg(long, value_name = "SECONDS", default_value = "60")]
    pub ai_timeout_secs: u64,
    /// Largest image accepted from an upload or camera capture.
    #[arg(long, value_name = "BYTES", default_value = "10485760")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub db_name: String,
    pub db_startup_script: Option<String>,
    pub combined_sql_script: String,
    pub bind: String,
    pub port: u16,
    pub static_dir: String,
    pub openai_api_key: Option<String>,
    pub ai_model: String,
    pub ai_base_url: String,
    pub ai_timeout_secs: u64,
    pub max_upload_bytes: usize,
}
