use clap::Parser;
use std::fs;
use tracing::warn;

pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs};

/// Parse and validate the command line.
///
/// # Errors
///
/// Will return `Err` if the arguments are invalid
pub fn args_checks() -> Result<CleanArgs, String> {
    let mut xx = Args::parse();
    xx.validate()?;
    Ok(CleanArgs::new(xx))
}

impl CleanArgs {
    #[must_use]
    pub fn new(args: Args) -> Self {
        let mut combined_sql_script = String::new();
        if let Some(db_startup_script) = &args.db_startup_script {
            for file in db_startup_script.split(';') {
                let file = file.trim();
                if file.is_empty() {
                    continue;
                }

                match fs::read_to_string(file) {
                    Ok(script) => {
                        combined_sql_script.push_str(&script);
                        // push a newline just in case
                        combined_sql_script.push('\n');
                    }
                    Err(e) => {
                        warn!("Failed to read SQL startup script '{file}': {e}");
                    }
                }
            }
        }
        CleanArgs {
            db_name: args.db_name,
            db_startup_script: args.db_startup_script,
            combined_sql_script,
            bind: args.bind,
            port: args.port,
            static_dir: args.static_dir,
            openai_api_key: args.openai_api_key,
            ai_model: args.ai_model,
            ai_base_url: args.ai_base_url,
            ai_timeout_secs: args.ai_timeout_secs,
            max_upload_bytes: args.max_upload_bytes,
        }
    }
}
