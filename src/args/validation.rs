use std::{fs, path::PathBuf};

use super::types::Args;

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<String, String> {
    // split by semi-colon
    let files = file.split(';').map(str::trim).filter(|f| !f.is_empty());
    for file in files {
        let path = PathBuf::from(file);
        if !path.is_file() || fs::metadata(&path).is_err() {
            return Err(format!("The sql startup script '{file}' is not readable."));
        }
    }
    Ok(file.to_string())
}

impl Args {
    /// Check the settings clap cannot check on its own.
    ///
    /// # Errors
    ///
    /// Will return `Err` describing the first invalid setting
    pub fn validate(&mut self) -> Result<(), String> {
        if self.db_name.trim().is_empty() {
            return Err("A database name is required".to_string());
        }
        if self.port == 0 {
            return Err("Port must be between 1 and 65535".to_string());
        }
        let base = self.ai_base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(format!(
                "AI base url '{base}' must start with http:// or https://"
            ));
        }
        if self.ai_timeout_secs == 0 {
            return Err("AI timeout must be at least one second".to_string());
        }
        if self.max_upload_bytes == 0 {
            return Err("Max upload size must be positive".to_string());
        }
        if self
            .openai_api_key
            .as_deref()
            .is_some_and(|k| k.trim().is_empty())
        {
            self.openai_api_key = None;
        }
        Ok(())
    }
}
