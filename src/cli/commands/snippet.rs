//! Snippet command - print the bootloader script tag

use crate::boot::bootloader_tag;
use crate::config::Config;
use crate::error::AppshellResult;

/// Execute the snippet command
pub async fn execute(config: &Config) -> AppshellResult<()> {
    println!("{}", bootloader_tag(&config.boot));
    Ok(())
}
