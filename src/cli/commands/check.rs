//! Check command - verify the build artifacts the bootloader depends on

use crate::artifacts::check_dist;
use crate::cli::args::CheckArgs;
use crate::config::Config;
use crate::error::AppshellResult;
use crate::ui::{self, UiContext};

/// Execute the check command
pub async fn execute(args: CheckArgs, config: &Config) -> AppshellResult<()> {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "appshell check");
    ui::key_value(&ctx, "Build output", &args.dist.display().to_string());
    ui::key_value(&ctx, "Shadow document", &config.boot.shadow_document);

    let report = check_dist(&args.dist, &config.boot.shadow_document).await?;
    for finding in &report.findings {
        ui::finding(&ctx, finding);
    }

    let passed = report.passed();
    let message = if passed {
        "Artifacts are consistent"
    } else {
        "Artifacts are inconsistent"
    };
    ui::outro(&ctx, passed, message);
    report.into_result()
}
