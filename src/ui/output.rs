//! Output functions for consistent CLI formatting

use super::context::UiContext;
use crate::artifacts::Finding;
use console::style;

/// Severity of a single reported step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Ok,
    Fail,
    Info,
}

impl Step {
    fn tag(self) -> String {
        match self {
            Self::Ok => style("[OK]").green().to_string(),
            Self::Fail => style("[FAIL]").red().to_string(),
            Self::Info => style("[INFO]").cyan().to_string(),
        }
    }
}

/// Display intro banner
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).cyan().bold()).ok();
    } else {
        println!("{}", style(title).cyan().bold());
        println!();
    }
}

/// Closing line, green when everything passed
pub fn outro(ctx: &UiContext, passed: bool, message: &str) {
    let styled = if passed {
        style(message).green().bold()
    } else {
        style(message).red().bold()
    };
    if ctx.use_fancy_output() {
        cliclack::outro(styled).ok();
    } else {
        let tag = if passed { Step::Ok.tag() } else { style("[ERROR]").red().to_string() };
        println!();
        println!("{} {}", tag, message);
    }
}

/// Display one step
pub fn step(ctx: &UiContext, level: Step, message: &str) {
    if ctx.use_fancy_output() {
        match level {
            Step::Ok => cliclack::log::success(message),
            Step::Fail => cliclack::log::error(message),
            Step::Info => cliclack::log::info(message),
        }
        .ok();
    } else {
        println!("  {} {}", level.tag(), message);
    }
}

/// Display an artifact check and, if it failed, why
pub fn finding(ctx: &UiContext, finding: &Finding) {
    match &finding.problem {
        None => step(ctx, Step::Ok, finding.check),
        Some(problem) => {
            let detail = if ctx.use_fancy_output() {
                style(problem).red().to_string()
            } else {
                problem.clone()
            };
            step(ctx, Step::Fail, &format!("{}: {}", finding.check, detail));
        }
    }
}

/// Display a remark/hint
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

/// Print key-value pair
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    if ctx.use_fancy_output() {
        println!("  {}: {}", style(key).dim(), value);
    } else {
        println!("  {}: {}", key, value);
    }
}
