//! Link management commands
//!
//! These run against the data file directly, without a running server.

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::LinkService;

pub async fn list_links(service: &LinkService) -> Result<(), CliError> {
    let links = service.list().await;

    if links.is_empty() {
        println!("{} No short links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Short link list:".bold().green());
    println!();
    for link in &links {
        let mut info_parts = vec![format!(
            "{} -> {}",
            link.record.short_code.cyan(),
            link.record.original.blue().underline()
        )];

        if link.clicks > 0 {
            info_parts.push(
                format!("(clicks: {})", link.clicks)
                    .dimmed()
                    .cyan()
                    .to_string(),
            );
        }

        println!("  {}", info_parts.join(" "));
    }
    println!();
    println!(
        "{} Total {} short links",
        "ℹ".bold().blue(),
        links.len().to_string().green()
    );
    Ok(())
}

pub async fn add_link(
    service: &LinkService,
    url: String,
    code: Option<String>,
) -> Result<(), CliError> {
    let generated = code.as_deref().is_none_or(str::is_empty);
    let result = service.shorten(Some(&url), code.as_deref()).await?;

    if generated {
        println!(
            "{} Generated random code: {}",
            "ℹ".bold().blue(),
            result.record.short_code.magenta()
        );
    }

    println!(
        "{} Added short link: {} -> {}",
        "✓".bold().green(),
        result.short_url.cyan(),
        result.record.original.blue().underline()
    );
    Ok(())
}

pub async fn delete_link(service: &LinkService, short_code: String) -> Result<(), CliError> {
    let removed = service.delete(&short_code).await?;

    println!(
        "{} Deleted short link: {}",
        "✓".bold().green(),
        removed.short_code.cyan()
    );
    Ok(())
}

pub async fn show_stats(service: &LinkService, short_code: String) -> Result<(), CliError> {
    let stats = service.get_stats(&short_code).await?;

    println!("{}", stats.short_url.bold().cyan());
    println!("  {} {}", "Target:".bold(), stats.record.original.blue().underline());
    println!(
        "  {} {}",
        "Created:".bold(),
        crate::storage::models::iso_millis::format(&stats.record.created)
    );
    println!("  {} {}", "Clicks:".bold(), stats.stats.clicks.to_string().green());
    println!(
        "  {} {}",
        "Last access:".bold(),
        stats
            .stats
            .last_access
            .as_ref()
            .map(crate::storage::models::iso_millis::format)
            .unwrap_or_else(|| "never".to_string())
            .dimmed()
    );
    println!("  {} {}", "Top referrer:".bold(), stats.top_referrer.yellow());

    for (referrer, count) in &stats.stats.referrers {
        println!("    {} {}", referrer, format!("({})", count).dimmed());
    }
    Ok(())
}

pub async fn cleanup_links(service: &LinkService, days: Option<u32>) -> Result<(), CliError> {
    let result = service.cleanup(days).await?;

    println!(
        "{} {} old URLs were removed (cutoff: {})",
        "✓".bold().green(),
        result.deleted.to_string().cyan(),
        crate::storage::models::iso_millis::format(&result.cutoff).dimmed()
    );
    Ok(())
}
