//! Terminal rendering of template check reports

use console::style;
use create_map_app::TemplateReport;

/// Print one template's pending changes and warnings.
pub fn print_template_report(report: &TemplateReport) {
    println!(
        "{} {}",
        style("Template:").bold(),
        style(report.template.name()).cyan().bold()
    );

    for warning in &report.warnings {
        println!("  {} {warning}", style("⚠").yellow().bold());
    }

    if !report.has_changes() {
        if report.warnings.is_empty() {
            println!("  {}", style("✓ Up to date").green());
        }
        println!();
        return;
    }

    for change in &report.package_changes {
        println!("  {}", style(change.dotted_path()).bold());
        if let Some(old) = &change.old_value {
            println!("    {} {old}", style("-").red());
        }
        println!("    {} {}", style("+").green(), change.new_value);
    }

    for file in &report.cdn_files {
        println!("  {}", style(file.path.display()).bold());
        for update in &file.updates {
            println!(
                "    {} {}/v{} {} v{} ({} occurrence{})",
                style("±").yellow(),
                update.fragment,
                style(&update.old_version).red(),
                style("→").dim(),
                style(&update.new_version).green(),
                update.occurrences,
                if update.occurrences == 1 { "" } else { "s" }
            );
        }
    }

    println!(
        "  {}",
        style(format!("{} pending change(s)", report.change_count())).dim()
    );
    println!();
}

/// Print the closing summary line for a batch of reports.
pub fn print_summary(reports: &[TemplateReport]) {
    let stale = reports.iter().filter(|r| r.has_changes()).count();
    if stale == 0 {
        println!("{}", style("🙌 All templates are up to date!").green().bold());
    } else {
        println!(
            "{}",
            style(format!("{stale} template(s) need updating")).yellow().bold()
        );
    }
}
