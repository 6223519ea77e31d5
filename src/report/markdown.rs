use crate::report::statistics::Statistics;
use chrono::{DateTime, Utc};
use std::fmt::Write;

pub struct MarkdownOptions {
    pub title: String,
    pub top_properties: usize,
    pub top_components: usize,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            title: "Components CSS Analysis Report".to_string(),
            top_properties: 20,
            top_components: 15,
        }
    }
}

/// Renders the human-readable summary report.
pub fn render_summary(
    stats: &Statistics,
    options: &MarkdownOptions,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    // write! 到 String 不會失敗
    let _ = write_summary(&mut out, stats, options, generated_at);
    out
}

fn write_summary(
    out: &mut String,
    stats: &Statistics,
    options: &MarkdownOptions,
    generated_at: DateTime<Utc>,
) -> std::fmt::Result {
    let metadata = &stats.metadata;

    writeln!(out, "# {}\n", options.title)?;
    writeln!(out, "_Generated {}_\n", generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;

    writeln!(out, "## Overview")?;
    writeln!(out, "- **Total Components**: {}", metadata.total_components)?;
    writeln!(out, "- **Components with Styles**: {}", metadata.components_with_styles)?;
    writeln!(
        out,
        "- **Components without Styles**: {}",
        metadata.components_without_styles()
    )?;
    writeln!(out, "- **Total CSS Properties Found**: {}", metadata.total_css_properties)?;
    writeln!(out, "- **CSS Custom Properties (tokens)**: {}", stats.custom_property_count)?;
    writeln!(out, "- **Vendor Prefixed Properties**: {}\n", stats.vendor_prefixed_count)?;

    writeln!(out, "## CSS Properties Analysis\n")?;
    writeln!(out, "### Most Used CSS Properties")?;
    for (i, (property, count)) in stats.top_properties(options.top_properties).iter().enumerate() {
        let percentage = if metadata.components_with_styles > 0 {
            *count as f64 / metadata.components_with_styles as f64 * 100.0
        } else {
            0.0
        };
        writeln!(
            out,
            "{:2}. **{}**: {} components ({:.1}%)",
            i + 1,
            property,
            count,
            percentage
        )?;
    }
    writeln!(out)?;

    writeln!(out, "### CSS Custom Properties (Design Tokens)")?;
    if stats.design_tokens.is_empty() {
        writeln!(out, "No CSS custom properties found in component styles.\n")?;
    } else {
        for (category, tokens) in &stats.design_tokens {
            writeln!(out, "\n**{}**:", category)?;
            for token in tokens {
                writeln!(out, "- `{}`", token)?;
            }
        }
        writeln!(
            out,
            "\n**Total Custom Properties Found**: {}\n",
            stats.referenced_token_count()
        )?;
    }

    writeln!(out, "## Component Complexity Analysis\n")?;
    writeln!(out, "### Most Complex Components (by CSS rule count)")?;
    for (i, (name, rules)) in stats.complexity.iter().take(options.top_components).enumerate() {
        writeln!(out, "{:2}. **{}**: {} CSS rules", i + 1, name, rules)?;
    }
    writeln!(out)?;

    writeln!(out, "### Components with Most CSS Property Diversity")?;
    for (i, (name, properties)) in stats.diversity.iter().take(options.top_components).enumerate() {
        writeln!(out, "{:2}. **{}**: {} unique CSS properties", i + 1, name, properties)?;
    }
    writeln!(out)?;

    if !stats.components_without_styles.is_empty() {
        writeln!(out, "### Components Without Styles")?;
        for name in &stats.components_without_styles {
            writeln!(out, "- {}", name)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "## CSS Property Categories\n")?;
    for (label, properties) in stats.categories.non_empty() {
        writeln!(out, "**{}** ({}): {}\n", label, properties.len(), properties.join(", "))?;
    }

    writeln!(out, "## Component Organization\n")?;
    for (directory, entries) in &stats.directories {
        let styled = entries.iter().filter(|entry| entry.has_styles).count();
        writeln!(
            out,
            "**{}/** ({}/{} with styles)",
            directory,
            styled,
            entries.len()
        )?;
        for entry in entries {
            let status = if entry.has_styles { "✓" } else { "○" };
            writeln!(out, "  {} {}", status, entry.component)?;
        }
        writeln!(out)?;
    }

    Ok(())
}
