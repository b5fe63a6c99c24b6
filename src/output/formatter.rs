use std::io::IsTerminal;

use owo_colors::OwoColorize;
use unicode_width::UnicodeWidthStr;

use crate::scoring::{Classification, Deficit, EventScore, Evaluation, Tier};
use crate::standards::{EventStandard, StandardsTable};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format points with two decimals.
/// If incomplete is true, appends asterisk to indicate missing inputs were scored as 0
pub fn format_points(score: f64, incomplete: bool) -> String {
    if incomplete {
        format!("{:.2}*", score)
    } else {
        format!("{:.2}", score)
    }
}

/// Raw measurement with its unit, without trailing zeros ("8.3s", "221kg")
fn format_measurement(value: f64, unit: &str) -> String {
    format!("{}{}", value, unit)
}

fn paint_tier(tier: Tier, text: &str, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match tier {
        Tier::StrongPass => text.green().bold().to_string(),
        Tier::LikelyPass => text.yellow().bold().to_string(),
        Tier::UnlikelyPass => text.red().bold().to_string(),
    }
}

/// Pad to a terminal column width; Hangul and other wide glyphs count as 2
fn pad_right(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn pad_left(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", " ".repeat(fill), text)
}

/// One line per event: name, measurement, points out of max
pub fn format_event_score(event: &EventScore, use_colors: bool) -> String {
    let measurement = if event.supplied {
        format_measurement(event.performance, &event.unit)
    } else {
        "(not entered)".to_string()
    };
    // Pad before styling so escape codes do not count toward column width
    let name = pad_right(&event.name, 20);
    let measurement = pad_left(&measurement, 14);
    let points = format!("{:>7.2} / {}", event.score, event.max_score);

    if use_colors {
        let measurement = if event.supplied {
            measurement
        } else {
            measurement.dimmed().to_string()
        };
        format!("  {} {}  {}", name.bold(), measurement, points)
    } else {
        format!("  {} {}  {}", name, measurement, points)
    }
}

fn format_deficit(deficit: &Deficit, use_colors: bool) -> String {
    let status = if deficit.is_satisfied() {
        if use_colors {
            "met".green().to_string()
        } else {
            "met".to_string()
        }
    } else {
        match deficit.grades_needed {
            Some(grades) => format!(
                "{:.2} points short (about {} grade{} at ~8.5 points each)",
                deficit.deficit,
                grades,
                if grades == 1 { "" } else { "s" }
            ),
            None => format!("{:.2} points short", deficit.deficit),
        }
    };
    format!("  {} ({}): {}", deficit.cutoff_label, deficit.cutoff, status)
}

/// Tier line followed by one line per cutoff
pub fn format_classification(classification: &Classification, use_colors: bool) -> String {
    let tier = paint_tier(classification.tier, classification.tier.label(), use_colors);
    let mut lines = vec![format!(
        "Result: {} ({:.2} points)",
        tier, classification.total_score
    )];
    lines.extend(
        classification
            .deficits
            .iter()
            .map(|d| format_deficit(d, use_colors)),
    );
    lines.join("\n")
}

/// Full report for one candidate
pub fn format_evaluation(evaluation: &Evaluation, use_colors: bool) -> String {
    let header = format!("{} ({})", evaluation.university, evaluation.gender);
    let mut lines = vec![if use_colors {
        header.cyan().bold().to_string()
    } else {
        header
    }];

    lines.push(String::new());
    lines.push("Practical events".to_string());
    lines.extend(
        evaluation
            .events
            .iter()
            .map(|e| format_event_score(e, use_colors)),
    );
    lines.push(String::new());

    lines.push(format!(
        "Practical total: {} / {}",
        format_points(evaluation.practical_total, evaluation.incomplete),
        evaluation.practical_max
    ));
    lines.push(format!(
        "Academic score:  {} / {}",
        evaluation.academic_score, evaluation.naesin_max
    ));
    lines.push(format!(
        "Total:           {} / {}",
        format_points(evaluation.total, evaluation.incomplete),
        evaluation.max_total
    ));
    lines.push(String::new());
    lines.push(format_classification(&evaluation.classification, use_colors));

    if evaluation.incomplete {
        lines.push(String::new());
        let note = "* events marked (not entered) were scored as a raw value of 0";
        lines.push(if use_colors {
            note.dimmed().to_string()
        } else {
            note.to_string()
        });
    }

    lines.join("\n")
}

fn format_standard(event: &EventStandard) -> String {
    let direction = if event.decreasing { "lower is better" } else { "higher is better" };
    format!(
        "    {:<22} {:<16} standard {}, max {}, -{} per {} ({})",
        event.id,
        event.name,
        format_measurement(event.standard, &event.unit),
        event.max_score,
        event.score_per_grade,
        format_measurement(event.per_grade, &event.unit),
        direction
    )
}

/// Human-readable dump of every university and its event standards
pub fn format_standards(table: &StandardsTable, use_colors: bool) -> String {
    if table.universities().is_empty() {
        return "No universities configured.".to_string();
    }

    table
        .universities()
        .iter()
        .map(|uni| {
            let title = format!("{} [{}]", uni.name, uni.id);
            let mut lines = vec![
                if use_colors {
                    title.bold().to_string()
                } else {
                    title
                },
                format!(
                    "  academic max {}, likely pass >= {}, strong pass >= {}",
                    uni.naesin_max, uni.pass_good_cutoff, uni.pass_excellent_cutoff
                ),
            ];
            for gender in uni.genders() {
                lines.push(format!(
                    "  {} (practical max {})",
                    gender,
                    uni.practical_max(gender)
                ));
                lines.extend(uni.events(gender).iter().map(format_standard));
            }
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
