//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use prboard::dashboard::BadgeCounts;
use prboard::{DisplayRecord, IntakeError, Settings, SettingsColumn, Tab};
use serde_json::json;
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";

/// Writes the selected tab as an aligned table of the enabled columns.
///
/// # Errors
///
/// Returns [`IntakeError::Io`] when writing fails.
pub fn write_table<W: Write>(
    writer: &mut W,
    settings: &Settings,
    tab: Tab,
    badges: BadgeCounts,
    records: &[&DisplayRecord],
) -> Result<(), IntakeError> {
    writeln!(
        writer,
        "{} ({}) | {} ({})",
        Tab::Active.title(),
        badges.active,
        Tab::Drafts.title(),
        badges.drafts
    )
    .map_err(|e| io_error(&e))?;
    writeln!(writer, "Showing: {}", tab.title()).map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    if records.is_empty() {
        writeln!(writer, "No pull requests to show.").map_err(|e| io_error(&e))?;
        return Ok(());
    }

    let columns: Vec<SettingsColumn> = settings.enabled_columns().collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| columns.iter().map(|&column| cell(record, column)).collect())
        .collect();
    let headings: Vec<String> = columns
        .iter()
        .map(|column| column.heading().to_owned())
        .collect();
    let widths = column_widths(&headings, &rows);

    write_row(writer, &headings, &widths)?;
    for row in &rows {
        write_row(writer, row, &widths)?;
    }
    Ok(())
}

/// Writes one JSON object per record.
///
/// # Errors
///
/// Returns [`IntakeError::Io`] when writing fails.
pub fn write_json_lines<W: Write>(
    writer: &mut W,
    records: &[&DisplayRecord],
) -> Result<(), IntakeError> {
    for record in records {
        writeln!(writer, "{}", record_json(record)).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes the column settings that are now stored.
///
/// # Errors
///
/// Returns [`IntakeError::Io`] when writing fails.
pub fn write_settings_summary<W: Write>(
    writer: &mut W,
    project: &str,
    settings: &Settings,
) -> Result<(), IntakeError> {
    writeln!(writer, "Column settings for {project}:").map_err(|e| io_error(&e))?;
    for column in SettingsColumn::ALL {
        let state = if settings.is_enabled(column) {
            "enabled"
        } else {
            "disabled"
        };
        writeln!(writer, "  {column}: {state}").map_err(|e| io_error(&e))?;
    }
    Ok(())
}

fn cell(record: &DisplayRecord, column: SettingsColumn) -> String {
    match column {
        SettingsColumn::Details => format!(
            "#{} {} ({} -> {})",
            record.id, record.title, record.base_branch, record.target_branch
        ),
        SettingsColumn::Author => record.author.display_name.clone(),
        SettingsColumn::Created => record.creation_date.format("%Y-%m-%d %H:%M").to_string(),
        SettingsColumn::Repository => record.repository.name.clone(),
        SettingsColumn::Comments => record.open_thread_count().to_string(),
        SettingsColumn::BuildStatus => record.build_status.label().to_owned(),
        SettingsColumn::MyVote => record.vote.label().to_owned(),
        SettingsColumn::Reviewers => record
            .reviewers
            .iter()
            .map(|reviewer| reviewer.identity.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn column_widths(headings: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    headings
        .iter()
        .enumerate()
        .map(|(position, heading)| {
            rows.iter()
                .filter_map(|row| row.get(position))
                .chain(std::iter::once(heading))
                .map(|value| UnicodeWidthStr::width(value.as_str()))
                .max()
                .unwrap_or_default()
        })
        .collect()
}

fn write_row<W: Write>(
    writer: &mut W,
    cells: &[String],
    widths: &[usize],
) -> Result<(), IntakeError> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(value, &width)| pad_to_width(value, width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    writeln!(writer, "{}", line.trim_end()).map_err(|e| io_error(&e))
}

/// Pads `value` with spaces to `width` terminal columns.
fn pad_to_width(value: &str, width: usize) -> String {
    let padding = width.saturating_sub(UnicodeWidthStr::width(value));
    format!("{value}{}", " ".repeat(padding))
}

fn record_json(record: &DisplayRecord) -> serde_json::Value {
    let reviewers: Vec<serde_json::Value> = record
        .reviewers
        .iter()
        .map(|reviewer| {
            json!({
                "id": reviewer.identity.id,
                "display_name": reviewer.identity.display_name,
                "vote": reviewer.vote,
                "is_required": reviewer.is_required,
            })
        })
        .collect();

    json!({
        "id": record.id,
        "title": record.title,
        "is_draft": record.is_draft,
        "author": record.author.display_name,
        "created": record.creation_date.to_rfc3339(),
        "repository": record.repository.name,
        "source_branch": record.base_branch,
        "target_branch": record.target_branch,
        "open_comments": record.open_thread_count(),
        "build_status": record.build_status.label(),
        "build_id": record.build_id,
        "my_vote": record.vote.label(),
        "reviewers": reviewers,
        "web_url": record.web_url,
    })
}

fn io_error(error: &io::Error) -> IntakeError {
    IntakeError::Io {
        message: error.to_string(),
    }
}
