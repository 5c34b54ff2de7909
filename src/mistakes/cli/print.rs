use colored::Colorize;
use mistakes::commands::{CmdMessage, MessageLevel, SubjectStat};
use mistakes::index::DisplayRecord;
use mistakes::model::Record;
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SUBJECT_WIDTH: usize = 20;
const RULE_WIDTH: usize = 40;

pub(super) fn write_header(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "╔══════════════════════════════════════╗")?;
    writeln!(out, "║           MISTAKE TRACKER            ║")?;
    writeln!(out, "╠══════════════════════════════════════╣")?;
    writeln!(out, "║  [1] Add New Mistake                 ║")?;
    writeln!(out, "║  [2] View Mistakes                   ║")?;
    writeln!(out, "║  [3] Edit/Delete                     ║")?;
    writeln!(out, "║  [4] Exit                            ║")?;
    writeln!(out, "╚══════════════════════════════════════╝")
}

pub(super) fn write_section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n━━━ {} ━━━", title.bold())
}

pub(super) fn write_messages(out: &mut impl Write, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", message.content.red())?,
        }
    }
    Ok(())
}

pub(super) fn write_warning(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", text.yellow())
}

pub(super) fn write_statistics(
    out: &mut impl Write,
    total: usize,
    stats: &[SubjectStat],
) -> io::Result<()> {
    writeln!(out, "\nStatistics (Total: {})", total)?;
    writeln!(out, "{}", "━".repeat(RULE_WIDTH))?;
    writeln!(out, "{:<20} │ {:>5} │ {:>6}", "Subject", "Count", "Rate")?;
    writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;

    for stat in stats {
        let subject = truncate_to_width(&title_case(&stat.subject), SUBJECT_WIDTH);
        let padding = SUBJECT_WIDTH.saturating_sub(subject.width());
        writeln!(
            out,
            "{}{} │ {:>5} │ {:>5.1}%",
            subject,
            " ".repeat(padding),
            stat.count,
            stat.percentage
        )?;
    }
    Ok(())
}

pub(super) fn write_record_line(out: &mut impl Write, number: usize, record: &Record) -> io::Result<()> {
    let id = record
        .id
        .as_deref()
        .map(|id| format!(" #{}", id).dimmed().to_string())
        .unwrap_or_default();
    writeln!(
        out,
        "{}. [{}] {} → {} ({}){}",
        number,
        title_case(&record.subject).yellow(),
        record.mistake,
        record.fix,
        record.date_string(),
        id
    )
}

pub(super) fn write_edit_list(out: &mut impl Write, records: &[DisplayRecord]) -> io::Result<()> {
    for dr in records {
        writeln!(
            out,
            "{}. [{}] {}",
            dr.index,
            title_case(&dr.record.subject).yellow(),
            dr.record.mistake
        )?;
    }
    Ok(())
}

/// Upper-cases the first letter of every word and lower-cases the rest.
pub(super) fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_is_alpha = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            result.push(c);
            prev_is_alpha = false;
        }
    }

    result
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
