//! The interactive menu loop.
//!
//! Generic over its input and output so tests can script a whole session.
//! End of input at any prompt behaves like choosing Exit.

use super::print::{
    write_edit_list, write_header, write_messages, write_record_line, write_section,
    write_statistics, write_warning,
};
use mistakes::api::Journal;
use mistakes::commands::RecordEdit;
use mistakes::error::TrackerError;
use mistakes::index::RecordSelector;
use mistakes::store::RecordStore;
use mistakes::validate::validate_field;
use std::io::{self, BufRead, Write};

pub struct Shell<'a, S: RecordStore, R: BufRead, W: Write> {
    journal: &'a mut Journal<S>,
    input: R,
    output: W,
}

/// Whether the menu loop should keep going.
enum Flow {
    Continue,
    Quit,
}

impl<'a, S: RecordStore, R: BufRead, W: Write> Shell<'a, S, R, W> {
    pub fn new(journal: &'a mut Journal<S>, input: R, output: W) -> Self {
        Self {
            journal,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write_header(&mut self.output)?;

            let Some(choice) = self.read_line("Choose (1-4): ")? else {
                return self.farewell();
            };

            let flow = match choice.trim() {
                "1" => self.cmd_add()?,
                "2" => self.cmd_view()?,
                "3" => self.cmd_edit_delete()?,
                "4" => return self.farewell(),
                _ => {
                    write_warning(&mut self.output, "Invalid choice.")?;
                    Flow::Continue
                }
            };

            if let Flow::Quit = flow {
                return self.farewell();
            }
        }
    }

    fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nGoodbye!\n")?;
        self.output.flush()
    }

    /// Prompts and reads one line without its line ending. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Re-prompts until the value passes validation.
    fn read_field(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let max = self.journal.config().max_input_len;
        loop {
            let Some(raw) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match validate_field(&raw, max) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => write_warning(&mut self.output, &format!("Invalid input: {}.", e))?,
            }
        }
    }

    fn cmd_add(&mut self) -> io::Result<Flow> {
        write_section(&mut self.output, "Add New Mistake")?;

        let Some(subject) = self.read_field("Subject: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(mistake) = self.read_field("Mistake: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(fix) = self.read_field("Fix: ")? else {
            return Ok(Flow::Quit);
        };

        match self.journal.add(&subject, &mistake, &fix) {
            Ok(result) => write_messages(&mut self.output, &result.messages)?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn cmd_view(&mut self) -> io::Result<Flow> {
        write_section(&mut self.output, "View Mistakes")?;

        if self.journal.records().is_empty() {
            let result = self.journal.view("");
            write_messages(&mut self.output, &result.messages)?;
            return Ok(Flow::Continue);
        }

        let Some(keyword) = self.read_line("Filter by keyword (Enter to skip): ")? else {
            return Ok(Flow::Quit);
        };

        let result = self.journal.view(&keyword);
        if result.listed_records.is_empty() {
            write_messages(&mut self.output, &result.messages)?;
            return Ok(Flow::Continue);
        }

        let total = result.listed_records.len();
        write_statistics(&mut self.output, total, &result.statistics)?;

        writeln!(self.output, "\nAll Mistakes")?;
        writeln!(self.output, "{}", "━".repeat(50))?;

        let page_size = self.journal.config().page_size.max(1);
        for (page, chunk) in result.listed_records.chunks(page_size).enumerate() {
            for (offset, dr) in chunk.iter().enumerate() {
                write_record_line(&mut self.output, page * page_size + offset + 1, &dr.record)?;
            }
            if (page + 1) * page_size < total
                && self.read_line("\nPress Enter for more...")?.is_none()
            {
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn cmd_edit_delete(&mut self) -> io::Result<Flow> {
        if self.journal.records().is_empty() {
            writeln!(self.output, "No mistakes recorded.")?;
            return Ok(Flow::Continue);
        }

        write_section(&mut self.output, "Edit/Delete")?;
        write_edit_list(&mut self.output, &self.journal.indexed())?;

        let Some(choice) = self.read_line("\nChoose number (0 = cancel): ")? else {
            return Ok(Flow::Quit);
        };
        let choice = choice.trim();
        if choice.is_empty() || choice == "0" {
            return Ok(Flow::Continue);
        }

        let selector: RecordSelector = match choice.parse() {
            Ok(selector) => selector,
            Err(e) => {
                write_warning(&mut self.output, &e)?;
                return Ok(Flow::Continue);
            }
        };
        let current = match self.journal.get(&selector) {
            Ok(dr) => dr.record,
            Err(e) => {
                self.report(&e)?;
                return Ok(Flow::Continue);
            }
        };

        let Some(action) = self.read_line("(e)dit / (d)elete: ")? else {
            return Ok(Flow::Quit);
        };

        match action.trim().to_lowercase().as_str() {
            "d" => {
                let Some(confirm) = self.read_line("Confirm delete? (yes/no): ")? else {
                    return Ok(Flow::Quit);
                };
                if confirm.trim().eq_ignore_ascii_case("yes") {
                    match self.journal.delete(&selector) {
                        Ok(result) => write_messages(&mut self.output, &result.messages)?,
                        Err(e) => self.report(&e)?,
                    }
                } else {
                    writeln!(self.output, "Cancelled.")?;
                }
            }
            "e" => {
                writeln!(self.output, "Leave blank to keep current value.\n")?;
                let Some(subject) = self.read_line(&format!("Subject [{}]: ", current.subject))?
                else {
                    return Ok(Flow::Quit);
                };
                let Some(mistake) = self.read_line(&format!("Mistake [{}]: ", current.mistake))?
                else {
                    return Ok(Flow::Quit);
                };
                let Some(fix) = self.read_line(&format!("Fix [{}]: ", current.fix))? else {
                    return Ok(Flow::Quit);
                };

                let edit = RecordEdit {
                    subject: Some(subject),
                    mistake: Some(mistake),
                    fix: Some(fix),
                };
                match self.journal.edit(&selector, &edit) {
                    Ok(result) => write_messages(&mut self.output, &result.messages)?,
                    Err(e) => self.report(&e)?,
                }
            }
            _ => write_warning(&mut self.output, "Invalid choice.")?,
        }
        Ok(Flow::Continue)
    }

    fn report(&mut self, error: &TrackerError) -> io::Result<()> {
        write_warning(&mut self.output, &error.to_string())
    }
}
