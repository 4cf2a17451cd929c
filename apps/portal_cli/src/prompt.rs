use std::io::{BufRead, Write};

use anyhow::Result;
use client_core::BriefingForm;
use shared::{
    draft::{Field, FieldValue},
    labels::{choices_for, Choices},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Back,
    Submit,
    Quit,
}

/// Answer that blanks a field instead of keeping its value.
pub const CLEAR: &str = "-";

/// Line-oriented driver for one form session. Pressing Enter keeps the
/// current value of a field and `-` clears it.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    /// Returns `false` once input is exhausted.
    pub fn fill_step(&mut self, form: &mut BriefingForm) -> Result<bool> {
        let title = form
            .current_definition()
            .map(|step| step.title.clone())
            .unwrap_or_default();
        self.say(format!(
            "\nStep {} of {}: {} ({}% complete)",
            form.current_step(),
            form.total_steps(),
            title,
            form.progress_percent()
        ))?;

        // Visibility can change while answering, so re-read it after each field.
        let mut index = 0;
        loop {
            let visible = form.visible_fields();
            let Some(field) = visible.get(index).copied() else {
                return Ok(true);
            };
            if !self.fill_field(form, field)? {
                return Ok(false);
            }
            index += 1;
        }
    }

    pub fn navigation(&mut self, form: &BriefingForm) -> Result<Navigation> {
        let last = form.is_last_step();
        let hint = if last {
            "[s]ubmit, [b]ack or [q]uit"
        } else {
            "[n]ext, [b]ack or [q]uit"
        };
        loop {
            write!(self.output, "{hint}: ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(Navigation::Quit);
            };
            match parse_navigation(&line, last) {
                Some(nav) => return Ok(nav),
                None => self.say("Please choose one of the listed actions.")?,
            }
        }
    }

    fn fill_field(&mut self, form: &mut BriefingForm, field: Field) -> Result<bool> {
        let marker = if field.is_required() { " *" } else { "" };
        match (choices_for(field), form.draft().get(field)) {
            (Some(Choices::Coded(dictionary)), FieldValue::Scalar(current)) => {
                self.say(format!("{}{marker}", field.label()))?;
                for (position, (_, label)) in dictionary.options().iter().enumerate() {
                    self.say(format!("  {}. {label}", position + 1))?;
                }
                let current = dictionary.label(current).to_string();
                let Some(line) = self.ask("Choose", &current)? else {
                    return Ok(false);
                };
                if line.is_empty() {
                    return Ok(true);
                }
                if line == CLEAR {
                    form.set(field, "")?;
                    return Ok(true);
                }
                match parse_choice(&line, dictionary.options()) {
                    Some(code) => form.set(field, code)?,
                    None => self.say(format!("Unrecognised choice '{line}', keeping '{current}'."))?,
                }
            }
            (Some(Choices::Labels(options)), FieldValue::Set(selected)) => {
                self.say(format!("{}{marker} (numbers separated by commas toggle)", field.label()))?;
                for (position, label) in options.iter().enumerate() {
                    let tick = if selected.iter().any(|s| s == label) { "x" } else { " " };
                    self.say(format!("  [{tick}] {}. {label}", position + 1))?;
                }
                let Some(line) = self.ask("Toggle", "")? else {
                    return Ok(false);
                };
                for label in parse_toggles(&line, options) {
                    form.toggle(field, label)?;
                }
            }
            (_, FieldValue::Scalar(current)) => {
                let current = current.to_string();
                let question = format!("{}{marker}", field.label());
                let Some(line) = self.ask(&question, &current)? else {
                    return Ok(false);
                };
                match line.as_str() {
                    "" => {}
                    CLEAR => form.set(field, "")?,
                    _ => form.set(field, line)?,
                }
            }
            (_, FieldValue::Set(_)) => {}
        }
        Ok(true)
    }

    fn ask(&mut self, question: &str, current: &str) -> Result<Option<String>> {
        if current.is_empty() {
            write!(self.output, "{question}: ")?;
        } else {
            write!(self.output, "{question} [{current}]: ")?;
        }
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Accepts a 1-based option number or the option's code.
pub fn parse_choice(
    input: &str,
    options: &'static [(&'static str, &'static str)],
) -> Option<&'static str> {
    let input = input.trim();
    if let Ok(position) = input.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| options.get(index))
            .map(|(code, _)| *code);
    }
    options
        .iter()
        .find(|(code, _)| *code == input)
        .map(|(code, _)| *code)
}

pub fn parse_toggles(input: &str, options: &'static [&'static str]) -> Vec<&'static str> {
    input
        .split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter_map(|position| position.checked_sub(1).and_then(|index| options.get(index)))
        .copied()
        .collect()
}

pub fn parse_navigation(input: &str, last_step: bool) -> Option<Navigation> {
    match input.trim().to_ascii_lowercase().as_str() {
        "n" | "next" | "" if !last_step => Some(Navigation::Next),
        "s" | "submit" if last_step => Some(Navigation::Submit),
        "b" | "back" => Some(Navigation::Back),
        "q" | "quit" => Some(Navigation::Quit),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/prompt_tests.rs"]
mod tests;
