use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

use crate::error::{AppError, AppResult};
use crate::services::{Prompter, SelectOption};

/// Line-oriented prompts on stdin/stdout.
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }

    fn read_line(&self) -> AppResult<String> {
        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Err(AppError::Prompt("input closed".to_string()));
        }
        Ok(input.trim().to_string())
    }
}

impl Prompter for TerminalPrompter {
    fn multi_select(&self, prompt: &str, options: &[SelectOption]) -> AppResult<Vec<usize>> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{prompt}")?;
        for (index, option) in options.iter().enumerate() {
            if option.disabled {
                writeln!(stdout, "   -  {} (unavailable)", option.label)?;
            } else {
                writeln!(stdout, "  {:>2}) {}", index + 1, option.label)?;
            }
        }

        loop {
            write!(
                stdout,
                "Select branches (e.g. 1,3-4; 'all'; Enter for none): "
            )?;
            stdout.flush()?;

            let input = self.read_line()?;
            match parse_selection(&input, options) {
                Ok(selection) => return Ok(selection),
                Err(reason) => writeln!(stdout, "{reason}")?,
            }
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> AppResult<bool> {
        let mut stdout = io::stdout();
        let hint = if default { "[Y/n]" } else { "[y/N]" };

        loop {
            write!(stdout, "{prompt} {hint} ")?;
            stdout.flush()?;

            match self.read_line()?.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(stdout, "Please answer 'y' or 'n'.")?,
            }
        }
    }
}

/// Parses `1,3-4` / `all` / empty input into zero-based indices of enabled
/// options. `all` skips disabled options; naming one explicitly is an error.
fn parse_selection(input: &str, options: &[SelectOption]) -> Result<Vec<usize>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    if input.eq_ignore_ascii_case("all") {
        return Ok(options
            .iter()
            .enumerate()
            .filter(|(_, option)| !option.disabled)
            .map(|(index, _)| index)
            .collect());
    }

    let mut chosen = BTreeSet::new();
    for token in input.split([',', ' ']).filter(|token| !token.is_empty()) {
        let (start, end) = match token.split_once('-') {
            Some((start, end)) => (parse_position(start)?, parse_position(end)?),
            None => {
                let position = parse_position(token)?;
                (position, position)
            }
        };
        if start > end {
            return Err(format!("'{token}' is not a valid range."));
        }
        for position in start..=end {
            let option = options
                .get(position - 1)
                .ok_or_else(|| format!("{position} is not in the list."))?;
            if option.disabled {
                return Err(format!("'{}' cannot be selected.", option.label));
            }
            chosen.insert(position - 1);
        }
    }
    Ok(chosen.into_iter().collect())
}

fn parse_position(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(format!("'{value}' is not a list number.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<SelectOption> {
        ["a", "b", "c", "d"]
            .iter()
            .map(|label| SelectOption {
                label: label.to_string(),
                disabled: *label == "c",
            })
            .collect()
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert_eq!(parse_selection("  ", &options()), Ok(vec![]));
    }

    #[test]
    fn parses_lists_and_ranges() {
        assert_eq!(parse_selection("4, 1-2", &options()), Ok(vec![0, 1, 3]));
        assert_eq!(parse_selection("2 2", &options()), Ok(vec![1]));
    }

    #[test]
    fn all_skips_disabled_options() {
        assert_eq!(parse_selection("ALL", &options()), Ok(vec![0, 1, 3]));
    }

    #[test]
    fn rejects_disabled_or_unknown_positions() {
        assert!(parse_selection("3", &options()).is_err());
        assert!(parse_selection("2-4", &options()).is_err());
        assert!(parse_selection("9", &options()).is_err());
        assert!(parse_selection("0", &options()).is_err());
        assert!(parse_selection("x", &options()).is_err());
        assert!(parse_selection("3-1", &options()).is_err());
    }
}
