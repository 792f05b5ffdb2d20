//! Line-oriented terminal front end.
//!
//! Each line is either a sequence of keypad labels separated by whitespace
//! (`7 + 3 =`, `9 0 sin`), a whole expression typed as on a keyboard in
//! place of the current input and evaluated immediately (`(2+3)*4`), or one
//! of the commands `help`, `history` and `quit`.

use crate::calculator::{Calculator, Event, looks_like_expression};
use std::io::{self, BufRead, Write};
use tracing::debug;

const DISPLAY_WIDTH: usize = 28;

pub const HELP: &str = "\
Keypad:
  0-9 .          digits
  + - * / ^ %    operators (^ is power, a%b is a percent of b)
  ( )            parentheses
  =              evaluate
  C  AC  bs      clear input, clear all, backspace
  neg sq sqrt    negate, square, square root (also ±, x², √)
  MC MR M+ M-    memory clear, recall, add, subtract
  RAD DEG        angle unit
  dark light blue  theme

Functions:
  sin cos tan    trigonometric functions
  asin acos atan inverse trigonometric functions
  log            base 10 logarithm
  ln             natural logarithm
  pi e           constants (also π)

Type a whole expression such as (2+3)*4 to evaluate it at once.
Commands: help, history, quit";

/// Run the front end until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    calculator: &mut Calculator,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    render(calculator, out)?;

    for line in input.lines() {
        let line = line?;
        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => writeln!(out, "{HELP}")?,
            "history" => render_history(calculator, out)?,
            text => {
                if let Err(unknown) = process_line(calculator, text) {
                    writeln!(out, "unknown input: {unknown}")?;
                }
            }
        }
        render(calculator, out)?;
    }

    Ok(())
}

/// Apply one line of input to the calculator.
///
/// Returns the first token that is neither a keypad label nor part of a
/// typeable expression; nothing is applied in that case.
pub fn process_line(calculator: &mut Calculator, line: &str) -> Result<(), String> {
    let buttons: Option<Vec<Event>> = line
        .split_whitespace()
        .map(button_events)
        .collect::<Option<Vec<_>>>()
        .map(|events| events.into_iter().flatten().collect());

    let events = match buttons {
        Some(events) => events,
        None if looks_like_expression(line) => {
            let typed = keyboard_events(line).ok_or_else(|| line.to_string())?;
            // The typed text replaces the current input; committed operators stay.
            let mut events = vec![Event::Clear];
            events.extend(typed);
            events.push(Event::Evaluate);
            events
        }
        None => {
            let unknown = line
                .split_whitespace()
                .find(|token| button_events(token).is_none())
                .unwrap_or(line);
            return Err(unknown.to_string());
        }
    };

    for event in events {
        if let Err(error) = calculator.handle(event) {
            debug!(%error, "operation failed");
        }
    }
    Ok(())
}

/// Events for one keypad token. Multi-digit numbers are entered digit by digit.
fn button_events(token: &str) -> Option<Vec<Event>> {
    if let Some(event) = Event::from_label(token) {
        return Some(vec![event]);
    }

    if token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Some(
            token
                .chars()
                .map(|c| Event::Append(c.to_string()))
                .collect(),
        );
    }

    None
}

/// Events for typing `text` on the keyboard. `pi` is a single key press.
fn keyboard_events(text: &str) -> Option<Vec<Event>> {
    text.replace("pi", "p")
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(Event::from_key)
        .collect()
}

fn render<W: Write>(calculator: &Calculator, out: &mut W) -> io::Result<()> {
    let status = format!(
        "{}  {}",
        calculator.angle_unit().indicator(),
        calculator.memory_indicator()
    );
    writeln!(out, "{}", status.trim_end())?;
    writeln!(out, "{:>DISPLAY_WIDTH$}", calculator.pending_display())?;
    writeln!(out, "{:>DISPLAY_WIDTH$}", calculator.display())
}

fn render_history<W: Write>(calculator: &Calculator, out: &mut W) -> io::Result<()> {
    if calculator.history().is_empty() {
        return writeln!(out, "(no history)");
    }
    for entry in calculator.history().all().rev() {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HistoryLog, MemoryStore};

    fn calculator() -> Calculator {
        Calculator::new(HistoryLog::load(Box::new(MemoryStore::default())))
    }

    #[test]
    fn test_button_line() {
        let mut calc = calculator();
        process_line(&mut calc, "12 + 3 =").unwrap();
        assert_eq!(calc.display(), "15");
    }

    #[test]
    fn test_typed_expression_is_evaluated() {
        let mut calc = calculator();
        process_line(&mut calc, "(2 + 3) * 4").unwrap();
        assert_eq!(calc.display(), "20");
        process_line(&mut calc, "2*pi").unwrap();
        assert_eq!(calc.display(), "6.2831853072");
    }

    #[test]
    fn test_unknown_token_applies_nothing() {
        let mut calc = calculator();
        assert_eq!(
            process_line(&mut calc, "7 frobnicate"),
            Err("frobnicate".to_string())
        );
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_run_session() {
        let mut calc = calculator();
        let input = "2 + 3 =\nhistory\nbogus\nquit\n9 =\n";
        let mut out = Vec::new();
        run(&mut calc, input.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("2+3 = 5"));
        assert!(out.contains("unknown input: bogus"));
        assert_eq!(calc.display(), "5");
    }

    #[test]
    fn test_history_is_listed_newest_first() {
        let mut calc = calculator();
        process_line(&mut calc, "1+1").unwrap();
        process_line(&mut calc, "2+2").unwrap();
        let mut out = Vec::new();
        render_history(&calc, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2+2 = 4\n1+1 = 2\n");
    }

    #[test]
    fn test_typed_expression_continues_committed_operators() {
        let mut calc = calculator();
        process_line(&mut calc, "5 + 7").unwrap();
        process_line(&mut calc, "2*3").unwrap();
        assert_eq!(calc.display(), "11");
        assert_eq!(
            calc.history().all().next_back().unwrap().to_string(),
            "5+2*3 = 11"
        );
    }
}
