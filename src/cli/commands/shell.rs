use crate::cli::parser::{Cli, Commands};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, report, warning};
use crate::{Session, dispatch};
use clap::Parser;
use std::io::{self, Write};

const PROMPT: &str = "habitlogger> ";

/// Split a line into words, keeping quoted text together.
fn tokenize(line: &str) -> AppResult<Vec<String>> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    out.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(AppError::Validation("Unterminated quote".into()));
    }
    if in_word {
        out.push(current);
    }
    Ok(out)
}

/// Run one shell line. Returns `Ok(false)` when the user asked to leave.
fn run_line(line: &str, session: &Session) -> AppResult<bool> {
    let words = tokenize(line)?;
    let Some(first) = words.first() else {
        return Ok(true);
    };
    if matches!(first.as_str(), "quit" | "exit" | "q") {
        return Ok(false);
    }

    let argv = std::iter::once("habitlogger".to_string()).chain(words);
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(e) => {
            // help and usage errors are printed by clap itself
            let _ = e.print();
            return Ok(true);
        }
    };

    if cli.db.is_some() || cli.today.is_some() || cli.test {
        warning("Global options are fixed for the session and were ignored.");
    }

    match &cli.command {
        Commands::Shell => info("Already in the interactive session."),
        Commands::Init => warning("Run `init` outside of the interactive session."),
        cmd => dispatch(cmd, session)?,
    }
    Ok(true)
}

/// Interactive loop: one command per line until `quit`, `exit` or end of input.
/// Errors are reported and the loop goes on; only fatal errors end it.
pub fn handle(session: &Session) -> AppResult<()> {
    info("Interactive session. Type `--help` for commands, `quit` to leave.");

    let stdin = io::stdin();
    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            println!();
            break;
        }

        match run_line(line.trim(), session) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => report(&e),
        }
    }

    info("Goodbye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    #[test]
    fn splits_on_whitespace() {
        let words = tokenize("water add today  -g 3").unwrap();
        assert_eq!(words, vec!["water", "add", "today", "-g", "3"]);
    }

    #[test]
    fn keeps_quoted_text_together() {
        let words = tokenize("walk add today -s 500 --desc \"evening walk\"").unwrap();
        assert_eq!(words.last().map(String::as_str), Some("evening walk"));
        assert_eq!(words.len(), 7);
    }

    #[test]
    fn empty_quotes_give_an_empty_word() {
        let words = tokenize("water update --id 1 --desc ''").unwrap();
        assert_eq!(words.last().map(String::as_str), Some(""));
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert!(tokenize("water add today -d \"oops").is_err());
    }
}
