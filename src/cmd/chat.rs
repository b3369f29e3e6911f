use std::io::{self, BufRead, Write};

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::chat::{ChatSession, HELP_MESSAGE};

const PROMPT: &str = "jira> ";

pub fn run(ctx: &AppContext) -> AppResult<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = ChatSession::new();

    writeln!(stdout, "{HELP_MESSAGE}")?;
    writeln!(stdout, "(type 'exit' or press Ctrl-D to quit)\n")?;

    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            break;
        }
        let input = line.trim();
        if matches!(input, "exit" | "quit") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        let reply = session.respond(ctx, input);
        writeln!(stdout, "\n{reply}\n")?;
    }

    Ok(())
}
