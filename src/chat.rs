use std::io::{self, BufRead, Write};

use crate::corpus::Page;
use crate::engine;

const GOODBYE: &str = "Bot: Bye! 😊";

/// Read questions line by line until EOF or `exit`, answering each one.
pub fn run_chat<R: BufRead, W: Write>(corpus: &[Page], mut input: R, mut output: W) -> io::Result<usize> {
    let mut answered = 0;
    let mut line = String::new();

    loop {
        write!(output, "\nYou: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }
        let question = line.trim();
        if question.eq_ignore_ascii_case("exit") {
            writeln!(output, "{}", GOODBYE)?;
            break;
        }

        writeln!(output, "Bot: {}", engine::answer(question, corpus))?;
        answered += 1;
    }

    Ok(answered)
}
