use std::io::{BufRead, Write};

use crate::error::BikeshareError;

/// Line-based question/answer channel.
///
/// Generic over the reader and writer so sessions can be driven from
/// stdin/stdout or from in-memory buffers.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one trimmed answer line.
    ///
    /// Returns `InputClosed` once the reader is exhausted.
    pub fn ask(&mut self, question: &str) -> Result<String, BikeshareError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BikeshareError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Ask until `accept` yields a value, printing `complaint` after each
    /// rejected answer. There is no retry limit.
    pub fn ask_until<T>(
        &mut self,
        question: &str,
        complaint: &str,
        accept: impl Fn(&str) -> Option<T>,
    ) -> Result<T, BikeshareError> {
        loop {
            let answer = self.ask(question)?;
            match accept(&answer) {
                Some(value) => return Ok(value),
                None => {
                    log::debug!("rejected answer {answer:?}");
                    self.say(complaint)?;
                }
            }
        }
    }

    /// Yes/no question. Only a case-insensitive "yes" counts as yes;
    /// a closed input counts as no.
    pub fn confirm(&mut self, question: &str) -> Result<bool, BikeshareError> {
        match self.ask(question) {
            Ok(answer) => Ok(answer.eq_ignore_ascii_case("yes")),
            Err(BikeshareError::InputClosed) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn say(&mut self, text: &str) -> Result<(), BikeshareError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
