use std::io::{BufRead, Write};

/// The terminal an interpreter instance talks to.
///
/// The `input`, `print` and `clear` builtins are routed through this trait,
/// so embedders and tests can substitute their own implementation and a
/// single process can host several isolated interpreters.
pub trait Console {
    /// Writes `text` followed by a newline.
    fn print(&mut self, text: &str);

    /// Writes `prompt` without a newline, then blocks until one line is
    /// available and returns it without its line terminator. Returns an
    /// empty string when the input stream is exhausted.
    fn input(&mut self, prompt: &str) -> String;

    /// Clears the display.
    fn clear(&mut self);
}

/// The real terminal: standard output and standard input.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn print(&mut self, text: &str) {
        println!("{text}");
    }

    fn input(&mut self, prompt: &str) -> String {
        print!("{prompt}");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        let _ = std::io::stdin().lock().read_line(&mut line);

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }

        line
    }

    fn clear(&mut self) {
        // ANSI: erase the display, then home the cursor.
        print!("\x1b[2J\x1b[1;1H");
        let _ = std::io::stdout().flush();
    }
}
