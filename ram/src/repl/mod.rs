//! REPL (Read-Eval-Print Loop) over a memory unit

use crate::error::ScriptError;
use crate::interp::Interpreter;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

const PROMPT: &str = "ram> ";
const HISTORY_FILE: &str = ".ram_history";

/// What the REPL should do after a line
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// REPL state
pub struct Repl {
    editor: DefaultEditor,
    interpreter: Interpreter,
    history_path: Option<PathBuf>,
}

impl Repl {
    /// Create a REPL whose memory starts with `capacity` cells
    pub fn new(capacity: usize) -> RlResult<Self> {
        let editor = DefaultEditor::new()?;
        let history_path = dirs_home().map(|h| h.join(HISTORY_FILE));

        let mut repl = Repl {
            editor,
            interpreter: Interpreter::with_capacity(capacity),
            history_path,
        };

        if let Some(ref path) = repl.history_path {
            let _ = repl.editor.load_history(path);
        }

        Ok(repl)
    }

    /// Run the REPL until `:quit` or end of input
    pub fn run(&mut self) -> RlResult<()> {
        println!("nuPython memory REPL");
        println!("Type :help for help, :quit to exit.\n");

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line);

                    if self.handle_line(line) == Flow::Quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            let _ = self.editor.save_history(path);
        }

        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        if line.starts_with(':') {
            return self.handle_command(line);
        }
        match self.eval_line(line) {
            Ok(Some(output)) => println!("{output}"),
            Ok(None) => {}
            Err(err) => eprintln!("{err}"),
        }
        Flow::Continue
    }

    /// Run one line; bare expressions echo their value
    fn eval_line(&mut self, line: &str) -> Result<Option<String>, ScriptError> {
        let value = self.interpreter.exec_source(line)?;
        Ok(value.map(|v| format!("{}, {v}", v.type_name())))
    }

    /// Handle REPL commands (starting with :)
    fn handle_command(&mut self, cmd: &str) -> Flow {
        match cmd {
            ":quit" | ":q" | ":exit" => {
                println!("Goodbye!");
                Flow::Quit
            }
            ":help" | ":h" | ":?" => {
                self.print_help();
                Flow::Continue
            }
            ":print" | ":p" => {
                self.interpreter.memory().print();
                Flow::Continue
            }
            ":map" | ":m" => {
                self.interpreter.memory().print_map();
                Flow::Continue
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type :help for help.");
                Flow::Continue
            }
        }
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  :help, :h, :?   Show this help");
        println!("  :print, :p      Print the contents of memory");
        println!("  :map, :m        Print the memory map");
        println!("  :quit, :q       Exit the REPL");
        println!();
        println!("You can enter:");
        println!("  - Assignments: x = 123, s = 'apple', b = True, n = None");
        println!("  - Pointers: p = &x, y = *p, *p = 4.5");
        println!("  - Variable reads: x");
    }
}

/// Get home directory
fn dirs_home() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
