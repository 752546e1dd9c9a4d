//! Line input on a dedicated thread.
//!
//! `rustyline` blocks while a line is being edited, so it runs on its own
//! OS thread and hands finished lines to the frame loop over a channel.
//! Output goes through the editor's external printer so replies arriving
//! mid-edit do not clobber the prompt.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, ExternalPrinter};

use crate::error::CliError;

/// Prompt shown while waiting for input.
pub const PROMPT: &str = "You > ";

type Printer = Box<dyn ExternalPrinter + Send>;

/// Something that happened at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    /// Ctrl-C.
    Interrupted,
    /// Ctrl-D or closed stdin.
    Eof,
}

/// Prints lines without disturbing the prompt.
pub struct Console {
    printer: Option<Printer>,
}

impl Console {
    pub fn print(&mut self, line: String) {
        if let Some(printer) = &mut self.printer {
            match printer.print(format!("{line}\n")) {
                Ok(()) => return,
                Err(e) => {
                    tracing::debug!(error = %e, "External printer failed, using stdout");
                    self.printer = None;
                }
            }
        }
        println!("{line}");
    }
}

/// Start the input thread.
///
/// Returns the channel of input events and the console to print through.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the line editor cannot be created.
pub fn spawn_input() -> Result<(Receiver<InputEvent>, Console), CliError> {
    let (event_tx, event_rx) = mpsc::channel();
    let (init_tx, init_rx) = mpsc::channel();

    thread::Builder::new()
        .name("glados-input".into())
        .spawn(move || run(&event_tx, &init_tx))?;

    let printer = init_rx
        .recv()
        .map_err(|_| CliError::Io("input thread exited during startup".to_string()))??;

    Ok((event_rx, Console { printer }))
}

fn run(events: &Sender<InputEvent>, init_tx: &Sender<Result<Option<Printer>, CliError>>) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            let _ = init_tx.send(Err(CliError::Io(format!("cannot open line editor: {e}"))));
            return;
        }
    };

    // Not available when stdin is not a terminal.
    let printer = match editor.create_external_printer() {
        Ok(printer) => Some(Box::new(printer) as Printer),
        Err(e) => {
            tracing::debug!(error = %e, "No external printer");
            None
        }
    };
    if init_tx.send(Ok(printer)).is_err() {
        return;
    }

    loop {
        let event = match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                InputEvent::Line(line)
            }
            Err(ReadlineError::Interrupted) => InputEvent::Interrupted,
            Err(ReadlineError::Eof) => InputEvent::Eof,
            Err(e) => {
                tracing::warn!(error = %e, "Reading input failed");
                InputEvent::Eof
            }
        };

        let last = !matches!(event, InputEvent::Line(_));
        if events.send(event).is_err() || last {
            break;
        }
    }
}
