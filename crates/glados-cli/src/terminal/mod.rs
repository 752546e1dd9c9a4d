//! The interactive terminal.
//!
//! A frame loop on the main thread, outside the async runtime: each frame
//! drains pending input, lets the [`Session`] poll the pipeline once, and
//! prints whatever the session produced.

mod command;
mod input;
mod session;

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

pub use command::{Command, ModelSelector};
pub use input::{Console, InputEvent, PROMPT, spawn_input};
pub use session::{Flow, Session};

use crate::error::CliError;

/// Frames per second of the main loop.
pub const FRAME_RATE: u32 = 30;

/// Run the session until the user quits or input closes.
///
/// # Errors
///
/// Returns [`CliError::Io`] when terminal input cannot be set up.
pub fn run(mut session: Session, startup_model: Option<&str>) -> Result<(), CliError> {
    let (events, mut console) = spawn_input()?;

    session.greet();
    flush(&mut session, &mut console);
    session.activate_startup_model(startup_model);
    flush(&mut session, &mut console);

    let frame = Duration::from_secs(1) / FRAME_RATE;
    loop {
        let started = Instant::now();

        if drain_input(&mut session, &events) == Flow::Quit {
            break;
        }
        session.tick();
        flush(&mut session, &mut console);

        std::thread::sleep(frame.saturating_sub(started.elapsed()));
    }

    tracing::debug!("Leaving terminal");
    Ok(())
}

fn drain_input(session: &mut Session, events: &Receiver<InputEvent>) -> Flow {
    loop {
        match events.try_recv() {
            Ok(InputEvent::Line(line)) => {
                if session.handle_line(&line) == Flow::Quit {
                    return Flow::Quit;
                }
            }
            Ok(InputEvent::Interrupted | InputEvent::Eof) | Err(TryRecvError::Disconnected) => {
                return Flow::Quit;
            }
            Err(TryRecvError::Empty) => return Flow::Continue,
        }
    }
}

fn flush(session: &mut Session, console: &mut Console) {
    for line in session.take_output() {
        console.print(line);
    }
}
