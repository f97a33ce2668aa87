use std::io;
use std::io::{BufRead, Write};

use super::connection::{GtpConnection, SessionStatus};
use super::GtpError;

/// Blocking read-evaluate-respond loop over stdin. One failed command never
/// ends the session: faults are logged and the loop reads the next line.
/// Only `quit`, end of input, or a dead output channel stop it.
pub fn listen_to_stdin<W: Write>(conn: &mut GtpConnection<W>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match conn.handle_line(&line) {
            Ok(SessionStatus::Continue) => {}
            Ok(SessionStatus::Quit) => break,
            Err(GtpError::Io(err)) => return Err(err.into()),
            Err(err) => tracing::error!(error = %err, "command fault"),
        }
    }
    Ok(())
}
