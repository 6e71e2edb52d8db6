//! Detaching from the controlling terminal

use std::io;

use tracing::info;

/// Fork into the background, change to `/` and redirect the standard
/// streams to `/dev/null`
///
/// Only the child returns. Anything logged to stderr afterwards is lost.
pub fn daemonize() -> io::Result<()> {
    info!("detaching from terminal");
    nix::unistd::daemon(false, false)?;
    Ok(())
}
