use std::sync::Arc;

use crate::Command;

/// Executes a command against some piece of state.
///
/// The trait makes **no storage assumptions**; the error type is associated so each
/// handler reports failures in its own terms.
pub trait CommandHandler {
    type Cmd: Command;
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn handle(&self, command: Self::Cmd) -> Result<(), Self::Error>;
}

impl<H> CommandHandler for Arc<H>
where
    H: CommandHandler + ?Sized,
{
    type Cmd = H::Cmd;
    type Error = H::Error;

    fn handle(&self, command: Self::Cmd) -> Result<(), Self::Error> {
        (**self).handle(command)
    }
}
