use std::fmt::Display;

use log::error;

fn log_err(e: &impl Display) {
    error!("{e:#}")
}

pub trait ResultExt<T> {
    /// Logs the error, if any, and drops the result.
    fn print_err(self);

    /// Logs the error, if any, and falls back to the default value.
    fn or_default_logged(self) -> T
    where
        T: Default;
}

impl<T> ResultExt<T> for anyhow::Result<T> {
    fn print_err(self) {
        let _ = self.inspect_err(log_err);
    }

    fn or_default_logged(self) -> T
    where
        T: Default,
    {
        self.inspect_err(log_err).unwrap_or_default()
    }
}
