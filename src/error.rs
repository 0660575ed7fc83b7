// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Updating the window buffer failed
    WorkerSpawn(String),  // The OS refused to start the plot thread
    WorkerPanicked,       // The plot thread died before finishing
    Export(String),       // Writing the PNG failed
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::WorkerSpawn(s) => write!(f, "Plot worker spawn error: {s}"),
            Error::WorkerPanicked => write!(f, "Plot worker panicked"),
            Error::Export(s) => write!(f, "Export error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
