// What the window loop does with the worker each frame: start it, take its
// snapshots, and keep the status line honest, including after a failed pass.

use crate::error::Error;
use crate::sombrero::{PlotEvent, ROW_FIRST, ROW_LAST};
use crate::worker::{PlotSlot, PlotWorker};
use log::{debug, trace, warn};

/// What the status line says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    Plotting { rows: i32 },
    Done { rows: usize },
}

impl Status {
    pub fn hud_text(&self) -> String {
        match self {
            Status::Ready => "READY | S: START  P: SAVE  ESC: QUIT".to_string(),
            Status::Plotting { rows } => {
                format!("PLOTTING ROW {}/{}", rows, ROW_LAST - ROW_FIRST + 1)
            }
            Status::Done { rows } => format!("DONE | {rows} ROWS | S: AGAIN  P: SAVE"),
        }
    }
}

/// The start button. Ignored while a pass is running.
pub fn press_start(
    worker: &mut PlotWorker,
    slot: &mut PlotSlot,
    status: &mut Status,
) -> Result<(), Error> {
    if worker.start(slot)? {
        *status = Status::Plotting { rows: 0 };
    } else {
        debug!("start pressed while plotting; ignored");
    }
    Ok(())
}

/// Show one published snapshot.
pub fn apply_event(event: PlotEvent, slot: &mut PlotSlot, status: &mut Status) {
    match event {
        PlotEvent::Column { zi, xi, canvas } => {
            trace!("column {xi} of row {zi}");
            slot.replace(canvas);
        }
        PlotEvent::Row { zi, canvas } => {
            slot.replace(canvas);
            *status = Status::Plotting { rows: zi - ROW_FIRST + 1 };
        }
        PlotEvent::Finished { canvas, rows } => {
            slot.replace(canvas);
            *status = Status::Done { rows };
        }
    }
}

/// Take everything published since the last frame and reap a finished worker.
/// A pass that died leaves whatever it drew on screen and re-enables start.
pub fn pump(worker: &mut PlotWorker, slot: &mut PlotSlot, status: &mut Status) {
    while let Some(event) = worker.poll() {
        apply_event(event, slot, status);
    }
    if worker.is_running() {
        return;
    }
    match worker.try_join() {
        Ok(Some(_)) => debug!("plot worker reaped"),
        Ok(None) => {}
        Err(e) => {
            warn!("{e}; press S to try again");
            *status = Status::Ready;
        }
    }
}
