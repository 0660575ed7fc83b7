// What you SEE:
// • A 320x200 black "screen" (shown at 2x) with a status line at the bottom.
// • S (or Enter) starts the plot: the sombrero builds up one depth row at a time.
//   Pressing S again while it is drawing does nothing.
// • P saves whatever is on screen to sombrero.png. ESC quits.
// • SOMBRERO_EVERY_COLUMN=1 shows every single column as it is drawn (slow);
//   SOMBRERO_EXPORT=path changes where P saves.
//
// Based on Dave Plummer's KIM-1 sombrero plot.

mod config;
mod draw;
mod error;
mod export;
mod session;
mod sombrero;
mod types;
mod worker;

use config::PlotConfig;
use draw::{draw_text_5x7, Drawer};
use error::Error;
use export::save_png;
use log::{info, warn};
use session::{press_start, pump, Status};
use types::{Canvas, CANVAS_HEIGHT, CANVAS_WIDTH};
use worker::{PlotSlot, PlotWorker};

const HUD_COLOR: u32 = 0x00_FF_FF_FF;
const HUD_Y: i32 = 192; // below the plot baseline

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = PlotConfig::from_env();
    info!("sombrero plot: {config:?}");

    /* --- Window + worker setup ---
       Visual: an empty black window with the READY hint. */
    let mut drawer = Drawer::new("Sombrero Plot", CANVAS_WIDTH, CANVAS_HEIGHT, config.scale)?;
    let mut worker = PlotWorker::new(config.clone());

    // The canvas on display. Owned here; the worker only ever sends fresh snapshots.
    let mut slot = PlotSlot::default();
    let blank = Canvas::new(config.palette.background);
    // Slot canvas + status line; the snapshot itself is never written to.
    let mut screen = blank.clone();
    let mut status = Status::Ready;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Start button: ignored while a pass is running. */
        if drawer.start_pressed_once() {
            press_start(&mut worker, &mut slot, &mut status)?;
        }

        /* 2) Take everything the worker published since the last frame.
           Visual: the newest row snapshot replaces the old one on screen. */
        pump(&mut worker, &mut slot, &mut status);

        /* 3) Save what is on screen. */
        if drawer.save_pressed_once() {
            match slot.current() {
                Some(canvas) => {
                    if let Err(e) = save_png(canvas, &config.export_path) {
                        warn!("{e}");
                    }
                }
                None => info!("nothing plotted yet; press S first"),
            }
        }

        /* 4) Compose and present. */
        let shown = slot.current().map_or(&blank, |c| c.as_ref());
        screen.pixels.copy_from_slice(&shown.pixels);
        draw_text_5x7(&mut screen, 4, HUD_Y, &status.hud_text(), HUD_COLOR);
        drawer.present(&screen)?;
    }

    Ok(())
}
