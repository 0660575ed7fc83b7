// Knobs for one plot session. Defaults reproduce the classic look:
// yellow hat on black, one screen update per row.

use crate::types::Palette;
use minifb::Scale;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub palette: Palette,
    /// Window magnification; the canvas itself is always 320x200.
    pub scale: Scale,
    /// Publish after every column instead of every row (much slower to watch).
    /// Each column copies the whole 320x200 canvas into a new snapshot: about
    /// 29k copies of 256 KB per pass, paced by how fast the window drains them.
    pub publish_every_column: bool,
    /// Where `P` writes the displayed canvas.
    pub export_path: PathBuf,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            scale: Scale::X2,
            publish_every_column: false,
            export_path: PathBuf::from("sombrero.png"),
        }
    }
}

impl PlotConfig {
    /// Defaults, overridden by SOMBRERO_EVERY_COLUMN and SOMBRERO_EXPORT.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("SOMBRERO_EVERY_COLUMN") {
            self = self.with_publish_every_column(matches!(v.trim(), "1" | "true" | "yes"));
        }
        if let Some(path) = lookup("SOMBRERO_EXPORT").filter(|p| !p.is_empty()) {
            self = self.with_export_path(path);
        }
        self
    }

    pub fn with_publish_every_column(mut self, on: bool) -> Self {
        self.publish_every_column = on;
        self
    }

    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_row_granular_black_and_yellow() {
        let cfg = PlotConfig::default();
        assert!(!cfg.publish_every_column);
        assert_eq!(cfg.palette.background, 0x00_00_00_00);
        assert_eq!(cfg.palette.plot, 0x00_FF_FF_00);
        assert_eq!(cfg.export_path, PathBuf::from("sombrero.png"));
    }

    #[test]
    fn overrides_from_lookup() {
        let cfg = PlotConfig::default().with_overrides(|key| match key {
            "SOMBRERO_EVERY_COLUMN" => Some("1".into()),
            "SOMBRERO_EXPORT" => Some("/tmp/hat.png".into()),
            _ => None,
        });
        assert!(cfg.publish_every_column);
        assert_eq!(cfg.export_path, PathBuf::from("/tmp/hat.png"));
    }

    #[test]
    fn empty_or_unknown_values_keep_defaults() {
        let cfg = PlotConfig::default().with_overrides(|key| match key {
            "SOMBRERO_EVERY_COLUMN" => Some("nope".into()),
            "SOMBRERO_EXPORT" => Some(String::new()),
            _ => None,
        });
        assert!(!cfg.publish_every_column);
        assert_eq!(cfg.export_path, PathBuf::from("sombrero.png"));
    }
}
