// Command-line configuration for the editor window.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use image::imageops::FilterType;
use tracing::Level;

/// Clone a region of an image and stamp it elsewhere, with a live preview.
///
/// Drag to select, move to preview, click to stamp. S saves, Esc quits.
#[derive(Parser, Debug)]
#[command(name = "clone-stamp", version)]
pub struct Args {
    /// Image to edit. Without it a file dialog asks for one.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Where S writes the edited image (PNG). Without it a save dialog asks.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Initial window width.
    #[arg(long, default_value_t = 924)]
    pub width: usize,

    /// Initial window height.
    #[arg(long, default_value_t = 512)]
    pub height: usize,

    /// Resampling filter used when scaling the image to the window.
    #[arg(long, value_enum, default_value_t = Filter::Triangle)]
    pub filter: Filter,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Filter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<Filter> for FilterType {
    fn from(f: Filter) -> Self {
        match f {
            Filter::Nearest => FilterType::Nearest,
            Filter::Triangle => FilterType::Triangle,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Args {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_open_a_924_by_512_window() {
        let args = Args::parse_from(["clone-stamp"]);
        assert_eq!((args.width, args.height), (924, 512));
        assert_eq!(args.filter, Filter::Triangle);
        assert_eq!(args.log_level(), Level::WARN);
        assert!(args.input.is_none());
    }

    #[test]
    fn parses_paths_filter_and_verbosity() {
        let args = Args::parse_from([
            "clone-stamp", "-i", "in.png", "-o", "out.png", "--filter", "catmull-rom", "-vv",
        ]);
        assert_eq!(args.input, Some(PathBuf::from("in.png")));
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
        assert_eq!(args.filter, Filter::CatmullRom);
        assert_eq!(args.log_level(), Level::DEBUG);
    }
}
