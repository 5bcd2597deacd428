use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::DEFAULT_DRAFT_DIRECTORY;
use crate::entities::CoverType;

/// Edit a MySeconds video draft: intro cover, recorded clips, outro cover
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable debug logging to file (default: myseconds.log in the data directory)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE", global = true)]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Custom data directory (overrides MYSECONDS_DATA_DIR and platform paths)
    #[arg(short = 'd', long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Managed draft directory inside the data directory
    #[arg(long = "draft", value_name = "NAME", default_value = DEFAULT_DRAFT_DIRECTORY, global = true)]
    pub draft: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the clip sequence
    List,

    /// Move a finished recording into the draft (the source file is consumed)
    Record {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Clip length in seconds
        #[arg(long = "duration", value_name = "SECONDS", default_value_t = 1.0, value_parser = parse_duration)]
        duration: f64,

        /// Thumbnail image stored with the clip
        #[arg(long = "thumbnail", value_name = "IMAGE")]
        thumbnail: Option<PathBuf>,

        /// Insert position (default: just before the outro)
        #[arg(long = "at", value_name = "N")]
        at: Option<usize>,
    },

    /// Replace the intro or outro cover
    Cover {
        #[arg(value_enum)]
        slot: CoverSlot,

        #[arg(long = "title")]
        title: Option<String>,

        #[arg(long = "description")]
        description: Option<String>,

        /// Cover length in seconds
        #[arg(long = "duration", value_name = "SECONDS", value_parser = parse_duration)]
        duration: Option<f64>,

        /// Thumbnail image shown for the cover
        #[arg(long = "thumbnail", value_name = "IMAGE")]
        thumbnail: Option<PathBuf>,

        /// Stamp the cover with the current date
        #[arg(long = "dated")]
        dated: bool,
    },

    /// Reorder: move the clip at FROM to TO (interior positions only)
    Move {
        from: usize,
        to: usize,
    },

    /// Remove the clip at INDEX (covers reset to blank)
    Remove {
        index: usize,
    },

    /// Delete every clip and media file
    Reset,

    /// Delete media files no clip refers to
    Prune,

    /// Print resolved paths
    Paths,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverSlot {
    Intro,
    Outro,
}

impl From<CoverSlot> for CoverType {
    fn from(slot: CoverSlot) -> Self {
        match slot {
            CoverSlot::Intro => CoverType::Intro,
            CoverSlot::Outro => CoverType::Outro,
        }
    }
}

/// Seconds: finite and not negative.
fn parse_duration(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("duration must be a finite number of seconds >= 0, got {}", s));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_args() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["myseconds", "list", "-vv", "--draft", "Trip"]).unwrap();
        assert_eq!(args.verbosity, 2);
        assert_eq!(args.draft, "Trip");
        assert!(matches!(args.command, Command::List));
    }

    #[test]
    fn test_record_defaults() {
        let args = Args::try_parse_from(["myseconds", "record", "a.mov"]).unwrap();
        match args.command {
            Command::Record {
                file,
                duration,
                at,
                thumbnail,
            } => {
                assert_eq!(file, PathBuf::from("a.mov"));
                assert_eq!(duration, 1.0);
                assert_eq!(at, None);
                assert_eq!(thumbnail, None);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(args.draft, DEFAULT_DRAFT_DIRECTORY);
    }

    #[test]
    fn test_cover_slot() {
        let args =
            Args::try_parse_from(["myseconds", "cover", "outro", "--title", "Bye", "--dated"])
                .unwrap();
        match args.command {
            Command::Cover { slot, title, dated, .. } => {
                assert_eq!(CoverType::from(slot), CoverType::Outro);
                assert_eq!(title.as_deref(), Some("Bye"));
                assert!(dated);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_log_without_file() {
        let args = Args::try_parse_from(["myseconds", "paths", "--log"]).unwrap();
        assert_eq!(args.log_file, Some(None));
    }

    #[test]
    fn test_duration_must_be_finite() {
        for bad in ["inf", "NaN", "-1", "abc"] {
            assert!(
                Args::try_parse_from(["myseconds", "record", "a.mov", "--duration", bad]).is_err(),
                "{}",
                bad
            );
            assert!(
                Args::try_parse_from(["myseconds", "cover", "intro", "--duration", bad]).is_err(),
                "{}",
                bad
            );
        }

        let args =
            Args::try_parse_from(["myseconds", "record", "a.mov", "--duration", "2.5"]).unwrap();
        assert!(matches!(args.command, Command::Record { duration, .. } if duration == 2.5));
    }
}
