use myseconds::cli::{Args, Command};
use myseconds::config;
use myseconds::core::draft_events::DraftChangedEvent;
use myseconds::core::event_bus::{DraftEventEmitter, EventBus};
use myseconds::core::{DraftEditor, DraftStorage};
use myseconds::entities::{CompositionClip, CoverMetadata, CoverType, VideoClip};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use log::{debug, info};
use std::path::Path;

fn main() -> Result<()> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = config::PathConfig::from_env_and_cli(args.data_dir.clone());

    // Ensure directories exist
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }

    init_logging(&args, &path_config)?;

    info!("MySeconds starting...");
    debug!("Command-line args: {:?}", args);

    let storage = DraftStorage::new(&path_config, &args.draft)
        .with_context(|| format!("Failed to open draft '{}'", args.draft))?;

    if let Command::Paths = args.command {
        println!("data:    {}", config::data_dir(&path_config).display());
        println!("draft:   {}", storage.directory().display());
        println!("sidecar: {}", storage.sidecar_path().display());
        return Ok(());
    }

    // Global event bus; the CLI only logs what the editor persisted
    let event_bus = EventBus::new();
    event_bus.subscribe::<DraftChangedEvent, _>(|e| {
        debug!("Draft changed: {} clip(s)", e.clips.len());
    });

    let mut editor = DraftEditor::open(storage)
        .context("Failed to load draft")?
        .with_emitter(DraftEventEmitter::from_emitter(event_bus.emitter()));

    match args.command {
        Command::List => {}
        Command::Record {
            file,
            duration,
            at,
            thumbnail,
        } => {
            let mut clip = VideoClip::recorded(duration);
            if let Some(path) = thumbnail {
                clip = clip.with_thumbnail(read_thumbnail(&path)?);
            }
            let recorded = match at {
                Some(index) => editor.record_clip_at(clip, index, &file),
                None => editor.record_clip(clip, &file),
            };
            recorded.with_context(|| format!("Failed to record {}", file.display()))?;
        }
        Command::Cover {
            slot,
            title,
            description,
            duration,
            thumbnail,
            dated,
        } => {
            let kind = CoverType::from(slot);
            let mut cover = current_cover(&editor, kind);
            if let Some(title) = title {
                cover = cover.with_title(title);
            }
            if let Some(description) = description {
                cover = cover.with_description(description);
            }
            if let Some(duration) = duration {
                cover = cover.with_duration(duration);
            }
            if let Some(path) = thumbnail {
                cover = cover.with_thumbnail(read_thumbnail(&path)?);
            }
            if dated {
                cover = cover.with_date(Utc::now());
            }
            editor
                .set_cover(cover)
                .with_context(|| format!("Failed to update {} cover", kind))?;
        }
        Command::Move { from, to } => {
            editor
                .move_clip(from, to)
                .with_context(|| format!("Failed to move clip {} to {}", from, to))?;
        }
        Command::Remove { index } => {
            editor
                .delete_at(index)
                .with_context(|| format!("Failed to remove clip {}", index))?;
        }
        Command::Reset => {
            editor.reset().context("Failed to reset draft")?;
        }
        Command::Prune => {
            let removed = editor
                .storage()
                .prune_orphans(editor.clips())
                .context("Failed to prune media files")?;
            for path in &removed {
                println!("removed {}", path.display());
            }
        }
        Command::Paths => return Ok(()),
    }

    print_draft(editor.clips(), editor.total_duration());
    Ok(())
}

/// Logger setup: `-v` raises the level of this crate only, other crates
/// stay at warn. `--log` sends everything to a file instead of stderr.
fn init_logging(args: &Args, path_config: &config::PathConfig) -> Result<()> {
    let crate_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let crate_name = env!("CARGO_CRATE_NAME");

    let (mut builder, log_path) = match &args.log_file {
        Some(log_path_opt) => {
            let log_path = log_path_opt
                .clone()
                .unwrap_or_else(|| config::data_file("myseconds.log", path_config));
            let file = std::fs::File::create(&log_path)
                .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

            let mut builder = env_logger::Builder::new();
            builder
                .filter_level(log::LevelFilter::Warn)
                .filter_module(crate_name, crate_level)
                .target(env_logger::Target::Pipe(Box::new(file)));
            (builder, Some(log_path))
        }
        // RUST_LOG wins over -v on the console
        None => {
            let env = env_logger::Env::default()
                .default_filter_or(format!("warn,{}={}", crate_name, crate_level));
            (env_logger::Builder::from_env(env), None)
        }
    };
    builder.format_timestamp_millis().init();

    if let Some(path) = log_path {
        info!("Logging to file: {} (level: {})", path.display(), crate_level);
    }
    Ok(())
}

fn read_thumbnail(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read thumbnail {}", path.display()))
}

/// Current cover in `kind`'s slot, or a blank one.
fn current_cover(editor: &DraftEditor, kind: CoverType) -> CoverMetadata {
    let slot = match kind {
        CoverType::Intro => editor.clips().first(),
        CoverType::Outro => editor.clips().last(),
    };
    slot.and_then(CompositionClip::as_cover)
        .filter(|c| c.cover_type == kind)
        .cloned()
        .unwrap_or_else(|| CoverMetadata::empty(kind))
}

fn print_draft(clips: &[CompositionClip], total: f64) {
    for (i, clip) in clips.iter().enumerate() {
        let blank = clip.as_cover().is_some_and(CoverMetadata::is_blank);
        println!(
            "{:>3}  {:<40} {:>6.2}s{}",
            i,
            clip.label(),
            clip.duration(),
            if blank { "  (blank)" } else { "" }
        );
    }
    println!("{} clip(s), {:.2}s total", clips.len(), total);
}
