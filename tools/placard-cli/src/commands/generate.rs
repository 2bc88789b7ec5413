//! Render placards and post drafts for every talk.

use std::path::PathBuf;

use anyhow::Context;
use placard_common::config::EventConfig;
use placard_pretalx_client::{HttpPhotoSource, PretalxClient};
use placard_render_engine::{run_batch, PlacardRenderer, ProgressCallback, TalkStage};
use placard_talk_model::{JsonTalkSource, TalkSource};

pub fn run(
    mut config: EventConfig,
    output: Option<PathBuf>,
    talks_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    if let Some(output) = output {
        config.output_dir = output;
    }
    println!("Generating placards for {}", config.event.display_name);

    let renderer = PlacardRenderer::from_config(&config)?;

    let mut source: Box<dyn TalkSource> = match talks_file {
        Some(path) => Box::new(JsonTalkSource::new(path)),
        None => Box::new(PretalxClient::from_config(&config)?),
    };
    let source_name = source.name().to_string();
    let talks = source
        .talks()
        .with_context(|| format!("Failed to load talks from {source_name}"))?;

    println!("  Talks: {} (from {source_name})", talks.len());
    println!("  Templates: {}", renderer.templates().len());
    println!("  Output: {}", renderer.output_dir().display());
    println!();

    let progress: ProgressCallback = Box::new(|p| {
        let position = format!("[{}/{}]", p.index + 1, p.total);
        match p.stage {
            TalkStage::Working => {}
            TalkStage::Rendered { files } => {
                println!("  {position} {} ({files} images)", p.speaker_name);
            }
            TalkStage::Skipped { reason } => {
                println!("  {position} {} skipped: {reason}", p.speaker_name);
            }
        }
    });

    let mut photos = HttpPhotoSource::new()?;
    let summary = run_batch(
        &talks,
        &mut photos,
        &renderer,
        &config.event,
        Some(progress),
    )?;

    println!(
        "\nDone: {} rendered, {} skipped, {} images written.",
        summary.rendered,
        summary.skipped.len(),
        summary.files.len()
    );
    if let Some(path) = &summary.announcements {
        println!("  Post drafts: {}", path.display());
    }

    Ok(())
}
