//! Save an event's talks as JSON for offline runs.

use std::path::PathBuf;

use placard_common::config::EventConfig;
use placard_pretalx_client::PretalxClient;
use placard_talk_model::{save_talks, TalkSource};

pub fn run(config: &EventConfig, out: PathBuf) -> anyhow::Result<()> {
    println!("Fetching talks for {} from {}", config.event.slug, config.api.base_url);

    let mut client = PretalxClient::from_config(config)?;
    let talks = client.talks()?;
    save_talks(&talks, &out)?;

    let without_photo = talks.iter().filter(|t| t.photo_url.is_none()).count();
    println!("  Talks: {}", talks.len());
    if without_photo > 0 {
        println!("  Without photo: {without_photo} (these will be skipped)");
    }
    println!("Saved to {}", out.display());

    Ok(())
}
