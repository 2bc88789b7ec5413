//! Promotional post drafts, one block per rendered talk.

use std::path::Path;

use placard_common::config::EventInfo;
use placard_common::error::PlacardResult;
use placard_talk_model::Talk;

/// Separator written before every talk's block.
pub const DELIMITER: &str = "========================";

/// File name of the accumulated drafts inside the output directory.
pub const ANNOUNCEMENTS_FILE: &str = "tweets.txt";

/// Post draft and image alt text for one talk.
pub fn announcement(talk: &Talk, event: &EventInfo) -> String {
    let name = &talk.speaker_name;
    let title = &talk.title;

    let mut out = String::new();
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(&format!(
        "TWITTER: {}\n",
        talk.social_handle.as_deref().unwrap_or_default()
    ));
    out.push_str("TWEET:\n");
    out.push_str(&format!(
        "Looking forward to {}'s talk, \"{title}\"? Sound off in the comments!\n",
        talk.mention()
    ));
    if !event.hashtag.is_empty() {
        out.push_str(&event.hashtag);
        out.push('\n');
    }
    out.push_str(&format!("{}{}/\n", event.talk_url_base, talk.code));
    out.push('\n');

    out.push_str("ALT:\n");
    out.push_str(&format!(
        "Talk promo picture for {name}'s talk at {}.\n",
        event.display_name
    ));
    for line in &event.alt_text_lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&format!("A picture of {name} is in the center.\n"));
    out.push_str(&format!("The top left has the talk title: \"{title}\".\n"));
    out.push_str(&format!("Below that is the talk time, {}.\n", talk.time_inline()));
    out.push_str(&format!("Below that is {name}'s name.\n"));
    out.push('\n');
    out
}

/// Append-only buffer of announcements for one run.
#[derive(Debug, Clone)]
pub struct AnnouncementBuilder {
    event: EventInfo,
    buffer: String,
    count: usize,
}

impl AnnouncementBuilder {
    pub fn new(event: &EventInfo) -> Self {
        Self {
            event: event.clone(),
            buffer: String::new(),
            count: 0,
        }
    }

    pub fn push(&mut self, talk: &Talk) {
        self.buffer.push_str(&announcement(talk, &self.event));
        self.count += 1;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Write the accumulated drafts to `path`, replacing any previous file.
    pub fn write_to(&self, path: &Path) -> PlacardResult<()> {
        std::fs::write(path, &self.buffer)?;
        Ok(())
    }
}
