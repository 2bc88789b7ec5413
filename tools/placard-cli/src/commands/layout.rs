//! Preview the text block for a single talk.

use placard_common::config::EventConfig;
use placard_layout::{layout_text, title_width, wrapped_title_block, LayoutInput};

pub fn run(
    config: &EventConfig,
    title: String,
    name: String,
    time: String,
    code: String,
) -> anyhow::Result<()> {
    let time = time.replace("\\n", "\n");
    let layout = layout_text(
        LayoutInput {
            talk_code: &code,
            title: &title,
            time: &time,
            speaker_name: &name,
        },
        &config.layout,
    );

    println!("Title width: {}", title_width(&title, &code, &config.layout));
    println!("Title lines: {}", layout.title_lines.len());
    for line in wrapped_title_block(&title, &code, &config.layout).lines() {
        println!("  | {line}");
    }
    println!("Name lines: {}", layout.speaker.lines.len());
    println!("Spacing: {}", layout.spacing);
    println!("Font size: {}", layout.font_size);
    println!("{}", "-".repeat(40));
    println!("{}", layout.text());
    println!("{}", "-".repeat(40));

    Ok(())
}
