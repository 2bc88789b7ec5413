//! Check that a config is ready for a run.

use placard_common::config::EventConfig;
use placard_render_engine::compositor::GlyphPainter;
use placard_render_engine::Template;

pub fn run(config: &EventConfig) -> anyhow::Result<()> {
    println!("Placard Config Check");
    println!("{}", "=".repeat(50));
    println!("[OK] Config: {} ({})", config.event.display_name, config.event.slug);

    let mut failures = 0;

    match GlyphPainter::load(&config.style.font_path) {
        Ok(_) => println!("[OK] Font: {}", config.style.font_path.display()),
        Err(e) => {
            println!("[FAIL] Font: {e}");
            failures += 1;
        }
    }

    for variant in &config.templates {
        match Template::load(variant) {
            Ok(template) => println!(
                "[OK] Template '{}': {}x{}",
                variant.name,
                template.image.width(),
                template.image.height()
            ),
            Err(e) => {
                println!("[FAIL] Template '{}': {e}", variant.name);
                failures += 1;
            }
        }
    }

    if config.api_token().is_some() {
        println!("[OK] API token: ${} is set", config.api.token_env);
    } else {
        println!(
            "[WARN] API token: ${} is not set; only public data can be fetched",
            config.api.token_env
        );
    }

    println!("     Output directory: {}", config.output_dir.display());

    println!();
    if failures > 0 {
        anyhow::bail!("{failures} check(s) failed");
    }
    println!("All checks passed.");
    Ok(())
}
