use anyhow::Context;
use attendance_deck::{DEFAULT_OUTPUT_PATH, build_presentation, logger};

fn main() -> anyhow::Result<()> {
    logger::init_cli_logger();

    build_presentation(DEFAULT_OUTPUT_PATH)
        .with_context(|| format!("failed to write {}", DEFAULT_OUTPUT_PATH))?;

    println!("Wrote {}", DEFAULT_OUTPUT_PATH);
    Ok(())
}
