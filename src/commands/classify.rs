//! Classify command - sort input tokens into ICD, CPT and invalid

use std::path::PathBuf;

use codigo::core::services::classify_with;
use codigo::output::{ClassifyReport, OutputMode};

use super::{load_config, read_input};

/// Classify the codes in `text` (or stdin) and print them
pub fn classify(
    text: Option<String>,
    config: Option<PathBuf>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let rules = config.rules()?;
    let input = read_input(text)?;

    let report = ClassifyReport::new(classify_with(&input, &rules));
    report.render(output_mode);
    Ok(())
}
