//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use epitome_core::config::defaults;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (prints to stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        let template = generate_template();

        let Some(output) = &self.output else {
            print!("{template}");
            return Ok(());
        };

        std::fs::write(output, template)
            .with_context(|| format!("Failed to write to {}", output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the weights, modes and compression to taste");
        println!("2. Validate your configuration:");
        println!("   epitome validate -c {}", output.display());
        println!("3. Use it for summarizing:");
        println!("   epitome summarize -i texts/ -c {}", output.display());

        Ok(())
    }
}

/// Configuration file with every option at its default value
pub(crate) fn generate_template() -> String {
    format!(
        r#"# epitome configuration

# Coefficients of the composite sentence score
[weights]
title = {title_weight}
terms = {term_weight}
position = {position_weight}

# Weights of title and subtitle overlap within the title score
[title]
primary = {primary}
secondary = {secondary}

[scoring]
# "corpus": term frequency x corpus inverse document frequency
# "local": term frequency x in-document inverse sentence frequency
term-mode = "corpus"
# "normalized-position" or "paragraph-opener"
position-mode = "normalized-position"
# Term-importance multiplier applied to paragraph openers is 1 + opener-boost
opener-boost = {opener_boost}

[selection]
# Sentences with this many words or fewer are never selected
min-words = {min_words}
# Percentage of candidate sentences to discard (0-100)
compression = {compression}
# Summaries keep at least this many sentences when the document has them
min-sentences = {min_sentences}
# Re-insert titles and subtitles into the summary
show-titles = false

[segmentation]
# Longest word-plus-period span treated as an abbreviation
abbreviation-span = {abbreviation_span}
subtitle-max-words = {subtitle_max_words}
title-max-words = {title_max_words}
# "terminator" or "unicode"
scanner = "terminator"

[text]
language = "{language}"
# "before-stemming" or "after-stemming"
stopword-stage = "before-stemming"

[output]
directory = "summaries"
suffix = "_summary"
# "text" or "json"
format = "text"

[performance]
# Number of worker threads (0 = one per CPU)
worker-threads = 0
"#,
        title_weight = defaults::TITLE_WEIGHT,
        term_weight = defaults::TERM_WEIGHT,
        position_weight = defaults::POSITION_WEIGHT,
        primary = defaults::PRIMARY_TITLE_COEFFICIENT,
        secondary = defaults::SECONDARY_TITLE_COEFFICIENT,
        opener_boost = defaults::OPENER_BOOST,
        min_words = defaults::MIN_WORDS,
        compression = defaults::COMPRESSION,
        min_sentences = defaults::MIN_SENTENCES,
        abbreviation_span = defaults::ABBREVIATION_SPAN,
        subtitle_max_words = defaults::SUBTITLE_MAX_WORDS,
        title_max_words = defaults::TITLE_MAX_WORDS,
        language = defaults::LANGUAGE,
    )
}
