//! Scores a submission from the command line and prints the result as JSON.
//!
//! ```text
//! score_demo [--subject <name>] [--strict] [text...]
//! ```
//! Without text arguments the submission is read from stdin.

use std::io::Read;

use anyhow::Context;
use baseline_scorer::{BaselineScorer, ScorerConfig};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut subject: Option<String> = None;
    let mut strict = false;
    let mut words: Vec<String> = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--subject" => {
                subject = Some(args.next().context("--subject needs a value")?);
            }
            "--strict" => strict = true,
            _ => words.push(arg),
        }
    }

    let text = if words.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading submission from stdin")?;
        buf
    } else {
        words.join(" ")
    };

    let mut config = ScorerConfig::load()?;
    config.strict_subjects |= strict;

    let result = BaselineScorer::new(config).score(&text, subject.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
