use std::process::ExitCode;

use oudia::domain::Direction;
use oudia::{ParseOptions, WriteOptions};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: oudia <input.oud> [output.oud2]";

/// Application identifier written to re-serialized documents.
const APP_COMMENT: &str = concat!("oudia ", env!("CARGO_PKG_VERSION"));

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };
    let output = args.next();

    // OUDIA_STRICT=1 rejects documents that needed any recovery
    let strict = std::env::var("OUDIA_STRICT").is_ok_and(|v| v == "1");
    // OUDIA_TRACKS=1 keeps track numbers in written schedules
    let emit_tracks = std::env::var("OUDIA_TRACKS").is_ok_and(|v| v == "1");

    let text = match tokio::fs::read_to_string(&input).await {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read {input}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let options = ParseOptions::new().with_strict(strict);
    let parsed = match tokio::task::spawn_blocking(move || oudia::parse_with(&text, &options)).await
    {
        Ok(Ok(parsed)) => parsed,
        Ok(Err(e)) => {
            eprintln!("{input}: {e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Parse task failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    for warning in &parsed.warnings {
        eprintln!("{input}: warning: {warning}");
    }

    let railway = &parsed.file.railway;
    println!("{} ({})", railway.name, parsed.file.file_type);
    println!(
        "  {} stations, {} train types, {} diagrams",
        railway.stations.len(),
        railway.train_types.len(),
        railway.diagrams.len()
    );
    for diagram in &railway.diagrams {
        println!(
            "  {}: {} {}, {} {}",
            diagram.name,
            diagram.trains(Direction::Outbound).len(),
            railway.direction_name(Direction::Outbound),
            diagram.trains(Direction::Inbound).len(),
            railway.direction_name(Direction::Inbound),
        );
    }

    if let Some(output) = output {
        let options = WriteOptions::new(APP_COMMENT).with_tracks(emit_tracks);
        let text = oudia::serialize_with(&parsed.file, &options);
        if let Err(e) = tokio::fs::write(&output, text).await {
            eprintln!("Failed to write {output}: {e}");
            return ExitCode::FAILURE;
        }
        println!("Wrote {output}");
    }

    ExitCode::SUCCESS
}
