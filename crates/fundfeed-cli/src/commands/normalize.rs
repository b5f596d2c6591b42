use std::fs;
use std::path::Path;

use fundfeed_core::source::parse_section;
use fundfeed_core::{normalize, runner, ProcessingDate, RawPayloads, Section, Symbol};
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::NormalizeArgs;
use crate::error::CliError;

pub fn run(args: &NormalizeArgs, output_dir: &Path, as_of: ProcessingDate) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let payloads = read_payloads(&args.input_dir);
    let record = normalize(&symbol, &payloads, as_of);

    println!("{}", serde_json::to_string_pretty(&record)?);

    if args.write {
        fs::create_dir_all(output_dir)?;
        let path = runner::write_record(output_dir, &symbol, &record)?;
        info!(path = %path.display(), "Success: {symbol}");
    }

    Ok(())
}

/// Load `<section>.json` files, degrading unreadable ones to `null`.
fn read_payloads(dir: &Path) -> RawPayloads {
    let mut payloads = RawPayloads::default();

    for section in Section::ALL {
        let value = read_section(dir, section);
        match section {
            Section::Profile => payloads.profile = value,
            Section::Stats => payloads.stats = value,
            Section::Statements => payloads.statements = value,
            Section::Prices => payloads.prices = value,
        }
    }

    payloads
}

fn read_section(dir: &Path, section: Section) -> Value {
    let path = dir.join(format!("{section}.json"));
    let body = match fs::read_to_string(&path) {
        Ok(body) => body,
        Err(error) => {
            warn!(%section, path = %path.display(), "cannot read payload: {error}; continuing with defaults");
            return Value::Null;
        }
    };

    parse_section(section, &body).unwrap_or_else(|error| {
        warn!(%section, code = error.code(), "{}; continuing with defaults", error.message());
        Value::Null
    })
}
