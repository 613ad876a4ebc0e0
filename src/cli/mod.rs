//! CLI command handling
//!
//! Inspects and converts fixture files outside of a test run.

use std::path::Path;

use crate::commands::Commands;
use crate::common::paths::{find_fixture, fixture_path};
use crate::common::{Config, Error, Result};
use crate::fixture::{read_table, write_table, Format};
use crate::scenario::{feature_title, file_stem};

/// Dispatch a CLI command
pub fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Name { test, data_dir } => {
            let config = Config::load()?;
            let data_dir = data_dir.unwrap_or(config.data_dir);
            let title = feature_title(&test);
            let stem = file_stem(&title);

            println!("Feature: {}", title);
            println!("Stem:    {}", stem);
            match find_fixture(&data_dir, &stem, &config.suffix) {
                Some(path) => println!("Fixture: {}", path.display()),
                None => println!(
                    "Fixture: {} (not created yet)",
                    fixture_path(&data_dir, &stem, &config.suffix).display()
                ),
            }

            Ok(())
        }

        Commands::Check { file } => {
            let (format, table) = read_table(&file)?;
            let records: usize = table.values().map(Vec::len).sum();

            println!(
                "{}: {} context(s), {} record(s) [{}]",
                file.display(),
                table.len(),
                records,
                format.extension()
            );
            for (context, golds) in &table {
                println!("  {:>3}  {}", golds.len(), context);
            }

            Ok(())
        }

        Commands::Get {
            file,
            context,
            key,
            index,
        } => {
            let (_, table) = read_table(&file)?;
            let golds = table.get(&context).ok_or_else(|| Error::ContextNotFound {
                context: context.clone(),
                path: file.display().to_string(),
            })?;
            let gold = golds.get(index).ok_or(Error::RecordIndex {
                context: context.clone(),
                index,
                len: golds.len(),
            })?;

            let value = gold.get(&key)?;
            println!("{}", serde_json::to_string_pretty(&value)?);

            Ok(())
        }

        Commands::Convert { source, dest } => convert(&source, &dest),
    }
}

/// Re-encode a fixture file, keeping context and record order
fn convert(source: &Path, dest: &Path) -> Result<()> {
    let (from, table) = read_table(source)?;
    let to = Format::from_path(dest)?;
    write_table(dest, to, &table)?;

    println!(
        "Converted {} ({}) -> {} ({})",
        source.display(),
        from.extension(),
        dest.display(),
        to.extension()
    );
    tracing::info!(contexts = table.len(), "fixture converted");

    Ok(())
}
