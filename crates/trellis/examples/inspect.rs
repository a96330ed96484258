//! Example: Inspect a tabular data file as a Trellis session.
//!
//! Usage:
//!   cargo run --example inspect -- <file_path>
//!
//! Example:
//!   cargo run --example inspect -- scores.csv

use std::env;
use std::path::Path;
use std::process;

use trellis::{Loader, SourceFormat};
use trellis_formula::{Formula, Function, evaluate};

fn main() -> trellis::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example inspect -- <file_path>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example inspect -- scores.csv");
        process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: file not found: {file_path}");
        process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{separator}");
    println!("Trellis Session: {file_path}");
    println!("{separator}");
    println!();

    let source = Loader::new().load_path(path)?;
    let format = match source.format {
        SourceFormat::Delimited { delimiter } => {
            format!("delimited ({:?})", delimiter as char)
        }
        SourceFormat::Json => "json".to_string(),
    };

    println!("## Source");
    println!("  File: {file_path}");
    println!("  Format: {format}");
    println!("  Rows: {}", source.table.row_count());
    println!("  Columns: {}", source.table.column_count());
    println!();

    println!("## Schema ({} columns)", source.schema.column_count());
    println!();
    for column in &source.schema.columns {
        let range = match (column.min, column.max) {
            (Some(min), Some(max)) => format!("[{min}, {max}]"),
            _ => "-".to_string(),
        };
        println!(
            "  {:20} {:8} nullable={:<6} distinct={:<5} range={}",
            column.name,
            format!("{:?}", column.column_type),
            column.nullable,
            column.distinct_count,
            range
        );
        if !column.sample_values.is_empty() {
            println!("                       samples: {:?}", column.sample_values);
        }
    }
    println!();

    let numeric: Vec<(usize, String)> = source
        .schema
        .columns
        .iter()
        .enumerate()
        .filter(|(_, column)| column.is_numeric())
        .map(|(index, column)| (index, column.name.clone()))
        .collect();

    if !numeric.is_empty() {
        println!("## Aggregates");
        println!();
        for (index, name) in &numeric {
            let values: Vec<&str> = source.table.column_values(*index).collect();
            for function in Function::ALL {
                let label = Formula {
                    function,
                    column: name.clone(),
                }
                .to_string();
                match evaluate(function, &values) {
                    Ok(result) => println!("  {label:24} = {result}"),
                    Err(error) => println!("  {label:24} ! {error}"),
                }
            }
            println!();
        }
    }

    let session = source.into_session()?;
    println!("## Document ({} records)", session.records().len());
    println!();
    println!("{}", session.json_text());
    println!();
    println!("{separator}");

    Ok(())
}
