// MRZ decoding and intelligence-mining CLI

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mrzmine::models::{MrzResult, RiskSeverity};
use mrzmine::MrzProcessor;

/// Decode and validate Machine Readable Zone text per ICAO Doc 9303.
#[derive(Parser)]
#[command(name = "mrzmine", version, about)]
struct Args {
    /// File holding the MRZ lines; reads stdin when omitted
    input: Option<PathBuf>,
    /// Repair common OCR confusions in numeric/alpha zones before decoding
    #[arg(long)]
    auto_fix: bool,
    /// Emit the full result record as JSON
    #[arg(long)]
    json: bool,
}

fn read_input(args: &Args) -> std::io::Result<String> {
    match &args.input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

// Print a detailed decode report
fn print_detailed_report(result: &MrzResult) {
    println!("\n===============================================");
    println!("            MRZ DECODE DETAILED REPORT");
    println!("===============================================\n");

    let fields = &result.fields;
    println!("DOCUMENT INFORMATION:");
    println!("  Format: {:?}", result.format);
    println!("  Class: {:?}", result.class);
    println!(
        "  Type Code: {}",
        fields.document_type_raw.as_deref().unwrap_or("-")
    );
    println!(
        "  Type Tag: {}",
        fields.document_type.as_deref().unwrap_or("-")
    );
    println!(
        "  Issuing State: {}",
        fields.issuing_state.as_deref().unwrap_or("-")
    );
    println!(
        "  Document Number: {}",
        fields.document_number.as_deref().unwrap_or("-")
    );
    println!("  Surname: {}", fields.surname.as_deref().unwrap_or("-"));
    println!(
        "  Given Names: {}",
        fields.given_names.as_deref().unwrap_or("-")
    );
    println!(
        "  Nationality: {}",
        fields.nationality.as_deref().unwrap_or("-")
    );
    println!("  Sex: {}", fields.sex.as_deref().unwrap_or("-"));
    println!(
        "  Date of Birth: {}",
        fields.birth_date.as_deref().unwrap_or("-")
    );
    println!(
        "  Date of Expiry: {}",
        fields.expiry_date.as_deref().unwrap_or("-")
    );
    println!(
        "  Optional Data: {}",
        fields.optional_data.as_deref().unwrap_or("-")
    );

    if !result.calc_logs.is_empty() {
        println!("\nCHECK DIGITS:");
        for line in &result.calc_logs {
            println!("  {}", line);
        }
    }

    println!("\nDERIVED:");
    if let Some(date) = result.parsed.birth_date {
        println!("  Birth Date: {}", date);
    }
    if let Some(date) = result.parsed.expiry_date {
        println!("  Expiry Date: {}", date);
    }
    if let Some(days) = result.parsed.days_until_expiry {
        println!("  Days Until Expiry: {}", days);
    }
    if let Some(age) = result.parsed.age {
        println!("  Age: {}", age);
    }
    if let Some(extended) = &result.parsed.extended {
        println!("  {}: {}", extended.title, extended.text);
        if let Some(truncation) = extended.truncation {
            println!("  Declared Truncation: {}", truncation);
        }
    }

    if !result.risks.is_empty() {
        println!("\nRISK FINDINGS:");
        for risk in &result.risks {
            println!(
                "  - [{}] {}: {}",
                match risk.severity {
                    RiskSeverity::Warn => "WARN",
                    RiskSeverity::Critical => "CRITICAL",
                },
                risk.category,
                risk.detail
            );
        }
    }

    println!(
        "\nMRZ decode result: {}",
        if result.valid { "VALID" } else { "INVALID" }
    );
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let raw = match read_input(&args) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Error reading input: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let result = MrzProcessor::new().process(&raw, args.auto_fix);

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(rendered) => println!("{}", rendered),
            Err(err) => {
                eprintln!("Error serializing result: {}", err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_detailed_report(&result);
    }

    if result.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
