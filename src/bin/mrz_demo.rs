use mrzmine::MrzProcessor;

fn main() {
    env_logger::init();

    println!("MRZ Decoder Demo");
    println!("----------------");

    // ICAO Doc 9303 TD3 specimen.
    let specimen = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
                    L898902C36UTO7408122F1204159ZE184226B<<<<<10";

    println!("Decoding specimen passport MRZ...");
    let result = MrzProcessor::new().process(specimen, false);

    println!("\nDECODE RESULT:");
    println!(
        "  Document is {}",
        if result.valid { "VALID" } else { "INVALID" }
    );
    println!(
        "  Holder: {} {}",
        result.fields.surname.as_deref().unwrap_or("-"),
        result.fields.given_names.as_deref().unwrap_or("-")
    );
    println!(
        "  Nationality: {}",
        result.fields.nationality.as_deref().unwrap_or("-")
    );

    println!("\nCHECK DIGITS:");
    for line in &result.calc_logs {
        println!("  {}", line);
    }

    if !result.risks.is_empty() {
        println!("\nRISK FINDINGS:");
        for risk in &result.risks {
            println!("  - {}: {}", risk.category, risk.detail);
        }
    }
}
