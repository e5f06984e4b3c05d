use lazy_static::lazy_static;
use regex::Regex;

/// One jurisdiction-specific interpretation of the optional-data field.
/// A rule either constrains extraction with a pattern (first match wins) or
/// passes the cleaned text through under its label.
pub struct MiningRule {
    pub countries: &'static [&'static str],
    pub label: &'static str,
    pub pattern: Option<Regex>,
}

fn rule(countries: &'static [&'static str], label: &'static str, pattern: Option<&str>) -> MiningRule {
    MiningRule {
        countries,
        label,
        // Patterns are fixed literals; a failure here is a programming error
        // caught by the table test below.
        pattern: pattern.map(|p| Regex::new(p).expect("invalid mining rule pattern")),
    }
}

lazy_static! {
    /// Ordered country-keyed decision table for personal-number-like data
    /// embedded in the optional field. First matching rule wins.
    pub static ref MINING_RULES: Vec<MiningRule> = vec![
        rule(&["SWE"], "Personal identity number", Some(r"\d{6}\d{4}")),
        rule(&["NOR"], "Birth number", Some(r"\d{11}")),
        rule(&["DNK"], "CPR number", Some(r"\d{10}")),
        rule(&["FIN"], "Personal identity code", Some(r"\d{6}[A+-]?\d{3}[0-9A-Z]")),
        rule(&["ISL"], "Kennitala", Some(r"\d{10}")),
        rule(&["NLD"], "Citizen service number", Some(r"\d{9}")),
        rule(&["BEL"], "National register number", Some(r"\d{11}")),
        rule(&["POL"], "PESEL number", Some(r"\d{11}")),
        rule(&["CZE", "SVK"], "Birth number", Some(r"\d{9,10}")),
        rule(&["EST"], "Personal identification code", Some(r"\d{11}")),
        rule(&["LVA"], "Personal code", Some(r"\d{11}")),
        rule(&["LTU"], "Personal code", Some(r"\d{11}")),
        rule(&["ESP"], "DNI number", Some(r"\d{8}[A-Z]")),
        rule(&["MEX"], "CURP", Some(r"[A-Z]{4}\d{6}[A-Z]{6}[0-9A-Z]\d")),
        rule(&["KOR"], "Resident registration number", Some(r"\d{13}")),
        rule(&["TWN"], "National ID number", Some(r"[A-Z]\d{9}")),
        rule(&["SGP"], "NRIC number", Some(r"[STFG]\d{7}[A-Z]")),
        rule(&["MYS"], "MyKad number", Some(r"\d{12}")),
        rule(&["THA"], "National ID number", Some(r"\d{13}")),
        rule(&["IRN"], "National identity number", None),
        rule(&["IND"], "File number", None),
    ];
}

pub fn rule_for(country: &str) -> Option<&'static MiningRule> {
    MINING_RULES
        .iter()
        .find(|r| r.countries.contains(&country))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_compiles_and_resolves() {
        // Forces every lazy regex to compile.
        assert!(MINING_RULES.len() >= 20);
        assert!(rule_for("KOR").is_some());
        assert!(rule_for("CZE").is_some());
        assert!(rule_for("SVK").is_some());
        assert!(rule_for("UTO").is_none());
    }

    #[test]
    fn patterns_match_expected_shapes() {
        let kor = rule_for("KOR").unwrap();
        assert!(kor.pattern.as_ref().unwrap().is_match("9201011234567"));
        let esp = rule_for("ESP").unwrap();
        assert!(esp.pattern.as_ref().unwrap().is_match("12345678Z"));
        let sgp = rule_for("SGP").unwrap();
        assert!(sgp.pattern.as_ref().unwrap().is_match("S1234567D"));
    }
}
