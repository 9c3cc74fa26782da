use super::{Rule, RuleError};
use crate::catalog::Catalog;
use crate::neighborhood::Neighborhood;

/// Built-in rule presets as (notation, name).
const RULE_PRESETS: &[(&str, Option<&str>)] = &[
    ("B3/S23", Some("Life")),
    ("B1/S012345678", Some("H-trees")),
    ("B3/S12345", Some("Maze")),
    ("B3/S1234", Some("Mazectric")),
    ("B35678/S5678", Some("Diamoeba")),
    ("B345/S4567", Some("Assimilation")),
    ("B2/S", Some("Seeds")),
    ("B234/S", Some("Serviettes")),
    ("B3/S45678", Some("Coral")),
    ("B25/S4", None),
    ("B3/S012345678", Some("Life without Death")),
    ("B34/S34", Some("34 Life")),
    ("B1357/S1357", Some("Replicator")),
    ("B36/S125", Some("2x2")),
    ("B36/S23", Some("HighLife")),
    ("B3678/S34678", Some("Day & Night")),
    ("B368/S245", Some("Morley")),
    ("B4678/S35678", Some("Anneal")),
    ("B1/S134567", Some("Snakeskin")),
    ("B1/S1", Some("Gnarl")),
    ("B38/S238", Some("HoneyLife")),
    ("B3678/S135678", Some("Castles")),
];

/// Parses every preset. A failure here is a bug in the table above.
pub fn builtin_rules() -> Result<Catalog<Rule>, RuleError> {
    let rules = RULE_PRESETS
        .iter()
        .map(|&(notation, name)| Rule::parse(notation, name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Catalog::new(rules).expect("rule preset table is not empty"))
}

pub fn builtin_neighborhoods() -> Catalog<Neighborhood> {
    Catalog::new(vec![Neighborhood::moore(), Neighborhood::von_neumann()])
        .expect("neighborhood preset table is not empty")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_presets_parse() {
        let rules = builtin_rules().unwrap();
        assert_eq!(rules.len(), RULE_PRESETS.len());
        assert_eq!(rules.current().to_string(), "B3/S23 - Life");
    }

    #[test]
    fn unnamed_preset_displays_bare_notation() {
        let rules = builtin_rules().unwrap();
        assert!(rules.iter().any(|r| r.to_string() == "B25/S4"));
    }

    #[test]
    fn neighborhoods_start_with_moore() {
        let hoods = builtin_neighborhoods();
        assert_eq!(hoods.len(), 2);
        assert_eq!(hoods.current().name(), "Moore");
    }
}
