//! Roster name listing.
//!
//! Two strategies behind one trait. [`StructuredRoster`] reads the stats
//! API roster records and should always be preferred. [`FreeTextRoster`]
//! pattern-matches names out of the classic formatted text listing
//! ("#30  P   Paul Skenes") and exists only for sources that serve
//! nothing better; the pattern knows about jersey markers, position
//! tokens, accented characters, and generational suffixes, and nothing
//! else, so unusual listings can drop names.

use crate::client::UnifiedDataClient;
use crate::domain::Season;
use crate::providers::ProviderError;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

pub trait RosterSource {
    /// Display names of every player on a team's active roster.
    fn roster_names(&self, team_id: u32, season: Season) -> Result<Vec<String>, ProviderError>;
}

/// Roster names from the structured roster records.
pub struct StructuredRoster<'a> {
    client: &'a UnifiedDataClient,
}

impl<'a> StructuredRoster<'a> {
    pub fn new(client: &'a UnifiedDataClient) -> Self {
        Self { client }
    }
}

impl RosterSource for StructuredRoster<'_> {
    fn roster_names(&self, team_id: u32, season: Season) -> Result<Vec<String>, ProviderError> {
        let entries = self.client.active_roster(team_id, season)?;
        Ok(entries.into_iter().map(|e| e.full_name).collect())
    }
}

/// Roster names pattern-matched out of the free-text listing.
pub struct FreeTextRoster<'a> {
    client: &'a UnifiedDataClient,
}

impl<'a> FreeTextRoster<'a> {
    pub fn new(client: &'a UnifiedDataClient) -> Self {
        Self { client }
    }
}

impl RosterSource for FreeTextRoster<'_> {
    fn roster_names(&self, team_id: u32, season: Season) -> Result<Vec<String>, ProviderError> {
        let text = self.client.active_roster_text(team_id, season)?;
        let names = extract_names(&text);
        debug!(
            team_id,
            lines = text.lines().count(),
            names = names.len(),
            "extracted roster names from text listing"
        );
        Ok(names)
    }
}

fn name_pattern() -> &'static Regex {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    NAME_RE.get_or_init(|| {
        Regex::new(r"#?\s*[A-Z]+\s+([A-Za-zÁÉÍÓÚáéíóúñÑ'.\-\s]+(?:\s(?:Jr\.|Sr\.|II|III|IV|V))?)")
            .expect("static pattern")
    })
}

/// Pull player display names out of a formatted roster listing, one line
/// per player. Lines that do not look like roster slots are skipped.
pub fn extract_names(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            name_pattern()
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_names_from_classic_listing() {
        let text = "#30  P   Paul Skenes\n\
                    #10  C   Joey Bart\n\
                    #13  3B  Ke'Bryan Hayes";
        assert_eq!(
            extract_names(text),
            vec!["Paul Skenes", "Joey Bart", "Ke'Bryan Hayes"]
        );
    }

    #[test]
    fn handles_accents_initials_and_suffixes() {
        let text = "#56  P   Ranger Suárez\n\
                    #10  C   J.T. Realmuto\n\
                    #27  1B  Vladimir Guerrero Jr.\n\
                    #       OF  Luis Robert Jr.";
        assert_eq!(
            extract_names(text),
            vec![
                "Ranger Suárez",
                "J.T. Realmuto",
                "Vladimir Guerrero Jr.",
                "Luis Robert Jr."
            ]
        );
    }

    #[test]
    fn skips_lines_without_roster_shape() {
        let text = "active roster as of today\n\
                    #30  P   Paul Skenes\n\
                    (updated nightly)";
        assert_eq!(extract_names(text), vec!["Paul Skenes"]);
    }

    #[test]
    fn empty_text_yields_no_names() {
        assert!(extract_names("").is_empty());
    }
}
