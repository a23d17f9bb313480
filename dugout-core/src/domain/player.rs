//! Player identity as the providers key it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A player as the report pipeline identifies one.
///
/// `mlbam_id` is the primary key used by the league stats API, the
/// event-level source, and the media host. `bbref_id` is the secondary key
/// the splits source uses; it is usually unknown at construction and filled
/// in by a reverse lookup the first time splits are requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub mlbam_id: u32,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbref_id: Option<String>,
}

impl Player {
    pub fn new(mlbam_id: u32, full_name: impl Into<String>) -> Self {
        Self {
            mlbam_id,
            full_name: full_name.into(),
            bbref_id: None,
        }
    }

    pub fn with_bbref_id(mut self, bbref_id: impl Into<String>) -> Self {
        self.bbref_id = Some(bbref_id.into());
        self
    }

    /// Lowercase, underscore-separated form of the display name, safe for
    /// file names. Accented and other non-ASCII characters collapse into
    /// separators rather than being dropped silently into the name.
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.full_name.len());
        let mut pending_sep = false;
        for c in self.full_name.chars() {
            if c.is_ascii_alphanumeric() {
                if pending_sep && !slug.is_empty() {
                    slug.push('_');
                }
                slug.push(c.to_ascii_lowercase());
                pending_sep = false;
            } else {
                pending_sep = true;
            }
        }
        slug
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name, self.mlbam_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_lowercase_underscored() {
        let p = Player::new(694973, "Paul Skenes");
        assert_eq!(p.slug(), "paul_skenes");
    }

    #[test]
    fn slug_collapses_punctuation_and_accents() {
        let p = Player::new(665926, "Ranger Suárez");
        assert_eq!(p.slug(), "ranger_su_rez");
        let p = Player::new(607644, "J.T. Realmuto");
        assert_eq!(p.slug(), "j_t_realmuto");
    }

    #[test]
    fn slug_has_no_edge_separators() {
        let p = Player::new(1, " Luis García Jr. ");
        assert!(!p.slug().starts_with('_'));
        assert!(!p.slug().ends_with('_'));
    }

    #[test]
    fn bbref_id_starts_unknown() {
        let p = Player::new(545361, "Mike Trout");
        assert!(p.bbref_id.is_none());
        let p = p.with_bbref_id("troutmi01");
        assert_eq!(p.bbref_id.as_deref(), Some("troutmi01"));
    }
}
