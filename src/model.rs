// Creature record - the flat value extracted from one API response

use serde::{Deserialize, Serialize};

/// CreatureRecord - Immutable profile of one creature
///
/// Constructed once by the parser from a remote response, never mutated.
/// `id` is the unique key inside the watchlist; weight is in hectograms and
/// height in decimeters, as the API reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub id: u32,
    pub name: String,
    pub weight: i64,
    pub height: i64,
    /// Defaults to 0 when the API omits it
    pub base_experience: i64,
    /// First listed ability, empty when the creature has none
    pub primary_ability: String,
    /// First listed move, empty when the creature has none
    pub primary_move: String,
    /// Official artwork URL, empty when the API has no artwork
    pub image_url: String,
}

impl CreatureRecord {
    /// Label shown in the watchlist panel, e.g. `#25 - Pikachu`
    pub fn list_label(&self) -> String {
        format!("#{} - {}", self.id, prettify(&self.name))
    }

    /// Ability name for display (`solar-power` -> `Solar Power`)
    pub fn display_ability(&self) -> String {
        prettify(&self.primary_ability)
    }

    /// Move name for display (`mega-punch` -> `Mega Punch`)
    pub fn display_move(&self) -> String {
        prettify(&self.primary_move)
    }
}

/// Capitalize each word of an API slug, with `-` rendered as a space
pub fn prettify(s: &str) -> String {
    s.replace('-', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pikachu() -> CreatureRecord {
        CreatureRecord {
            id: 25,
            name: "pikachu".to_string(),
            weight: 60,
            height: 4,
            base_experience: 112,
            primary_ability: "static".to_string(),
            primary_move: "mega-punch".to_string(),
            image_url: "https://example.com/25.png".to_string(),
        }
    }

    #[test]
    fn test_list_label() {
        assert_eq!(pikachu().list_label(), "#25 - Pikachu");
    }

    #[test]
    fn test_prettify_single_word() {
        assert_eq!(prettify("pikachu"), "Pikachu");
    }

    #[test]
    fn test_prettify_hyphenated_slug() {
        assert_eq!(prettify("mega-punch"), "Mega Punch");
        assert_eq!(prettify("mr-mime"), "Mr Mime");
    }

    #[test]
    fn test_prettify_empty() {
        assert_eq!(prettify(""), "");
    }

    #[test]
    fn test_display_helpers() {
        let record = pikachu();
        assert_eq!(record.display_ability(), "Static");
        assert_eq!(record.display_move(), "Mega Punch");
    }
}
