//! Keyword and capitalization based intent classifier.
//!
//! Backs the local `/command` endpoint. Place names are taken to be runs of
//! capitalized words that are not themselves command vocabulary, e.g.
//! "How far is New Delhi from current location?" yields `["New Delhi"]`.

use async_trait::async_trait;
use serde_json::json;

use crate::intent::{
    action, CommandClassifier, IntentAction, IntentResponse, ZoomDirection,
    DEFAULT_UNKNOWN_MESSAGE,
};

const LOCATE_WORDS: &[&str] = &["where", "find", "search"];
const DISTANCE_WORDS: &[&str] = &["distance", "between", "from", "to"];
const DISTANCE_PHRASES: &[&str] = &["distance between", "how far", "distance from"];
const DETAIL_WORDS: &[&str] = &["details", "information", "read"];
const DETAIL_PHRASES: &[&str] = &["details about", "information on"];
const ZOOM_WORDS: &[&str] = &["zoom", "in", "out"];
const ZOOM_PHRASES: &[&str] = &["zoom in", "zoom out"];
const CURRENT_LOCATION: &str = "current location";

/// Capitalized words that never start a place name.
const COMMAND_VOCABULARY: &[&str] = &[
    "a", "about", "and", "between", "calculate", "can", "current", "details", "distance",
    "far", "find", "from", "get", "give", "how", "i", "in", "information", "is", "it", "location",
    "me", "much", "on", "out", "please", "read", "search", "show", "tell", "the", "to", "what",
    "where", "zoom",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleClassifier;

impl RuleClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies a command into the backend wire format.
    pub fn classify(&self, command: &str) -> IntentResponse {
        let lower = command.to_lowercase();
        let words = words(&lower);
        let places = extract_places(command);

        let has_word = |set: &[&str]| words.iter().any(|w| set.contains(w));
        let has_phrase = |set: &[&str]| set.iter().any(|p| lower.contains(p));

        if has_word(LOCATE_WORDS) && places.len() == 1 {
            let location = &places[0];
            return respond(
                action::FIND_LOCATION,
                format!("The desired location, '{}', is somewhere here.", location),
                json!({ "location": location }),
            );
        }

        if has_word(DISTANCE_WORDS) && has_phrase(DISTANCE_PHRASES) {
            return match places.as_slice() {
                [first, second, ..] => respond(
                    action::FIND_DISTANCE,
                    format!("Calculating distance between '{}' and '{}'.", first, second),
                    json!({ "place1": first, "place2": second }),
                ),
                [only] if lower.contains(CURRENT_LOCATION) => respond(
                    action::DISTANCE_FROM_CURRENT,
                    format!("Calculating distance from current location to '{}'.", only),
                    json!({ "place1": CURRENT_LOCATION, "place2": only }),
                ),
                _ => unknown("I need at least one location to calculate the distance."),
            };
        }

        if has_word(DETAIL_WORDS) && has_phrase(DETAIL_PHRASES) {
            if places.is_empty() {
                return unknown("I need more information to fetch details.");
            }
            let location = places.join(", ");
            return respond(
                action::READ_DETAILS,
                format!("Fetching details about '{}'.", location),
                json!({ "location": location }),
            );
        }

        if has_word(ZOOM_WORDS) && has_phrase(ZOOM_PHRASES) {
            if places.is_empty() {
                return unknown("I need more information to zoom in or out.");
            }
            let direction = if lower.contains("zoom in") {
                ZoomDirection::In
            } else {
                ZoomDirection::Out
            };
            let location = places.join(", ");
            return respond(
                action::ZOOM,
                format!("Zooming {} on location '{}'.", direction.as_str(), location),
                json!({ "location": location, "zoom": direction.as_str() }),
            );
        }

        unknown(DEFAULT_UNKNOWN_MESSAGE)
    }
}

#[async_trait]
impl CommandClassifier for RuleClassifier {
    async fn dispatch(&self, command: &str) -> IntentAction {
        self.classify(command).into_action()
    }
}

fn respond(action: &str, message: String, details: serde_json::Value) -> IntentResponse {
    IntentResponse {
        action: action.to_string(),
        details: Some(details),
        message: Some(message),
    }
}

fn unknown(message: &str) -> IntentResponse {
    IntentResponse {
        action: action::UNKNOWN.to_string(),
        details: None,
        message: Some(message.to_string()),
    }
}

fn words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Runs of capitalized, non-vocabulary words. Punctuation closes a run.
fn extract_places(command: &str) -> Vec<String> {
    let mut places = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for raw in command.split_whitespace() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
        let is_place_word = word.chars().next().is_some_and(char::is_uppercase)
            && !COMMAND_VOCABULARY.contains(&word.to_lowercase().as_str());

        if is_place_word {
            current.push(word);
        } else if !current.is_empty() {
            places.push(current.join(" "));
            current.clear();
        }

        let closes_run = raw.ends_with(|c: char| matches!(c, ',' | '.' | '?' | '!' | ';' | ':'));
        if closes_run && !current.is_empty() {
            places.push(current.join(" "));
            current.clear();
        }
    }

    if !current.is_empty() {
        places.push(current.join(" "));
    }
    places
}
