use crate::error::ParseError;
use crate::types::Item;

/// Weight used when an item definition has no weight part.
const DEFAULT_WEIGHT: i64 = 1;

/// Parses a random definition into its ordered items.
///
/// Items are delimited by `;`. Each item is a value (any string, the empty
/// string included) optionally followed by `:` and a weight. The weight
/// tolerates surrounding whitespace and defaults to 1. Segments after a
/// second `:` are ignored.
pub fn parse_definition(definition: &str) -> Result<Vec<Item>, ParseError> {
    definition.split(';').map(parse_item).collect()
}

fn parse_item(segment: &str) -> Result<Item, ParseError> {
    let mut parts = segment.split(':');
    let value = parts.next().unwrap_or_default().to_string();
    let weight = match parts.next() {
        Some(text) => parse_weight(text)?,
        None => DEFAULT_WEIGHT,
    };
    Ok(Item { value, weight })
}

fn parse_weight(text: &str) -> Result<i64, ParseError> {
    // Going through u64 rejects a sign outright; the range check keeps the
    // weight inside the signed 64-bit sums the sampler accumulates.
    let raw: u64 = text.trim().parse().map_err(|_| ParseError::InvalidWeight {
        text: text.to_string(),
    })?;
    i64::try_from(raw).map_err(|_| ParseError::InvalidWeight {
        text: text.to_string(),
    })
}

/// A pick request: the definition plus how many draws to make and how often
/// a literal item entry may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRequest {
    pub definition: String,
    pub result_count: u64,
    /// `<= 0` means no cap: sampling with replacement.
    pub max_repeat: i64,
}

impl PickRequest {
    /// Parses `<RandomDefinition>[ <ResultCount>[ <MaxRepCount>]]`.
    ///
    /// Up to two trailing whitespace-separated digit runs are read as counts
    /// (the rightmost is the repeat cap only when both are present); whatever
    /// non-empty remainder is left makes up the definition. A lone digit run
    /// is therefore a definition, never a count.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut definition = input.trim();
        let mut counts: Vec<&str> = Vec::new();
        while counts.len() < 2 {
            match split_trailing_digits(definition) {
                Some((head, digits)) => {
                    counts.push(digits);
                    definition = head;
                }
                None => break,
            }
        }
        if definition.is_empty() {
            return Err(ParseError::EmptyDefinition);
        }

        // Counts were collected right to left.
        let (result_count, max_repeat) = match counts.as_slice() {
            [] => (1, -1),
            [count] => (parse_count(count)?, -1),
            [cap, count] => (parse_count(count)?, parse_count(cap)?),
            _ => unreachable!("at most two trailing counts are split off"),
        };

        Ok(Self {
            definition: definition.to_string(),
            result_count: result_count as u64,
            max_repeat,
        })
    }
}

fn parse_count(text: &str) -> Result<i64, ParseError> {
    text.parse().map_err(|_| ParseError::InvalidCount {
        text: text.to_string(),
    })
}

/// Splits off a trailing all-digit token, keeping a non-empty head.
fn split_trailing_digits(input: &str) -> Option<(&str, &str)> {
    let index = input.rfind(|c: char| c.is_ascii_whitespace())?;
    let token = &input[index + 1..];
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let head = input[..index].trim_end();
    if head.is_empty() {
        return None;
    }
    Some((head, token))
}
