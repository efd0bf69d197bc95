//! Splitting Hungarian free-text address lines into street, house number,
//! floor and doorbell.
//!
//! The input is what customers typed into WooCommerce's two address fields,
//! already without city and postcode. Tiers, first match wins:
//!
//! 1. **Street type**: the last street-type word (`utca`, `u.`, `tér`,
//!    `körút`, ...) followed by a house number. Everything up to and
//!    including that word is the street. Words like `park` or `kert` later
//!    in the line do not count unless a number follows them.
//! 2. **Generic split**: the text before the first whitespace-separated
//!    number is the street.
//! 3. **Fallback**: the whole trimmed text is the street.
//!
//! The text after the street goes through [`split_remainder`], which peels
//! off the house number and then tries floor/doorbell patterns. A remainder
//! that fits none of them is copied into `floor` verbatim and flagged as
//! [`ParseConfidence::UnparsedRemainder`].

use std::sync::LazyLock;

use farmbox_core::{ParseConfidence, ParsedAddress};
use regex::Regex;

/// Street-type words, full and abbreviated. The optional trailing dot is
/// matched by the surrounding pattern.
const STREET_TYPES: &[&str] = &[
    "utca",
    "utcája",
    "u",
    "út",
    "útja",
    "körút",
    "krt",
    "sugárút",
    "tér",
    "tere",
    "köz",
    "sor",
    "sétány",
    "stny",
    "fasor",
    "park",
    "liget",
    "lakótelep",
    "ltp",
    "rakpart",
    "rkp",
    "dűlő",
    "határút",
    "lejtő",
    "lépcső",
    "kert",
];

static STREET_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = STREET_TYPES.join("|");
    Regex::new(&format!(r"(?i)^(.*\b(?:{alternatives})\.?)\s+(\d.*)$"))
        .expect("valid street type regex")
});

static GENERIC_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+(\d.*)$").expect("valid generic split regex"));

/// `14`, `14/A`, `14.b`, `14A`.
static HOUSE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:[/.][\p{L}\d]+|\p{L}\b)?)").expect("valid house number regex")
});

/// Optional floor prefix (`2.`, `2. em.`, `2 emelet`, `fsz.`) followed by a
/// mandatory door number with an optional `ajtó`/`door` label on either side.
static FLOOR_DOOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^
        (?:
            (?:
                (?P<floor>\d+)\s*(?:\.\s*(?:em(?:elet)?\.?)?|(?:em(?:elet)?\.?|floor))
              | (?P<ground>fsz|földszint)\.?
            )
            \s*[,/]?\s*
        )?
        (?:(?:ajtó|ajto|door)\s*:?\s*)?
        (?P<door>\d+)
        \s*\.?\s*(?:ajtó|ajto|door)?\.?
        $",
    )
    .expect("valid floor/door regex")
});

static SLASH_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*/\s*(\d+)$").expect("valid slash split regex"));

/// Splits `address_text` into structured components.
///
/// Never fails: text that matches no pattern comes back as the street with
/// every other field empty.
#[must_use]
pub fn parse_address(address_text: &str) -> ParsedAddress {
    let normalized = address_text.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(caps) = STREET_TYPE_RE.captures(&normalized) {
        let street = caps[1].trim().to_string();
        tracing::debug!(%street, "address matched street type tier");
        return with_remainder(street, &caps[2]);
    }

    if let Some(caps) = GENERIC_SPLIT_RE.captures(&normalized) {
        let street = caps[1].trim().to_string();
        tracing::debug!(%street, "address matched generic split tier");
        return with_remainder(street, &caps[2]);
    }

    ParsedAddress {
        street: address_text.trim().to_string(),
        house_number: String::new(),
        floor: String::new(),
        doorbell: String::new(),
        confidence: ParseConfidence::Unstructured,
    }
}

fn with_remainder(street: String, remainder: &str) -> ParsedAddress {
    let parts = split_remainder(remainder);
    ParsedAddress {
        street,
        house_number: parts.house_number,
        floor: parts.floor,
        doorbell: parts.doorbell,
        confidence: parts.confidence,
    }
}

struct RemainderParts {
    house_number: String,
    floor: String,
    doorbell: String,
    confidence: ParseConfidence,
}

/// Parses the text after the street: house number first, then floor and door.
fn split_remainder(remainder: &str) -> RemainderParts {
    let remainder = remainder.trim();
    let (house_number, rest) = match HOUSE_NUMBER_RE.find(remainder) {
        Some(m) => (m.as_str().to_string(), &remainder[m.end()..]),
        None => (String::new(), remainder),
    };
    let rest = rest.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | '-'));
    let rest = rest.trim();

    if rest.is_empty() {
        return RemainderParts {
            house_number,
            floor: String::new(),
            doorbell: String::new(),
            confidence: ParseConfidence::Parsed,
        };
    }

    if let Some(caps) = FLOOR_DOOR_RE.captures(rest) {
        let floor = caps
            .name("floor")
            .or_else(|| caps.name("ground"))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let doorbell = caps
            .name("door")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        return RemainderParts {
            house_number,
            floor,
            doorbell,
            confidence: ParseConfidence::Parsed,
        };
    }

    if let Some(caps) = SLASH_SPLIT_RE.captures(rest) {
        return RemainderParts {
            house_number,
            floor: caps[1].to_string(),
            doorbell: caps[2].to_string(),
            confidence: ParseConfidence::Parsed,
        };
    }

    tracing::warn!(remainder = %rest, "address remainder kept verbatim as floor");
    RemainderParts {
        house_number,
        floor: rest.to_string(),
        doorbell: String::new(),
        confidence: ParseConfidence::UnparsedRemainder {
            raw: rest.to_string(),
        },
    }
}

#[cfg(test)]
#[path = "address_test.rs"]
mod tests;
