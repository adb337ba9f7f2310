//! Postcode classification and country inference.
//!
//! The storefront serves two pickup markets, and their postcodes happen to be
//! distinguishable by length alone: 6 digits means an Indian PIN code, 4
//! digits an Australian postcode. This is a business rule keyed on digit
//! count, not general postcode-format detection — extend the table if the
//! store opens a market whose postcode length collides.

/// Country scoping parameters applied to provider queries for a classified
/// postcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryHint {
    /// ISO 3166-1 alpha-2 code, as Google's `components` filter expects it.
    pub iso2: &'static str,
    /// Lowercase code for Nominatim's `countrycodes` parameter.
    pub nominatim: &'static str,
}

const COUNTRY_BY_DIGIT_COUNT: &[(usize, CountryHint)] = &[
    (
        6,
        CountryHint {
            iso2: "IN",
            nominatim: "in",
        },
    ),
    (
        4,
        CountryHint {
            iso2: "AU",
            nominatim: "au",
        },
    ),
];

/// Returns the country hint for a postal-shaped query, or `None` for
/// freeform text.
///
/// A query is postal-shaped when, after trimming, it consists solely of
/// ASCII digits with a length present in the hint table.
#[must_use]
pub fn country_hint_for(query: &str) -> Option<CountryHint> {
    let trimmed = query.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    COUNTRY_BY_DIGIT_COUNT
        .iter()
        .find(|(len, _)| *len == trimmed.len())
        .map(|(_, hint)| *hint)
}
