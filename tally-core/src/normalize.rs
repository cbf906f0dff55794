//! Transaction description normalization for keyword matching.
//!
//! UK bank exports decorate the merchant name with channel codes
//! ("TESCO STORES 1234 CLP") and embedded dates ("PAYMENT ON 05 JAN"),
//! neither of which should take part in category matching.

use regex::Regex;
use std::sync::OnceLock;

/// Trailing payment-method/channel codes stripped from descriptions.
/// Each appears space-separated at the end of the raw string.
const CHANNEL_CODES: [&str; 7] = ["CPM", "CLP", "BCC", "DDR", "BGC", "STO", "FT"];

fn date_fragment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Matches fragments like " ON 05 JAN" after uppercasing.
    RE.get_or_init(|| Regex::new(r"\s+ON\s+\d{2}\s+[A-Z]{3}").unwrap())
}

/// Canonicalize a raw transaction description.
///
/// Uppercases and trims, removes embedded `ON DD MMM` date fragments,
/// strips trailing channel codes until none remain, and collapses
/// whitespace runs to single spaces.
///
/// Pure and idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    let mut details = date_fragment_re().replace_all(&upper, "").into_owned();

    // Codes can stack ("REVOLUT BGC FT"), so strip to a fixed point.
    loop {
        let mut stripped = false;
        for code in CHANNEL_CODES {
            let suffix = format!(" {code}");
            if details.ends_with(&suffix) {
                let keep = details[..details.len() - suffix.len()].trim_end().len();
                details.truncate(keep);
                stripped = true;
            }
        }
        if !stripped {
            break;
        }
    }

    details.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercases_and_trims() {
        assert_eq!(normalize("  tesco stores  "), "TESCO STORES");
    }

    #[test]
    fn test_strips_trailing_channel_code() {
        assert_eq!(normalize("TESCO STORES DDR"), "TESCO STORES");
        assert_eq!(normalize("COOP GROUP FOOD CLP"), "COOP GROUP FOOD");
        assert_eq!(normalize("REVOLUT LTD FT"), "REVOLUT LTD");
    }

    #[test]
    fn test_code_only_stripped_at_end() {
        // "DDR" mid-string is part of the description, not a channel code.
        assert_eq!(normalize("DDR SERVICES LTD"), "DDR SERVICES LTD");
    }

    #[test]
    fn test_strips_stacked_channel_codes() {
        assert_eq!(normalize("SAVINGS TRANSFER BGC FT"), "SAVINGS TRANSFER");
        // Out of list order still reaches the fixed point.
        assert_eq!(normalize("TESCO CLP DDR"), "TESCO");
    }

    #[test]
    fn test_strips_embedded_date_fragment() {
        assert_eq!(normalize("PAYMENT ON 05 JAN REF123"), "PAYMENT REF123");
        assert_eq!(normalize("CARD PAYMENT ON 14 DEC"), "CARD PAYMENT");
    }

    #[test]
    fn test_date_fragment_then_exposed_code() {
        // Removing the date exposes a trailing code, which is still stripped.
        assert_eq!(normalize("GYM MEMBERSHIP DDR ON 01 FEB"), "GYM MEMBERSHIP");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("AMAZON   MARKETPLACE\tUK"), "AMAZON MARKETPLACE UK");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "TESCO STORES 1234 CLP",
            "payment on 05 jan ref123",
            "GYM MEMBERSHIP DDR ON 01 FEB",
            "TESCO CLP DDR",
            "  mixed   Case\twith   gaps  ",
            "",
        ];
        for raw in inputs {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }
}
