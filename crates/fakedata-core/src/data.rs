//! Embedded value pools.
//!
//! Each pool is a newline-delimited asset compiled into the binary and split
//! into lines the first time it is requested.

use std::sync::OnceLock;

macro_rules! value_pool {
    ($(#[$meta:meta])* $name:ident => $file:literal) => {
        $(#[$meta])*
        pub fn $name() -> &'static [&'static str] {
            static POOL: OnceLock<Vec<&'static str>> = OnceLock::new();
            POOL.get_or_init(|| lines(include_str!(concat!("../assets/", $file))))
        }
    };
}

value_pool!(
    /// Capitalized first names.
    first_names => "first_names.txt"
);
value_pool!(
    /// Capitalized last names.
    last_names => "last_names.txt"
);
value_pool!(
    /// Full country names.
    countries => "countries.txt"
);
value_pool!(
    /// ISO 3166 alpha-2 country codes.
    country_codes => "country_codes.txt"
);
value_pool!(
    /// Full US state names.
    states => "states.txt"
);
value_pool!(
    /// Two-letter US state codes.
    state_codes => "state_codes.txt"
);
value_pool!(
    /// IANA timezones in `Area/City` form.
    timezones => "timezones.txt"
);
value_pool!(
    /// Alphanumeric usernames.
    usernames => "usernames.txt"
);
value_pool!(colors => "colors.txt");
value_pool!(product_categories => "product_categories.txt");
value_pool!(product_names => "product_names.txt");
value_pool!(nouns => "nouns.txt");
value_pool!(adjectives => "adjectives.txt");
value_pool!(cities => "cities.txt");
value_pool!(
    /// International calling codes, without the leading `+`.
    calling_codes => "calling_codes.txt"
);

fn lines(raw: &'static str) -> Vec<&'static str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pools_are_populated_without_blank_entries() {
        let pools: &[(&str, &[&str])] = &[
            ("first_names", first_names()),
            ("last_names", last_names()),
            ("countries", countries()),
            ("country_codes", country_codes()),
            ("states", states()),
            ("state_codes", state_codes()),
            ("timezones", timezones()),
            ("usernames", usernames()),
            ("colors", colors()),
            ("product_categories", product_categories()),
            ("product_names", product_names()),
            ("nouns", nouns()),
            ("adjectives", adjectives()),
            ("cities", cities()),
            ("calling_codes", calling_codes()),
        ];

        for (name, pool) in pools {
            assert!(!pool.is_empty(), "{name} is empty");
            assert!(pool.iter().all(|value| !value.is_empty()), "{name}");
        }
    }

    #[test]
    fn state_codes_are_two_letters() {
        assert_eq!(state_codes().len(), 50);
        assert!(state_codes().iter().all(|code| code.len() == 2));
    }

    #[test]
    fn calling_codes_are_numeric() {
        assert!(
            calling_codes()
                .iter()
                .all(|code| code.chars().all(|ch| ch.is_ascii_digit()))
        );
    }
}
