use std::sync::Arc;

use fakedata_core::data;
use rand::{Rng, RngCore};

use crate::generators::{
    BoundFn, Generator, GeneratorRegistry, JoinedGenerator, ListGenerator, ParametricGenerator,
    SimpleGenerator,
};
use crate::params::{OptionsError, parse_int_bound};

const DOMAIN_TLDS: &[&str] = &["name", "info", "com", "org", "me", "us"];
const DOMAIN_NAMES: &[&str] = &["example", "test"];
const EVENT_ACTIONS: &[&str] = &["clicked", "purchased", "viewed", "watched"];

/// E.164 numbers carry at most 15 characters here, `+` included.
pub const PHONE_MAX_LEN: usize = 15;
const PHONE_LOCAL_DEFAULT_DIGITS: i64 = 8;
const PHONE_LOCAL_MAX_DIGITS: i64 = 15;
const PHONE_LOCAL_DIGITS_RANGE: (usize, usize) = (8, 12);

pub fn register(registry: &mut GeneratorRegistry) {
    let first_name: Arc<dyn SimpleGenerator> = Arc::new(ListGenerator::new(data::first_names()));
    let last_name: Arc<dyn SimpleGenerator> = Arc::new(ListGenerator::new(data::last_names()));
    let username: Arc<dyn SimpleGenerator> = Arc::new(ListGenerator::new(data::usernames()));
    let domain_name: Arc<dyn SimpleGenerator> = Arc::new(ListGenerator::new(DOMAIN_NAMES));
    let domain_tld: Arc<dyn SimpleGenerator> = Arc::new(ListGenerator::new(DOMAIN_TLDS));
    let domain: Arc<dyn SimpleGenerator> = Arc::new(JoinedGenerator::new(
        Arc::clone(&domain_name),
        ".",
        Arc::clone(&domain_tld),
    ));
    let calling_code: Arc<dyn SimpleGenerator> =
        Arc::new(ListGenerator::new(data::calling_codes()));

    registry.register(Generator::simple(
        "name.first",
        "capitalized first name",
        Arc::clone(&first_name),
    ));
    registry.register(Generator::simple(
        "name.last",
        "capitalized last name",
        Arc::clone(&last_name),
    ));
    registry.register(Generator::simple(
        "name",
        "name.first + \" \" + name.last",
        Arc::new(JoinedGenerator::new(first_name, " ", last_name)),
    ));
    registry.register(Generator::simple(
        "username",
        "username using the pattern \\w+",
        Arc::clone(&username),
    ));
    registry.register(Generator::simple(
        "domain.name",
        "example|test",
        domain_name,
    ));
    registry.register(Generator::simple(
        "domain.tld",
        "name|info|com|org|me|us",
        domain_tld,
    ));
    registry.register(Generator::simple(
        "domain",
        "domain.name + \".\" + domain.tld",
        Arc::clone(&domain),
    ));
    registry.register(Generator::simple(
        "email",
        "username + \"@\" + domain",
        Arc::new(JoinedGenerator::new(username, "@", domain)),
    ));

    list(registry, "country", "full country name", data::countries());
    list(registry, "country.code", "2-letter country code", data::country_codes());
    list(registry, "state", "full US state name", data::states());
    list(registry, "state.code", "2-letter US state code", data::state_codes());
    list(registry, "city", "city name", data::cities());
    list(registry, "timezone", "tz in the form Area/City", data::timezones());
    list(registry, "color", "one word color", data::colors());
    list(registry, "noun", "common noun", data::nouns());
    list(registry, "adjective", "adjective", data::adjectives());
    list(
        registry,
        "product.category",
        "Beauty|Games|Movies|Tools|..",
        data::product_categories(),
    );
    list(
        registry,
        "product.name",
        "invented product name",
        data::product_names(),
    );
    list(
        registry,
        "event.action",
        "clicked|purchased|viewed|watched",
        EVENT_ACTIONS,
    );

    registry.register(Generator::simple(
        "phone.code",
        "international calling code",
        Arc::clone(&calling_code),
    ));
    registry.register(Generator::parametric(
        "phone.local",
        "local phone number. Accepts the number of digits (default: 8)",
        Arc::new(LocalNumberGenerator),
    ));
    registry.register(Generator::simple(
        "phone",
        "E.164 phone number: + calling code + local number",
        Arc::new(PhoneGenerator {
            calling_code,
            local_digits: PHONE_LOCAL_DIGITS_RANGE,
        }),
    ));
}

fn list(
    registry: &mut GeneratorRegistry,
    name: &'static str,
    description: &'static str,
    values: &'static [&'static str],
) {
    registry.register(Generator::simple(
        name,
        description,
        Arc::new(ListGenerator::new(values)),
    ));
}

struct LocalNumberGenerator;

impl ParametricGenerator for LocalNumberGenerator {
    fn bind(&self, options: &str) -> Result<BoundFn, OptionsError> {
        let options = options.trim();
        let digits = if options.is_empty() {
            PHONE_LOCAL_DEFAULT_DIGITS
        } else {
            parse_int_bound("digits", options)?
        };
        if !(1..=PHONE_LOCAL_MAX_DIGITS).contains(&digits) {
            return Err(OptionsError::OutOfRange {
                what: "digits",
                min: 1,
                max: PHONE_LOCAL_MAX_DIGITS,
                value: digits,
            });
        }
        let digits = digits as usize;
        Ok(Box::new(move |rng: &mut dyn RngCore| {
            local_number(digits, rng)
        }))
    }
}

struct PhoneGenerator {
    calling_code: Arc<dyn SimpleGenerator>,
    local_digits: (usize, usize),
}

impl SimpleGenerator for PhoneGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> String {
        let code = self.calling_code.generate(rng);
        let (min, max) = self.local_digits;
        let digits = rng.random_range(min..=max);
        let mut phone = format!("+{code}{}", local_number(digits, rng));
        phone.truncate(PHONE_MAX_LEN);
        phone
    }
}

/// A local number that never starts with 0.
fn local_number(digits: usize, rng: &mut dyn RngCore) -> String {
    let mut number = String::with_capacity(digits);
    for idx in 0..digits {
        let digit = if idx == 0 {
            rng.random_range(1..=9)
        } else {
            rng.random_range(0..=9)
        };
        number.push(char::from(b'0' + digit));
    }
    number
}
