use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::generators::{Generator, GeneratorRegistry, ListGenerator};

const HTTP_METHODS: &[&str] = &["DELETE", "GET", "HEAD", "OPTION", "PATCH", "POST", "PUT"];

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register(Generator::simple("ipv4", "ipv4", Arc::new(ipv4)));
    registry.register(Generator::simple("ipv6", "ipv6", Arc::new(ipv6)));
    registry.register(Generator::simple(
        "mac.address",
        "mac address",
        Arc::new(mac_address),
    ));
    registry.register(Generator::simple(
        "http.method",
        "DELETE|GET|HEAD|OPTION|PATCH|POST|PUT",
        Arc::new(ListGenerator::new(HTTP_METHODS)),
    ));
}

/// First and last octets stay in 1..=253 so the address is never a network
/// or broadcast address.
fn ipv4(rng: &mut dyn RngCore) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.random_range(1..=253),
        rng.random_range(0..255),
        rng.random_range(0..255),
        rng.random_range(1..=253),
    )
}

fn ipv6(rng: &mut dyn RngCore) -> String {
    let groups: Vec<String> = (0..6)
        .map(|_| format!("{:x}", rng.random_range(0..255)))
        .collect();
    format!("2001:cafe:{}", groups.join(":"))
}

fn mac_address(rng: &mut dyn RngCore) -> String {
    let octets: Vec<String> = (0..6)
        .map(|_| format!("{:x}", rng.random_range(0..255)))
        .collect();
    octets.join(":")
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn ipv4_octets_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..1000 {
            let value = ipv4(&mut rng);
            let octets: Vec<u32> = value
                .split('.')
                .map(|octet| octet.parse().expect("octet"))
                .collect();
            assert_eq!(octets.len(), 4);
            assert!((1..=253).contains(&octets[0]));
            assert!(octets[1] <= 254 && octets[2] <= 254);
            assert!((1..=253).contains(&octets[3]));
        }
    }

    #[test]
    fn ipv6_has_documentation_prefix_and_eight_groups() {
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let value = ipv6(&mut rng);
        assert!(value.starts_with("2001:cafe:"));
        assert_eq!(value.split(':').count(), 8);
    }

    #[test]
    fn mac_address_has_six_hex_groups() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let value = mac_address(&mut rng);
        let groups: Vec<&str> = value.split(':').collect();
        assert_eq!(groups.len(), 6);
        assert!(
            groups
                .iter()
                .all(|group| u8::from_str_radix(group, 16).is_ok())
        );
    }
}
