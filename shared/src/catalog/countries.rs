//! Country lists for birth country and phone prefixes

/// ISO 3166-1 alpha-2 code with its Spanish name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
}

/// Birth countries, sorted by Spanish name
pub static BIRTH_COUNTRIES: &[Country] = &[
    Country { code: "AR", name: "Argentina" },
    Country { code: "BO", name: "Bolivia" },
    Country { code: "BR", name: "Brasil" },
    Country { code: "CL", name: "Chile" },
    Country { code: "CO", name: "Colombia" },
    Country { code: "CR", name: "Costa Rica" },
    Country { code: "CU", name: "Cuba" },
    Country { code: "EC", name: "Ecuador" },
    Country { code: "SV", name: "El Salvador" },
    Country { code: "ES", name: "España" },
    Country { code: "GT", name: "Guatemala" },
    Country { code: "HT", name: "Haití" },
    Country { code: "HN", name: "Honduras" },
    Country { code: "MX", name: "México" },
    Country { code: "NI", name: "Nicaragua" },
    Country { code: "PA", name: "Panamá" },
    Country { code: "PY", name: "Paraguay" },
    Country { code: "PE", name: "Perú" },
    Country { code: "PR", name: "Puerto Rico" },
    Country { code: "DO", name: "República Dominicana" },
    Country { code: "UY", name: "Uruguay" },
    Country { code: "VE", name: "Venezuela" },
];

pub const DEFAULT_BIRTH_COUNTRY: &str = "CL";

pub fn find_country(code: &str) -> Option<&'static Country> {
    BIRTH_COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Dialing prefix offered by the phone input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneCountry {
    pub code: &'static str,
    pub dial: &'static str,
    pub name: &'static str,
}

/// Chile first; it is the default
pub static PHONE_COUNTRIES: &[PhoneCountry] = &[
    PhoneCountry { code: "CL", dial: "+56", name: "Chile" },
    PhoneCountry { code: "AR", dial: "+54", name: "Argentina" },
    PhoneCountry { code: "PE", dial: "+51", name: "Perú" },
    PhoneCountry { code: "BO", dial: "+591", name: "Bolivia" },
    PhoneCountry { code: "BR", dial: "+55", name: "Brasil" },
    PhoneCountry { code: "CO", dial: "+57", name: "Colombia" },
    PhoneCountry { code: "EC", dial: "+593", name: "Ecuador" },
    PhoneCountry { code: "PY", dial: "+595", name: "Paraguay" },
    PhoneCountry { code: "UY", dial: "+598", name: "Uruguay" },
    PhoneCountry { code: "VE", dial: "+58", name: "Venezuela" },
];

pub fn default_phone_country() -> &'static PhoneCountry {
    &PHONE_COUNTRIES[0]
}

pub fn find_phone_country(code: &str) -> Option<&'static PhoneCountry> {
    PHONE_COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Split a stored E.164 number back into (country, local digits)
///
/// The longest matching prefix wins so `+591…` is not read as `+59…`.
pub fn split_e164(e164: &str) -> Option<(&'static PhoneCountry, &str)> {
    PHONE_COUNTRIES
        .iter()
        .filter(|c| e164.starts_with(c.dial))
        .max_by_key(|c| c.dial.len())
        .map(|c| (c, &e164[c.dial.len()..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth_countries_sorted_by_name() {
        assert_eq!(BIRTH_COUNTRIES.len(), 22);
        // Spanish collation puts accented letters with their base letter
        let keys: Vec<String> = BIRTH_COUNTRIES
            .iter()
            .map(|c| c.name.replace('é', "e").replace('í', "i").replace('á', "a").replace('ñ', "n"))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_find_country() {
        assert_eq!(find_country("cl").unwrap().name, "Chile");
        assert!(find_country("US").is_none());
    }

    #[test]
    fn test_phone_defaults_and_split() {
        assert_eq!(default_phone_country().dial, "+56");
        let (c, local) = split_e164("+591712345").unwrap();
        assert_eq!(c.code, "BO");
        assert_eq!(local, "712345");
        let (c, local) = split_e164("+56912345678").unwrap();
        assert_eq!(c.code, "CL");
        assert_eq!(local, "912345678");
        assert!(split_e164("+1555").is_none());
    }
}
