//! Static reference data, loaded once

pub mod countries;
pub mod regions;

pub use countries::{
    BIRTH_COUNTRIES, Country, DEFAULT_BIRTH_COUNTRY, PHONE_COUNTRIES, PhoneCountry,
    default_phone_country, find_country, find_phone_country, split_e164,
};
pub use regions::{REGIONES, Region, comunas_of, filter_names, find_region, is_comuna_in_region, regions};
