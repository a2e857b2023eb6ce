//! Records, filters and seed rows shared by the integration tests.
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use dynq::prelude::*;
use rust_decimal::Decimal;

pub const MISSING_FIELD: &str = "NonExistingProperty";

///
/// Entity
/// One field per scalar width.
///

#[derive(Clone, Debug, PartialEq, Record)]
pub struct Entity {
    pub id: i32,
    pub name: String,
    pub is_active: bool,
    pub number_of_relatives: u8,
    pub number_of_siblings: i8,
    pub salary: i16,
    pub expected_salary: u16,
    pub number_of_friends: u32,
    pub number_of_days: i64,
    pub number_of_seconds: u64,
    pub tax_rate: f32,
    pub social_insurance_rate: f64,
    pub index_funds_rate: Decimal,
    pub gender: char,
}

///
/// EntityFilter
///

#[derive(Clone, Debug, Default, Filter)]
pub struct EntityFilter {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub number_of_relatives: Option<u8>,
    pub number_of_siblings: Option<i8>,
    pub salary: Option<i16>,
    pub expected_salary: Option<u16>,
    pub number_of_friends: Option<u32>,
    pub number_of_days: Option<i64>,
    pub number_of_seconds: Option<u64>,
    pub tax_rate: Option<f32>,
    pub social_insurance_rate: Option<f64>,
    pub index_funds_rate: Option<Decimal>,
    pub gender: Option<char>,
}

///
/// Customer
///

#[derive(Clone, Debug, PartialEq, Record)]
pub struct Customer {
    pub id: u32,
    pub full_name: String,
    pub email: String,
    pub registered_at: NaiveDateTime,
    pub address: Address,
}

///
/// Address
///

#[derive(Clone, Debug, PartialEq, Record)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub geo_coordinate: GeoCoordinate,
}

///
/// GeoCoordinate
///

#[derive(Clone, Debug, PartialEq, Record)]
pub struct GeoCoordinate {
    pub id: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub region: Region,
}

///
/// Region
/// `CountryCode` keeps its wire spelling through a rename.
///

#[derive(Clone, Debug, PartialEq, Record)]
pub struct Region {
    pub id: u32,
    pub name: String,
    #[dynq(rename = "CountryCode")]
    pub country_code: String,
}

///
/// CustomerFilter
///

#[derive(Clone, Debug, Default, Filter)]
pub struct CustomerFilter {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub registered_at: Option<NaiveDateTime>,
    pub address: Option<AddressFilter>,
}

///
/// AddressFilter
///

#[derive(Clone, Debug, Default, Filter)]
pub struct AddressFilter {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub geo_coordinate: Option<GeoCoordinateFilter>,
}

///
/// GeoCoordinateFilter
///

#[derive(Clone, Debug, Default, Filter)]
pub struct GeoCoordinateFilter {
    pub id: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub region: Option<RegionFilter>,
}

///
/// RegionFilter
///

#[derive(Clone, Debug, Default, Filter)]
pub struct RegionFilter {
    pub id: Option<u32>,
    pub name: Option<String>,
    #[dynq(rename = "CountryCode")]
    pub country_code: Option<String>,
}

///
/// MultipleValueFilter
/// `_list` fields bind to the field named by their stem.
///

#[derive(Clone, Debug, Default, Filter)]
pub struct MultipleValueFilter {
    pub email_list: Option<Vec<String>>,
    pub id_list: Option<Vec<u32>>,
}

// ----------------------------------------------------------------------
// Seed data
// ----------------------------------------------------------------------

pub fn index_funds_rate_max() -> Decimal {
    Decimal::new(111_111_111_111_111_122, 2)
}

pub fn index_funds_rate_min() -> Decimal {
    Decimal::new(-111_111_111_111_111_122, 2)
}

fn entity_max(id: i32, name: &str) -> Entity {
    Entity {
        id,
        name: name.to_string(),
        is_active: true,
        number_of_relatives: u8::MAX,
        number_of_siblings: i8::MAX,
        salary: i16::MAX,
        expected_salary: u16::MAX,
        number_of_friends: u32::MAX,
        number_of_days: i64::MAX,
        number_of_seconds: u64::MAX,
        tax_rate: f32::MAX,
        social_insurance_rate: f64::MAX,
        index_funds_rate: index_funds_rate_max(),
        gender: char::MAX,
    }
}

fn entity_min(id: i32, name: &str, is_active: bool) -> Entity {
    Entity {
        id,
        name: name.to_string(),
        is_active,
        number_of_relatives: u8::MIN,
        number_of_siblings: i8::MIN,
        salary: i16::MIN,
        expected_salary: u16::MIN,
        number_of_friends: u32::MIN,
        number_of_days: i64::MIN,
        number_of_seconds: u64::MIN,
        tax_rate: f32::MIN,
        social_insurance_rate: f64::MIN,
        index_funds_rate: index_funds_rate_min(),
        gender: char::MIN,
    }
}

/// Gamma (all maxima), Alpha, Beta, Gamma (all minima).
pub fn entities() -> MemorySource<Entity> {
    MemorySource::new(vec![
        entity_max(1, "Gamma"),
        entity_min(2, "Alpha", false),
        entity_min(3, "Beta", false),
        entity_min(4, "Gamma", true),
    ])
}

fn registered(year: i32, month: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .expect("valid seed timestamp")
}

#[allow(clippy::too_many_arguments)]
fn customer(
    id: u32,
    full_name: &str,
    email: &str,
    registered_at: NaiveDateTime,
    street: &str,
    city: &str,
    state: &str,
    zip_code: &str,
    (latitude, longitude): (f64, f64),
    (region, country_code): (&str, &str),
) -> Customer {
    Customer {
        id,
        full_name: full_name.to_string(),
        email: email.to_string(),
        registered_at,
        address: Address {
            street: street.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip_code: zip_code.to_string(),
            geo_coordinate: GeoCoordinate {
                id,
                latitude,
                longitude,
                region: Region {
                    id,
                    name: region.to_string(),
                    country_code: country_code.to_string(),
                },
            },
        },
    }
}

/// Ten customers, one per region.
pub fn customers() -> MemorySource<Customer> {
    MemorySource::new(vec![
        customer(
            1,
            "Alice Smith",
            "alice@example.com",
            registered(2020, 3),
            "123 Broadway",
            "New York",
            "NY",
            "10001",
            (40.71, -74.00),
            ("North America", "US"),
        ),
        customer(
            2,
            "Bruno Costa",
            "bruno@example.com",
            registered(2022, 6),
            "456 Paulista Ave",
            "São Paulo",
            "SP",
            "01311-000",
            (-23.55, -46.63),
            ("South America", "BR"),
        ),
        customer(
            3,
            "Clara Fischer",
            "clara@example.com",
            registered(2023, 1),
            "789 Unter den Linden",
            "Berlin",
            "BE",
            "10117",
            (52.52, 13.40),
            ("Europe", "DE"),
        ),
        customer(
            4,
            "Daichi Tanaka",
            "daichi@example.com",
            registered(2021, 9),
            "101 Shibuya",
            "Tokyo",
            "Tokyo",
            "150-0002",
            (35.68, 139.69),
            ("Asia", "JP"),
        ),
        customer(
            5,
            "Emily Brown",
            "emily@example.com",
            registered(2024, 2),
            "102 George St",
            "Sydney",
            "NSW",
            "2000",
            (-33.87, 151.21),
            ("Oceania", "AU"),
        ),
        customer(
            6,
            "Fikile Khumalo",
            "fikile@example.com",
            registered(2023, 7),
            "103 Nelson Mandela Dr",
            "Johannesburg",
            "Gauteng",
            "2001",
            (-26.20, 28.04),
            ("Africa", "ZA"),
        ),
        customer(
            7,
            "Ghaith Al-Maktoum",
            "ghaith@example.com",
            registered(2024, 5),
            "104 Sheikh Zayed Rd",
            "Dubai",
            "Dubai",
            "00000",
            (25.20, 55.27),
            ("Middle East", "AE"),
        ),
        customer(
            8,
            "Helena Borg",
            "helena@example.com",
            registered(2019, 11),
            "105 Drottninggatan",
            "Stockholm",
            "ST",
            "11160",
            (59.33, 18.06),
            ("Scandinavia", "SE"),
        ),
        customer(
            9,
            "Igor Kowalski",
            "igor@example.com",
            registered(2023, 1),
            "106 Nowy Świat",
            "Warsaw",
            "MZ",
            "00-001",
            (52.23, 21.01),
            ("Eastern Europe", "PL"),
        ),
        customer(
            10,
            "Jyoti Patel",
            "jyoti@example.com",
            registered(2022, 6),
            "107 Connaught Place",
            "Delhi",
            "DL",
            "110001",
            (28.61, 77.20),
            ("South Asia", "IN"),
        ),
    ])
}

/// Message every unknown-field failure on `type_name` carries.
pub fn missing_field_message(type_name: &str, field: &str) -> String {
    format!("type [{type_name}] does not have field [{field}]")
}
