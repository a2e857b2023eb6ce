//! Shared record types and rows for unit tests.

use crate::filter::FilterNode;
use dynq_derive::{Filter, Record};

///
/// Geo
///

#[derive(Clone, Debug, PartialEq, Record)]
pub struct Geo {
    pub lat: f64,
    pub lon: f64,
}

///
/// Address
///

#[derive(Clone, Debug, PartialEq, Record)]
pub struct Address {
    pub city: String,
    pub zip: String,
    pub geo: Geo,
}

///
/// Person
///
/// One of every field shape: scalars, an optional scalar, a collection and
/// an optional nested record.
///

#[derive(Clone, Debug, PartialEq, Record)]
pub struct Person {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub age: Option<i16>,
    pub tags: Vec<String>,
    pub address: Option<Address>,
}

///
/// PersonFilter
///

#[derive(Clone, Debug, Default, Filter)]
pub struct PersonFilter {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub email_list: Option<Vec<String>>,
    pub address: Option<AddressFilter>,
    pub not_on_person: Option<String>,
}

///
/// AddressFilter
///

#[derive(Clone, Debug, Default, Filter)]
pub struct AddressFilter {
    pub city: Option<String>,
    pub geo: Option<FilterNode>,
}

fn person(id: u32, name: &str, age: Option<i16>, city: Option<&str>) -> Person {
    Person {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        age,
        tags: vec![format!("tag{}", id % 2)],
        address: city.map(|city| Address {
            city: city.to_string(),
            zip: format!("{id:05}"),
            geo: Geo {
                lat: f64::from(id),
                lon: -f64::from(id),
            },
        }),
    }
}

/// Four rows; `Gamma` appears twice, one person has no address.
pub fn people() -> Vec<Person> {
    vec![
        person(1, "Gamma", Some(30), Some("Lisbon")),
        person(2, "Alpha", Some(25), Some("New York")),
        person(3, "Beta", None, None),
        person(4, "Gamma", Some(41), Some("New York")),
    ]
}
