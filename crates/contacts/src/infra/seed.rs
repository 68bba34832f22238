//! Development Seeding
//!
//! Generates plausible random contacts for the debug seeding endpoint.
//! Email and phone get a random numeric suffix so repeated seeding does
//! not trip the unique constraints.

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::entities::Contact;
use crate::domain::value_objects::{ContactEmail, PhoneNumber};
use crate::error::{ContactsError, ContactsResult};

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Carmen", "Derek", "Elena", "Felix", "Greta", "Hugo", "Irene", "Jonas",
    "Katya", "Liam", "Marta", "Nils", "Olga", "Pavel", "Quinn", "Rosa", "Stefan", "Tanja",
];

const LAST_NAMES: &[&str] = &[
    "Andersen", "Bauer", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Hoffmann",
    "Ivanova", "Jensen", "Keller", "Lindgren", "Moretti", "Novak", "Olsen", "Petrov",
    "Quiroga", "Rossi", "Schmidt", "Tanaka",
];

const MAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.example.com"];

/// Generate one random contact
pub fn random_contact(rng: &mut impl Rng) -> ContactsResult<Contact> {
    let firstname = pick(rng, FIRST_NAMES);
    let lastname = pick(rng, LAST_NAMES);
    let domain = pick(rng, MAIL_DOMAINS);

    let suffix: u32 = rng.gen_range(100_000..1_000_000);

    let email = ContactEmail::new(format!(
        "{}.{}.{}@{}",
        firstname.to_lowercase(),
        lastname.to_lowercase(),
        suffix,
        domain
    ))?;

    let phone = PhoneNumber::new(format!(
        "+1 {} {} {}",
        rng.gen_range(200..1000),
        rng.gen_range(200..1000),
        rng.gen_range(1000..10000)
    ))?;

    let year = rng.gen_range(1950..2006);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    let birthday = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ContactsError::Internal("Generated invalid birthday".to_string()))?;

    Ok(Contact::new(
        firstname.to_string(),
        lastname.to_string(),
        email,
        phone,
        birthday,
    ))
}

fn pick<'a>(rng: &mut impl Rng, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or(values[0])
}
