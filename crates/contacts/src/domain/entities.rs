//! Contact Entity

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use kernel::id::ContactId;

use crate::domain::value_objects::{ContactEmail, PhoneNumber};

/// How far ahead the upcoming-birthday listing looks, in days
pub const BIRTHDAY_WINDOW_DAYS: i64 = 7;

/// Address-book contact
#[derive(Debug, Clone)]
pub struct Contact {
    /// Internal UUID identifier
    pub contact_id: ContactId,
    pub firstname: String,
    pub lastname: String,
    /// Unique across all contacts
    pub email: ContactEmail,
    /// Unique across all contacts
    pub phone: PhoneNumber,
    pub birthday: NaiveDate,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Create a new contact
    pub fn new(
        firstname: String,
        lastname: String,
        email: ContactEmail,
        phone: PhoneNumber,
        birthday: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            contact_id: ContactId::new(),
            firstname,
            lastname,
            email,
            phone,
            birthday,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all mutable fields
    pub fn apply(
        &mut self,
        firstname: String,
        lastname: String,
        email: ContactEmail,
        phone: PhoneNumber,
        birthday: NaiveDate,
    ) {
        self.firstname = firstname;
        self.lastname = lastname;
        self.email = email;
        self.phone = phone;
        self.birthday = birthday;
        self.updated_at = Utc::now();
    }

    /// The next calendar occurrence of this contact's birthday on or
    /// after `today`
    pub fn next_birthday(&self, today: NaiveDate) -> NaiveDate {
        let this_year = observed_birthday(today.year(), &self.birthday);
        if this_year >= today {
            this_year
        } else {
            observed_birthday(today.year() + 1, &self.birthday)
        }
    }

    /// Whether the next birthday falls within [`BIRTHDAY_WINDOW_DAYS`]
    /// of `today` (inclusive on both ends)
    pub fn has_upcoming_birthday(&self, today: NaiveDate) -> bool {
        let days_until = (self.next_birthday(today) - today).num_days();
        (0..=BIRTHDAY_WINDOW_DAYS).contains(&days_until)
    }
}

/// Project a birth date into `year`
///
/// Feb 29 birthdays are observed on Mar 1 in non-leap years.
fn observed_birthday(year: i32, birthday: &NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_with_birthday(birthday: NaiveDate) -> Contact {
        Contact::new(
            "Jane".to_string(),
            "Doe".to_string(),
            ContactEmail::new("jane.doe@example.com").unwrap(),
            PhoneNumber::new("+1 555 123 4567").unwrap(),
            birthday,
        )
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_birthday_today_is_upcoming() {
        let contact = contact_with_birthday(date(1990, 6, 15));
        assert!(contact.has_upcoming_birthday(date(2026, 6, 15)));
    }

    #[test]
    fn test_birthday_in_seven_days_is_upcoming() {
        let contact = contact_with_birthday(date(1990, 6, 22));
        assert!(contact.has_upcoming_birthday(date(2026, 6, 15)));
    }

    #[test]
    fn test_birthday_in_eight_days_is_not_upcoming() {
        let contact = contact_with_birthday(date(1990, 6, 23));
        assert!(!contact.has_upcoming_birthday(date(2026, 6, 15)));
    }

    #[test]
    fn test_birthday_yesterday_rolls_to_next_year() {
        let contact = contact_with_birthday(date(1990, 6, 14));
        assert!(!contact.has_upcoming_birthday(date(2026, 6, 15)));
        assert_eq!(
            contact.next_birthday(date(2026, 6, 15)),
            date(2027, 6, 14)
        );
    }

    #[test]
    fn test_year_end_wraparound() {
        // Birthday on Jan 2, looking from Dec 28: 5 days away across the
        // year boundary
        let contact = contact_with_birthday(date(1985, 1, 2));
        assert!(contact.has_upcoming_birthday(date(2026, 12, 28)));
    }

    #[test]
    fn test_leap_day_observed_on_march_first() {
        let contact = contact_with_birthday(date(1992, 2, 29));
        // 2026 is not a leap year
        assert_eq!(contact.next_birthday(date(2026, 2, 25)), date(2026, 3, 1));
        assert!(contact.has_upcoming_birthday(date(2026, 2, 25)));
    }

    #[test]
    fn test_apply_updates_fields_and_timestamp() {
        let mut contact = contact_with_birthday(date(1990, 6, 15));
        let created_at = contact.created_at;

        contact.apply(
            "Janet".to_string(),
            "Doe".to_string(),
            ContactEmail::new("janet.doe@example.com").unwrap(),
            PhoneNumber::new("+1 555 765 4321").unwrap(),
            date(1990, 6, 16),
        );

        assert_eq!(contact.firstname, "Janet");
        assert_eq!(contact.created_at, created_at);
        assert!(contact.updated_at >= created_at);
    }
}
