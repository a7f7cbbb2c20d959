//! Demo records inserted at startup when the store is empty.

use chrono::NaiveDate;
use person_core::Person;

const DEMO: [(&str, &str, (i32, u32, u32), &str, &str, &str); 3] = [
  ("John", "Doe", (1990, 1, 15), "New York", "USA", "American"),
  ("Jane", "Smith", (1985, 5, 20), "London", "UK", "British"),
  ("Alice", "Johnson", (1992, 8, 10), "Sydney", "Australia", "Australian"),
];

/// Input records for [`PersonService::seed_if_empty`](person_core::PersonService::seed_if_empty).
pub fn demo_people() -> Vec<Person> {
  DEMO
    .iter()
    .filter_map(|&(first, last, (y, m, d), city, country, nationality)| {
      Some(Person {
        id:               None,
        first_name:       first.to_owned(),
        last_name:        last.to_owned(),
        date_of_birth:    NaiveDate::from_ymd_opt(y, m, d)?,
        city_of_birth:    city.to_owned(),
        country_of_birth: country.to_owned(),
        nationality:      nationality.to_owned(),
        avatar:           None,
      })
    })
    .collect()
}
