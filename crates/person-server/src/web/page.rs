//! HTML rendering for the person pages.
//!
//! Markup is assembled with `format!`; every interpolated value goes through
//! [`escape`].

use std::fmt::Write as _;

use person_core::Person;

use super::form::Notice;

pub fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      c => out.push(c),
    }
  }
  out
}

fn avatar_cell(person: &Person) -> String {
  match person.avatar.as_deref() {
    Some(a) if !a.trim().is_empty() => format!(
      r#"<img class="avatar" src="data:image/jpeg;base64,{}" alt="avatar" width="48" height="48">"#,
      escape(a)
    ),
    _ => String::from(r#"<span class="avatar-missing">-</span>"#),
  }
}

fn person_row(out: &mut String, person: &Person) {
  let id = person.id.map(|id| id.to_string()).unwrap_or_default();
  let _ = write!(
    out,
    r#"<tr>
  <td>{avatar}</td>
  <td>{first}</td>
  <td>{last}</td>
  <td>{dob}</td>
  <td>{city}</td>
  <td>{country}</td>
  <td>{nationality}</td>
  <td><a href="/persons/edit/{id}">Edit</a> <a href="/persons/delete/{id}" class="delete">Delete</a></td>
</tr>
"#,
    avatar = avatar_cell(person),
    first = escape(&person.first_name),
    last = escape(&person.last_name),
    dob = person.date_of_birth,
    city = escape(&person.city_of_birth),
    country = escape(&person.country_of_birth),
    nationality = escape(&person.nationality),
  );
}

fn text_input(out: &mut String, name: &str, label: &str, kind: &str, value: &str) {
  let _ = write!(
    out,
    r#"  <label>{label} <input type="{kind}" name="{name}" value="{value}" required></label>
"#,
    value = escape(value),
  );
}

fn person_form(out: &mut String, editing: Option<&Person>) {
  let id = editing.and_then(|p| p.id).map(|id| id.to_string()).unwrap_or_default();
  let field = |f: fn(&Person) -> String| editing.map(f).unwrap_or_default();

  out.push_str(if editing.is_some() { "<h2>Edit person</h2>\n" } else { "<h2>Add person</h2>\n" });
  let _ = writeln!(out, r#"<form method="post" action="/persons/save">"#);
  let _ = writeln!(out, r#"  <input type="hidden" name="id" value="{id}">"#);
  text_input(out, "firstName", "First name", "text", &field(|p| p.first_name.clone()));
  text_input(out, "lastName", "Last name", "text", &field(|p| p.last_name.clone()));
  text_input(out, "dateOfBirth", "Date of birth", "date", &field(|p| p.date_of_birth.to_string()));
  text_input(out, "cityOfBirth", "City of birth", "text", &field(|p| p.city_of_birth.clone()));
  text_input(out, "countryOfBirth", "Country of birth", "text", &field(|p| p.country_of_birth.clone()));
  text_input(out, "nationality", "Nationality", "text", &field(|p| p.nationality.clone()));
  out.push_str("  <button type=\"submit\">Save</button>\n");
  if editing.is_some() {
    out.push_str("  <a href=\"/persons\">Cancel</a>\n");
  }
  out.push_str("</form>\n");
}

/// The single page behind `/`, `/persons` and `/persons/edit/{id}`.
pub fn index(persons: &[Person], editing: Option<&Person>, notice: Option<Notice>) -> String {
  let mut out = String::from(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Persons</title>
</head>
<body>
<h1>Persons</h1>
"#,
  );

  if let Some(n) = notice {
    let class = if n.is_error() { "alert error" } else { "alert success" };
    let _ = writeln!(out, r#"<div class="{class}">{}</div>"#, escape(n.message()));
  }

  out.push_str(
    "<table>\n<thead><tr><th>Avatar</th><th>First name</th><th>Last name</th>\
     <th>Date of birth</th><th>City</th><th>Country</th><th>Nationality</th>\
     <th></th></tr></thead>\n<tbody>\n",
  );
  if persons.is_empty() {
    out.push_str("<tr><td colspan=\"8\">No persons yet.</td></tr>\n");
  }
  for person in persons {
    person_row(&mut out, person);
  }
  out.push_str("</tbody>\n</table>\n");

  person_form(&mut out, editing);
  out.push_str("</body>\n</html>\n");
  out
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn person(first: &str, avatar: Option<&str>) -> Person {
    Person {
      id:               Some(3),
      first_name:       first.into(),
      last_name:        "Johnson".into(),
      date_of_birth:    NaiveDate::from_ymd_opt(1992, 8, 10).unwrap(),
      city_of_birth:    "Sydney".into(),
      country_of_birth: "Australia".into(),
      nationality:      "Australian".into(),
      avatar:           avatar.map(str::to_owned),
    }
  }

  #[test]
  fn escapes_markup() {
    assert_eq!(escape(r#"<b>"Tom" & 'Jerry'</b>"#),
      "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
  }

  #[test]
  fn renders_rows_and_links() {
    let html = index(&[person("Alice", Some("QUJD"))], None, None);
    assert!(html.contains("<td>Alice</td>"));
    assert!(html.contains("1992-08-10"));
    assert!(html.contains("data:image/jpeg;base64,QUJD"));
    assert!(html.contains(r#"href="/persons/edit/3""#));
    assert!(html.contains(r#"href="/persons/delete/3""#));
    assert!(html.contains("<h2>Add person</h2>"));
  }

  #[test]
  fn empty_avatar_has_no_image() {
    let html = index(&[person("Alice", Some(""))], None, None);
    assert!(!html.contains("data:image"));
  }

  #[test]
  fn edit_form_is_prefilled() {
    let p = person("Alice", None);
    let html = index(&[], Some(&p), Some(Notice::Updated));
    assert!(html.contains(r#"name="id" value="3""#));
    assert!(html.contains(r#"name="firstName" value="Alice""#));
    assert!(html.contains(r#"name="dateOfBirth" value="1992-08-10""#));
    assert!(html.contains("Person updated successfully."));
    assert!(html.contains("No persons yet."));
  }
}
