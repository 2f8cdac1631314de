use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minimum length for free-text search fields
pub const MIN_TEXT_LEN: usize = 2;

/// Form fields with a validation flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Keywords,
    Location,
    Distance,
    GeoId,
    CustomHours,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Keywords,
        FormField::Location,
        FormField::Distance,
        FormField::GeoId,
        FormField::CustomHours,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormField::Keywords => "keywords",
            FormField::Location => "location",
            FormField::Distance => "distance",
            FormField::GeoId => "geoId",
            FormField::CustomHours => "customHours",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL.into_iter().find(|field| field.name() == s).ok_or(())
    }
}

/// A raw value from the search form
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map(FieldValue::Text).unwrap_or(FieldValue::Missing)
    }
}

impl From<Option<f64>> for FieldValue<'_> {
    fn from(value: Option<f64>) -> Self {
        value.map(FieldValue::Number).unwrap_or(FieldValue::Missing)
    }
}

/// Length in UTF-16 code units, so a single emoji counts as two
fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

fn optional_text(value: FieldValue<'_>, accept: impl Fn(&str) -> bool) -> bool {
    match value {
        FieldValue::Missing => true,
        FieldValue::Text(text) => text.is_empty() || accept(text),
        FieldValue::Number(_) => false,
    }
}

fn optional_positive(value: FieldValue<'_>) -> bool {
    match value {
        FieldValue::Missing => true,
        FieldValue::Number(n) => n > 0.0,
        FieldValue::Text(_) => false,
    }
}

/// Pure rule for a single field
pub fn is_field_valid(field: FormField, value: FieldValue<'_>) -> bool {
    match field {
        FormField::Keywords | FormField::Location => {
            optional_text(value, |text| text_len(text) >= MIN_TEXT_LEN)
        }
        FormField::GeoId => optional_text(value, |text| text.bytes().all(|b| b.is_ascii_digit())),
        FormField::Distance | FormField::CustomHours => optional_positive(value),
    }
}

/// Per-field validity flags for the search form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValidation {
    pub keywords: bool,
    pub location: bool,
    pub distance: bool,
    pub geo_id: bool,
    pub custom_hours: bool,
}

impl Default for FormValidation {
    fn default() -> Self {
        Self {
            keywords: true,
            location: true,
            distance: true,
            geo_id: true,
            custom_hours: true,
        }
    }
}

impl FormValidation {
    /// Check `value` for `field` and record the outcome
    pub fn validate(&mut self, field: FormField, value: FieldValue<'_>) -> bool {
        let valid = is_field_valid(field, value);
        *self.flag_mut(field) = valid;
        valid
    }

    /// Like [`validate`](Self::validate) but keyed by field name.
    /// Unknown names leave the flags untouched and return `None`.
    pub fn validate_named(&mut self, name: &str, value: FieldValue<'_>) -> Option<bool> {
        let field = name.parse::<FormField>().ok()?;
        Some(self.validate(field, value))
    }

    pub fn get(&self, field: FormField) -> bool {
        match field {
            FormField::Keywords => self.keywords,
            FormField::Location => self.location,
            FormField::Distance => self.distance,
            FormField::GeoId => self.geo_id,
            FormField::CustomHours => self.custom_hours,
        }
    }

    fn flag_mut(&mut self, field: FormField) -> &mut bool {
        match field {
            FormField::Keywords => &mut self.keywords,
            FormField::Location => &mut self.location,
            FormField::Distance => &mut self.distance,
            FormField::GeoId => &mut self.geo_id,
            FormField::CustomHours => &mut self.custom_hours,
        }
    }

    pub fn is_form_valid(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field))
    }

    /// Fields currently flagged invalid
    pub fn invalid_fields(&self) -> Vec<FormField> {
        FormField::ALL.into_iter().filter(|field| !self.get(*field)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_and_location_need_two_chars() {
        for field in [FormField::Keywords, FormField::Location] {
            assert!(is_field_valid(field, FieldValue::Missing));
            assert!(is_field_valid(field, FieldValue::Text("")));
            assert!(!is_field_valid(field, FieldValue::Text("a")));
            assert!(is_field_valid(field, FieldValue::Text("ab")));
            assert!(is_field_valid(field, FieldValue::Text("Software Engineer")));
        }
    }

    #[test]
    fn text_length_counts_utf16_units() {
        assert!(is_field_valid(FormField::Keywords, FieldValue::Text("🦀")));
        assert!(!is_field_valid(FormField::Keywords, FieldValue::Text("é")));
        assert!(is_field_valid(FormField::Location, FieldValue::Text("Zü")));
    }

    #[test]
    fn distance_must_be_positive() {
        assert!(is_field_valid(FormField::Distance, FieldValue::Missing));
        assert!(!is_field_valid(FormField::Distance, FieldValue::Number(0.0)));
        assert!(!is_field_valid(FormField::Distance, FieldValue::Number(-5.0)));
        assert!(!is_field_valid(FormField::Distance, FieldValue::Number(f64::NAN)));
        assert!(is_field_valid(FormField::Distance, FieldValue::Number(25.0)));
    }

    #[test]
    fn geo_id_must_be_digits() {
        assert!(is_field_valid(FormField::GeoId, FieldValue::Text("")));
        assert!(!is_field_valid(FormField::GeoId, FieldValue::Text("abc")));
        assert!(!is_field_valid(FormField::GeoId, FieldValue::Text("123abc")));
        assert!(is_field_valid(FormField::GeoId, FieldValue::Text("103644278")));
    }

    #[test]
    fn flags_drive_form_validity() {
        let mut validation = FormValidation::default();
        assert!(validation.is_form_valid());

        assert!(!validation.validate(FormField::Keywords, FieldValue::Text("a")));
        assert!(!validation.is_form_valid());
        assert_eq!(validation.invalid_fields(), vec![FormField::Keywords]);

        assert!(validation.validate(FormField::Keywords, FieldValue::Text("ab")));
        assert!(validation.is_form_valid());
    }

    #[test]
    fn unknown_names_are_ignored() {
        let mut validation = FormValidation::default();
        assert_eq!(validation.validate_named("salary", FieldValue::Number(-1.0)), None);
        assert_eq!(validation, FormValidation::default());
        assert_eq!(validation.validate_named("geoId", FieldValue::Text("x1")), Some(false));
        assert!(!validation.geo_id);
    }
}
