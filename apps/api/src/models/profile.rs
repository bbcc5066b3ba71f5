use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::models::career::{CareerItem, MAX_YEAR, MIN_YEAR};

/// Gender choices offered by the basics editor.
pub const GENDER_OPTIONS: [&str; 3] = ["男性", "女性", "その他"];
/// Ages offered by the basics editor.
pub const MIN_AGE: u32 = 15;
pub const MAX_AGE: u32 = 85;

/// A job seeker's career sheet.
///
/// `career_history` is an immutable snapshot; edits replace the whole slice so
/// anyone still holding the previous `Arc` keeps a consistent view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub basics: ProfileBasics,
    #[serde(flatten)]
    pub sections: ProfileSections,
    pub career_history: Arc<[CareerItem]>,
    pub updated_at: DateTime<Utc>,
}

/// Header block of the sheet: contact details, demographics, qualifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileBasics {
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub address_detail: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub birth_month: Option<u32>,
    #[serde(default)]
    pub birth_day: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub member_id: Option<String>,
}

/// Free-text sections of the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSections {
    #[serde(default)]
    pub can: String,
    #[serde(default)]
    pub will: String,
    #[serde(default)]
    pub must: String,
    #[serde(default)]
    pub personal_words: String,
    #[serde(default)]
    pub doing: String,
    #[serde(default)]
    pub being: String,
}

/// Partial update of a profile's name, basics and sections.
///
/// An absent key leaves the field alone. For optional basics, an explicit
/// `null` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub photo: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub postal_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub address_detail: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub age: Option<Option<u32>>,
    #[serde(default, deserialize_with = "present")]
    pub birth_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub birth_month: Option<Option<u32>>,
    #[serde(default, deserialize_with = "present")]
    pub birth_day: Option<Option<u32>>,
    #[serde(default, deserialize_with = "present")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub job_title: Option<Option<String>>,
    #[serde(default)]
    pub qualifications: Option<Vec<String>>,

    #[serde(default)]
    pub can: Option<String>,
    #[serde(default)]
    pub will: Option<String>,
    #[serde(default)]
    pub must: Option<String>,
    #[serde(default)]
    pub personal_words: Option<String>,
    #[serde(default)]
    pub doing: Option<String>,
    #[serde(default)]
    pub being: Option<String>,
}

/// Maps a present key to `Some(value)`, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl ProfilePatch {
    /// Rejects values the basics editor could never produce.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("name cannot be empty".to_string());
            }
        }
        if let Some(Some(age)) = self.age {
            if !(MIN_AGE..=MAX_AGE).contains(&age) {
                return Err(format!("age must be between {MIN_AGE} and {MAX_AGE}, got {age}"));
            }
        }
        if let Some(Some(year)) = self.birth_year {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(format!(
                    "birth_year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
                ));
            }
        }
        if let Some(Some(month)) = self.birth_month {
            if !(1..=12).contains(&month) {
                return Err(format!("birth_month must be between 1 and 12, got {month}"));
            }
        }
        if let Some(Some(day)) = self.birth_day {
            if !(1..=31).contains(&day) {
                return Err(format!("birth_day must be between 1 and 31, got {day}"));
            }
        }
        if let Some(Some(gender)) = &self.gender {
            if !GENDER_OPTIONS.contains(&gender.as_str()) {
                return Err(format!(
                    "gender must be one of {}, got '{gender}'",
                    GENDER_OPTIONS.join(", ")
                ));
            }
        }
        Ok(())
    }

    pub fn apply(self, profile: &mut Profile) {
        set(&mut profile.name, self.name);

        let basics = &mut profile.basics;
        set(&mut basics.photo, self.photo);
        set(&mut basics.location, self.location);
        set(&mut basics.postal_code, self.postal_code);
        set(&mut basics.address_detail, self.address_detail);
        set(&mut basics.email, self.email);
        set(&mut basics.phone, self.phone);
        set(&mut basics.age, self.age);
        set(&mut basics.birth_year, self.birth_year);
        set(&mut basics.birth_month, self.birth_month);
        set(&mut basics.birth_day, self.birth_day);
        set(&mut basics.gender, self.gender);
        set(&mut basics.job_title, self.job_title);
        set(&mut basics.qualifications, self.qualifications);

        let sections = &mut profile.sections;
        set(&mut sections.can, self.can);
        set(&mut sections.will, self.will);
        set(&mut sections.must, self.must);
        set(&mut sections.personal_words, self.personal_words);
        set(&mut sections.doing, self.doing);
        set(&mut sections.being, self.being);
    }
}
