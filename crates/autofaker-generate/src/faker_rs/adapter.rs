use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use fake::faker::address::raw::{CityName, CountryName};
use fake::faker::internet::raw::SafeEmail;
use fake::faker::lorem::raw::Word;
use fake::faker::name::raw::{FirstName, LastName, Name};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::{EN, PT_BR};
use fake::uuid::UUIDv4;
use fake::{Fake, Faker};
use rand::distr::{Alphanumeric, Distribution};
use rand::{Rng, RngCore};
use uuid::Uuid;

use autofaker_core::{PrimitiveKind, Value};

use crate::errors::GenerationError;
use crate::faker_rs::locales::LocaleKey;

const INT_MIN: i64 = 1;
const INT_MAX: i64 = 100_000;
const FLOAT_MIN: f64 = 1.0;
const FLOAT_MAX: f64 = 100_000.0;

/// Context handed to the primitive provider for a single value.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveHint<'a> {
    /// Member or constructor parameter the value is destined for.
    pub member: Option<&'a str>,
    pub locale: LocaleKey,
}

/// Source of leaf values. Implementations must be stateless per call; all
/// randomness comes from the supplied `rng`.
pub trait PrimitiveProvider: Send + Sync {
    fn produce(
        &self,
        kind: PrimitiveKind,
        hint: &PrimitiveHint<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<Value, GenerationError>;
}

/// Default provider: `fake` data with member-name conventions for strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeRsAdapter;

macro_rules! localized {
    ($faker:ident, $locale:expr, $rng:expr) => {
        match $locale {
            LocaleKey::EnUs => $faker(EN).fake_with_rng::<String, _>($rng),
            LocaleKey::PtBr => $faker(PT_BR).fake_with_rng::<String, _>($rng),
        }
    };
}

impl PrimitiveProvider for FakeRsAdapter {
    fn produce(
        &self,
        kind: PrimitiveKind,
        hint: &PrimitiveHint<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<Value, GenerationError> {
        let value = match kind {
            PrimitiveKind::Bool => Value::Bool(rng.random_bool(0.5)),
            PrimitiveKind::Char => Value::Char(Alphanumeric.sample(rng) as char),
            PrimitiveKind::U8 => Value::UInt(rng.random_range(1..=u8::MAX) as u64),
            PrimitiveKind::I16 => Value::Int(rng.random_range(1..=i16::MAX) as i64),
            PrimitiveKind::I32 | PrimitiveKind::I64 => {
                Value::Int(rng.random_range(INT_MIN..=INT_MAX))
            }
            PrimitiveKind::U16 => Value::UInt(rng.random_range(1..=u16::MAX) as u64),
            PrimitiveKind::U32 | PrimitiveKind::U64 => {
                Value::UInt(rng.random_range(INT_MIN as u64..=INT_MAX as u64))
            }
            PrimitiveKind::F32 | PrimitiveKind::F64 => {
                Value::Float(rng.random_range(FLOAT_MIN..FLOAT_MAX))
            }
            PrimitiveKind::String => Value::Text(text_for(hint, rng)),
            PrimitiveKind::Uuid => Value::Uuid(UUIDv4.fake_with_rng::<Uuid, _>(rng)),
            PrimitiveKind::Date => Value::Date(Faker.fake_with_rng::<NaiveDate, _>(rng)),
            PrimitiveKind::Time => Value::Time(Faker.fake_with_rng::<NaiveTime, _>(rng)),
            PrimitiveKind::DateTime => {
                Value::Timestamp(Faker.fake_with_rng::<NaiveDateTime, _>(rng))
            }
        };
        Ok(value)
    }
}

/// Member-name conventions; anything unrecognised gets a lorem word.
fn text_for(hint: &PrimitiveHint<'_>, rng: &mut dyn RngCore) -> String {
    let name = hint
        .member
        .map(|member| member.to_lowercase().replace('_', ""))
        .unwrap_or_default();
    let locale = hint.locale;

    if name.contains("email") {
        return localized!(SafeEmail, locale, rng);
    }
    if name.contains("firstname") {
        return localized!(FirstName, locale, rng);
    }
    if name.contains("lastname") || name.contains("surname") {
        return localized!(LastName, locale, rng);
    }
    if name == "name" || name.ends_with("fullname") {
        return localized!(Name, locale, rng);
    }
    if name.contains("city") {
        return localized!(CityName, locale, rng);
    }
    if name.contains("country") {
        return localized!(CountryName, locale, rng);
    }
    if name.contains("phone") {
        return localized!(PhoneNumber, locale, rng);
    }
    localized!(Word, locale, rng)
}
