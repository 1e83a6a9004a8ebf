//! Form input values.
//!
//! [`FormData`] and [`PriceFactors`] are partial: only present entries are
//! written to the page, absent ones leave whatever the page already shows.
//! `generated()` fills every entry with plausible random data.

use crate::identifiers::{FormField, PriceFactor};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

const FIRST_NAMES: &[&str] = &[
    "Amelia", "Bruno", "Chiara", "Dmitri", "Elena", "Farid", "Greta", "Hiroshi", "Ines", "Jonas",
    "Katarina", "Luca", "Maren", "Nikolai", "Olivia", "Pedro", "Quentin", "Rosa", "Stefan",
    "Tamara",
];

const LAST_NAMES: &[&str] = &[
    "Andersen", "Bianchi", "Castillo", "Dubois", "Eriksen", "Fischer", "Gallagher", "Hoffmann",
    "Ivanova", "Jansen", "Kowalski", "Lindqvist", "Moreau", "Novak", "Okafor", "Petrov",
    "Quintero", "Rossi", "Schneider", "Tanaka",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

const COMPANY_STEMS: &[&str] = &[
    "Alpine", "Blue Horizon", "Cirrus", "Northwind", "Polar", "Skyward", "Summit", "Tailwind",
    "Vista", "Zephyr",
];

const COMPANY_KINDS: &[&str] = &["Airways", "Air", "Aviation", "Jet", "Airlines", "Express"];

const COMPANY_SUFFIXES: &[&str] = &["", " AG", " GmbH", " Ltd", " Inc", " Group"];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "commodo",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.gen_range(5..=12);
    let words: Vec<&str> = (0..len).map(|_| pick(rng, LOREM)).collect();
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

fn paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.gen_range(3..=6);
    (0..count)
        .map(|_| sentence(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Values for the text fields of a lead form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: BTreeMap<FormField, String>,
}

impl FormData {
    /// No values; filling it is a no-op.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A complete set of valid random values.
    #[must_use]
    pub fn generated() -> Self {
        Self::generate(&mut rand::thread_rng())
    }

    /// A complete set of valid values drawn from `rng`.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let first = pick(rng, FIRST_NAMES);
        let last = pick(rng, LAST_NAMES);
        let email = format!(
            "{}.{}{}@{}",
            first.to_lowercase(),
            last.to_lowercase(),
            rng.gen_range(1..1000),
            pick(rng, EMAIL_DOMAINS)
        );
        let company = format!(
            "{} {}{}",
            pick(rng, COMPANY_STEMS),
            pick(rng, COMPANY_KINDS),
            pick(rng, COMPANY_SUFFIXES)
        );

        Self::new()
            .with(FormField::FirstName, first)
            .with(FormField::LastName, last)
            .with(FormField::Email, email)
            .with(FormField::Company, company)
            .with(FormField::Message, paragraph(rng))
    }

    /// Sets `field` to `value`. An empty string is a value too: it clears the field.
    #[must_use]
    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    /// Drops `field`, leaving it untouched on fill.
    #[must_use]
    pub fn without(mut self, field: FormField) -> Self {
        self.values.remove(&field);
        self
    }

    /// Value for `field`, if present.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Present entries in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Number of present entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no entry is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Values for the pricing calculator. Negative numbers are allowed so
/// scenarios can check that the page rejects them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceFactors {
    values: BTreeMap<PriceFactor, i64>,
}

impl PriceFactors {
    /// No values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Random values within each factor's realistic range.
    #[must_use]
    pub fn generated() -> Self {
        Self::generate(&mut rand::thread_rng())
    }

    /// Random values drawn from `rng`.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        PriceFactor::ALL
            .into_iter()
            .fold(Self::new(), |factors, factor| {
                let value = rng.gen_range(0..=Self::max(factor));
                factors.with(factor, value)
            })
    }

    /// Upper bound used by [`PriceFactors::generate`].
    #[must_use]
    pub const fn max(factor: PriceFactor) -> i64 {
        match factor {
            PriceFactor::AircraftsNumber => 200,
            PriceFactor::OneWayPerYear => 10_000,
            PriceFactor::GuestsNumberPerYear => 1_000_000,
        }
    }

    /// Sets `factor` to `value`.
    #[must_use]
    pub fn with(mut self, factor: PriceFactor, value: i64) -> Self {
        self.values.insert(factor, value);
        self
    }

    /// Drops `factor`.
    #[must_use]
    pub fn without(mut self, factor: PriceFactor) -> Self {
        self.values.remove(&factor);
        self
    }

    /// Value for `factor`, if present.
    #[must_use]
    pub fn get(&self, factor: PriceFactor) -> Option<i64> {
        self.values.get(&factor).copied()
    }

    /// Present entries in factor order.
    pub fn iter(&self) -> impl Iterator<Item = (PriceFactor, i64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}
