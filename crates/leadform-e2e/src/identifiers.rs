//! Closed sets of form elements the page objects know about.
//!
//! Scenarios name elements by these tags; each page maps them to locators.
//! `Display` renders the tag itself (`firstName`), which is what locator-map
//! errors report.

use std::fmt;

/// A free-text field shared by both lead forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    /// First name
    FirstName,
    /// Last name
    LastName,
    /// Business email
    Email,
    /// Company name
    Company,
    /// Free-form message
    Message,
}

impl FormField {
    /// Every field, in on-page order.
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Company,
        Self::Message,
    ];

    /// Name the field is submitted under.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::FirstName => "firstname",
            Self::LastName => "lastname",
            Self::Email => "email",
            Self::Company => "company",
            Self::Message => "message",
        }
    }

    /// Placeholder text shown in the empty input.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email Address",
            Self::Company => "Company",
            Self::Message => "Message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Company => "company",
            Self::Message => "message",
        })
    }
}

/// A toggle on the lead form: one of six product modules, or the
/// marketing-communication consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Checkbox {
    /// Platform module
    Platform,
    /// Load planning module
    LoadPlanning,
    /// Meal planning module
    MealPlanning,
    /// Mobile app module
    MobileApp,
    /// Inventory management module
    InventoryManagement,
    /// Route optimization module
    RouteOptimization,
    /// Consent to receive other communications
    Communication,
}

impl Checkbox {
    /// Every checkbox.
    pub const ALL: [Self; 7] = [
        Self::Platform,
        Self::LoadPlanning,
        Self::MealPlanning,
        Self::MobileApp,
        Self::InventoryManagement,
        Self::RouteOptimization,
        Self::Communication,
    ];

    /// The product modules. Never contains [`Checkbox::Communication`].
    pub const MODULES: [Self; 6] = [
        Self::Platform,
        Self::LoadPlanning,
        Self::MealPlanning,
        Self::MobileApp,
        Self::InventoryManagement,
        Self::RouteOptimization,
    ];

    /// True for the six product modules.
    #[must_use]
    pub const fn is_module(self) -> bool {
        !matches!(self, Self::Communication)
    }

    /// Module label as rendered on the page and submitted under
    /// `modules_of_interest`. `None` for the consent checkbox.
    #[must_use]
    pub const fn display_name(self) -> Option<&'static str> {
        match self {
            Self::Platform => Some("Platform"),
            Self::LoadPlanning => Some("LoadPlanning"),
            Self::MealPlanning => Some("MealPlanning"),
            Self::MobileApp => Some("MobileApp"),
            Self::InventoryManagement => Some("InventoryManagement"),
            Self::RouteOptimization => Some("RouteOptimization"),
            Self::Communication => None,
        }
    }
}

impl fmt::Display for Checkbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Platform => "platform",
            Self::LoadPlanning => "loadPlanning",
            Self::MealPlanning => "mealPlanning",
            Self::MobileApp => "mobileApp",
            Self::InventoryManagement => "inventoryManagement",
            Self::RouteOptimization => "routeOptimization",
            Self::Communication => "communication",
        })
    }
}

/// Wire name the selected modules are submitted under, one entry per module.
pub const MODULES_OF_INTEREST: &str = "modules_of_interest";

/// Numeric inputs of the pricing calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PriceFactor {
    /// Fleet size
    AircraftsNumber,
    /// One-way flights per year
    OneWayPerYear,
    /// Passengers per year
    GuestsNumberPerYear,
}

impl PriceFactor {
    /// Every price factor, in on-page order.
    pub const ALL: [Self; 3] = [
        Self::AircraftsNumber,
        Self::OneWayPerYear,
        Self::GuestsNumberPerYear,
    ];

    /// Name the factor is submitted under.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::AircraftsNumber => "0-2/number_of_aircrafts",
            Self::OneWayPerYear => "0-2/number_of_one_way_flights_per_year",
            Self::GuestsNumberPerYear => "0-2/number_of_guests_per_year",
        }
    }

    /// Placeholder text shown in the empty input.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::AircraftsNumber => "Number of aircrafts",
            Self::OneWayPerYear => "One-way flights / year",
            Self::GuestsNumberPerYear => "Number of guests / year",
        }
    }
}

impl fmt::Display for PriceFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AircraftsNumber => "aircraftsNumber",
            Self::OneWayPerYear => "oneWayPerYear",
            Self::GuestsNumberPerYear => "guestsNumberPerYear",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn modules_exclude_communication() {
        assert!(!Checkbox::MODULES.contains(&Checkbox::Communication));
        assert!(Checkbox::MODULES.iter().all(|c| c.is_module()));
        assert!(!Checkbox::Communication.is_module());
        assert_eq!(Checkbox::ALL.len(), Checkbox::MODULES.len() + 1);
    }

    #[test]
    fn every_module_has_a_display_name() {
        for module in Checkbox::MODULES {
            assert!(module.display_name().is_some(), "{module} has no display name");
        }
        assert_eq!(Checkbox::Communication.display_name(), None);
    }

    #[test]
    fn wire_names_are_unique() {
        let names: HashSet<_> = FormField::ALL
            .iter()
            .map(|f| f.wire_name())
            .chain(PriceFactor::ALL.iter().map(|p| p.wire_name()))
            .chain([MODULES_OF_INTEREST])
            .collect();
        assert_eq!(names.len(), FormField::ALL.len() + PriceFactor::ALL.len() + 1);
    }

    #[test]
    fn display_uses_tag_names() {
        assert_eq!(FormField::FirstName.to_string(), "firstName");
        assert_eq!(Checkbox::RouteOptimization.to_string(), "routeOptimization");
        assert_eq!(PriceFactor::OneWayPerYear.to_string(), "oneWayPerYear");
    }
}
