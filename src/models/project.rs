//! Project model
//!
//! A project is one real-estate flip: a property bought at auction, improved
//! through recorded expenses, and eventually sold. Projects are closed and
//! reopened by toggling a freeze flag; recording a sale never closes a
//! project on its own.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::ProjectId;
use super::money::Money;

/// Kind of property being flipped
///
/// The well-known kinds get their own variant; any other label entered by a
/// user is kept verbatim in `Custom` so that grouping still works on it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    Land,
    House,
    Apartment,
    Estate,
    Other,
    Custom(String),
}

impl PropertyType {
    /// All well-known kinds in display order
    pub fn known() -> &'static [Self] {
        &[
            Self::Land,
            Self::House,
            Self::Apartment,
            Self::Estate,
            Self::Other,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Land => "land",
            Self::House => "house",
            Self::Apartment => "apartment",
            Self::Estate => "estate",
            Self::Other => "other",
            Self::Custom(label) => label,
        }
    }
}

impl From<String> for PropertyType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "land" | "terreno" => Self::Land,
            "house" | "casa" => Self::House,
            "apartment" | "departamento" => Self::Apartment,
            "estate" | "hacienda" => Self::Estate,
            "other" | "otro" => Self::Other,
            _ => Self::Custom(value.trim().to_string()),
        }
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for PropertyType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A real-estate flip project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,

    pub name: String,

    /// Property kind, used for the per-type portfolio breakdowns
    #[serde(rename = "type")]
    pub project_type: PropertyType,

    #[serde(default)]
    pub location: String,

    /// Floor or lot area in square meters
    pub square_meters: f64,

    /// Date the property was won at auction
    pub auction_date: NaiveDate,

    /// UTC calendar date the project was created; older records may lack it
    #[serde(default)]
    pub created_at: Option<NaiveDate>,

    /// Business-level freeze flag
    #[serde(default)]
    pub is_closed: bool,

    #[serde(default)]
    pub sale_amount: Option<Money>,

    #[serde(default)]
    pub sale_date: Option<NaiveDate>,

    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new, open project with no sale, created today
    pub fn new(
        name: impl Into<String>,
        project_type: PropertyType,
        location: impl Into<String>,
        square_meters: f64,
        auction_date: NaiveDate,
    ) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            project_type,
            location: location.into(),
            square_meters,
            auction_date,
            created_at: Some(Utc::now().date_naive()),
            is_closed: false,
            sale_amount: None,
            sale_date: None,
            updated_at: Utc::now(),
        }
    }

    /// Whether a sale counts for metrics purposes
    ///
    /// A recorded amount of exactly zero is indistinguishable from "no sale".
    pub fn has_sale(&self) -> bool {
        self.sale_amount.is_some_and(|amount| !amount.is_zero())
    }

    /// Record the sale amount and date together
    ///
    /// Does not close the project.
    pub fn record_sale(&mut self, amount: Money, date: NaiveDate) {
        self.sale_amount = Some(amount);
        self.sale_date = Some(date);
        self.updated_at = Utc::now();
    }

    pub fn close(&mut self) {
        self.is_closed = true;
        self.updated_at = Utc::now();
    }

    /// Reopen a closed project. Any recorded sale is kept.
    pub fn reopen(&mut self) {
        self.is_closed = false;
        self.updated_at = Utc::now();
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_closed {
            "Closed"
        } else {
            "Active"
        }
    }

    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(ProjectValidationError::NameTooLong(self.name.len()));
        }

        if !self.square_meters.is_finite() || self.square_meters <= 0.0 {
            return Err(ProjectValidationError::InvalidArea(self.square_meters));
        }

        if let Some(amount) = self.sale_amount {
            if amount.is_negative() {
                return Err(ProjectValidationError::NegativeSale);
            }
            if self.sale_date.is_none() {
                return Err(ProjectValidationError::SaleWithoutDate);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for projects
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidArea(f64),
    NegativeSale,
    SaleWithoutDate,
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Project name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Project name too long ({} chars, max 100)", len)
            }
            Self::InvalidArea(area) => {
                write!(f, "Square meters must be a positive number (got {})", area)
            }
            Self::NegativeSale => write!(f, "Sale amount cannot be negative"),
            Self::SaleWithoutDate => write!(f, "A sale amount requires a sale date"),
        }
    }
}

impl std::error::Error for ProjectValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn auction() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_new_project_defaults() {
        let project = Project::new("Casa Norte", PropertyType::House, "Bogotá", 120.0, auction());

        assert!(!project.is_closed);
        assert!(project.sale_amount.is_none());
        assert!(project.sale_date.is_none());
        assert_eq!(project.created_at, Some(Utc::now().date_naive()));
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_sale_does_not_close() {
        let mut project = Project::new("Lote 7", PropertyType::Land, "Cali", 300.0, auction());
        project.record_sale(
            Money::from_units(90_000),
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        );

        assert!(project.has_sale());
        assert!(!project.is_closed);
    }

    #[test]
    fn test_reopen_keeps_sale() {
        let mut project = Project::new("Lote 7", PropertyType::Land, "Cali", 300.0, auction());
        project.record_sale(
            Money::from_units(90_000),
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        );
        project.close();
        project.reopen();

        assert!(!project.is_closed);
        assert_eq!(project.sale_amount, Some(Money::from_units(90_000)));
    }

    #[test]
    fn test_zero_sale_is_not_a_sale() {
        let mut project = Project::new("Apto 301", PropertyType::Apartment, "", 60.0, auction());
        project.record_sale(Money::zero(), auction());

        assert!(project.sale_amount.is_some());
        assert!(!project.has_sale());
    }

    #[test]
    fn test_validation() {
        let mut project = Project::new("Valid", PropertyType::House, "", 50.0, auction());
        assert!(project.validate().is_ok());

        project.name = "  ".into();
        assert_eq!(project.validate(), Err(ProjectValidationError::EmptyName));

        project.name = "Valid".into();
        project.square_meters = 0.0;
        assert!(matches!(
            project.validate(),
            Err(ProjectValidationError::InvalidArea(_))
        ));

        project.square_meters = 50.0;
        project.sale_amount = Some(Money::from_units(10));
        assert_eq!(
            project.validate(),
            Err(ProjectValidationError::SaleWithoutDate)
        );
    }

    #[test]
    fn test_property_type_parsing() {
        assert_eq!("House".parse::<PropertyType>().unwrap(), PropertyType::House);
        assert_eq!("casa".parse::<PropertyType>().unwrap(), PropertyType::House);
        assert_eq!("hacienda".parse::<PropertyType>().unwrap(), PropertyType::Estate);
        assert_eq!(
            "warehouse".parse::<PropertyType>().unwrap(),
            PropertyType::Custom("warehouse".into())
        );
    }

    #[test]
    fn test_serialization_uses_type_string() {
        let project = Project::new("Casa Norte", PropertyType::House, "Bogotá", 120.0, auction());
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["type"], "house");

        let back: Project = serde_json::from_value(json).unwrap();
        assert_eq!(back.project_type, PropertyType::House);
        assert_eq!(back.id, project.id);
    }

    #[test]
    fn test_legacy_record_without_optional_fields() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Old",
            "type": "terreno",
            "square_meters": 80.0,
            "auction_date": "2024-01-10",
            "updated_at": "2024-01-10T00:00:00Z"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();

        assert_eq!(project.project_type, PropertyType::Land);
        assert!(project.created_at.is_none());
        assert!(!project.is_closed);
        assert!(!project.has_sale());
    }
}
