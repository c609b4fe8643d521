use crate::error::RegistrationError;
use serde::Serialize;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(RegistrationError::invalid_field("gender", s)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Halls of residence, serialized by their short id (`"daniel"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hall {
    Daniel,
    Joseph,
    Peter,
    John,
    Paul,
    Esther,
    Deborah,
    Lydia,
    Dorcas,
    Mary,
}

impl Hall {
    pub const ALL: [Hall; 10] = [
        Hall::Daniel,
        Hall::Joseph,
        Hall::Peter,
        Hall::John,
        Hall::Paul,
        Hall::Esther,
        Hall::Deborah,
        Hall::Lydia,
        Hall::Dorcas,
        Hall::Mary,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Hall::Daniel => "daniel",
            Hall::Joseph => "joseph",
            Hall::Peter => "peter",
            Hall::John => "john",
            Hall::Paul => "paul",
            Hall::Esther => "esther",
            Hall::Deborah => "deborah",
            Hall::Lydia => "lydia",
            Hall::Dorcas => "dorcas",
            Hall::Mary => "mary",
        }
    }
}

impl fmt::Display for Hall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} Hall", self)
    }
}

impl FromStr for Hall {
    type Err = RegistrationError;

    /// Accepts the id (`"peter"`) or the display name (`"Peter Hall"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let id = normalized.strip_suffix(" hall").unwrap_or(&normalized);
        Hall::ALL
            .into_iter()
            .find(|hall| hall.id() == id)
            .ok_or_else(|| RegistrationError::invalid_field("hall of residence", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Level {
    #[serde(rename = "100")]
    L100,
    #[serde(rename = "200")]
    L200,
    #[serde(rename = "300")]
    L300,
    #[serde(rename = "400")]
    L400,
    #[serde(rename = "500")]
    L500,
}

impl Level {
    pub fn as_u16(&self) -> u16 {
        match self {
            Level::L100 => 100,
            Level::L200 => 200,
            Level::L300 => 300,
            Level::L400 => 400,
            Level::L500 => 500,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Level", self.as_u16())
    }
}

impl FromStr for Level {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let digits = normalized.strip_suffix(" level").unwrap_or(&normalized);
        match digits {
            "100" => Ok(Level::L100),
            "200" => Ok(Level::L200),
            "300" => Ok(Level::L300),
            "400" => Ok(Level::L400),
            "500" => Ok(Level::L500),
            _ => Err(RegistrationError::invalid_field("level", s)),
        }
    }
}

/// The student fields collected alongside the photos. Select fields stay `None`
/// until chosen, and the whole record returns to default after a registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentData {
    pub name: String,
    pub email: String,
    pub program: String,
    pub matric_number: String,
    pub reg_number: String,
    pub room_number: String,
    pub gender: Option<Gender>,
    pub hall_of_residence: Option<Hall>,
    pub level: Option<Level>,
}

impl StudentData {
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}
