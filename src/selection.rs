use crate::error::{Error, Result};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The only resource kind this browser models.
pub const CONTENT_TYPE: &str = "bill";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Congress {
    C114,
    C115,
    C116,
    C117,
    C118,
}

impl Congress {
    /// Supported sessions, oldest first.
    pub const ALL: [Congress; 5] = [
        Congress::C114,
        Congress::C115,
        Congress::C116,
        Congress::C117,
        Congress::C118,
    ];

    pub fn latest() -> Self {
        Congress::C118
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Congress::C114 => "114",
            Congress::C115 => "115",
            Congress::C116 => "116",
            Congress::C117 => "117",
            Congress::C118 => "118",
        }
    }
}

impl FromStr for Congress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Congress::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::InvalidSelection(format!("unsupported congress: {s}")))
    }
}

impl Display for Congress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillType {
    Hr,
    S,
    Sjres,
    Hjres,
    Hconres,
    Sconres,
    Hres,
    Sres,
}

impl BillType {
    /// Codes in the order the type selector lists them.
    pub const ALL: [BillType; 8] = [
        BillType::Hr,
        BillType::S,
        BillType::Sjres,
        BillType::Hjres,
        BillType::Hconres,
        BillType::Sconres,
        BillType::Hres,
        BillType::Sres,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BillType::Hr => "hr",
            BillType::S => "s",
            BillType::Sjres => "sjres",
            BillType::Hjres => "hjres",
            BillType::Hconres => "hconres",
            BillType::Sconres => "sconres",
            BillType::Hres => "hres",
            BillType::Sres => "sres",
        }
    }
}

impl FromStr for BillType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BillType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidSelection(format!("unsupported bill type: {s}")))
    }
}

impl Display for BillType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable snapshot of the three-level drill-down. Transitions return a new
/// snapshot; the cascade resets live here, not in the event handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    congress: Congress,
    bill_type: Option<BillType>,
    bill_number: Option<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            congress: Congress::latest(),
            bill_type: None,
            bill_number: None,
        }
    }
}

impl Selection {
    pub fn congress(&self) -> Congress {
        self.congress
    }

    pub fn bill_type(&self) -> Option<BillType> {
        self.bill_type
    }

    pub fn bill_number(&self) -> Option<&str> {
        self.bill_number.as_deref()
    }

    /// Changing the session discards both downstream choices.
    pub fn with_congress(&self, congress: Congress) -> Selection {
        Selection {
            congress,
            bill_type: None,
            bill_number: None,
        }
    }

    /// Changing the type discards the number.
    pub fn with_bill_type(&self, bill_type: Option<BillType>) -> Selection {
        Selection {
            congress: self.congress,
            bill_type,
            bill_number: None,
        }
    }

    /// A number is only meaningful once a type disambiguates it.
    pub fn with_bill_number(&self, bill_number: Option<String>) -> Result<Selection> {
        if let Some(number) = &bill_number {
            if self.bill_type.is_none() {
                return Err(Error::InvalidSelection(
                    "bill number requires a bill type".to_string(),
                ));
            }
            if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidSelection(format!(
                    "bill number must be numeric: {number}"
                )));
            }
        }
        Ok(Selection {
            congress: self.congress,
            bill_type: self.bill_type,
            bill_number,
        })
    }
}
