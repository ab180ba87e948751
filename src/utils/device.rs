//! Device classification for device-specific redirect targets.

use std::fmt;
use std::str::FromStr;

use woothee::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Mobile,
    Desktop,
}

impl DeviceKind {
    /// Classify a User-Agent string. Crawlers, appliances and unknown
    /// agents get no device-specific target.
    pub fn from_user_agent(user_agent: &str) -> Option<Self> {
        let parser = Parser::new();
        let result = parser.parse(user_agent)?;
        match result.category {
            "smartphone" | "mobilephone" => Some(DeviceKind::Mobile),
            "pc" => Some(DeviceKind::Desktop),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mobile => write!(f, "mobile"),
            Self::Desktop => write!(f, "desktop"),
        }
    }
}

impl FromStr for DeviceKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "desktop" => Ok(Self::Desktop),
            _ => Err(format!(
                "Invalid device '{}', expected 'mobile' or 'desktop'",
                s
            )),
        }
    }
}
