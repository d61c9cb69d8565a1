use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Retailers recognized on receipt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreName {
    #[serde(rename = "Walmart")]
    Walmart,
    #[serde(rename = "ALDI")]
    Aldi,
    #[serde(rename = "Costco")]
    Costco,
    #[serde(rename = "Target")]
    Target,
    #[serde(rename = "Kroger")]
    Kroger,
}

impl StoreName {
    /// Lookup order when several markers appear in the same text: the first
    /// entry whose marker is found wins.
    pub const PRIORITY: [StoreName; 5] = [
        StoreName::Walmart,
        StoreName::Aldi,
        StoreName::Costco,
        StoreName::Target,
        StoreName::Kroger,
    ];

    /// Lower-case fragment searched for in the receipt text.
    pub fn marker(self) -> &'static str {
        match self {
            StoreName::Walmart => "walmart",
            StoreName::Aldi => "aldi",
            StoreName::Costco => "costco",
            StoreName::Target => "target",
            StoreName::Kroger => "kroger",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StoreName::Walmart => "Walmart",
            StoreName::Aldi => "ALDI",
            StoreName::Costco => "Costco",
            StoreName::Target => "Target",
            StoreName::Kroger => "Kroger",
        }
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        StoreName::PRIORITY
            .into_iter()
            .find(|store| store.marker() == wanted)
            .ok_or_else(|| format!("Unknown store: '{s}'"))
    }
}
