//! Supported European countries.

use serde::{Deserialize, Serialize};

macro_rules! countries {
    ($($variant:ident => $code:literal, $name:literal;)+) => {
        /// Country a listing or city belongs to.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Country {
            $(#[serde(rename = $code)] $variant,)+
        }

        impl Country {
            pub const ALL: &'static [Country] = &[$(Country::$variant,)+];

            pub fn code(&self) -> &'static str {
                match self {
                    $(Country::$variant => $code,)+
                }
            }

            /// Italian display name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Country::$variant => $name,)+
                }
            }
        }
    };
}

countries! {
    At => "AT", "Austria";
    Be => "BE", "Belgio";
    Bg => "BG", "Bulgaria";
    Cy => "CY", "Cipro";
    Hr => "HR", "Croazia";
    Dk => "DK", "Danimarca";
    Ee => "EE", "Estonia";
    Fi => "FI", "Finlandia";
    Fr => "FR", "Francia";
    De => "DE", "Germania";
    Gr => "GR", "Grecia";
    Ie => "IE", "Irlanda";
    It => "IT", "Italia";
    Lv => "LV", "Lettonia";
    Lt => "LT", "Lituania";
    Lu => "LU", "Lussemburgo";
    Mt => "MT", "Malta";
    Nl => "NL", "Paesi Bassi";
    Pl => "PL", "Polonia";
    Pt => "PT", "Portogallo";
    Cz => "CZ", "Repubblica Ceca";
    Ro => "RO", "Romania";
    Sk => "SK", "Slovacchia";
    Si => "SI", "Slovenia";
    Es => "ES", "Spagna";
    Se => "SE", "Svezia";
    Hu => "HU", "Ungheria";
    Al => "AL", "Albania";
    Ad => "AD", "Andorra";
    By => "BY", "Bielorussia";
    Ba => "BA", "Bosnia ed Erzegovina";
    Va => "VA", "Città del Vaticano";
    Is => "IS", "Islanda";
    Li => "LI", "Liechtenstein";
    Mk => "MK", "Macedonia del Nord";
    Md => "MD", "Moldova";
    Mc => "MC", "Monaco";
    Me => "ME", "Montenegro";
    No => "NO", "Norvegia";
    Uk => "UK", "Regno Unito";
    Rs => "RS", "Serbia";
    Ch => "CH", "Svizzera";
    Ua => "UA", "Ucraina";
}

impl Country {
    /// Parses a country code, case-insensitively.
    pub fn parse(code: &str) -> Option<Self> {
        let upper = code.trim().to_ascii_uppercase();
        Self::ALL.iter().copied().find(|c| c.code() == upper)
    }
}

impl Default for Country {
    fn default() -> Self {
        Country::It
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// `{code, name}` pair returned by the countries endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CountryInfo {
    pub code: &'static str,
    pub name: &'static str,
}

impl From<Country> for CountryInfo {
    fn from(country: Country) -> Self {
        Self {
            code: country.code(),
            name: country.name(),
        }
    }
}
