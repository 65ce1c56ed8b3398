//! Prompts for AI-written listing copy.

use serde::Deserialize;

use crate::domain::foundation::ValidationError;

/// Maximum number of title suggestions returned to the client.
pub const MAX_TITLE_SUGGESTIONS: usize = 5;

pub const COPYWRITER_SYSTEM_PROMPT: &str = "Sei un esperto di marketing immobiliare specializzato nella creazione di annunci di proprietà in affitto.";

/// Listing attributes the copy is written from.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAttributes {
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub city: String,
    pub zone: Option<String>,
    pub square_meters: Option<i32>,
    pub rooms: Option<i32>,
    pub bathrooms: Option<i32>,
    #[serde(default)]
    pub features: Vec<String>,
    pub price: Option<i32>,
}

impl PropertyAttributes {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.property_type.trim().is_empty() {
            return Err(ValidationError::empty_field("propertyType"));
        }
        if self.city.trim().is_empty() {
            return Err(ValidationError::empty_field("city"));
        }
        Ok(())
    }

    /// One-line Italian summary, e.g. "bilocale a Milano, zona Navigli, 60 mq".
    pub fn summary(&self) -> String {
        let mut info = format!("{} a {}", type_label(&self.property_type), self.city.trim());
        if let Some(zone) = self.zone.as_deref().filter(|z| !z.trim().is_empty()) {
            info.push_str(&format!(", zona {}", zone.trim()));
        }
        if let Some(sqm) = self.square_meters.filter(|v| *v > 0) {
            info.push_str(&format!(", {} mq", sqm));
        }
        if let Some(rooms) = self.rooms.filter(|v| *v > 0) {
            info.push_str(&format!(", {} {}", rooms, if rooms == 1 { "stanza" } else { "stanze" }));
        }
        if let Some(baths) = self.bathrooms.filter(|v| *v > 0) {
            info.push_str(&format!(", {} {}", baths, if baths == 1 { "bagno" } else { "bagni" }));
        }
        if let Some(price) = self.price.filter(|v| *v > 0) {
            info.push_str(&format!(", {} euro al mese", price));
        }
        info
    }

    fn features_line(&self, lead: &str) -> String {
        if self.features.is_empty() {
            String::new()
        } else {
            format!("{}: {}.", lead, self.features.join(", "))
        }
    }
}

/// Italian label used in prompts for a stored listing type.
pub fn type_label(property_type: &str) -> &'static str {
    match property_type {
        "stanza_singola" => "stanza singola",
        "stanza_doppia" => "stanza doppia",
        "monolocale" => "monolocale",
        "bilocale" => "bilocale",
        _ => "immobile",
    }
}

pub fn description_prompt(attrs: &PropertyAttributes) -> String {
    format!(
        "Genera una descrizione dettagliata e persuasiva per un annuncio immobiliare di un {}.\n\
         {}\n\n\
         La descrizione deve:\n\
         - Essere di circa 150-200 parole\n\
         - Avere un tono professionale ma accogliente\n\
         - Evidenziare i punti di forza della proprietà\n\
         - Menzionare la posizione e i servizi nelle vicinanze\n\
         - Includere un invito all'azione finale\n\n\
         Restituisci solo la descrizione, senza titoli aggiuntivi.",
        attrs.summary(),
        attrs.features_line("Caratteristiche principali"),
    )
}

pub fn title_prompt(attrs: &PropertyAttributes) -> String {
    format!(
        "Genera {} titoli accattivanti per un annuncio immobiliare per un {}. {}\n\
         Ogni titolo deve essere conciso (massimo 10 parole), descrittivo e persuasivo.\n\
         Scrivi un titolo per riga, senza numerazione, virgolette o altri caratteri aggiuntivi.",
        MAX_TITLE_SUGGESTIONS,
        attrs.summary(),
        attrs.features_line("Con caratteristiche"),
    )
}

/// Splits model output into at most [`MAX_TITLE_SUGGESTIONS`] clean titles.
///
/// List markers and surrounding quotes are stripped; blank lines dropped.
pub fn parse_title_suggestions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '.' | ')' | '-' | '*'))
                .trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .take(MAX_TITLE_SUGGESTIONS)
        .collect()
}
