use serde::{Deserialize, Serialize};

/// Where a beneficiary stands in the registration workflow.
///
/// Structured exports carry one of the snake_case tags. Older spreadsheet
/// imports only have a free-text status column; [`RegistrationStatus::parse`]
/// maps that text onto the same variants with a fixed keyword set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum RegistrationStatus {
    /// Registered and confirmed eligible for the program.
    RegisteredEligible,
    Registered,
    TwoVisits,
    OneVisit,
    /// Free text that matched no keyword.
    Other(String),
    #[default]
    None,
}

const REGISTERED: &[&str] = &["مسجل", "registered"];
const NOT_REGISTERED: &[&str] = &["غير مسجل", "unregistered", "not registered"];
const ELIGIBLE: &[&str] = &["مؤهل", "مستحق", "eligible"];
const NOT_ELIGIBLE: &[&str] = &["غير مؤهل", "غير مستحق", "ineligible", "not eligible"];
const TWO_VISITS: &[&str] = &["زيارتين", "زيارتان", "two visits", "2 visits"];
const ONE_VISIT: &[&str] = &["زيارة واحدة", "one visit", "1 visit"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// True when a positive keyword appears outside of every negated phrase.
fn affirms(text: &str, positive: &[&str], negative: &[&str]) -> bool {
    let mut stripped = text.to_string();
    for neg in negative {
        stripped = stripped.replace(neg, " ");
    }
    contains_any(&stripped, positive)
}

impl RegistrationStatus {
    /// Parse a status value. Canonical tags map directly; anything else is
    /// treated as legacy free text and matched on keywords.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        match text.as_str() {
            "" => return RegistrationStatus::None,
            "registered_eligible" => return RegistrationStatus::RegisteredEligible,
            "two_visits" => return RegistrationStatus::TwoVisits,
            "one_visit" => return RegistrationStatus::OneVisit,
            _ => {}
        }

        let registered = affirms(&text, REGISTERED, NOT_REGISTERED);
        let eligible = affirms(&text, ELIGIBLE, NOT_ELIGIBLE);

        if registered && eligible {
            RegistrationStatus::RegisteredEligible
        } else if registered {
            RegistrationStatus::Registered
        } else if contains_any(&text, TWO_VISITS) {
            RegistrationStatus::TwoVisits
        } else if contains_any(&text, ONE_VISIT) {
            RegistrationStatus::OneVisit
        } else {
            RegistrationStatus::Other(raw.trim().to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RegistrationStatus::RegisteredEligible => "registered_eligible",
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::TwoVisits => "two_visits",
            RegistrationStatus::OneVisit => "one_visit",
            RegistrationStatus::Other(text) => text,
            RegistrationStatus::None => "",
        }
    }
}

impl From<Option<String>> for RegistrationStatus {
    fn from(value: Option<String>) -> Self {
        value
            .map(|raw| RegistrationStatus::parse(&raw))
            .unwrap_or_default()
    }
}

impl From<RegistrationStatus> for String {
    fn from(value: RegistrationStatus) -> Self {
        value.as_str().to_string()
    }
}
