/// Lowercased lookup keys derived once per resolution call.
#[derive(Debug, Clone)]
pub(super) struct NameKeys {
    name: String,
    compact: String,
}

impl NameKeys {
    pub(super) fn new(app_name: &str) -> Self {
        let name = app_name.trim().to_lowercase();
        let compact = app_name
            .split_whitespace()
            .collect::<String>()
            .to_lowercase();
        Self { name, compact }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Residue entries are usually keyed by reverse-DNS bundle identifiers
/// (`com.vendor.AppName`) rather than the display name, so exact
/// equality alone misses most real residue. Each rule approximates
/// "the display name appears as a whole dot-delimited or
/// whitespace-stripped component" without knowing the true bundle id.
/// Anchored variants keep `Slack` from claiming
/// `com.tinyspeck.slackmacgap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ResidueMatchRule {
    /// `slack`
    ExactName,
    /// `slack.plist`
    PreferencesPlist,
    /// `com.slack.helper`
    DottedInfix,
    /// `.slack` as a whole dot-delimited component
    DottedComponent,
    /// `vendor.slack`
    DottedSuffix,
    /// `slack.databases`
    DottedPrefix,
    /// `visualstudiocode` for "Visual Studio Code"
    CompactName,
    /// `slackhelper`, `visualstudiocode-insiders`
    CompactPrefix,
}

pub(super) const RESIDUE_MATCH_RULES: [ResidueMatchRule; 8] = [
    ResidueMatchRule::ExactName,
    ResidueMatchRule::PreferencesPlist,
    ResidueMatchRule::DottedInfix,
    ResidueMatchRule::DottedComponent,
    ResidueMatchRule::DottedSuffix,
    ResidueMatchRule::DottedPrefix,
    ResidueMatchRule::CompactName,
    ResidueMatchRule::CompactPrefix,
];

impl ResidueMatchRule {
    pub(super) fn as_str(self) -> &'static str {
        match self {
            Self::ExactName => "exact_name",
            Self::PreferencesPlist => "preferences_plist",
            Self::DottedInfix => "dotted_infix",
            Self::DottedComponent => "dotted_component",
            Self::DottedSuffix => "dotted_suffix",
            Self::DottedPrefix => "dotted_prefix",
            Self::CompactName => "compact_name",
            Self::CompactPrefix => "compact_prefix",
        }
    }

    pub(super) fn applies(self, entry_name: &str, keys: &NameKeys) -> bool {
        let entry = entry_name.to_lowercase();
        let name = keys.name.as_str();
        match self {
            Self::ExactName => entry == name,
            Self::PreferencesPlist => entry == format!("{name}.plist"),
            Self::DottedInfix => entry.contains(format!(".{name}.").as_str()),
            Self::DottedComponent => contains_dotted_component(entry.as_str(), name),
            Self::DottedSuffix => entry.ends_with(format!(".{name}").as_str()),
            Self::DottedPrefix => entry.starts_with(format!("{name}.").as_str()),
            Self::CompactName => entry == keys.compact,
            Self::CompactPrefix => entry.starts_with(keys.compact.as_str()),
        }
    }
}

/// First applicable rule, in declaration order, so the recorded match
/// reason is deterministic.
pub(super) fn match_entry(entry_name: &str, keys: &NameKeys) -> Option<ResidueMatchRule> {
    if keys.is_empty() {
        return None;
    }
    RESIDUE_MATCH_RULES
        .iter()
        .copied()
        .find(|rule| rule.applies(entry_name, keys))
}

/// True when `.{name}` occurs immediately before a `.` or the end of
/// the entry. A trailing run of extra characters (`.slackmacgap`)
/// is a different identifier, not a match.
fn contains_dotted_component(entry: &str, name: &str) -> bool {
    let needle = format!(".{name}");
    let mut from = 0usize;
    while let Some(offset) = entry[from..].find(needle.as_str()) {
        let end = from + offset + needle.len();
        if end == entry.len() || entry[end..].starts_with('.') {
            return true;
        }
        from += offset + 1;
    }
    false
}
