use std::fmt;

/// The fixed set of forecast components served by the backend.
///
/// `*Combined` variants hold the aggregated forecast for a component;
/// the plain variants hold the individual elements (single polls,
/// single markets, ...) over time. `Pollyvote` is the combined
/// forecast itself and has no separate combined variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Pollyvote,
    Markets,
    MarketsCombined,
    Polls,
    PollsCombined,
    IndexModels,
    EconModels,
    IndexModelsCombined,
    EconModelsCombined,
    Experts,
    ExpertsCombined,
    Expectations,
    ExpectationsCombined,
}

/// Suffix marking the aggregated form of a component.
pub const COMBINED_SUFFIX: &str = "_combined";

impl Component {
    /// Every component, in the order the backend enumerates them.
    /// Loader passes iterate this list, so it also fixes the order in
    /// which storage entries are examined.
    pub const ALL: [Component; 13] = [
        Component::Pollyvote,
        Component::Markets,
        Component::MarketsCombined,
        Component::Polls,
        Component::PollsCombined,
        Component::IndexModels,
        Component::EconModels,
        Component::IndexModelsCombined,
        Component::EconModelsCombined,
        Component::Experts,
        Component::ExpertsCombined,
        Component::Expectations,
        Component::ExpectationsCombined,
    ];

    /// Canonical name, used both as the request parameter and as the
    /// storage key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Pollyvote => "pollyvote",
            Component::Markets => "markets",
            Component::MarketsCombined => "markets_combined",
            Component::Polls => "polls",
            Component::PollsCombined => "polls_combined",
            Component::IndexModels => "index_models",
            Component::EconModels => "econ_models",
            Component::IndexModelsCombined => "index_models_combined",
            Component::EconModelsCombined => "econ_models_combined",
            Component::Experts => "experts",
            Component::ExpertsCombined => "experts_combined",
            Component::Expectations => "expectations",
            Component::ExpectationsCombined => "expectations_combined",
        }
    }

    /// Parse a canonical component name. Returns `None` for anything
    /// outside the fixed enumeration.
    pub fn parse(name: &str) -> Option<Component> {
        Component::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == name)
    }

    /// Resolve the `type` field of a backend response to its canonical
    /// component. A few remote-side names differ from the local ones;
    /// everything else maps through unchanged.
    pub fn from_remote(remote: &str) -> Option<Component> {
        let canonical = match remote {
            "pm" => "markets",
            "pm_combined" => "markets_combined",
            "intentionpolls" => "polls",
            "intentionpolls_combined" => "polls_combined",
            other => other,
        };
        Component::parse(canonical)
    }

    pub fn is_combined(&self) -> bool {
        self.as_str().ends_with(COMBINED_SUFFIX)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the aggregated form of a component: identity if the name
/// already carries the combined suffix, otherwise the suffix is
/// appended. Operates on names rather than parsed components so that
/// unknown inputs still produce a (non-matching) lookup name.
pub fn combined_name(name: &str) -> String {
    if name.ends_with(COMBINED_SUFFIX) {
        name.to_string()
    } else {
        format!("{}{}", name, COMBINED_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_all_components() {
        for c in Component::ALL {
            assert_eq!(Component::parse(c.as_str()), Some(c));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        assert_eq!(Component::parse("weather"), None);
        assert_eq!(Component::parse("pollyvote_combined"), None);
        assert_eq!(Component::parse(""), None);
    }

    #[test]
    fn test_from_remote_applies_mapping() {
        assert_eq!(Component::from_remote("pm"), Some(Component::Markets));
        assert_eq!(
            Component::from_remote("pm_combined"),
            Some(Component::MarketsCombined)
        );
        assert_eq!(
            Component::from_remote("intentionpolls"),
            Some(Component::Polls)
        );
        assert_eq!(
            Component::from_remote("intentionpolls_combined"),
            Some(Component::PollsCombined)
        );
    }

    #[test]
    fn test_from_remote_identity_for_canonical_names() {
        assert_eq!(
            Component::from_remote("experts"),
            Some(Component::Experts)
        );
        assert_eq!(Component::from_remote("bogus"), None);
    }

    #[test]
    fn test_combined_name() {
        assert_eq!(combined_name("polls"), "polls_combined");
        assert_eq!(combined_name("polls_combined"), "polls_combined");
        // "pollyvote" has no combined variant; the synthesized name
        // simply fails the later lookup.
        assert_eq!(combined_name("pollyvote"), "pollyvote_combined");
    }

    #[test]
    fn test_is_combined() {
        assert!(Component::PollsCombined.is_combined());
        assert!(!Component::Polls.is_combined());
        assert!(!Component::Pollyvote.is_combined());
    }
}
