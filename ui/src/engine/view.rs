/// The mutually exclusive top-level screens, in the order a new user meets them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ViewId {
    #[default]
    Auth,
    Subscription,
    Map,
}

impl ViewId {
    /// Helper to get the display name for each view.
    pub fn name(&self) -> &'static str {
        match self {
            ViewId::Auth => "Sign in",
            ViewId::Subscription => "Plans",
            ViewId::Map => "Map",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn ids_are_lowercase_names() {
        assert_eq!(ViewId::from_str("map"), Ok(ViewId::Map));
        assert_eq!(ViewId::Subscription.to_string(), "subscription");
        assert!(ViewId::from_str("settings").is_err());
    }
}
