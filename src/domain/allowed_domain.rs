use std::{fmt, str::FromStr};

/// Top-level domains offered in the email domain filter.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum AllowedDomain {
    Com,
    Org,
    Net,
    Ch,
    Uk,
    De,
    Fr,
    It,
    Pk,
}

impl AllowedDomain {
    pub const ALL: [AllowedDomain; 9] = [
        AllowedDomain::Com,
        AllowedDomain::Org,
        AllowedDomain::Net,
        AllowedDomain::Ch,
        AllowedDomain::Uk,
        AllowedDomain::De,
        AllowedDomain::Fr,
        AllowedDomain::It,
        AllowedDomain::Pk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AllowedDomain::Com => "com",
            AllowedDomain::Org => "org",
            AllowedDomain::Net => "net",
            AllowedDomain::Ch => "ch",
            AllowedDomain::Uk => "uk",
            AllowedDomain::De => "de",
            AllowedDomain::Fr => "fr",
            AllowedDomain::It => "it",
            AllowedDomain::Pk => "pk",
        }
    }
}

impl fmt::Display for AllowedDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllowedDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('.').to_lowercase();
        AllowedDomain::ALL
            .into_iter()
            .find(|domain| domain.as_str() == normalized)
            .ok_or_else(|| s.to_string())
    }
}
