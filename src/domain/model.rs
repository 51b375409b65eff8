use serde::{Deserialize, Serialize};

/// Raw member profile as returned by the member directory, before filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: String,
    pub display_name: String,
    pub is_bot: bool,
    pub tz_offset: i64,
}

/// A human member eligible for pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    /// Diagnostics only; the report addresses members by id.
    pub display_name: String,
    pub sort_key: i64,
}

impl From<MemberProfile> for Participant {
    fn from(profile: MemberProfile) -> Self {
        Self {
            id: profile.id,
            display_name: profile.display_name,
            sort_key: profile.tz_offset,
        }
    }
}

/// Eligible participants for one run, in enumeration order. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Builds a roster, keeping the first occurrence of any repeated id.
    pub fn new(participants: Vec<Participant>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let participants = participants
            .into_iter()
            .filter(|p| {
                let fresh = seen.insert(p.id.clone());
                if !fresh {
                    tracing::warn!("Duplicate member {} dropped from roster", p.id);
                }
                fresh
            })
            .collect();
        Self { participants }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn into_participants(self) -> Vec<Participant> {
        self.participants
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pair {
    /// Responsible for scheduling the 1-1.
    pub owner: Participant,
    pub partner: Participant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pairing {
    pub pairs: Vec<Pair>,
    pub leftover: Option<Participant>,
}

/// Outcome of one pairing run for a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub group_id: String,
    pub pairing: Pairing,
    pub text: String,
}

/// How the roster loader treats a member whose profile cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileErrorPolicy {
    /// Any unresolved profile makes the whole roster unavailable.
    #[default]
    Abort,
    /// Log the failure and leave the member out.
    Skip,
}

impl std::str::FromStr for ProfileErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown profile error policy: {}", other)),
        }
    }
}
