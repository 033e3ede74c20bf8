use std::collections::BTreeMap;

/// Level and carried-over experience of one party member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberProgress {
    pub level: u32,
    pub exp: u32,
}

impl Default for MemberProgress {
    fn default() -> Self {
        Self { level: 1, exp: 0 }
    }
}

/// Per-member progression keyed by ally `source_id`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyProgress {
    members: BTreeMap<String, MemberProgress>,
}

impl PartyProgress {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_member(mut self, source_id: impl Into<String>, level: u32, exp: u32) -> Self {
        self.members.insert(
            source_id.into(),
            MemberProgress {
                level: level.max(1),
                exp,
            },
        );
        self
    }

    /// Progress of a member; unknown members start at level 1.
    pub fn get(&self, source_id: &str) -> MemberProgress {
        self.members.get(source_id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, source_id: &str, progress: MemberProgress) {
        self.members.insert(source_id.to_owned(), progress);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MemberProgress)> {
        self.members.iter().map(|(id, p)| (id.as_str(), *p))
    }
}
