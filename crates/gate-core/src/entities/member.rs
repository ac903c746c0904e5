use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A resident of the society. Visitors are registered against a member.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(alias = "unit")]
    pub apartment: String,
}

/// Payload for creating or updating a member.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MemberFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub apartment: String,
}

impl MemberFields {
    /// Build the stored record once the store has assigned an id.
    #[must_use]
    pub fn into_member(self, id: i64) -> Member {
        Member {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            apartment: self.apartment,
        }
    }
}

impl From<&Member> for MemberFields {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            apartment: member.apartment.clone(),
        }
    }
}
