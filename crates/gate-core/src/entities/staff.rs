use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A member of the security team working the gate.
///
/// `shift` is free text; the admin screens offer Morning, Evening and Night.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SecurityStaff {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub shift: String,
}

/// Payload for creating or updating a security staff record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StaffFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub shift: String,
}

impl StaffFields {
    #[must_use]
    pub fn into_staff(self, id: i64) -> SecurityStaff {
        SecurityStaff {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            shift: self.shift,
        }
    }
}

impl From<&SecurityStaff> for StaffFields {
    fn from(staff: &SecurityStaff) -> Self {
        Self {
            name: staff.name.clone(),
            email: staff.email.clone(),
            phone: staff.phone.clone(),
            shift: staff.shift.clone(),
        }
    }
}
