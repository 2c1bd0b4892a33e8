use serde::{Deserialize, Serialize};

use super::repo_types::{NewUser, UserChanges};

/// Blank strings count as absent.
fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// Body of `POST /users`. Fields are optional here so a missing one is
/// reported by name instead of as a generic JSON rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_pic: Option<String>,
}

impl CreateUserRequest {
    /// Required-field check; returns the names of the missing or blank fields.
    pub fn into_new_user(self) -> Result<NewUser, Vec<&'static str>> {
        let name = present(self.name);
        let email = present(self.email);
        let phone = present(self.phone);
        let address = present(self.address);

        match (name, email, phone, address) {
            (Some(name), Some(email), Some(phone), Some(address)) => Ok(NewUser {
                name,
                email,
                phone,
                address,
                profile_pic: present(self.profile_pic),
            }),
            (name, email, phone, address) => {
                let missing = [
                    ("name", name.is_none()),
                    ("email", email.is_none()),
                    ("phone", phone.is_none()),
                    ("address", address.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, missing)| missing.then_some(field))
                .collect();
                Err(missing)
            }
        }
    }
}

/// Body of `PUT /users/:uid`. Any subset of fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_pic: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            phone: r.phone,
            address: r.address,
            profile_pic: present(r.profile_pic),
            is_active: r.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
