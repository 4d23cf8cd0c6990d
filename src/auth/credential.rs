use std::fmt;

use crate::actor_framework::Entity;

/// Login record kept by the identity provider, separate from the user document.
///
/// The email is unique across the collection. `user_id` stays `None` until the
/// user document behind the login has been written.
#[derive(Clone)]
pub struct Credential {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub user_id: Option<String>,
    pub reset_token: Option<String>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("user_id", &self.user_id)
            .field("password_hash", &"<redacted>")
            .field("reset_token", &self.reset_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Clone)]
pub struct CredentialCreate {
    pub email: String,
    pub password_hash: String,
}

impl fmt::Debug for CredentialCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialCreate")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub enum CredentialAction {
    LinkUser(String),
    IssueResetToken(String),
    /// Replaces the hash and burns any outstanding reset token.
    ReplacePassword(String),
}

impl fmt::Debug for CredentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialAction::LinkUser(user_id) => f.debug_tuple("LinkUser").field(user_id).finish(),
            CredentialAction::IssueResetToken(_) => f.write_str("IssueResetToken"),
            CredentialAction::ReplacePassword(_) => f.write_str("ReplacePassword"),
        }
    }
}

impl Entity for Credential {
    type Id = String;
    type CreateParams = CredentialCreate;
    type Patch = ();
    type Action = CredentialAction;
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.email)
    }

    fn from_create_params(id: String, params: CredentialCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            email: params.email,
            password_hash: params.password_hash,
            user_id: None,
            reset_token: None,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, action: CredentialAction) -> Result<(), String> {
        match action {
            CredentialAction::LinkUser(user_id) => {
                if self.user_id.is_some() {
                    return Err(format!("Credential {} is already linked", self.id));
                }
                self.user_id = Some(user_id);
            }
            CredentialAction::IssueResetToken(token) => self.reset_token = Some(token),
            CredentialAction::ReplacePassword(hash) => {
                self.password_hash = hash;
                self.reset_token = None;
            }
        }
        Ok(())
    }
}
