use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, instrument, warn};

use crate::actor_framework::{FrameworkError, Query, ResourceClient};
use crate::auth::{AuthError, Credential, CredentialAction, CredentialCreate};
use crate::clients::UserClient;
use crate::domain::{Address, Profile, Role, UserCreate};
use crate::user_actor::UserError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// The signed-in account. `role` is `None` until the user document has been read.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: Option<Role>,
}

#[derive(Clone)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub profile: Profile,
}

impl std::fmt::Debug for SignUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUp")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Trims and lower-cases an email, rejecting anything without an `@`.
pub fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AuthError::InvalidEmail(email)),
    }
}

pub fn check_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword(MIN_PASSWORD_LEN));
    }
    Ok(())
}

async fn hash_password(password: String, cost: u32) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Email/password identity plus the current session.
///
/// Credentials live in their own collection; the user document is created
/// through [`UserClient`] at sign-up.
#[derive(Clone)]
pub struct AuthClient {
    credentials: ResourceClient<Credential>,
    user_client: UserClient,
    session: Arc<watch::Sender<Option<Session>>>,
    bcrypt_cost: u32,
}

impl AuthClient {
    pub fn new(credentials: ResourceClient<Credential>, user_client: UserClient, bcrypt_cost: u32) -> Self {
        let (session, _) = watch::channel(None);
        Self {
            credentials,
            user_client,
            session: Arc::new(session),
            bcrypt_cost,
        }
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    /// Session changes: sign-in, sign-out and role refreshes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    pub fn require_session(&self) -> Result<Session, AuthError> {
        self.current_session().ok_or(AuthError::NotSignedIn)
    }

    async fn find_credential(&self, email: String) -> Result<Option<Credential>, AuthError> {
        let query = Query::new(format!("email == {}", email), move |c: &Credential| c.email == email);
        Ok(self.credentials.list(query).await?.into_iter().next())
    }

    /// Registers a login and its user document, then starts a session.
    ///
    /// The credential is written first. Its collection refuses a second login
    /// with the same email, so concurrent sign-ups cannot both get through. If
    /// the user document is then rejected, the credential is removed again.
    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn sign_up(&self, request: SignUp) -> Result<Session, AuthError> {
        let email = normalize_email(&request.email)?;
        check_password(&request.password)?;
        if self.find_credential(email.clone()).await?.is_some() {
            warn!("Sign-up with an email already in use");
            return Err(AuthError::EmailInUse(email));
        }

        let password_hash = hash_password(request.password, self.bcrypt_cost).await?;
        let credential_id = match self
            .credentials
            .create(CredentialCreate {
                email: email.clone(),
                password_hash,
            })
            .await
        {
            Ok(id) => id,
            Err(FrameworkError::Conflict(_)) => {
                warn!("Sign-up lost the race for this email");
                return Err(AuthError::EmailInUse(email));
            }
            Err(e) => return Err(e.into()),
        };

        let created = self
            .user_client
            .create_user(UserCreate {
                email: email.clone(),
                role: request.role,
                name: request.name,
                phone: request.phone,
                address: request.address,
                profile: request.profile,
            })
            .await;
        let user_id = match created {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "User document creation failed");
                if let Err(cleanup) = self.credentials.delete(credential_id).await {
                    error!(error = %cleanup, "Failed to remove credential after sign-up failure");
                }
                return Err(match e {
                    UserError::ValidationError(msg) => AuthError::Profile(msg),
                    other => AuthError::ActorCommunicationError(other.to_string()),
                });
            }
        };

        self.credentials
            .perform_action(credential_id, CredentialAction::LinkUser(user_id.clone()))
            .await?;

        let session = Session {
            user_id,
            email,
            role: Some(request.role),
        };
        self.session.send_replace(Some(session.clone()));
        info!(user_id = %session.user_id, "Signed up");
        Ok(session)
    }

    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: String, password: String) -> Result<Session, AuthError> {
        let email = normalize_email(&email).map_err(|_| AuthError::InvalidCredentials)?;
        let Some(credential) = self.find_credential(email.clone()).await? else {
            warn!("Sign-in for unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        let Some(user_id) = credential.user_id else {
            warn!("Sign-in before sign-up finished");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(password, credential.password_hash).await? {
            warn!("Sign-in with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let role = self.lookup_role(&user_id).await;
        let session = Session {
            user_id,
            email,
            role,
        };
        self.session.send_replace(Some(session.clone()));
        info!(user_id = %session.user_id, "Signed in");
        Ok(session)
    }

    #[instrument(skip(self))]
    pub fn sign_out(&self) {
        if let Some(previous) = self.session.send_replace(None) {
            info!(user_id = %previous.user_id, "Signed out");
        }
    }

    /// Re-reads the role from the user document into the session.
    #[instrument(skip(self))]
    pub async fn refresh_role(&self) -> Result<Option<Role>, AuthError> {
        let session = self.require_session()?;
        let role = self.lookup_role(&session.user_id).await;
        self.session.send_modify(|current| {
            if let Some(current) = current.as_mut().filter(|s| s.user_id == session.user_id) {
                current.role = role;
            }
        });
        Ok(role)
    }

    /// A missing or unreadable user document leaves the role unknown.
    async fn lookup_role(&self, user_id: &str) -> Option<Role> {
        match self.user_client.get_user(user_id.to_string()).await {
            Ok(user) => user.map(|u| u.role),
            Err(e) => {
                error!(user_id, error = %e, "Error fetching user role");
                None
            }
        }
    }

    /// Issues a one-time reset token. The caller delivers it out of band.
    #[instrument(skip(self))]
    pub async fn request_password_reset(&self, email: String) -> Result<String, AuthError> {
        let email = normalize_email(&email)?;
        let credential = self
            .find_credential(email.clone())
            .await?
            .ok_or(AuthError::UnknownEmail(email))?;
        let token = uuid::Uuid::new_v4().to_string();
        self.credentials
            .perform_action(credential.id, CredentialAction::IssueResetToken(token.clone()))
            .await?;
        info!("Password reset token issued");
        Ok(token)
    }

    #[instrument(skip(self, token, new_password))]
    pub async fn reset_password(&self, token: String, new_password: String) -> Result<(), AuthError> {
        check_password(&new_password)?;
        let query = Query::new("reset_token matches", move |c: &Credential| {
            c.reset_token.as_deref() == Some(token.as_str())
        });
        let credential = self
            .credentials
            .list(query)
            .await?
            .into_iter()
            .next()
            .ok_or(AuthError::InvalidResetToken)?;

        let hash = hash_password(new_password, self.bcrypt_cost).await?;
        self.credentials
            .perform_action(credential.id, CredentialAction::ReplacePassword(hash))
            .await?;
        info!(user_id = ?credential.user_id, "Password reset");
        Ok(())
    }
}
