// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use time::{Duration, OffsetDateTime};

use dock_visit_persistence::{OperatorData, Persistence, PersistenceError, SessionData};

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Every authenticated login principal carries exactly one role; capability
/// predicates on the role, not string comparison, decide what an actor may
/// do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: facility administrators.
    ///
    /// Admins may perform every operator action plus operator account
    /// management and administrative visit deletion.
    Admin,
    /// Operator role: facility gate/dock staff.
    ///
    /// Operators confirm pending visits, advance visit status, manage the
    /// carrier/tenant registries, and record incidents.
    Operator,
    /// Tenant role: a facility occupant's provisioned login.
    ///
    /// Tenants book visits for themselves and read their own data. They
    /// never confirm visits or advance operational status.
    Tenant,
}

impl Role {
    /// Parses a role from its stored representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known role.
    pub fn parse(s: &str) -> Result<Self, AuthError> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Operator" => Ok(Self::Operator),
            "Tenant" => Ok(Self::Tenant),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {s}"),
            }),
        }
    }

    /// Returns the stored representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Operator => "Operator",
            Self::Tenant => "Tenant",
        }
    }

    /// Whether this role may confirm confirmation-pending visits.
    #[must_use]
    pub const fn can_confirm_visits(&self) -> bool {
        matches!(self, Self::Admin | Self::Operator)
    }

    /// Whether this role may advance a visit's operational status.
    #[must_use]
    pub const fn can_advance_status(&self) -> bool {
        matches!(self, Self::Admin | Self::Operator)
    }

    /// Whether this role may manage the carrier and tenant registries.
    #[must_use]
    pub const fn can_manage_registry(&self) -> bool {
        matches!(self, Self::Admin | Self::Operator)
    }

    /// Whether this role may create operator accounts.
    #[must_use]
    pub const fn can_create_operators(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this role may delete visits (administrative correction).
    #[must_use]
    pub const fn can_delete_visits(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// An authenticated actor with an associated role.
///
/// This is the login principal behind a validated session, carried through
/// every handler so ownership and authorization are explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The operator id behind this actor.
    pub operator_id: i64,
    /// The login name of the actor.
    pub login_name: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(operator_id: i64, login_name: String, role: Role) -> Self {
        Self {
            operator_id,
            login_name,
            role,
        }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may confirm a confirmation-pending visit.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor's role lacks the capability.
    pub fn authorize_confirm_visit(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.can_confirm_visits() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("confirm_visit"),
                required_role: String::from("Operator or Admin"),
            })
        }
    }

    /// Checks if an actor may advance a visit's status.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor's role lacks the capability.
    pub fn authorize_advance_status(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.can_advance_status() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("advance_visit_status"),
                required_role: String::from("Operator or Admin"),
            })
        }
    }

    /// Checks if an actor may manage the carrier/tenant registries.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor's role lacks the capability.
    pub fn authorize_manage_registry(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.can_manage_registry() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("manage_registry"),
                required_role: String::from("Operator or Admin"),
            })
        }
    }

    /// Checks if an actor may create operator accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor's role lacks the capability.
    pub fn authorize_create_operator(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.can_create_operators() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("create_operator"),
                required_role: String::from("Admin"),
            })
        }
    }

    /// Checks if an actor may delete a visit.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor's role lacks the capability.
    pub fn authorize_delete_visit(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.can_delete_visits() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("delete_visit"),
                required_role: String::from("Admin"),
            })
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates an operator by password and creates a session.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `operator_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong, the operator is
    /// disabled, or the session cannot be created.
    pub fn login(
        persistence: &mut Persistence,
        login_name: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedActor, OperatorData), AuthError> {
        let operator: OperatorData = persistence
            .get_operator_by_login(login_name)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid credentials"),
            })?;

        let password_matches: bool =
            dock_visit_persistence::verify_password(password, &operator.password_hash).map_err(
                |e| AuthError::AuthenticationFailed {
                    reason: format!("Password verification error: {e}"),
                },
            )?;
        if !password_matches {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid credentials"),
            });
        }

        if operator.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        let role: Role = Role::parse(&operator.role)?;

        let session_token: String = Self::generate_session_token();

        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .create_session(&session_token, operator.operator_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_login(operator.operator_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        let authenticated_actor: AuthenticatedActor =
            AuthenticatedActor::new(operator.operator_id, operator.login_name.clone(), role);

        Ok((session_token, authenticated_actor, operator))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired, or the
    /// operator behind it is disabled or gone.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, OperatorData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let operator: OperatorData = persistence
            .get_operator_by_id(session.operator_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Operator not found"),
            })?;

        if operator.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        let role: Role = Role::parse(&operator.role)?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        let authenticated_actor: AuthenticatedActor =
            AuthenticatedActor::new(operator.operator_id, operator.login_name.clone(), role);

        Ok((authenticated_actor, operator))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates a session token.
    ///
    /// Tokens are opaque; the timestamp component only guarantees
    /// uniqueness across process restarts.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionExpired(msg) | PersistenceError::SessionNotFound(msg) => {
                AuthError::AuthenticationFailed { reason: msg }
            }
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
