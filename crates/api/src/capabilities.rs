// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions an actor is permitted to perform
//! without leaking domain internals. They are advisory only and do not
//! replace backend authorization checks.

use crate::auth::AuthenticatedActor;
use crate::request_response::{Capability, GlobalCapabilities};
use dock_visit_persistence::OperatorData;

/// Computes global capabilities for an authenticated actor.
///
/// Disabled operators have no capabilities regardless of role; otherwise
/// the flags follow the role's capability predicates.
#[must_use]
pub fn compute_global_capabilities(
    actor: &AuthenticatedActor,
    operator: &OperatorData,
) -> GlobalCapabilities {
    if operator.is_disabled {
        return GlobalCapabilities {
            can_book_visits: Capability::Denied,
            can_confirm_visits: Capability::Denied,
            can_advance_status: Capability::Denied,
            can_manage_registry: Capability::Denied,
            can_create_operators: Capability::Denied,
            can_delete_visits: Capability::Denied,
        };
    }

    GlobalCapabilities {
        // Every enabled login may book visits (tenants book their own)
        can_book_visits: Capability::Allowed,
        can_confirm_visits: Capability::from_bool(actor.role.can_confirm_visits()),
        can_advance_status: Capability::from_bool(actor.role.can_advance_status()),
        can_manage_registry: Capability::from_bool(actor.role.can_manage_registry()),
        can_create_operators: Capability::from_bool(actor.role.can_create_operators()),
        can_delete_visits: Capability::from_bool(actor.role.can_delete_visits()),
    }
}
