// src/services/rbac_service.rs

use crate::models::rbac::{Action, Role};

/// Política de permissões: função pura e total sobre (papel, ação).
///
/// - SUPER_USER e EDITOR podem criar/alterar/remover registros de estoque.
/// - VIEWER só lê.
/// - Gestão de usuários é exclusiva do SUPER_USER.
/// - Papel não reconhecido não pode nada.
pub fn can_perform(role: Role, action: Action) -> bool {
    match action {
        Action::ManageUsers => can_manage_users(role),
        Action::Inventory(_, _) => match role {
            Role::SuperUser | Role::Editor => true,
            Role::Viewer | Role::Unrecognized => false,
        },
    }
}

pub fn can_manage_users(role: Role) -> bool {
    matches!(role, Role::SuperUser)
}

/// Variante com o nome da ação em texto ("create_material").
/// Ação desconhecida é negada.
pub fn can_perform_named(role: Role, action: &str) -> bool {
    action.parse::<Action>().is_ok_and(|a| can_perform(role, a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rbac::{Operation, Resource};

    const ROLES: [Role; 4] = [Role::SuperUser, Role::Editor, Role::Viewer, Role::Unrecognized];

    #[test]
    fn documented_decisions() {
        assert!(!can_perform_named(Role::Viewer, "create_material"));
        assert!(can_perform_named(Role::Editor, "create_material"));
        assert!(!can_perform_named(Role::Editor, "manage_users"));
        assert!(can_perform_named(Role::SuperUser, "manage_users"));
    }

    #[test]
    fn editors_and_super_users_mutate_every_inventory_resource() {
        for resource in [
            Resource::Material,
            Resource::Project,
            Resource::Category,
            Resource::Unit,
            Resource::Inflow,
            Resource::Outflow,
        ] {
            for op in [Operation::Create, Operation::Update, Operation::Delete] {
                let action = Action::Inventory(op, resource);
                assert!(can_perform(Role::SuperUser, action), "{action}");
                assert!(can_perform(Role::Editor, action), "{action}");
                assert!(!can_perform(Role::Viewer, action), "{action}");
            }
        }
    }

    #[test]
    fn unrecognized_role_has_no_permissions() {
        assert!(!can_perform_named(Role::Unrecognized, "create_project"));
        assert!(!can_perform_named(Role::Unrecognized, "manage_users"));
    }

    #[test]
    fn unknown_action_is_denied_for_everyone() {
        for role in ROLES {
            assert!(!can_perform_named(role, "truncate_ledger"));
        }
    }
}
