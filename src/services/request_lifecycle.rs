//! Ciclo de vida de las solicitudes
//! 
//! Guardas de rol y de estado para assign / approve / reject, y el alcance
//! de visibilidad de cada rol al listar solicitudes.

use uuid::Uuid;

use crate::models::car_request::{RequestStatus, Transition};
use crate::models::user::UserRole;
use crate::utils::errors::{forbidden_error, AppError};

/// El rol del actor puede ejecutar la transición
pub fn authorize(transition: Transition, role: UserRole) -> Result<(), AppError> {
    if transition.allowed_roles().contains(&role) {
        Ok(())
    } else {
        Err(forbidden_error(
            &format!("{} request", transition.name()),
            &format!("role '{}' is not allowed", role),
        ))
    }
}

/// La transición es válida desde el estado actual.
/// Repetir approve/reject sobre un estado terminal es un conflicto y no modifica nada.
pub fn check_transition(transition: Transition, current: RequestStatus) -> Result<(), AppError> {
    if transition.allowed_from().contains(&current) {
        Ok(())
    } else {
        Err(AppError::Conflict(format!(
            "Cannot {} a request with status {}",
            transition.name(),
            current
        )))
    }
}

/// Qué solicitudes ve cada rol en el historial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScope {
    All,
    Status(RequestStatus),
    Driver(Uuid),
    Requester(Uuid),
}

impl RequestScope {
    pub fn for_actor(role: UserRole, user_id: Uuid) -> Self {
        match role {
            UserRole::Admin | UserRole::SuperAdmin => RequestScope::All,
            UserRole::Approver => RequestScope::Status(RequestStatus::Pending),
            UserRole::Driver => RequestScope::Driver(user_id),
            UserRole::User => RequestScope::Requester(user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_roles() {
        assert!(authorize(Transition::Assign, UserRole::Admin).is_ok());
        assert!(authorize(Transition::Assign, UserRole::SuperAdmin).is_ok());
        assert!(matches!(
            authorize(Transition::Assign, UserRole::Approver),
            Err(AppError::Forbidden(_))
        ));
        assert!(authorize(Transition::Assign, UserRole::User).is_err());
    }

    #[test]
    fn test_approve_and_reject_roles() {
        for transition in [Transition::Approve, Transition::Reject] {
            assert!(authorize(transition, UserRole::Approver).is_ok());
            assert!(authorize(transition, UserRole::SuperAdmin).is_ok());
            assert!(authorize(transition, UserRole::Admin).is_err());
            assert!(authorize(transition, UserRole::Driver).is_err());
        }
    }

    #[test]
    fn test_happy_path() {
        assert!(check_transition(Transition::Assign, RequestStatus::Pending).is_ok());
        assert!(check_transition(Transition::Assign, RequestStatus::Assigned).is_ok());
        assert!(check_transition(Transition::Approve, RequestStatus::Assigned).is_ok());
        assert!(check_transition(Transition::Reject, RequestStatus::Pending).is_ok());
        assert!(check_transition(Transition::Reject, RequestStatus::Assigned).is_ok());
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for current in [RequestStatus::Approved, RequestStatus::Rejected, RequestStatus::Cancelled] {
            for transition in [Transition::Assign, Transition::Approve, Transition::Reject] {
                assert!(matches!(
                    check_transition(transition, current),
                    Err(AppError::Conflict(_))
                ));
            }
        }
    }

    #[test]
    fn test_scope_per_role() {
        let me = Uuid::new_v4();
        assert_eq!(RequestScope::for_actor(UserRole::Admin, me), RequestScope::All);
        assert_eq!(RequestScope::for_actor(UserRole::SuperAdmin, me), RequestScope::All);
        assert_eq!(
            RequestScope::for_actor(UserRole::Approver, me),
            RequestScope::Status(RequestStatus::Pending)
        );
        assert_eq!(RequestScope::for_actor(UserRole::Driver, me), RequestScope::Driver(me));
        assert_eq!(RequestScope::for_actor(UserRole::User, me), RequestScope::Requester(me));
    }
}
