//! Route path constants.

use portal_session::Role;

/// Route paths used by the portal
pub struct Routes;

impl Routes {
    pub const LOGIN: &'static str = "/login";
    pub const TEACHER_LOGIN: &'static str = "/teacher-login";
    pub const REGISTER_STUDENT: &'static str = "/register/student";
    pub const REGISTER_TEACHER: &'static str = "/register/teacher";
    pub const GUEST: &'static str = "/guest";
    pub const DASHBOARD: &'static str = "/dashboard";
    pub const TEACHER_DASHBOARD: &'static str = "/teacher-dashboard";
    pub const ADMIN: &'static str = "/admin";
    pub const PROBLEM: &'static str = "/tasks/:problemId";
    pub const ACCOUNT: &'static str = "/account";
    pub const TEACHER_ACCOUNT: &'static str = "/teacher-account";
}

/// The home route for a role.
pub fn home_route_for_role(role: Role) -> &'static str {
    match role {
        Role::Teacher => Routes::TEACHER_DASHBOARD,
        Role::Admin => Routes::ADMIN,
        Role::Student => Routes::DASHBOARD,
    }
}

/// Concrete route for a problem page.
pub fn problem_route(problem_id: &str) -> String {
    Routes::PROBLEM.replace(":problemId", problem_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_route_per_role() {
        assert_eq!(home_route_for_role(Role::Student), "/dashboard");
        assert_eq!(home_route_for_role(Role::Teacher), "/teacher-dashboard");
        assert_eq!(home_route_for_role(Role::Admin), "/admin");
    }

    #[test]
    fn test_problem_route_substitutes_id() {
        assert_eq!(problem_route("p-42"), "/tasks/p-42");
    }
}
