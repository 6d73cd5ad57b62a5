//! Role gate
//!
//! Maps `(role, resource class)` to allow/deny. The resource class comes from
//! the request path prefix.

use shared::models::Role;

/// Coarse resource category derived from the path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClass {
    Admin,
    Manager,
    Waiter,
    Kitchen,
    Other,
}

impl ResourceClass {
    pub fn from_path(path: &str) -> Self {
        let rest = path.strip_prefix("/api/").unwrap_or("");
        let segment = rest.split('/').next().unwrap_or("");
        match segment {
            "admin" => ResourceClass::Admin,
            "manager" => ResourceClass::Manager,
            "waiter" => ResourceClass::Waiter,
            "kitchen" => ResourceClass::Kitchen,
            _ => ResourceClass::Other,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceClass::Admin => "admin",
            ResourceClass::Manager => "manager",
            ResourceClass::Waiter => "waiter",
            ResourceClass::Kitchen => "kitchen",
            ResourceClass::Other => "other",
        }
    }
}

/// Capability table; roles are not linearly ordered (a cook reaches the
/// kitchen but nothing else)
pub fn role_allows(role: Role, class: ResourceClass) -> bool {
    use ResourceClass as C;
    match role {
        Role::Admin => true,
        Role::Manager => !matches!(class, C::Admin),
        Role::Waiter => matches!(class, C::Waiter | C::Kitchen | C::Other),
        Role::Cook => matches!(class, C::Kitchen),
        Role::Cashier => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_classes() {
        assert_eq!(ResourceClass::from_path("/api/admin/users"), ResourceClass::Admin);
        assert_eq!(ResourceClass::from_path("/api/manager/menu"), ResourceClass::Manager);
        assert_eq!(ResourceClass::from_path("/api/waiter/orders/5"), ResourceClass::Waiter);
        assert_eq!(ResourceClass::from_path("/api/kitchen/orders"), ResourceClass::Kitchen);
        assert_eq!(ResourceClass::from_path("/api/businesses"), ResourceClass::Other);
        // Prefix must be a whole segment
        assert_eq!(ResourceClass::from_path("/api/administrators"), ResourceClass::Other);
    }

    #[test]
    fn test_gate_table() {
        use ResourceClass::*;
        let classes = [Admin, Manager, Waiter, Kitchen, Other];
        let expect = |role, allowed: [bool; 5]| {
            for (class, allow) in classes.iter().zip(allowed) {
                assert_eq!(role_allows(role, *class), allow, "{role:?} on {class:?}");
            }
        };
        expect(Role::Admin, [true, true, true, true, true]);
        expect(Role::Manager, [false, true, true, true, true]);
        expect(Role::Waiter, [false, false, true, true, true]);
        expect(Role::Cook, [false, false, false, true, false]);
        expect(Role::Cashier, [false, false, false, false, false]);
    }
}
