//! Endpoint context dispatch for outcome resources.
//!
//! Outcome groups and links exist under three endpoint families: global,
//! per-account, and per-course. Each hydrated object carries its context
//! so it can build its own request paths without runtime type inspection.

/// The endpoint family an outcome group or link belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Instance-wide outcomes (`global/...`).
    Global,
    /// Outcomes owned by an account (`accounts/{id}/...`).
    Account(u64),
    /// Outcomes owned by a course (`courses/{id}/...`).
    Course(u64),
}

impl Context {
    /// Path prefix for this context, without a trailing slash.
    pub(crate) fn prefix(&self) -> String {
        match self {
            Context::Global => "global".to_string(),
            Context::Account(id) => format!("accounts/{id}"),
            Context::Course(id) => format!("courses/{id}"),
        }
    }

    /// Derive a context from the `context_type`/`context_id` fields Canvas
    /// returns on outcome groups and links. Absent or unrecognized context
    /// types resolve to global.
    pub(crate) fn from_fields(context_type: Option<&str>, context_id: Option<u64>) -> Self {
        match (context_type, context_id) {
            (Some("Account"), Some(id)) => Context::Account(id),
            (Some("Course"), Some(id)) => Context::Course(id),
            _ => Context::Global,
        }
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Context::Global => write!(f, "global"),
            Context::Account(id) => write!(f, "account {id}"),
            Context::Course(id) => write!(f, "course {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix() {
        assert_eq!(Context::Global.prefix(), "global");
        assert_eq!(Context::Account(1).prefix(), "accounts/1");
        assert_eq!(Context::Course(42).prefix(), "courses/42");
    }

    #[test]
    fn test_from_fields() {
        assert_eq!(
            Context::from_fields(Some("Account"), Some(1)),
            Context::Account(1)
        );
        assert_eq!(
            Context::from_fields(Some("Course"), Some(7)),
            Context::Course(7)
        );
        assert_eq!(Context::from_fields(None, None), Context::Global);
        // Context id without a type is meaningless
        assert_eq!(Context::from_fields(None, Some(3)), Context::Global);
        assert_eq!(
            Context::from_fields(Some("User"), Some(3)),
            Context::Global
        );
    }
}
