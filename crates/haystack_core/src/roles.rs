use crate::error::{Error, Result};
use crate::runner::{CommandRunner, SiteContext, WpRequest, decode_list};

/// The five roles bbPress registers, in the order they are purged.
pub const BBPRESS_ROLES: [&str; 5] = [
    "bbp_keymaster",
    "bbp_spectator",
    "bbp_blocked",
    "bbp_moderator",
    "bbp_participant",
];

/// Validate a `--name` value against the bbPress role allow-list.
pub fn validate_role(name: &str) -> Result<&'static str> {
    if name.is_empty() {
        return Err(Error::Validation(
            "You must specify a role or use the \"--all\" argument.".to_string(),
        ));
    }
    BBPRESS_ROLES
        .iter()
        .find(|role| **role == name)
        .copied()
        .ok_or_else(|| Error::Validation(format!("Unknown role: {name}")))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePurgeOutcome {
    pub role: String,
    pub detached_users: usize,
}

/// Detach `role` from every user currently holding it, then remove the role
/// definition itself.
///
/// All detachments strictly precede the definition removal. The sequence is
/// not transactional: a detach failure aborts with the definition still in
/// place and the remaining holders untouched. Zero holders is a valid no-op;
/// the definition is still removed.
pub fn purge_role(role: &str, runner: &dyn CommandRunner) -> Result<RolePurgeOutcome> {
    let listing = WpRequest::new(["user", "list"])
        .flag("role", role)
        .flag("field", "ID")
        .flag("format", "json");
    let raw = runner.run(&listing, &SiteContext::Local)?;
    let user_ids = decode_list(&raw)?;

    for user_id in &user_ids {
        let detach = WpRequest::new(["user", "remove-role"]).arg(user_id).arg(role);
        runner.run(&detach, &SiteContext::Local)?;
    }

    let remove = WpRequest::new(["role", "delete"]).arg(role);
    runner.run(&remove, &SiteContext::Local)?;

    Ok(RolePurgeOutcome {
        role: role.to_string(),
        detached_users: user_ids.len(),
    })
}

/// Purge all five bbPress roles in their declared order. `progress` fires with
/// the role name before each purge; the first failure aborts the rest.
pub fn purge_all(
    runner: &dyn CommandRunner,
    mut progress: impl FnMut(&str),
) -> Result<Vec<RolePurgeOutcome>> {
    let mut outcomes = Vec::with_capacity(BBPRESS_ROLES.len());
    for role in BBPRESS_ROLES {
        progress(role);
        outcomes.push(purge_role(role, runner)?);
    }
    Ok(outcomes)
}
