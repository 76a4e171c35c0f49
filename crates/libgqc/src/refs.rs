/// The kind of a raw ref record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// A local branch under `refs/heads/`.
    LocalBranch,
    /// A remote-tracking branch under `refs/remotes/<remote>/`.
    RemoteBranch,
    /// Tags, symbolic refs and anything else we do not match across repositories.
    Other,
}

/// A raw ref as reported by a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ref {
    /// What kind of ref this is.
    pub kind: RefKind,
    /// Short ref name. For remote-tracking branches this includes the remote
    /// prefix, e.g. `origin/feature-x`.
    pub name: Option<String>,
    /// Remote the ref tracks, for remote-tracking branches.
    pub remote: Option<String>,
}

impl Ref {
    /// A local branch called `name`.
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            kind: RefKind::LocalBranch,
            name: Some(name.into()),
            remote: None,
        }
    }

    /// A remote-tracking branch `name` (including the remote prefix) on `remote`.
    pub fn remote(remote: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: RefKind::RemoteBranch,
            name: Some(name.into()),
            remote: Some(remote.into()),
        }
    }

    /// A ref of a kind that never matches across repositories.
    pub fn other(name: impl Into<String>) -> Self {
        Self {
            kind: RefKind::Other,
            name: Some(name.into()),
            remote: None,
        }
    }
}

/// Reduce a ref to the name used to match the "same" branch across
/// repositories.
///
/// Local branches keep their name. Remote-tracking branches lose their leading
/// `<remote>/` segment. Everything else, and any record missing the pieces it
/// needs, yields `None`.
pub fn simplify_ref_name(r: &Ref) -> Option<String> {
    let name = r.name.as_deref().filter(|n| !n.is_empty())?;
    match r.kind {
        RefKind::LocalBranch => Some(name.to_string()),
        RefKind::RemoteBranch => {
            let remote = r.remote.as_deref().filter(|r| !r.is_empty())?;
            name.strip_prefix(remote)
                .and_then(|rest| rest.strip_prefix('/'))
                .filter(|rest| !rest.is_empty())
                .map(str::to_string)
        }
        RefKind::Other => None,
    }
}
