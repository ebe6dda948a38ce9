// WHY: branch renaming sits behind a small storage trait so the decision logic is
// testable without a repository on disk

use git2::{BranchType, Repository};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{BranchError, BranchRenameError};

/// Local branch storage
pub trait BranchStore {
    /// Names of all local branches
    fn local_branches(&self) -> Result<Vec<String>, BranchError>;

    /// Rename `from` to `to`; never overwrites an existing branch
    fn rename(&mut self, from: &str, to: &str) -> Result<(), BranchError>;
}

/// Local branches of a git repository, through libgit2
pub struct GitBranchStore {
    repo: Repository,
}

impl GitBranchStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BranchError> {
        let repo = Repository::open(path.as_ref())?;
        info!("Opened repository at {}", path.as_ref().display());
        Ok(Self { repo })
    }

    pub fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }
}

impl BranchStore for GitBranchStore {
    fn local_branches(&self) -> Result<Vec<String>, BranchError> {
        let mut names = Vec::new();
        for entry in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<(), BranchError> {
        let mut branch = self.repo.find_branch(from, BranchType::Local)?;
        branch.rename(to, false)?;
        Ok(())
    }
}

/// Branch names held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBranchStore {
    branches: BTreeSet<String>,
}

impl MemoryBranchStore {
    pub fn new<I, S>(branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            branches: branches.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.branches.iter().map(String::as_str).collect()
    }
}

impl BranchStore for MemoryBranchStore {
    fn local_branches(&self) -> Result<Vec<String>, BranchError> {
        Ok(self.branches.iter().cloned().collect())
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<(), BranchError> {
        if self.branches.contains(to) {
            return Err(BranchError::AlreadyExists(to.to_string()));
        }
        if !self.branches.remove(from) {
            return Err(BranchError::NotFound(from.to_string()));
        }
        self.branches.insert(to.to_string());
        Ok(())
    }
}

/// One attempted rename
#[derive(Debug)]
pub struct BranchRename {
    pub from: String,
    pub to: String,
    pub result: Result<(), BranchRenameError>,
}

impl BranchRename {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Rename "master" to "develop" (or "main" when "develop" already exists) and
/// "slave" to "secondary". Each rename is attempted independently; nothing is
/// rolled back.
pub fn normalize_branches(store: &mut dyn BranchStore) -> Result<Vec<BranchRename>, BranchError> {
    let existing: BTreeSet<String> = store.local_branches()?.into_iter().collect();
    let mut plan = Vec::new();
    if existing.contains("master") {
        let target = if existing.contains("develop") { "main" } else { "develop" };
        plan.push(("master", target));
    }
    if existing.contains("slave") {
        plan.push(("slave", "secondary"));
    }

    let renames: Vec<BranchRename> = plan
        .into_iter()
        .map(|(from, to)| {
            let result = store.rename(from, to).map_err(|source| BranchRenameError {
                from: from.to_string(),
                to: to.to_string(),
                source,
            });
            match &result {
                Ok(()) => info!("Renamed branch '{}' to '{}'", from, to),
                Err(e) => warn!("{}", e),
            }
            BranchRename {
                from: from.to_string(),
                to: to.to_string(),
                result,
            }
        })
        .collect();

    if renames.is_empty() {
        info!("No branches to rename");
    }
    Ok(renames)
}
