//! User profile use-case service.

use crate::model::profile::{UserId, UserProfile};
use crate::repo::profile_repo::ProfileRepository;
use crate::service::{CareServiceError, ServiceResult};

/// Profile service facade over repository implementations.
pub struct ProfileService<R: ProfileRepository> {
    repo: R,
}

impl<R: ProfileRepository> ProfileService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a profile and returns the stored record.
    pub fn create_profile(&self, profile: &UserProfile) -> ServiceResult<UserProfile> {
        let id = self.repo.create_profile(profile)?;
        self.repo
            .get_profile(id)?
            .ok_or(CareServiceError::InconsistentState(
                "written profile not found in read-back",
            ))
    }

    /// Replaces all fields of an existing profile.
    pub fn update_profile(&self, profile: &UserProfile) -> ServiceResult<()> {
        self.repo.update_profile(profile)?;
        Ok(())
    }

    /// Gets one profile by ID.
    pub fn get_profile(&self, id: UserId) -> ServiceResult<Option<UserProfile>> {
        Ok(self.repo.get_profile(id)?)
    }

    /// Permanently deletes one profile and, through schema cascades,
    /// every record it owns.
    pub fn delete_profile(&self, id: UserId) -> ServiceResult<()> {
        self.repo.delete_profile(id)?;
        Ok(())
    }
}
