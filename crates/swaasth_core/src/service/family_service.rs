//! Family member use-case service.

use crate::model::family_member::{FamilyMember, FamilyMemberId};
use crate::model::profile::UserId;
use crate::repo::family_repo::FamilyMemberRepository;
use crate::service::{CareServiceError, ServiceResult};

/// Form input for adding one family member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFamilyMemberRequest {
    /// Owning user account.
    pub user_uuid: UserId,
    pub name: String,
    pub relationship: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub emergency_contact: bool,
}

/// Family member service facade over repository implementations.
pub struct FamilyService<R: FamilyMemberRepository> {
    repo: R,
}

impl<R: FamilyMemberRepository> FamilyService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds one member from form input and returns the stored record.
    pub fn add_family_member(&self, request: &AddFamilyMemberRequest) -> ServiceResult<FamilyMember> {
        let mut member = FamilyMember::new(
            request.user_uuid,
            request.name.trim(),
            request.relationship.trim(),
        );
        member.phone = request.phone.clone();
        member.email = request.email.clone();
        member.emergency_contact = request.emergency_contact;

        let id = self.repo.create_family_member(&member)?;
        self.repo
            .get_family_member(id)?
            .ok_or(CareServiceError::InconsistentState(
                "written family member not found in read-back",
            ))
    }

    /// Replaces all fields of an existing member.
    pub fn update_family_member(&self, member: &FamilyMember) -> ServiceResult<()> {
        self.repo.update_family_member(member)?;
        Ok(())
    }

    /// Gets one member by ID.
    pub fn get_family_member(&self, id: FamilyMemberId) -> ServiceResult<Option<FamilyMember>> {
        Ok(self.repo.get_family_member(id)?)
    }

    /// Lists one user's family members, newest first.
    pub fn list_family_members(&self, user_uuid: UserId) -> ServiceResult<Vec<FamilyMember>> {
        Ok(self.repo.list_family_members(user_uuid)?)
    }

    /// Permanently deletes one member.
    pub fn delete_family_member(&self, id: FamilyMemberId) -> ServiceResult<()> {
        self.repo.delete_family_member(id)?;
        Ok(())
    }
}
