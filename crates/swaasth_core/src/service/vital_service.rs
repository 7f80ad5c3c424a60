//! Health vital use-case service.

use crate::model::profile::UserId;
use crate::model::vital::{Vital, VitalId, VitalKind};
use crate::repo::vital_repo::VitalRepository;
use crate::service::ServiceResult;

/// Form input for recording one vital reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordVitalRequest {
    /// Owning user account.
    pub user_uuid: UserId,
    pub kind: VitalKind,
    pub value: String,
    pub unit: Option<String>,
    pub notes: Option<String>,
    /// When the reading was taken, epoch milliseconds.
    pub recorded_at: i64,
}

/// Vital service facade over repository implementations.
pub struct VitalService<R: VitalRepository> {
    repo: R,
}

impl<R: VitalRepository> VitalService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Appends one reading to the user's history and returns its ID.
    pub fn record_vital(&self, request: &RecordVitalRequest) -> ServiceResult<VitalId> {
        let mut vital = Vital::new(
            request.user_uuid,
            request.kind,
            request.value.trim(),
            request.recorded_at,
        );
        vital.unit = request.unit.clone();
        vital.notes = request.notes.clone();
        Ok(self.repo.create_vital(&vital)?)
    }

    /// Lists one user's readings, most recent first, optionally filtered
    /// by kind.
    pub fn list_vitals(
        &self,
        user_uuid: UserId,
        kind: Option<VitalKind>,
    ) -> ServiceResult<Vec<Vital>> {
        Ok(self.repo.list_vitals(user_uuid, kind)?)
    }

    /// Permanently deletes one reading.
    pub fn delete_vital(&self, id: VitalId) -> ServiceResult<()> {
        self.repo.delete_vital(id)?;
        Ok(())
    }
}
