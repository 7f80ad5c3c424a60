//! Medicine use-case service.
//!
//! # Responsibility
//! - Provide medicine add/update/toggle/list entry points for callers.
//! - Delegate persistence to repository implementations.

use crate::model::medicine::{Medicine, MedicineId};
use crate::model::profile::UserId;
use crate::repo::medicine_repo::MedicineRepository;
use crate::service::{CareServiceError, ServiceResult};

/// Form input for adding one medicine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMedicineRequest {
    /// Owning user account.
    pub user_uuid: UserId,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub instructions: Option<String>,
    /// Next scheduled dose in epoch milliseconds, when known.
    pub next_dose_at: Option<i64>,
}

/// Medicine service facade over repository implementations.
pub struct MedicineService<R: MedicineRepository> {
    repo: R,
}

impl<R: MedicineRepository> MedicineService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds one medicine from form input and returns the stored record.
    pub fn add_medicine(&self, request: &AddMedicineRequest) -> ServiceResult<Medicine> {
        let mut medicine = Medicine::new(
            request.user_uuid,
            request.name.trim(),
            request.dosage.trim(),
            request.frequency.trim(),
        );
        medicine.instructions = request.instructions.clone();
        medicine.next_dose_at = request.next_dose_at;

        let id = self.repo.create_medicine(&medicine)?;
        self.read_back(id)
    }

    /// Replaces all fields of an existing medicine.
    pub fn update_medicine(&self, medicine: &Medicine) -> ServiceResult<()> {
        self.repo.update_medicine(medicine)?;
        Ok(())
    }

    /// Gets one medicine by ID.
    pub fn get_medicine(&self, id: MedicineId) -> ServiceResult<Option<Medicine>> {
        Ok(self.repo.get_medicine(id)?)
    }

    /// Lists one user's medicines, newest first.
    pub fn list_medicines(&self, user_uuid: UserId) -> ServiceResult<Vec<Medicine>> {
        Ok(self.repo.list_medicines(user_uuid)?)
    }

    /// Sets the taken flag and returns the updated record.
    ///
    /// The flag is a plain toggle; no dose history is recorded.
    pub fn set_taken(&self, id: MedicineId, taken: bool) -> ServiceResult<Medicine> {
        self.repo.set_medicine_taken(id, taken)?;
        self.read_back(id)
    }

    /// Permanently deletes one medicine.
    pub fn delete_medicine(&self, id: MedicineId) -> ServiceResult<()> {
        self.repo.delete_medicine(id)?;
        Ok(())
    }

    fn read_back(&self, id: MedicineId) -> ServiceResult<Medicine> {
        self.repo
            .get_medicine(id)?
            .ok_or(CareServiceError::InconsistentState(
                "written medicine not found in read-back",
            ))
    }
}
