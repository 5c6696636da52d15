//! Student use-case service.
//!
//! # Invariants
//! - `update` is a partial merge: absent or empty patch fields keep the
//!   stored value, and the patch `id` (if any) is never consulted.
//! - Name search is case-sensitive and sorted ascending by name.

use crate::model::student::{NewStudent, Student, StudentId, StudentPatch};
use crate::model::ResourceKind;
use crate::repo::student_repo::StudentRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{debug, info, warn};

/// Business logic for student records.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Every stored student in storage order.
    pub fn list_all(&self) -> ServiceResult<Vec<Student>> {
        let students = self.repo.find_all()?;
        debug!(
            "event=student_list module=service status=ok count={}",
            students.len()
        );
        Ok(students)
    }

    /// Stores a candidate and returns it with its assigned id.
    ///
    /// Field rules are expected to be checked by the caller; the repository
    /// re-checks them before writing.
    pub fn create(&self, candidate: &NewStudent) -> ServiceResult<Student> {
        let created = self.repo.insert(candidate)?;
        info!(
            "event=student_create module=service status=ok id={}",
            created.id
        );
        Ok(created)
    }

    pub fn get_by_id(&self, id: StudentId) -> ServiceResult<Student> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| not_found(id))
    }

    /// Removes a student; repeated calls on a missing id fail the same way.
    pub fn delete_by_id(&self, id: StudentId) -> ServiceResult<()> {
        if !self.repo.exists_by_id(id)? {
            return Err(not_found(id));
        }
        self.repo.delete_by_id(id)?;
        info!("event=student_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Students whose name contains `query` (case-sensitive), by name.
    pub fn find_by_name_substring(&self, query: &str) -> ServiceResult<Vec<Student>> {
        let students = self.repo.find_by_name_containing(query)?;
        debug!(
            "event=student_search module=service status=ok query_len={} count={}",
            query.chars().count(),
            students.len()
        );
        Ok(students)
    }

    /// Merges `patch` into the stored student and persists the result.
    pub fn update(&self, id: StudentId, patch: &StudentPatch) -> ServiceResult<Student> {
        let mut student = self.repo.find_by_id(id)?.ok_or_else(|| not_found(id))?;

        if patch.is_empty() {
            debug!("event=student_update module=service status=noop id={id}");
        }
        student.apply_patch(patch);
        self.repo.update(&student)?;

        info!("event=student_update module=service status=ok id={id}");
        Ok(student)
    }
}

fn not_found(id: StudentId) -> ServiceError {
    warn!("event=student_lookup module=service status=not_found id={id}");
    ServiceError::not_found(ResourceKind::Student, id)
}
