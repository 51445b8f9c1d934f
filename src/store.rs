use crate::models::{
    Assignment, ClassRecord, Entity, EntityKind, Grade, GradebookEntry, Lesson, ScheduleEvent,
    Student, Teacher, User,
};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} record not found: {id}")]
    NotFound { kind: EntityKind, id: String },
    #[error("{kind} id already in use or retired: {id}")]
    DuplicateId { kind: EntityKind, id: String },
    #[error("{kind} code already in use: {code}")]
    DuplicateCode { kind: EntityKind, code: String },
    #[error("{kind} id must not be empty")]
    EmptyId { kind: EntityKind },
    #[error("{kind} id cannot be changed: {id}")]
    IdChanged { kind: EntityKind, id: String },
    #[error("invalid {kind} record: {message}")]
    Invalid { kind: EntityKind, message: String },
}

impl StoreError {
    /// Wire error code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::DuplicateId { .. } | Self::DuplicateCode { .. } => "conflict",
            Self::EmptyId { .. } | Self::IdChanged { .. } | Self::Invalid { .. } => "bad_params",
        }
    }
}

/// Data-origin seam for the filter and stats logic.
pub trait Repository<T: Entity> {
    fn list(&self) -> &[T];
    fn get(&self, id: &str) -> Option<&T>;
    fn create(&mut self, record: T) -> Result<&T, StoreError>;
    fn update(&mut self, record: T) -> Result<&T, StoreError>;
    fn delete(&mut self, id: &str) -> Result<T, StoreError>;
}

/// Insertion-ordered in-memory collection.
///
/// Ids are never reused: a deleted id is retired and a later `create` with the
/// same id is rejected.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<T>,
    retired: HashSet<String>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            retired: HashSet::new(),
        }
    }
}

impl<T: Entity> Collection<T> {
    /// Builds a collection from literal seed rows. Seed rows are trusted.
    pub fn from_seed(records: Vec<T>) -> Self {
        Self {
            records,
            retired: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    fn check_record(&self, record: &T, skip: Option<usize>) -> Result<(), StoreError> {
        record.validate().map_err(|message| StoreError::Invalid {
            kind: T::KIND,
            message,
        })?;
        self.check_code(record, skip)
    }

    fn check_code(&self, record: &T, skip: Option<usize>) -> Result<(), StoreError> {
        let Some(code) = record.code() else {
            return Ok(());
        };
        let clash = self
            .records
            .iter()
            .enumerate()
            .any(|(i, r)| Some(i) != skip && r.code() == Some(code));
        if clash {
            return Err(StoreError::DuplicateCode {
                kind: T::KIND,
                code: code.to_string(),
            });
        }
        Ok(())
    }
}

impl<T: Entity> Repository<T> for Collection<T> {
    fn list(&self) -> &[T] {
        &self.records
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn create(&mut self, record: T) -> Result<&T, StoreError> {
        let id = record.id();
        if id.trim().is_empty() {
            return Err(StoreError::EmptyId { kind: T::KIND });
        }
        if self.retired.contains(id) || self.position(id).is_some() {
            return Err(StoreError::DuplicateId {
                kind: T::KIND,
                id: id.to_string(),
            });
        }
        self.check_record(&record, None)?;

        tracing::info!(kind = %T::KIND, id = record.id(), "record created");
        self.records.push(record);
        let last = self.records.len() - 1;
        Ok(&self.records[last])
    }

    fn update(&mut self, record: T) -> Result<&T, StoreError> {
        let Some(idx) = self.position(record.id()) else {
            return Err(StoreError::NotFound {
                kind: T::KIND,
                id: record.id().to_string(),
            });
        };
        self.check_record(&record, Some(idx))?;

        tracing::info!(kind = %T::KIND, id = record.id(), "record updated");
        self.records[idx] = record;
        Ok(&self.records[idx])
    }

    fn delete(&mut self, id: &str) -> Result<T, StoreError> {
        let Some(idx) = self.position(id) else {
            return Err(StoreError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            });
        };
        let removed = self.records.remove(idx);
        self.retired.insert(id.to_string());
        tracing::info!(kind = %T::KIND, id, "record deleted");
        Ok(removed)
    }
}

/// Every collection the portal serves.
#[derive(Debug, Clone, Default)]
pub struct Portal {
    pub users: Collection<User>,
    pub students: Collection<Student>,
    pub teachers: Collection<Teacher>,
    pub classes: Collection<ClassRecord>,
    pub assignments: Collection<Assignment>,
    pub grades: Collection<Grade>,
    pub gradebook: Collection<GradebookEntry>,
    pub lessons: Collection<Lesson>,
    pub schedule: Collection<ScheduleEvent>,
}

impl Portal {
    /// Serialized copy of a stored record, used to pre-populate edit drafts.
    pub fn snapshot<T: Stored>(&self, id: &str) -> Result<Map<String, Value>, StoreError> {
        let Some(record) = T::collection(self).get(id) else {
            return Err(StoreError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            });
        };
        match serde_json::to_value(record) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::Invalid {
                kind: T::KIND,
                message: "record did not serialize to an object".into(),
            }),
            Err(e) => Err(StoreError::Invalid {
                kind: T::KIND,
                message: e.to_string(),
            }),
        }
    }

    /// Creates a record from wire fields. A missing or blank `id` gets a fresh UUID.
    pub fn create_from_json<T: Stored>(
        &mut self,
        mut fields: Map<String, Value>,
    ) -> Result<&T, StoreError> {
        let needs_id = match fields.get("id") {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        };
        if needs_id {
            fields.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
        }
        let record = decode::<T>(fields)?;
        T::collection_mut(self).create(record)
    }

    /// Shallow-merges `patch` over the stored record and writes it back.
    pub fn update_from_patch<T: Stored>(
        &mut self,
        id: &str,
        patch: &Map<String, Value>,
    ) -> Result<&T, StoreError> {
        if let Some(v) = patch.get("id") {
            if v.as_str() != Some(id) {
                return Err(StoreError::IdChanged {
                    kind: T::KIND,
                    id: id.to_string(),
                });
            }
        }
        let mut merged = self.snapshot::<T>(id)?;
        for (k, v) in patch {
            merged.insert(k.clone(), v.clone());
        }
        let record = decode::<T>(merged)?;
        T::collection_mut(self).update(record)
    }
}

fn decode<T: Entity>(fields: Map<String, Value>) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| StoreError::Invalid {
        kind: T::KIND,
        message: e.to_string(),
    })
}

/// Lets generic handlers reach the collection for `Self`.
pub trait Stored: Entity {
    fn collection(portal: &Portal) -> &Collection<Self>;
    fn collection_mut(portal: &mut Portal) -> &mut Collection<Self>;
}

macro_rules! stored {
    ($ty:ty, $field:ident) => {
        impl Stored for $ty {
            fn collection(portal: &Portal) -> &Collection<Self> {
                &portal.$field
            }
            fn collection_mut(portal: &mut Portal) -> &mut Collection<Self> {
                &mut portal.$field
            }
        }
    };
}

stored!(User, users);
stored!(Student, students);
stored!(Teacher, teachers);
stored!(ClassRecord, classes);
stored!(Assignment, assignments);
stored!(Grade, grades);
stored!(GradebookEntry, gradebook);
stored!(Lesson, lessons);
stored!(ScheduleEvent, schedule);
