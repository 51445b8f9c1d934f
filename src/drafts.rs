use crate::models::{
    Assignment, ClassRecord, EntityKind, Grade, GradebookEntry, Lesson, ScheduleEvent, Student,
    Teacher, User,
};
use crate::store::{Portal, StoreError, Stored};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("draft not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DraftError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Store(e) => e.code(),
        }
    }
}

/// Form state for an open create/edit dialog. It only reaches the collection
/// through [`Drafts::commit`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub draft_id: String,
    #[serde(serialize_with = "kind_str")]
    pub entity: EntityKind,
    /// Record being edited; `None` for a create dialog.
    pub record_id: Option<String>,
    pub fields: Map<String, Value>,
}

fn kind_str<S: serde::Serializer>(kind: &EntityKind, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(kind.as_str())
}

#[derive(Debug, Default)]
pub struct Drafts {
    open: HashMap<String, Draft>,
}

impl Drafts {
    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn clear(&mut self) {
        self.open.clear();
    }

    pub fn get(&self, draft_id: &str) -> Result<&Draft, DraftError> {
        self.open
            .get(draft_id)
            .ok_or_else(|| DraftError::NotFound(draft_id.to_string()))
    }

    /// Opens a draft. With a `record_id` the fields start as a copy of that
    /// record; otherwise they start empty.
    pub fn open(
        &mut self,
        portal: &Portal,
        entity: EntityKind,
        record_id: Option<&str>,
    ) -> Result<&Draft, DraftError> {
        let fields = match record_id {
            Some(id) => snapshot(portal, entity, id)?,
            None => Map::new(),
        };
        let draft = Draft {
            draft_id: Uuid::new_v4().to_string(),
            entity,
            record_id: record_id.map(str::to_string),
            fields,
        };
        let draft_id = draft.draft_id.clone();
        tracing::debug!(%entity, draft_id = %draft_id, "draft opened");
        Ok(self.open.entry(draft_id).or_insert(draft))
    }

    /// Merges `patch` into the draft. The collection is not touched.
    pub fn update(
        &mut self,
        draft_id: &str,
        patch: &Map<String, Value>,
    ) -> Result<&Draft, DraftError> {
        let Some(draft) = self.open.get_mut(draft_id) else {
            return Err(DraftError::NotFound(draft_id.to_string()));
        };
        for (k, v) in patch {
            draft.fields.insert(k.clone(), v.clone());
        }
        Ok(draft)
    }

    /// Writes the draft to its collection and closes it. A rejected commit
    /// leaves the draft open so it can be corrected.
    pub fn commit(&mut self, portal: &mut Portal, draft_id: &str) -> Result<Value, DraftError> {
        let draft = self.get(draft_id)?.clone();
        let saved = match draft.entity {
            EntityKind::User => commit_as::<User>(portal, &draft),
            EntityKind::Student => commit_as::<Student>(portal, &draft),
            EntityKind::Teacher => commit_as::<Teacher>(portal, &draft),
            EntityKind::Class => commit_as::<ClassRecord>(portal, &draft),
            EntityKind::Assignment => commit_as::<Assignment>(portal, &draft),
            EntityKind::Grade => commit_as::<Grade>(portal, &draft),
            EntityKind::GradebookEntry => commit_as::<GradebookEntry>(portal, &draft),
            EntityKind::Lesson => commit_as::<Lesson>(portal, &draft),
            EntityKind::ScheduleEvent => commit_as::<ScheduleEvent>(portal, &draft),
        };
        match saved {
            Ok(saved) => {
                self.open.remove(draft_id);
                tracing::debug!(draft_id, "draft committed");
                Ok(saved)
            }
            // The edited record is gone; the draft can never be saved.
            Err(e @ StoreError::NotFound { .. }) if draft.record_id.is_some() => {
                self.open.remove(draft_id);
                tracing::debug!(draft_id, "draft dropped, record no longer exists");
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn discard(&mut self, draft_id: &str) -> Result<Draft, DraftError> {
        self.open
            .remove(draft_id)
            .ok_or_else(|| DraftError::NotFound(draft_id.to_string()))
    }
}

fn snapshot(portal: &Portal, entity: EntityKind, id: &str) -> Result<Map<String, Value>, StoreError> {
    match entity {
        EntityKind::User => portal.snapshot::<User>(id),
        EntityKind::Student => portal.snapshot::<Student>(id),
        EntityKind::Teacher => portal.snapshot::<Teacher>(id),
        EntityKind::Class => portal.snapshot::<ClassRecord>(id),
        EntityKind::Assignment => portal.snapshot::<Assignment>(id),
        EntityKind::Grade => portal.snapshot::<Grade>(id),
        EntityKind::GradebookEntry => portal.snapshot::<GradebookEntry>(id),
        EntityKind::Lesson => portal.snapshot::<Lesson>(id),
        EntityKind::ScheduleEvent => portal.snapshot::<ScheduleEvent>(id),
    }
}

fn commit_as<T: Stored>(portal: &mut Portal, draft: &Draft) -> Result<Value, StoreError> {
    let saved = match draft.record_id.as_deref() {
        Some(id) => portal.update_from_patch::<T>(id, &draft.fields)?,
        None => portal.create_from_json::<T>(draft.fields.clone())?,
    };
    serde_json::to_value(saved).map_err(|e| StoreError::Invalid {
        kind: T::KIND,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::store::Repository;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().expect("object")
    }

    #[test]
    fn edit_draft_does_not_touch_collection_until_commit() {
        let mut portal = seed::demo();
        let mut drafts = Drafts::default();
        let id = drafts
            .open(&portal, EntityKind::Class, Some("cls-2"))
            .expect("open draft")
            .draft_id
            .clone();
        assert_eq!(
            drafts.get(&id).expect("draft").fields.get("room"),
            Some(&json!("Lab 201"))
        );

        drafts
            .update(&id, &obj(json!({ "room": "Lab 305" })))
            .expect("patch draft");
        assert_eq!(portal.classes.list()[1].room, "Lab 201");

        let saved = drafts.commit(&mut portal, &id).expect("commit");
        assert_eq!(saved["room"], json!("Lab 305"));
        assert_eq!(portal.classes.list()[1].room, "Lab 305");
        assert_eq!(drafts.len(), 0);
    }

    #[test]
    fn create_draft_commits_a_new_record() {
        let mut portal = seed::demo();
        let mut drafts = Drafts::default();
        let id = drafts
            .open(&portal, EntityKind::Lesson, None)
            .expect("open draft")
            .draft_id
            .clone();
        drafts
            .update(
                &id,
                &obj(json!({
                    "title": "Intro to Vectors",
                    "subject": "Physics",
                    "teacher": "Prof. Michael Chen",
                    "durationMinutes": 30,
                    "status": "draft",
                    "views": 0,
                    "completionRate": 0.0,
                    "videoUrl": "https://videos.school.edu/lessons/vectors.mp4"
                })),
            )
            .expect("patch draft");
        let saved = drafts.commit(&mut portal, &id).expect("commit");
        assert_eq!(portal.lessons.len(), 4);
        assert_eq!(saved["title"], json!("Intro to Vectors"));
    }

    #[test]
    fn rejected_commit_keeps_draft_open() {
        let mut portal = seed::demo();
        let mut drafts = Drafts::default();
        let id = drafts
            .open(&portal, EntityKind::User, None)
            .expect("open draft")
            .draft_id
            .clone();
        drafts
            .update(&id, &obj(json!({ "name": "Half Filled" })))
            .expect("patch draft");
        let err = drafts.commit(&mut portal, &id).expect_err("incomplete");
        assert_eq!(err.code(), "bad_params");
        assert!(drafts.get(&id).is_ok());
        assert_eq!(portal.users.len(), 6);
    }

    #[test]
    fn edit_draft_of_deleted_record_is_closed_on_commit() {
        let mut portal = seed::demo();
        let mut drafts = Drafts::default();
        let id = drafts
            .open(&portal, EntityKind::Lesson, Some("les-2"))
            .expect("open draft")
            .draft_id
            .clone();
        portal.lessons.delete("les-2").expect("delete lesson");

        let err = drafts.commit(&mut portal, &id).expect_err("record gone");
        assert_eq!(err.code(), "not_found");
        assert_eq!(drafts.len(), 0);
        assert_eq!(portal.lessons.len(), 2);
    }

    #[test]
    fn discard_and_unknown_drafts() {
        let portal = seed::demo();
        let mut drafts = Drafts::default();
        let id = drafts
            .open(&portal, EntityKind::Student, Some("stu-1"))
            .expect("open draft")
            .draft_id
            .clone();
        drafts.discard(&id).expect("discard");
        assert_eq!(drafts.discard(&id), Err(DraftError::NotFound(id.clone())));
        assert_eq!(
            drafts
                .open(&portal, EntityKind::Student, Some("stu-404"))
                .map(|d| d.draft_id.clone())
                .expect_err("missing record")
                .code(),
            "not_found"
        );
    }
}
