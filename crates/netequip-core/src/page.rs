// ── Entity page controller ──
//
// Holds one entity's loaded collection, its reference collections, the
// current query, the modal form and the detail selection. Every mutation
// goes through the API and is followed by a single reload of the primary
// collection; collections are replaced wholesale, never patched.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use netequip_api::{ApiClient, Id};

use crate::error::CoreError;
use crate::form::FormFields;
use crate::query::{Query, filter_records};
use crate::schema::{EntitySchema, Facet, ReferenceData};
use crate::validate::ValidationError;

// ── Notices ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

// ── Confirmation seam ────────────────────────────────────────────────

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> Result<bool, CoreError>;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> Result<bool, CoreError> {
        Ok(self(prompt))
    }
}

// ── Modal state ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Id),
}

/// The create/edit form. At most one is open at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Modal<F> {
    #[default]
    Closed,
    Open {
        mode: FormMode,
        form: F,
        error: Option<String>,
    },
}

impl<F> Modal<F> {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Open { error, .. } => error.as_deref(),
            Self::Closed => None,
        }
    }
}

// ── Outcomes ─────────────────────────────────────────────────────────

/// Result of an action that may be skipped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The user declined the confirmation; nothing was sent.
    Declined,
    /// The id is not in the loaded collection; nothing was sent.
    NotInCache,
}

/// Result of submitting the open form.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<R> {
    Saved(R),
    /// Local validation failed before any request.
    Invalid(ValidationError),
    /// The pre-flight uniqueness check found a clash.
    Duplicate(String),
}

// ── Page ─────────────────────────────────────────────────────────────

/// Controller for one entity's list, form and detail views.
pub struct EntityPage<S: EntitySchema> {
    client: ApiClient,
    records: Vec<S::Record>,
    references: ReferenceData,
    query: Query<S::Filter>,
    modal: Modal<S::Form>,
    selected: Option<S::Record>,
    notices: Vec<Notice>,
}

impl<S: EntitySchema> std::fmt::Debug for EntityPage<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityPage")
            .field("client", &self.client)
            .field("records", &self.records)
            .field("references", &self.references)
            .field("query", &self.query)
            .field("modal", &self.modal)
            .field("selected", &self.selected)
            .field("notices", &self.notices)
            .finish()
    }
}

impl<S: EntitySchema> EntityPage<S> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            records: Vec::new(),
            references: ReferenceData::default(),
            query: Query::default(),
            modal: Modal::Closed,
            selected: None,
            notices: Vec::new(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The full loaded collection, unfiltered.
    pub fn records(&self) -> &[S::Record] {
        &self.records
    }

    pub fn references(&self) -> &ReferenceData {
        &self.references
    }

    pub fn query(&self) -> &Query<S::Filter> {
        &self.query
    }

    pub fn modal(&self) -> &Modal<S::Form> {
        &self.modal
    }

    pub fn selected(&self) -> Option<&S::Record> {
        self.selected.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn find(&self, id: Id) -> Option<&S::Record> {
        self.records.iter().find(|r| S::id(r) == id)
    }

    pub(crate) fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Fetch the primary collection and the reference collections
    /// concurrently.
    ///
    /// Reference failures become warnings and leave that list empty; a
    /// primary failure fails the load and keeps the previous collection.
    pub async fn load(&mut self) -> Result<(), CoreError> {
        let (references, primary) = tokio::join!(
            ReferenceData::fetch(&self.client, S::REFERENCES),
            self.client.get::<Vec<S::Record>>(S::PATH),
        );

        let (references, failures) = references;
        self.references = references;
        for failure in failures {
            self.notify(NoticeLevel::Warning, failure);
        }

        match primary {
            Ok(records) => {
                debug!(entity = S::PATH, count = records.len(), "loaded collection");
                self.records = records;
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.notify(NoticeLevel::Error, format!("Failed to load {}: {err}", S::PATH));
                Err(err)
            }
        }
    }

    /// Re-fetch the primary collection only.
    pub async fn reload(&mut self) -> Result<(), CoreError> {
        self.records = self.client.get(S::PATH).await?;
        debug!(entity = S::PATH, count = self.records.len(), "reloaded collection");
        Ok(())
    }

    /// Reload after a successful mutation. A failure here is reported,
    /// not returned: the mutation itself already succeeded.
    async fn refresh_after_mutation(&mut self) {
        if let Err(e) = self.reload().await {
            warn!(error = %e, entity = S::PATH, "reload after mutation failed");
            self.notify(NoticeLevel::Warning, format!("Could not refresh the list: {e}"));
        }
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Rows matching the current query, evaluated at the local time.
    pub fn visible(&self) -> Vec<&S::Record> {
        self.visible_at(Local::now().naive_local())
    }

    pub fn visible_at(&self, now: NaiveDateTime) -> Vec<&S::Record> {
        filter_records::<S>(&self.records, &self.query, now)
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.search = text.into();
    }

    pub fn set_filter(&mut self, filter: S::Filter) {
        self.query.filter = filter;
    }

    pub fn filter_mut(&mut self) -> &mut S::Filter {
        &mut self.query.filter
    }

    /// Clear the search text and every filter.
    pub fn reset_filters(&mut self) {
        self.query = Query::default();
    }

    pub fn stats(&self) -> S::Stats {
        self.stats_at(Local::now().naive_local())
    }

    pub fn stats_at(&self, now: NaiveDateTime) -> S::Stats {
        S::stats(&self.records, now)
    }

    pub fn facets(&self) -> Vec<Facet> {
        S::facets(&self.records, &self.references)
    }

    // ── Create / edit ────────────────────────────────────────────────

    /// Open an empty form with the entity's defaults.
    pub fn open_create(&mut self) {
        self.open_create_at(Local::now().naive_local());
    }

    pub fn open_create_at(&mut self, now: NaiveDateTime) {
        self.modal = Modal::Open {
            mode: FormMode::Create,
            form: S::new_form(now),
            error: None,
        };
    }

    /// Fetch the record fresh and open the form pre-filled with it.
    pub async fn open_edit(&mut self, id: Id) -> Result<(), CoreError> {
        let record = self.fetch_one(id).await?;
        self.modal = Modal::Open {
            mode: FormMode::Edit(id),
            form: S::form_from_record(&record),
            error: None,
        };
        Ok(())
    }

    pub fn form(&self) -> Option<&S::Form> {
        match &self.modal {
            Modal::Open { form, .. } => Some(form),
            Modal::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut S::Form> {
        match &mut self.modal {
            Modal::Open { form, .. } => Some(form),
            Modal::Closed => None,
        }
    }

    /// Set one raw field on the open form.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        self.form_mut().ok_or(CoreError::NoOpenForm)?.set(name, value)
    }

    pub fn cancel(&mut self) {
        self.modal = Modal::Closed;
    }

    fn fail_form(&mut self, message: String) {
        if let Modal::Open { error, .. } = &mut self.modal {
            *error = Some(message.clone());
        }
        self.notify(NoticeLevel::Error, message);
    }

    /// Validate the open form and save it.
    ///
    /// On success the form closes and the collection reloads once. On any
    /// failure the form stays open with the error attached and nothing is
    /// reloaded.
    pub async fn submit(&mut self) -> Result<SubmitOutcome<S::Record>, CoreError> {
        let Modal::Open { mode, form, .. } = &self.modal else {
            return Err(CoreError::NoOpenForm);
        };
        let mode = *mode;

        let payload = match S::build_payload(form) {
            Ok(payload) => payload,
            Err(invalid) => {
                self.fail_form(invalid.to_string());
                return Ok(SubmitOutcome::Invalid(invalid));
            }
        };

        if mode == FormMode::Create {
            if let Some(probe) = S::uniqueness_probe(&payload) {
                match probe.exists(&self.client).await {
                    Ok(true) => {
                        let message = probe.duplicate_message();
                        self.fail_form(message.clone());
                        return Ok(SubmitOutcome::Duplicate(message));
                    }
                    Ok(false) => {}
                    Err(e) => warn!(error = %e, "uniqueness check failed, continuing"),
                }
            }
        }

        let saved = match mode {
            FormMode::Create => self.client.post::<S::Record, _>(S::PATH, &payload).await,
            FormMode::Edit(id) => {
                self.client
                    .put::<S::Record, _>(&S::item_path(id), &payload)
                    .await
            }
        };

        match saved {
            Ok(record) => {
                let verb = if mode == FormMode::Create { "created" } else { "updated" };
                info!(entity = S::PATH, id = S::id(&record), "{verb}");
                self.modal = Modal::Closed;
                self.notify(NoticeLevel::Success, format!("{} {verb}", S::TITLE));
                self.refresh_after_mutation().await;
                Ok(SubmitOutcome::Saved(record))
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.fail_form(format!("Save failed: {err}"));
                Err(err)
            }
        }
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Delete a loaded record after confirmation.
    pub async fn delete(&mut self, id: Id, confirm: &dyn Confirm) -> Result<Outcome, CoreError> {
        let Some(record) = self.find(id) else {
            return Ok(Outcome::NotInCache);
        };
        let prompt = S::delete_prompt(record);
        if !confirm.confirm(&prompt)? {
            return Ok(Outcome::Declined);
        }

        let result = self.client.delete(&S::item_path(id)).await;
        self.finish_action(result, &format!("{} deleted", S::TITLE))
            .await?;
        if self.selected.as_ref().is_some_and(|r| S::id(r) == id) {
            self.selected = None;
        }
        Ok(Outcome::Done)
    }

    // ── Detail view ──────────────────────────────────────────────────

    /// Fetch one record fresh and mark it selected.
    pub async fn open_detail(&mut self, id: Id) -> Result<&S::Record, CoreError> {
        let record = self.fetch_one(id).await?;
        Ok(self.selected.insert(record))
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// Close the detail view and open the edit form for the same record.
    pub async fn edit_from_detail(&mut self) -> Result<Outcome, CoreError> {
        let Some(id) = self.selected.as_ref().map(S::id) else {
            return Ok(Outcome::NotInCache);
        };
        self.close_detail();
        self.open_edit(id).await?;
        Ok(Outcome::Done)
    }

    async fn fetch_one(&mut self, id: Id) -> Result<S::Record, CoreError> {
        match self.client.get(&S::item_path(id)).await {
            Ok(record) => Ok(record),
            Err(e) => {
                let err = CoreError::from(e);
                self.notify(
                    NoticeLevel::Error,
                    format!("Failed to load {} {id}: {err}", S::TITLE.to_lowercase()),
                );
                Err(err)
            }
        }
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Report a finished mutation and reload on success.
    pub(crate) async fn finish_action<T>(
        &mut self,
        result: Result<T, netequip_api::Error>,
        success: &str,
    ) -> Result<T, CoreError> {
        match result {
            Ok(value) => {
                info!(entity = S::PATH, "{success}");
                self.notify(NoticeLevel::Success, success);
                self.refresh_after_mutation().await;
                Ok(value)
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.notify(NoticeLevel::Error, format!("Action failed: {err}"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_confirm() {
        let yes = |_: &str| true;
        let no = |_: &str| false;
        assert!(matches!(yes.confirm("Delete?"), Ok(true)));
        assert!(matches!(no.confirm("Delete?"), Ok(false)));
    }

    #[test]
    fn modal_reports_error() {
        let modal: Modal<()> = Modal::Open {
            mode: FormMode::Edit(3),
            form: (),
            error: Some("name: is required".into()),
        };
        assert!(modal.is_open());
        assert_eq!(modal.error(), Some("name: is required"));
        assert_eq!(Modal::<()>::Closed.error(), None);
    }
}
