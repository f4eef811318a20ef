//! Form interaction state for one editing session.
//!
//! Tracks the working record, which fields have been blurred at least once,
//! and the current error per field. Errors are cleared the moment a value
//! changes and recomputed only on blur or submit, so an error is never shown
//! for a value the user has since edited.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::Result;
use crate::submit::RecordSubmitter;
use crate::types::FieldDef;
use crate::validation::{validate, validate_record, ValidationFailure};
use crate::value::{RawValue, Record};

/// Result of a submit attempt that did not fail in the collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The record validated and the collaborator accepted it.
    Submitted,
    /// Validation failed; the collaborator was not called.
    Rejected(Vec<ValidationFailure>),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

/// Mutable state of one form session.
pub struct FormState {
    fields: Vec<FieldDef>,
    values: Record,
    touched: HashSet<String>,
    errors: IndexMap<String, String>,
    submit_attempted: bool,
}

impl FormState {
    /// Start a session.
    ///
    /// With `initial` the record is edited as given. Without it (create flow)
    /// each field's `default_value` is pre-filled.
    pub fn new(fields: Vec<FieldDef>, initial: Option<Record>) -> Self {
        let values = match initial {
            Some(record) => record,
            None => fields
                .iter()
                .filter_map(|f| f.default_value.clone().map(|v| (f.key.clone(), v)))
                .collect(),
        };
        Self {
            fields,
            values,
            touched: HashSet::new(),
            errors: IndexMap::new(),
            submit_attempted: false,
        }
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.visible)
    }

    pub fn field(&self, key: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn record(&self) -> &Record {
        &self.values
    }

    pub fn value(&self, key: &str) -> &RawValue {
        self.values.value(key)
    }

    /// Update a field's value and drop any error recorded for it.
    pub fn change_value(&mut self, key: &str, value: impl Into<RawValue>) {
        if self.field(key).is_none() {
            debug!(%key, "ignoring change for unknown field");
            return;
        }
        self.values.set(key, value);
        if self.errors.shift_remove(key).is_some() {
            debug!(%key, "cleared error on change");
        }
    }

    /// Mark a field touched and validate its current value.
    ///
    /// Returns the field's error after the check, if any.
    pub fn blur(&mut self, key: &str) -> Option<&str> {
        let Some(field) = self.fields.iter().find(|f| f.key == key) else {
            debug!(%key, "ignoring blur for unknown field");
            return None;
        };
        self.touched.insert(key.to_string());

        match validate(field, self.values.value(key)) {
            Some(failure) => {
                debug!(%key, message = %failure.message, "field invalid on blur");
                self.errors.insert(failure.field, failure.message);
            }
            None => {
                self.errors.shift_remove(key);
            }
        }
        self.error(key)
    }

    pub fn is_touched(&self, key: &str) -> bool {
        self.touched.contains(key)
    }

    /// The current error for a field, regardless of touched state.
    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    /// The error a UI should show: only once the field was touched or a
    /// submit was attempted.
    pub fn visible_error(&self, key: &str) -> Option<&str> {
        if self.submit_attempted || self.is_touched(key) {
            self.error(key)
        } else {
            None
        }
    }

    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    /// Validate every visible field and, if clean, hand the record to `submitter`.
    ///
    /// On failure the whole error map is replaced by the new failures and the
    /// collaborator is not called. Collaborator errors are returned as-is.
    pub async fn submit<S>(&mut self, submitter: &S) -> Result<SubmitOutcome>
    where
        S: RecordSubmitter + ?Sized,
    {
        self.submit_attempted = true;
        let failures = validate_record(&self.fields, &self.values);

        self.errors = failures
            .iter()
            .map(|f| (f.field.clone(), f.message.clone()))
            .collect();

        if !failures.is_empty() {
            debug!(failures = failures.len(), "submit rejected");
            return Ok(SubmitOutcome::Rejected(failures));
        }

        submitter.submit(&self.values).await?;
        debug!(fields = self.values.len(), "record submitted");
        Ok(SubmitOutcome::Submitted)
    }

    /// Consume the session, returning the working record.
    pub fn into_record(self) -> Record {
        self.values
    }
}
