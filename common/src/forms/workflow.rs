//! The generic submission workflow shared by every record form.
//!
//! A [`FormWorkflow`] owns the raw input of one open form and moves through
//! `Idle -> Submitting -> {Succeeded, Idle}`, with `Closed` reachable from
//! anywhere. Collaborators (the submission action, the notification sink,
//! the enclosing view) are injected through the traits below so the same
//! state machine runs in the browser and in tests.

use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::future::Future;

use super::error::ValidationErrors;
use super::input::FormInput;
use super::layout::FieldLayout;
use super::{FormDefinition, FormKind};
use crate::model::reference::ReferenceData;
use crate::model::submission::{FormMode, SubmissionResult};

/// Shown when a failed submission does not say why.
pub const GENERIC_FAILURE: &str = "Something went wrong!";

/// Server actions invoked with the coerced data of a valid form.
pub trait SubmissionHandler {
    fn create(
        &self,
        kind: FormKind,
        data: Map<String, Value>,
    ) -> impl Future<Output = SubmissionResult>;

    fn update(
        &self,
        kind: FormKind,
        data: Map<String, Value>,
    ) -> impl Future<Output = SubmissionResult>;
}

/// Transient user-facing notifications (toasts).
pub trait NotificationSink {
    fn notify(&self, message: &str);
}

/// The view that opened the form.
pub trait FormHost {
    /// Dismiss the form.
    fn close(&self);
    /// Reload whatever the view shows, so a new or changed record appears.
    fn refresh(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting { ticket: u64 },
    Succeeded,
    Closed,
}

/// Progress of the out-of-band file upload of a form with an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentState {
    Empty,
    Uploading,
    Ready(String),
}

/// Why a submission was not started.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("wait for the upload to finish")]
    UploadPending,
    #[error("the form is closed")]
    Closed,
    #[error("{} field(s) are invalid", .0.len())]
    Invalid(ValidationErrors),
}

/// A validated submission, ready to be handed to a [`SubmissionHandler`].
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub ticket: u64,
    pub kind: FormKind,
    pub mode: FormMode,
    pub data: Map<String, Value>,
}

impl Submission {
    /// Calls the action matching the mode.
    pub async fn dispatch<H: SubmissionHandler + ?Sized>(&self, handler: &H) -> SubmissionResult {
        debug!("dispatching {} {} #{}", self.mode, self.kind, self.ticket);
        match self.mode {
            FormMode::Create => handler.create(self.kind, self.data.clone()).await,
            FormMode::Update => handler.update(self.kind, self.data.clone()).await,
        }
    }
}

/// What [`FormWorkflow::resolve`] did with a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Succeeded,
    Failed(String),
    /// The form was closed or the ticket is stale; nothing happened.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct FormWorkflow {
    definition: FormDefinition,
    mode: FormMode,
    input: FormInput,
    /// Id of the record being updated. Never editable.
    record_id: Option<String>,
    errors: ValidationErrors,
    show_errors: bool,
    status: FormStatus,
    result: SubmissionResult,
    attachment: AttachmentState,
    next_ticket: u64,
}

impl FormWorkflow {
    /// Opens a form.
    ///
    /// In update mode every field is filled from `existing`. In create mode
    /// fields start at their schema default, and selection controls without
    /// a placeholder start on their first option, as a browser would show them.
    pub fn initialize(
        definition: FormDefinition,
        mode: FormMode,
        existing: Option<&Value>,
        reference: Option<&ReferenceData>,
    ) -> Self {
        let mut input = FormInput::new();
        let mut record_id = None;

        match (mode, existing) {
            (FormMode::Update, Some(record)) => {
                input = definition.schema.input_from_value(record);
                if input.is_filled("id") {
                    record_id = Some(input.get("id").to_string());
                }
            }
            (FormMode::Update, None) => {
                warn!("{}: update form opened without a record", definition.kind);
            }
            (FormMode::Create, _) => {
                for spec in definition.schema.fields() {
                    if let Some(default) = spec.default {
                        input.set(spec.key, default);
                    }
                }
                for field in &definition.layout.fields {
                    if input.is_filled(field.key) {
                        continue;
                    }
                    if let Some(value) = field.widget.initial_value(reference) {
                        input.set(field.key, value);
                    }
                }
            }
        }

        let attachment = match &definition.layout.attachment {
            Some(attachment) if input.is_filled(attachment.key) => {
                AttachmentState::Ready(input.get(attachment.key).to_string())
            }
            _ => AttachmentState::Empty,
        };

        debug!("{}: opened in {} mode", definition.kind, mode);
        Self {
            definition,
            mode,
            input,
            record_id,
            errors: ValidationErrors::default(),
            show_errors: false,
            status: FormStatus::Idle,
            result: SubmissionResult::default(),
            attachment,
            next_ticket: 1,
        }
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn kind(&self) -> FormKind {
        self.definition.kind
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn value(&self, key: &str) -> &str {
        self.input.get(key)
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn result(&self) -> &SubmissionResult {
        &self.result
    }

    pub fn attachment(&self) -> &AttachmentState {
        &self.attachment
    }

    pub fn heading(&self) -> String {
        self.definition.layout.heading(self.mode)
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, FormStatus::Idle | FormStatus::Submitting { .. })
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, FormStatus::Submitting { .. })
    }

    /// Errors from the last submit attempt, kept current while the user edits.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key)
    }

    /// Whether the control for `key` is disabled because another field is set.
    pub fn is_disabled(&self, key: &str) -> bool {
        self.definition
            .layout
            .field(key)
            .is_some_and(|field| self.disabled_by_other(field))
    }

    fn disabled_by_other(&self, field: &FieldLayout) -> bool {
        field
            .disabled_when
            .is_some_and(|other| self.input.is_filled(other))
    }

    /// Records a value typed or picked by the user.
    ///
    /// Hidden fields are not editable. Once a submit attempt has shown
    /// errors, they are recomputed on every change.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) {
        if self
            .definition
            .layout
            .field(key)
            .is_some_and(FieldLayout::is_hidden)
        {
            debug!("{}: ignoring edit of hidden field `{key}`", self.kind());
            return;
        }
        self.input.set(key, value);
        if self.show_errors {
            self.errors = self.validate();
        }
    }

    /// The input as it will be submitted: disabled controls dropped, the id
    /// removed in create mode and pinned to the record in update mode.
    fn submission_input(&self) -> FormInput {
        let mut input = self.input.clone();
        for field in &self.definition.layout.fields {
            if self.disabled_by_other(field) {
                input.clear(field.key);
            }
        }
        match (self.mode, &self.record_id) {
            (FormMode::Create, _) => input.clear("id"),
            (FormMode::Update, Some(id)) => input.set("id", id.as_str()),
            (FormMode::Update, None) => {}
        }
        input
    }

    /// Validates the current input without changing any state.
    pub fn validate(&self) -> ValidationErrors {
        self.definition.schema.validate(&self.submission_input())
    }

    /// Checks every precondition and, when all hold, moves to `Submitting`
    /// and returns the submission to dispatch.
    pub fn prepare(&mut self) -> Result<Submission, SubmitBlocked> {
        match self.status {
            FormStatus::Submitting { .. } => return Err(SubmitBlocked::InFlight),
            FormStatus::Succeeded | FormStatus::Closed => return Err(SubmitBlocked::Closed),
            FormStatus::Idle => {}
        }
        if self.attachment == AttachmentState::Uploading {
            return Err(SubmitBlocked::UploadPending);
        }

        let cleaned = match self.definition.schema.clean(&self.submission_input()) {
            Ok(cleaned) => cleaned,
            Err(errors) => {
                debug!("{}: submit blocked by {} error(s)", self.kind(), errors.len());
                self.errors = errors.clone();
                self.show_errors = true;
                return Err(SubmitBlocked::Invalid(errors));
            }
        };

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.errors = ValidationErrors::default();
        self.result = SubmissionResult::default();
        self.status = FormStatus::Submitting { ticket };

        Ok(Submission {
            ticket,
            kind: self.kind(),
            mode: self.mode,
            data: cleaned.to_json(),
        })
    }

    /// Applies the result of a dispatched submission.
    ///
    /// On success the sink is notified and the host is told to close and
    /// refresh. On failure the form returns to `Idle` with its input intact
    /// and the error kept for display. Results for a closed form or an
    /// older ticket have no effect.
    pub fn resolve(
        &mut self,
        ticket: u64,
        result: SubmissionResult,
        sink: &dyn NotificationSink,
        host: &dyn FormHost,
    ) -> Resolution {
        if self.status != (FormStatus::Submitting { ticket }) {
            debug!("{}: discarding result of ticket {ticket}", self.kind());
            return Resolution::Discarded;
        }

        if result.success {
            info!("{} {}", self.kind(), self.mode.past_tense());
            self.status = FormStatus::Succeeded;
            self.result = result;
            sink.notify(&self.definition.layout.success_message(self.mode));
            host.close();
            host.refresh();
            Resolution::Succeeded
        } else {
            let message = result
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            warn!("{} {} failed: {message}", self.mode, self.kind());
            self.status = FormStatus::Idle;
            self.result = SubmissionResult::failure(message.clone());
            Resolution::Failed(message)
        }
    }

    /// Validates, dispatches and resolves in one go.
    pub async fn submit<H: SubmissionHandler + ?Sized>(
        &mut self,
        handler: &H,
        sink: &dyn NotificationSink,
        host: &dyn FormHost,
    ) -> Result<Resolution, SubmitBlocked> {
        let submission = self.prepare()?;
        let result = submission.dispatch(handler).await;
        Ok(self.resolve(submission.ticket, result, sink, host))
    }

    /// Cancels the form. Any pending result is discarded when it arrives.
    pub fn close(&mut self) {
        if self.status != FormStatus::Closed {
            debug!("{}: closed", self.kind());
        }
        self.status = FormStatus::Closed;
    }

    /// Marks the attachment as uploading. Returns `false` for forms without one.
    pub fn begin_upload(&mut self) -> bool {
        if self.definition.layout.attachment.is_none() || !self.is_open() {
            return false;
        }
        self.attachment = AttachmentState::Uploading;
        true
    }

    /// Stores the locator returned by the upload service.
    pub fn complete_upload(&mut self, url: impl Into<String>) {
        let Some(key) = self.definition.layout.attachment.as_ref().map(|a| a.key) else {
            return;
        };
        let url = url.into();
        self.input.set(key, url.as_str());
        self.attachment = AttachmentState::Ready(url);
    }

    /// Abandons an upload, keeping whatever file the form had before.
    pub fn fail_upload(&mut self) {
        let previous = self
            .definition
            .layout
            .attachment
            .as_ref()
            .map(|a| self.input.get(a.key))
            .filter(|url| !url.trim().is_empty())
            .map(str::to_string);
        self.attachment = match previous {
            Some(url) => AttachmentState::Ready(url),
            None => AttachmentState::Empty,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::announcement::Announcement;
    use crate::model::assignment::Assignment;
    use crate::model::attendance::Attendance;
    use crate::model::event::Event;
    use crate::model::lesson::Lesson;
    use crate::model::reference::{ReferenceKind, ReferenceOption};
    use crate::model::student_result::StudentResult;
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use std::cell::RefCell;
    use std::fmt::Debug;

    struct Actions {
        reply: SubmissionResult,
        calls: RefCell<Vec<(FormMode, FormKind, Map<String, Value>)>>,
    }

    impl Actions {
        fn replying(reply: SubmissionResult) -> Self {
            Self {
                reply,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl SubmissionHandler for Actions {
        async fn create(&self, kind: FormKind, data: Map<String, Value>) -> SubmissionResult {
            self.calls.borrow_mut().push((FormMode::Create, kind, data));
            self.reply.clone()
        }

        async fn update(&self, kind: FormKind, data: Map<String, Value>) -> SubmissionResult {
            self.calls.borrow_mut().push((FormMode::Update, kind, data));
            self.reply.clone()
        }
    }

    #[derive(Default)]
    struct Toasts(RefCell<Vec<String>>);

    impl NotificationSink for Toasts {
        fn notify(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    #[derive(Default)]
    struct View {
        closed: RefCell<u32>,
        refreshed: RefCell<u32>,
    }

    impl FormHost for View {
        fn close(&self) {
            *self.closed.borrow_mut() += 1;
        }

        fn refresh(&self) {
            *self.refreshed.borrow_mut() += 1;
        }
    }

    fn open(kind: FormKind, mode: FormMode, existing: Option<&Value>) -> FormWorkflow {
        FormWorkflow::initialize(kind.definition().unwrap(), mode, existing, None)
    }

    fn fill(workflow: &mut FormWorkflow, values: &[(&str, &str)]) {
        for (key, value) in values {
            workflow.set_field(key, *value);
        }
    }

    const EXAM_NOTICE: &[(&str, &str)] = &[
        ("title", "Exam Notice"),
        ("content", "Exams start Monday"),
        ("date", "2024-03-01"),
        ("priority", "HIGH"),
        ("targetAudience", "STUDENTS"),
        ("authorId", "t1"),
    ];

    #[tokio::test]
    async fn announcement_create_submits_exact_values() {
        let actions = Actions::replying(SubmissionResult::ok());
        let toasts = Toasts::default();
        let view = View::default();
        let mut form = open(FormKind::Announcement, FormMode::Create, None);
        fill(&mut form, EXAM_NOTICE);

        let resolution = form.submit(&actions, &toasts, &view).await.unwrap();

        assert_eq!(resolution, Resolution::Succeeded);
        let calls = actions.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (mode, kind, data) = &calls[0];
        assert_eq!((*mode, *kind), (FormMode::Create, FormKind::Announcement));
        assert_eq!(
            Value::Object(data.clone()),
            json!({
                "title": "Exam Notice",
                "content": "Exams start Monday",
                "date": "2024-03-01",
                "priority": "HIGH",
                "targetAudience": "STUDENTS",
                "authorId": "t1",
            })
        );
        assert_eq!(*toasts.0.borrow(), ["Announcement has been created!"]);
        assert_eq!(*view.closed.borrow(), 1);
        assert_eq!(*view.refreshed.borrow(), 1);
        assert_eq!(form.status(), FormStatus::Succeeded);
        assert!(!form.is_open());
    }

    #[tokio::test]
    async fn empty_required_field_never_dispatches() {
        let actions = Actions::replying(SubmissionResult::ok());
        let mut form = open(FormKind::Announcement, FormMode::Create, None);
        fill(&mut form, EXAM_NOTICE);
        form.set_field("title", "   ");

        let blocked = form
            .submit(&actions, &Toasts::default(), &View::default())
            .await
            .unwrap_err();

        let SubmitBlocked::Invalid(errors) = blocked else {
            panic!("expected validation errors, got {blocked:?}");
        };
        assert_eq!(errors.get("title"), Some("Title is required!"));
        assert_eq!(form.error("title"), Some("Title is required!"));
        assert!(actions.calls.borrow().is_empty());
        assert_eq!(form.status(), FormStatus::Idle);
    }

    #[test]
    fn errors_follow_edits_after_a_failed_attempt() {
        let mut form = open(FormKind::Announcement, FormMode::Create, None);
        form.set_field("title", "");
        assert!(form.errors().is_empty());

        assert!(form.prepare().is_err());
        assert!(form.error("title").is_some());

        form.set_field("title", "Fire drill");
        assert_eq!(form.error("title"), None);
    }

    #[test]
    fn validate_is_idempotent() {
        let mut form = open(FormKind::Event, FormMode::Create, None);
        fill(
            &mut form,
            &[
                ("title", "Open Day"),
                ("startDate", "2024-05-10T12:00"),
                ("endDate", "2024-05-10T09:00"),
            ],
        );

        let first = form.validate();
        assert_eq!(first, form.validate());
        assert_eq!(form.status(), FormStatus::Idle);
    }

    #[test]
    fn second_submission_is_blocked_while_in_flight() {
        let mut form = open(FormKind::Announcement, FormMode::Create, None);
        fill(&mut form, EXAM_NOTICE);

        let first = form.prepare().unwrap();
        assert_eq!(form.status(), FormStatus::Submitting { ticket: first.ticket });
        assert_eq!(form.prepare(), Err(SubmitBlocked::InFlight));
    }

    #[test]
    fn failure_keeps_the_form_open_with_its_input() {
        let toasts = Toasts::default();
        let view = View::default();
        let mut form = open(FormKind::Announcement, FormMode::Create, None);
        fill(&mut form, EXAM_NOTICE);

        let submission = form.prepare().unwrap();
        let resolution = form.resolve(
            submission.ticket,
            SubmissionResult::failure("Database unavailable"),
            &toasts,
            &view,
        );

        assert_eq!(resolution, Resolution::Failed("Database unavailable".into()));
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(form.result().error.as_deref(), Some("Database unavailable"));
        assert_eq!(form.value("title"), "Exam Notice");
        assert!(toasts.0.borrow().is_empty());
        assert_eq!(*view.closed.borrow(), 0);

        let retry = form.prepare().unwrap();
        assert!(retry.ticket > submission.ticket);
        assert_eq!(form.result(), &SubmissionResult::default());
    }

    #[test]
    fn failure_without_message_gets_a_generic_one() {
        let mut form = open(FormKind::Announcement, FormMode::Create, None);
        fill(&mut form, EXAM_NOTICE);
        let submission = form.prepare().unwrap();

        let resolution = form.resolve(
            submission.ticket,
            SubmissionResult::default(),
            &Toasts::default(),
            &View::default(),
        );
        assert_eq!(resolution, Resolution::Failed(GENERIC_FAILURE.into()));
    }

    #[test]
    fn result_after_close_is_discarded() {
        let toasts = Toasts::default();
        let view = View::default();
        let mut form = open(FormKind::Announcement, FormMode::Create, None);
        fill(&mut form, EXAM_NOTICE);

        let submission = form.prepare().unwrap();
        form.close();
        let resolution = form.resolve(submission.ticket, SubmissionResult::ok(), &toasts, &view);

        assert_eq!(resolution, Resolution::Discarded);
        assert!(toasts.0.borrow().is_empty());
        assert_eq!(*view.refreshed.borrow(), 0);
        assert_eq!(form.prepare(), Err(SubmitBlocked::Closed));
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut form = open(FormKind::Announcement, FormMode::Create, None);
        fill(&mut form, EXAM_NOTICE);
        let submission = form.prepare().unwrap();

        let resolution = form.resolve(
            submission.ticket + 1,
            SubmissionResult::ok(),
            &Toasts::default(),
            &View::default(),
        );
        assert_eq!(resolution, Resolution::Discarded);
        assert!(form.is_submitting());
    }

    #[test]
    fn pending_upload_blocks_submission_until_the_locator_arrives() {
        let mut form = open(FormKind::Event, FormMode::Create, None);
        fill(
            &mut form,
            &[
                ("title", "Open Day"),
                ("description", "Visit the campus"),
                ("startDate", "2024-05-10T09:00"),
                ("endDate", "2024-05-10T12:00"),
                ("location", "Main hall"),
                ("type", "ACTIVITY"),
            ],
        );

        assert!(form.begin_upload());
        assert_eq!(form.prepare(), Err(SubmitBlocked::UploadPending));

        form.complete_upload("/uploads/poster.png");
        let submission = form.prepare().unwrap();
        assert_eq!(submission.data["imgUrl"], json!("/uploads/poster.png"));
    }

    #[test]
    fn failed_upload_restores_the_previous_file() {
        let existing = json!({
            "id": 3,
            "title": "Essay",
            "dueDate": "2024-04-10T23:59:00",
            "lessonId": 2,
            "points": 20.0,
            "fileUrl": "/uploads/brief.pdf",
        });
        let mut form = open(FormKind::Assignment, FormMode::Update, Some(&existing));
        assert_eq!(form.attachment(), &AttachmentState::Ready("/uploads/brief.pdf".into()));

        form.begin_upload();
        form.fail_upload();
        assert_eq!(form.attachment(), &AttachmentState::Ready("/uploads/brief.pdf".into()));

        assert!(!open(FormKind::Lesson, FormMode::Create, None).begin_upload());
    }

    #[test]
    fn result_requires_exam_or_assignment() {
        let mut form = open(FormKind::Result, FormMode::Create, None);
        fill(&mut form, &[("score", "75"), ("grade", "B"), ("studentId", "s1")]);

        let Err(SubmitBlocked::Invalid(errors)) = form.prepare() else {
            panic!("result without exam or assignment must be rejected");
        };
        assert_eq!(
            errors.get("examId"),
            Some("Either Exam or Assignment must be selected")
        );
    }

    #[test]
    fn selected_exam_disables_and_drops_the_assignment() {
        let mut form = open(FormKind::Result, FormMode::Create, None);
        fill(
            &mut form,
            &[
                ("score", "75"),
                ("grade", "B"),
                ("studentId", "s1"),
                ("assignmentId", "9"),
            ],
        );
        assert!(!form.is_disabled("assignmentId"));

        form.set_field("examId", "4");
        assert!(form.is_disabled("assignmentId"));

        let submission = form.prepare().unwrap();
        assert_eq!(submission.data["examId"], json!(4));
        assert!(!submission.data.contains_key("assignmentId"));
    }

    #[test]
    fn create_mode_applies_defaults_and_first_options() {
        let reference = ReferenceData::new()
            .with(ReferenceKind::Students, vec![ReferenceOption::new("s1", "Ada")])
            .with(ReferenceKind::Lessons, vec![ReferenceOption::new("5", "Chemistry")]);

        let lesson = open(FormKind::Lesson, FormMode::Create, None);
        assert_eq!(lesson.value("day"), "MONDAY");
        assert_eq!(lesson.value("subjectId"), "");

        let attendance = FormWorkflow::initialize(
            FormKind::Attendance.definition().unwrap(),
            FormMode::Create,
            None,
            Some(&reference),
        );
        assert_eq!(attendance.value("studentId"), "s1");
        assert_eq!(attendance.value("lessonId"), "5");
        assert_eq!(attendance.value("status"), "PRESENT");
        assert_eq!(attendance.heading(), "Create a new attendance");
    }

    #[test]
    fn create_mode_never_submits_an_id() {
        let mut form = open(FormKind::Announcement, FormMode::Create, None);
        fill(&mut form, EXAM_NOTICE);
        form.set_field("id", "42");

        let submission = form.prepare().unwrap();
        assert!(!submission.data.contains_key("id"));
    }

    #[tokio::test]
    async fn update_dispatches_to_the_update_action_with_a_pinned_id() {
        let existing = json!({
            "id": 12,
            "title": "Exam Notice",
            "content": "Exams start Monday",
            "date": "2024-03-01",
            "priority": "HIGH",
            "targetAudience": "STUDENTS",
            "authorId": "t1",
        });
        let actions = Actions::replying(SubmissionResult::ok());
        let toasts = Toasts::default();
        let mut form = open(FormKind::Announcement, FormMode::Update, Some(&existing));
        form.set_field("id", "99");
        form.set_field("priority", "URGENT");

        form.submit(&actions, &toasts, &View::default()).await.unwrap();

        let calls = actions.calls.borrow();
        let (mode, _, data) = &calls[0];
        assert_eq!(*mode, FormMode::Update);
        assert_eq!(data["id"], json!(12));
        assert_eq!(data["priority"], json!("URGENT"));
        assert_eq!(*toasts.0.borrow(), ["Announcement has been updated!"]);
    }

    fn valid_record(kind: FormKind) -> Value {
        match kind {
            FormKind::Announcement => json!({
                "id": 1, "title": "Sports day", "content": "Bring water",
                "date": "2024-06-01", "priority": "LOW",
                "targetAudience": "ALL", "authorId": "t3",
            }),
            FormKind::Assignment => json!({
                "id": 2, "title": "Essay", "description": "Two pages",
                "dueDate": "2024-04-10T23:59:00", "lessonId": 7,
                "points": 12.5, "fileUrl": "/uploads/brief.pdf",
            }),
            FormKind::Attendance => json!({
                "id": 3, "date": "2024-09-02", "status": "EXCUSED",
                "notes": "Dentist", "studentId": "s4", "lessonId": 1,
            }),
            FormKind::Event => json!({
                "id": 4, "title": "Open Day", "description": "Visit the campus",
                "startDate": "2024-05-10T09:00:00", "endDate": "2024-05-10T12:30:00",
                "location": "Main hall", "type": "ACTIVITY",
            }),
            FormKind::Lesson => json!({
                "id": 5, "title": "Algebra", "subjectId": 1, "teacherId": "t2",
                "classId": 3, "day": "WEDNESDAY", "startTime": "08:30", "endTime": "09:15",
            }),
            FormKind::Result => json!({
                "id": 6, "score": 91.0, "grade": "A", "feedback": "Great work",
                "studentId": "s1", "assignmentId": 2,
            }),
        }
    }

    fn round_trip<T: DeserializeOwned + PartialEq + Debug>(kind: FormKind) {
        let record = valid_record(kind);
        let expected: T = serde_json::from_value(record.clone()).unwrap();
        let mut form = open(kind, FormMode::Update, Some(&record));

        assert!(form.validate().is_empty(), "{kind}: {:?}", form.validate());
        let submission = form.prepare().unwrap();
        let actual: T = serde_json::from_value(Value::Object(submission.data)).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn update_round_trip_reproduces_every_record() {
        round_trip::<Announcement>(FormKind::Announcement);
        round_trip::<Assignment>(FormKind::Assignment);
        round_trip::<Attendance>(FormKind::Attendance);
        round_trip::<Event>(FormKind::Event);
        round_trip::<Lesson>(FormKind::Lesson);
        round_trip::<StudentResult>(FormKind::Result);
    }

    #[tokio::test]
    async fn every_empty_required_field_blocks_dispatch() {
        for kind in FormKind::ALL {
            let record = valid_record(kind);
            let definition = kind.definition().unwrap();

            for spec in definition.schema.fields().iter().filter(|spec| spec.required) {
                let actions = Actions::replying(SubmissionResult::ok());
                let mut form = open(kind, FormMode::Update, Some(&record));
                form.set_field(spec.key, "");

                let blocked = form
                    .submit(&actions, &Toasts::default(), &View::default())
                    .await
                    .unwrap_err();

                let SubmitBlocked::Invalid(errors) = blocked else {
                    panic!("{kind}.{}: expected validation errors, got {blocked:?}", spec.key);
                };
                assert_eq!(errors.get(spec.key), Some(spec.message), "{kind}.{}", spec.key);
                assert!(actions.calls.borrow().is_empty(), "{kind}.{} was dispatched", spec.key);
            }
        }
    }
}
