//! FillingSession aggregate - one visitor's pass through a public form.
//!
//! The session owns a snapshot of the form taken when it started, the
//! visitor's answers and the navigation state. Answering a radio or
//! dropdown question whose selected option carries a jump moves the
//! visitor immediately. "Next" requires the current section's required
//! questions to be answered, "Previous" walks the history stack back, and
//! submission requires every required question in the visited sections.
//!
//! Navigation never clears answers, and sections the visitor never saw
//! never block submission.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use super::answer::{check_answer, AnswerIssue};
use super::{
    AnswerValue, FeedbackSubmission, FillingEvent, FillingStatus, NavigationState,
    SubmissionReceipt, SubmittedAnswer,
};
use crate::domain::form::{Form, Section};
use crate::domain::foundation::{
    DomainError, ErrorCode, FillingSessionId, FormId, QuestionId, SectionId, StateMachine,
    Timestamp,
};

/// A required question that is unanswered or answered invalidly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerProblem {
    /// 1-based.
    pub section_number: usize,
    pub question_id: QuestionId,
    pub question_text: String,
    #[serde(serialize_with = "serialize_issue")]
    pub issue: AnswerIssue,
}

fn serialize_issue<S: serde::Serializer>(issue: &AnswerIssue, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&issue.to_string())
}

impl fmt::Display for AnswerProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Section {}: {} ({})",
            self.section_number, self.question_text, self.issue
        )
    }
}

/// Tells the visitor where a choice or the current section leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationHint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<QuestionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
    pub target: SectionId,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct FillingSession {
    id: FillingSessionId,
    form_id: FormId,
    form: Form,
    navigation: NavigationState,
    answers: HashMap<QuestionId, AnswerValue>,
    status: FillingStatus,
    started_at: Timestamp,
    receipt: Option<SubmissionReceipt>,

    domain_events: Vec<FillingEvent>,
}

impl FillingSession {
    /// Starts filling `form` on its first section.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the form has no id
    /// - `FormClosed` if the form is inactive or expired at `now`
    /// - `InvalidStructure` if the form has no sections
    pub fn start(form: Form, now: Timestamp) -> Result<Self, DomainError> {
        let form_id = form
            .id
            .ok_or_else(|| DomainError::validation("form.id", "Only saved forms can be filled"))?;

        if form.is_expired(now) {
            return Err(DomainError::new(ErrorCode::FormClosed, "This form has expired"));
        }
        if !form.is_active {
            return Err(DomainError::new(
                ErrorCode::FormClosed,
                "This form is not accepting responses",
            ));
        }

        let form = form.normalized();
        if form.sections.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InvalidStructure,
                "Form has no sections to fill",
            ));
        }

        let id = FillingSessionId::new();
        Ok(Self {
            id,
            form_id,
            form,
            navigation: NavigationState::new(),
            answers: HashMap::new(),
            status: FillingStatus::InProgress,
            started_at: now,
            receipt: None,
            domain_events: vec![FillingEvent::Started {
                session_id: id,
                form_id,
            }],
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> FillingSessionId {
        self.id
    }

    pub fn form_id(&self) -> FormId {
        self.form_id
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn current_section_index(&self) -> usize {
        self.navigation.current_section_index()
    }

    pub fn current_section(&self) -> &Section {
        &self.form.sections[self.current_section_index()]
    }

    pub fn answers(&self) -> &HashMap<QuestionId, AnswerValue> {
        &self.answers
    }

    pub fn answer_for(&self, question_id: &QuestionId) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    pub fn status(&self) -> FillingStatus {
        self.status
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    pub fn is_last_section(&self) -> bool {
        self.current_section_index() + 1 == self.form.sections.len()
    }

    /// Drains events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<FillingEvent> {
        std::mem::take(&mut self.domain_events)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Answering and navigation
    // ─────────────────────────────────────────────────────────────────────

    /// Stores an answer for a question of the current section.
    ///
    /// When the question is a radio or dropdown question and the selected
    /// option links to another section, the visitor moves there at once.
    /// Returns the section index jumped to, if any.
    pub fn answer(
        &mut self,
        question_id: &QuestionId,
        value: AnswerValue,
    ) -> Result<Option<usize>, DomainError> {
        self.ensure_in_progress()?;

        let current = self.current_section_index();
        let question = match self.form.sections[current].question(question_id) {
            Some(q) => q,
            None if self.form.find_question(question_id).is_some() => {
                return Err(DomainError::new(
                    ErrorCode::QuestionNotInSection,
                    "Only questions of the current section can be answered",
                )
                .with_detail("question_id", question_id.to_string()));
            }
            None => {
                return Err(DomainError::new(
                    ErrorCode::QuestionNotFound,
                    format!("Question '{}' is not part of this form", question_id),
                ));
            }
        };

        let target = if question.question_type.is_single_choice() {
            value
                .as_text()
                .and_then(|label| question.jump_target_for(label))
                .cloned()
        } else {
            None
        };

        self.answers.insert(question_id.clone(), value);

        let Some(target) = target else {
            return Ok(None);
        };
        match self.form.section_index(&target) {
            Some(to) if to != current => {
                self.navigation.jump(to);
                self.record_event(FillingEvent::Jumped {
                    session_id: self.id,
                    question_id: question_id.clone(),
                    from: current,
                    to,
                });
                Ok(Some(to))
            }
            Some(_) => Ok(None),
            None => {
                self.record_event(FillingEvent::StaleLinkIgnored {
                    session_id: self.id,
                    section: current,
                    target,
                });
                Ok(None)
            }
        }
    }

    /// Where "Next" would lead from the current section.
    pub fn next_target(&self) -> Option<usize> {
        let current = self.current_section_index();
        self.section_jump(current).or_else(|| self.sequential_next(current))
    }

    fn section_jump(&self, index: usize) -> Option<usize> {
        self.form.sections[index]
            .next_section
            .as_ref()
            .and_then(|target| self.form.section_index(target))
    }

    fn sequential_next(&self, index: usize) -> Option<usize> {
        (index + 1 < self.form.sections.len()).then_some(index + 1)
    }

    /// Moves to the next section once the current one is complete.
    ///
    /// # Errors
    ///
    /// - `SectionIncomplete` with one detail per unanswered required question
    /// - `NoNextSection` on the last section
    pub fn next(&mut self) -> Result<usize, DomainError> {
        self.ensure_in_progress()?;

        let current = self.current_section_index();
        let problems = self.section_problems(current);
        if !problems.is_empty() {
            return Err(problems_error(
                ErrorCode::SectionIncomplete,
                "Please answer all required questions in this section",
                &problems,
            ));
        }

        let stale = self.form.sections[current]
            .next_section
            .clone()
            .filter(|target| self.form.section_index(target).is_none());
        if let Some(target) = stale {
            self.record_event(FillingEvent::StaleLinkIgnored {
                session_id: self.id,
                section: current,
                target,
            });
        }

        let to = self.next_target().ok_or_else(|| {
            DomainError::new(ErrorCode::NoNextSection, "This is the last section")
        })?;

        self.navigation.advance(to);
        self.record_event(FillingEvent::Advanced {
            session_id: self.id,
            from: current,
            to,
        });
        Ok(to)
    }

    /// Returns to the previously displayed section.
    ///
    /// `Ok(None)` when already back at the start.
    pub fn previous(&mut self) -> Result<Option<usize>, DomainError> {
        self.ensure_in_progress()?;

        let from = self.current_section_index();
        let to = self.navigation.back();
        if let Some(to) = to {
            self.record_event(FillingEvent::WentBack {
                session_id: self.id,
                from,
                to,
            });
        }
        Ok(to)
    }

    /// Where the current section's choices and "Next" lead.
    pub fn navigation_hints(&self) -> Vec<NavigationHint> {
        let section = self.current_section();
        let mut hints = Vec::new();

        for question in section.questions.iter().filter(|q| q.question_type.is_single_choice()) {
            for (option, link) in question.options.iter().zip(&question.option_links) {
                let Some(target) = &link.next_section else {
                    continue;
                };
                if let Some(index) = self.form.section_index(target) {
                    hints.push(NavigationHint {
                        question_id: Some(question.id.clone()),
                        option: Some(option.clone()),
                        target: target.clone(),
                        message: format!(
                            "Selecting \"{}\" will jump to: {}",
                            option,
                            self.form.sections[index].display_title()
                        ),
                    });
                }
            }
        }

        if let Some(target) = &section.next_section {
            if let Some(index) = self.form.section_index(target) {
                hints.push(NavigationHint {
                    question_id: None,
                    option: None,
                    target: target.clone(),
                    message: format!(
                        "This section will continue to: {}",
                        self.form.sections[index].display_title()
                    ),
                });
            }
        }

        hints
    }

    // ─────────────────────────────────────────────────────────────────────
    // Completion
    // ─────────────────────────────────────────────────────────────────────

    fn section_problems(&self, index: usize) -> Vec<AnswerProblem> {
        self.form.sections[index]
            .questions
            .iter()
            .filter_map(|question| {
                check_answer(question, self.answers.get(&question.id))
                    .err()
                    .map(|issue| AnswerProblem {
                        section_number: index + 1,
                        question_id: question.id.clone(),
                        question_text: question.text.clone(),
                        issue,
                    })
            })
            .collect()
    }

    pub fn is_current_section_complete(&self) -> bool {
        self.section_problems(self.current_section_index()).is_empty()
    }

    /// Problems across every visited section, in form order.
    pub fn missing_answers(&self) -> Vec<AnswerProblem> {
        self.navigation
            .visited_sections()
            .iter()
            .filter(|&&index| index < self.form.sections.len())
            .flat_map(|&index| self.section_problems(index))
            .collect()
    }

    pub fn is_form_complete(&self) -> bool {
        self.missing_answers().is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────────────────

    /// Flattens the non-empty answers into a submission, in form order.
    ///
    /// # Errors
    ///
    /// - `FormIncomplete` with one detail per problem in visited sections
    pub fn prepare_submission(&self) -> Result<FeedbackSubmission, DomainError> {
        self.ensure_in_progress()?;

        let problems = self.missing_answers();
        if !problems.is_empty() {
            return Err(problems_error(
                ErrorCode::FormIncomplete,
                "Please answer all required questions before submitting",
                &problems,
            ));
        }

        let answers = self
            .form
            .questions()
            .filter_map(|question| {
                self.answers
                    .get(&question.id)
                    .filter(|answer| !answer.is_empty())
                    .map(|answer| SubmittedAnswer::new(question.id.clone(), answer))
            })
            .collect();

        Ok(FeedbackSubmission {
            form: self.form_id,
            answers,
        })
    }

    /// Locks the session for submission and returns what to hand upstream.
    ///
    /// While the session is `Submitting`, answers, navigation and further
    /// submissions are refused with `SubmissionInProgress`.
    pub fn begin_submission(&mut self) -> Result<FeedbackSubmission, DomainError> {
        let submission = self.prepare_submission()?;
        self.status = self.transition(FillingStatus::Submitting)?;
        Ok(submission)
    }

    /// Unlocks the session after the upstream API refused the submission.
    pub fn release_submission(&mut self) -> Result<(), DomainError> {
        self.status = self.transition(FillingStatus::InProgress)?;
        Ok(())
    }

    /// Records a successful submission. The session accepts no further changes.
    pub fn mark_submitted(&mut self, receipt: SubmissionReceipt) -> Result<(), DomainError> {
        self.status = self.transition(FillingStatus::Submitted)?;
        self.record_event(FillingEvent::Submitted {
            session_id: self.id,
            response_id: receipt.response_id.clone(),
        });
        self.receipt = Some(receipt);
        Ok(())
    }

    fn ensure_in_progress(&self) -> Result<(), DomainError> {
        match self.status {
            FillingStatus::InProgress => Ok(()),
            FillingStatus::Submitting => Err(DomainError::new(
                ErrorCode::SubmissionInProgress,
                "This response is being submitted",
            )),
            FillingStatus::Submitted => Err(DomainError::new(
                ErrorCode::SessionSubmitted,
                "This response has already been submitted",
            )),
        }
    }

    fn transition(&self, target: FillingStatus) -> Result<FillingStatus, DomainError> {
        self.status.transition_to(target).map_err(|e| {
            let code = match self.status {
                FillingStatus::Submitted => ErrorCode::SessionSubmitted,
                _ => ErrorCode::InvalidStateTransition,
            };
            DomainError::new(code, e.to_string())
        })
    }

    fn record_event(&mut self, event: FillingEvent) {
        self.domain_events.push(event);
    }
}

fn problems_error(code: ErrorCode, message: &str, problems: &[AnswerProblem]) -> DomainError {
    problems
        .iter()
        .enumerate()
        .fold(DomainError::new(code, message), |err, (n, problem)| {
            err.with_detail(format!("issue_{}", n + 1), problem.to_string())
        })
}
