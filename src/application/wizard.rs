//! The generic multi-step purchase wizard.
//!
//! A [`Wizard`] walks the ordered steps of one [`Flow`], storing each
//! selection in the flow's draft only if the step accepts it. Once every step
//! is set the draft can be submitted: the wizard builds the request, calls the
//! vertical service under a timeout and, on success, records the purchase in
//! the [`Ledger`] and enters [`Position::Done`].

use super::ledger::Ledger;
use crate::domain::envelope::{ErrorBody, ErrorCode};
use crate::domain::ports::ServiceBox;
use crate::domain::records::{NewTransaction, TransactionRecord};
use crate::domain::validation::normalize_plate;
use crate::domain::vertical::Vertical;
use crate::error::{MarketError, Result};
use std::time::Duration;

/// Client-side limit on a single purchase call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// One named step of a flow.
///
/// `accept` validates a selection and stores it in the draft; it must leave
/// the draft untouched when it returns an error. `autofill` lets a step fill
/// itself from earlier selections, in which case the wizard skips it.
pub struct StepSpec<D, S> {
    pub name: &'static str,
    pub accept: fn(&mut D, S) -> Result<()>,
    pub clear: fn(&mut D),
    pub is_set: fn(&D) -> bool,
    pub autofill: Option<fn(&mut D) -> bool>,
}

impl<D, S> StepSpec<D, S> {
    pub fn new(
        name: &'static str,
        accept: fn(&mut D, S) -> Result<()>,
        clear: fn(&mut D),
        is_set: fn(&D) -> bool,
    ) -> Self {
        Self {
            name,
            accept,
            clear,
            is_set,
            autofill: None,
        }
    }

    pub fn with_autofill(mut self, autofill: fn(&mut D) -> bool) -> Self {
        self.autofill = Some(autofill);
        self
    }
}

/// Step configuration of one vertical.
pub trait Flow: Vertical {
    type Draft: Default + Clone + Send + Sync + 'static;
    type Selection: Send + 'static;

    fn steps() -> Vec<StepSpec<Self::Draft, Self::Selection>>;

    /// Builds the purchase request from a fully set draft.
    fn request(draft: &Self::Draft) -> Result<Self::Request>;

    /// Summarizes a successful purchase for the history.
    fn describe(draft: &Self::Draft, receipt: &Self::Receipt) -> NewTransaction;

    /// The license plate entered, for verticals that take one.
    fn plate(_draft: &Self::Draft) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Step(&'static str),
    /// Every step is set; the draft may be submitted.
    Review,
    Done,
}

/// Index of the first unset step, out of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct Completion<R> {
    pub receipt: R,
    pub record: TransactionRecord,
    /// Set to the normalized plate when it is not among the saved vehicles.
    pub save_vehicle_prompt: Option<String>,
}

pub struct Wizard<F: Flow> {
    service: ServiceBox<F>,
    ledger: Ledger,
    steps: Vec<StepSpec<F::Draft, F::Selection>>,
    cursor: usize,
    skipped: Vec<bool>,
    draft: F::Draft,
    done: Option<Completion<F::Receipt>>,
    last_error: Option<ErrorBody>,
    timeout: Duration,
}

impl<F: Flow> Wizard<F> {
    pub fn new(service: ServiceBox<F>, ledger: Ledger) -> Self {
        let steps = F::steps();
        let skipped = vec![false; steps.len()];
        let mut wizard = Self {
            service,
            ledger,
            steps,
            cursor: 0,
            skipped,
            draft: F::Draft::default(),
            done: None,
            last_error: None,
            timeout: DEFAULT_TIMEOUT,
        };
        wizard.skip_autofilled();
        wizard
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn position(&self) -> Position {
        if self.done.is_some() {
            Position::Done
        } else if let Some(step) = self.steps.get(self.cursor) {
            Position::Step(step.name)
        } else {
            Position::Review
        }
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name).collect()
    }

    pub fn draft(&self) -> &F::Draft {
        &self.draft
    }

    pub fn last_error(&self) -> Option<&ErrorBody> {
        self.last_error.as_ref()
    }

    pub fn completion(&self) -> Option<&Completion<F::Receipt>> {
        self.done.as_ref()
    }

    /// Whether the named step was filled automatically and passed over.
    pub fn is_skipped(&self, name: &str) -> bool {
        self.steps
            .iter()
            .zip(&self.skipped)
            .any(|(step, skipped)| *skipped && step.name == name)
    }

    pub fn progress(&self) -> Progress {
        let total = self.steps.len();
        let completed = self
            .steps
            .iter()
            .position(|s| !(s.is_set)(&self.draft))
            .unwrap_or(total);
        Progress { completed, total }
    }

    pub fn can_submit(&self) -> bool {
        self.done.is_none() && self.steps.iter().all(|s| (s.is_set)(&self.draft))
    }

    /// Offers a selection to the current step.
    ///
    /// A rejected selection leaves the wizard where it was and is reported
    /// through [`Wizard::last_error`] as well.
    pub fn advance(&mut self, selection: F::Selection) -> Result<Position> {
        if self.done.is_some() {
            return Err(MarketError::InvalidState(
                "the purchase is already complete".to_string(),
            ));
        }
        let Some(step) = self.steps.get(self.cursor) else {
            return Err(MarketError::InvalidState(
                "every step is already set".to_string(),
            ));
        };

        if let Err(e) = (step.accept)(&mut self.draft, selection) {
            tracing::debug!(vertical = F::NAME, step = step.name, error = %e, "Selection rejected");
            self.last_error = Some(ErrorBody::from(&e));
            return Err(e);
        }

        self.last_error = None;
        self.skipped[self.cursor] = false;
        self.cursor += 1;
        self.skip_autofilled();
        Ok(self.position())
    }

    fn skip_autofilled(&mut self) {
        while let Some(step) = self.steps.get(self.cursor)
            && let Some(autofill) = step.autofill
            && autofill(&mut self.draft)
        {
            tracing::debug!(vertical = F::NAME, step = step.name, "Step filled automatically");
            self.skipped[self.cursor] = true;
            self.cursor += 1;
        }
    }

    /// Moves to the previous step that was not skipped, clearing it and
    /// every step after it. A no-op on the first step and once done.
    pub fn retreat(&mut self) -> Position {
        if self.done.is_some() {
            return Position::Done;
        }
        let Some(target) = (0..self.cursor).rev().find(|i| !self.skipped[*i]) else {
            return self.position();
        };

        for (step, skipped) in self.steps[target..]
            .iter()
            .zip(self.skipped[target..].iter_mut())
        {
            (step.clear)(&mut self.draft);
            *skipped = false;
        }
        self.cursor = target;
        self.last_error = None;
        self.position()
    }

    /// Starts over with an empty draft.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.skipped.iter_mut().for_each(|s| *s = false);
        self.draft = F::Draft::default();
        self.done = None;
        self.last_error = None;
        self.skip_autofilled();
    }

    /// Places the purchase.
    ///
    /// On failure the wizard keeps its position and draft so the call can be
    /// retried; the error is also kept in [`Wizard::last_error`].
    pub async fn submit(&mut self) -> std::result::Result<&Completion<F::Receipt>, ErrorBody> {
        if !self.can_submit() {
            return Err(ErrorBody::from(MarketError::InvalidState(
                "every step must be set before paying".to_string(),
            )));
        }

        match self.place().await {
            Ok(completion) => {
                self.last_error = None;
                self.cursor = self.steps.len();
                Ok(self.done.insert(completion))
            }
            Err(body) => {
                tracing::warn!(vertical = F::NAME, code = ?body.code, message = %body.message, "Purchase failed");
                self.last_error = Some(body.clone());
                Err(body)
            }
        }
    }

    async fn place(&self) -> std::result::Result<Completion<F::Receipt>, ErrorBody> {
        let request = F::request(&self.draft)?;
        let receipt = match tokio::time::timeout(self.timeout, self.service.purchase(request)).await
        {
            Ok(response) => response.into_result()?,
            Err(_) => {
                return Err(ErrorBody::new(
                    ErrorCode::Timeout,
                    MarketError::Timeout(self.timeout).to_string(),
                ));
            }
        };

        let record = self
            .ledger
            .record_purchase(F::describe(&self.draft, &receipt))
            .await?;

        // The purchase is recorded by now; an unreadable vehicle list only drops the prompt.
        let save_vehicle_prompt = match F::plate(&self.draft) {
            Some(plate) => match self.ledger.has_vehicle(&plate).await {
                Ok(saved) => (!saved).then(|| normalize_plate(&plate)),
                Err(e) => {
                    tracing::warn!(vertical = F::NAME, error = %e, "Saved vehicles unreadable, skipping prompt");
                    None
                }
            },
            None => None,
        };

        tracing::info!(vertical = F::NAME, id = %record.id, amount = %record.amount, "Purchase completed");
        Ok(Completion {
            receipt,
            record,
            save_vehicle_prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::TelcoOperator;
    use crate::domain::envelope::Response;
    use crate::domain::ports::VerticalService;
    use crate::domain::purchase::{TopupReceipt, TopupRequest};
    use crate::infrastructure::artifacts::SeededArtifacts;
    use crate::infrastructure::in_memory::InMemoryStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// A flow whose first step always fills itself.
    struct Preset;

    impl Vertical for Preset {
        const NAME: &'static str = "preset";
        const CATEGORY: &'static str = "Preset";
        type Entity = TelcoOperator;
        type Request = TopupRequest;
        type Receipt = TopupReceipt;
    }

    #[derive(Default, Clone)]
    struct PresetDraft {
        region: Option<&'static str>,
        phone: Option<String>,
    }

    impl Flow for Preset {
        type Draft = PresetDraft;
        type Selection = String;

        fn steps() -> Vec<StepSpec<PresetDraft, String>> {
            vec![
                StepSpec::new(
                    "region",
                    |d: &mut PresetDraft, s: String| {
                        d.region = Some(if s == "HR" { "HR" } else { "SI" });
                        Ok(())
                    },
                    |d: &mut PresetDraft| d.region = None,
                    |d: &PresetDraft| d.region.is_some(),
                )
                .with_autofill(|d| {
                    d.region = Some("HR");
                    true
                }),
                StepSpec::new(
                    "phone",
                    |d, s| {
                        d.phone = Some(s);
                        Ok(())
                    },
                    |d| d.phone = None,
                    |d| d.phone.is_some(),
                ),
            ]
        }

        fn request(_draft: &PresetDraft) -> Result<TopupRequest> {
            Err(MarketError::InvalidState("not purchasable".to_string()))
        }

        fn describe(_draft: &PresetDraft, _receipt: &TopupReceipt) -> NewTransaction {
            unreachable!("never purchased")
        }
    }

    struct Closed;

    #[async_trait]
    impl VerticalService<Preset> for Closed {
        async fn fetch_catalog(&self, _filter: Option<&str>) -> Response<Vec<TelcoOperator>> {
            Response::ok(Vec::new())
        }

        async fn purchase(&self, _request: TopupRequest) -> Response<TopupReceipt> {
            Response::err(ErrorCode::InternalError, "closed")
        }
    }

    fn wizard() -> Wizard<Preset> {
        let ledger = Ledger::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(SeededArtifacts::new(3)),
        );
        Wizard::new(Arc::new(Closed), ledger)
    }

    #[test]
    fn test_new_skips_autofilled_first_step() {
        let mut wizard = wizard();
        assert_eq!(wizard.position(), Position::Step("phone"));
        assert_eq!(wizard.draft().region, Some("HR"));

        wizard.advance("0911234567".to_string()).unwrap();
        assert_eq!(wizard.position(), Position::Review);
        wizard.reset();
        assert_eq!(wizard.position(), Position::Step("phone"));
        assert!(wizard.draft().phone.is_none());
    }
}
