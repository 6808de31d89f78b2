//! Seven-step self-registration form
//!
//! ```text
//! Editing(1) ⇄ … ⇄ Editing(7) ──begin_submit──▶ Submitting ──ok──▶ Submitted
//!                      ▲                             │
//!                      └────────────err──────────────┘
//! NvError (terminal, entered from a bad entry link)
//! ```

mod entry;
mod field;

pub use entry::{registration_url, tag_from_entry};
pub use field::{Field, FormData, PhoneValue};

use crate::store::{DataStore, InsertResult};
use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{EmpleadoInput, ProjectTag};
use uuid::Uuid;

/// Form sections, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Personal = 1,
    Contacto = 2,
    Direccion = 3,
    Emergencia = 4,
    Bancario = 5,
    Prevision = 6,
    Tallas = 7,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::Personal,
        Step::Contacto,
        Step::Direccion,
        Step::Emergencia,
        Step::Bancario,
        Step::Prevision,
        Step::Tallas,
    ];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Personal => "Datos Personales",
            Step::Contacto => "Contacto",
            Step::Direccion => "Dirección",
            Step::Emergencia => "Contacto de Emergencia",
            Step::Bancario => "Datos Bancarios",
            Step::Prevision => "Previsión",
            Step::Tallas => "Tallas",
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(&self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    /// Inputs shown on this step, in display order
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Step::Personal => &[
                Field::Nombre,
                Field::Apellido,
                Field::SegundoApellido,
                Field::NumeroDocumento,
                Field::FechaNacimiento,
                Field::Sexo,
                Field::EstadoCivil,
                Field::PaisNacimiento,
            ],
            Step::Contacto => &[Field::TelefonoParticular, Field::EmailPersonal],
            Step::Direccion => &[
                Field::Ciudad,
                Field::Comuna,
                Field::Calle,
                Field::NumeroCalle,
                Field::DeptoOficina,
            ],
            Step::Emergencia => &[
                Field::ContactoEmergenciaNombre,
                Field::ContactoEmergenciaTelefono,
            ],
            Step::Bancario => &[Field::Banco, Field::TipoCuenta, Field::NumeroCuenta],
            Step::Prevision => &[Field::FondoCotizacion, Field::Salud, Field::Afc],
            Step::Tallas => &[Field::TallaSuperior, Field::TallaInferior, Field::TallaZapato],
        }
    }

    /// Rounded completion shown next to the progress bar
    pub fn progress_percent(&self) -> u8 {
        let total = Self::ALL.len() as u32;
        ((u32::from(self.number()) * 100 + total / 2) / total) as u8
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Editing(Step),
    Submitting,
    Submitted { id: Uuid },
    /// Entry link without a usable `nv`; nothing can be edited
    NvError(AppError),
}

pub struct FormWizard {
    data: FormData,
    phase: Phase,
    tag: Option<ProjectTag>,
    submit_error: Option<String>,
    today: NaiveDate,
}

impl FormWizard {
    /// Open the form from an entry link
    pub fn from_entry(entry: &str) -> Self {
        match tag_from_entry(entry) {
            Ok(tag) => Self::with_tag(tag),
            Err(e) => {
                tracing::warn!(entry, error = %e, "Rejected registration entry link");
                Self {
                    data: FormData::default(),
                    phase: Phase::NvError(e),
                    tag: None,
                    submit_error: None,
                    today: shared::util::today_cl(),
                }
            }
        }
    }

    pub fn with_tag(tag: ProjectTag) -> Self {
        Self {
            data: FormData::default(),
            phase: Phase::Editing(Step::Personal),
            tag: Some(tag),
            submit_error: None,
            today: shared::util::today_cl(),
        }
    }

    /// Pin the date birth dates are checked against
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Drop the draft and start over at the first step; a rejected entry
    /// link stays rejected
    pub fn reset(&mut self) {
        if let Some(tag) = self.tag.take() {
            let today = self.today;
            *self = Self::with_tag(tag).with_today(today);
        }
    }

    // ========== State ==========

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn step(&self) -> Option<Step> {
        match self.phase {
            Phase::Editing(step) => Some(step),
            _ => None,
        }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn tag(&self) -> Option<&ProjectTag> {
        self.tag.as_ref()
    }

    /// Last remote error, shown on step 7 after a failed submit
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn dismiss_submit_error(&mut self) {
        self.submit_error = None;
    }

    fn editing(&self) -> AppResult<Step> {
        self.step()
            .ok_or_else(|| AppError::new(ErrorCode::FormNotEditable))
    }

    // ========== Editing ==========

    pub fn set(&mut self, field: Field, value: &str) -> AppResult<()> {
        self.editing()?;
        self.data.set(field, value, self.today)
    }

    pub fn set_phone_country(&mut self, field: Field, code: &str) -> AppResult<()> {
        self.editing()?;
        self.data.set_phone_country(field, code)
    }

    /// Required fields present and well-formed
    pub fn step_valid(&self, step: Step) -> bool {
        self.step_errors(step).is_empty()
    }

    pub fn step_errors(&self, step: Step) -> Vec<(Field, AppError)> {
        step.fields()
            .iter()
            .filter_map(|&f| self.data.field_error(f).map(|e| (f, e)))
            .collect()
    }

    /// Advance when the current step is complete
    pub fn next(&mut self) -> AppResult<Step> {
        let step = self.editing()?;
        if let Some((field, err)) = self.step_errors(step).into_iter().next() {
            return Err(AppError::new(ErrorCode::StepIncomplete)
                .with_detail("field", field.column())
                .with_detail("reason", err.message));
        }
        let next = step.next().unwrap_or(step);
        self.phase = Phase::Editing(next);
        Ok(next)
    }

    /// Go back one step; returns false on step 1 or outside editing
    pub fn prev(&mut self) -> bool {
        match self.step().and_then(|s| s.prev()) {
            Some(prev) => {
                self.phase = Phase::Editing(prev);
                true
            }
            None => false,
        }
    }

    // ========== Submission ==========

    /// Re-check every step and produce the insert payload
    ///
    /// Only allowed from the last step. On an incomplete step the form jumps
    /// back to it.
    pub fn begin_submit(&mut self) -> AppResult<EmpleadoInput> {
        if self.editing()? != Step::Tallas {
            return Err(AppError::new(ErrorCode::StepIncomplete));
        }
        if let Some(step) = Step::ALL.into_iter().find(|s| !self.step_valid(*s)) {
            self.phase = Phase::Editing(step);
            return Err(AppError::new(ErrorCode::StepIncomplete)
                .with_detail("step", step.number()));
        }
        let tag = self
            .tag
            .clone()
            .ok_or_else(|| AppError::new(ErrorCode::ProjectTagMissing))?;
        let input = self.data.to_input(tag)?;
        self.submit_error = None;
        self.phase = Phase::Submitting;
        Ok(input)
    }

    /// Apply the outcome of the insert started by [`begin_submit`](Self::begin_submit)
    pub fn finish_submit(&mut self, result: InsertResult) -> AppResult<()> {
        if self.phase != Phase::Submitting {
            return Err(AppError::new(ErrorCode::FormNotEditable));
        }
        match (result.data, result.error) {
            (Some(row), None) => {
                self.phase = Phase::Submitted { id: row.id };
                Ok(())
            }
            (_, error) => {
                let message = error.unwrap_or_else(|| ErrorCode::SubmitFailed.message().to_string());
                self.phase = Phase::Editing(Step::Tallas);
                self.submit_error = Some(message.clone());
                Err(AppError::with_message(ErrorCode::SubmitFailed, message))
            }
        }
    }
}

/// Validate, insert and record the outcome in one go
pub async fn submit(wizard: &mut FormWizard, store: &dyn DataStore) -> AppResult<()> {
    let input = wizard.begin_submit()?;
    let result = store.insert(&input).await;
    wizard.finish_submit(result)
}
