//! The patient status criteria editor.
//!
//! A bidirectional adapter between a [`PatientStatusCriteria`] value and the
//! sixteen radio-group controls of the status form. Loading data into the
//! editor is silent; a user edit always reconstructs and returns a complete
//! fresh record from the current value of every tracked control, never a
//! partial update. The editor performs no I/O.

use ptui_models::{
    AgeRangeOption, BarthelIndex, ClinicalRiskGroupOption, CognitiveImpairmentLevel,
    DiscomfortDegree, LawtonIndex, PatientStatusCriteria, SpictScale, SurvivalOption,
    YesNoUnknownOption,
};

/// One radio-group control: an optional selection plus an enabled flag.
#[derive(Clone, Copy, Debug)]
struct FieldControl<T: Copy> {
    value: Option<T>,
    enabled: bool,
}

impl<T: Copy> FieldControl<T> {
    fn new() -> Self {
        Self {
            value: None,
            enabled: true,
        }
    }

    /// Apply a user edit. Returns `false` when the control is disabled.
    fn edit(&mut self, value: Option<T>) -> bool {
        if self.enabled {
            self.value = value;
            true
        } else {
            false
        }
    }
}

/// A user edit naming exactly one tracked field and its new selection.
#[derive(Clone, Copy, Debug)]
pub enum CriteriaEdit {
    AgeRange(Option<AgeRangeOption>),
    Ccd(Option<YesNoUnknownOption>),
    Maca(Option<YesNoUnknownOption>),
    ExpectedSurvival(Option<SurvivalOption>),
    FrailVig(Option<SpictScale>),
    ClinicalRiskGroup(Option<ClinicalRiskGroupOption>),
    HasSocialSupport(Option<YesNoUnknownOption>),
    IndependenceAtAdmission(Option<BarthelIndex>),
    IndependenceInstrumentalActivities(Option<LawtonIndex>),
    HasAdvanceDirectives(Option<YesNoUnknownOption>),
    IsCompetent(Option<YesNoUnknownOption>),
    HasBeenInformed(Option<YesNoUnknownOption>),
    IsCoerced(Option<YesNoUnknownOption>),
    HasCognitiveImpairment(Option<CognitiveImpairmentLevel>),
    HasEmotionalPain(Option<YesNoUnknownOption>),
    DiscomfortDegree(Option<DiscomfortDegree>),
}

/// The status criteria editor.
///
/// Tracks sixteen of the criteria fields; the therapeutic-intensity level is
/// not part of the form, so it is always absent from reconstructed records.
#[derive(Clone, Debug)]
pub struct StatusCriteriaEditor {
    age_range: FieldControl<AgeRangeOption>,
    ccd: FieldControl<YesNoUnknownOption>,
    maca: FieldControl<YesNoUnknownOption>,
    expected_survival: FieldControl<SurvivalOption>,
    frail_vig: FieldControl<SpictScale>,
    clinical_risk_group: FieldControl<ClinicalRiskGroupOption>,
    has_social_support: FieldControl<YesNoUnknownOption>,
    independence_at_admission: FieldControl<BarthelIndex>,
    independence_instrumental_activities: FieldControl<LawtonIndex>,
    has_advance_directives: FieldControl<YesNoUnknownOption>,
    is_competent: FieldControl<YesNoUnknownOption>,
    has_been_informed: FieldControl<YesNoUnknownOption>,
    is_coerced: FieldControl<YesNoUnknownOption>,
    has_cognitive_impairment: FieldControl<CognitiveImpairmentLevel>,
    has_emotional_pain: FieldControl<YesNoUnknownOption>,
    discomfort_degree: FieldControl<DiscomfortDegree>,
}

impl StatusCriteriaEditor {
    /// Create an editor with every control unset and enabled.
    pub fn new() -> Self {
        Self {
            age_range: FieldControl::new(),
            ccd: FieldControl::new(),
            maca: FieldControl::new(),
            expected_survival: FieldControl::new(),
            frail_vig: FieldControl::new(),
            clinical_risk_group: FieldControl::new(),
            has_social_support: FieldControl::new(),
            independence_at_admission: FieldControl::new(),
            independence_instrumental_activities: FieldControl::new(),
            has_advance_directives: FieldControl::new(),
            is_competent: FieldControl::new(),
            has_been_informed: FieldControl::new(),
            is_coerced: FieldControl::new(),
            has_cognitive_impairment: FieldControl::new(),
            has_emotional_pain: FieldControl::new(),
            discomfort_degree: FieldControl::new(),
        }
    }

    /// Load a record into the controls, or reset them all when absent.
    ///
    /// This is the silent entry point: it never produces an emission, so the
    /// owning page can sync its model into the editor without a feedback
    /// loop. Disabled controls are loaded too; only user edits respect the
    /// enabled flags.
    pub fn load(&mut self, data: Option<&PatientStatusCriteria>) {
        match data {
            Some(data) => {
                self.age_range.value = data.age_range;
                self.ccd.value = data.ccd;
                self.maca.value = data.maca;
                self.expected_survival.value = data.expected_survival;
                self.frail_vig.value = data.frail_vig;
                self.clinical_risk_group.value = data.clinical_risk_group;
                self.has_social_support.value = data.has_social_support;
                self.independence_at_admission.value = data.independence_at_admission;
                self.independence_instrumental_activities.value =
                    data.independence_instrumental_activities;
                self.has_advance_directives.value = data.has_advance_directives;
                self.is_competent.value = data.is_competent;
                self.has_been_informed.value = data.has_been_informed;
                self.is_coerced.value = data.is_coerced;
                self.has_cognitive_impairment.value = data.has_cognitive_impairment;
                self.has_emotional_pain.value = data.has_emotional_pain;
                self.discomfort_degree.value = data.discomfort_degree;
            }
            None => {
                let enabled = self.enabled_flags();
                *self = Self::new();
                self.restore_enabled_flags(enabled);
            }
        }
    }

    /// Apply a user edit to its control.
    ///
    /// Returns the complete record reconstructed from the current value of
    /// every tracked control, or `None` when the targeted control is
    /// disabled and the edit is ignored.
    pub fn apply(&mut self, edit: CriteriaEdit) -> Option<PatientStatusCriteria> {
        let applied = match edit {
            CriteriaEdit::AgeRange(value) => self.age_range.edit(value),
            CriteriaEdit::Ccd(value) => self.ccd.edit(value),
            CriteriaEdit::Maca(value) => self.maca.edit(value),
            CriteriaEdit::ExpectedSurvival(value) => self.expected_survival.edit(value),
            CriteriaEdit::FrailVig(value) => self.frail_vig.edit(value),
            CriteriaEdit::ClinicalRiskGroup(value) => self.clinical_risk_group.edit(value),
            CriteriaEdit::HasSocialSupport(value) => self.has_social_support.edit(value),
            CriteriaEdit::IndependenceAtAdmission(value) => {
                self.independence_at_admission.edit(value)
            }
            CriteriaEdit::IndependenceInstrumentalActivities(value) => {
                self.independence_instrumental_activities.edit(value)
            }
            CriteriaEdit::HasAdvanceDirectives(value) => self.has_advance_directives.edit(value),
            CriteriaEdit::IsCompetent(value) => self.is_competent.edit(value),
            CriteriaEdit::HasBeenInformed(value) => self.has_been_informed.edit(value),
            CriteriaEdit::IsCoerced(value) => self.is_coerced.edit(value),
            CriteriaEdit::HasCognitiveImpairment(value) => {
                self.has_cognitive_impairment.edit(value)
            }
            CriteriaEdit::HasEmotionalPain(value) => self.has_emotional_pain.edit(value),
            CriteriaEdit::DiscomfortDegree(value) => self.discomfort_degree.edit(value),
        };

        applied.then(|| self.snapshot())
    }

    /// Reconstruct a complete record from the current control values.
    pub fn snapshot(&self) -> PatientStatusCriteria {
        PatientStatusCriteria {
            age_range: self.age_range.value,
            ccd: self.ccd.value,
            maca: self.maca.value,
            expected_survival: self.expected_survival.value,
            frail_vig: self.frail_vig.value,
            clinical_risk_group: self.clinical_risk_group.value,
            has_social_support: self.has_social_support.value,
            independence_at_admission: self.independence_at_admission.value,
            independence_instrumental_activities: self.independence_instrumental_activities.value,
            has_advance_directives: self.has_advance_directives.value,
            is_competent: self.is_competent.value,
            has_been_informed: self.has_been_informed.value,
            is_coerced: self.is_coerced.value,
            has_cognitive_impairment: self.has_cognitive_impairment.value,
            has_emotional_pain: self.has_emotional_pain.value,
            discomfort_degree: self.discomfort_degree.value,
            nit_level: None,
        }
    }

    /// Disable or enable the whole editor. Values are never cleared.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.restore_enabled_flags([enabled; 16]);
    }

    /// Disable the criteria that a treatment cannot causally affect, leaving
    /// the rest editable; unlocking enables everything.
    ///
    /// Used when the editor is embedded twice in the treatment wizard for the
    /// before/expected status pair.
    pub fn lock_treatment_invariants(&mut self, locked: bool) {
        if locked {
            self.age_range.enabled = false;
            self.ccd.enabled = true;
            self.maca.enabled = true;
            self.expected_survival.enabled = true;
            self.frail_vig.enabled = true;
            self.clinical_risk_group.enabled = true;
            self.has_social_support.enabled = false;
            self.independence_at_admission.enabled = false;
            self.independence_instrumental_activities.enabled = true;
            self.has_advance_directives.enabled = false;
            self.is_competent.enabled = false;
            self.has_been_informed.enabled = false;
            self.is_coerced.enabled = false;
            self.has_cognitive_impairment.enabled = false;
            self.has_emotional_pain.enabled = true;
            self.discomfort_degree.enabled = true;
        } else {
            self.set_enabled(true);
        }
    }

    fn enabled_flags(&self) -> [bool; 16] {
        [
            self.age_range.enabled,
            self.ccd.enabled,
            self.maca.enabled,
            self.expected_survival.enabled,
            self.frail_vig.enabled,
            self.clinical_risk_group.enabled,
            self.has_social_support.enabled,
            self.independence_at_admission.enabled,
            self.independence_instrumental_activities.enabled,
            self.has_advance_directives.enabled,
            self.is_competent.enabled,
            self.has_been_informed.enabled,
            self.is_coerced.enabled,
            self.has_cognitive_impairment.enabled,
            self.has_emotional_pain.enabled,
            self.discomfort_degree.enabled,
        ]
    }

    fn restore_enabled_flags(&mut self, flags: [bool; 16]) {
        self.age_range.enabled = flags[0];
        self.ccd.enabled = flags[1];
        self.maca.enabled = flags[2];
        self.expected_survival.enabled = flags[3];
        self.frail_vig.enabled = flags[4];
        self.clinical_risk_group.enabled = flags[5];
        self.has_social_support.enabled = flags[6];
        self.independence_at_admission.enabled = flags[7];
        self.independence_instrumental_activities.enabled = flags[8];
        self.has_advance_directives.enabled = flags[9];
        self.is_competent.enabled = flags[10];
        self.has_been_informed.enabled = flags[11];
        self.is_coerced.enabled = flags[12];
        self.has_cognitive_impairment.enabled = flags[13];
        self.has_emotional_pain.enabled = flags[14];
        self.discomfort_degree.enabled = flags[15];
    }
}

impl Default for StatusCriteriaEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptui_models::NitLevel;

    fn full_criteria() -> PatientStatusCriteria {
        PatientStatusCriteria {
            age_range: Some(AgeRangeOption::AgeBetween80And89),
            ccd: Some(YesNoUnknownOption::Yes),
            maca: Some(YesNoUnknownOption::No),
            expected_survival: Some(SurvivalOption::MoreThan12Months),
            frail_vig: Some(SpictScale::Moderate),
            clinical_risk_group: Some(ClinicalRiskGroupOption::CaseManagement),
            has_social_support: Some(YesNoUnknownOption::Yes),
            independence_at_admission: Some(BarthelIndex::Mild),
            independence_instrumental_activities: Some(LawtonIndex::Six),
            has_advance_directives: Some(YesNoUnknownOption::No),
            is_competent: Some(YesNoUnknownOption::Yes),
            has_been_informed: Some(YesNoUnknownOption::Unknown),
            is_coerced: Some(YesNoUnknownOption::No),
            has_cognitive_impairment: Some(CognitiveImpairmentLevel::Absent),
            has_emotional_pain: Some(YesNoUnknownOption::Unknown),
            discomfort_degree: Some(DiscomfortDegree::Medium),
            nit_level: None,
        }
    }

    #[test]
    fn test_round_trip_through_the_editor_is_identity() {
        let criteria = full_criteria();
        let mut editor = StatusCriteriaEditor::new();
        editor.load(Some(&criteria));
        assert_eq!(editor.snapshot(), criteria);
    }

    #[test]
    fn test_untracked_nit_level_is_dropped_on_reconstruction() {
        let mut criteria = full_criteria();
        criteria.nit_level = Some(NitLevel::TwoB);

        let mut editor = StatusCriteriaEditor::new();
        editor.load(Some(&criteria));

        let rebuilt = editor.snapshot();
        assert_eq!(rebuilt.nit_level, None, "the editor does not track the NIT level");
        assert_eq!(rebuilt.age_range, criteria.age_range);
    }

    #[test]
    fn test_loading_absent_data_resets_every_control() {
        let mut editor = StatusCriteriaEditor::new();
        editor.load(Some(&full_criteria()));
        editor.load(None);
        assert_eq!(editor.snapshot(), PatientStatusCriteria::default());
    }

    #[test]
    fn test_an_edit_reconstructs_from_every_control() {
        let mut editor = StatusCriteriaEditor::new();
        editor.load(Some(&full_criteria()));

        let emitted = editor
            .apply(CriteriaEdit::Ccd(Some(YesNoUnknownOption::Unknown)))
            .expect("edit on an enabled control should emit");

        let mut expected = full_criteria();
        expected.ccd = Some(YesNoUnknownOption::Unknown);
        assert_eq!(emitted, expected, "emission carries every control, not a delta");
    }

    #[test]
    fn test_disabling_the_editor_blocks_edits_and_keeps_values() {
        let mut editor = StatusCriteriaEditor::new();
        editor.load(Some(&full_criteria()));
        editor.set_enabled(false);

        let emitted = editor.apply(CriteriaEdit::Maca(Some(YesNoUnknownOption::Yes)));
        assert!(emitted.is_none(), "a disabled control must ignore edits");
        assert_eq!(editor.snapshot(), full_criteria(), "values are never cleared");

        editor.set_enabled(true);
        assert!(editor
            .apply(CriteriaEdit::Maca(Some(YesNoUnknownOption::Yes)))
            .is_some());
    }

    #[test]
    fn test_treatment_lock_disables_exactly_the_invariant_fields() {
        let mut editor = StatusCriteriaEditor::new();
        editor.lock_treatment_invariants(true);

        // Locked: the criteria a treatment cannot causally affect.
        assert!(editor.apply(CriteriaEdit::AgeRange(Some(AgeRangeOption::AgeMoreThan99))).is_none());
        assert!(editor
            .apply(CriteriaEdit::HasSocialSupport(Some(YesNoUnknownOption::Yes)))
            .is_none());
        assert!(editor
            .apply(CriteriaEdit::IndependenceAtAdmission(Some(BarthelIndex::Total)))
            .is_none());
        assert!(editor
            .apply(CriteriaEdit::HasAdvanceDirectives(Some(YesNoUnknownOption::No)))
            .is_none());
        assert!(editor
            .apply(CriteriaEdit::IsCompetent(Some(YesNoUnknownOption::No)))
            .is_none());
        assert!(editor
            .apply(CriteriaEdit::HasBeenInformed(Some(YesNoUnknownOption::No)))
            .is_none());
        assert!(editor
            .apply(CriteriaEdit::IsCoerced(Some(YesNoUnknownOption::No)))
            .is_none());
        assert!(editor
            .apply(CriteriaEdit::HasCognitiveImpairment(Some(
                CognitiveImpairmentLevel::Severe
            )))
            .is_none());

        // Still editable: everything a treatment can change.
        assert!(editor.apply(CriteriaEdit::Ccd(Some(YesNoUnknownOption::Yes))).is_some());
        assert!(editor
            .apply(CriteriaEdit::ExpectedSurvival(Some(SurvivalOption::Unknown)))
            .is_some());
        assert!(editor
            .apply(CriteriaEdit::DiscomfortDegree(Some(DiscomfortDegree::Low)))
            .is_some());

        editor.lock_treatment_invariants(false);
        assert!(editor
            .apply(CriteriaEdit::AgeRange(Some(AgeRangeOption::AgeMoreThan99)))
            .is_some());
    }

    #[test]
    fn test_load_keeps_enabled_flags_when_resetting() {
        let mut editor = StatusCriteriaEditor::new();
        editor.lock_treatment_invariants(true);
        editor.load(None);

        assert!(
            editor.apply(CriteriaEdit::AgeRange(Some(AgeRangeOption::AgeBetween0And19))).is_none(),
            "resetting values must not re-enable locked controls"
        );
    }
}
